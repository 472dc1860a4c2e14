//! Resolving column references to types.

use std::collections::HashMap;

use crate::ast::QualifiedName;
use crate::datatype::DataType;
use crate::errors::{Result, TypeCheckError};

/// Resolves column references encountered while type checking.
pub trait NameResolver {
    /// Get the type of the column with the given name.
    ///
    /// Should return `TypeCheckError::NameNotFound` if the name doesn't
    /// resolve to anything, and `TypeCheckError::AmbiguousName` if it
    /// resolves to more than one column.
    fn resolve_column(&self, name: &QualifiedName) -> Result<DataType>;
}

/// A resolver with no columns, every reference fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColumns;

impl NameResolver for NoColumns {
    fn resolve_column(&self, name: &QualifiedName) -> Result<DataType> {
        Err(TypeCheckError::NameNotFound(name.clone()))
    }
}

/// A resolver backed by a fixed set of column types.
///
/// Names are matched case insensitively. A reference may use any suffix of a
/// registered name, e.g. `a` finds `t.a` if no other registered name ends in
/// `a`. A suffix matching several names is ambiguous.
#[derive(Debug, Clone, Default)]
pub struct ColumnTypes {
    columns: HashMap<Vec<String>, DataType>,
}

impl ColumnTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: QualifiedName, datatype: DataType) {
        self.columns.insert(normalize(&name), datatype);
    }

    pub fn with_column(mut self, name: QualifiedName, datatype: DataType) -> Self {
        self.insert(name, datatype);
        self
    }
}

fn normalize(name: &QualifiedName) -> Vec<String> {
    name.parts.iter().map(|p| p.to_lowercase()).collect()
}

impl NameResolver for ColumnTypes {
    fn resolve_column(&self, name: &QualifiedName) -> Result<DataType> {
        let wanted = normalize(name);
        if let Some(datatype) = self.columns.get(&wanted) {
            return Ok(datatype.clone());
        }

        let mut matches = self
            .columns
            .iter()
            .filter(|(parts, _)| parts.ends_with(&wanted));

        match (matches.next(), matches.next()) {
            (Some((_, datatype)), None) => Ok(datatype.clone()),
            (Some(_), Some(_)) => Err(TypeCheckError::AmbiguousName(name.clone())),
            (None, _) => Err(TypeCheckError::NameNotFound(name.clone())),
        }
    }
}
