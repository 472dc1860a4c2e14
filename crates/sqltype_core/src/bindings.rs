use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::datatype::DataType;

/// Types of placeholders seen during a single type check.
///
/// May be seeded by the caller with types known ahead of time. Iteration is
/// ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderTypes {
    types: BTreeMap<String, DataType>,
}

impl PlaceholderTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Set the type for a placeholder, returning the previous type if there
    /// was one.
    pub fn bind(&mut self, name: impl Into<String>, datatype: DataType) -> Option<DataType> {
        self.types.insert(name.into(), datatype)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.types.iter().map(|(name, datatype)| (name.as_str(), datatype))
    }
}

impl<S: Into<String>> FromIterator<(S, DataType)> for PlaceholderTypes {
    fn from_iter<T: IntoIterator<Item = (S, DataType)>>(iter: T) -> Self {
        PlaceholderTypes {
            types: iter.into_iter().map(|(name, dt)| (name.into(), dt)).collect(),
        }
    }
}
