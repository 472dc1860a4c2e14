//! Computing a single type for a group of expressions.
//!
//! Expressions are first classified into [`Item`]s. Everything that isn't a
//! NULL, an untyped constant, a placeholder or a tuple of those is type
//! checked up front, and only contributes its type to the group.

use std::collections::BTreeSet;

use tracing::trace;

use crate::ast::Placeholder;
use crate::bindings::PlaceholderTypes;
use crate::constant::{Constant, group_default};
use crate::datatype::{DataType, compatible_type};
use crate::errors::{TypeCheckError, TypeMismatch};
use crate::expr::{TypedExpr, TypedExprKind};

/// A member of a unification group.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    Null,
    Constant(Constant),
    Placeholder(Placeholder),
    /// An expression that already has a type.
    Typed(TypedExpr),
    /// A tuple literal, its elements unify position by position.
    Tuple(Vec<Item>),
    /// A type taken from one position of an already typed tuple.
    ///
    /// Doesn't produce an output expression.
    Witness { datatype: DataType, label: String },
}

impl Item {
    /// The type this item has when considered on its own.
    ///
    /// Used for error messages when a group fails to unify.
    pub fn best_effort_type(&self, bindings: &PlaceholderTypes) -> DataType {
        match self {
            Item::Null => DataType::Null,
            Item::Constant(c) => c.natural_type(),
            Item::Placeholder(p) => bindings.get(&p.name).cloned().unwrap_or(DataType::Unknown),
            Item::Typed(expr) => expr.datatype.clone(),
            Item::Tuple(items) => {
                DataType::Tuple(items.iter().map(|i| i.best_effort_type(bindings)).collect())
            }
            Item::Witness { datatype, .. } => datatype.clone(),
        }
    }

    /// SQL text naming this item in error messages.
    pub fn label(&self) -> String {
        match self {
            Item::Null => "NULL".to_string(),
            Item::Constant(c) => c.to_string(),
            Item::Placeholder(p) => p.to_string(),
            Item::Typed(expr) => expr.to_string(),
            Item::Tuple(items) => {
                let labels: Vec<_> = items.iter().map(|i| i.label()).collect();
                format!("({})", labels.join(", "))
            }
            Item::Witness { label, .. } => label.clone(),
        }
    }

    /// The fixed type of this item, if it has one.
    fn resolved_type<'a>(&'a self, bindings: &'a PlaceholderTypes) -> Option<&'a DataType> {
        match self {
            Item::Typed(expr) => Some(&expr.datatype),
            Item::Witness { datatype, .. } => Some(datatype),
            Item::Placeholder(p) => bindings.get(&p.name),
            _ => None,
        }
    }

    fn is_tuple_like(&self, bindings: &PlaceholderTypes) -> bool {
        match self {
            Item::Tuple(_) => true,
            other => other
                .resolved_type(bindings)
                .is_some_and(|datatype| datatype.is_tuple()),
        }
    }

    /// Returns true for NULL and expressions typed as NULL.
    pub fn is_null_like(&self) -> bool {
        match self {
            Item::Null => true,
            Item::Typed(expr) => expr.datatype.is_null(),
            Item::Witness { datatype, .. } => datatype.is_null(),
            _ => false,
        }
    }
}

/// Why a group failed to unify.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UnifyError {
    /// Members of the group disagree on the type.
    ///
    /// Constructs wrap this in their own error.
    Mismatch(TypeMismatch),
    /// Any other failure, returned as is.
    Failed(TypeCheckError),
}

impl UnifyError {
    /// Convert to an error, wrapping a mismatch with `wrap`.
    pub fn wrap(self, wrap: impl FnOnce(TypeMismatch) -> TypeCheckError) -> TypeCheckError {
        match self {
            UnifyError::Mismatch(mismatch) => wrap(mismatch),
            UnifyError::Failed(err) => err,
        }
    }

    pub fn into_error(self) -> TypeCheckError {
        self.wrap(TypeCheckError::TypeMismatch)
    }
}

impl From<TypeCheckError> for UnifyError {
    fn from(value: TypeCheckError) -> Self {
        UnifyError::Failed(value)
    }
}

/// Output of a successful unification.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Unified {
    /// The common type of the group.
    pub datatype: DataType,
    /// One typed expression per non-witness item, in input order.
    pub exprs: Vec<TypedExpr>,
}

/// Compute the common type for a group of items.
///
/// Unbound placeholders in the group are bound to the common type on success.
/// On failure, `bindings` may have been partially updated, callers that want
/// to retry must pass a copy.
pub(crate) fn unify(
    items: Vec<Item>,
    desired: Option<&DataType>,
    bindings: &mut PlaceholderTypes,
) -> Result<Unified, UnifyError> {
    if items.iter().any(|item| item.is_tuple_like(bindings)) {
        unify_tuples(items, desired, bindings)
    } else {
        unify_scalars(items, desired, bindings)
    }
}

fn unify_scalars(
    items: Vec<Item>,
    desired: Option<&DataType>,
    bindings: &mut PlaceholderTypes,
) -> Result<Unified, UnifyError> {
    // Already resolved types have to agree with each other. Bound placeholders
    // are checked after typed expressions so that errors blame the
    // placeholder.
    let mut candidate: Option<DataType> = None;
    let resolved = items
        .iter()
        .filter(|item| matches!(item, Item::Typed(_) | Item::Witness { .. }))
        .chain(items.iter().filter(|item| matches!(item, Item::Placeholder(_))));

    for item in resolved {
        let datatype = match item.resolved_type(bindings) {
            Some(datatype) if !datatype.is_null() => datatype,
            _ => continue,
        };
        candidate = match candidate {
            None => Some(datatype.clone()),
            Some(existing) => match compatible_type(&existing, datatype) {
                Some(common) => Some(common),
                None => {
                    return Err(UnifyError::Mismatch(TypeMismatch {
                        expr: item.label(),
                        expected: existing,
                        found: datatype.clone(),
                    }));
                }
            },
        };
    }

    let constants: Vec<&Constant> = items
        .iter()
        .filter_map(|item| match item {
            Item::Constant(c) => Some(c),
            _ => None,
        })
        .collect();

    let unbound: BTreeSet<&str> = items
        .iter()
        .filter_map(|item| match item {
            Item::Placeholder(p) if !bindings.is_bound(&p.name) => Some(p.name.as_str()),
            _ => None,
        })
        .collect();

    // Desired type is only a preference, it's dropped if a constant can't
    // hold it.
    if candidate.is_none() && (!constants.is_empty() || !unbound.is_empty()) {
        if let Some(desired) = desired {
            if !desired.is_null()
                && !desired.contains_unknown()
                && constants.iter().all(|c| c.can_represent(desired))
            {
                candidate = Some(desired.clone());
            }
        }
    }

    if candidate.is_none() && !constants.is_empty() {
        candidate = Some(group_default(constants.iter().copied()));
    }

    let datatype = match candidate {
        Some(datatype) => datatype,
        None => match unbound.first() {
            Some(name) => {
                return Err(UnifyError::Failed(TypeCheckError::AmbiguousParameterType {
                    name: name.to_string(),
                }));
            }
            None => DataType::Null,
        },
    };

    for constant in &constants {
        if !constant.can_represent(&datatype) {
            return Err(UnifyError::Mismatch(TypeMismatch {
                expr: constant.to_string(),
                expected: datatype,
                found: constant.natural_type(),
            }));
        }
    }

    let unbound: Vec<String> = unbound.into_iter().map(str::to_string).collect();
    for name in unbound {
        trace!(%name, %datatype, "binding placeholder");
        bindings.bind(name, datatype.clone());
    }

    let mut exprs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Null => exprs.push(TypedExpr::null()),
            Item::Constant(c) => exprs.push(TypedExpr::literal(c.resolve(&datatype)?)),
            Item::Placeholder(p) => {
                exprs.push(TypedExpr::new(TypedExprKind::Placeholder(p), datatype.clone()))
            }
            Item::Typed(expr) => exprs.push(expr),
            Item::Witness { .. } => (),
            Item::Tuple(_) => {
                return Err(UnifyError::Failed(TypeCheckError::Internal(
                    "tuple in scalar unification group".to_string(),
                )));
            }
        }
    }

    trace!(%datatype, "unified scalar group");

    Ok(Unified { datatype, exprs })
}

fn unify_tuples(
    items: Vec<Item>,
    desired: Option<&DataType>,
    bindings: &mut PlaceholderTypes,
) -> Result<Unified, UnifyError> {
    // Arity is checked before any element so that mismatched tuples always
    // report the entry count.
    let mut arity: Option<usize> = None;
    let mut reference: Option<&Item> = None;
    for item in &items {
        let len = match item {
            Item::Tuple(elems) => elems.len(),
            other => match other.resolved_type(bindings) {
                Some(DataType::Tuple(types)) => types.len(),
                _ => continue,
            },
        };
        match arity {
            None => {
                arity = Some(len);
                reference = Some(item);
            }
            Some(expected) if expected != len => {
                return Err(UnifyError::Failed(TypeCheckError::ArityMismatch {
                    left: expected,
                    right: len,
                }));
            }
            Some(_) => (),
        }
    }

    let (arity, reference) = match (arity, reference) {
        (Some(arity), Some(reference)) => (arity, reference),
        _ => {
            return Err(UnifyError::Failed(TypeCheckError::Internal(
                "tuple group without tuples".to_string(),
            )));
        }
    };

    // Scalars can't join a tuple group.
    for item in &items {
        let scalar = match item {
            Item::Tuple(_) => false,
            Item::Placeholder(p) => bindings.is_bound(&p.name) && !item.is_tuple_like(bindings),
            other => !other.is_null_like() && !other.is_tuple_like(bindings),
        };
        if scalar {
            return Err(UnifyError::Mismatch(TypeMismatch {
                expr: item.label(),
                expected: reference.best_effort_type(bindings),
                found: item.best_effort_type(bindings),
            }));
        }
    }

    let desired_elems = match desired {
        Some(DataType::Tuple(types)) if types.len() == arity => Some(types),
        _ => None,
    };

    // Split into one group per position.
    let mut columns: Vec<Vec<Item>> = vec![Vec::new(); arity];
    for item in &items {
        match item {
            Item::Tuple(elems) => {
                for (column, elem) in columns.iter_mut().zip(elems) {
                    column.push(elem.clone());
                }
            }
            Item::Null => (),
            other => {
                if let Some(DataType::Tuple(types)) = other.resolved_type(bindings) {
                    let label = other.label();
                    for (column, datatype) in columns.iter_mut().zip(types) {
                        column.push(Item::Witness {
                            datatype: datatype.clone(),
                            label: label.clone(),
                        });
                    }
                }
            }
        }
    }

    let mut elem_types = Vec::with_capacity(arity);
    let mut elem_exprs = Vec::with_capacity(arity);
    for (idx, column) in columns.into_iter().enumerate() {
        if column.is_empty() {
            return Err(UnifyError::Failed(TypeCheckError::Internal(
                "empty tuple position".to_string(),
            )));
        }
        let elem_desired = desired_elems.map(|types| &types[idx]);
        let unified = unify(column, elem_desired, bindings)?;
        elem_types.push(unified.datatype);
        elem_exprs.push(unified.exprs.into_iter());
    }

    let datatype = DataType::Tuple(elem_types);

    let mut exprs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Tuple(_) => {
                let mut elems = Vec::with_capacity(arity);
                for column in elem_exprs.iter_mut() {
                    let elem = column.next().ok_or_else(|| {
                        TypeCheckError::Internal("missing tuple element".to_string())
                    })?;
                    elems.push(elem);
                }
                let elem_types = elems.iter().map(|e| e.datatype.clone()).collect();
                exprs.push(TypedExpr::new(
                    TypedExprKind::Tuple(elems),
                    DataType::Tuple(elem_types),
                ));
            }
            Item::Placeholder(p) => {
                let bound = match bindings.get(&p.name) {
                    Some(bound) => bound.clone(),
                    None => {
                        trace!(name = %p.name, %datatype, "binding placeholder");
                        bindings.bind(p.name.clone(), datatype.clone());
                        datatype.clone()
                    }
                };
                exprs.push(TypedExpr::new(TypedExprKind::Placeholder(p), bound));
            }
            Item::Null => exprs.push(TypedExpr::null()),
            Item::Typed(expr) => exprs.push(expr),
            Item::Witness { .. } | Item::Constant(_) => (),
        }
    }

    trace!(%datatype, "unified tuple group");

    Ok(Unified { datatype, exprs })
}
