use std::fmt;
use std::str::FromStr;

use fmtutil::IntoDisplayableSlice;
use serde::{Deserialize, Serialize};

use crate::errors::TypeCheckError;

/// Identifies a type without any of its nested information.
///
/// Used in signatures where we only care about the "kind" of type an argument
/// is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeId {
    /// Any datatype.
    ///
    /// Used in signatures to accept any input. Like all other variants, this
    /// must be explicitly matched on, an actual type never has this id.
    Any,
    Unknown,
    Null,
    Boolean,
    Int,
    Float,
    Decimal,
    String,
    Bytes,
    Date,
    Timestamp,
    Interval,
    Tuple,
}

impl fmt::Display for DataTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Unknown => write!(f, "unknown"),
            Self::Null => write!(f, "NULL"),
            Self::Boolean => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Decimal => write!(f, "decimal"),
            Self::String => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::Date => write!(f, "date"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Interval => write!(f, "interval"),
            Self::Tuple => write!(f, "tuple"),
        }
    }
}

/// Types an expression can have.
///
/// `Null` is the type of the NULL literal and is compatible with every other
/// type during unification. `Unknown` is never the type of a checked
/// expression, it's only used when describing things we couldn't type (e.g.
/// an unbound placeholder in an error message).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Null,
    Unknown,
    Boolean,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    String,
    Bytes,
    Date,
    Timestamp,
    Interval,
    /// Ordered sequence of types.
    Tuple(Vec<DataType>),
}

impl DataType {
    /// Try to create a type from a type id.
    ///
    /// Returns None for ids that don't carry enough information to build a
    /// concrete type (any, tuple).
    pub fn try_default_datatype(id: DataTypeId) -> Option<Self> {
        Some(match id {
            DataTypeId::Any | DataTypeId::Tuple => return None,
            DataTypeId::Unknown => DataType::Unknown,
            DataTypeId::Null => DataType::Null,
            DataTypeId::Boolean => DataType::Boolean,
            DataTypeId::Int => DataType::Int,
            DataTypeId::Float => DataType::Float,
            DataTypeId::Decimal => DataType::Decimal,
            DataTypeId::String => DataType::String,
            DataTypeId::Bytes => DataType::Bytes,
            DataTypeId::Date => DataType::Date,
            DataTypeId::Timestamp => DataType::Timestamp,
            DataTypeId::Interval => DataType::Interval,
        })
    }

    pub const fn datatype_id(&self) -> DataTypeId {
        match self {
            DataType::Null => DataTypeId::Null,
            DataType::Unknown => DataTypeId::Unknown,
            DataType::Boolean => DataTypeId::Boolean,
            DataType::Int => DataTypeId::Int,
            DataType::Float => DataTypeId::Float,
            DataType::Decimal => DataTypeId::Decimal,
            DataType::String => DataTypeId::String,
            DataType::Bytes => DataTypeId::Bytes,
            DataType::Date => DataTypeId::Date,
            DataType::Timestamp => DataTypeId::Timestamp,
            DataType::Interval => DataTypeId::Interval,
            DataType::Tuple(_) => DataTypeId::Tuple,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub const fn is_tuple(&self) -> bool {
        matches!(self, DataType::Tuple(_))
    }

    /// Returns true if this is a bool or null.
    ///
    /// The accepted types for conditions and logical operator arguments.
    pub const fn is_bool_or_null(&self) -> bool {
        matches!(self, DataType::Boolean | DataType::Null)
    }

    /// Returns true if this type (or any nested type) is unknown.
    pub fn contains_unknown(&self) -> bool {
        match self {
            DataType::Unknown => true,
            DataType::Tuple(types) => types.iter().any(|t| t.contains_unknown()),
            _ => false,
        }
    }

    /// Check if a value of this type satisfies a signature argument.
    pub fn matches_id(&self, id: DataTypeId) -> bool {
        id == DataTypeId::Any || self.datatype_id() == id
    }

    /// The SQL name of the type, used when the type was written by the user
    /// (e.g. the target of a cast).
    pub const fn sql_name(&self) -> &'static str {
        match self {
            DataType::Null => "NULL",
            DataType::Unknown => "UNKNOWN",
            DataType::Boolean => "BOOL",
            DataType::Int => "INT",
            DataType::Float => "FLOAT",
            DataType::Decimal => "DECIMAL",
            DataType::String => "STRING",
            DataType::Bytes => "BYTES",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Interval => "INTERVAL",
            DataType::Tuple(_) => "TUPLE",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Tuple(types) => {
                write!(f, "tuple{}", types.displayable().with_delimiters("{", "}"))
            }
            other => write!(f, "{}", other.datatype_id()),
        }
    }
}

impl FromStr for DataType {
    type Err = TypeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "null" => DataType::Null,
            "bool" | "boolean" => DataType::Boolean,
            "int" | "integer" | "int8" | "int64" | "bigint" => DataType::Int,
            "float" | "float8" | "double" | "real" => DataType::Float,
            "decimal" | "numeric" => DataType::Decimal,
            "string" | "text" | "varchar" => DataType::String,
            "bytes" | "bytea" | "blob" => DataType::Bytes,
            "date" => DataType::Date,
            "timestamp" => DataType::Timestamp,
            "interval" => DataType::Interval,
            _ => return Err(TypeCheckError::UnknownTypeName(s.to_string())),
        })
    }
}

/// Structural type equality.
///
/// Tuples are equal only if they have the same arity and equal element types.
pub fn types_equal(a: &DataType, b: &DataType) -> bool {
    match (a, b) {
        (DataType::Tuple(a), DataType::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| types_equal(a, b))
        }
        (a, b) => a.datatype_id() == b.datatype_id(),
    }
}

/// Compute the type two types are compatible with, if any.
///
/// Null is compatible with everything. Tuples are compatible element-wise
/// when they have the same arity. Otherwise types must be equal, there's no
/// implicit widening between distinct concrete types.
pub fn compatible_type(a: &DataType, b: &DataType) -> Option<DataType> {
    match (a, b) {
        (DataType::Null, other) | (other, DataType::Null) => Some(other.clone()),
        (DataType::Tuple(a), DataType::Tuple(b)) => {
            if a.len() != b.len() {
                return None;
            }
            let types = a
                .iter()
                .zip(b)
                .map(|(a, b)| compatible_type(a, b))
                .collect::<Option<Vec<_>>>()?;
            Some(DataType::Tuple(types))
        }
        (a, b) if types_equal(a, b) => Some(a.clone()),
        _ => None,
    }
}
