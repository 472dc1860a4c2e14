//! Untyped literals.
//!
//! A constant keeps its original text and its exact value until a unification
//! group decides which type it becomes.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::datatype::DataType;
use crate::decimal::Decimal;
use crate::errors::{Result, TypeCheckError, TypeMismatch};
use crate::scalar::{DATE_FORMAT, ScalarValue, TIMESTAMP_FORMAT, write_quoted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// No decimal point or exponent in the text.
    Integer,
    Fractional,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericConstant {
    text: String,
    value: Decimal,
    kind: NumericKind,
}

impl NumericConstant {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }

    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// If this is an integer literal that doesn't fit in an i64.
    pub fn overflows_int(&self) -> bool {
        self.kind == NumericKind::Integer && self.value.to_i64().is_none()
    }

    /// If the value is too large in magnitude for a float.
    pub fn overflows_float(&self) -> bool {
        self.value.to_f64().is_none()
    }
}

/// A literal whose type hasn't been decided yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConstantRepr", into = "ConstantRepr")]
pub enum Constant {
    Numeric(NumericConstant),
    String(String),
}

/// Serialized form of a constant, numbers are kept as their text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConstantRepr {
    Number(String),
    String(String),
}

impl TryFrom<ConstantRepr> for Constant {
    type Error = TypeCheckError;

    fn try_from(value: ConstantRepr) -> Result<Self> {
        match value {
            ConstantRepr::Number(text) => Constant::number(text),
            ConstantRepr::String(s) => Ok(Constant::String(s)),
        }
    }
}

impl From<Constant> for ConstantRepr {
    fn from(value: Constant) -> Self {
        match value {
            Constant::Numeric(n) => ConstantRepr::Number(n.text),
            Constant::String(s) => ConstantRepr::String(s),
        }
    }
}

impl Constant {
    /// Create a numeric constant from its literal text.
    pub fn number(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let value = Decimal::parse(&text)
            .ok_or_else(|| TypeCheckError::InvalidNumericLiteral(text.clone()))?;
        let kind = if text.contains(['.', 'e', 'E']) {
            NumericKind::Fractional
        } else {
            NumericKind::Integer
        };

        Ok(Constant::Numeric(NumericConstant { text, value, kind }))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Constant::String(s.into())
    }

    /// The type this constant has when nothing else constrains it.
    pub fn natural_type(&self) -> DataType {
        match self {
            Constant::Numeric(n) => match n.kind {
                NumericKind::Fractional if n.overflows_float() => DataType::Decimal,
                NumericKind::Fractional => DataType::Float,
                NumericKind::Integer if n.overflows_int() => DataType::Decimal,
                NumericKind::Integer => DataType::Int,
            },
            Constant::String(_) => DataType::String,
        }
    }

    /// Check if the constant can be stored as `datatype` without losing
    /// information.
    ///
    /// `1.0` can be an int, `1.1` can't.
    pub fn can_represent(&self, datatype: &DataType) -> bool {
        match self {
            Constant::Numeric(n) => match datatype {
                DataType::Int => n.value.to_i64().is_some(),
                DataType::Float => n.value.to_f64().is_some(),
                DataType::Decimal => true,
                _ => false,
            },
            Constant::String(s) => match datatype {
                DataType::String | DataType::Bytes => true,
                DataType::Date => parse_date(s).is_some(),
                DataType::Timestamp => parse_timestamp(s).is_some(),
                _ => false,
            },
        }
    }

    /// Convert the constant into a value of the given type.
    pub fn resolve(&self, datatype: &DataType) -> Result<ScalarValue> {
        let value = match (self, datatype) {
            (Constant::Numeric(n), DataType::Int) => n.value.to_i64().map(ScalarValue::Int),
            (Constant::Numeric(n), DataType::Float) => n.value.to_f64().map(ScalarValue::Float),
            (Constant::Numeric(n), DataType::Decimal) => Some(ScalarValue::Decimal(n.value.clone())),
            (Constant::String(s), DataType::String) => Some(ScalarValue::String(s.clone())),
            (Constant::String(s), DataType::Bytes) => Some(ScalarValue::Bytes(s.as_bytes().to_vec())),
            (Constant::String(s), DataType::Date) => parse_date(s).map(ScalarValue::Date),
            (Constant::String(s), DataType::Timestamp) => {
                parse_timestamp(s).map(ScalarValue::Timestamp)
            }
            _ => None,
        };

        value.ok_or_else(|| {
            TypeCheckError::TypeMismatch(TypeMismatch {
                expr: self.to_string(),
                expected: datatype.clone(),
                found: self.natural_type(),
            })
        })
    }
}

/// Compute the type a group of constants defaults to.
///
/// String if any constant is a string. Otherwise decimal if any value is out
/// of range for a float, float if any is fractional, decimal if any integer
/// overflows, else int.
pub fn group_default<'a>(constants: impl IntoIterator<Item = &'a Constant>) -> DataType {
    let mut fractional = false;
    let mut overflows_int = false;
    for constant in constants {
        match constant {
            Constant::String(_) => return DataType::String,
            Constant::Numeric(n) if n.overflows_float() => return DataType::Decimal,
            Constant::Numeric(n) => {
                fractional |= n.kind == NumericKind::Fractional;
                overflows_int |= n.overflows_int();
            }
        }
    }

    if fractional {
        DataType::Float
    } else if overflows_int {
        DataType::Decimal
    } else {
        DataType::Int
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Numeric(n) => write!(f, "{}", n.text),
            Constant::String(s) => write_quoted(f, s),
        }
    }
}
