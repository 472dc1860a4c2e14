use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::datatype::DataType;
use crate::decimal::Decimal;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A calendar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub nanos: i64,
}

impl Interval {
    pub const fn new(months: i32, days: i32, nanos: i64) -> Self {
        Interval {
            months,
            days,
            nanos,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mons {} days {} ns", self.months, self.days, self.nanos)
    }
}

/// A concrete, already typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Interval(Interval),
    Tuple(Vec<ScalarValue>),
}

impl ScalarValue {
    pub fn datatype(&self) -> DataType {
        match self {
            ScalarValue::Null => DataType::Null,
            ScalarValue::Boolean(_) => DataType::Boolean,
            ScalarValue::Int(_) => DataType::Int,
            ScalarValue::Float(_) => DataType::Float,
            ScalarValue::Decimal(_) => DataType::Decimal,
            ScalarValue::String(_) => DataType::String,
            ScalarValue::Bytes(_) => DataType::Bytes,
            ScalarValue::Date(_) => DataType::Date,
            ScalarValue::Timestamp(_) => DataType::Timestamp,
            ScalarValue::Interval(_) => DataType::Interval,
            ScalarValue::Tuple(vals) => DataType::Tuple(vals.iter().map(|v| v.datatype()).collect()),
        }
    }

    pub fn try_as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(b) => Some(*b),
            ScalarValue::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "on" => Some(true),
                "false" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn try_as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(v) => Some(*v),
            ScalarValue::Decimal(d) => d.to_i64(),
            ScalarValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
            ScalarValue::Int(v) => write!(f, "{v}"),
            // Debug formatting keeps the trailing `.0` on whole floats.
            ScalarValue::Float(v) => write!(f, "{v:?}"),
            ScalarValue::Decimal(d) => write!(f, "{d}"),
            ScalarValue::String(s) => write_quoted(f, s),
            ScalarValue::Bytes(b) => {
                write!(f, "b'")?;
                for byte in b {
                    write!(f, "\\x{byte:02x}")?;
                }
                write!(f, "'")
            }
            ScalarValue::Date(d) => write!(f, "DATE '{}'", d.format(DATE_FORMAT)),
            ScalarValue::Timestamp(ts) => {
                write!(f, "TIMESTAMP '{}'", ts.format(TIMESTAMP_FORMAT))
            }
            ScalarValue::Interval(i) => write!(f, "INTERVAL '{i}'"),
            ScalarValue::Tuple(vals) => {
                write!(f, "(")?;
                for (idx, val) in vals.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{val}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Write a single quoted SQL string, doubling embedded quotes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'{}'", s.replace('\'', "''"))
}
