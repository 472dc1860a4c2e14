use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

pub const FUNCTION_SET_NOW: FunctionSet = FunctionSet {
    name: "now",
    aliases: &["current_timestamp"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::DateTime,
        description: "Get the timestamp at the start of the current transaction.",
        arguments: &[],
        example: None,
    }],
    signatures: &[Signature::new(&[], DataTypeId::Timestamp)],
};

pub const FUNCTION_SET_CURRENT_DATE: FunctionSet = FunctionSet {
    name: "current_date",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::DateTime,
        description: "Get the current date.",
        arguments: &[],
        example: None,
    }],
    signatures: &[Signature::new(&[], DataTypeId::Date)],
};

pub const FUNCTION_SET_DATE_TRUNC: FunctionSet = FunctionSet {
    name: "date_trunc",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::DateTime,
        description: "Truncate a timestamp to the specified precision.",
        arguments: &["precision", "timestamp"],
        example: Some(Example {
            example: "date_trunc('month', TIMESTAMP '2024-03-15 10:30:00')",
            output: "2024-03-01 00:00:00",
        }),
    }],
    signatures: &[
        Signature::new(
            &[DataTypeId::String, DataTypeId::Timestamp],
            DataTypeId::Timestamp,
        ),
        Signature::new(&[DataTypeId::String, DataTypeId::Date], DataTypeId::Timestamp),
    ],
};

pub const FUNCTION_SET_DATE_PART: FunctionSet = FunctionSet {
    name: "date_part",
    aliases: &["extract"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::DateTime,
        description: "Get a subfield of a date, timestamp or interval.",
        arguments: &["part", "value"],
        example: Some(Example {
            example: "date_part('day', DATE '2024-03-15')",
            output: "15",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::String, DataTypeId::Timestamp], DataTypeId::Float),
        Signature::new(&[DataTypeId::String, DataTypeId::Date], DataTypeId::Float),
        Signature::new(&[DataTypeId::String, DataTypeId::Interval], DataTypeId::Float),
    ],
};
