use crate::ast::ComparisonOperator;
use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

/// Get the signatures for a comparison operator.
pub fn comparison_operator_set(op: ComparisonOperator) -> &'static FunctionSet {
    match op {
        ComparisonOperator::Eq => &FUNCTION_SET_EQ,
        ComparisonOperator::NotEq => &FUNCTION_SET_NEQ,
        ComparisonOperator::Lt => &FUNCTION_SET_LT,
        ComparisonOperator::LtEq => &FUNCTION_SET_LT_EQ,
        ComparisonOperator::Gt => &FUNCTION_SET_GT,
        ComparisonOperator::GtEq => &FUNCTION_SET_GT_EQ,
        ComparisonOperator::Like => &FUNCTION_SET_LIKE,
        ComparisonOperator::NotLike => &FUNCTION_SET_NOT_LIKE,
    }
}

/// Same-typed comparisons for every comparable type, followed by the mixed
/// numeric and date/timestamp pairs.
const COMPARISON_SIGNATURES: &[Signature] = &[
    Signature::new(&[DataTypeId::Boolean, DataTypeId::Boolean], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::String, DataTypeId::String], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Bytes, DataTypeId::Bytes], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Date, DataTypeId::Date], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Timestamp, DataTypeId::Timestamp], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Interval, DataTypeId::Interval], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Tuple, DataTypeId::Tuple], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Int, DataTypeId::Float], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Float, DataTypeId::Int], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Int, DataTypeId::Decimal], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Decimal, DataTypeId::Int], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Float, DataTypeId::Decimal], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Decimal, DataTypeId::Float], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Date, DataTypeId::Timestamp], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Timestamp, DataTypeId::Date], DataTypeId::Boolean),
];

pub const FUNCTION_SET_EQ: FunctionSet = FunctionSet {
    name: "=",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if two values are equal. Returns NULL if either argument is NULL.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "a = b",
            output: "true",
        }),
    }],
    signatures: COMPARISON_SIGNATURES,
};

pub const FUNCTION_SET_NEQ: FunctionSet = FunctionSet {
    name: "<>",
    aliases: &["!="],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if two values are not equal. Returns NULL if either argument is NULL.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "a <> b",
            output: "false",
        }),
    }],
    signatures: COMPARISON_SIGNATURES,
};

pub const FUNCTION_SET_LT: FunctionSet = FunctionSet {
    name: "<",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if the left value is less than the right.",
        arguments: &["a", "b"],
        example: None,
    }],
    signatures: COMPARISON_SIGNATURES,
};

pub const FUNCTION_SET_LT_EQ: FunctionSet = FunctionSet {
    name: "<=",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if the left value is less than or equal to the right.",
        arguments: &["a", "b"],
        example: None,
    }],
    signatures: COMPARISON_SIGNATURES,
};

pub const FUNCTION_SET_GT: FunctionSet = FunctionSet {
    name: ">",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if the left value is greater than the right.",
        arguments: &["a", "b"],
        example: None,
    }],
    signatures: COMPARISON_SIGNATURES,
};

pub const FUNCTION_SET_GT_EQ: FunctionSet = FunctionSet {
    name: ">=",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if the left value is greater than or equal to the right.",
        arguments: &["a", "b"],
        example: None,
    }],
    signatures: COMPARISON_SIGNATURES,
};

const LIKE_SIGNATURES: &[Signature] = &[
    Signature::new(&[DataTypeId::String, DataTypeId::String], DataTypeId::Boolean),
    Signature::new(&[DataTypeId::Bytes, DataTypeId::Bytes], DataTypeId::Boolean),
];

pub const FUNCTION_SET_LIKE: FunctionSet = FunctionSet {
    name: "like",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::COMPARISON_OPERATOR,
        description: "Check if a string matches a pattern.",
        arguments: &["string", "pattern"],
        example: Some(Example {
            example: "'hello' LIKE 'h%'",
            output: "true",
        }),
    }],
    signatures: LIKE_SIGNATURES,
};

pub const FUNCTION_SET_NOT_LIKE: FunctionSet = FunctionSet {
    name: "not_like",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: LIKE_SIGNATURES,
};
