use crate::ast::UnaryOperator;
use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

/// Get the signatures for a unary operator.
pub fn unary_operator_set(op: UnaryOperator) -> &'static FunctionSet {
    match op {
        UnaryOperator::Plus => &FUNCTION_SET_POSITIVE,
        UnaryOperator::Minus => &FUNCTION_SET_NEGATE,
        UnaryOperator::BitwiseNot => &FUNCTION_SET_BIT_NOT,
    }
}

const SIGNED_SIGNATURES: &[Signature] = &[
    Signature::new(&[DataTypeId::Int], DataTypeId::Int),
    Signature::new(&[DataTypeId::Float], DataTypeId::Float),
    Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
    Signature::new(&[DataTypeId::Interval], DataTypeId::Interval),
];

pub const FUNCTION_SET_NEGATE: FunctionSet = FunctionSet {
    name: "negate",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Returns the negation of the input value.",
        arguments: &["x"],
        example: Some(Example {
            example: "negate(-3.5)",
            output: "3.5",
        }),
    }],
    signatures: SIGNED_SIGNATURES,
};

pub const FUNCTION_SET_POSITIVE: FunctionSet = FunctionSet {
    name: "positive",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: SIGNED_SIGNATURES,
};

pub const FUNCTION_SET_BIT_NOT: FunctionSet = FunctionSet {
    name: "~",
    aliases: &["bit_not"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Flips every bit of an integer.",
        arguments: &["x"],
        example: Some(Example {
            example: "~0",
            output: "-1",
        }),
    }],
    signatures: &[Signature::new(&[DataTypeId::Int], DataTypeId::Int)],
};
