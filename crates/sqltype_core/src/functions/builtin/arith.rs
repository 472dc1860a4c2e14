use crate::ast::BinaryOperator;
use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

/// Get the signatures for a binary operator.
pub fn binary_operator_set(op: BinaryOperator) -> &'static FunctionSet {
    match op {
        BinaryOperator::Plus => &FUNCTION_SET_ADD,
        BinaryOperator::Minus => &FUNCTION_SET_SUB,
        BinaryOperator::Multiply => &FUNCTION_SET_MUL,
        BinaryOperator::Divide => &FUNCTION_SET_DIV,
        BinaryOperator::Modulo => &FUNCTION_SET_REM,
        BinaryOperator::BitwiseAnd => &FUNCTION_SET_BIT_AND,
        BinaryOperator::BitwiseOr => &FUNCTION_SET_BIT_OR,
        BinaryOperator::BitwiseXor => &FUNCTION_SET_BIT_XOR,
        BinaryOperator::ShiftLeft => &FUNCTION_SET_SHL,
        BinaryOperator::ShiftRight => &FUNCTION_SET_SHR,
        BinaryOperator::Concat => &FUNCTION_SET_CONCAT_OP,
    }
}

pub const FUNCTION_SET_ADD: FunctionSet = FunctionSet {
    name: "+",
    aliases: &["add"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Adds two values.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "4 + 8",
            output: "12",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Date, DataTypeId::Int], DataTypeId::Date),
        Signature::new(&[DataTypeId::Int, DataTypeId::Date], DataTypeId::Date),
        Signature::new(&[DataTypeId::Date, DataTypeId::Interval], DataTypeId::Timestamp),
        Signature::new(&[DataTypeId::Interval, DataTypeId::Date], DataTypeId::Timestamp),
        Signature::new(
            &[DataTypeId::Timestamp, DataTypeId::Interval],
            DataTypeId::Timestamp,
        ),
        Signature::new(
            &[DataTypeId::Interval, DataTypeId::Timestamp],
            DataTypeId::Timestamp,
        ),
        Signature::new(
            &[DataTypeId::Interval, DataTypeId::Interval],
            DataTypeId::Interval,
        ),
    ],
};

pub const FUNCTION_SET_SUB: FunctionSet = FunctionSet {
    name: "-",
    aliases: &["sub"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Subtracts the right value from the left value.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "8 - 3",
            output: "5",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Date, DataTypeId::Int], DataTypeId::Date),
        Signature::new(&[DataTypeId::Date, DataTypeId::Date], DataTypeId::Int),
        Signature::new(&[DataTypeId::Date, DataTypeId::Interval], DataTypeId::Timestamp),
        Signature::new(
            &[DataTypeId::Timestamp, DataTypeId::Interval],
            DataTypeId::Timestamp,
        ),
        Signature::new(
            &[DataTypeId::Timestamp, DataTypeId::Timestamp],
            DataTypeId::Interval,
        ),
        Signature::new(
            &[DataTypeId::Interval, DataTypeId::Interval],
            DataTypeId::Interval,
        ),
    ],
};

pub const FUNCTION_SET_MUL: FunctionSet = FunctionSet {
    name: "*",
    aliases: &["mul"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Multiplies two values.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "5 * 3",
            output: "15",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Interval, DataTypeId::Int], DataTypeId::Interval),
        Signature::new(&[DataTypeId::Int, DataTypeId::Interval], DataTypeId::Interval),
        Signature::new(&[DataTypeId::Interval, DataTypeId::Float], DataTypeId::Interval),
        Signature::new(&[DataTypeId::Float, DataTypeId::Interval], DataTypeId::Interval),
    ],
};

pub const FUNCTION_SET_DIV: FunctionSet = FunctionSet {
    name: "/",
    aliases: &["div"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Divides the left value by the right value. Dividing two integers produces a decimal.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "15 / 3",
            output: "5",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Interval, DataTypeId::Int], DataTypeId::Interval),
        Signature::new(&[DataTypeId::Interval, DataTypeId::Float], DataTypeId::Interval),
    ],
};

pub const FUNCTION_SET_REM: FunctionSet = FunctionSet {
    name: "%",
    aliases: &["rem", "mod"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::NUMERIC_OPERATOR,
        description: "Returns the remainder after dividing the left value by the right value.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "10 % 3",
            output: "1",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
    ],
};

const INT_BITWISE_SIGS: &[Signature] = &[Signature::new(
    &[DataTypeId::Int, DataTypeId::Int],
    DataTypeId::Int,
)];

pub const FUNCTION_SET_BIT_AND: FunctionSet = FunctionSet {
    name: "&",
    aliases: &["bit_and"],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: INT_BITWISE_SIGS,
};

pub const FUNCTION_SET_BIT_OR: FunctionSet = FunctionSet {
    name: "|",
    aliases: &["bit_or"],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: INT_BITWISE_SIGS,
};

pub const FUNCTION_SET_BIT_XOR: FunctionSet = FunctionSet {
    name: "#",
    aliases: &["xor"],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: INT_BITWISE_SIGS,
};

pub const FUNCTION_SET_SHL: FunctionSet = FunctionSet {
    name: "<<",
    aliases: &["shl"],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: INT_BITWISE_SIGS,
};

pub const FUNCTION_SET_SHR: FunctionSet = FunctionSet {
    name: ">>",
    aliases: &["shr"],
    kind: FunctionKind::Scalar,
    doc: &[],
    signatures: INT_BITWISE_SIGS,
};

pub const FUNCTION_SET_CONCAT_OP: FunctionSet = FunctionSet {
    name: "||",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::STRING_OPERATOR,
        description: "Concatenate two strings or two byte strings.",
        arguments: &["a", "b"],
        example: Some(Example {
            example: "'ab' || 'cd'",
            output: "abcd",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::String, DataTypeId::String], DataTypeId::String),
        Signature::new(&[DataTypeId::Bytes, DataTypeId::Bytes], DataTypeId::Bytes),
    ],
};
