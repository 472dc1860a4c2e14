use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

const FLOAT_DECIMAL_UNARY: &[Signature] = &[
    Signature::new(&[DataTypeId::Float], DataTypeId::Float),
    Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
];

pub const FUNCTION_SET_ABS: FunctionSet = FunctionSet {
    name: "abs",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Numeric,
        description: "Compute the absolute value of a number.",
        arguments: &["x"],
        example: Some(Example {
            example: "abs(-5.7)",
            output: "5.7",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
    ],
};

pub const FUNCTION_SET_SQRT: FunctionSet = FunctionSet {
    name: "sqrt",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Numeric,
        description: "Compute the square root of a number.",
        arguments: &["x"],
        example: Some(Example {
            example: "sqrt(9)",
            output: "3",
        }),
    }],
    signatures: FLOAT_DECIMAL_UNARY,
};

pub const FUNCTION_SET_FLOOR: FunctionSet = FunctionSet {
    name: "floor",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Numeric,
        description: "Round number down.",
        arguments: &["x"],
        example: Some(Example {
            example: "floor(4.6)",
            output: "4",
        }),
    }],
    signatures: FLOAT_DECIMAL_UNARY,
};

pub const FUNCTION_SET_CEIL: FunctionSet = FunctionSet {
    name: "ceil",
    aliases: &["ceiling"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Numeric,
        description: "Round number up.",
        arguments: &["x"],
        example: Some(Example {
            example: "ceil(4.1)",
            output: "5",
        }),
    }],
    signatures: FLOAT_DECIMAL_UNARY,
};

pub const FUNCTION_SET_ROUND: FunctionSet = FunctionSet {
    name: "round",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[
        &Documentation {
            category: Category::Numeric,
            description: "Round number to the nearest whole value.",
            arguments: &["x"],
            example: Some(Example {
                example: "round(3.7)",
                output: "4",
            }),
        },
        &Documentation {
            category: Category::Numeric,
            description: "Round number to some number of decimal places.",
            arguments: &["x", "scale"],
            example: Some(Example {
                example: "round(3.14159, 2)",
                output: "3.14",
            }),
        },
    ],
    signatures: &[
        Signature::new(&[DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Float, DataTypeId::Int], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Int], DataTypeId::Decimal),
    ],
};

pub const FUNCTION_SET_POW: FunctionSet = FunctionSet {
    name: "pow",
    aliases: &["power"],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Numeric,
        description: "Compute base raised to the power of exponent.",
        arguments: &["base", "exponent"],
        example: Some(Example {
            example: "pow(2, 3)",
            output: "8",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int, DataTypeId::Int], DataTypeId::Int),
        Signature::new(&[DataTypeId::Float, DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal, DataTypeId::Decimal], DataTypeId::Decimal),
    ],
};
