use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

pub const FUNCTION_SET_COUNT: FunctionSet = FunctionSet {
    name: "count",
    aliases: &[],
    kind: FunctionKind::Aggregate,
    doc: &[
        &Documentation {
            category: Category::Aggregate,
            description: "Return the count of non-NULL inputs.",
            arguments: &["input"],
            example: None,
        },
        &Documentation {
            category: Category::Aggregate,
            description: "Return the number of rows.",
            arguments: &[],
            example: None,
        },
    ],
    signatures: &[
        Signature::new(&[DataTypeId::Any], DataTypeId::Int),
        Signature::new(&[], DataTypeId::Int),
    ],
};

pub const FUNCTION_SET_SUM: FunctionSet = FunctionSet {
    name: "sum",
    aliases: &[],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Compute the sum of all non-NULL inputs. Summing integers produces a decimal.",
        arguments: &["input"],
        example: None,
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Interval], DataTypeId::Interval),
    ],
};

pub const FUNCTION_SET_AVG: FunctionSet = FunctionSet {
    name: "avg",
    aliases: &["mean"],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Return the average value of all non-NULL inputs.",
        arguments: &["input"],
        example: Some(Example {
            example: "avg(x)",
            output: "2.5",
        }),
    }],
    signatures: &[
        Signature::new(&[DataTypeId::Int], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Float], DataTypeId::Float),
        Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
        Signature::new(&[DataTypeId::Interval], DataTypeId::Interval),
    ],
};

pub const FUNCTION_SET_MIN: FunctionSet = FunctionSet {
    name: "min",
    aliases: &[],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Return the minimum non-NULL value.",
        arguments: &["input"],
        example: None,
    }],
    signatures: &[Signature::new(&[DataTypeId::Any], DataTypeId::Any)],
};

pub const FUNCTION_SET_MAX: FunctionSet = FunctionSet {
    name: "max",
    aliases: &[],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Return the maximum non-NULL value.",
        arguments: &["input"],
        example: None,
    }],
    signatures: &[Signature::new(&[DataTypeId::Any], DataTypeId::Any)],
};

pub const FUNCTION_SET_BOOL_AND: FunctionSet = FunctionSet {
    name: "bool_and",
    aliases: &["every"],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Return true if all non-NULL inputs are true.",
        arguments: &["input"],
        example: None,
    }],
    signatures: &[Signature::new(&[DataTypeId::Boolean], DataTypeId::Boolean)],
};

pub const FUNCTION_SET_BOOL_OR: FunctionSet = FunctionSet {
    name: "bool_or",
    aliases: &[],
    kind: FunctionKind::Aggregate,
    doc: &[&Documentation {
        category: Category::Aggregate,
        description: "Return true if any non-NULL input is true.",
        arguments: &["input"],
        example: None,
    }],
    signatures: &[Signature::new(&[DataTypeId::Boolean], DataTypeId::Boolean)],
};
