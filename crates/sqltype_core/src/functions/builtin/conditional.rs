use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

pub const FUNCTION_SET_GREATEST: FunctionSet = FunctionSet {
    name: "greatest",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Conditional,
        description: "Return the largest of the arguments. Every argument must have the same type.",
        arguments: &["var_args"],
        example: Some(Example {
            example: "greatest(1, 5, 3)",
            output: "5",
        }),
    }],
    signatures: &[
        Signature::new_variadic(&[DataTypeId::Any], DataTypeId::Any, DataTypeId::Any)
            .homogeneous(),
    ],
};

pub const FUNCTION_SET_LEAST: FunctionSet = FunctionSet {
    name: "least",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::Conditional,
        description: "Return the smallest of the arguments. Every argument must have the same type.",
        arguments: &["var_args"],
        example: Some(Example {
            example: "least(1, 5, 3)",
            output: "1",
        }),
    }],
    signatures: &[
        Signature::new_variadic(&[DataTypeId::Any], DataTypeId::Any, DataTypeId::Any)
            .homogeneous(),
    ],
};
