use crate::datatype::DataTypeId;
use crate::functions::documentation::{Category, Documentation, Example};
use crate::functions::{FunctionKind, FunctionSet, Signature};

pub const FUNCTION_SET_LOWER: FunctionSet = FunctionSet {
    name: "lower",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::String,
        description: "Convert the string to lowercase.",
        arguments: &["string"],
        example: Some(Example {
            example: "lower('ABC')",
            output: "abc",
        }),
    }],
    signatures: &[Signature::new(&[DataTypeId::String], DataTypeId::String)],
};

pub const FUNCTION_SET_UPPER: FunctionSet = FunctionSet {
    name: "upper",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::String,
        description: "Convert the string to uppercase.",
        arguments: &["string"],
        example: Some(Example {
            example: "upper('ab')",
            output: "AB",
        }),
    }],
    signatures: &[Signature::new(&[DataTypeId::String], DataTypeId::String)],
};

pub const FUNCTION_SET_LENGTH: FunctionSet = FunctionSet {
    name: "length",
    aliases: &["char_length"],
    kind: FunctionKind::Scalar,
    doc: &[
        &Documentation {
            category: Category::String,
            description: "Get the number of characters in a string.",
            arguments: &["string"],
            example: Some(Example {
                example: "length('tschüß')",
                output: "6",
            }),
        },
        &Documentation {
            category: Category::String,
            description: "Get the number of bytes in a byte string.",
            arguments: &["bytes"],
            example: None,
        },
    ],
    signatures: &[
        Signature::new(&[DataTypeId::String], DataTypeId::Int),
        Signature::new(&[DataTypeId::Bytes], DataTypeId::Int),
    ],
};

pub const FUNCTION_SET_SUBSTR: FunctionSet = FunctionSet {
    name: "substr",
    aliases: &["substring"],
    kind: FunctionKind::Scalar,
    doc: &[
        &Documentation {
            category: Category::String,
            description: "Get a substring of a string starting at some position. The starting position is 1-indexed.",
            arguments: &["string", "start"],
            example: Some(Example {
                example: "substr('alphabet', 3)",
                output: "phabet",
            }),
        },
        &Documentation {
            category: Category::String,
            description: "Get a substring of a string starting at some position with some length. The starting position is 1-indexed.",
            arguments: &["string", "start", "length"],
            example: Some(Example {
                example: "substr('alphabet', 3, 2)",
                output: "ph",
            }),
        },
    ],
    signatures: &[
        Signature::new(&[DataTypeId::String, DataTypeId::Int], DataTypeId::String),
        Signature::new(
            &[DataTypeId::String, DataTypeId::Int, DataTypeId::Int],
            DataTypeId::String,
        ),
    ],
};

pub const FUNCTION_SET_STRPOS: FunctionSet = FunctionSet {
    name: "strpos",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::String,
        description: "Returns the position of a substring within a string. Returns 0 if the substring isn't found.",
        arguments: &["string", "substring"],
        example: Some(Example {
            example: "strpos('hello', 'll')",
            output: "3",
        }),
    }],
    signatures: &[Signature::new(
        &[DataTypeId::String, DataTypeId::String],
        DataTypeId::Int,
    )],
};

pub const FUNCTION_SET_REPLACE: FunctionSet = FunctionSet {
    name: "replace",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::String,
        description: "Replace all occurrences of `from` in a string with `to`.",
        arguments: &["string", "from", "to"],
        example: Some(Example {
            example: "replace('abcabc', 'b', 'x')",
            output: "axcaxc",
        }),
    }],
    signatures: &[Signature::new(
        &[DataTypeId::String, DataTypeId::String, DataTypeId::String],
        DataTypeId::String,
    )],
};

pub const FUNCTION_SET_BTRIM: FunctionSet = FunctionSet {
    name: "btrim",
    aliases: &["trim"],
    kind: FunctionKind::Scalar,
    doc: &[
        &Documentation {
            category: Category::String,
            description: "Trim whitespace from both sides of the string.",
            arguments: &["string"],
            example: Some(Example {
                example: "btrim('  hi  ')",
                output: "hi",
            }),
        },
        &Documentation {
            category: Category::String,
            description: "Trim matching characters from both sides of the string.",
            arguments: &["string", "characters"],
            example: Some(Example {
                example: "btrim('xxhixx', 'x')",
                output: "hi",
            }),
        },
    ],
    signatures: &[
        Signature::new(&[DataTypeId::String], DataTypeId::String),
        Signature::new(&[DataTypeId::String, DataTypeId::String], DataTypeId::String),
    ],
};

pub const FUNCTION_SET_CONCAT: FunctionSet = FunctionSet {
    name: "concat",
    aliases: &[],
    kind: FunctionKind::Scalar,
    doc: &[&Documentation {
        category: Category::String,
        description: "Concatenate many strings into a single string.",
        arguments: &["var_args"],
        example: Some(Example {
            example: "concat('cat', 'dog', 'mouse')",
            output: "catdogmouse",
        }),
    }],
    signatures: &[Signature::new_variadic(
        &[],
        DataTypeId::String,
        DataTypeId::String,
    )],
};
