pub mod aggregate;
pub mod arith;
pub mod comparison;
pub mod conditional;
pub mod datetime;
pub mod numeric;
pub mod string;
pub mod unary;

use super::FunctionSet;

/// All builtin functions callable by name.
pub const BUILTIN_FUNCTION_SETS: &[&FunctionSet] = &[
    // String
    &string::FUNCTION_SET_LOWER,
    &string::FUNCTION_SET_UPPER,
    &string::FUNCTION_SET_LENGTH,
    &string::FUNCTION_SET_SUBSTR,
    &string::FUNCTION_SET_STRPOS,
    &string::FUNCTION_SET_REPLACE,
    &string::FUNCTION_SET_BTRIM,
    &string::FUNCTION_SET_CONCAT,
    // Numeric
    &numeric::FUNCTION_SET_ABS,
    &numeric::FUNCTION_SET_SQRT,
    &numeric::FUNCTION_SET_FLOOR,
    &numeric::FUNCTION_SET_CEIL,
    &numeric::FUNCTION_SET_ROUND,
    &numeric::FUNCTION_SET_POW,
    // Datetime
    &datetime::FUNCTION_SET_NOW,
    &datetime::FUNCTION_SET_CURRENT_DATE,
    &datetime::FUNCTION_SET_DATE_TRUNC,
    &datetime::FUNCTION_SET_DATE_PART,
    // Conditional
    &conditional::FUNCTION_SET_GREATEST,
    &conditional::FUNCTION_SET_LEAST,
    // Aggregates
    &aggregate::FUNCTION_SET_COUNT,
    &aggregate::FUNCTION_SET_SUM,
    &aggregate::FUNCTION_SET_AVG,
    &aggregate::FUNCTION_SET_MIN,
    &aggregate::FUNCTION_SET_MAX,
    &aggregate::FUNCTION_SET_BOOL_AND,
    &aggregate::FUNCTION_SET_BOOL_OR,
];

/// Operator signatures, not callable by name.
pub const BUILTIN_OPERATOR_SETS: &[&FunctionSet] = &[
    &arith::FUNCTION_SET_ADD,
    &arith::FUNCTION_SET_SUB,
    &arith::FUNCTION_SET_MUL,
    &arith::FUNCTION_SET_DIV,
    &arith::FUNCTION_SET_REM,
    &arith::FUNCTION_SET_BIT_AND,
    &arith::FUNCTION_SET_BIT_OR,
    &arith::FUNCTION_SET_BIT_XOR,
    &arith::FUNCTION_SET_SHL,
    &arith::FUNCTION_SET_SHR,
    &arith::FUNCTION_SET_CONCAT_OP,
    &comparison::FUNCTION_SET_EQ,
    &comparison::FUNCTION_SET_NEQ,
    &comparison::FUNCTION_SET_LT,
    &comparison::FUNCTION_SET_LT_EQ,
    &comparison::FUNCTION_SET_GT,
    &comparison::FUNCTION_SET_GT_EQ,
    &comparison::FUNCTION_SET_LIKE,
    &comparison::FUNCTION_SET_NOT_LIKE,
    &unary::FUNCTION_SET_NEGATE,
    &unary::FUNCTION_SET_POSITIVE,
    &unary::FUNCTION_SET_BIT_NOT,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_names_unique() {
        let mut names = HashSet::new();
        for set in BUILTIN_FUNCTION_SETS {
            for name in std::iter::once(&set.name).chain(set.aliases) {
                assert!(names.insert(*name), "duplicate function name: {name}");
            }
        }
    }

    #[test]
    fn docs_match_signature_arity() {
        for set in BUILTIN_FUNCTION_SETS.iter().chain(BUILTIN_OPERATOR_SETS) {
            for doc in set.doc {
                assert!(
                    set.signatures
                        .iter()
                        .any(|sig| sig.positional_args.len() == doc.arguments.len()
                            || sig.is_variadic()),
                    "doc arguments don't match any signature for {}",
                    set.name
                );
            }
        }
    }
}
