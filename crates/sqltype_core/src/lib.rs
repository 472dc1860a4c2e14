//! Type checking for SQL expressions.
//!
//! Assigns a type to every node of a parsed expression tree, resolving
//! untyped literals and placeholders against their surrounding context.
//!
//! # Vocabulary
//!
//! - **Constant**: A literal whose type isn't fixed yet. `1` can become an
//!   int, a float or a decimal depending on where it's used.
//! - **Placeholder**: A named query parameter (`$a`). Its type is inferred
//!   from usage and recorded in the [`PlaceholderTypes`] for the check.
//! - **Desired type**: A hint passed down the tree, used when nothing else
//!   constrains a constant or placeholder.
pub mod ast;
pub mod bindings;
pub mod cast;
pub mod checker;
pub mod config;
pub mod constant;
pub mod datatype;
pub mod decimal;
pub mod errors;
pub mod expr;
pub mod functions;
pub mod resolver;
pub mod scalar;

mod unify;

use ast::Expr;
pub use bindings::PlaceholderTypes;
pub use checker::TypeChecker;
use datatype::DataType;
use errors::Result;
use expr::TypedExpr;
use functions::FunctionRegistry;
use resolver::NoColumns;

/// Type check an expression using the builtin functions and no columns.
pub fn type_check(
    expr: &Expr,
    bindings: &mut PlaceholderTypes,
    desired: Option<&DataType>,
) -> Result<TypedExpr> {
    TypeChecker::new(FunctionRegistry::builtin(), &NoColumns).type_check(expr, bindings, desired)
}
