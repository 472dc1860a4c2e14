use std::fmt;

use fmtutil::IntoDisplayableSlice;

use crate::ast::{BinaryOperator, QualifiedName, UnaryOperator};
use crate::datatype::DataType;

/// Two expressions that needed to share a type didn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// SQL text of the offending expression.
    pub expr: String,
    /// Type the group had already settled on.
    pub expected: DataType,
    /// Type of the offending expression.
    pub found: DataType,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} to be of type {}, found type {}",
            self.expr, self.expected, self.found
        )
    }
}

impl std::error::Error for TypeMismatch {}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeCheckError {
    #[error("unsupported binary operator: <{left}> {op} <{right}>")]
    UnsupportedBinaryOperator {
        op: BinaryOperator,
        left: DataType,
        right: DataType,
    },

    #[error("unsupported unary operator: {op}<{datatype}>")]
    UnsupportedUnaryOperator {
        op: UnaryOperator,
        datatype: DataType,
    },

    /// Also used for IN and BETWEEN, `op` is the SQL text of the operator.
    #[error("unsupported comparison operator: <{left}> {op} <{right}>")]
    UnsupportedComparisonOperator {
        op: String,
        left: DataType,
        right: DataType,
    },

    #[error("incompatible {op} argument type: {datatype}")]
    IncompatibleLogicalArgument {
        op: &'static str,
        datatype: DataType,
    },

    #[error("unknown signature for {name}: {name}({})", .args.displayable())]
    UnknownFunctionSignature { name: String, args: Vec<DataType> },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("invalid cast: {from} -> {}", .to.sql_name())]
    InvalidCast { from: DataType, to: DataType },

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    #[error("unequal number of entries in tuple expressions: {left} != {right}")]
    ArityMismatch { left: usize, right: usize },

    #[error("could not determine data type of parameter ${name}")]
    AmbiguousParameterType { name: String },

    #[error("incompatible condition type: {0}")]
    ConditionTypeMismatch(TypeMismatch),

    #[error("incompatible value type: {0}")]
    ValueTypeMismatch(TypeMismatch),

    #[error("incompatible IF condition type: {0}")]
    IfConditionType(DataType),

    /// Operands of IF, IFNULL, NULLIF or COALESCE didn't unify.
    #[error("incompatible {construct} expressions: {mismatch}")]
    IncompatibleExpressions {
        construct: &'static str,
        mismatch: TypeMismatch,
    },

    #[error("qualified name \"{0}\" not found")]
    NameNotFound(QualifiedName),

    #[error("qualified name \"{0}\" is ambiguous")]
    AmbiguousName(QualifiedName),

    #[error("expression exceeds the maximum depth of {max}")]
    ExpressionTooDeep { max: u64 },

    #[error("invalid numeric literal: {0}")]
    InvalidNumericLiteral(String),

    #[error("unknown type name: {0}")]
    UnknownTypeName(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for setting '{name}': {value}")]
    InvalidSettingValue { name: &'static str, value: String },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T, E = TypeCheckError> = std::result::Result<T, E>;
