//! Untyped expression trees as handed to us by the parser.

use std::fmt;

use fmtutil::IntoDisplayableSlice;
use serde::{Deserialize, Serialize};

use crate::constant::Constant;
use crate::datatype::DataType;
use crate::errors::Result;
use crate::scalar::ScalarValue;

/// A possibly qualified column reference, e.g. `t.a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub parts: Vec<String>,
}

impl QualifiedName {
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        QualifiedName {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

/// A named parameter (`$a`, `$1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    pub name: String,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Plus,
    Minus,
    BitwiseNot,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::BitwiseNot => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Concat,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Multiply => write!(f, "*"),
            Self::Divide => write!(f, "/"),
            Self::Modulo => write!(f, "%"),
            Self::BitwiseAnd => write!(f, "&"),
            Self::BitwiseOr => write!(f, "|"),
            Self::BitwiseXor => write!(f, "#"),
            Self::ShiftLeft => write!(f, "<<"),
            Self::ShiftRight => write!(f, ">>"),
            Self::Concat => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::NotEq => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::LtEq => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtEq => write!(f, ">="),
            Self::Like => write!(f, "LIKE"),
            Self::NotLike => write!(f, "NOT LIKE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjunctionOperator {
    And,
    Or,
}

impl ConjunctionOperator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for ConjunctionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenThen {
    pub when: Expr,
    pub then: Expr,
}

/// A subquery that's already been planned.
///
/// We only care about the type of the row it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subquery {
    pub sql: String,
    pub datatype: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Constant(Constant),
    /// A value with a fixed type.
    Value(ScalarValue),
    Placeholder(Placeholder),
    Null,
    Column(QualifiedName),
    Unary {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conjunction {
        op: ConjunctionOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    Case {
        /// Set for the `CASE x WHEN ...` form.
        operand: Option<Box<Expr>>,
        conditions: Vec<WhenThen>,
        else_expr: Option<Box<Expr>>,
    },
    If {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    IfNull {
        expr: Box<Expr>,
        alternative: Box<Expr>,
    },
    NullIf {
        expr: Box<Expr>,
        other: Box<Expr>,
    },
    Coalesce(Vec<Expr>),
    Function {
        name: String,
        args: Vec<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        datatype: DataType,
    },
    Tuple(Vec<Expr>),
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<Expr>,
        subquery: Subquery,
        negated: bool,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    /// `IS [NOT] TRUE` and `IS [NOT] FALSE`.
    IsBool {
        expr: Box<Expr>,
        value: bool,
        negated: bool,
    },
    Subquery(Subquery),
}

impl Expr {
    pub fn number(text: impl Into<String>) -> Result<Self> {
        Ok(Expr::Constant(Constant::number(text)?))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Constant(Constant::string(s))
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Expr::Placeholder(Placeholder { name: name.into() })
    }

    pub fn value(value: ScalarValue) -> Self {
        Expr::Value(value)
    }

    pub fn column<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Expr::Column(QualifiedName::new(parts))
    }

    pub fn unary(op: UnaryOperator, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn comparison(op: ComparisonOperator, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Conjunction {
            op: ConjunctionOperator::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Conjunction {
            op: ConjunctionOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn cast(expr: Expr, datatype: DataType) -> Self {
        Expr::Cast {
            expr: Box::new(expr),
            datatype,
        }
    }

    /// If this expression needs parentheses when used as an operand.
    fn is_compound(&self) -> bool {
        matches!(
            self,
            Expr::Unary { .. }
                | Expr::Binary { .. }
                | Expr::Comparison { .. }
                | Expr::Conjunction { .. }
                | Expr::Not(_)
                | Expr::InList { .. }
                | Expr::InSubquery { .. }
                | Expr::Between { .. }
                | Expr::IsNull { .. }
                | Expr::IsBool { .. }
        )
    }
}

/// Display wrapper adding parentheses around compound operands.
struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_compound() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn not_str(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) => write!(f, "{c}"),
            Expr::Value(v) => write!(f, "{v}"),
            Expr::Placeholder(p) => write!(f, "{p}"),
            Expr::Null => write!(f, "NULL"),
            Expr::Column(name) => write!(f, "{name}"),
            Expr::Unary { op, expr } => write!(f, "{op}{}", Operand(expr)),
            Expr::Binary { op, left, right } => {
                write!(f, "{} {op} {}", Operand(left), Operand(right))
            }
            Expr::Comparison { op, left, right } => {
                write!(f, "{} {op} {}", Operand(left), Operand(right))
            }
            Expr::Conjunction { op, left, right } => {
                write!(f, "{} {op} {}", Operand(left), Operand(right))
            }
            Expr::Not(expr) => write!(f, "NOT {}", Operand(expr)),
            Expr::Case {
                operand,
                conditions,
                else_expr,
            } => {
                write!(f, "CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for cond in conditions {
                    write!(f, " WHEN {} THEN {}", cond.when, cond.then)?;
                }
                if let Some(else_expr) = else_expr {
                    write!(f, " ELSE {else_expr}")?;
                }
                write!(f, " END")
            }
            Expr::If {
                condition,
                then,
                otherwise,
            } => write!(f, "IF({condition}, {then}, {otherwise})"),
            Expr::IfNull { expr, alternative } => write!(f, "IFNULL({expr}, {alternative})"),
            Expr::NullIf { expr, other } => write!(f, "NULLIF({expr}, {other})"),
            Expr::Coalesce(exprs) => write!(f, "COALESCE({})", exprs.displayable()),
            Expr::Function { name, args } => write!(f, "{name}({})", args.displayable()),
            Expr::Cast { expr, datatype } => {
                write!(f, "{}::{}", Operand(expr), datatype.sql_name())
            }
            Expr::Tuple(exprs) => write!(f, "({})", exprs.displayable()),
            Expr::InList {
                expr,
                list,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                Operand(expr),
                not_str(*negated),
                list.displayable()
            ),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(
                f,
                "{} {}IN ({})",
                Operand(expr),
                not_str(*negated),
                subquery.sql
            ),
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => write!(
                f,
                "{} {}BETWEEN {} AND {}",
                Operand(expr),
                not_str(*negated),
                Operand(low),
                Operand(high)
            ),
            Expr::IsNull { expr, negated } => {
                write!(f, "{} IS {}NULL", Operand(expr), not_str(*negated))
            }
            Expr::IsBool {
                expr,
                value,
                negated,
            } => write!(
                f,
                "{} IS {}{}",
                Operand(expr),
                not_str(*negated),
                if *value { "TRUE" } else { "FALSE" }
            ),
            Expr::Subquery(subquery) => write!(f, "({})", subquery.sql),
        }
    }
}
