//! Type checked expression trees.

use std::fmt;

use crate::ast::{
    BinaryOperator,
    ComparisonOperator,
    ConjunctionOperator,
    Expr,
    Placeholder,
    QualifiedName,
    Subquery,
    UnaryOperator,
    WhenThen,
};
use crate::datatype::DataType;
use crate::functions::PlannedFunction;
use crate::scalar::ScalarValue;

/// An expression where every node has a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub datatype: DataType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedWhenThen {
    pub when: TypedExpr,
    pub then: TypedExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    /// A resolved value, including resolved constants and NULL.
    Literal(ScalarValue),
    Placeholder(Placeholder),
    Column(QualifiedName),
    Unary {
        op: UnaryOperator,
        expr: Box<TypedExpr>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Comparison {
        op: ComparisonOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Conjunction {
        op: ConjunctionOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Not(Box<TypedExpr>),
    Case {
        operand: Option<Box<TypedExpr>>,
        conditions: Vec<TypedWhenThen>,
        else_expr: Option<Box<TypedExpr>>,
    },
    If {
        condition: Box<TypedExpr>,
        then: Box<TypedExpr>,
        otherwise: Box<TypedExpr>,
    },
    IfNull {
        expr: Box<TypedExpr>,
        alternative: Box<TypedExpr>,
    },
    NullIf {
        expr: Box<TypedExpr>,
        other: Box<TypedExpr>,
    },
    Coalesce(Vec<TypedExpr>),
    Function {
        function: PlannedFunction,
        args: Vec<TypedExpr>,
    },
    Cast(Box<TypedExpr>),
    Tuple(Vec<TypedExpr>),
    InList {
        expr: Box<TypedExpr>,
        list: Vec<TypedExpr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<TypedExpr>,
        subquery: Subquery,
        negated: bool,
    },
    Between {
        expr: Box<TypedExpr>,
        low: Box<TypedExpr>,
        high: Box<TypedExpr>,
        negated: bool,
    },
    IsNull {
        expr: Box<TypedExpr>,
        negated: bool,
    },
    IsBool {
        expr: Box<TypedExpr>,
        value: bool,
        negated: bool,
    },
    Subquery(Subquery),
}

impl TypedExpr {
    pub fn new(kind: TypedExprKind, datatype: DataType) -> Self {
        TypedExpr { kind, datatype }
    }

    pub fn literal(value: ScalarValue) -> Self {
        let datatype = value.datatype();
        TypedExpr {
            kind: TypedExprKind::Literal(value),
            datatype,
        }
    }

    pub fn null() -> Self {
        Self::literal(ScalarValue::Null)
    }

    /// Direct children of this node, in evaluation order.
    pub fn children(&self) -> Vec<&TypedExpr> {
        match &self.kind {
            TypedExprKind::Literal(_)
            | TypedExprKind::Placeholder(_)
            | TypedExprKind::Column(_)
            | TypedExprKind::Subquery(_) => Vec::new(),
            TypedExprKind::Unary { expr, .. }
            | TypedExprKind::Not(expr)
            | TypedExprKind::Cast(expr)
            | TypedExprKind::InSubquery { expr, .. }
            | TypedExprKind::IsNull { expr, .. }
            | TypedExprKind::IsBool { expr, .. } => vec![&**expr],
            TypedExprKind::Binary { left, right, .. }
            | TypedExprKind::Comparison { left, right, .. }
            | TypedExprKind::Conjunction { left, right, .. } => vec![&**left, &**right],
            TypedExprKind::Case {
                operand,
                conditions,
                else_expr,
            } => {
                let mut children: Vec<&TypedExpr> = Vec::new();
                children.extend(operand.as_deref());
                for cond in conditions {
                    children.push(&cond.when);
                    children.push(&cond.then);
                }
                children.extend(else_expr.as_deref());
                children
            }
            TypedExprKind::If {
                condition,
                then,
                otherwise,
            } => vec![&**condition, &**then, &**otherwise],
            TypedExprKind::IfNull { expr, alternative } => vec![&**expr, &**alternative],
            TypedExprKind::NullIf { expr, other } => vec![&**expr, &**other],
            TypedExprKind::Coalesce(exprs)
            | TypedExprKind::Function { args: exprs, .. }
            | TypedExprKind::Tuple(exprs) => exprs.iter().collect(),
            TypedExprKind::InList { expr, list, .. } => {
                let mut children = vec![&**expr];
                children.extend(list);
                children
            }
            TypedExprKind::Between {
                expr, low, high, ..
            } => vec![&**expr, &**low, &**high],
        }
    }

    /// Visit this node and all its descendants depth first, along with their
    /// depth relative to this node.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&TypedExpr, usize),
    {
        self.walk_inner(0, f)
    }

    fn walk_inner<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&TypedExpr, usize),
    {
        f(self, depth);
        for child in self.children() {
            child.walk_inner(depth + 1, f);
        }
    }

    /// Returns true if no node in the tree has an unknown type.
    pub fn is_fully_typed(&self) -> bool {
        let mut typed = true;
        self.walk(&mut |expr, _| {
            if expr.datatype.contains_unknown() {
                typed = false;
            }
        });
        typed
    }

    /// Convert back into an untyped tree.
    ///
    /// Constants come back as resolved values, so checking the output again
    /// produces the same tree.
    pub fn to_ast(&self) -> Expr {
        fn boxed(expr: &TypedExpr) -> Box<Expr> {
            Box::new(expr.to_ast())
        }

        fn all(exprs: &[TypedExpr]) -> Vec<Expr> {
            exprs.iter().map(|e| e.to_ast()).collect()
        }

        match &self.kind {
            TypedExprKind::Literal(ScalarValue::Null) => Expr::Null,
            TypedExprKind::Literal(v) => Expr::Value(v.clone()),
            TypedExprKind::Placeholder(p) => Expr::Placeholder(p.clone()),
            TypedExprKind::Column(name) => Expr::Column(name.clone()),
            TypedExprKind::Unary { op, expr } => Expr::Unary {
                op: *op,
                expr: boxed(expr),
            },
            TypedExprKind::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: boxed(left),
                right: boxed(right),
            },
            TypedExprKind::Comparison { op, left, right } => Expr::Comparison {
                op: *op,
                left: boxed(left),
                right: boxed(right),
            },
            TypedExprKind::Conjunction { op, left, right } => Expr::Conjunction {
                op: *op,
                left: boxed(left),
                right: boxed(right),
            },
            TypedExprKind::Not(expr) => Expr::Not(boxed(expr)),
            TypedExprKind::Case {
                operand,
                conditions,
                else_expr,
            } => Expr::Case {
                operand: operand.as_deref().map(boxed),
                conditions: conditions
                    .iter()
                    .map(|cond| WhenThen {
                        when: cond.when.to_ast(),
                        then: cond.then.to_ast(),
                    })
                    .collect(),
                else_expr: else_expr.as_deref().map(boxed),
            },
            TypedExprKind::If {
                condition,
                then,
                otherwise,
            } => Expr::If {
                condition: boxed(condition),
                then: boxed(then),
                otherwise: boxed(otherwise),
            },
            TypedExprKind::IfNull { expr, alternative } => Expr::IfNull {
                expr: boxed(expr),
                alternative: boxed(alternative),
            },
            TypedExprKind::NullIf { expr, other } => Expr::NullIf {
                expr: boxed(expr),
                other: boxed(other),
            },
            TypedExprKind::Coalesce(exprs) => Expr::Coalesce(all(exprs)),
            TypedExprKind::Function { function, args } => Expr::Function {
                name: function.name().to_string(),
                args: all(args),
            },
            TypedExprKind::Cast(expr) => Expr::Cast {
                expr: boxed(expr),
                datatype: self.datatype.clone(),
            },
            TypedExprKind::Tuple(exprs) => Expr::Tuple(all(exprs)),
            TypedExprKind::InList {
                expr,
                list,
                negated,
            } => Expr::InList {
                expr: boxed(expr),
                list: all(list),
                negated: *negated,
            },
            TypedExprKind::InSubquery {
                expr,
                subquery,
                negated,
            } => Expr::InSubquery {
                expr: boxed(expr),
                subquery: subquery.clone(),
                negated: *negated,
            },
            TypedExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => Expr::Between {
                expr: boxed(expr),
                low: boxed(low),
                high: boxed(high),
                negated: *negated,
            },
            TypedExprKind::IsNull { expr, negated } => Expr::IsNull {
                expr: boxed(expr),
                negated: *negated,
            },
            TypedExprKind::IsBool {
                expr,
                value,
                negated,
            } => Expr::IsBool {
                expr: boxed(expr),
                value: *value,
                negated: *negated,
            },
            TypedExprKind::Subquery(subquery) => Expr::Subquery(subquery.clone()),
        }
    }
}

impl fmt::Display for TypedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_types() {
        assert_eq!(DataType::Null, TypedExpr::null().datatype);
        assert_eq!(DataType::Int, TypedExpr::literal(ScalarValue::Int(4)).datatype);
    }

    #[test]
    fn walk_depths() {
        let expr = TypedExpr::new(
            TypedExprKind::Binary {
                op: BinaryOperator::Plus,
                left: Box::new(TypedExpr::literal(ScalarValue::Int(1))),
                right: Box::new(TypedExpr::new(
                    TypedExprKind::Placeholder(Placeholder {
                        name: "a".to_string(),
                    }),
                    DataType::Int,
                )),
            },
            DataType::Int,
        );

        let mut depths = Vec::new();
        expr.walk(&mut |_, depth| depths.push(depth));
        assert_eq!(vec![0, 1, 1], depths);
        assert!(expr.is_fully_typed());
        assert_eq!("1 + $a", expr.to_string());
    }

    #[test]
    fn unknown_is_not_fully_typed() {
        let expr = TypedExpr::new(
            TypedExprKind::Tuple(vec![TypedExpr::new(
                TypedExprKind::Placeholder(Placeholder {
                    name: "a".to_string(),
                }),
                DataType::Unknown,
            )]),
            DataType::Tuple(vec![DataType::Unknown]),
        );
        assert!(!expr.is_fully_typed());
    }

    #[test]
    fn null_literal_to_ast() {
        assert_eq!(Expr::Null, TypedExpr::null().to_ast());
    }
}
