//! Assigning types to expression trees.

use tracing::trace;

use crate::ast::{
    BinaryOperator,
    ComparisonOperator,
    Expr,
    QualifiedName,
    Subquery,
    UnaryOperator,
    WhenThen,
};
use crate::bindings::PlaceholderTypes;
use crate::cast::can_cast;
use crate::config::TypeCheckConfig;
use crate::datatype::DataType;
use crate::errors::{Result, TypeCheckError, TypeMismatch};
use crate::expr::{TypedExpr, TypedExprKind, TypedWhenThen};
use crate::functions::builtin::arith::binary_operator_set;
use crate::functions::builtin::comparison::comparison_operator_set;
use crate::functions::builtin::unary::unary_operator_set;
use crate::functions::candidate::{ResolvedCall, resolve_call, signature_return_type};
use crate::functions::{FunctionRegistry, FunctionSet, PlannedFunction};
use crate::resolver::NameResolver;
use crate::unify::{Item, UnifyError, Unified, unify};

/// Type checks expressions against a function registry and a set of columns.
///
/// The checker itself is immutable. All state produced while checking lives
/// in the placeholder bindings passed to each call.
#[derive(Clone)]
pub struct TypeChecker<'a> {
    registry: &'a FunctionRegistry,
    resolver: &'a dyn NameResolver,
    config: TypeCheckConfig,
}

impl std::fmt::Debug for TypeChecker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeChecker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> TypeChecker<'a> {
    pub fn new(registry: &'a FunctionRegistry, resolver: &'a dyn NameResolver) -> Self {
        TypeChecker {
            registry,
            resolver,
            config: TypeCheckConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TypeCheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TypeCheckConfig {
        &self.config
    }

    /// Type check an expression.
    ///
    /// `desired` is a hint for the type of the result. It's used to pick
    /// types for constants and placeholders that aren't otherwise
    /// constrained, it never overrides a type that's already known.
    ///
    /// Placeholders bound while checking are added to `bindings`. On error,
    /// `bindings` is left as it was.
    pub fn type_check(
        &self,
        expr: &Expr,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
    ) -> Result<TypedExpr> {
        trace!(%expr, ?desired, "type checking expression");
        let mut scratch = bindings.clone();
        let typed = self.check(expr, &mut scratch, desired, 1)?;
        *bindings = scratch;
        Ok(typed)
    }

    /// Type check a group of expressions that must all have the same type.
    ///
    /// Returns the common type and the typed expressions in input order.
    /// Like `type_check`, `bindings` is only updated on success.
    pub fn unify_same_typed(
        &self,
        exprs: &[Expr],
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
    ) -> Result<(DataType, Vec<TypedExpr>)> {
        let mut scratch = bindings.clone();
        let items = self.classify_all(exprs.iter(), &mut scratch, 1)?;
        let unified = unify(items, desired, &mut scratch).map_err(UnifyError::into_error)?;
        *bindings = scratch;
        Ok((unified.datatype, unified.exprs))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        let max = self.config.max_expression_depth;
        if max > 0 && depth as u64 > max {
            return Err(TypeCheckError::ExpressionTooDeep { max });
        }
        Ok(())
    }

    fn check(
        &self,
        expr: &Expr,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<TypedExpr> {
        self.check_depth(depth)?;

        match expr {
            Expr::Constant(_) | Expr::Placeholder(_) | Expr::Null => {
                let item = self.classify(expr, bindings, depth)?;
                let unified =
                    unify(vec![item], desired, bindings).map_err(UnifyError::into_error)?;
                let mut exprs = unified.exprs.into_iter();
                next_expr(&mut exprs)
            }
            Expr::Value(value) => Ok(TypedExpr::literal(value.clone())),
            Expr::Column(name) => self.check_column(name),
            Expr::Tuple(elems) => self.check_tuple(elems, bindings, desired, depth),
            Expr::Unary { op, expr } => self.check_unary(*op, expr, bindings, desired, depth),
            Expr::Binary { op, left, right } => {
                self.check_binary(*op, left, right, bindings, desired, depth)
            }
            Expr::Comparison { op, left, right } => {
                self.check_comparison(*op, left, right, bindings, depth)
            }
            Expr::Conjunction { op, left, right } => {
                let left = self.check_logical_arg(op.as_str(), left, bindings, depth)?;
                let right = self.check_logical_arg(op.as_str(), right, bindings, depth)?;
                Ok(TypedExpr::new(
                    TypedExprKind::Conjunction {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    DataType::Boolean,
                ))
            }
            Expr::Not(expr) => {
                let expr = self.check_logical_arg("NOT", expr, bindings, depth)?;
                Ok(TypedExpr::new(
                    TypedExprKind::Not(Box::new(expr)),
                    DataType::Boolean,
                ))
            }
            Expr::IsBool {
                expr,
                value,
                negated,
            } => {
                let op = match (*value, *negated) {
                    (true, false) => "IS TRUE",
                    (true, true) => "IS NOT TRUE",
                    (false, false) => "IS FALSE",
                    (false, true) => "IS NOT FALSE",
                };
                let expr = self.check_logical_arg(op, expr, bindings, depth)?;
                Ok(TypedExpr::new(
                    TypedExprKind::IsBool {
                        expr: Box::new(expr),
                        value: *value,
                        negated: *negated,
                    },
                    DataType::Boolean,
                ))
            }
            Expr::IsNull { expr, negated } => {
                let expr = self.check(expr, bindings, None, depth + 1)?;
                Ok(TypedExpr::new(
                    TypedExprKind::IsNull {
                        expr: Box::new(expr),
                        negated: *negated,
                    },
                    DataType::Boolean,
                ))
            }
            Expr::Case {
                operand,
                conditions,
                else_expr,
            } => self.check_case(
                operand.as_deref(),
                conditions,
                else_expr.as_deref(),
                bindings,
                desired,
                depth,
            ),
            Expr::If {
                condition,
                then,
                otherwise,
            } => {
                let condition =
                    self.check(condition, bindings, Some(&DataType::Boolean), depth + 1)?;
                if !condition.datatype.is_bool_or_null() {
                    return Err(TypeCheckError::IfConditionType(condition.datatype));
                }
                let unified = self.unify_construct(
                    "IF",
                    [&**then, &**otherwise],
                    bindings,
                    desired,
                    depth,
                )?;
                let datatype = unified.datatype;
                let mut exprs = unified.exprs.into_iter();
                let then = next_expr(&mut exprs)?;
                let otherwise = next_expr(&mut exprs)?;
                Ok(TypedExpr::new(
                    TypedExprKind::If {
                        condition: Box::new(condition),
                        then: Box::new(then),
                        otherwise: Box::new(otherwise),
                    },
                    datatype,
                ))
            }
            Expr::IfNull { expr, alternative } => {
                let unified = self.unify_construct(
                    "IFNULL",
                    [&**expr, &**alternative],
                    bindings,
                    desired,
                    depth,
                )?;
                let datatype = unified.datatype;
                let mut exprs = unified.exprs.into_iter();
                let expr = next_expr(&mut exprs)?;
                let alternative = next_expr(&mut exprs)?;
                Ok(TypedExpr::new(
                    TypedExprKind::IfNull {
                        expr: Box::new(expr),
                        alternative: Box::new(alternative),
                    },
                    datatype,
                ))
            }
            Expr::NullIf { expr, other } => {
                let unified = self.unify_construct(
                    "NULLIF",
                    [&**expr, &**other],
                    bindings,
                    desired,
                    depth,
                )?;
                let datatype = unified.datatype;
                let mut exprs = unified.exprs.into_iter();
                let expr = next_expr(&mut exprs)?;
                let other = next_expr(&mut exprs)?;
                Ok(TypedExpr::new(
                    TypedExprKind::NullIf {
                        expr: Box::new(expr),
                        other: Box::new(other),
                    },
                    datatype,
                ))
            }
            Expr::Coalesce(exprs) => {
                let unified = self.unify_construct("COALESCE", exprs, bindings, desired, depth)?;
                Ok(TypedExpr::new(
                    TypedExprKind::Coalesce(unified.exprs),
                    unified.datatype,
                ))
            }
            Expr::Function { name, args } => self.check_function(name, args, bindings, depth),
            Expr::Cast { expr, datatype } => self.check_cast(expr, datatype, bindings, depth),
            Expr::InList {
                expr,
                list,
                negated,
            } => self.check_in_list(expr, list, *negated, bindings, depth),
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => self.check_in_subquery(expr, subquery, *negated, bindings, depth),
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => self.check_between(expr, low, high, *negated, bindings, depth),
            Expr::Subquery(subquery) => Ok(TypedExpr::new(
                TypedExprKind::Subquery(subquery.clone()),
                subquery.datatype.clone(),
            )),
        }
    }

    /// Turn an expression into a member of a unification group.
    ///
    /// Only NULLs, constants, placeholders and tuples of those are left for
    /// the group to decide, everything else is type checked here.
    fn classify(&self, expr: &Expr, bindings: &mut PlaceholderTypes, depth: usize) -> Result<Item> {
        self.check_depth(depth)?;

        Ok(match expr {
            Expr::Null => Item::Null,
            Expr::Constant(c) => Item::Constant(c.clone()),
            Expr::Placeholder(p) => Item::Placeholder(p.clone()),
            Expr::Tuple(elems) => Item::Tuple(self.classify_all(elems, bindings, depth + 1)?),
            other => Item::Typed(self.check(other, bindings, None, depth)?),
        })
    }

    fn classify_all<'e>(
        &self,
        exprs: impl IntoIterator<Item = &'e Expr>,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<Vec<Item>> {
        exprs
            .into_iter()
            .map(|expr| self.classify(expr, bindings, depth))
            .collect()
    }

    /// Unify the operands of a conditional construct, wrapping a mismatch
    /// with the name of the construct.
    fn unify_construct<'e>(
        &self,
        construct: &'static str,
        exprs: impl IntoIterator<Item = &'e Expr>,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<Unified> {
        let items = self.classify_all(exprs, bindings, depth + 1)?;
        let unified = unify(items, desired, bindings).map_err(|err| {
            err.wrap(|mismatch| TypeCheckError::IncompatibleExpressions {
                construct,
                mismatch,
            })
        })?;
        trace!(construct, datatype = %unified.datatype, "unified construct");
        Ok(unified)
    }

    fn check_column(&self, name: &QualifiedName) -> Result<TypedExpr> {
        let datatype = self.resolver.resolve_column(name)?;
        Ok(TypedExpr::new(TypedExprKind::Column(name.clone()), datatype))
    }

    fn check_tuple(
        &self,
        elems: &[Expr],
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<TypedExpr> {
        let desired_elems = match desired {
            Some(DataType::Tuple(types)) if types.len() == elems.len() => Some(types),
            _ => None,
        };

        let mut typed = Vec::with_capacity(elems.len());
        for (idx, elem) in elems.iter().enumerate() {
            let desired = desired_elems.map(|types| &types[idx]);
            typed.push(self.check(elem, bindings, desired, depth + 1)?);
        }

        let datatype = DataType::Tuple(typed.iter().map(|e| e.datatype.clone()).collect());
        Ok(TypedExpr::new(TypedExprKind::Tuple(typed), datatype))
    }

    fn check_logical_arg(
        &self,
        op: &'static str,
        expr: &Expr,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let typed = self.check(expr, bindings, Some(&DataType::Boolean), depth + 1)?;
        if !typed.datatype.is_bool_or_null() {
            return Err(TypeCheckError::IncompatibleLogicalArgument {
                op,
                datatype: typed.datatype,
            });
        }
        Ok(typed)
    }

    /// Resolve operator arguments against an operator's signatures.
    ///
    /// Arguments sharing a type are tried first, falling back to signatures
    /// with mixed argument types.
    fn resolve_operator(
        &self,
        set: &'static FunctionSet,
        items: Vec<Item>,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
    ) -> Result<Option<ResolvedCall>> {
        let mut scratch = bindings.clone();
        match unify(items.clone(), desired, &mut scratch) {
            Ok(unified) => {
                let types = vec![unified.datatype.clone(); items.len()];
                if let Some(signature) = set.find_exact(&types) {
                    trace!(name = set.name, %signature, "operator arguments share a type");
                    *bindings = scratch;
                    let return_type = signature_return_type(signature, Some(unified.datatype))?;
                    return Ok(Some(ResolvedCall {
                        signature,
                        args: unified.exprs,
                        return_type,
                    }));
                }
            }
            Err(UnifyError::Mismatch(_)) => (),
            Err(UnifyError::Failed(err)) => return Err(err),
        }

        // Tuples are only comparable with tuples of the same shape, which
        // the homogeneous attempt already covered.
        let signatures = set.signatures.iter().filter(|sig| !sig.has_tuple_arg());
        resolve_call(
            signatures,
            items,
            bindings,
            self.config.prefer_exact_signatures,
        )
    }

    /// Type operands on their own, used when an operand is NULL.
    fn materialize_all(
        &self,
        items: Vec<Item>,
        bindings: &mut PlaceholderTypes,
    ) -> Result<Vec<TypedExpr>> {
        let mut exprs = Vec::with_capacity(items.len());
        for item in items {
            let unified = unify(vec![item], None, bindings).map_err(UnifyError::into_error)?;
            let mut typed = unified.exprs.into_iter();
            exprs.push(next_expr(&mut typed)?);
        }
        Ok(exprs)
    }

    fn check_unary(
        &self,
        op: UnaryOperator,
        expr: &Expr,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<TypedExpr> {
        let item = self.classify(expr, bindings, depth + 1)?;

        if item.is_null_like() {
            let mut exprs = self.materialize_all(vec![item], bindings)?.into_iter();
            let expr = next_expr(&mut exprs)?;
            return Ok(TypedExpr::new(
                TypedExprKind::Unary {
                    op,
                    expr: Box::new(expr),
                },
                DataType::Null,
            ));
        }

        let set = unary_operator_set(op);
        let desired = desired.filter(|d| set.find_exact(&[(*d).clone()]).is_some());
        let datatype = item.best_effort_type(bindings);

        match self.resolve_operator(set, vec![item], bindings, desired)? {
            Some(resolved) => {
                let mut args = resolved.args.into_iter();
                let expr = next_expr(&mut args)?;
                Ok(TypedExpr::new(
                    TypedExprKind::Unary {
                        op,
                        expr: Box::new(expr),
                    },
                    resolved.return_type,
                ))
            }
            None => Err(TypeCheckError::UnsupportedUnaryOperator { op, datatype }),
        }
    }

    fn check_binary(
        &self,
        op: BinaryOperator,
        left: &Expr,
        right: &Expr,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<TypedExpr> {
        let left = self.classify(left, bindings, depth + 1)?;
        let right = self.classify(right, bindings, depth + 1)?;

        if left.is_null_like() || right.is_null_like() {
            let mut exprs = self.materialize_all(vec![left, right], bindings)?.into_iter();
            return Ok(TypedExpr::new(
                TypedExprKind::Binary {
                    op,
                    left: Box::new(next_expr(&mut exprs)?),
                    right: Box::new(next_expr(&mut exprs)?),
                },
                DataType::Null,
            ));
        }

        let set = binary_operator_set(op);
        let desired = desired.filter(|d| set.find_exact(&[(*d).clone(), (*d).clone()]).is_some());
        let left_type = left.best_effort_type(bindings);
        let right_type = right.best_effort_type(bindings);

        match self.resolve_operator(set, vec![left, right], bindings, desired)? {
            Some(resolved) => {
                let mut args = resolved.args.into_iter();
                Ok(TypedExpr::new(
                    TypedExprKind::Binary {
                        op,
                        left: Box::new(next_expr(&mut args)?),
                        right: Box::new(next_expr(&mut args)?),
                    },
                    resolved.return_type,
                ))
            }
            None => Err(TypeCheckError::UnsupportedBinaryOperator {
                op,
                left: left_type,
                right: right_type,
            }),
        }
    }

    fn check_comparison(
        &self,
        op: ComparisonOperator,
        left: &Expr,
        right: &Expr,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let left = self.classify(left, bindings, depth + 1)?;
        let right = self.classify(right, bindings, depth + 1)?;

        let (left, right) = if left.is_null_like() || right.is_null_like() {
            let mut exprs = self.materialize_all(vec![left, right], bindings)?.into_iter();
            (next_expr(&mut exprs)?, next_expr(&mut exprs)?)
        } else {
            let set = comparison_operator_set(op);
            let left_type = left.best_effort_type(bindings);
            let right_type = right.best_effort_type(bindings);

            let resolved = self
                .resolve_operator(set, vec![left, right], bindings, None)?
                .ok_or_else(|| TypeCheckError::UnsupportedComparisonOperator {
                    op: op.to_string(),
                    left: left_type,
                    right: right_type,
                })?;
            let mut args = resolved.args.into_iter();
            (next_expr(&mut args)?, next_expr(&mut args)?)
        };

        Ok(TypedExpr::new(
            TypedExprKind::Comparison {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            DataType::Boolean,
        ))
    }

    fn check_case(
        &self,
        operand: Option<&Expr>,
        conditions: &[WhenThen],
        else_expr: Option<&Expr>,
        bindings: &mut PlaceholderTypes,
        desired: Option<&DataType>,
        depth: usize,
    ) -> Result<TypedExpr> {
        let (operand, whens) = match operand {
            Some(operand) => {
                // Simple form, the operand is compared against every WHEN.
                let items = self.classify_all(
                    std::iter::once(operand).chain(conditions.iter().map(|c| &c.when)),
                    bindings,
                    depth + 1,
                )?;
                let unified = unify(items, None, bindings)
                    .map_err(|err| err.wrap(TypeCheckError::ConditionTypeMismatch))?;
                let mut exprs = unified.exprs.into_iter();
                let operand = next_expr(&mut exprs)?;
                (Some(Box::new(operand)), exprs.collect::<Vec<_>>())
            }
            None => {
                let mut whens = Vec::with_capacity(conditions.len());
                for cond in conditions {
                    let when =
                        self.check(&cond.when, bindings, Some(&DataType::Boolean), depth + 1)?;
                    if !when.datatype.is_bool_or_null() {
                        return Err(TypeCheckError::ConditionTypeMismatch(TypeMismatch {
                            expr: cond.when.to_string(),
                            expected: DataType::Boolean,
                            found: when.datatype,
                        }));
                    }
                    whens.push(when);
                }
                (None, whens)
            }
        };

        let items = self.classify_all(
            conditions.iter().map(|c| &c.then).chain(else_expr),
            bindings,
            depth + 1,
        )?;
        let unified = unify(items, desired, bindings)
            .map_err(|err| err.wrap(TypeCheckError::ValueTypeMismatch))?;
        let datatype = unified.datatype;
        let mut values = unified.exprs.into_iter();

        let mut typed_conditions = Vec::with_capacity(conditions.len());
        for when in whens {
            typed_conditions.push(TypedWhenThen {
                when,
                then: next_expr(&mut values)?,
            });
        }
        let else_expr = match else_expr {
            Some(_) => Some(Box::new(next_expr(&mut values)?)),
            None => None,
        };

        Ok(TypedExpr::new(
            TypedExprKind::Case {
                operand,
                conditions: typed_conditions,
                else_expr,
            },
            datatype,
        ))
    }

    fn check_function(
        &self,
        name: &str,
        args: &[Expr],
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let name = name.to_lowercase();
        let set = self
            .registry
            .get(&name)
            .ok_or_else(|| TypeCheckError::UnknownFunction(name.clone()))?;

        let items = self.classify_all(args, bindings, depth + 1)?;
        let arg_types: Vec<_> = items.iter().map(|i| i.best_effort_type(bindings)).collect();

        let resolved = resolve_call(
            set.signatures,
            items,
            bindings,
            self.config.prefer_exact_signatures,
        )?
        .ok_or(TypeCheckError::UnknownFunctionSignature {
            name,
            args: arg_types,
        })?;

        Ok(TypedExpr::new(
            TypedExprKind::Function {
                function: PlannedFunction {
                    set,
                    signature: resolved.signature,
                },
                args: resolved.args,
            },
            resolved.return_type,
        ))
    }

    fn check_cast(
        &self,
        expr: &Expr,
        datatype: &DataType,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let desired = match expr {
            Expr::Placeholder(_) => Some(datatype),
            _ => None,
        };
        let typed = self.check(expr, bindings, desired, depth + 1)?;

        if !can_cast(&typed.datatype, datatype) {
            return Err(TypeCheckError::InvalidCast {
                from: typed.datatype,
                to: datatype.clone(),
            });
        }

        Ok(TypedExpr::new(
            TypedExprKind::Cast(Box::new(typed)),
            datatype.clone(),
        ))
    }

    fn check_in_list(
        &self,
        expr: &Expr,
        list: &[Expr],
        negated: bool,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let op = if negated { "NOT IN" } else { "IN" };
        let items = self.classify_all(std::iter::once(expr).chain(list), bindings, depth + 1)?;

        let mut types = items.iter().map(|i| i.best_effort_type(bindings));
        let left = types.next().unwrap_or(DataType::Null);
        let right = DataType::Tuple(types.collect());
        let unsupported = || TypeCheckError::UnsupportedComparisonOperator {
            op: op.to_string(),
            left: left.clone(),
            right: right.clone(),
        };

        let unified = unify(items, None, bindings).map_err(|err| err.wrap(|_| unsupported()))?;
        if !unified.datatype.is_null() && !is_comparable(ComparisonOperator::Eq, &unified.datatype)
        {
            return Err(unsupported());
        }

        let mut exprs = unified.exprs.into_iter();
        let expr = next_expr(&mut exprs)?;
        Ok(TypedExpr::new(
            TypedExprKind::InList {
                expr: Box::new(expr),
                list: exprs.collect(),
                negated,
            },
            DataType::Boolean,
        ))
    }

    fn check_in_subquery(
        &self,
        expr: &Expr,
        subquery: &Subquery,
        negated: bool,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let item = self.classify(expr, bindings, depth + 1)?;
        let left = item.best_effort_type(bindings);
        let row = Item::Typed(TypedExpr::new(
            TypedExprKind::Subquery(subquery.clone()),
            subquery.datatype.clone(),
        ));

        let unified = unify(vec![item, row], None, bindings).map_err(|err| {
            err.wrap(|_| TypeCheckError::UnsupportedComparisonOperator {
                op: if negated { "NOT IN" } else { "IN" }.to_string(),
                left,
                right: subquery.datatype.clone(),
            })
        })?;

        let mut exprs = unified.exprs.into_iter();
        let expr = next_expr(&mut exprs)?;
        Ok(TypedExpr::new(
            TypedExprKind::InSubquery {
                expr: Box::new(expr),
                subquery: subquery.clone(),
                negated,
            },
            DataType::Boolean,
        ))
    }

    fn check_between(
        &self,
        expr: &Expr,
        low: &Expr,
        high: &Expr,
        negated: bool,
        bindings: &mut PlaceholderTypes,
        depth: usize,
    ) -> Result<TypedExpr> {
        let items = self.classify_all([expr, low, high], bindings, depth + 1)?;
        let unified = unify(items, None, bindings).map_err(UnifyError::into_error)?;

        let datatype = unified.datatype;
        if !datatype.is_null() && !is_comparable(ComparisonOperator::LtEq, &datatype) {
            return Err(TypeCheckError::UnsupportedComparisonOperator {
                op: if negated { "NOT BETWEEN" } else { "BETWEEN" }.to_string(),
                left: datatype.clone(),
                right: datatype,
            });
        }

        let mut exprs = unified.exprs.into_iter();
        Ok(TypedExpr::new(
            TypedExprKind::Between {
                expr: Box::new(next_expr(&mut exprs)?),
                low: Box::new(next_expr(&mut exprs)?),
                high: Box::new(next_expr(&mut exprs)?),
                negated,
            },
            DataType::Boolean,
        ))
    }
}

/// Check if two values of the same type can be compared with `op`.
fn is_comparable(op: ComparisonOperator, datatype: &DataType) -> bool {
    comparison_operator_set(op)
        .find_exact(&[datatype.clone(), datatype.clone()])
        .is_some()
}

fn next_expr(exprs: &mut impl Iterator<Item = TypedExpr>) -> Result<TypedExpr> {
    exprs
        .next()
        .ok_or_else(|| TypeCheckError::Internal("missing typed expression".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ColumnTypes, NoColumns};
    use crate::scalar::ScalarValue;

    fn num(s: &str) -> Expr {
        Expr::number(s).unwrap()
    }

    fn check(expr: &Expr, desired: Option<&DataType>) -> Result<TypedExpr> {
        let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);
        checker.type_check(expr, &mut PlaceholderTypes::new(), desired)
    }

    #[test]
    fn constant_uses_desired() {
        let typed = check(&num("1"), Some(&DataType::Decimal)).unwrap();
        assert_eq!(DataType::Decimal, typed.datatype);

        // Can't be an int, falls back to the default.
        let typed = check(&num("1.5"), Some(&DataType::Int)).unwrap();
        assert_eq!(DataType::Float, typed.datatype);
    }

    #[test]
    fn binary_with_null_operand() {
        let expr = Expr::binary(BinaryOperator::Plus, Expr::Null, num("1.1"));
        let typed = check(&expr, None).unwrap();
        assert_eq!(DataType::Null, typed.datatype);
        assert_eq!(
            vec![DataType::Null, DataType::Float],
            typed
                .children()
                .into_iter()
                .map(|c| c.datatype.clone())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn binary_desired_only_when_supported() {
        let expr = Expr::binary(BinaryOperator::Plus, num("1"), num("2"));
        let typed = check(&expr, Some(&DataType::Decimal)).unwrap();
        assert_eq!(DataType::Decimal, typed.datatype);

        // No string addition, desired type is ignored.
        let typed = check(&expr, Some(&DataType::String)).unwrap();
        assert_eq!(DataType::Int, typed.datatype);
    }

    #[test]
    fn unary_falls_back_to_other_signatures() {
        let expr = Expr::unary(UnaryOperator::BitwiseNot, num("1.0"));
        assert_eq!(DataType::Int, check(&expr, None).unwrap().datatype);

        let expr = Expr::unary(UnaryOperator::BitwiseNot, num("0.1"));
        assert_eq!(
            "unsupported unary operator: ~<float>",
            check(&expr, None).unwrap_err().to_string()
        );
    }

    #[test]
    fn column_through_resolver() {
        let columns =
            ColumnTypes::new().with_column(QualifiedName::new(["t", "a"]), DataType::Float);
        let checker = TypeChecker::new(FunctionRegistry::builtin(), &columns);

        let expr = Expr::binary(BinaryOperator::Multiply, Expr::column(["a"]), num("2"));
        let typed = checker
            .type_check(&expr, &mut PlaceholderTypes::new(), None)
            .unwrap();
        assert_eq!(DataType::Float, typed.datatype);

        let err = checker
            .type_check(&Expr::column(["b"]), &mut PlaceholderTypes::new(), None)
            .unwrap_err();
        assert_eq!("qualified name \"b\" not found", err.to_string());
    }

    #[test]
    fn depth_guard() {
        let config = TypeCheckConfig {
            max_expression_depth: 3,
            ..Default::default()
        };
        let checker =
            TypeChecker::new(FunctionRegistry::builtin(), &NoColumns).with_config(config);

        let shallow = Expr::not(Expr::value(ScalarValue::Boolean(true)));
        checker
            .type_check(&shallow, &mut PlaceholderTypes::new(), None)
            .unwrap();

        let deep = Expr::not(Expr::not(Expr::not(Expr::value(ScalarValue::Boolean(
            true,
        )))));
        let err = checker
            .type_check(&deep, &mut PlaceholderTypes::new(), None)
            .unwrap_err();
        assert_eq!(TypeCheckError::ExpressionTooDeep { max: 3 }, err);
    }

    #[test]
    fn nested_errors_are_not_wrapped() {
        let expr = Expr::Coalesce(vec![
            Expr::function("nope", vec![]),
            num("1"),
        ]);
        assert_eq!(
            TypeCheckError::UnknownFunction("nope".to_string()),
            check(&expr, None).unwrap_err()
        );
    }
}
