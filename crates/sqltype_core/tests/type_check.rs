use sqltype_core::ast::{
    BinaryOperator,
    ComparisonOperator,
    Expr,
    QualifiedName,
    Subquery,
    UnaryOperator,
    WhenThen,
};
use sqltype_core::config::TypeCheckConfig;
use sqltype_core::datatype::{DataType, DataTypeId};
use sqltype_core::errors::TypeCheckError;
use sqltype_core::expr::{TypedExpr, TypedExprKind};
use sqltype_core::functions::{FunctionKind, FunctionRegistry, FunctionSet, Signature};
use sqltype_core::resolver::{ColumnTypes, NoColumns};
use sqltype_core::scalar::ScalarValue;
use sqltype_core::{PlaceholderTypes, TypeChecker, type_check};

fn num(s: &str) -> Expr {
    Expr::number(s).unwrap()
}

fn string(s: &str) -> Expr {
    Expr::string(s)
}

fn boolean(b: bool) -> Expr {
    Expr::value(ScalarValue::Boolean(b))
}

fn int_value(v: i64) -> Expr {
    Expr::value(ScalarValue::Int(v))
}

fn float_value(v: f64) -> Expr {
    Expr::value(ScalarValue::Float(v))
}

fn tuple(exprs: Vec<Expr>) -> Expr {
    Expr::Tuple(exprs)
}

fn tuple_value(values: Vec<ScalarValue>) -> Expr {
    Expr::value(ScalarValue::Tuple(values))
}

fn if_expr(condition: Expr, then: Expr, otherwise: Expr) -> Expr {
    Expr::If {
        condition: Box::new(condition),
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    }
}

fn if_null(expr: Expr, alternative: Expr) -> Expr {
    Expr::IfNull {
        expr: Box::new(expr),
        alternative: Box::new(alternative),
    }
}

fn null_if(expr: Expr, other: Expr) -> Expr {
    Expr::NullIf {
        expr: Box::new(expr),
        other: Box::new(other),
    }
}

fn is_null(expr: Expr, negated: bool) -> Expr {
    Expr::IsNull {
        expr: Box::new(expr),
        negated,
    }
}

fn is_bool(expr: Expr, value: bool, negated: bool) -> Expr {
    Expr::IsBool {
        expr: Box::new(expr),
        value,
        negated,
    }
}

fn case(operand: Option<Expr>, conditions: Vec<(Expr, Expr)>, else_expr: Option<Expr>) -> Expr {
    Expr::Case {
        operand: operand.map(Box::new),
        conditions: conditions
            .into_iter()
            .map(|(when, then)| WhenThen { when, then })
            .collect(),
        else_expr: else_expr.map(Box::new),
    }
}

fn in_list(expr: Expr, list: Vec<Expr>) -> Expr {
    Expr::InList {
        expr: Box::new(expr),
        list,
        negated: false,
    }
}

fn between(expr: Expr, low: Expr, high: Expr) -> Expr {
    Expr::Between {
        expr: Box::new(expr),
        low: Box::new(low),
        high: Box::new(high),
        negated: false,
    }
}

fn plus(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Plus, left, right)
}

fn eq(left: Expr, right: Expr) -> Expr {
    Expr::comparison(ComparisonOperator::Eq, left, right)
}

fn check_ok(expr: &Expr) -> TypedExpr {
    match type_check(expr, &mut PlaceholderTypes::new(), None) {
        Ok(typed) => typed,
        Err(e) => panic!("{expr}: unexpected error {e}"),
    }
}

fn check_err(expr: &Expr) -> String {
    match type_check(expr, &mut PlaceholderTypes::new(), None) {
        Ok(typed) => panic!("{expr}: expected error, got {:?}", typed.datatype),
        Err(e) => e.to_string(),
    }
}

#[test]
fn type_check_succeeds() {
    logutil::init_test();

    let cases = vec![
        plus(Expr::Null, num("1")),
        plus(Expr::Null, num("1.1")),
        plus(Expr::Null, Expr::cast(string("2006-09-23"), DataType::Date)),
        plus(Expr::Null, Expr::cast(string("1h"), DataType::Interval)),
        plus(Expr::Null, string("hello")),
        Expr::cast(Expr::Null, DataType::Int),
        plus(Expr::Null, Expr::cast(string("hello"), DataType::Bytes)),
        Expr::cast(Expr::cast(num("1.1"), DataType::Decimal), DataType::Decimal),
        eq(Expr::Null, num("1")),
        eq(num("1"), Expr::Null),
        Expr::and(boolean(true), Expr::Null),
        Expr::or(Expr::Null, boolean(false)),
        Expr::InSubquery {
            expr: Box::new(num("1")),
            subquery: Subquery {
                sql: "SELECT 1".to_string(),
                datatype: DataType::Int,
            },
            negated: false,
        },
        if_expr(boolean(true), num("2"), num("3")),
        if_expr(boolean(false), num("2"), num("3")),
        if_expr(Expr::Null, num("2"), num("3")),
        if_expr(Expr::Null, num("2"), num("3.0")),
        if_expr(
            boolean(true),
            tuple(vec![num("1"), num("2")]),
            tuple(vec![num("1"), num("3")]),
        ),
        if_null(num("1"), num("2")),
        if_null(num("1"), num("2.0")),
        if_null(Expr::Null, num("2")),
        if_null(num("2"), Expr::Null),
        if_null(
            tuple(vec![num("1"), num("2")]),
            tuple(vec![num("1"), num("3")]),
        ),
        null_if(num("1"), num("2")),
        null_if(num("1"), num("2.0")),
        null_if(Expr::Null, num("2")),
        null_if(num("2"), Expr::Null),
        null_if(
            tuple(vec![num("1"), num("2")]),
            tuple(vec![num("1"), num("3")]),
        ),
        Expr::Coalesce(vec![num("1"), num("2"), num("3"), num("4"), num("5")]),
        Expr::Coalesce(vec![num("1"), num("2.0")]),
        Expr::Coalesce(vec![Expr::Null, num("2")]),
        Expr::Coalesce(vec![num("2"), Expr::Null]),
        Expr::Coalesce(vec![
            tuple(vec![num("1"), num("2")]),
            tuple(vec![num("1"), num("3")]),
        ]),
        is_null(boolean(true), false),
        is_null(boolean(true), true),
        is_bool(boolean(true), true, false),
        is_bool(boolean(true), true, true),
        is_bool(boolean(true), false, false),
        is_bool(boolean(true), false, true),
        case(
            Some(num("1")),
            vec![(num("1"), tuple(vec![num("1"), num("2")]))],
            Some(tuple(vec![num("1"), num("3")])),
        ),
        between(num("1"), num("2"), num("3")),
        Expr::function("COUNT", vec![num("3")]),
    ];

    for expr in &cases {
        let typed = check_ok(expr);
        assert!(typed.is_fully_typed(), "{expr}: not fully typed");
    }
}

#[test]
fn type_check_errors() {
    let cases = vec![
        (
            plus(string("1"), string("2")),
            "unsupported binary operator: <string> + <string>",
        ),
        (
            plus(string("a"), num("0")),
            "unsupported binary operator: <string> + <int>",
        ),
        (
            Expr::binary(BinaryOperator::BitwiseXor, num("1.1"), num("3.1")),
            "unsupported binary operator: <float> # <float>",
        ),
        (
            Expr::unary(UnaryOperator::BitwiseNot, num("0.1")),
            "unsupported unary operator: ~<float>",
        ),
        (
            Expr::comparison(ComparisonOperator::Gt, string("10"), num("2")),
            "unsupported comparison operator: <string> > <int>",
        ),
        (Expr::column(["a"]), "qualified name \"a\" not found"),
        (
            Expr::and(num("1"), boolean(true)),
            "incompatible AND argument type: int",
        ),
        (
            Expr::and(num("1.0"), boolean(true)),
            "incompatible AND argument type: float",
        ),
        (
            Expr::or(string("a"), boolean(true)),
            "incompatible OR argument type: string",
        ),
        (
            Expr::or(tuple(vec![num("1"), num("2")]), boolean(true)),
            "incompatible OR argument type: tuple{int, int}",
        ),
        (Expr::not(num("1")), "incompatible NOT argument type: int"),
        (
            Expr::function("lower", vec![]),
            "unknown signature for lower: lower()",
        ),
        (
            Expr::function("lower", vec![num("1"), num("2")]),
            "unknown signature for lower: lower(int, int)",
        ),
        (
            Expr::function("lower", vec![num("1")]),
            "unknown signature for lower: lower(int)",
        ),
        (
            Expr::cast(num("1"), DataType::Date),
            "invalid cast: int -> DATE",
        ),
        (
            Expr::cast(num("1"), DataType::Timestamp),
            "invalid cast: int -> TIMESTAMP",
        ),
        (
            case(
                Some(string("one")),
                vec![(num("1"), num("1")), (string("two"), num("2"))],
                None,
            ),
            "incompatible condition type: expected 1 to be of type string, found type int",
        ),
        (
            case(
                Some(num("1")),
                vec![(num("1"), string("one")), (num("2"), num("2"))],
                None,
            ),
            "incompatible value type: expected 2 to be of type string, found type int",
        ),
        (
            case(
                Some(num("1")),
                vec![(num("1"), string("one"))],
                Some(num("2")),
            ),
            "incompatible value type: expected 2 to be of type string, found type int",
        ),
        (
            eq(
                tuple(vec![num("1"), num("2"), num("3")]),
                tuple(vec![num("1"), num("2")]),
            ),
            "unequal number of entries in tuple expressions: 3 != 2",
        ),
        (
            eq(
                tuple(vec![num("1"), num("2")]),
                tuple(vec![num("1"), string("a")]),
            ),
            "unsupported comparison operator: <tuple{int, int}> = <tuple{int, string}>",
        ),
        (
            in_list(num("1"), vec![string("a"), string("b")]),
            "unsupported comparison operator: <int> IN <tuple{string, string}>",
        ),
        (
            in_list(num("1"), vec![num("1"), string("a")]),
            "unsupported comparison operator: <int> IN <tuple{int, string}>",
        ),
        (
            between(num("1.0"), num("2"), string("5")),
            "expected 1.0 to be of type string, found type float",
        ),
        (
            if_expr(num("1"), num("2"), num("3")),
            "incompatible IF condition type: int",
        ),
        (
            if_expr(boolean(true), num("2"), string("5")),
            "incompatible IF expressions: expected 2 to be of type string, found type int",
        ),
        (
            if_null(num("1"), string("5")),
            "incompatible IFNULL expressions: expected 1 to be of type string, found type int",
        ),
        (
            null_if(num("1"), string("5")),
            "incompatible NULLIF expressions: expected 1 to be of type string, found type int",
        ),
        (
            Expr::Coalesce(vec![num("1"), num("2"), num("3"), num("4"), string("5")]),
            "incompatible COALESCE expressions: expected 1 to be of type string, found type int",
        ),
        (
            Expr::function("does_not_exist", vec![num("1")]),
            "unknown function: does_not_exist",
        ),
    ];

    for (expr, expected) in &cases {
        assert_eq!(*expected, check_err(expr), "{expr}");
    }
}

#[test]
fn result_types() {
    let cases = vec![
        (if_expr(boolean(true), num("2"), num("3")), DataType::Int),
        (if_expr(Expr::Null, num("2"), num("3.0")), DataType::Float),
        (plus(Expr::Null, num("1")), DataType::Null),
        (eq(Expr::Null, num("1")), DataType::Boolean),
        (between(num("1"), num("2"), num("3")), DataType::Boolean),
        (Expr::function("count", vec![num("3")]), DataType::Int),
        (Expr::function("count", vec![]), DataType::Int),
        (
            Expr::function("sum", vec![int_value(3)]),
            DataType::Decimal,
        ),
        (Expr::function("max", vec![num("3.5")]), DataType::Float),
        (
            Expr::function("greatest", vec![num("1"), num("2.5"), Expr::Null]),
            DataType::Float,
        ),
        (
            Expr::function("length", vec![string("abc")]),
            DataType::Int,
        ),
        (
            Expr::binary(BinaryOperator::Divide, num("1"), num("2")),
            DataType::Decimal,
        ),
        (
            plus(Expr::cast(string("2006-09-23"), DataType::Date), num("3")),
            DataType::Date,
        ),
        (
            Expr::binary(
                BinaryOperator::Minus,
                Expr::cast(string("2006-09-23"), DataType::Date),
                string("2006-09-01"),
            ),
            DataType::Int,
        ),
        (
            Expr::unary(UnaryOperator::BitwiseNot, num("1.0")),
            DataType::Int,
        ),
        (
            Expr::unary(UnaryOperator::Minus, num("1")),
            DataType::Int,
        ),
        (
            Expr::binary(BinaryOperator::Concat, string("a"), string("b")),
            DataType::String,
        ),
        (
            Expr::comparison(ComparisonOperator::Like, string("abc"), string("a%")),
            DataType::Boolean,
        ),
        (
            tuple(vec![num("1"), string("a")]),
            DataType::Tuple(vec![DataType::Int, DataType::String]),
        ),
    ];

    for (expr, expected) in &cases {
        assert_eq!(*expected, check_ok(expr).datatype, "{expr}");
    }
}

#[test]
fn between_operands_share_type() {
    let typed = check_ok(&between(num("1"), num("2"), num("3")));
    let operands: Vec<_> = typed.children().iter().map(|c| c.datatype.clone()).collect();
    assert_eq!(vec![DataType::Int; 3], operands);
}

#[test]
fn constants_resolved_to_group_type() {
    let typed = check_ok(&if_expr(boolean(true), num("2"), num("3.5")));
    match &typed.kind {
        TypedExprKind::If { then, .. } => {
            assert_eq!(TypedExprKind::Literal(ScalarValue::Float(2.0)), then.kind);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn type_check_is_idempotent() {
    let cases = vec![
        if_expr(boolean(true), num("2"), num("3.0")),
        plus(Expr::Null, num("1")),
        Expr::Coalesce(vec![
            tuple(vec![num("1"), num("2")]),
            tuple(vec![num("1"), num("3.5")]),
        ]),
        Expr::function("count", vec![num("3")]),
        Expr::cast(string("2006-09-23"), DataType::Date),
        case(
            Some(num("1")),
            vec![(num("1"), num("2")), (num("3"), num("4.5"))],
            Some(Expr::Null),
        ),
        in_list(num("1"), vec![num("1"), num("2.5")]),
        Expr::and(boolean(true), is_null(num("1"), true)),
    ];

    for expr in &cases {
        let typed = check_ok(expr);
        let again = check_ok(&typed.to_ast());
        assert_eq!(typed, again, "{expr}");
    }
}

/// Calls `f` with every permutation of `exprs`.
fn for_each_permutation(exprs: &mut [Expr], start: usize, f: &mut impl FnMut(&[Expr])) {
    if start + 1 >= exprs.len() {
        f(exprs);
        return;
    }
    for idx in start..exprs.len() {
        exprs.swap(start, idx);
        for_each_permutation(exprs, start + 1, f);
        exprs.swap(start, idx);
    }
}

fn bindings(entries: &[(&str, DataType)]) -> PlaceholderTypes {
    entries
        .iter()
        .map(|(name, datatype)| (*name, datatype.clone()))
        .collect()
}

#[test]
fn unify_same_typed_exprs() {
    logutil::init_test();

    let a_int = bindings(&[("a", DataType::Int)]);
    let a_float = bindings(&[("a", DataType::Float)]);
    let a_and_b_float = bindings(&[("a", DataType::Float), ("b", DataType::Float)]);
    let a_int_float = bindings(&[("a", DataType::Tuple(vec![DataType::Int, DataType::Float]))]);
    let b_int = bindings(&[("b", DataType::Int)]);
    let none = PlaceholderTypes::new();

    let ph = Expr::placeholder;

    let cases: Vec<(PlaceholderTypes, Option<DataType>, Vec<Expr>, DataType, PlaceholderTypes)> = vec![
        // Constants.
        (none.clone(), None, vec![num("1")], DataType::Int, none.clone()),
        (none.clone(), None, vec![num("1.0")], DataType::Float, none.clone()),
        (none.clone(), None, vec![num("1"), num("1.0")], DataType::Float, none.clone()),
        // Resolved values.
        (none.clone(), None, vec![int_value(1)], DataType::Int, none.clone()),
        (none.clone(), None, vec![float_value(1.0)], DataType::Float, none.clone()),
        // Constants and resolved values.
        (none.clone(), None, vec![int_value(1), num("1")], DataType::Int, none.clone()),
        (none.clone(), None, vec![int_value(1), num("1.0")], DataType::Int, none.clone()),
        (none.clone(), None, vec![int_value(1), int_value(1)], DataType::Int, none.clone()),
        (none.clone(), None, vec![float_value(1.0), num("1")], DataType::Float, none.clone()),
        (none.clone(), None, vec![float_value(1.0), num("1.0")], DataType::Float, none.clone()),
        (none.clone(), None, vec![float_value(1.0), float_value(1.0)], DataType::Float, none.clone()),
        // Bound placeholders.
        (a_float.clone(), None, vec![float_value(1.0), ph("a")], DataType::Float, a_float.clone()),
        (a_float.clone(), None, vec![num("1"), ph("a")], DataType::Float, a_float.clone()),
        (a_float.clone(), None, vec![num("1.0"), ph("a")], DataType::Float, a_float.clone()),
        (a_int.clone(), None, vec![num("1"), ph("a")], DataType::Int, a_int.clone()),
        (a_int.clone(), None, vec![num("1.0"), ph("a")], DataType::Int, a_int.clone()),
        (a_and_b_float.clone(), None, vec![ph("b"), ph("a")], DataType::Float, a_and_b_float.clone()),
        // Unbound placeholders.
        (none.clone(), None, vec![float_value(1.0), ph("a")], DataType::Float, a_float.clone()),
        (none.clone(), None, vec![num("1"), ph("a")], DataType::Int, a_int.clone()),
        (none.clone(), None, vec![num("1.0"), ph("a")], DataType::Float, a_float.clone()),
        // Nulls.
        (none.clone(), None, vec![Expr::Null], DataType::Null, none.clone()),
        (none.clone(), None, vec![Expr::Null, Expr::Null], DataType::Null, none.clone()),
        (none.clone(), None, vec![Expr::Null, num("1")], DataType::Int, none.clone()),
        (none.clone(), None, vec![Expr::Null, num("1.0")], DataType::Float, none.clone()),
        (none.clone(), None, vec![Expr::Null, int_value(1)], DataType::Int, none.clone()),
        (none.clone(), None, vec![Expr::Null, float_value(1.0)], DataType::Float, none.clone()),
        (none.clone(), None, vec![Expr::Null, float_value(1.0), num("1")], DataType::Float, none.clone()),
        (none.clone(), None, vec![Expr::Null, float_value(1.0), num("1.0")], DataType::Float, none.clone()),
        (none.clone(), None, vec![Expr::Null, num("1"), num("1.0")], DataType::Float, none.clone()),
        // Desired type.
        (none.clone(), Some(DataType::Int), vec![num("1")], DataType::Int, none.clone()),
        (none.clone(), Some(DataType::Int), vec![int_value(1)], DataType::Int, none.clone()),
        (none.clone(), Some(DataType::Int), vec![num("1.0")], DataType::Int, none.clone()),
        (none.clone(), Some(DataType::Int), vec![float_value(1.0)], DataType::Float, none.clone()),
        (none.clone(), Some(DataType::Float), vec![num("1")], DataType::Float, none.clone()),
        (none.clone(), Some(DataType::Float), vec![int_value(1)], DataType::Int, none.clone()),
        (none.clone(), Some(DataType::Int), vec![num("1"), num("1.0")], DataType::Int, none.clone()),
        (none.clone(), Some(DataType::Int), vec![num("1"), num("1.1")], DataType::Float, none.clone()),
        (none.clone(), Some(DataType::Float), vec![num("1"), num("1.0")], DataType::Float, none.clone()),
        // Desired type with unbound placeholders.
        (none.clone(), Some(DataType::Float), vec![ph("a")], DataType::Float, a_float.clone()),
        (none.clone(), Some(DataType::Float), vec![num("1"), ph("a")], DataType::Float, a_float.clone()),
        (none.clone(), Some(DataType::Float), vec![num("1.0"), ph("a")], DataType::Float, a_float.clone()),
        // Tuples.
        (
            none.clone(),
            None,
            vec![
                tuple(vec![num("1"), num("2")]),
                tuple_value(vec![ScalarValue::Int(1), ScalarValue::Float(2.0)]),
                ph("a"),
            ],
            DataType::Tuple(vec![DataType::Int, DataType::Float]),
            a_int_float.clone(),
        ),
        (
            none.clone(),
            None,
            vec![tuple(vec![num("1"), num("1.5")]), tuple(vec![ph("b"), num("2")])],
            DataType::Tuple(vec![DataType::Int, DataType::Float]),
            b_int.clone(),
        ),
        (
            none.clone(),
            None,
            vec![tuple(vec![Expr::Null, num("1")]), tuple(vec![num("1.0"), Expr::Null]), Expr::Null],
            DataType::Tuple(vec![DataType::Float, DataType::Int]),
            none.clone(),
        ),
    ];

    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);

    for (idx, (initial, desired, mut exprs, expected_type, expected_bindings)) in
        cases.into_iter().enumerate()
    {
        for_each_permutation(&mut exprs, 0, &mut |exprs: &[Expr]| {
            let mut bindings = initial.clone();
            let (datatype, typed) = match checker.unify_same_typed(exprs, &mut bindings, desired.as_ref()) {
                Ok(result) => result,
                Err(e) => panic!("{idx}: unexpected error: {e}"),
            };
            assert_eq!(expected_type, datatype, "{idx}: {exprs:?}");
            assert_eq!(expected_bindings, bindings, "{idx}: {exprs:?}");
            assert_eq!(exprs.len(), typed.len(), "{idx}");
        });
    }
}

#[test]
fn unify_same_typed_exprs_errors() {
    fn is_float_int_mismatch(err: &TypeCheckError) -> bool {
        match err {
            TypeCheckError::TypeMismatch(mismatch) => {
                let types = [&mismatch.expected, &mismatch.found];
                types.contains(&&DataType::Int) && types.contains(&&DataType::Float)
            }
            _ => false,
        }
    }

    fn is_param_error(err: &TypeCheckError) -> bool {
        matches!(err, TypeCheckError::AmbiguousParameterType { .. })
    }

    fn is_arity_error(err: &TypeCheckError) -> bool {
        matches!(err, TypeCheckError::ArityMismatch { .. })
    }

    fn is_tuple_scalar_mismatch(err: &TypeCheckError) -> bool {
        match err {
            TypeCheckError::TypeMismatch(mismatch) => {
                mismatch.expected.is_tuple() != mismatch.found.is_tuple()
            }
            _ => false,
        }
    }

    let ph = Expr::placeholder;
    let a_int = bindings(&[("a", DataType::Int)]);

    let cases: Vec<(PlaceholderTypes, Vec<Expr>, fn(&TypeCheckError) -> bool)> = vec![
        (PlaceholderTypes::new(), vec![int_value(1), num("1.1")], is_float_int_mismatch),
        (PlaceholderTypes::new(), vec![int_value(1), float_value(1.0)], is_float_int_mismatch),
        (a_int.clone(), vec![float_value(1.1), ph("a")], is_float_int_mismatch),
        (a_int.clone(), vec![num("1.1"), ph("a")], is_float_int_mismatch),
        (
            bindings(&[("a", DataType::Float), ("b", DataType::Int)]),
            vec![ph("b"), ph("a")],
            is_float_int_mismatch,
        ),
        (PlaceholderTypes::new(), vec![ph("b"), ph("a")], is_param_error),
        (
            PlaceholderTypes::new(),
            vec![tuple(vec![num("1"), num("2"), num("3")]), tuple(vec![num("1"), num("2")])],
            is_arity_error,
        ),
        // Arity is checked before the mismatched first position.
        (
            PlaceholderTypes::new(),
            vec![
                tuple(vec![int_value(1), num("1")]),
                tuple_value(vec![ScalarValue::Float(1.0)]),
            ],
            is_arity_error,
        ),
        (
            PlaceholderTypes::new(),
            vec![
                tuple(vec![int_value(1), num("1")]),
                tuple(vec![float_value(1.0), num("1")]),
            ],
            is_float_int_mismatch,
        ),
        (
            PlaceholderTypes::new(),
            vec![tuple(vec![num("1"), num("2")]), num("1")],
            is_tuple_scalar_mismatch,
        ),
        (
            PlaceholderTypes::new(),
            vec![tuple(vec![ph("a"), num("1")]), tuple(vec![ph("b"), num("2")])],
            is_param_error,
        ),
    ];

    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);

    for (idx, (initial, mut exprs, is_expected)) in cases.into_iter().enumerate() {
        for_each_permutation(&mut exprs, 0, &mut |exprs: &[Expr]| {
            let mut bindings = initial.clone();
            match checker.unify_same_typed(exprs, &mut bindings, None) {
                Ok((datatype, _)) => panic!("{idx}: expected error, got {datatype}"),
                Err(e) => assert!(is_expected(&e), "{idx}: unexpected error {e}"),
            }
        });
    }
}

#[test]
fn ambiguous_parameter_names_smallest() {
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);
    let err = checker
        .unify_same_typed(
            &[Expr::placeholder("b"), Expr::placeholder("a")],
            &mut PlaceholderTypes::new(),
            None,
        )
        .unwrap_err();
    assert_eq!("could not determine data type of parameter $a", err.to_string());
}

#[test]
fn tuple_arity_checked_before_elements() {
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);
    let err = checker
        .unify_same_typed(
            &[
                tuple(vec![num("1"), string("a")]),
                tuple(vec![string("b"), num("2"), num("3")]),
            ],
            &mut PlaceholderTypes::new(),
            None,
        )
        .unwrap_err();
    assert_eq!(TypeCheckError::ArityMismatch { left: 2, right: 3 }, err);
}

#[test]
fn placeholder_consistent_across_calls() {
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);
    let mut bindings = PlaceholderTypes::new();

    let expr = plus(Expr::placeholder("a"), num("1"));
    let typed = checker.type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(DataType::Int, typed.datatype);

    let expr = eq(Expr::placeholder("a"), int_value(3));
    checker.type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(1, bindings.len());
    assert_eq!(Some(&DataType::Int), bindings.get("a"));

    let err = checker
        .unify_same_typed(
            &[Expr::placeholder("a"), float_value(1.5)],
            &mut bindings,
            None,
        )
        .unwrap_err();
    assert_eq!(
        "expected $a to be of type float, found type int",
        err.to_string()
    );
}

#[test]
fn placeholder_alone_is_ambiguous() {
    let err = check_err(&Expr::placeholder("x"));
    assert_eq!("could not determine data type of parameter $x", err);
}

#[test]
fn desired_type_steering() {
    let mut bindings = PlaceholderTypes::new();
    let typed = type_check(&num("1"), &mut bindings, Some(&DataType::Int)).unwrap();
    assert_eq!(DataType::Int, typed.datatype);

    let typed = type_check(&int_value(1), &mut bindings, Some(&DataType::Float)).unwrap();
    assert_eq!(DataType::Int, typed.datatype);

    let typed = type_check(&Expr::placeholder("p"), &mut bindings, Some(&DataType::Float)).unwrap();
    assert_eq!(DataType::Float, typed.datatype);
    assert_eq!(Some(&DataType::Float), bindings.get("p"));

    let expr = if_expr(boolean(true), num("1"), num("2"));
    let typed = type_check(&expr, &mut bindings, Some(&DataType::Decimal)).unwrap();
    assert_eq!(DataType::Decimal, typed.datatype);
}

#[test]
fn cast_binds_placeholder_to_target() {
    let mut bindings = PlaceholderTypes::new();
    let expr = Expr::cast(Expr::placeholder("d"), DataType::Date);
    let typed = type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(DataType::Date, typed.datatype);
    assert_eq!(Some(&DataType::Date), bindings.get("d"));
}

#[test]
fn invalid_cast_targets() {
    let expr = Expr::cast(
        num("1"),
        DataType::Tuple(vec![DataType::Int]),
    );
    assert_eq!("invalid cast: int -> TUPLE", check_err(&expr));

    let expr = Expr::cast(Expr::cast(string("abc"), DataType::Bytes), DataType::Date);
    assert_eq!("invalid cast: bytes -> DATE", check_err(&expr));
}

#[test]
fn columns_from_resolver() {
    let columns = ColumnTypes::new()
        .with_column(QualifiedName::new(["t", "a"]), DataType::Int)
        .with_column(QualifiedName::new(["t", "b"]), DataType::String)
        .with_column(QualifiedName::new(["u", "b"]), DataType::Float);
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &columns);
    let mut bindings = PlaceholderTypes::new();

    let expr = plus(Expr::column(["T", "A"]), num("1"));
    let typed = checker.type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(DataType::Int, typed.datatype);

    let expr = plus(Expr::column(["a"]), num("1.5"));
    let err = checker.type_check(&expr, &mut bindings, None).unwrap_err();
    assert_eq!("unsupported binary operator: <int> + <float>", err.to_string());

    let expr = Expr::function("upper", vec![Expr::column(["t", "b"])]);
    let typed = checker.type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(DataType::String, typed.datatype);

    let expr = Expr::function("upper", vec![Expr::column(["b"])]);
    let err = checker.type_check(&expr, &mut bindings, None).unwrap_err();
    assert_eq!("qualified name \"b\" is ambiguous", err.to_string());
}

#[test]
fn overload_preference_setting() {
    logutil::init_test();

    const PICKY: FunctionSet = FunctionSet {
        name: "picky",
        aliases: &[],
        kind: FunctionKind::Scalar,
        doc: &[],
        signatures: &[
            Signature::new(&[DataTypeId::Decimal], DataTypeId::Decimal),
            Signature::new(&[DataTypeId::Int], DataTypeId::Int),
        ],
    };

    let registry = FunctionRegistry::with_builtins([&PICKY]);
    let expr = Expr::function("picky", vec![num("1")]);

    let checker = TypeChecker::new(&registry, &NoColumns);
    let typed = checker
        .type_check(&expr, &mut PlaceholderTypes::new(), None)
        .unwrap();
    assert_eq!(DataType::Int, typed.datatype);

    let mut config = TypeCheckConfig::default();
    config
        .set_from_scalar("prefer_exact_signatures", ScalarValue::Boolean(false))
        .unwrap();
    let checker = TypeChecker::new(&registry, &NoColumns).with_config(config);
    let typed = checker
        .type_check(&expr, &mut PlaceholderTypes::new(), None)
        .unwrap();
    assert_eq!(DataType::Decimal, typed.datatype);
}

#[test]
fn depth_limit() {
    let mut expr = num("1");
    for _ in 0..20 {
        expr = Expr::unary(UnaryOperator::Minus, expr);
    }

    let mut config = TypeCheckConfig::default();
    config
        .set_from_scalar("max_expression_depth", ScalarValue::Int(10))
        .unwrap();
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns).with_config(config);
    let err = checker
        .type_check(&expr, &mut PlaceholderTypes::new(), None)
        .unwrap_err();
    assert_eq!("expression exceeds the maximum depth of 10", err.to_string());

    let mut config = TypeCheckConfig::default();
    config
        .set_from_scalar("max_expression_depth", ScalarValue::Int(0))
        .unwrap();
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns).with_config(config);
    let typed = checker
        .type_check(&expr, &mut PlaceholderTypes::new(), None)
        .unwrap();
    assert_eq!(DataType::Int, typed.datatype);
}

#[test]
fn searched_case_conditions_must_be_bool() {
    let expr = case(
        None,
        vec![(boolean(true), num("1")), (num("2"), num("3"))],
        None,
    );
    assert_eq!(
        "incompatible condition type: expected 2 to be of type bool, found type int",
        check_err(&expr)
    );

    let expr = case(
        None,
        vec![(eq(num("1"), num("2")), num("1")), (Expr::Null, num("3.5"))],
        Some(num("4")),
    );
    assert_eq!(DataType::Float, check_ok(&expr).datatype);
}

#[test]
fn nested_errors_surface_unchanged() {
    let expr = if_expr(
        boolean(true),
        Expr::function("lower", vec![num("1")]),
        string("a"),
    );
    assert_eq!("unknown signature for lower: lower(int)", check_err(&expr));
}

#[test]
fn json_expression_round_trip_through_checker() {
    let json = r#"{"binary": {"op": "plus", "left": {"constant": {"number": "1"}}, "right": {"placeholder": {"name": "a"}}}}"#;
    let expr: Expr = serde_json::from_str(json).unwrap();

    let mut bindings = PlaceholderTypes::new();
    let typed = type_check(&expr, &mut bindings, None).unwrap();
    assert_eq!(DataType::Int, typed.datatype);
    assert_eq!(Some(&DataType::Int), bindings.get("a"));
}

#[test]
fn failed_check_leaves_bindings_untouched() {
    let checker = TypeChecker::new(FunctionRegistry::builtin(), &NoColumns);
    let seeded = bindings(&[("z", DataType::String)]);

    // Position 0 binds $a before position 1 fails.
    let mut current = seeded.clone();
    let exprs = [
        tuple(vec![Expr::placeholder("a"), int_value(1)]),
        tuple(vec![num("1"), float_value(1.0)]),
    ];
    checker
        .unify_same_typed(&exprs, &mut current, None)
        .unwrap_err();
    assert_eq!(seeded, current);

    let expr = Expr::Coalesce(vec![plus(Expr::placeholder("a"), num("1")), string("x")]);
    let err = checker.type_check(&expr, &mut current, None).unwrap_err();
    assert!(
        err.to_string().starts_with("incompatible COALESCE expressions"),
        "{err}"
    );
    assert_eq!(seeded, current);

    // Success commits new bindings alongside the seeded ones.
    let expr = plus(Expr::placeholder("a"), num("1"));
    checker.type_check(&expr, &mut current, None).unwrap();
    assert_eq!(Some(&DataType::Int), current.get("a"));
    assert_eq!(Some(&DataType::String), current.get("z"));
}

#[test]
fn literals_beyond_float_range_default_to_decimal() {
    let typed = check_ok(&num("1e400"));
    assert_eq!(DataType::Decimal, typed.datatype);

    let typed = check_ok(&Expr::Coalesce(vec![num("1e400"), num("1")]));
    assert_eq!(DataType::Decimal, typed.datatype);
    assert!(typed.is_fully_typed());

    let typed = check_ok(&plus(num("1e400"), num("2.5")));
    assert_eq!(DataType::Decimal, typed.datatype);
}
