#![allow(clippy::float_cmp)]

use std::sync::Arc;

use strut_expr::strength::{self, Preset};
use strut_expr::{
    constraint_from_values, describe, make_constraint, with_strength, Expression,
    LinearRelation, RelationalOperator, StrengthSpec, Term, Value, Variable,
};

/// 2x + 3y + x + 5 <= 0 reduces to 3x + 3y + 5 <= 0.
#[test]
fn test_reduce_and_describe() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let raw = Expression::new(
        vec![
            Term::new(x.clone(), 2.0),
            Term::new(y.clone(), 3.0),
            Term::new(x.clone(), 1.0),
        ],
        5.0,
    );

    let c = make_constraint(&raw, "<=", None).unwrap();

    let terms = c.expression().terms();
    assert_eq!(terms.len(), 2);
    assert!(terms[0].variable().same_as(&x));
    assert_eq!(terms[0].coefficient(), 3.0);
    assert!(terms[1].variable().same_as(&y));
    assert_eq!(terms[1].coefficient(), 3.0);
    assert_eq!(c.expression().constant(), 5.0);
    assert_eq!(c.strength(), strength::REQUIRED);
    assert_eq!(describe(&c), "3 * x + 3 * y + 5 <= 0 | strength = 1.001e+09");

    // caller's raw expression is untouched
    assert_eq!(raw.terms().len(), 3);
}

/// One variable shared by several constraints sees the engine's value everywhere.
#[test]
fn test_variable_shared_across_constraints() {
    let left = Variable::new("left");
    let width = Variable::new("width");
    let right = Variable::new("right");

    let span = (&left + &width).eq_expr(&right);
    let min_width = Term::from(&width).ge_expr(50.0) | Preset::Strong;

    left.set_value(10.0);
    width.set_value(80.0);
    right.set_value(90.0);

    assert_eq!(span.expression().value(), 0.0);
    assert_eq!(min_width.expression().value(), 30.0);
    assert_eq!(min_width.strength(), strength::STRONG);
    assert!(span.expression().terms()[1].variable().same_as(&width));
    assert!(min_width.expression().terms()[0].variable().same_as(&width));
}

#[test]
fn test_restrength_chain() {
    let x = Variable::new("x");
    let base = Term::new(x, 1.0).le_expr(100.0);
    let medium = with_strength(base.clone(), Preset::Medium).unwrap();
    let custom = with_strength(StrengthSpec::Numeric(42.0), medium.clone()).unwrap();

    assert_eq!(base.strength(), strength::REQUIRED);
    assert_eq!(medium.strength(), strength::MEDIUM);
    assert_eq!(custom.strength(), 42.0);
    assert!(Arc::ptr_eq(base.shared_expression(), custom.shared_expression()));
    assert_eq!(custom.op(), RelationalOperator::LessEqual);
}

#[test]
fn test_dynamic_and_typed_paths_agree() {
    let x = Variable::new("x");
    let raw = Expression::new(vec![Term::new(x.clone(), 1.0), Term::new(x, -1.0)], 2.0);

    let typed = make_constraint(&raw, ">=", Some(Preset::Weak.into())).unwrap();
    let untyped = constraint_from_values(
        Value::Expression(raw.clone()),
        Value::from(">="),
        Some(Value::from("weak")),
    )
    .unwrap();

    assert_eq!(typed, untyped);
    assert_eq!(typed.describe(), "0 * x + 2 >= 0 | strength = 1");
}

#[test]
fn test_failed_construction_leaves_inputs_alone() {
    let x = Variable::new("x");
    x.set_value(7.0);
    let raw = Expression::new(vec![Term::new(x.clone(), 2.0)], 1.0);
    let snapshot = raw.clone();

    assert!(make_constraint(&raw, "=", None).is_err());
    assert!(make_constraint(&raw, "==", Some(f64::NAN.into())).is_err());

    assert_eq!(raw, snapshot);
    assert_eq!(x.value(), 7.0);
    // test handle + raw + snapshot
    assert_eq!(x.handle_count(), 3);
}
