use super::*;

use crate::completion::{complete, CompletionConfig, CompletionResult, EngineError, Snapshot};
use crate::syntax::Side;

// =============================================================================
// COMPLETION ENGINE SEMANTICS
// =============================================================================
//
// Applicability of the six inference rules, atomicity of perform, and whole
// runs of the automatic strategy.

fn idl_formulas() -> (Formula, Formula) {
    (fa("comp", vec![fa("id", vec![]), fv("s")]), fv("s"))
}

fn app_formulas() -> (Formula, Formula) {
    // inst(s, app(a, b)) = app(inst(s, a), inst(s, b))
    (
        fa("inst", vec![fv("s"), fa("app", vec![fv("a"), fv("b")])]),
        fa(
            "app",
            vec![
                fa("inst", vec![fv("s"), fv("a")]),
                fa("inst", vec![fv("s"), fv("b")]),
            ],
        ),
    )
}

// -------------------------------------------------------------------------
// Delete
// -------------------------------------------------------------------------
#[test]
fn delete_offered_for_literally_identical_sides() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (lhs, _) = idl_formulas();
    state.add_equation(&lhs, &lhs);
    let deletes = actions_of(&state, ActionKind::Delete);
    assert_eq!(deletes.len(), 1);
    state.perform(&deletes[0]).unwrap();
    assert!(state.equations().is_empty());
}

#[test]
fn delete_not_offered_when_sides_differ() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (lhs, rhs) = idl_formulas();
    state.add_equation(&lhs, &rhs);
    assert!(actions_of(&state, ActionKind::Delete).is_empty());
}

#[test]
fn delete_not_offered_for_merely_unifiable_sides() {
    // f(x) = f(y) unifies, but only with a binding.
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(&fa("f", vec![fv("x")]), &fa("f", vec![fv("y")]));
    assert!(actions_of(&state, ActionKind::Delete).is_empty());
}

// -------------------------------------------------------------------------
// Orient, including the substitution-calculus scenario
// -------------------------------------------------------------------------
#[test]
fn idl_is_orientable_and_becomes_one_rule() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (app_l, app_r) = app_formulas();
    let (idl_l, idl_r) = idl_formulas();
    state.add_labeled_equation(Some("app".to_string()), &app_l, &app_r);
    state.add_labeled_equation(Some("idl".to_string()), &idl_l, &idl_r);

    let orient_idl = actions_of(&state, ActionKind::Orient)
        .into_iter()
        .find(|a| matches!(a, Action::Orient { equation, .. } if equation.label.as_deref() == Some("idl")))
        .expect("idl must be orientable");
    state.perform(&orient_idl).unwrap();

    assert_eq!(state.equations().len(), 1);
    assert_eq!(state.equations()[0].label.as_deref(), Some("app"));
    assert_eq!(state.rules().len(), 1);
    assert_eq!(
        state.show(&state.rules()[0]).to_string(),
        "idl: (comp (id) s) -> s"
    );
}

#[test]
fn app_is_oriented_left_to_right() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (lhs, rhs) = app_formulas();
    state.add_equation(&lhs, &rhs);
    let orient = actions_of(&state, ActionKind::Orient);
    assert_eq!(orient.len(), 1);
    match &orient[0] {
        Action::Orient { rule, .. } => assert_eq!(rule.lhs.root_symbol(), Some("inst")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn orient_puts_first_discriminating_measure_winner_left() {
    // Weight ties so size decides.
    let order = ReductionOrder::new()
        .with(Weight::new().with_variable_weight(1).with_symbol("g", Combine::Sum { base: 2 }))
        .with(Size);
    let mut state = CompletionState::new(order);
    state.add_equation(&fa("g", vec![fv("x")]), &fa("f", vec![fv("x"), fv("y")]));
    // g(x) weighs 3, f(x, y) weighs 3; sizes 2 and 3.
    let orient = actions_of(&state, ActionKind::Orient);
    match &orient[0] {
        Action::Orient { rule, .. } => assert_eq!(rule.lhs.root_symbol(), Some("f")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn incomparable_equation_gets_no_orient() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(
        &fa("plus", vec![fv("x"), fv("y")]),
        &fa("plus", vec![fv("y"), fv("x")]),
    );
    assert!(actions_of(&state, ActionKind::Orient).is_empty());
}

// -------------------------------------------------------------------------
// Simplify / Compose / Collapse
// -------------------------------------------------------------------------
#[test]
fn simplify_rewrites_one_side_and_requeues_equation() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.push_rule(Rule::new(app("comp", vec![c("id"), x(0)]), x(0)));
    state.push_equation(Equation::labeled(
        "e",
        c("k"),
        app("g", vec![app("comp", vec![c("id"), x(1)])]),
    ));
    state.push_equation(Equation::new(c("a"), c("b")));

    let simplify = actions_of(&state, ActionKind::Simplify);
    assert_eq!(simplify.len(), 1);
    match &simplify[0] {
        Action::Simplify { side, position, .. } => {
            assert_eq!(*side, Side::Rhs);
            assert_eq!(position.to_string(), "1");
        }
        other => panic!("unexpected {:?}", other),
    }
    state.perform(&simplify[0]).unwrap();
    assert_eq!(
        state.equations(),
        &[
            Equation::new(c("a"), c("b")),
            Equation::labeled("e", c("k"), app("g", vec![x(1)])),
        ]
    );
}

#[test]
fn simplify_does_not_instantiate_equation_variables() {
    // comp(X1, a) is not an instance of comp(id, s).
    let mut state = CompletionState::new(substitution_calculus_order());
    state.push_rule(Rule::new(app("comp", vec![c("id"), x(0)]), x(0)));
    state.push_equation(Equation::new(app("comp", vec![x(1), c("a")]), c("a")));
    assert!(actions_of(&state, ActionKind::Simplify).is_empty());
}

#[test]
fn compose_rewrites_rule_output() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    state.push_rule(Rule::new(app("f", vec![x(0)]), c("a")));
    state.push_rule(Rule::labeled("r", app("h", vec![x(1), x(2)]), app("f", vec![x(2)])));
    let compose = actions_of(&state, ActionKind::Compose);
    assert_eq!(compose.len(), 1);
    state.perform(&compose[0]).unwrap();
    assert_eq!(
        state.rules()[1],
        Rule::labeled("r", app("h", vec![x(1), x(2)]), c("a"))
    );
    assert_eq!(state.rules().len(), 2);
}

#[test]
fn collapse_demotes_rule_to_equation() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    state.push_rule(Rule::new(app("k", vec![app("f", vec![x(0)])]), c("b")));
    state.push_rule(Rule::new(app("f", vec![x(1)]), c("a")));
    let collapse = actions_of(&state, ActionKind::Collapse);
    assert_eq!(collapse.len(), 1);
    state.perform(&collapse[0]).unwrap();
    assert_eq!(state.rules(), &[Rule::new(app("f", vec![x(1)]), c("a"))]);
    assert_eq!(
        state.equations(),
        &[Equation::new(app("k", vec![c("a")]), c("b"))]
    );
}

#[test]
fn rule_does_not_compose_or_collapse_itself() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    // g(x) -> h(g(x)) could rewrite its own right side; a rule is never paired with itself.
    state.push_rule(Rule::new(app("g", vec![x(0)]), app("h", vec![app("g", vec![x(0)])])));
    assert!(actions_of(&state, ActionKind::Compose).is_empty());
    assert!(actions_of(&state, ActionKind::Collapse).is_empty());
}

// -------------------------------------------------------------------------
// Deduce
// -------------------------------------------------------------------------
#[test]
fn deduce_adds_the_critical_pair_with_primed_names() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(&fa("f", vec![fa("g", vec![fv("x")])]), &fv("x"));
    state.add_equation(&fa("g", vec![fa("h", vec![fv("y")])]), &fa("k", vec![fv("y")]));
    for _ in 0..2 {
        let orient = actions_of(&state, ActionKind::Orient).remove(0);
        state.perform(&orient).unwrap();
    }

    let deduce = actions_of(&state, ActionKind::Deduce);
    assert_eq!(deduce.len(), 1);
    match &deduce[0] {
        Action::Deduce { position, .. } => assert_eq!(position.to_string(), "1"),
        other => panic!("unexpected {:?}", other),
    }
    state.perform(&deduce[0]).unwrap();
    assert_eq!(
        state.show(&state.equations()[0]).to_string(),
        "(h y') = (f (k y'))"
    );
    assert!(actions_of(&state, ActionKind::Deduce).is_empty());
}

// -------------------------------------------------------------------------
// Protocol
// -------------------------------------------------------------------------
#[test]
fn listing_twice_yields_identical_proposals() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (app_l, app_r) = app_formulas();
    let (idl_l, idl_r) = idl_formulas();
    state.add_equation(&app_l, &app_r);
    state.add_equation(&idl_l, &idl_r);
    state.add_equation(&idl_l, &idl_l);
    let first = state.actions();
    let second = state.actions();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn stale_action_is_rejected_without_changes() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (idl_l, idl_r) = idl_formulas();
    state.add_equation(&idl_l, &idl_r);
    let orient = actions_of(&state, ActionKind::Orient).remove(0);
    state.perform(&orient).unwrap();
    let rules_before = state.rules().to_vec();

    let err = state.perform(&orient).unwrap_err();
    assert!(matches!(err, EngineError::MissingEquation { .. }));
    assert!(err.to_string().contains("(comp (id) s) = s"), "{}", err);
    assert_eq!(state.rules(), rules_before.as_slice());
}

#[test]
fn stale_collapse_names_the_missing_rule() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    state.push_rule(Rule::new(app("k", vec![app("f", vec![x(0)])]), c("b")));
    state.push_rule(Rule::new(app("f", vec![x(1)]), c("a")));
    let collapse = actions_of(&state, ActionKind::Collapse).remove(0);
    state.perform(&collapse).unwrap();
    let equations_before = state.equations().to_vec();

    assert!(matches!(
        state.perform(&collapse),
        Err(EngineError::MissingRule {
            action: ActionKind::Collapse,
            ..
        })
    ));
    assert_eq!(state.equations(), equations_before.as_slice());
}

#[test]
fn stale_compose_is_rejected_without_changes() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    state.push_rule(Rule::new(app("f", vec![x(0)]), c("a")));
    state.push_rule(Rule::new(app("h", vec![x(1), x(2)]), app("f", vec![x(2)])));
    let compose = actions_of(&state, ActionKind::Compose).remove(0);
    state.perform(&compose).unwrap();
    let before = Snapshot::of(&state);
    let high_water = state.names().high_water();

    assert!(matches!(
        state.perform(&compose),
        Err(EngineError::MissingRule {
            action: ActionKind::Compose,
            ..
        })
    ));
    assert_eq!(Snapshot::of(&state), before);
    assert_eq!(state.names().high_water(), high_water);
}

#[test]
fn stale_simplify_is_rejected_without_changes() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.push_rule(Rule::new(app("comp", vec![c("id"), x(0)]), x(0)));
    state.push_equation(Equation::new(
        c("k"),
        app("g", vec![app("comp", vec![c("id"), x(1)])]),
    ));
    let simplify = actions_of(&state, ActionKind::Simplify).remove(0);
    state.perform(&simplify).unwrap();
    let before = Snapshot::of(&state);
    let high_water = state.names().high_water();

    assert!(matches!(
        state.perform(&simplify),
        Err(EngineError::MissingEquation {
            action: ActionKind::Simplify,
            ..
        })
    ));
    assert_eq!(Snapshot::of(&state), before);
    assert_eq!(state.names().high_water(), high_water);
}

#[test]
fn stale_deduce_allocates_no_names() {
    let mut state = CompletionState::new(ReductionOrder::new().with(Size));
    state.push_rule(Rule::new(app("f", vec![app("g", vec![x(0)])]), x(0)));
    state.push_rule(Rule::new(app("g", vec![app("h", vec![x(1)])]), app("k", vec![x(1)])));
    let deduce = actions_of(&state, ActionKind::Deduce);
    assert_eq!(deduce.len(), 1);

    // Demote g(h(y)) -> k(y) so the listed overlap no longer exists.
    state.push_rule(Rule::new(app("h", vec![x(2)]), c("a")));
    let collapse = state
        .list_actions()
        .find(|a| matches!(a, Action::Collapse { target, .. } if target == &state.rules()[1]))
        .unwrap();
    state.perform(&collapse).unwrap();
    let before = Snapshot::of(&state);
    let high_water = state.names().high_water();
    let named = state.names().len();

    assert!(matches!(
        state.perform(&deduce[0]),
        Err(EngineError::MissingRule {
            action: ActionKind::Deduce,
            ..
        })
    ));
    assert_eq!(Snapshot::of(&state), before);
    assert_eq!(state.names().high_water(), high_water);
    assert_eq!(state.names().len(), named);
}

#[test]
fn history_records_each_performed_step() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (idl_l, idl_r) = idl_formulas();
    state.add_equation(&idl_l, &idl_r);
    state.add_equation(&idl_l, &idl_l);
    let delete = actions_of(&state, ActionKind::Delete).remove(0);
    state.perform(&delete).unwrap();
    let orient = actions_of(&state, ActionKind::Orient).remove(0);
    state.perform(&orient).unwrap();

    let kinds: Vec<ActionKind> = state.history().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ActionKind::Delete, ActionKind::Orient]);
    assert_eq!(state.history()[1].step, 2);
    assert!(state.history()[1].description.starts_with("Orient"));
}

// -------------------------------------------------------------------------
// Automatic strategy
// -------------------------------------------------------------------------
#[test]
fn automatic_completion_adds_critical_rule() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(&fa("f", vec![fa("g", vec![fv("x")])]), &fv("x"));
    state.add_equation(&fa("g", vec![fa("h", vec![fv("y")])]), &fa("k", vec![fv("y")]));

    let result = complete(&mut state, &CompletionConfig::default()).unwrap();
    assert_eq!(result, CompletionResult::Complete { steps: 4 });
    let rules: Vec<String> = state
        .rules()
        .iter()
        .map(|r| state.show(r).to_string())
        .collect();
    assert_eq!(
        rules,
        vec![
            "(f (g x)) -> x",
            "(g (h y)) -> (k y)",
            "(f (k y')) -> (h y')",
        ]
    );
    assert!(state.is_complete());
}

#[test]
fn completed_system_gives_unique_normal_forms() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(&fa("f", vec![fa("g", vec![fv("x")])]), &fv("x"));
    state.add_equation(&fa("g", vec![fa("h", vec![fv("y")])]), &fa("k", vec![fv("y")]));
    complete(&mut state, &CompletionConfig::default()).unwrap();

    // f(g(h(c))) can first rewrite at the root or inside; both meet.
    let term = app("f", vec![app("g", vec![app("h", vec![c("c")])])]);
    let normal = state.normalize(&term, 100);
    assert!(normal.complete);
    assert_eq!(normal.term, app("h", vec![c("c")]));
    let inner_first = app("f", vec![app("k", vec![c("c")])]);
    assert_eq!(state.normalize(&inner_first, 100).term, normal.term);
}

#[test]
fn commutativity_gets_stuck() {
    let mut state = CompletionState::new(substitution_calculus_order());
    state.add_equation(
        &fa("plus", vec![fv("x"), fv("y")]),
        &fa("plus", vec![fv("y"), fv("x")]),
    );
    let result = complete(&mut state, &CompletionConfig::default()).unwrap();
    assert_eq!(result, CompletionResult::Stuck { steps: 0, pending: 1 });
}

#[test]
fn snapshot_serializes_rules_and_history() {
    let mut state = CompletionState::new(substitution_calculus_order());
    let (idl_l, idl_r) = idl_formulas();
    state.add_labeled_equation(Some("idl".to_string()), &idl_l, &idl_r);
    complete(&mut state, &CompletionConfig::default()).unwrap();

    let json = Snapshot::of(&state).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rules"][0], "idl: (comp (id) s) -> s");
    assert_eq!(value["measures"], serde_json::json!(["weight", "size"]));
    assert_eq!(value["history"][0]["kind"], "Orient");
}
