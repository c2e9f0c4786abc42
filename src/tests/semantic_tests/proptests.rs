use super::*;
use proptest::prelude::*;

use crate::completion::normalize;
use crate::syntax::VarNames;
use crate::unify::match_term;

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
//
// A small signature (f/2, g/1, a/0, b/0) and few variables keep unifiable
// pairs frequent enough to exercise the success paths.

fn arb_var() -> impl Strategy<Value = Term> {
    (0usize..4).prop_map(Term::var)
}

fn arb_constant() -> impl Strategy<Value = Term> {
    prop_oneof![Just(c("a")), Just(c("b"))]
}

fn arb_term(depth: u32) -> BoxedStrategy<Term> {
    if depth == 0 {
        prop_oneof![arb_var(), arb_constant()].boxed()
    } else {
        prop_oneof![
            arb_var(),
            arb_constant(),
            arb_term(depth - 1).prop_map(|t| app("g", vec![t])),
            (arb_term(depth - 1), arb_term(depth - 1)).prop_map(|(l, r)| app("f", vec![l, r])),
        ]
        .boxed()
    }
}

fn arb_ground_term(depth: u32) -> BoxedStrategy<Term> {
    if depth == 0 {
        arb_constant().boxed()
    } else {
        prop_oneof![
            arb_constant(),
            arb_ground_term(depth - 1).prop_map(|t| app("g", vec![t])),
            (arb_ground_term(depth - 1), arb_ground_term(depth - 1))
                .prop_map(|(l, r)| app("f", vec![l, r])),
        ]
        .boxed()
    }
}

proptest! {
    #[test]
    fn prop_unifier_is_sound(s in arb_term(3), t in arb_term(3)) {
        if let UnifyResult::Success(sigma) = unify(&s, &t) {
            prop_assert_eq!(sigma.apply_to_term(&s), sigma.apply_to_term(&t));
        }
    }

    #[test]
    fn prop_unifier_is_idempotent(s in arb_term(3), t in arb_term(3)) {
        if let UnifyResult::Success(sigma) = unify(&s, &t) {
            let once = sigma.apply_to_term(&s);
            prop_assert_eq!(sigma.apply_to_term(&once), once);
        }
    }

    #[test]
    fn prop_outcome_is_symmetric(s in arb_term(3), t in arb_term(3)) {
        prop_assert_eq!(unify(&s, &t).is_success(), unify(&t, &s).is_success());
    }

    #[test]
    fn prop_self_unification_is_empty(t in arb_term(4)) {
        prop_assert_eq!(unify(&t, &t), UnifyResult::Success(Substitution::empty()));
    }

    #[test]
    fn prop_empty_substitution_is_identity(t in arb_term(4)) {
        prop_assert_eq!(Substitution::empty().apply_to_term(&t), t);
    }

    #[test]
    fn prop_ground_instance_matches(pattern in arb_term(2), ground in arb_ground_term(2)) {
        // Whenever a pattern matches, the match is an instance.
        if let Some(sigma) = match_term(&pattern, &ground) {
            prop_assert_eq!(sigma.apply_to_term(&pattern), ground);
        }
    }

    #[test]
    fn prop_listing_is_idempotent(
        pairs in prop::collection::vec((arb_term(2), arb_term(2)), 1..4)
    ) {
        let mut state = CompletionState::new(substitution_calculus_order());
        for (l, r) in pairs {
            state.push_equation(Equation::new(l, r));
        }
        prop_assert_eq!(state.actions(), state.actions());
    }

    #[test]
    fn prop_performing_any_listed_action_succeeds(
        pairs in prop::collection::vec((arb_term(2), arb_term(2)), 1..4),
        pick in any::<prop::sample::Index>()
    ) {
        let mut state = CompletionState::new(substitution_calculus_order());
        for (l, r) in pairs {
            state.push_equation(Equation::new(l, r));
        }
        let actions = state.actions();
        if !actions.is_empty() {
            let action = &actions[pick.index(actions.len())];
            prop_assert!(state.perform(action).is_ok());
            prop_assert_eq!(state.history().len(), 1);
        }
    }

    #[test]
    fn prop_normal_form_has_no_redex(t in arb_ground_term(4)) {
        // g(g(x)) -> x and f(x, x) -> x terminate by size.
        let rules = vec![
            Rule::new(app("g", vec![app("g", vec![x(0)])]), x(0)),
            Rule::new(app("f", vec![x(0), x(0)]), x(0)),
        ];
        let mut names = VarNames::new();
        let normal = normalize(&t, &rules, 1000, &mut names);
        prop_assert!(normal.complete);
        prop_assert!(normal.term.size() <= t.size());
        prop_assert_eq!(normalize(&normal.term, &rules, 1000, &mut names).steps, 0);
        prop_assert_eq!(names.high_water(), 0);
    }
}
