//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Evaluation determinism, first-match priority and the fallback
//! - Simulation over identical policies and per-user ordering

use crate::engine::evaluate;
use crate::model::{Request, RequestRecord};
use crate::policy::{Policy, Rule};
use crate::simulate::simulate;
use polsim_types::{ids, Decision};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Small value pools so that generated rules actually match generated requests.
fn arb_role() -> impl Strategy<Value = String> {
    prop_oneof![Just("intern"), Just("engineer"), Just("admin")].prop_map(String::from)
}

fn arb_department() -> impl Strategy<Value = String> {
    prop_oneof![Just("eng"), Just("sales"), Just("ops")].prop_map(String::from)
}

fn arb_resource() -> impl Strategy<Value = String> {
    prop_oneof![Just("db"), Just("wiki"), Just("crm")].prop_map(String::from)
}

fn arb_action() -> impl Strategy<Value = String> {
    prop_oneof![Just("read"), Just("write")].prop_map(String::from)
}

fn arb_decision() -> impl Strategy<Value = Decision> {
    prop_oneof![
        3 => Just(Decision::Permitted),
        3 => Just(Decision::Denied),
        1 => Just(Decision::Other("needs_review".to_string())),
    ]
}

fn arb_request() -> impl Strategy<Value = Request> {
    (arb_role(), arb_department(), arb_resource(), arb_action())
        .prop_map(|(role, dept, res, act)| Request::new(&role, &dept, &res, &act))
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    (
        prop::option::of(arb_role()),
        prop::option::of(arb_department()),
        prop::option::of(arb_resource()),
        prop::option::of(arb_action()),
        arb_decision(),
        "[a-z ]{1,20}",
    )
        .prop_map(|(role, dept, res, act, decision, reason)| {
            let conditions = [
                (ids::ATTR_ROLE, role),
                (ids::ATTR_DEPARTMENT, dept),
                (ids::ATTR_RESOURCE, res),
                (ids::ATTR_ACTION, act),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)));
            Rule::new(conditions, decision, &reason)
        })
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop::collection::vec(arb_rule(), 0..8).prop_map(Policy::new)
}

fn arb_records() -> impl Strategy<Value = Vec<RequestRecord>> {
    prop::collection::vec(
        (prop_oneof![Just("u1"), Just("u2"), Just("u3")], arb_request()),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(user, request)| RequestRecord::new(user, request))
            .collect()
    })
}

// ============================================================================
// Evaluation
// ============================================================================

proptest! {
    /// Same policy and request always produce the same evaluation.
    #[test]
    fn evaluation_is_deterministic(policy in arb_policy(), request in arb_request()) {
        let first = evaluate(&policy, &request);
        let second = evaluate(&policy, &request);
        prop_assert_eq!(first, second);
    }

    /// The deciding rule is the first matching one, and no earlier rule matches.
    #[test]
    fn first_matching_rule_decides(policy in arb_policy(), request in arb_request()) {
        let eval = evaluate(&policy, &request);
        let first_match = policy.rules().iter().position(|r| r.matches(&request));

        prop_assert_eq!(eval.rule_index, first_match);
        if let Some(i) = first_match {
            prop_assert_eq!(eval.decision, policy.rules()[i].decision());
            prop_assert_eq!(eval.reason, policy.rules()[i].reason());
        }
    }

    /// When nothing matches, the result is always the fixed fallback pair.
    #[test]
    fn unmatched_requests_fall_back(rules in prop::collection::vec(arb_rule(), 0..8), request in arb_request()) {
        let policy = Policy::new(rules.into_iter().filter(|r| !r.matches(&request)).collect());
        let eval = evaluate(&policy, &request);

        prop_assert_eq!(eval.decision, &Decision::Denied);
        prop_assert_eq!(eval.reason, ids::REASON_NO_MATCHING_RULE);
    }

    /// A leading catch-all rule decides every request.
    #[test]
    fn catch_all_matches_everything(decision in arb_decision(), tail in arb_policy(), request in arb_request()) {
        let mut rules = vec![Rule::catch_all(decision.clone(), "catch all")];
        rules.extend(tail.rules().iter().cloned());
        let policy = Policy::new(rules);

        let eval = evaluate(&policy, &request);
        prop_assert_eq!(eval.decision, &decision);
        prop_assert_eq!(eval.rule_index, Some(0));
    }
}

// ============================================================================
// Simulation
// ============================================================================

proptest! {
    /// Comparing a policy with itself never reports a change.
    #[test]
    fn identical_policies_produce_empty_report(policy in arb_policy(), records in arb_records()) {
        let report = simulate(&policy, &policy.clone(), &records);
        prop_assert!(report.is_empty());
    }

    /// Every record corresponds to a decision change, in log order per user.
    #[test]
    fn records_follow_log_order(old in arb_policy(), new in arb_policy(), records in arb_records()) {
        let report = simulate(&old, &new, &records);

        for user in report.users() {
            let expected: Vec<(String, String)> = records
                .iter()
                .filter(|r| r.user_id == user.user_id)
                .filter(|r| evaluate(&old, &r.request).decision != evaluate(&new, &r.request).decision)
                .map(|r| (r.request.resource().to_string(), r.request.action().to_string()))
                .collect();
            let actual: Vec<(String, String)> = user
                .records
                .iter()
                .map(|r| (r.resource.clone(), r.action.clone()))
                .collect();
            prop_assert!(!actual.is_empty());
            prop_assert_eq!(actual, expected);
        }
    }

    /// Permits never surface the new policy's reason; denials always do.
    #[test]
    fn explanation_is_asymmetric(old in arb_policy(), new in arb_policy(), records in arb_records()) {
        let report = simulate(&old, &new, &records);

        for user in report.users() {
            for record in &user.records {
                prop_assert_ne!(&record.transition.from, &record.transition.to);
                if record.transition.to.is_permitting() {
                    prop_assert_eq!(record.explanation.as_str(), ids::EXPLANATION_PERMITTED_BY_NEW_POLICY);
                    prop_assert!(!record.loses_access());
                } else {
                    prop_assert_ne!(record.explanation.as_str(), ids::EXPLANATION_PERMITTED_BY_NEW_POLICY);
                    prop_assert!(record.loses_access());
                }
            }
        }
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #[test]
    fn parallel_simulation_matches_sequential(old in arb_policy(), new in arb_policy(), records in arb_records()) {
        prop_assert_eq!(
            simulate(&old, &new, &records),
            crate::simulate::simulate_par(&old, &new, &records)
        );
    }
}
