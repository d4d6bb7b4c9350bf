use crate::model::Request;
use crate::policy::Policy;
use polsim_types::{ids, Decision};

static FALLBACK_DECISION: Decision = Decision::Denied;

/// Result of evaluating one request. Borrows from the policy; nothing is allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation<'p> {
    pub decision: &'p Decision,
    pub reason: &'p str,
    /// Index of the deciding rule, or `None` for the fallback.
    pub rule_index: Option<usize>,
}

impl Evaluation<'_> {
    pub fn is_fallback(&self) -> bool {
        self.rule_index.is_none()
    }
}

/// Evaluate `request` against `policy`: the first rule whose conditions all match
/// decides. With no match the result is `denied` with the fixed fallback reason.
pub fn evaluate<'p>(policy: &'p Policy, request: &Request) -> Evaluation<'p> {
    policy
        .rules()
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(request))
        .map(|(i, rule)| Evaluation {
            decision: rule.decision(),
            reason: rule.reason(),
            rule_index: Some(i),
        })
        .unwrap_or(Evaluation {
            decision: &FALLBACK_DECISION,
            reason: ids::REASON_NO_MATCHING_RULE,
            rule_index: None,
        })
}
