use crate::model::Request;
use polsim_types::{Decision, PolicyDocument, RuleSpec};
use std::collections::BTreeMap;

/// A rule record lacks a field the evaluator depends on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rule {rule_index} is missing required field `{field}`")]
pub struct MalformedPolicy {
    /// Zero-based position of the rule in the policy.
    pub rule_index: usize,
    pub field: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    conditions: BTreeMap<String, String>,
    decision: Decision,
    reason: String,
}

impl Rule {
    pub fn new<I, K, V>(conditions: I, decision: impl Into<Decision>, reason: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            conditions: conditions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            decision: decision.into(),
            reason: reason.to_string(),
        }
    }

    /// A rule with no conditions; matches every request.
    pub fn catch_all(decision: impl Into<Decision>, reason: &str) -> Self {
        Self::new(std::iter::empty::<(String, String)>(), decision, reason)
    }

    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn matches(&self, request: &Request) -> bool {
        self.conditions
            .iter()
            .all(|(key, expected)| request.get(key) == Some(expected.as_str()))
    }

    fn from_spec(rule_index: usize, spec: RuleSpec) -> Result<Self, MalformedPolicy> {
        let decision = spec.decision.ok_or(MalformedPolicy {
            rule_index,
            field: "decision",
        })?;
        let reason = spec.reason.ok_or(MalformedPolicy {
            rule_index,
            field: "reason",
        })?;
        Ok(Self {
            conditions: spec.conditions,
            decision: Decision::from(decision),
            reason,
        })
    }
}

/// An ordered rule set. Order matters: the first matching rule decides.
///
/// A `Policy` only ever holds complete rules; raw records are checked by
/// [`Policy::from_specs`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: Vec<RuleSpec>) -> Result<Self, MalformedPolicy> {
        let rules = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Rule::from_spec(i, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn from_document(doc: PolicyDocument) -> Result<Self, MalformedPolicy> {
        Self::from_specs(doc.rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_specs_keeps_rule_order() {
        let policy = Policy::from_specs(vec![
            RuleSpec::new(&[("role", "intern")], "denied", "interns blocked"),
            RuleSpec::new(&[], "permitted", "open access"),
        ])
        .expect("valid policy");

        assert_eq!(policy.len(), 2);
        assert_eq!(policy.rules()[0].reason(), "interns blocked");
        assert_eq!(policy.rules()[1].decision(), &Decision::Permitted);
    }

    #[test]
    fn missing_decision_reports_rule_index() {
        let mut broken = RuleSpec::new(&[("role", "admin")], "permitted", "admins");
        broken.decision = None;

        let err = Policy::from_specs(vec![
            RuleSpec::new(&[], "denied", "first"),
            broken,
        ])
        .expect_err("missing decision must be rejected");

        assert_eq!(
            err,
            MalformedPolicy {
                rule_index: 1,
                field: "decision"
            }
        );
        assert_eq!(
            err.to_string(),
            "rule 1 is missing required field `decision`"
        );
    }

    #[test]
    fn missing_reason_is_rejected() {
        let mut broken = RuleSpec::new(&[], "denied", "x");
        broken.reason = None;

        let err = Policy::from_specs(vec![broken]).expect_err("missing reason");
        assert_eq!(err.field, "reason");
        assert_eq!(err.rule_index, 0);
    }

    #[test]
    fn rule_with_absent_attribute_does_not_match() {
        let rule = Rule::new([("clearance", "secret")], "permitted", "cleared");
        let request = Request::new("analyst", "intel", "files", "read");
        assert!(!rule.matches(&request));

        let request = request.with_attribute("clearance", "secret");
        assert!(rule.matches(&request));
    }
}
