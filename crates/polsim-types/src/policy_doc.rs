use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk policy document.
///
/// This is the *raw* shape as read from JSON: rule fields are optional here so that a
/// missing `decision` or `reason` can be reported with its rule index instead of as an
/// opaque parse error. The domain turns it into a validated `Policy`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyDocument {
    /// Rules in evaluation order; the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSpec {
    /// Attribute name -> required value. Empty matches every request.
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,

    /// `permitted`, `denied`, or another named outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RuleSpec {
    pub fn new(conditions: &[(&str, &str)], decision: &str, reason: &str) -> Self {
        Self {
            conditions: conditions
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            decision: Some(decision.to_string()),
            reason: Some(reason.to_string()),
        }
    }
}

/// JSON schema for the policy document, for editors and CI validation.
pub fn policy_document_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(PolicyDocument);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}
