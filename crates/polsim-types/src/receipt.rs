use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the JSON impact report.
pub const SCHEMA_IMPACT_REPORT_V1: &str = "polsim.impact.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,
}

/// Paths of the two policies that were compared, as given on the command line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyPair {
    pub old: String,
    pub new: String,
    pub log: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImpactSummary {
    pub requests_evaluated: u32,
    pub requests_changed: u32,
    pub users_affected: u32,
    pub users_losing_access: u32,
    pub users_gaining_access: u32,
}

/// One request whose decision changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImpactChange {
    pub resource: String,
    pub action: String,
    /// `"<old> -> <new>"`.
    pub change: String,
    pub from: String,
    pub to: String,
    pub why: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserImpact {
    pub user_id: String,
    pub changes: Vec<ImpactChange>,
}

/// The JSON impact report written next to the Markdown report.
///
/// `users` keeps the order in which users first appear in the request log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImpactReportEnvelope {
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub policies: PolicyPair,
    pub summary: ImpactSummary,
    pub users: Vec<UserImpact>,
}
