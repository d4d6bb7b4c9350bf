use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "polsim.config.v1";

/// `polsim.toml` schema v1.
///
/// Every field is optional; command-line flags take precedence over it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolsimConfigV1 {
    /// Optional schema marker; when present it must be `polsim.config.v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Historical request log (CSV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,

    /// Where to write the Markdown impact report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,

    /// Where to write the JSON impact report; not written when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_out: Option<String>,

    /// Exit with status 2 when any access change is detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_change: Option<bool>,

    /// Evaluate requests on a thread pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}
