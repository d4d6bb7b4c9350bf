use crate::ids;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating a request against a policy.
///
/// `permitted` and `denied` are the well-known values; any other string is kept as a
/// named outcome. Every non-`denied` outcome is treated as permitting.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Decision {
    Permitted,
    Denied,
    Other(String),
}

impl Decision {
    pub fn as_str(&self) -> &str {
        match self {
            Decision::Permitted => ids::DECISION_PERMITTED,
            Decision::Denied => ids::DECISION_DENIED,
            Decision::Other(s) => s.as_str(),
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Denied)
    }

    pub fn is_permitting(&self) -> bool {
        !self.is_denied()
    }
}

impl From<&str> for Decision {
    fn from(value: &str) -> Self {
        match value {
            ids::DECISION_PERMITTED => Decision::Permitted,
            ids::DECISION_DENIED => Decision::Denied,
            other => Decision::Other(other.to_string()),
        }
    }
}

impl From<String> for Decision {
    fn from(value: String) -> Self {
        match value.as_str() {
            ids::DECISION_PERMITTED => Decision::Permitted,
            ids::DECISION_DENIED => Decision::Denied,
            _ => Decision::Other(value),
        }
    }
}

impl From<Decision> for String {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
