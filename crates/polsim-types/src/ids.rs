//! Stable strings that show up in reports and are compared by downstream tooling.

/// Reason returned when no rule in a policy matches a request.
pub const REASON_NO_MATCHING_RULE: &str = "Denied: The request did not match any policy rule.";

/// Explanation attached to a change whose new decision permits the request.
///
/// The new policy's own reason is not surfaced for permits.
pub const EXPLANATION_PERMITTED_BY_NEW_POLICY: &str = "Permitted by new policy rule.";

// Decision values
pub const DECISION_PERMITTED: &str = "permitted";
pub const DECISION_DENIED: &str = "denied";

// Request attributes supplied by the request log
pub const ATTR_ROLE: &str = "role";
pub const ATTR_DEPARTMENT: &str = "department";
pub const ATTR_RESOURCE: &str = "resource";
pub const ATTR_ACTION: &str = "action";

/// Column holding the user identity in the request log.
pub const COLUMN_USER_ID: &str = "user_id";
