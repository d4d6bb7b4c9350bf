//! Stable DTOs and IDs used across the polsim workspace.
//!
//! This crate is intentionally boring:
//! - the `Decision` value type
//! - the on-disk policy document shape
//! - stable strings (fallback reason, permit explanation, schema ids)
//! - the JSON impact report envelope

#![forbid(unsafe_code)]

pub mod decision;
pub mod ids;
pub mod policy_doc;
pub mod receipt;

pub use decision::Decision;
pub use policy_doc::{policy_document_schema, PolicyDocument, RuleSpec};
pub use receipt::{
    ImpactChange, ImpactReportEnvelope, ImpactSummary, PolicyPair, RunMeta, ToolMeta, UserImpact,
    SCHEMA_IMPACT_REPORT_V1,
};
