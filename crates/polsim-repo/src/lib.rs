//! Filesystem adapters: policy documents and the historical request log.
//!
//! Everything here validates its input before handing it to the domain, so the
//! evaluator only ever sees complete rules and well-formed requests.

#![forbid(unsafe_code)]

mod log;
mod policy;

pub use log::{parse_request_log, read_request_log, RequestLogError, REQUIRED_COLUMNS};
pub use policy::{load_policy, parse_policy_json, PolicyLoadError};
