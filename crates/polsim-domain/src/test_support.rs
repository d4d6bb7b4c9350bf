use crate::model::{Request, RequestRecord};
use crate::policy::{Policy, Rule};

pub fn record(user: &str, role: &str, department: &str, resource: &str, action: &str) -> RequestRecord {
    RequestRecord::new(user, Request::new(role, department, resource, action))
}

pub fn intern_record(user: &str) -> RequestRecord {
    record(user, "intern", "eng", "db", "read")
}

pub fn interns_blocked() -> Policy {
    Policy::new(vec![Rule::new(
        [("role", "intern")],
        "denied",
        "interns blocked",
    )])
}
