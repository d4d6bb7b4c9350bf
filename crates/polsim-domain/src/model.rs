use polsim_types::ids;
use std::collections::BTreeMap;

/// Attributes of a single access request.
///
/// The request log supplies `role`, `department`, `resource` and `action`; any other
/// attribute is carried along and only consulted when a rule names it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    attributes: BTreeMap<String, String>,
}

impl Request {
    pub fn new(role: &str, department: &str, resource: &str, action: &str) -> Self {
        Self::default()
            .with_attribute(ids::ATTR_ROLE, role)
            .with_attribute(ids::ATTR_DEPARTMENT, department)
            .with_attribute(ids::ATTR_RESOURCE, resource)
            .with_attribute(ids::ATTR_ACTION, action)
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Absent keys return `None`, which never equals a required value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn resource(&self) -> &str {
        self.get(ids::ATTR_RESOURCE).unwrap_or_default()
    }

    pub fn action(&self) -> &str {
        self.get(ids::ATTR_ACTION).unwrap_or_default()
    }
}

/// One line of the historical request log: who asked, and what they asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestRecord {
    pub user_id: String,
    pub request: Request,
}

impl RequestRecord {
    pub fn new(user_id: &str, request: Request) -> Self {
        Self {
            user_id: user_id.to_string(),
            request,
        }
    }
}
