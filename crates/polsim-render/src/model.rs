#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableChange {
    pub resource: String,
    pub action: String,
    /// New decision, e.g. `denied` or `permitted`.
    pub outcome: String,
    pub why: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableUser {
    pub user_id: String,
    pub changes: Vec<RenderableChange>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub requests_evaluated: u32,
    pub requests_changed: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableImpact {
    pub lost_access: Vec<RenderableUser>,
    pub gained_access: Vec<RenderableUser>,
    pub data: RenderableData,
}

impl RenderableImpact {
    pub fn has_changes(&self) -> bool {
        !self.lost_access.is_empty() || !self.gained_access.is_empty()
    }
}
