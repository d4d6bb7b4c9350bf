//! Split an impact report into "lost access" and "gained access" views.

use crate::simulate::{ImpactRecord, ImpactReport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserChanges<'r> {
    pub user_id: &'r str,
    pub records: Vec<&'r ImpactRecord>,
}

/// The impact report seen from both directions.
///
/// A user is listed in a view only when they have at least one record for it, and may
/// be listed in both. Users keep the report's order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionedReport<'r> {
    /// Changes whose new decision is `denied`.
    pub lost_access: Vec<UserChanges<'r>>,
    /// Changes whose new decision permits the request.
    pub gained_access: Vec<UserChanges<'r>>,
}

impl PartitionedReport<'_> {
    /// No access changes in either direction.
    pub fn is_empty(&self) -> bool {
        self.lost_access.is_empty() && self.gained_access.is_empty()
    }
}

pub fn partition(report: &ImpactReport) -> PartitionedReport<'_> {
    let mut out = PartitionedReport::default();

    for user in report.users() {
        let (lost, gained): (Vec<&ImpactRecord>, Vec<&ImpactRecord>) =
            user.records.iter().partition(|r| r.loses_access());

        if !lost.is_empty() {
            out.lost_access.push(UserChanges {
                user_id: &user.user_id,
                records: lost,
            });
        }
        if !gained.is_empty() {
            out.gained_access.push(UserChanges {
                user_id: &user.user_id,
                records: gained,
            });
        }
    }

    out
}
