use crate::engine::evaluate;
use crate::model::{Request, RequestRecord};
use crate::policy::Policy;
use polsim_types::{ids, Decision};
use std::collections::BTreeMap;
use std::fmt;

/// Old decision -> new decision for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Decision,
    pub to: Decision,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A request whose decision differs between the old and new policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImpactRecord {
    pub resource: String,
    pub action: String,
    pub transition: Transition,
    /// New policy's reason for denials; a fixed phrase for permits.
    pub explanation: String,
}

impl ImpactRecord {
    pub fn loses_access(&self) -> bool {
        !self.transition.to.is_permitting()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserImpacts {
    pub user_id: String,
    pub records: Vec<ImpactRecord>,
}

/// Impact records grouped by user.
///
/// Users are kept in order of their first record and each user's records in push
/// order, independent of any map iteration order. A user with no records is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImpactReport {
    users: Vec<UserImpacts>,
    index: BTreeMap<String, usize>,
}

impl ImpactReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user_id: &str, record: ImpactRecord) {
        match self.index.get(user_id) {
            Some(&slot) => self.users[slot].records.push(record),
            None => {
                self.index.insert(user_id.to_string(), self.users.len());
                self.users.push(UserImpacts {
                    user_id: user_id.to_string(),
                    records: vec![record],
                });
            }
        }
    }

    pub fn users(&self) -> &[UserImpacts] {
        &self.users
    }

    pub fn get(&self, user_id: &str) -> Option<&[ImpactRecord]> {
        self.index
            .get(user_id)
            .map(|&slot| self.users[slot].records.as_slice())
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.index.contains_key(user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn record_count(&self) -> usize {
        self.users.iter().map(|u| u.records.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub requests_evaluated: usize,
    pub requests_changed: usize,
    pub users_affected: usize,
}

impl SimulationStats {
    pub fn from_run(requests_evaluated: usize, report: &ImpactReport) -> Self {
        Self {
            requests_evaluated,
            requests_changed: report.record_count(),
            users_affected: report.user_count(),
        }
    }
}

/// Compare the decisions of both policies for one request. Reasons never drive the
/// comparison; `None` means the decision is unchanged.
pub fn diff_request(old: &Policy, new: &Policy, request: &Request) -> Option<ImpactRecord> {
    let before = evaluate(old, request);
    let after = evaluate(new, request);

    if before.decision == after.decision {
        return None;
    }

    let explanation = if after.decision.is_permitting() {
        ids::EXPLANATION_PERMITTED_BY_NEW_POLICY.to_string()
    } else {
        after.reason.to_string()
    };

    Some(ImpactRecord {
        resource: request.resource().to_string(),
        action: request.action().to_string(),
        transition: Transition {
            from: before.decision.clone(),
            to: after.decision.clone(),
        },
        explanation,
    })
}

/// Run both policies over every record and collect the decision changes by user.
pub fn simulate(old: &Policy, new: &Policy, records: &[RequestRecord]) -> ImpactReport {
    group(
        records
            .iter()
            .map(|r| (r, diff_request(old, new, &r.request))),
    )
}

/// Same result as [`simulate`], with requests evaluated on the rayon pool.
///
/// Diffs are collected in input order before grouping, so per-user order matches the log.
#[cfg(feature = "parallel")]
pub fn simulate_par(old: &Policy, new: &Policy, records: &[RequestRecord]) -> ImpactReport {
    use rayon::prelude::*;

    let diffs: Vec<Option<ImpactRecord>> = records
        .par_iter()
        .map(|r| diff_request(old, new, &r.request))
        .collect();

    group(records.iter().zip(diffs))
}

fn group<'a>(
    diffs: impl IntoIterator<Item = (&'a RequestRecord, Option<ImpactRecord>)>,
) -> ImpactReport {
    let mut report = ImpactReport::new();
    for (record, diff) in diffs {
        if let Some(impact) = diff {
            report.push(&record.user_id, impact);
        }
    }
    report
}
