//! Conversions from the domain report to the render model and the JSON envelope.

use polsim_domain::{partition, ImpactRecord, ImpactReport, SimulationStats, UserChanges};
use polsim_render::{RenderableChange, RenderableData, RenderableImpact, RenderableUser};
use polsim_types::{
    ImpactChange, ImpactReportEnvelope, ImpactSummary, PolicyPair, RunMeta, ToolMeta, UserImpact,
    SCHEMA_IMPACT_REPORT_V1,
};
use time::OffsetDateTime;

pub fn to_renderable(report: &ImpactReport, stats: &SimulationStats) -> RenderableImpact {
    let views = partition(report);
    RenderableImpact {
        lost_access: renderable_users(&views.lost_access),
        gained_access: renderable_users(&views.gained_access),
        data: RenderableData {
            requests_evaluated: count(stats.requests_evaluated),
            requests_changed: count(stats.requests_changed),
        },
    }
}

/// Report counters are `u32`; counts beyond that saturate instead of wrapping.
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn renderable_users(users: &[UserChanges<'_>]) -> Vec<RenderableUser> {
    users
        .iter()
        .map(|u| RenderableUser {
            user_id: u.user_id.to_string(),
            changes: u
                .records
                .iter()
                .map(|r| RenderableChange {
                    resource: r.resource.clone(),
                    action: r.action.clone(),
                    outcome: r.transition.to.to_string(),
                    why: r.explanation.clone(),
                })
                .collect(),
        })
        .collect()
}

pub fn build_envelope(
    report: &ImpactReport,
    stats: &SimulationStats,
    policies: PolicyPair,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> ImpactReportEnvelope {
    let views = partition(report);
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    ImpactReportEnvelope {
        schema: SCHEMA_IMPACT_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "polsim".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            finished_at,
            duration_ms,
        },
        policies,
        summary: ImpactSummary {
            requests_evaluated: count(stats.requests_evaluated),
            requests_changed: count(stats.requests_changed),
            users_affected: count(stats.users_affected),
            users_losing_access: count(views.lost_access.len()),
            users_gaining_access: count(views.gained_access.len()),
        },
        users: report
            .users()
            .iter()
            .map(|u| UserImpact {
                user_id: u.user_id.clone(),
                changes: u.records.iter().map(impact_change).collect(),
            })
            .collect(),
    }
}

fn impact_change(record: &ImpactRecord) -> ImpactChange {
    ImpactChange {
        resource: record.resource.clone(),
        action: record.action.clone(),
        change: record.transition.to_string(),
        from: record.transition.from.to_string(),
        to: record.transition.to.to_string(),
        why: record.explanation.clone(),
    }
}

pub fn serialize_report(report: &ImpactReportEnvelope) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report)?;
    data.push(b'\n');
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polsim_domain::{simulate, Policy, Request, RequestRecord, Rule};
    use time::macros::datetime;

    fn sample() -> (ImpactReport, SimulationStats) {
        let old = Policy::new(vec![Rule::new(
            [("role", "intern")],
            "denied",
            "interns blocked",
        )]);
        let new = Policy::new(vec![
            Rule::new([("action", "write")], "denied", "read only"),
            Rule::catch_all("permitted", "open access"),
        ]);
        let records = vec![
            RequestRecord::new("u1", Request::new("intern", "eng", "db", "read")),
            RequestRecord::new("u2", Request::new("admin", "ops", "db", "write")),
            RequestRecord::new("u3", Request::new("intern", "eng", "db", "write")),
        ];
        let report = simulate(&old, &new, &records);
        let stats = SimulationStats::from_run(records.len(), &report);
        (report, stats)
    }

    #[test]
    fn counts_saturate_at_u32_max() {
        assert_eq!(count(7), 7);
        assert_eq!(count(u32::MAX as usize), u32::MAX);
        assert_eq!(count(usize::MAX), u32::MAX);
    }

    #[test]
    fn renderable_splits_views() {
        let (report, stats) = sample();
        let renderable = to_renderable(&report, &stats);

        // u2: fallback denied -> denied ("read only"): unchanged.
        // u3: denied -> denied: unchanged.
        assert!(renderable.lost_access.is_empty());
        assert_eq!(renderable.gained_access.len(), 1);
        assert_eq!(renderable.gained_access[0].user_id, "u1");
        assert_eq!(renderable.gained_access[0].changes[0].outcome, "permitted");
        assert_eq!(renderable.data.requests_evaluated, 3);
        assert_eq!(renderable.data.requests_changed, 1);
    }

    #[test]
    fn envelope_serializes_changes() {
        let (report, stats) = sample();
        let envelope = build_envelope(
            &report,
            &stats,
            PolicyPair {
                old: "old.json".to_string(),
                new: "new.json".to_string(),
                log: "access_logs.csv".to_string(),
            },
            datetime!(2024-05-01 10:00:00 UTC),
            datetime!(2024-05-01 10:00:01 UTC),
        );

        assert_eq!(envelope.run.duration_ms, 1000);
        assert_eq!(envelope.summary.users_gaining_access, 1);

        let bytes = serialize_report(&envelope).expect("serialize");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["schema"], "polsim.impact.v1");
        assert_eq!(value["run"]["started_at"], "2024-05-01T10:00:00Z");
        assert_eq!(value["users"][0]["user_id"], "u1");
        assert_eq!(value["users"][0]["changes"][0]["change"], "denied -> permitted");
        assert_eq!(
            value["users"][0]["changes"][0]["why"],
            "Permitted by new policy rule."
        );
    }
}
