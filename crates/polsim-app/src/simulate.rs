//! The `simulate` use case: load both policies and the request log, diff, and report.

use anyhow::Context;
use camino::Utf8Path;
use polsim_domain::{ImpactReport, SimulationStats};
use polsim_render::RenderableImpact;
use polsim_types::{ImpactReportEnvelope, PolicyPair};
use time::OffsetDateTime;

use crate::report::{build_envelope, to_renderable};

/// Input for the simulate use case.
#[derive(Clone, Debug)]
pub struct SimulationInput<'a> {
    /// Policy currently in force.
    pub old_policy: &'a Utf8Path,
    /// Candidate policy.
    pub new_policy: &'a Utf8Path,
    /// Historical request log (CSV).
    pub log: &'a Utf8Path,
    /// Evaluate requests on the rayon pool.
    pub parallel: bool,
}

/// Output from the simulate use case.
#[derive(Clone, Debug)]
pub struct SimulationOutput {
    pub report: ImpactReport,
    pub stats: SimulationStats,
    /// Partitioned view ready for the Markdown renderer.
    pub renderable: RenderableImpact,
    /// JSON report envelope.
    pub envelope: ImpactReportEnvelope,
}

impl SimulationOutput {
    pub fn has_changes(&self) -> bool {
        self.renderable.has_changes()
    }
}

/// Run the simulate use case.
///
/// Both policies are loaded before the log is read, so a bad policy fails the run
/// before anything is evaluated.
pub fn run_simulation(input: SimulationInput<'_>) -> anyhow::Result<SimulationOutput> {
    let started_at = OffsetDateTime::now_utc();

    let old = polsim_repo::load_policy(input.old_policy).context("load old policy")?;
    let new = polsim_repo::load_policy(input.new_policy).context("load new policy")?;
    let records = polsim_repo::read_request_log(input.log).context("read request log")?;

    tracing::info!(
        old_rules = old.len(),
        new_rules = new.len(),
        requests = records.len(),
        parallel = input.parallel,
        "simulating policy change"
    );

    let report = if input.parallel {
        polsim_domain::simulate_par(&old, &new, &records)
    } else {
        polsim_domain::simulate(&old, &new, &records)
    };
    let stats = SimulationStats::from_run(records.len(), &report);

    let finished_at = OffsetDateTime::now_utc();
    tracing::info!(
        changed = stats.requests_changed,
        users = stats.users_affected,
        "simulation finished"
    );

    let renderable = to_renderable(&report, &stats);
    let envelope = build_envelope(
        &report,
        &stats,
        PolicyPair {
            old: input.old_policy.to_string(),
            new: input.new_policy.to_string(),
            log: input.log.to_string(),
        },
        started_at,
        finished_at,
    );

    Ok(SimulationOutput {
        report,
        stats,
        renderable,
        envelope,
    })
}
