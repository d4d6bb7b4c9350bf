use crate::RenderableImpact;

/// One line for the terminal after a run.
pub fn render_summary(report: &RenderableImpact) -> String {
    if !report.has_changes() {
        return format!(
            "polsim: {} requests evaluated, no access changes",
            report.data.requests_evaluated
        );
    }
    format!(
        "polsim: {} requests evaluated, {} changed; {} users lose access, {} users gain access",
        report.data.requests_evaluated,
        report.data.requests_changed,
        report.lost_access.len(),
        report.gained_access.len()
    )
}
