//! The `eval` use case: evaluate one request against one policy.

use anyhow::Context;
use camino::Utf8Path;
use polsim_domain::{evaluate, Request};

#[derive(Clone, Debug)]
pub struct EvalInput<'a> {
    pub policy: &'a Utf8Path,
    pub request: Request,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOutput {
    pub decision: String,
    pub reason: String,
    /// Zero-based index of the deciding rule; `None` when nothing matched.
    pub rule_index: Option<usize>,
}

pub fn run_eval(input: EvalInput<'_>) -> anyhow::Result<EvalOutput> {
    let policy = polsim_repo::load_policy(input.policy).context("load policy")?;
    let eval = evaluate(&policy, &input.request);

    tracing::debug!(rule = ?eval.rule_index, decision = %eval.decision, "evaluated request");

    Ok(EvalOutput {
        decision: eval.decision.to_string(),
        reason: eval.reason.to_string(),
        rule_index: eval.rule_index,
    })
}

pub fn format_evaluation(out: &EvalOutput) -> String {
    let source = match out.rule_index {
        Some(i) => format!("rule {i}"),
        None => "no rule matched".to_string(),
    };
    format!("{}: {} ({})\n", out.decision, out.reason, source)
}
