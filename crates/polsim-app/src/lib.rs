//! Use case orchestration for polsim.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod eval;
mod report;
mod simulate;

pub use eval::{format_evaluation, run_eval, EvalInput, EvalOutput};
pub use polsim_render::{render_markdown, render_summary, RenderableImpact};
pub use report::{build_envelope, serialize_report, to_renderable};
pub use simulate::{run_simulation, SimulationInput, SimulationOutput};

/// Map a simulation outcome to an exit code: 0 = no changes or not gating, 2 = changes found.
pub fn change_exit_code(has_changes: bool, fail_on_change: bool) -> i32 {
    if has_changes && fail_on_change { 2 } else { 0 }
}
