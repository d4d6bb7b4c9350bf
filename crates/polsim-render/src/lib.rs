//! Rendering for the impact report (Markdown file, one-line terminal summary).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod summary;

pub use markdown::render_markdown;
pub use model::{RenderableChange, RenderableData, RenderableImpact, RenderableUser};
pub use summary::render_summary;
