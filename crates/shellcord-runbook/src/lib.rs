mod options;
mod render;

pub use options::{InclusionPolicy, RunbookOptions};
pub use render::{render_runbook, write_runbook, RunbookError};
