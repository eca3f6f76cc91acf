use std::collections::BTreeSet;

/// What to do with a command whose exit code is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InclusionPolicy {
    /// Render every command; disallowed ones are only noted in the debug log.
    #[default]
    RenderAll,
    /// Leave disallowed commands out of the runbook.
    OmitDisallowed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunbookOptions {
    /// Exit codes that count as success.
    pub allowed_exit_codes: BTreeSet<i64>,
    pub inclusion: InclusionPolicy,
}

impl Default for RunbookOptions {
    fn default() -> Self {
        Self {
            allowed_exit_codes: BTreeSet::from([0]),
            inclusion: InclusionPolicy::default(),
        }
    }
}

impl RunbookOptions {
    pub fn is_allowed(&self, exit_code: i64) -> bool {
        self.allowed_exit_codes.contains(&exit_code)
    }
}
