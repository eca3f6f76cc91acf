use anyhow::Context;
use shellcord_log::{find_latest_log, SessionLog};
use shellcord_runbook::{write_runbook, InclusionPolicy, RunbookOptions};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub struct GenerateParams<'a> {
    pub cwd: &'a Path,
    pub log_file: Option<&'a Path>,
    pub out_file: Option<&'a Path>,
    pub allowed_exit_codes: &'a [i64],
    pub omit_failed: bool,
}

impl GenerateParams<'_> {
    fn runbook_options(&self) -> RunbookOptions {
        let mut opts = RunbookOptions::default();
        if !self.allowed_exit_codes.is_empty() {
            opts.allowed_exit_codes = self
                .allowed_exit_codes
                .iter()
                .copied()
                .collect::<BTreeSet<_>>();
        }
        if self.omit_failed {
            opts.inclusion = InclusionPolicy::OmitDisallowed;
        }
        opts
    }
}

/// `shellcord generate`
pub fn execute(params: &GenerateParams<'_>) -> anyhow::Result<PathBuf> {
    let log_path = match params.log_file {
        Some(p) => p.to_path_buf(),
        None => find_latest_log(params.cwd)?,
    };
    tracing::debug!(log = %log_path.display(), "generating runbook");

    let log = SessionLog::parse_file(&log_path)
        .with_context(|| format!("cannot build runbook from {}", log_path.display()))?;

    let out_path = match params.out_file {
        Some(p) => p.to_path_buf(),
        None => params.cwd.join(log.derived_output_name()),
    };
    write_runbook(&out_path, &log, &params.runbook_options())?;

    println!(
        "Wrote runbook for session {} ({} commands) to {}",
        log.session_id(),
        log.commands().len(),
        out_path.display()
    );
    Ok(out_path)
}
