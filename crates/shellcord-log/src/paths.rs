use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;

use crate::error::LogError;

static LOG_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^scord-log-\w+\.json$").unwrap());

/// Output file name for a session's runbook.
pub fn runbook_file_name(session_id: &str) -> String {
    format!("scord-runbook-{session_id}.md")
}

/// Whether a file name looks like a scord log (`scord-log-<word>.json`).
pub fn is_log_file_name(name: &str) -> bool {
    LOG_FILE_PATTERN.is_match(name)
}

/// Find the most recently created scord log directly inside `dir`.
pub fn find_latest_log(dir: &Path) -> Result<PathBuf, LogError> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| LogError::io("listing log directory", dir, e))?;

    let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LogError::io("listing log directory", dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !is_log_file_name(name) {
            continue;
        }
        let meta = entry
            .metadata()
            .map_err(|e| LogError::io("reading metadata", entry.path(), e))?;
        if !meta.is_file() {
            continue;
        }
        tracing::debug!(file = name, "found scord log candidate");
        // Not every filesystem records birth time.
        let stamp = meta
            .created()
            .or_else(|_| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.push((stamp, entry.path()));
    }

    let count = candidates.len();
    let (_, newest) = candidates
        .into_iter()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .ok_or_else(|| LogError::NoLogFileFound {
            dir: dir.to_path_buf(),
        })?;
    tracing::debug!(count, file = %newest.display(), "taking the newest scord log");
    Ok(newest)
}
