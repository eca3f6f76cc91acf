use std::path::{Path, PathBuf};

use shellcord_core::CommandRecord;
use shellcord_log::SessionLog;
use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::options::{InclusionPolicy, RunbookOptions};

const TRIPLE_TICKS: &str = "```";
const FOOTER_BREAKS: usize = 5;
const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Error)]
pub enum RunbookError {
    #[error("failed to write runbook to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render a session as a markdown runbook.
///
/// Each command becomes a level-3 heading (its tag label, or
/// `Command #<n>` with `n` the 0-based index into `log.commands()`) followed
/// by a bash code block. Numbering is by position in the session, so it is
/// the same whether or not disallowed commands are omitted.
pub fn render_runbook(
    log: &SessionLog,
    opts: &RunbookOptions,
    generated_at: OffsetDateTime,
) -> String {
    let mut out = String::new();

    for (position, command) in log.commands().iter().enumerate() {
        if !opts.is_allowed(command.exit_code) {
            let omit = opts.inclusion == InclusionPolicy::OmitDisallowed;
            tracing::debug!(
                scord_id = %command.id,
                exit_code = command.exit_code,
                omit,
                "command exit code is not allowed"
            );
            if omit {
                continue;
            }
        }

        let heading = match log.tag_for(&command.id) {
            Some(tag) => tag.label.clone(),
            None => format!("Command #{position}"),
        };
        out.push_str(&format!("### {heading}\n"));
        out.push_str(&code_block(command));
        out.push('\n');
    }

    for _ in 0..FOOTER_BREAKS {
        out.push_str("<br>\n");
    }
    let stamp = generated_at
        .format(STAMP_FORMAT)
        .expect("timestamp formatting should not fail");
    out.push_str(&format!(
        "###### Generated by shellcord session={} at {stamp}\n",
        log.session_id()
    ));
    out
}

/// Render with the current local time and write to `path`, replacing any
/// existing file.
pub fn write_runbook(
    path: &Path,
    log: &SessionLog,
    opts: &RunbookOptions,
) -> Result<(), RunbookError> {
    // The local offset is unavailable in some environments; fall back to UTC.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let text = render_runbook(log, opts, now);
    std::fs::write(path, text.as_bytes()).map_err(|source| RunbookError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote runbook");
    Ok(())
}

fn code_block(command: &CommandRecord) -> String {
    format!(
        "{TRIPLE_TICKS}bash\n{}\n{TRIPLE_TICKS}\n",
        command.command_text
    )
}
