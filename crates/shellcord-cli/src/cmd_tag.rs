use clap::Subcommand;
use shellcord_core::TagRecord;
use shellcord_log::append_record;
use std::path::Path;

use crate::error::CliError;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum TagCmd {
    /// Tag the next command run with this label
    Next {
        /// Label shown as the command's heading
        tag_str: String,
    },
    /// Tag the last command run with this label
    Previous {
        /// Label shown as the command's heading
        tag_str: String,
    },
}

// ── Dispatch ──

pub fn run(
    cmd: TagCmd,
    log_file: Option<&Path>,
    last_scord_id: Option<&str>,
) -> anyhow::Result<()> {
    match cmd {
        TagCmd::Next { tag_str } => next(&tag_str),
        TagCmd::Previous { tag_str } => {
            let log_file = log_file.ok_or(CliError::MissingLogFile)?;
            previous(log_file, last_scord_id, &tag_str)
        }
    }
}

// ── Command Implementations ──

/// `shellcord tag next <label>`
///
/// The shell hook has no way to hand over the id of a command that has not
/// run yet.
pub fn next(tag_str: &str) -> anyhow::Result<()> {
    tracing::debug!(tag_str, "tag next requested");
    Err(CliError::Unimplemented("tag next").into())
}

/// `shellcord tag previous <label>`
///
/// The id is stored exactly as the shell exported it.
pub fn previous(
    log_file: &Path,
    last_scord_id: Option<&str>,
    tag_str: &str,
) -> anyhow::Result<()> {
    let scord_id = last_scord_id.ok_or(CliError::MissingLastScordId)?;
    tracing::debug!(scord_id, tag_str, "tagging previous command");

    let tag = TagRecord::new(scord_id, tag_str);
    append_record(log_file, &tag.into())?;
    println!("Tagged {scord_id}: {tag_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_log(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("scord-log.json");
        std::fs::write(
            &path,
            "{\n    \"type\": \"cmd\",\n    \"cmd\": \"ls\",\n    \"scord_id\": \"scord-a-1\",\n    \"exit_code\": 0\n}\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn tag_previous_appends_label_and_id() {
        let tmp = tempfile::tempdir().unwrap();
        let log = seeded_log(tmp.path());
        let before = std::fs::read_to_string(&log).unwrap();

        let tag_str = "b8b0e3c2-label";
        let scord_id = "5d1f7a90-last-id";
        assert!(!before.contains(tag_str));
        assert!(!before.contains(scord_id));

        run(
            TagCmd::Previous {
                tag_str: tag_str.to_string(),
            },
            Some(log.as_path()),
            Some(scord_id),
        )
        .unwrap();

        let after = std::fs::read_to_string(&log).unwrap();
        assert!(after.len() > before.len());
        assert!(after.contains(tag_str));
        assert!(after.contains(scord_id));
    }

    #[test]
    fn tag_previous_requires_last_id() {
        let tmp = tempfile::tempdir().unwrap();
        let log = seeded_log(tmp.path());
        let err = previous(&log, None, "label").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingLastScordId)
        ));
    }

    #[test]
    fn tag_previous_requires_log_file() {
        let err = run(
            TagCmd::Previous {
                tag_str: "x".to_string(),
            },
            None,
            Some("scord-a-1"),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::MissingLogFile)
        ));
    }

    #[test]
    fn tag_next_is_unimplemented() {
        let err = run(
            TagCmd::Next {
                tag_str: "later".to_string(),
            },
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Unimplemented("tag next"))
        ));
    }
}
