use shellcord_core::CommandRecord;
use shellcord_log::append_record;
use std::path::Path;

/// `shellcord record --scord-id <id> --exit-code <n> -- <command...>`
///
/// Called by the shell hook after every command.
pub fn execute(
    log_file: &Path,
    scord_id: &str,
    exit_code: i64,
    argv: &[String],
) -> anyhow::Result<()> {
    if argv.is_empty() {
        anyhow::bail!("usage: shellcord record --scord-id <id> --exit-code <n> -- <command>");
    }
    let record = CommandRecord::new(argv.join(" "), scord_id, exit_code)?;
    tracing::debug!(scord_id = %record.id, exit_code, "recording command");
    append_record(log_file, &record.into())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellcord_log::SessionLog;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn recorded_commands_build_a_session() {
        let tmp = tempfile::tempdir().unwrap();
        let log = tmp.path().join("scord-log-s1.json");

        execute(&log, "scord-boot-9", 0, &argv(&["source", "init.sh"])).unwrap();
        execute(&log, "scord-s1-1", 0, &argv(&["echo 'hello world'"])).unwrap();
        execute(&log, "scord-s1-2", -1, &argv(&["false"])).unwrap();

        let session = SessionLog::parse_file(&log).unwrap();
        assert_eq!(session.session_id(), "s1");
        assert_eq!(session.commands().len(), 2);
        assert_eq!(session.commands()[0].command_text, "echo 'hello world'");
        assert_eq!(session.commands()[1].exit_code, -1);
    }

    #[test]
    fn record_rejects_malformed_id() {
        let tmp = tempfile::tempdir().unwrap();
        let log = tmp.path().join("scord-log-s1.json");
        assert!(execute(&log, "not-an-id", 0, &argv(&["ls"])).is_err());
        assert!(!log.exists());
    }

    #[test]
    fn record_requires_command() {
        let tmp = tempfile::tempdir().unwrap();
        let log = tmp.path().join("scord-log-s1.json");
        assert!(execute(&log, "scord-s1-1", 0, &[]).is_err());
    }
}
