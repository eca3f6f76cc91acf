use std::io::Write;
use std::path::Path;

use shellcord_core::Record;

use crate::error::LogError;

/// Append one record to a scord log, in the same pretty-printed
/// object-per-append shape the shell hook produces.
///
/// Existing bytes are never rewritten. There is no locking: a log belongs to
/// the single shell session appending to it.
pub fn append_record(path: &Path, record: &Record) -> Result<(), LogError> {
    let mut text = serde_json::to_string_pretty(&record.encode())
        .map_err(|source| LogError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    text.push('\n');

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::io("opening scord log for append", path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| LogError::io("appending to scord log", path, e))?;
    tracing::debug!(path = %path.display(), record_type = record.type_name(), "appended record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionLog;
    use shellcord_core::{CommandRecord, ScordId, TagRecord};

    #[test]
    fn appended_records_read_back_as_session() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scord-log-s.json");

        let records: Vec<Record> = vec![
            CommandRecord::new("source init.sh", "scord-boot-0", 0)
                .unwrap()
                .into(),
            CommandRecord::new("cargo build", "scord-s-1", 0)
                .unwrap()
                .into(),
            TagRecord::new("scord-s-1", "Build").into(),
            CommandRecord::new("cargo test", "scord-s-2", 101)
                .unwrap()
                .into(),
        ];
        for r in &records {
            append_record(&path, r).unwrap();
        }

        let log = SessionLog::parse_file(&path).unwrap();
        assert_eq!(log.session_id(), "s");
        assert_eq!(log.commands().len(), 2);
        assert_eq!(log.commands()[1].exit_code, 101);
        assert_eq!(
            log.tag_for(&ScordId::new("s", "1")).map(|t| t.label.as_str()),
            Some("Build")
        );
    }

    #[test]
    fn append_only_grows_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scord-log-s.json");
        std::fs::write(&path, "{\"existing\": true}\n").unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        append_record(&path, &TagRecord::new("raw-id", "label text").into()).unwrap();

        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.len() > before.len());
        assert!(after.starts_with(&before));
        assert!(after.contains("label text"));
        assert!(after.contains("raw-id"));
    }

    #[test]
    fn multi_line_command_survives_append() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scord-log-s.json");
        let script = "for f in *.rs; do\n  wc -l \"$f\"\ndone";
        for r in [
            CommandRecord::new("x", "scord-a-0", 0).unwrap(),
            CommandRecord::new(script, "scord-b-1", 0).unwrap(),
        ] {
            append_record(&path, &r.into()).unwrap();
        }
        let log = SessionLog::parse_file(&path).unwrap();
        assert_eq!(log.commands()[0].command_text, script);
    }
}
