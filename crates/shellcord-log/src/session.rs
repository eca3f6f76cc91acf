use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use shellcord_core::{CommandRecord, Record, ScordId, TagRecord};

use crate::error::LogError;
use crate::paths::runbook_file_name;
use crate::repair::parse_log_text;

/// One shell session reconstructed from a scord log.
///
/// Construction drops the wrapper's bootstrap entry and checks that every
/// remaining command belongs to a single session. The value is read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct SessionLog {
    commands: Vec<CommandRecord>,
    tags: HashMap<ScordId, TagRecord>,
    unmatched_tags: Vec<TagRecord>,
    session_id: String,
}

impl SessionLog {
    /// Read and reconcile a whole log file.
    pub fn parse_file(path: &Path) -> Result<Self, LogError> {
        tracing::debug!(path = %path.display(), "reading scord log");
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LogError::io("reading scord log", path, e)
            }
        })?;
        Self::parse_str(&text)
    }

    /// Same pipeline as [`SessionLog::parse_file`], minus the read.
    pub fn parse_str(text: &str) -> Result<Self, LogError> {
        let elements = parse_log_text(text)?;
        tracing::debug!(elements = elements.len(), "building session log");
        let records = elements
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Record::decode(value).map_err(|source| LogError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    /// Partition decoded records and validate the session.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self, LogError> {
        let mut commands = Vec::new();
        let mut tags = HashMap::new();
        let mut unmatched_tags = Vec::new();

        for record in records {
            match record {
                Record::Command(c) => commands.push(c),
                Record::Tag(t) => match ScordId::parse(&t.id) {
                    Ok(id) => {
                        tags.insert(id, t);
                    }
                    Err(_) => {
                        tracing::warn!(scord_id = %t.id, label = %t.label, "tag does not name a scord id, it cannot match any command");
                        unmatched_tags.push(t);
                    }
                },
            }
        }

        let commands = drop_bootstrap_entry(commands);
        let session_id = unique_session_id(&commands)?;

        Ok(Self {
            commands,
            tags,
            unmatched_tags,
            session_id,
        })
    }

    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }

    pub fn tags(&self) -> &HashMap<ScordId, TagRecord> {
        &self.tags
    }

    /// Tags whose id never parsed as a scord id.
    pub fn unmatched_tags(&self) -> &[TagRecord] {
        &self.unmatched_tags
    }

    pub fn tag_for(&self, id: &ScordId) -> Option<&TagRecord> {
        self.tags.get(id)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// `scord-runbook-<session_id>.md`
    pub fn derived_output_name(&self) -> String {
        runbook_file_name(&self.session_id)
    }
}

/// The shell wrapper logs its own `source` invocation before the session id
/// changes, so the first command usually belongs to the previous session.
fn drop_bootstrap_entry(mut commands: Vec<CommandRecord>) -> Vec<CommandRecord> {
    let drop_first = match commands.as_slice() {
        [first, second, ..] if first.id.session_id == second.id.session_id => {
            tracing::warn!(
                session_id = %first.id.session_id,
                "first command shares the session of the second, expected it to come from a previous session; keeping it"
            );
            false
        }
        [first, _, ..] => {
            tracing::debug!(
                scord_id = %first.id,
                "removing first command as it belongs to a previous session"
            );
            true
        }
        [only] => {
            tracing::warn!(scord_id = %only.id, "log holds a single command, cannot tell whether it is the bootstrap entry; keeping it");
            false
        }
        [] => false,
    };
    if drop_first {
        commands.remove(0);
    }
    commands
}

fn unique_session_id(commands: &[CommandRecord]) -> Result<String, LogError> {
    let ids: BTreeSet<&str> = commands.iter().map(|c| c.id.session_id.as_str()).collect();
    let mut iter = ids.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Err(LogError::NoSessionId),
        (Some(id), None) => Ok(id.to_string()),
        (Some(_), Some(_)) => Err(LogError::AmbiguousSessionId {
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }),
    }
}
