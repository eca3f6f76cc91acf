use std::path::PathBuf;

use shellcord_core::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("scord log not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scord log is not valid JSON, even after repair: {source}")]
    IrrecoverableParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("log element {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("found multiple session ids in the same log: {}", ids.join(", "))]
    AmbiguousSessionId { ids: Vec<String> },

    #[error("found no session ids: the log holds no commands")]
    NoSessionId,

    #[error("found no scord log files in {dir}. Has shellcord ever run?")]
    NoLogFileFound { dir: PathBuf },

    #[error("failed to serialize record for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LogError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
