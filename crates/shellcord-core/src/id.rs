use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RecordError;

/// Prefix shared by every identifier and by the log/runbook file names.
pub const SCORD_PREFIX: &str = "scord";

static SCORD_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^scord-(\w+)-(\w+)").unwrap());

/// Identifier of one recorded command: `scord-<session_id>-<command_id>`.
///
/// Equality and hashing use the `(session_id, command_id)` pair, so an id
/// parsed from text and one built from parts are interchangeable map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScordId {
    pub session_id: String,
    pub command_id: Option<String>,
}

impl ScordId {
    pub fn new(session_id: impl Into<String>, command_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            command_id: Some(command_id.into()),
        }
    }

    /// An identifier naming a whole session, with no command part.
    pub fn session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            command_id: None,
        }
    }

    /// Parse the canonical text form.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let caps = SCORD_ID_PATTERN
            .captures(text)
            .ok_or_else(|| RecordError::MalformedIdentifier {
                raw: text.to_string(),
            })?;
        Ok(Self::new(&caps[1], &caps[2]))
    }
}

impl fmt::Display for ScordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.command_id {
            Some(cmd) => write!(f, "{SCORD_PREFIX}-{}-{cmd}", self.session_id),
            None => write!(f, "{SCORD_PREFIX}-{}", self.session_id),
        }
    }
}

impl FromStr for ScordId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ScordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Conversion accepted wherever an identifier or its text is expected.
///
/// An existing `ScordId` passes through unchanged; text is parsed.
pub trait IntoScordId {
    fn into_scord_id(self) -> Result<ScordId, RecordError>;
}

impl IntoScordId for ScordId {
    fn into_scord_id(self) -> Result<ScordId, RecordError> {
        Ok(self)
    }
}

impl IntoScordId for &ScordId {
    fn into_scord_id(self) -> Result<ScordId, RecordError> {
        Ok(self.clone())
    }
}

impl IntoScordId for &str {
    fn into_scord_id(self) -> Result<ScordId, RecordError> {
        ScordId::parse(self)
    }
}

impl IntoScordId for String {
    fn into_scord_id(self) -> Result<ScordId, RecordError> {
        ScordId::parse(&self)
    }
}

impl IntoScordId for &String {
    fn into_scord_id(self) -> Result<ScordId, RecordError> {
        ScordId::parse(self)
    }
}
