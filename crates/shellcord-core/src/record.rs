use serde_json::{json, Map, Value};

use crate::error::RecordError;
use crate::id::{IntoScordId, ScordId};

/// Discriminator values of the `type` field.
pub mod record_type {
    pub const CMD: &str = "cmd";
    pub const TAG: &str = "tag";
}

/// One executed shell command, as written by the shell hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command_text: String,
    pub id: ScordId,
    pub exit_code: i64,
}

impl CommandRecord {
    pub fn new(
        command_text: impl Into<String>,
        id: impl IntoScordId,
        exit_code: i64,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            command_text: command_text.into(),
            id: id.into_scord_id()?,
            exit_code,
        })
    }
}

/// A user label for a previously run command.
///
/// The id is kept exactly as written; it is only parsed when matched
/// against commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: String,
    pub label: String,
}

impl TagRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A single element of a scord log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Command(CommandRecord),
    Tag(TagRecord),
}

impl Record {
    /// Decode one log element, dispatching on its `type` field.
    pub fn decode(value: &Value) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or_else(|| RecordError::NotAnObject {
            found: json_kind(value).to_string(),
        })?;
        let typ = match obj.get("type") {
            None | Some(Value::Null) => return Err(RecordError::MissingTypeField),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(RecordError::UnknownRecordType {
                    found: other.to_string(),
                })
            }
        };
        tracing::trace!(record_type = typ, "decoding record");

        match typ {
            record_type::CMD => decode_command(obj).map(Record::Command),
            record_type::TAG => decode_tag(obj).map(Record::Tag),
            other => Err(RecordError::UnknownRecordType {
                found: other.to_string(),
            }),
        }
    }

    /// Encode back into the log's wire shape, `type` included.
    pub fn encode(&self) -> Value {
        match self {
            Record::Command(c) => json!({
                "type": record_type::CMD,
                "cmd": c.command_text,
                "scord_id": c.id.to_string(),
                "exit_code": c.exit_code,
            }),
            Record::Tag(t) => json!({
                "type": record_type::TAG,
                "scord_id": t.id,
                "tag_str": t.label,
            }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Record::Command(_) => record_type::CMD,
            Record::Tag(_) => record_type::TAG,
        }
    }
}

impl From<CommandRecord> for Record {
    fn from(c: CommandRecord) -> Self {
        Record::Command(c)
    }
}

impl From<TagRecord> for Record {
    fn from(t: TagRecord) -> Self {
        Record::Tag(t)
    }
}

fn decode_command(obj: &Map<String, Value>) -> Result<CommandRecord, RecordError> {
    const KIND: &str = record_type::CMD;
    let command_text = required_str(obj, KIND, "cmd")?;
    let raw_id = required_str(obj, KIND, "scord_id")?;
    let exit_code = match obj.get("exit_code") {
        None => {
            return Err(RecordError::MissingField {
                kind: KIND,
                field: "exit_code",
            })
        }
        Some(v) => coerce_exit_code(v)?,
    };
    CommandRecord::new(command_text, raw_id, exit_code)
}

fn decode_tag(obj: &Map<String, Value>) -> Result<TagRecord, RecordError> {
    const KIND: &str = record_type::TAG;
    let id = required_str(obj, KIND, "scord_id")?;
    let label = required_str(obj, KIND, "tag_str")?;
    Ok(TagRecord::new(id, label))
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a str, RecordError> {
    match obj.get(field) {
        None => Err(RecordError::MissingField { kind, field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RecordError::InvalidField {
            kind,
            field,
            expected: "string",
        }),
    }
}

/// Shell hooks write `$?` either bare or quoted, so accept both.
fn coerce_exit_code(value: &Value) -> Result<i64, RecordError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RecordError::InvalidExitCode {
        kind: record_type::CMD,
        found: value.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_command() -> Record {
        CommandRecord::new("echo foo", "scord-123-456", 1)
            .unwrap()
            .into()
    }

    #[test]
    fn command_round_trip() {
        let cmd = sample_command();
        assert_eq!(Record::decode(&cmd.encode()).unwrap(), cmd);
    }

    #[test]
    fn tag_round_trip_keeps_raw_id() {
        let tag: Record = TagRecord::new("not-a-scord-id", "Install deps").into();
        assert_eq!(Record::decode(&tag.encode()).unwrap(), tag);
    }

    #[test]
    fn encode_uses_wire_field_names() {
        let v = sample_command().encode();
        assert_eq!(v["type"], "cmd");
        assert_eq!(v["cmd"], "echo foo");
        assert_eq!(v["scord_id"], "scord-123-456");
        assert_eq!(v["exit_code"], 1);

        let v = Record::from(TagRecord::new("scord-1-2", "label")).encode();
        assert_eq!(v["type"], "tag");
        assert_eq!(v["tag_str"], "label");
    }

    #[test]
    fn decode_coerces_string_exit_code() {
        let v = json!({"type": "cmd", "cmd": "ls", "scord_id": "scord-a-1", "exit_code": " 127\n"});
        match Record::decode(&v).unwrap() {
            Record::Command(c) => {
                assert_eq!(c.exit_code, 127);
                assert_eq!(c.id, ScordId::new("a", "1"));
            }
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_integer_exit_code() {
        for bad in [json!("oops"), json!(1.5), json!(null), json!([0])] {
            let v = json!({"type": "cmd", "cmd": "ls", "scord_id": "scord-a-1", "exit_code": bad});
            assert!(matches!(
                Record::decode(&v),
                Err(RecordError::InvalidExitCode { kind: "cmd", .. })
            ));
        }
    }

    #[test]
    fn decode_missing_type() {
        let v = json!({"cmd": "ls", "scord_id": "scord-a-1", "exit_code": 0});
        assert_eq!(Record::decode(&v), Err(RecordError::MissingTypeField));
    }

    #[test]
    fn decode_unknown_type() {
        let v = json!({"type": "note", "text": "hi"});
        assert_eq!(
            Record::decode(&v),
            Err(RecordError::UnknownRecordType {
                found: "note".to_string()
            })
        );
    }

    #[test]
    fn decode_malformed_command_id() {
        let v = json!({"type": "cmd", "cmd": "ls", "scord_id": "bogus", "exit_code": 0});
        assert_eq!(
            Record::decode(&v),
            Err(RecordError::MalformedIdentifier {
                raw: "bogus".to_string()
            })
        );
    }

    #[test]
    fn decode_missing_and_mistyped_fields() {
        let v = json!({"type": "tag", "scord_id": "scord-a-1"});
        assert_eq!(
            Record::decode(&v),
            Err(RecordError::MissingField {
                kind: "tag",
                field: "tag_str"
            })
        );

        let v = json!({"type": "cmd", "cmd": 5, "scord_id": "scord-a-1", "exit_code": 0});
        assert_eq!(
            Record::decode(&v),
            Err(RecordError::InvalidField {
                kind: "cmd",
                field: "cmd",
                expected: "string"
            })
        );
    }

    #[test]
    fn decode_rejects_non_object() {
        assert_eq!(
            Record::decode(&json!([1, 2])),
            Err(RecordError::NotAnObject {
                found: "array".to_string()
            })
        );
    }
}
