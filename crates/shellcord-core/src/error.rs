use thiserror::Error;

/// Failures while decoding a single log record or identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no `type` field")]
    MissingTypeField,

    #[error("unknown record type `{found}` (expected `cmd` or `tag`)")]
    UnknownRecordType { found: String },

    #[error("malformed scord id `{raw}` (expected scord-<session>-<command>)")]
    MalformedIdentifier { raw: String },

    #[error("`{kind}` record has a non-integer exit_code: {found}")]
    InvalidExitCode { kind: &'static str, found: String },

    #[error("`{kind}` record is missing field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("`{kind}` record field `{field}` must be a {expected}")]
    InvalidField {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("record is not a JSON object (type: {found})")]
    NotAnObject { found: String },
}
