use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("can't find the last command ($LAST_SCORD_ID is unset), is shellcord initialized?")]
    MissingLastScordId,

    #[error("no scord log to append to: pass --log-file or set $SCORD_LOG_FILE")]
    MissingLogFile,

    #[error("`{0}` is not implemented")]
    Unimplemented(&'static str),
}
