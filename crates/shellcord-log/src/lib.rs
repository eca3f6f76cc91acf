pub mod append;
pub mod error;
pub mod paths;
pub mod repair;
pub mod session;

pub use append::append_record;
pub use error::LogError;
pub use paths::{find_latest_log, is_log_file_name, runbook_file_name};
pub use repair::{parse_log_text, repair_concatenated};
pub use session::SessionLog;
