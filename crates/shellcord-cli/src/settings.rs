use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Env var: path of the active session's scord log.
pub const ENV_LOG_FILE: &str = "SCORD_LOG_FILE";
/// Env var: scord id of the command the shell ran last.
pub const ENV_LAST_SCORD_ID: &str = "LAST_SCORD_ID";
/// Env var: force debug logging without passing `--debug`.
pub const ENV_DEBUG: &str = "SCORD_DEBUG";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Process-wide logging configuration, built once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: String,
    pub force_debug: bool,
}

impl Settings {
    pub fn new(log_level: &str, debug_flag: bool, debug_env: Option<&str>) -> Self {
        let env_debug = matches!(
            debug_env.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("1" | "true" | "yes")
        );
        Self {
            log_level: log_level.to_string(),
            force_debug: debug_flag || env_debug,
        }
    }

    /// Filter directive handed to the subscriber.
    pub fn filter_directive(&self) -> &str {
        if self.force_debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Install the stderr subscriber. Call once.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_new(self.filter_directive())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
