//! Process-level logging setup

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logger wrapper that prefixes every line with a namespace
#[derive(Clone)]
pub struct Logger {
    namespace: String,
}

impl Logger {
    /// Create a new logger with a namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        info!("[{}] {}", self.namespace, message);
    }

    /// Log a warning message
    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.namespace, message);
    }
}

/// Initialize the global logging system
///
/// `RUST_LOG` wins over `BOTFORGE_LOG_LEVEL`, which defaults to `info`.
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    let level = std::env::var("BOTFORGE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
