//! Botforge Core
//!
//! Host-side contract for chatbot-builder blocks:
//!
//! - `Action` / `TypedAction` traits with option schemas and fetchers
//! - `Plugin` trait grouping actions behind shared credentials
//! - Host collaborators: variable store, action logs, file uploader
//! - `parse_error` to turn any boundary failure into a log entry
//! - Env-based configuration helpers and logging setup
//!
//! # Example
//!
//! ```no_run
//! use botforge_core::*;
//!
//! fn main() -> Result<()> {
//!     load_env()?;
//!     init_logging();
//!     let logs = ActionLogs::new();
//!     logs.add("Nothing configured yet");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod logging;
pub mod testing;
pub mod types;
pub mod utils;

pub use config::{get_env_int, get_env_opt, get_env_or, load_env};
pub use error::{BotforgeError, Result};
pub use logging::{init_logging, Logger};
pub use types::*;
pub use utils::{create_id, empty_string_as_none};
