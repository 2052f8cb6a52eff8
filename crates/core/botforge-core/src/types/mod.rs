//! Core types for Botforge blocks

pub mod action;
pub mod fetcher;
pub mod logs;
pub mod plugin;
pub mod schema;
pub mod storage;
pub mod variables;

pub use action::*;
pub use fetcher::*;
pub use logs::*;
pub use plugin::*;
pub use schema::*;
pub use storage::*;
pub use variables::*;
