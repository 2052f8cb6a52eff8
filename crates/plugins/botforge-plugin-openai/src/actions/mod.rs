//! Actions of the OpenAI block

pub mod create_speech;

pub use create_speech::*;
