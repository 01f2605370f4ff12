//! HTTP clients for OpenAI-compatible endpoints.

mod openai;

pub use openai::{DEFAULT_BASE_URL, OpenAiProvider};
