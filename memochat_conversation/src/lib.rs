#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Multi-turn conversation with fact memory.
//!
//! Every turn extracts facts from the user's words, merges them into the
//! session memory and sends `[system, memory, ...history]` to the model.
//!
//! # Key Features
//! - One session object owning history and memory
//! - Optional history window per request
//! - Text and JSON export, JSON import for resuming
//! - Translation helper reused by the transcription command

mod error;
pub mod export;
mod manager;
pub mod prompt;
mod session;
pub mod translation;

pub use error::{ConversationError, Result};
pub use export::{ExportFormat, SessionExport};
pub use manager::{ConversationConfig, ConversationManager, TurnResult, TurnUsage};
pub use prompt::PromptBuilder;
pub use session::ConversationSession;
