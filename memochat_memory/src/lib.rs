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

//! Conversational memory: fact extraction from user utterances and the
//! per-conversation store the facts accumulate in.

pub mod extraction;
mod fact;
mod store;

pub use extraction::engine::{ExtractionConfig, Extractor};
pub use extraction::patterns::{PatternDef, PatternError, Transform, default_patterns};
pub use fact::{Attribute, FactSet, FactValue};
pub use store::MemoryStore;
