//! Pattern-based fact extraction.
//!
//! An ordered table of `(attribute, regex, transform)` rows is evaluated in one
//! pass over the utterance; within an attribute the first accepted match wins.

pub mod engine;
pub mod patterns;
