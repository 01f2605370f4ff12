//! Extraction engine.
//!
//! Runs the compiled pattern table over an utterance in a single pass and
//! collects at most one value per attribute.

use tracing::debug;

use crate::extraction::patterns::{ExtractionPattern, PatternDef, PatternError, default_patterns};
use crate::fact::{FactSet, FactValue};

/// Configuration for the extraction engine.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Extraction patterns to apply, in precedence order.
    pub patterns: Vec<PatternDef>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

/// Pattern-based fact extractor.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: Vec<ExtractionPattern>,
}

impl Extractor {
    /// Create an extractor from configuration.
    ///
    /// # Errors
    /// Returns an error if any pattern fails to compile.
    pub fn new(config: &ExtractionConfig) -> Result<Self, PatternError> {
        let patterns = config
            .patterns
            .iter()
            .map(PatternDef::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Create an extractor with the default pattern table.
    ///
    /// # Errors
    /// Returns an error if default pattern compilation fails.
    pub fn with_defaults() -> Result<Self, PatternError> {
        Self::new(&ExtractionConfig::default())
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Extract facts from an utterance.
    ///
    /// Never fails: attributes without a match are simply absent.
    #[must_use]
    pub fn extract(&self, utterance: &str) -> FactSet {
        let mut facts = FactSet::new();

        for pattern in &self.patterns {
            if facts.contains(pattern.attribute) {
                continue;
            }
            let Some(value) = pattern.find(utterance) else {
                continue;
            };

            debug!(pattern = %pattern.id, attribute = %pattern.attribute, "pattern matched");
            let value = if pattern.attribute.is_list() {
                FactValue::List(vec![value])
            } else {
                FactValue::Scalar(value)
            };
            facts = facts.with(pattern.attribute, value);
        }

        facts
    }
}
