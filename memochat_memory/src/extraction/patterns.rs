//! Extraction pattern table.
//!
//! Order matters: for each attribute the first pattern that yields an accepted
//! value wins, so more specific phrasings must come before looser ones.

use regex::Regex;
use thiserror::Error;

use crate::fact::Attribute;

/// Error type for pattern building.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The regex pattern is invalid.
    #[error("invalid regex in pattern '{id}': {source}")]
    Regex {
        id: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern has no capture group to take the value from.
    #[error("pattern '{0}' has no capture group")]
    MissingCapture(String),
}

/// Words that follow "i'm" / "i am" without being a name.
const NOT_A_NAME: &[&str] = &[
    "a", "an", "the", "from", "interested", "in", "at", "on", "into", "not", "so", "just",
    "very", "really", "also", "still", "here", "there", "now", "currently", "always",
    "never", "going", "trying", "looking", "working", "living", "learning", "studying",
    "thinking", "feeling", "having", "doing", "getting", "being", "fine", "good", "great",
    "ok", "okay", "sure", "sorry", "glad", "happy", "sad", "tired", "new", "back", "married",
    "single", "done", "ready", "busy", "well", "afraid", "excited",
];

/// How a captured group becomes a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Single token, first character uppercased; common non-name words rejected.
    Name,
    /// Digits kept exactly as typed.
    Digits,
    /// Free text, trimmed, case preserved.
    Text,
    /// Free text, trimmed, each word capitalized.
    TitleCase,
}

impl Transform {
    /// Turn a raw capture into a value, or `None` to reject the candidate.
    #[must_use]
    pub fn apply(self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self {
            Self::Name => {
                if NOT_A_NAME.contains(&trimmed.to_lowercase().as_str()) {
                    None
                } else {
                    Some(capitalize(trimmed))
                }
            }
            Self::Digits | Self::Text => Some(trimmed.to_string()),
            Self::TitleCase => Some(title_case(trimmed)),
        }
    }
}

/// Uppercase the first character, leave the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Uppercase the first letter of every word and lowercase the rest of it.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Definition of a single extraction pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDef {
    /// Unique identifier for this pattern.
    pub id: String,

    /// Attribute the captured value is stored under.
    pub attribute: Attribute,

    /// Regex with one capture group holding the value. Matched case-insensitively.
    pub pattern: String,

    /// Post-processing applied to the capture.
    pub transform: Transform,
}

impl PatternDef {
    fn new(id: &str, attribute: Attribute, pattern: &str, transform: Transform) -> Self {
        Self {
            id: id.to_string(),
            attribute,
            pattern: pattern.to_string(),
            transform,
        }
    }

    /// Compile into an `ExtractionPattern`.
    ///
    /// # Errors
    /// Returns an error if the regex is invalid or has no capture group.
    pub fn build(&self) -> Result<ExtractionPattern, PatternError> {
        let regex = Regex::new(&format!("(?i){}", self.pattern)).map_err(|source| {
            PatternError::Regex {
                id: self.id.clone(),
                source,
            }
        })?;

        if regex.captures_len() < 2 {
            return Err(PatternError::MissingCapture(self.id.clone()));
        }

        Ok(ExtractionPattern {
            id: self.id.clone(),
            attribute: self.attribute,
            regex,
            transform: self.transform,
        })
    }
}

/// A compiled pattern, ready to run.
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    pub id: String,
    pub attribute: Attribute,
    regex: Regex,
    transform: Transform,
}

impl ExtractionPattern {
    /// First accepted value in `text`.
    ///
    /// Every match of the regex is tried in order, so a rejected candidate
    /// ("I'm from ...") does not hide a later one ("... I'm Sam").
    #[must_use]
    pub fn find(&self, text: &str) -> Option<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| self.transform.apply(m.as_str()))
    }
}

// Shared fragments. `I'M` accepts straight and curly apostrophes.
const I_M: &str = r"\bi['’]m\s+";
const I_AM: &str = r"\bi\s+am\s+";
const TOKEN: &str = r"(\p{L}[\p{L}\p{N}]*)";
const DIGITS: &str = r"(\d+)";
const TO_PERIOD: &str = r"([^.\n]+)";
const ARTICLE: &str = r"(?:an?\s+)";

/// Default pattern table, in precedence order within each attribute.
#[must_use]
pub fn default_patterns() -> Vec<PatternDef> {
    let mut patterns = Vec::new();
    patterns.extend(name_patterns());
    patterns.extend(interest_patterns());
    patterns.extend(age_patterns());
    patterns.extend(location_patterns());
    patterns.extend(profession_patterns());
    patterns
}

fn name_patterns() -> Vec<PatternDef> {
    use Attribute::Name;
    vec![
        PatternDef::new(
            "name_my_name_is",
            Name,
            &format!(r"\bmy\s+name\s+is\s+{TOKEN}"),
            Transform::Name,
        ),
        PatternDef::new("name_i_m", Name, &format!("{I_M}{TOKEN}"), Transform::Name),
        PatternDef::new("name_i_am", Name, &format!("{I_AM}{TOKEN}"), Transform::Name),
        PatternDef::new(
            "name_call_me",
            Name,
            &format!(r"\bcall\s+me\s+{TOKEN}"),
            Transform::Name,
        ),
    ]
}

fn interest_patterns() -> Vec<PatternDef> {
    use Attribute::Interests;
    vec![
        PatternDef::new(
            "interest_interested_in",
            Interests,
            &format!(r"{I_M}interested\s+in\s+{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "interest_like",
            Interests,
            &format!(r"\bi\s+like\s+{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "interest_love",
            Interests,
            &format!(r"\bi\s+love\s+{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "interest_hobby",
            Interests,
            &format!(r"\bmy\s+hobby\s+is\s+{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "interest_enjoy",
            Interests,
            &format!(r"\bi\s+enjoy\s+{TO_PERIOD}"),
            Transform::Text,
        ),
    ]
}

fn age_patterns() -> Vec<PatternDef> {
    use Attribute::Age;
    vec![
        PatternDef::new(
            "age_years_old",
            Age,
            &format!(r"{I_AM}{DIGITS}\s+years?\s+old\b"),
            Transform::Digits,
        ),
        PatternDef::new("age_i_m", Age, &format!(r"{I_M}{DIGITS}\b"), Transform::Digits),
    ]
}

fn location_patterns() -> Vec<PatternDef> {
    use Attribute::Location;
    vec![
        PatternDef::new(
            "location_live_in",
            Location,
            &format!(r"\bi\s+live\s+in\s+{TO_PERIOD}"),
            Transform::TitleCase,
        ),
        PatternDef::new(
            "location_i_m_from",
            Location,
            &format!(r"{I_M}from\s+{TO_PERIOD}"),
            Transform::TitleCase,
        ),
        PatternDef::new(
            "location_i_am_from",
            Location,
            &format!(r"{I_AM}from\s+{TO_PERIOD}"),
            Transform::TitleCase,
        ),
    ]
}

fn profession_patterns() -> Vec<PatternDef> {
    use Attribute::Profession;
    vec![
        PatternDef::new(
            "profession_work_as",
            Profession,
            &format!(r"\bi\s+work\s+as\s+{ARTICLE}?{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "profession_i_m_a",
            Profession,
            &format!(r"{I_M}{ARTICLE}{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "profession_i_am_a",
            Profession,
            &format!(r"{I_AM}{ARTICLE}{TO_PERIOD}"),
            Transform::Text,
        ),
        PatternDef::new(
            "profession_job_is",
            Profession,
            &format!(r"\bmy\s+job\s+is\s+{ARTICLE}?{TO_PERIOD}"),
            Transform::Text,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_compile() {
        for def in default_patterns() {
            assert!(def.build().is_ok(), "pattern {} failed to compile", def.id);
        }
    }

    #[test]
    fn pattern_ids_are_unique() {
        let patterns = default_patterns();
        let mut ids: Vec<_> = patterns.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), patterns.len());
    }

    #[test]
    fn invalid_regex_is_reported() {
        let def = PatternDef::new("broken", Attribute::Name, r"(unclosed", Transform::Name);
        assert!(matches!(def.build(), Err(PatternError::Regex { .. })));
    }

    #[test]
    fn pattern_without_capture_is_rejected() {
        let def = PatternDef::new("bare", Attribute::Age, r"\d+", Transform::Digits);
        assert!(matches!(def.build(), Err(PatternError::MissingCapture(_))));
    }

    #[test]
    fn name_transform_capitalizes_first_char_only() {
        assert_eq!(Transform::Name.apply("sam"), Some("Sam".to_string()));
        assert_eq!(Transform::Name.apply("mcDonald"), Some("McDonald".to_string()));
        assert_eq!(Transform::Name.apply("From"), None);
    }

    #[test]
    fn title_case_each_word() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SAN francisco"), "San Francisco");
        assert_eq!(title_case("rio de janeiro"), "Rio De Janeiro");
    }

    #[test]
    fn blank_capture_is_rejected() {
        assert_eq!(Transform::Text.apply("   "), None);
        assert_eq!(Transform::TitleCase.apply(""), None);
    }
}
