//! Fact types: the attributes the extractor recognizes and their values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A remembered attribute of the user.
///
/// Ordering follows declaration order and is the order facts are rendered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Name,
    Age,
    Location,
    Profession,
    /// The only list-valued attribute. `interest` is accepted for older exports.
    #[serde(alias = "interest")]
    Interests,
}

impl Attribute {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Age,
        Self::Location,
        Self::Profession,
        Self::Interests,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Location => "location",
            Self::Profession => "profession",
            Self::Interests => "interests",
        }
    }

    /// Whether values of this attribute accumulate instead of being replaced.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::Interests)
    }
}

impl FromStr for Attribute {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "location" => Ok(Self::Location),
            "profession" => Ok(Self::Profession),
            "interests" | "interest" => Ok(Self::Interests),
            _ => Err("unknown attribute"),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FactValue {
    Scalar(String),
    List(Vec<String>),
}

impl FactValue {
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    #[must_use]
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Every value as a list; a scalar becomes a one-element list.
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Scalar(value) => vec![value],
            Self::List(values) => values,
        }
    }

    /// Borrowed view of the items, a scalar counting as one item.
    #[must_use]
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Scalar(value) => vec![value.as_str()],
            Self::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for FactValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(value) => f.write_str(value),
            Self::List(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// Facts extracted from one utterance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FactSet(BTreeMap<Attribute, FactValue>);

impl FactSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any earlier value for `attribute`.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: FactValue) -> Self {
        self.0.insert(attribute, value);
        self
    }

    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<&FactValue> {
        self.0.get(&attribute)
    }

    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.0.contains_key(&attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &FactValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Attribute names present, in render order.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        self.0.keys().copied().collect()
    }
}

impl FromIterator<(Attribute, FactValue)> for FactSet {
    fn from_iter<T: IntoIterator<Item = (Attribute, FactValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FactSet {
    type Item = (Attribute, FactValue);
    type IntoIter = std::collections::btree_map::IntoIter<Attribute, FactValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
