//! Conversation memory store.
//!
//! A running summary of everything extracted during one conversation, keyed by
//! attribute. Scalars are last-write-wins; `interests` accumulates as a set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::fact::{Attribute, FactSet, FactValue};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MemoryStore {
    facts: BTreeMap<Attribute, FactValue>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge newly extracted facts.
    ///
    /// List-valued attributes are unioned with what is already stored (an
    /// older scalar value counts as a one-element list); everything else is
    /// overwritten.
    pub fn merge(&mut self, facts: &FactSet) {
        for (attribute, value) in facts.iter() {
            let merged = if attribute.is_list() {
                let mut items = self
                    .facts
                    .get(&attribute)
                    .cloned()
                    .map(FactValue::into_list)
                    .unwrap_or_default();
                let before = items.len();
                union_into(&mut items, value.items());
                debug!(
                    attribute = %attribute,
                    added = items.len() - before,
                    "merged list attribute"
                );
                FactValue::List(items)
            } else {
                value.clone()
            };
            self.facts.insert(attribute, merged);
        }
    }

    /// Render as `attribute: value` lines, lists joined with `", "`.
    ///
    /// Returns an empty string for an empty store.
    #[must_use]
    pub fn render(&self) -> String {
        self.facts
            .iter()
            .map(|(attribute, value)| format!("{attribute}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.facts.clear();
    }

    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<&FactValue> {
        self.facts.get(&attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &FactValue)> {
        self.facts.iter().map(|(k, v)| (*k, v))
    }

    /// Stored interests in first-seen order.
    #[must_use]
    pub fn interests(&self) -> Vec<&str> {
        self.get(Attribute::Interests)
            .map(FactValue::items)
            .unwrap_or_default()
    }
}

fn union_into(items: &mut Vec<String>, new_items: Vec<&str>) {
    for item in new_items {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
}
