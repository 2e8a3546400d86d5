//! Translation tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::I18nError;

/// A node in a translation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    /// Leaf string.
    Text(String),

    /// Nested section.
    Section(BTreeMap<String, TranslationNode>),

    /// Any other JSON value. Kept so tables with stray values still load, but
    /// never resolved by lookups.
    Other(serde_json::Value),
}

/// Translations for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    root: BTreeMap<String, TranslationNode>,
}

impl TranslationTable {
    /// Create an empty table. Every lookup against it returns the key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Json`] if the document is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a dotted key path, or `None` if it does not lead to a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;

        for segment in segments {
            let TranslationNode::Section(children) = node else {
                return None;
            };

            node = children.get(segment)?;
        }

        match node {
            TranslationNode::Text(text) => Some(text),
            TranslationNode::Section(_) | TranslationNode::Other(_) => None,
        }
    }

    /// Resolve a dotted key path, falling back to the key itself.
    pub fn get_nested_value<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Whether `key` resolves to a string.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Dotted paths of every string leaf, sorted.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();

        collect_leaf_keys(&self.root, "", &mut keys);

        keys
    }

    /// Leaf keys of `reference` that this table does not resolve.
    pub fn missing_keys(&self, reference: &TranslationTable) -> Vec<String> {
        reference
            .leaf_keys()
            .into_iter()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn collect_leaf_keys(section: &BTreeMap<String, TranslationNode>, prefix: &str, keys: &mut Vec<String>) {
    for (name, node) in section {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        match node {
            TranslationNode::Text(_) => keys.push(path),
            TranslationNode::Section(children) => collect_leaf_keys(children, &path, keys),
            TranslationNode::Other(_) => {}
        }
    }
}
