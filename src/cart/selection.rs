//! Customization selections

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chosen value per customization axis.
///
/// Backed by an ordered map, so two selections are equal whenever they hold
/// the same pairs regardless of the order they were made in. "No selection"
/// is the empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selection with `axis` set to `value`.
    #[must_use]
    pub fn with(mut self, axis: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(axis, value);
        self
    }

    /// Set `axis` to `value`, returning the previous value.
    pub fn insert(&mut self, axis: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(axis.into(), value.into())
    }

    /// Returns the value chosen for `axis`.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.0.get(axis).map(String::as_str)
    }

    /// Iterate over `(axis, value)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(axis, value)| (axis.as_str(), value.as_str()))
    }

    /// Number of axes with a chosen value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been chosen.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(axis, value)| (axis.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Selection::new().with("Size", "M").with("Material", "Silk");
        let b: Selection = [("Material", "Silk"), ("Size", "M")].into_iter().collect();

        assert_eq!(a, b);
    }

    #[test]
    fn differing_values_are_different_selections() {
        let a = Selection::new().with("Size", "M");
        let b = Selection::new().with("Size", "L");

        assert_ne!(a, b);
        assert_ne!(a, Selection::new());
    }

    #[test]
    fn serializes_as_plain_object() -> testresult::TestResult {
        let selection = Selection::new().with("Size", "M");

        assert_eq!(serde_json::to_string(&selection)?, r#"{"Size":"M"}"#);

        Ok(())
    }
}
