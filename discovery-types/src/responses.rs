use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ResponseValue, StepId};

/// Answers collected during a survey session, keyed by step id.
///
/// A step only has an entry once the visitor selected something for it.
/// Multi-select values keep their selection order and never contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses {
    values: HashMap<StepId, ResponseValue>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert a response value for the given step, replacing any previous one.
    pub fn insert(&mut self, step: impl Into<StepId>, value: impl Into<ResponseValue>) {
        self.values.insert(step.into(), value.into());
    }

    /// Get the response value for the given step.
    pub fn get(&self, step: impl AsRef<str>) -> Option<&ResponseValue> {
        self.values.get(step.as_ref())
    }

    /// Check if a response exists for the given step.
    pub fn contains(&self, step: impl AsRef<str>) -> bool {
        self.values.contains_key(step.as_ref())
    }

    /// Remove the response for the given step.
    pub fn remove(&mut self, step: impl AsRef<str>) -> Option<ResponseValue> {
        self.values.remove(step.as_ref())
    }

    /// Get an iterator over all step-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&StepId, &ResponseValue)> {
        self.values.iter()
    }

    /// Get the number of answered steps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no responses.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Toggle `value` in the multi-select response of `step`.
    ///
    /// Appends the value if absent, removes it if present. A previous
    /// single-select entry for the step is replaced by a fresh list.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, step: impl Into<StepId>, value: &str) -> bool {
        let entry = self
            .values
            .entry(step.into())
            .or_insert_with(|| ResponseValue::Multiple(Vec::new()));

        match entry {
            ResponseValue::Multiple(values) => {
                if let Some(pos) = values.iter().position(|v| v == value) {
                    values.remove(pos);
                    false
                } else {
                    values.push(value.to_string());
                    true
                }
            }
            ResponseValue::Single(_) => {
                *entry = ResponseValue::Multiple(vec![value.to_string()]);
                true
            }
        }
    }

    /// Single-select value of `step`; `None` when missing or multi-select.
    pub fn single(&self, step: impl AsRef<str>) -> Option<&str> {
        self.get(step).and_then(ResponseValue::as_single)
    }

    /// Multi-select values of `step`; empty when missing or single-select.
    pub fn multiple(&self, step: impl AsRef<str>) -> &[String] {
        self.get(step)
            .and_then(ResponseValue::as_multiple)
            .unwrap_or_default()
    }

    /// Check if the step has a non-empty response.
    pub fn has_value(&self, step: impl AsRef<str>) -> bool {
        self.get(step).is_some_and(|value| !value.is_empty())
    }
}

impl IntoIterator for Responses {
    type Item = (StepId, ResponseValue);
    type IntoIter = std::collections::hash_map::IntoIter<StepId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a StepId, &'a ResponseValue);
    type IntoIter = std::collections::hash_map::Iter<'a, StepId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<StepId>, V: Into<ResponseValue>> FromIterator<(K, V)> for Responses {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut responses = Responses::new();
        for (step, value) in iter {
            responses.insert(step, value);
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut responses = Responses::new();
        responses.insert("business-type", "plumbing");
        responses.insert("pain-points", ["scheduling", "invoicing"]);

        assert_eq!(responses.single("business-type"), Some("plumbing"));
        assert_eq!(
            responses.multiple("pain-points"),
            &["scheduling".to_string(), "invoicing".to_string()]
        );
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut responses = Responses::new();
        assert!(responses.toggle("pain-points", "scheduling"));
        assert!(responses.toggle("pain-points", "reporting"));
        assert!(!responses.toggle("pain-points", "scheduling"));

        assert_eq!(responses.multiple("pain-points"), &["reporting".to_string()]);
    }

    #[test]
    fn toggling_last_value_keeps_empty_entry() {
        let mut responses = Responses::new();
        responses.toggle("pain-points", "inventory");
        responses.toggle("pain-points", "inventory");

        assert!(responses.contains("pain-points"));
        assert!(!responses.has_value("pain-points"));
    }

    #[test]
    fn lenient_lookups_ignore_the_wrong_shape() {
        let mut responses = Responses::new();
        responses.insert("pain-points", ["scheduling"]);
        responses.insert("budget", "unsure");

        assert_eq!(responses.single("pain-points"), None);
        assert!(responses.multiple("budget").is_empty());
        assert!(responses.multiple("team-size").is_empty());
        assert_eq!(responses.single("team-size"), None);
    }

    #[test]
    fn collect_from_pairs() {
        let responses: Responses = [("time-spent", "5-10"), ("budget", "unsure")]
            .into_iter()
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.single("budget"), Some("unsure"));
    }
}
