use serde::{Deserialize, Serialize};

/// A single response value collected for a step.
///
/// This is the value stored in `Responses` for each answered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// The chosen option value of a single-select step.
    Single(String),

    /// The chosen option values of a multi-select step, in selection order.
    Multiple(Vec<String>),
}

impl ResponseValue {
    /// Try to get this value as a single option value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    /// Try to get this value as a list of option values.
    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Self::Multiple(values) => Some(values),
            Self::Single(_) => None,
        }
    }

    /// Check whether `value` is part of this response.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(chosen) => chosen == value,
            Self::Multiple(chosen) => chosen.iter().any(|v| v == value),
        }
    }

    /// A multi-select response with nothing selected is empty; a single-select
    /// response never is.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::Multiple(values) => values.is_empty(),
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for ResponseValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ResponseValue {
    fn from(values: [&str; N]) -> Self {
        Self::Multiple(values.into_iter().map(String::from).collect())
    }
}
