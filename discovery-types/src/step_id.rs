use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier of a step, e.g. `"pain-points"`.
///
/// Used as keys in `Responses`. Step ids are unique within a `SurveyDefinition`
/// and never change once the definition is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId {
    id: String,
}

impl StepId {
    /// Create a new step id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Borrow<str> for StepId {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for StepId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&StepId> for StepId {
    fn from(id: &StepId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for StepId {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl PartialEq<&str> for StepId {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}
