use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Estimated automation gain for one time-spent bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSavings {
    /// Hours saved per week.
    pub hours: u32,

    /// Money saved per month, in whole dollars.
    pub savings: u32,
}

impl TimeSavings {
    pub const fn new(hours: u32, savings: u32) -> Self {
        Self { hours, savings }
    }
}

/// A solution recommended for a pain point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    pub name: String,
    pub description: String,
}

impl Solution {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Time savings keyed by the option values of the time-spent step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSavingsTable {
    entries: HashMap<String, TimeSavings>,
}

impl TimeSavingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry for `bucket`.
    pub fn with_entry(mut self, bucket: impl Into<String>, savings: TimeSavings) -> Self {
        self.entries.insert(bucket.into(), savings);
        self
    }

    pub fn get(&self, bucket: &str) -> Option<TimeSavings> {
        self.entries.get(bucket).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Solutions keyed by the option values of the pain-points step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionTable {
    entries: HashMap<String, Solution>,
}

impl SolutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the solution for `pain_point`.
    pub fn with_entry(mut self, pain_point: impl Into<String>, solution: Solution) -> Self {
        self.entries.insert(pain_point.into(), solution);
        self
    }

    pub fn get(&self, pain_point: &str) -> Option<&Solution> {
        self.entries.get(pain_point)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
