use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Step, StepId, StepOption, SurveyError};

/// The fixed, ordered catalog of steps for a survey.
///
/// A definition is read-only configuration: step order is decided here and
/// never changes while a session runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    /// Optional message shown before the first step.
    #[serde(default)]
    pub prelude: Option<String>,

    /// All steps in the survey, in order.
    pub steps: Vec<Step>,

    /// Optional message shown once the survey is complete.
    #[serde(default)]
    pub epilogue: Option<String>,
}

impl SurveyDefinition {
    /// Create a new survey definition with the given steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            prelude: None,
            steps,
            epilogue: None,
        }
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get the step at `index`.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Find a step by id.
    pub fn find(&self, id: impl AsRef<str>) -> Option<&Step> {
        let id = id.as_ref();
        self.steps.iter().find(|step| step.id() == id)
    }

    /// Position of the step with the given id.
    pub fn index_of(&self, id: impl AsRef<str>) -> Option<usize> {
        let id = id.as_ref();
        self.steps.iter().position(|step| step.id() == id)
    }

    /// Look up an option of a step.
    pub fn option(&self, step: impl AsRef<str>, value: &str) -> Option<&StepOption> {
        self.find(step).and_then(|step| step.option(value))
    }

    /// Display label of an option, e.g. `"Plumbing Services"` for `plumbing`.
    pub fn option_label(&self, step: impl AsRef<str>, value: &str) -> Option<&str> {
        self.option(step, value).map(|option| option.label.as_str())
    }

    /// Check if the survey has any steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check the structural invariants a session relies on: at least one
    /// step, unique step ids, at least one option per step, and unique option
    /// values within each step.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.steps.is_empty() {
            return Err(SurveyError::EmptySurvey);
        }

        let mut ids: HashSet<&StepId> = HashSet::new();
        for step in &self.steps {
            if !ids.insert(step.id()) {
                return Err(SurveyError::DuplicateStep(step.id().clone()));
            }
            if step.options().is_empty() {
                return Err(SurveyError::EmptyStep(step.id().clone()));
            }

            let mut values: HashSet<&str> = HashSet::new();
            for option in step.options() {
                if !values.insert(option.value.as_str()) {
                    return Err(SurveyError::DuplicateOption {
                        step: step.id().clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
