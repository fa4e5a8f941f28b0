use serde::{Deserialize, Serialize};

use crate::StepId;

/// Whether a step accepts exactly one option or any number of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one option. Choosing it advances the survey automatically.
    #[default]
    Single,

    /// Any number of options, toggled individually. Advancing is manual.
    Multiple,
}

impl SelectionMode {
    /// Check if this is the multi-select mode.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple)
    }
}

/// One selectable choice within a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOption {
    /// Value stored in the responses when chosen. Unique within its step.
    pub value: String,

    /// Short label for display (e.g., "Plumbing Services").
    pub label: String,

    /// Descriptive metadata shown beneath the label.
    #[serde(default)]
    pub description: String,
}

impl StepOption {
    /// Create a new option.
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// A single question screen in a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Key of this step's answer in the responses.
    id: StepId,

    /// The prompt text shown to the visitor.
    title: String,

    /// Secondary text explaining the prompt.
    #[serde(default)]
    description: String,

    /// Single or multiple selection.
    #[serde(default, rename = "selection")]
    mode: SelectionMode,

    /// The available options, in display order.
    options: Vec<StepOption>,
}

impl Step {
    /// Create a new single-select step without options.
    pub fn new(id: impl Into<StepId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            mode: SelectionMode::Single,
            options: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Switch the step to multi-select.
    pub fn multiple(mut self) -> Self {
        self.mode = SelectionMode::Multiple;
        self
    }

    /// Append an option.
    pub fn with_option(
        mut self,
        value: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.options.push(StepOption::new(value, label, description));
        self
    }

    /// Get the step id.
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// Get the prompt text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Get the options.
    pub fn options(&self) -> &[StepOption] {
        &self.options
    }

    /// Find the option with the given value.
    pub fn option(&self, value: &str) -> Option<&StepOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Check if `value` is one of this step's option values.
    pub fn has_option(&self, value: &str) -> bool {
        self.option(value).is_some()
    }
}
