use crate::StepId;

/// Error type for survey operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// Visitor abandoned the survey (closed the page, pressed Esc, etc.)
    #[error("Survey cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// A survey needs at least one step.
    #[error("Survey has no steps")]
    EmptySurvey,

    /// Two steps share the same id.
    #[error("Duplicate step id '{0}'")]
    DuplicateStep(StepId),

    /// Two options of one step share the same value.
    #[error("Duplicate option value '{value}' in step '{step}'")]
    DuplicateOption { step: StepId, value: String },

    /// A step without options can never be answered.
    #[error("Step '{0}' has no options")]
    EmptyStep(StepId),
}

impl SurveyError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this error comes from an invalid survey definition.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySurvey
                | Self::EmptyStep(_)
                | Self::DuplicateStep(_)
                | Self::DuplicateOption { .. }
        )
    }
}
