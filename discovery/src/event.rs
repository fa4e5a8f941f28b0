use discovery_types::StepId;

use crate::PendingAdvance;

/// A discrete input to a survey session.
///
/// Events are applied one at a time, each to completion, through
/// [`SurveyController::handle`](crate::SurveyController::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyEvent {
    /// The visitor clicked an option.
    Select { step: StepId, value: String },

    /// The visitor pressed "Next" on a multi-select step.
    Next,

    /// The visitor pressed "Previous".
    Prev,

    /// One second of session time passed.
    ///
    /// For drivers without a running timer, such as
    /// [`ScriptedBackend`](crate::ScriptedBackend). A [`Session`](crate::Session)
    /// keeps its own time and ignores it.
    Tick,

    /// Start over with a fresh session state.
    Reset,

    /// A deferred auto-advance came due.
    Advance(PendingAdvance),
}

impl SurveyEvent {
    /// Shorthand for [`SurveyEvent::Select`].
    pub fn select(step: impl Into<StepId>, value: impl Into<String>) -> Self {
        Self::Select {
            step: step.into(),
            value: value.into(),
        }
    }
}
