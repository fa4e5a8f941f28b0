//! Backends feed user input into a survey session.
//!
//! A backend decides how steps are presented and turns whatever the visitor
//! does into [`SurveyEvent`]s for the controller. [`ScriptedBackend`] replays a
//! fixed list of events, which is useful for testing surveys without a user.
//!
//! # Example
//!
//! ```rust
//! use discovery::{ImmediateScheduler, ScriptedBackend, Step, SurveyController, SurveyDefinition};
//!
//! let definition = SurveyDefinition::new(vec![
//!     Step::new("team-size", "How many people work in your business?")
//!         .with_option("1-3", "1-3 employees", "")
//!         .with_option("4-10", "4-10 employees", ""),
//! ]);
//! let mut survey = SurveyController::new(definition, ImmediateScheduler).unwrap();
//!
//! let responses = survey
//!     .run(&ScriptedBackend::new().select("team-size", "4-10"))
//!     .unwrap();
//!
//! assert_eq!(responses.single("team-size"), Some("4-10"));
//! ```

use discovery_types::{Responses, StepId};

use crate::{Scheduler, SurveyController, SurveyEvent};

/// Trait for backend implementations that collect survey responses.
pub trait SurveyBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Drive `controller` until the survey completes.
    ///
    /// # Returns
    /// * `Ok(responses)` once the survey is completed
    /// * `Err` on cancellation or backend failure
    fn collect<S: Scheduler>(
        &self,
        controller: &mut SurveyController<S>,
    ) -> Result<Responses, Self::Error>;
}

/// A backend that replays pre-defined events.
///
/// Every pending auto-advance is flushed after each event, as if the visitor
/// waited for the transition before acting again.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    events: Vec<SurveyEvent>,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedBackendError {
    #[error("Script ended before the survey was completed (stopped at step '{0}')")]
    Incomplete(StepId),
}

impl ScriptedBackend {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append any event.
    pub fn with_event(mut self, event: SurveyEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Click an option.
    pub fn select(self, step: impl Into<StepId>, value: impl Into<String>) -> Self {
        self.with_event(SurveyEvent::select(step, value))
    }

    /// Click several options of one multi-select step, then "Next".
    pub fn select_all<I, V>(mut self, step: impl Into<StepId>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let step = step.into();
        for value in values {
            self = self.select(step.clone(), value);
        }
        self.next()
    }

    /// Press "Next".
    pub fn next(self) -> Self {
        self.with_event(SurveyEvent::Next)
    }

    /// Press "Previous".
    pub fn prev(self) -> Self {
        self.with_event(SurveyEvent::Prev)
    }

    /// Let `seconds` of session time pass.
    pub fn wait_seconds(mut self, seconds: u64) -> Self {
        for _ in 0..seconds {
            self = self.with_event(SurveyEvent::Tick);
        }
        self
    }

    /// Start over.
    pub fn reset(self) -> Self {
        self.with_event(SurveyEvent::Reset)
    }

    pub fn events(&self) -> &[SurveyEvent] {
        &self.events
    }
}

impl SurveyBackend for ScriptedBackend {
    type Error = ScriptedBackendError;

    fn collect<S: Scheduler>(
        &self,
        controller: &mut SurveyController<S>,
    ) -> Result<Responses, Self::Error> {
        for event in &self.events {
            controller.handle(event.clone());
            controller.flush_scheduled();
        }

        if !controller.is_completed() {
            return Err(ScriptedBackendError::Incomplete(
                controller.current_step().id().clone(),
            ));
        }

        Ok(controller.responses().clone())
    }
}

#[cfg(test)]
mod tests {
    use discovery_types::{Step, SurveyDefinition, SurveyError};

    use super::*;
    use crate::ManualScheduler;

    fn definition() -> SurveyDefinition {
        SurveyDefinition::new(vec![
            Step::new("business-type", "Business?")
                .with_option("roofing", "Roofing Services", "")
                .with_option("cleaning", "Cleaning Services", ""),
            Step::new("pain-points", "Challenges?")
                .multiple()
                .with_option("inventory", "Inventory Tracking", "")
                .with_option("compliance", "Compliance & Documentation", ""),
        ])
    }

    #[test]
    fn replays_to_completion_with_deferred_scheduler() {
        let mut survey = SurveyController::new(definition(), ManualScheduler::new()).unwrap();

        let responses = ScriptedBackend::new()
            .select("business-type", "roofing")
            .wait_seconds(4)
            .select_all("pain-points", ["compliance", "inventory"])
            .collect(&mut survey)
            .unwrap();

        assert_eq!(responses.single("business-type"), Some("roofing"));
        assert_eq!(
            responses.multiple("pain-points"),
            &["compliance".to_string(), "inventory".to_string()]
        );
        assert_eq!(survey.elapsed_seconds(), 4);
    }

    #[test]
    fn incomplete_script_is_an_error() {
        let mut survey = SurveyController::new(definition(), ManualScheduler::new()).unwrap();

        let err = ScriptedBackend::new()
            .select("business-type", "cleaning")
            .collect(&mut survey)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Script ended before the survey was completed (stopped at step 'pain-points')"
        );
    }

    #[test]
    fn controller_run_reports_backend_failures() {
        let mut survey = SurveyController::new(definition(), ManualScheduler::new()).unwrap();

        let err = survey
            .run(&ScriptedBackend::new().select("business-type", "cleaning"))
            .unwrap_err();
        assert!(matches!(err, SurveyError::Backend(_)));
        assert!(!err.is_cancelled());
        assert_eq!(
            err.to_string(),
            "Backend error: Script ended before the survey was completed (stopped at step 'pain-points')"
        );

        let responses = survey
            .run(&ScriptedBackend::new().select_all("pain-points", ["inventory"]))
            .unwrap();
        assert_eq!(responses.multiple("pain-points"), &["inventory".to_string()]);
        assert!(survey.is_completed());
    }

    #[test]
    fn builder_records_events() {
        let script = ScriptedBackend::new().select("a", "b").prev().reset();
        assert_eq!(
            script.events(),
            &[
                SurveyEvent::select("a", "b"),
                SurveyEvent::Prev,
                SurveyEvent::Reset
            ]
        );
    }
}
