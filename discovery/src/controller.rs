use std::{sync::Arc, time::Duration};

use discovery_types::{Responses, SelectionMode, Step, SurveyDefinition, SurveyError};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    ElapsedTimer, ImmediateScheduler, ManualScheduler, PendingAdvance, Recommendation,
    RecommendationEngine, Scheduled, Scheduler, SurveyBackend, SurveyConfig, SurveyEvent,
    SurveyState,
};

/// Number of answered steps from which a live preview is available.
pub const INSIGHTS_MIN_ANSWERED: usize = 3;

/// Preview of the answers so far, shown while the survey is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    /// Number of steps with a response.
    pub answered_steps: usize,

    /// Labels of the first multi-select choices, in step and selection order.
    pub highlights: Vec<String>,
}

/// The navigation state machine of a survey session.
///
/// Owns the [`SurveyState`] and enforces the selection and navigation rules of
/// the [`SurveyDefinition`]:
///
/// - On a single-select step, choosing an option records it and schedules an
///   automatic move to the next step (or completion on the last step).
/// - On a multi-select step, choosing an option toggles it; moving on requires
///   [`go_next`](Self::go_next) with at least one option selected.
/// - Requests that do not fit the current state are ignored.
///
/// Once completed, the session only responds to [`reset`](Self::reset).
#[derive(Debug)]
pub struct SurveyController<S = ImmediateScheduler> {
    definition: Arc<SurveyDefinition>,
    state: SurveyState,
    scheduler: S,
    config: SurveyConfig,
    /// Bumped by every accepted action; a pending advance from an older
    /// generation is stale.
    generation: u64,
}

impl<S: Scheduler> SurveyController<S> {
    /// Start a session over `definition`.
    ///
    /// Fails if the definition has no steps, repeats a step id, or repeats an
    /// option value within a step.
    pub fn new(
        definition: impl Into<Arc<SurveyDefinition>>,
        scheduler: S,
    ) -> Result<Self, SurveyError> {
        let definition = definition.into();
        definition.validate()?;

        Ok(Self {
            definition,
            state: SurveyState::new(),
            scheduler,
            config: SurveyConfig::default(),
            generation: 0,
        })
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: SurveyConfig) -> Self {
        self.config = config;
        self
    }

    /// Count session time on `timer` instead of a private one.
    pub fn with_timer(mut self, timer: ElapsedTimer) -> Self {
        self.state = SurveyState::with_timer(timer);
        self
    }

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    pub fn responses(&self) -> &Responses {
        self.state.responses()
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn into_state(self) -> SurveyState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds()
    }

    /// The step currently shown.
    pub fn current_step(&self) -> &Step {
        &self.definition.steps()[self.state.current_step_index()]
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step_index() + 1 == self.definition.len()
    }

    /// Record a choice on the current step.
    ///
    /// Ignored when `step_id` is not the current step, when `value` is not one
    /// of its options, or when the survey is already completed.
    pub fn select_option(&mut self, step_id: &str, value: &str) {
        if self.state.completed() {
            debug!(step = step_id, value, "ignoring selection after completion");
            return;
        }

        let index = self.state.current_step_index();
        let step = self.current_step();
        if step.id() != step_id {
            debug!(
                step = step_id,
                current = %step.id(),
                "ignoring selection for a step that is not current"
            );
            return;
        }
        if !step.has_option(value) {
            debug!(step = step_id, value, "ignoring unknown option");
            return;
        }

        let step_id = step.id().clone();
        let mode = step.mode();
        self.generation += 1;

        match mode {
            SelectionMode::Multiple => {
                let selected = self.state.responses_mut().toggle(step_id.clone(), value);
                debug!(step = %step_id, value, selected, "toggled option");
            }
            SelectionMode::Single => {
                self.state.responses_mut().insert(step_id.clone(), value);
                debug!(step = %step_id, value, "selected option");

                let advance = PendingAdvance::new(index, step_id, value, self.generation);
                match self
                    .scheduler
                    .schedule_after(self.config.auto_advance_delay, advance)
                {
                    Scheduled::Deferred => {}
                    Scheduled::Now(advance) => {
                        self.deliver(advance);
                    }
                }
            }
        }
    }

    /// Apply an auto-advance handed back by the scheduler.
    ///
    /// The advance only takes effect if nothing happened since it was
    /// scheduled: same generation, same current step, and the step still holds
    /// the chosen value. Returns whether it took effect.
    pub fn deliver(&mut self, advance: PendingAdvance) -> bool {
        if self.state.completed() {
            debug!(step = %advance.step_id, "dropping auto-advance after completion");
            return false;
        }
        if advance.generation != self.generation {
            debug!(
                step = %advance.step_id,
                scheduled = advance.generation,
                current = self.generation,
                "dropping stale auto-advance"
            );
            return false;
        }

        let current = self.current_step();
        let still_current = self.state.current_step_index() == advance.step_index
            && current.id() == &advance.step_id
            && self.state.responses().single(current.id()) == Some(advance.value.as_str());
        if !still_current {
            debug!(step = %advance.step_id, "dropping auto-advance for a step that moved on");
            return false;
        }

        self.generation += 1;
        self.advance_or_complete();
        true
    }

    /// Hand every advance the scheduler still holds back to the controller.
    pub fn flush_scheduled(&mut self) {
        for advance in self.scheduler.flush() {
            self.deliver(advance);
        }
    }

    /// Move past the current multi-select step.
    ///
    /// Requires at least one selected option. On the last step this completes
    /// the survey. Single-select steps advance on their own and ignore this.
    pub fn go_next(&mut self) {
        if self.state.completed() {
            debug!("ignoring next after completion");
            return;
        }

        let step = self.current_step();
        if !step.mode().is_multiple() {
            debug!(step = %step.id(), "next is only available on multi-select steps");
            return;
        }
        if !self.is_step_complete() {
            debug!(step = %step.id(), "ignoring next without a selection");
            return;
        }

        self.generation += 1;
        self.advance_or_complete();
    }

    /// Go back one step. Responses are kept.
    pub fn go_prev(&mut self) {
        if self.state.completed() {
            debug!("ignoring previous after completion");
            return;
        }

        let index = self.state.current_step_index();
        if index == 0 {
            debug!("already at the first step");
            return;
        }

        self.generation += 1;
        self.state.go_to(index - 1);
    }

    /// Whether the current step has a non-empty response.
    pub fn is_step_complete(&self) -> bool {
        self.state.responses().has_value(self.current_step().id())
    }

    /// Whether `value` is currently chosen for `step_id`.
    pub fn is_selected(&self, step_id: &str, value: &str) -> bool {
        self.state
            .responses()
            .get(step_id)
            .is_some_and(|response| response.contains(value))
    }

    /// Start over. The session timer keeps counting.
    pub fn reset(&mut self) {
        self.state = self.state.restarted();
        self.generation += 1;
        info!(
            elapsed_seconds = self.state.elapsed_seconds(),
            "survey reset"
        );
    }

    /// `(current_step_index + 1) / steps`, in `(0, 1]`.
    ///
    /// Follows the current position, so it goes down after
    /// [`go_prev`](Self::go_prev).
    pub fn progress_fraction(&self) -> f64 {
        (self.state.current_step_index() + 1) as f64 / self.definition.len() as f64
    }

    /// Like [`progress_fraction`](Self::progress_fraction), but for the
    /// furthest step reached. Never goes down within a session.
    pub fn furthest_progress_fraction(&self) -> f64 {
        (self.state.max_step_reached() + 1) as f64 / self.definition.len() as f64
    }

    /// Progress as a rounded percentage, e.g. `40` on step 2 of 5.
    pub fn progress_percent(&self) -> u32 {
        (self.progress_fraction() * 100.0).round() as u32
    }

    /// `(current, total)` with a one-based current step, for "Step 2 of 5".
    pub fn step_counter(&self) -> (usize, usize) {
        (self.state.current_step_index() + 1, self.definition.len())
    }

    /// Live preview once enough steps are answered.
    pub fn insights(&self) -> Option<Insights> {
        let responses = self.state.responses();
        if responses.len() < INSIGHTS_MIN_ANSWERED {
            return None;
        }

        let highlights = self
            .definition
            .steps()
            .iter()
            .filter(|step| step.mode().is_multiple())
            .flat_map(|step| {
                responses
                    .multiple(step.id())
                    .iter()
                    .filter_map(move |value| step.option(value))
                    .map(|option| option.label.clone())
            })
            .take(self.config.max_recommendations)
            .collect();

        Some(Insights {
            answered_steps: responses.len(),
            highlights,
        })
    }

    /// The recommendation for a completed session.
    pub fn recommendation(&self, engine: &RecommendationEngine) -> Option<Recommendation> {
        self.state
            .completed()
            .then(|| engine.derive(self.state.responses()))
    }

    /// Let `backend` drive the session to completion.
    ///
    /// Whatever the backend fails with is reported as [`SurveyError::Backend`].
    pub fn run<B: SurveyBackend>(&mut self, backend: &B) -> Result<Responses, SurveyError> {
        backend.collect(self).map_err(SurveyError::backend)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: SurveyEvent) {
        match event {
            SurveyEvent::Select { step, value } => self.select_option(step.as_str(), &value),
            SurveyEvent::Next => self.go_next(),
            SurveyEvent::Prev => self.go_prev(),
            SurveyEvent::Tick => {
                self.state.timer().tick();
            }
            SurveyEvent::Reset => self.reset(),
            SurveyEvent::Advance(advance) => {
                self.deliver(advance);
            }
        }
    }

    fn advance_or_complete(&mut self) {
        if self.is_last_step() {
            self.state.mark_completed();
            info!(
                answered_steps = self.state.responses().len(),
                elapsed_seconds = self.state.elapsed_seconds(),
                "survey completed"
            );
        } else {
            let next = self.state.current_step_index() + 1;
            self.state.go_to(next);
            debug!(step = %self.current_step().id(), "advanced");
        }
    }
}

impl SurveyController<ManualScheduler> {
    /// Move the virtual clock forward and apply every advance that came due.
    /// Returns how many of them took effect.
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let mut applied = 0;
        for advance in self.scheduler.advance(by) {
            if self.deliver(advance) {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> SurveyDefinition {
        SurveyDefinition::new(vec![
            Step::new("business-type", "What type of business do you run?")
                .with_option("plumbing", "Plumbing Services", "Emergency calls")
                .with_option("hvac", "HVAC Services", "Maintenance schedules"),
            Step::new("pain-points", "What are your biggest challenges?")
                .multiple()
                .with_option("scheduling", "Scheduling & Dispatching", "")
                .with_option("invoicing", "Billing & Invoicing", "")
                .with_option("reporting", "Business Analytics", ""),
            Step::new("budget", "What would you invest monthly?")
                .with_option("200-500", "$200-$500/month", "")
                .with_option("unsure", "I'm not sure yet", ""),
        ])
    }

    fn immediate() -> SurveyController {
        SurveyController::new(definition(), ImmediateScheduler).unwrap()
    }

    fn manual() -> SurveyController<ManualScheduler> {
        SurveyController::new(definition(), ManualScheduler::new()).unwrap()
    }

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn rejects_invalid_definition() {
        let err = SurveyController::new(SurveyDefinition::new(Vec::new()), ImmediateScheduler)
            .unwrap_err();
        assert!(err.is_definition_error());
    }

    #[test]
    fn rejects_step_without_options() {
        let definition = SurveyDefinition::new(vec![
            Step::new("team-size", "Team size?").with_option("1-3", "1-3 employees", ""),
            Step::new("budget", "Budget?"),
        ]);

        let err = SurveyController::new(definition, ImmediateScheduler).unwrap_err();
        assert!(matches!(err, SurveyError::EmptyStep(id) if id == "budget"));
    }

    #[test]
    fn single_select_advances() {
        let mut survey = immediate();
        survey.select_option("business-type", "hvac");

        assert_eq!(survey.responses().single("business-type"), Some("hvac"));
        assert_eq!(survey.state().current_step_index(), 1);
        assert!(!survey.is_completed());
    }

    #[test]
    fn selection_for_other_step_is_ignored() {
        let mut survey = immediate();
        survey.select_option("budget", "unsure");

        assert!(survey.responses().is_empty());
        assert_eq!(survey.state().current_step_index(), 0);
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut survey = immediate();
        survey.select_option("business-type", "bakery");

        assert!(survey.responses().is_empty());
        assert_eq!(survey.state().current_step_index(), 0);
    }

    #[test]
    fn multi_select_toggles_without_advancing() {
        let mut survey = immediate();
        survey.select_option("business-type", "plumbing");

        survey.select_option("pain-points", "scheduling");
        survey.select_option("pain-points", "invoicing");
        survey.select_option("pain-points", "scheduling");

        assert_eq!(
            survey.responses().multiple("pain-points"),
            &["invoicing".to_string()]
        );
        assert!(survey.is_selected("pain-points", "invoicing"));
        assert!(!survey.is_selected("pain-points", "scheduling"));
        assert_eq!(survey.state().current_step_index(), 1);
    }

    #[test]
    fn next_requires_a_selection() {
        let mut survey = immediate();
        survey.select_option("business-type", "plumbing");

        survey.go_next();
        assert_eq!(survey.state().current_step_index(), 1);

        survey.select_option("pain-points", "reporting");
        survey.select_option("pain-points", "reporting");
        assert!(!survey.is_step_complete());
        survey.go_next();
        assert_eq!(survey.state().current_step_index(), 1);

        survey.select_option("pain-points", "reporting");
        assert!(survey.is_step_complete());
        survey.go_next();
        assert_eq!(survey.state().current_step_index(), 2);
    }

    #[test]
    fn next_is_ignored_on_single_select_steps() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");
        assert!(survey.is_step_complete());

        survey.go_next();
        assert_eq!(survey.state().current_step_index(), 0);
    }

    #[test]
    fn single_select_on_last_step_completes() {
        let mut survey = immediate();
        survey.select_option("business-type", "plumbing");
        survey.select_option("pain-points", "scheduling");
        survey.go_next();
        survey.select_option("budget", "unsure");

        assert!(survey.is_completed());
        assert_eq!(survey.state().current_step_index(), 2);
    }

    #[test]
    fn next_on_last_multi_select_step_completes() {
        let definition = SurveyDefinition::new(vec![
            Step::new("team-size", "How many people?").with_option("1-3", "1-3 employees", ""),
            Step::new("pain-points", "Challenges?")
                .multiple()
                .with_option("inventory", "Inventory Tracking", ""),
        ]);
        let mut survey = SurveyController::new(definition, ImmediateScheduler).unwrap();
        survey.select_option("team-size", "1-3");
        survey.select_option("pain-points", "inventory");
        survey.go_next();

        assert!(survey.is_completed());
        assert_eq!(survey.state().current_step_index(), 1);
    }

    #[test]
    fn completion_is_terminal_until_reset() {
        let mut survey = immediate();
        survey.select_option("business-type", "plumbing");
        survey.select_option("pain-points", "scheduling");
        survey.go_next();
        survey.select_option("budget", "unsure");
        assert!(survey.is_completed());

        survey.select_option("budget", "200-500");
        survey.go_next();
        survey.go_prev();

        assert!(survey.is_completed());
        assert_eq!(survey.responses().single("budget"), Some("unsure"));
        assert_eq!(survey.state().current_step_index(), 2);

        survey.reset();
        assert!(!survey.is_completed());
        assert_eq!(survey.state().current_step_index(), 0);
        assert!(survey.responses().is_empty());
    }

    #[test]
    fn prev_stops_at_first_step_and_keeps_responses() {
        let mut survey = immediate();
        survey.go_prev();
        assert_eq!(survey.state().current_step_index(), 0);

        survey.select_option("business-type", "hvac");
        survey.go_prev();
        assert_eq!(survey.state().current_step_index(), 0);
        assert_eq!(survey.responses().single("business-type"), Some("hvac"));
    }

    #[test]
    fn deferred_advance_records_selection_first() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");

        assert_eq!(survey.responses().single("business-type"), Some("plumbing"));
        assert_eq!(survey.state().current_step_index(), 0);
        assert_eq!(survey.scheduler().pending(), 1);

        assert_eq!(survey.advance_clock(Duration::from_millis(499)), 0);
        assert_eq!(survey.state().current_step_index(), 0);

        assert_eq!(survey.advance_clock(Duration::from_millis(1)), 1);
        assert_eq!(survey.state().current_step_index(), 1);
    }

    #[test]
    fn repeated_selection_advances_once() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");
        survey.advance_clock(Duration::from_millis(200));
        survey.select_option("business-type", "hvac");

        assert_eq!(survey.advance_clock(DELAY), 1);
        assert_eq!(survey.state().current_step_index(), 1);
        assert_eq!(survey.responses().single("business-type"), Some("hvac"));
        assert_eq!(survey.scheduler().pending(), 0);
    }

    #[test]
    fn stale_advance_after_navigation_is_dropped() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");
        survey.advance_clock(DELAY);
        survey.select_option("pain-points", "invoicing");
        survey.go_next();

        survey.select_option("budget", "unsure");
        survey.go_prev();

        assert_eq!(survey.advance_clock(DELAY), 0);
        assert!(!survey.is_completed());
        assert_eq!(survey.state().current_step_index(), 1);
        assert_eq!(survey.responses().single("budget"), Some("unsure"));
    }

    #[test]
    fn advance_is_dropped_after_reset() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");
        survey.reset();

        assert_eq!(survey.advance_clock(DELAY), 0);
        assert_eq!(survey.state().current_step_index(), 0);
        assert!(survey.responses().is_empty());
    }

    #[test]
    fn advance_cannot_apply_twice() {
        let mut survey = manual();
        survey.select_option("business-type", "plumbing");
        let due = survey.scheduler_mut().advance(DELAY);
        assert_eq!(due.len(), 1);

        assert!(survey.deliver(due[0].clone()));
        assert!(!survey.deliver(due[0].clone()));
        assert_eq!(survey.state().current_step_index(), 1);
    }

    #[test]
    fn flush_applies_pending_advance() {
        let mut survey = manual();
        survey.select_option("business-type", "hvac");
        survey.flush_scheduled();
        assert_eq!(survey.state().current_step_index(), 1);
    }

    #[test]
    fn progress_follows_current_position() {
        let mut survey = immediate();
        assert_eq!(survey.step_counter(), (1, 3));
        assert!((survey.progress_fraction() - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(survey.progress_percent(), 33);

        survey.select_option("business-type", "hvac");
        survey.select_option("pain-points", "scheduling");
        survey.go_next();
        assert_eq!(survey.progress_fraction(), 1.0);
        assert_eq!(survey.progress_percent(), 100);

        survey.go_prev();
        assert_eq!(survey.step_counter(), (2, 3));
        assert_eq!(survey.progress_percent(), 67);
        assert_eq!(survey.furthest_progress_fraction(), 1.0);
    }

    #[test]
    fn reset_keeps_timer_running() {
        let timer = ElapsedTimer::new();
        let mut survey = SurveyController::new(definition(), ImmediateScheduler)
            .unwrap()
            .with_timer(timer.clone());

        survey.handle(SurveyEvent::Tick);
        survey.handle(SurveyEvent::Tick);
        survey.reset();

        assert_eq!(survey.elapsed_seconds(), 2);
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn insights_need_three_answers() {
        let mut survey = immediate();
        survey.select_option("business-type", "plumbing");
        survey.select_option("pain-points", "reporting");
        survey.select_option("pain-points", "scheduling");
        assert_eq!(survey.insights(), None);

        survey.go_next();
        survey.go_prev();
        survey.go_next();
        survey.select_option("budget", "unsure");

        let insights = survey.insights().unwrap();
        assert_eq!(insights.answered_steps, 3);
        assert_eq!(
            insights.highlights,
            vec!["Business Analytics", "Scheduling & Dispatching"]
        );
    }

    #[test]
    fn handle_dispatches_events() {
        let mut survey = manual();
        survey.handle(SurveyEvent::select("business-type", "plumbing"));
        let due = survey.scheduler_mut().advance(DELAY);
        for advance in due {
            survey.handle(SurveyEvent::Advance(advance));
        }
        survey.handle(SurveyEvent::select("pain-points", "invoicing"));
        survey.handle(SurveyEvent::Next);
        assert_eq!(survey.state().current_step_index(), 2);

        survey.handle(SurveyEvent::Prev);
        assert_eq!(survey.state().current_step_index(), 1);

        survey.handle(SurveyEvent::Reset);
        assert_eq!(survey.state().current_step_index(), 0);
        assert!(survey.responses().is_empty());
    }

    #[test]
    fn recommendation_only_when_completed() {
        let engine = RecommendationEngine::default();
        let mut survey = immediate();
        assert!(survey.recommendation(&engine).is_none());

        survey.select_option("business-type", "plumbing");
        survey.select_option("pain-points", "scheduling");
        survey.go_next();
        survey.select_option("budget", "unsure");

        let recommendation = survey.recommendation(&engine).unwrap();
        assert_eq!(recommendation.business_type.as_deref(), Some("plumbing"));
        assert_eq!(recommendation.investment_amount, 500);
    }
}
