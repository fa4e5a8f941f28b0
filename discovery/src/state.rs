use discovery_types::Responses;

use crate::ElapsedTimer;

/// Everything a running survey session knows.
///
/// Created at session start with the first step current, no responses and
/// `completed == false`. Only [`SurveyController`](crate::SurveyController)
/// mutates it; `completed` stays true until an explicit reset builds a fresh
/// state.
#[derive(Debug, Clone, Default)]
pub struct SurveyState {
    current_step_index: usize,
    max_step_reached: usize,
    responses: Responses,
    completed: bool,
    timer: ElapsedTimer,
}

impl SurveyState {
    /// Fresh state with its own timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state counting time on `timer`.
    pub fn with_timer(timer: ElapsedTimer) -> Self {
        Self {
            current_step_index: 0,
            max_step_reached: 0,
            responses: Responses::new(),
            completed: false,
            timer,
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// Highest step index visited so far. Unlike the current index it never
    /// decreases within a session.
    pub fn max_step_reached(&self) -> usize {
        self.max_step_reached
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    pub fn timer(&self) -> &ElapsedTimer {
        &self.timer
    }

    pub(crate) fn responses_mut(&mut self) -> &mut Responses {
        &mut self.responses
    }

    pub(crate) fn go_to(&mut self, index: usize) {
        self.current_step_index = index;
        self.max_step_reached = self.max_step_reached.max(index);
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Initial values again, keeping the timer.
    pub(crate) fn restarted(&self) -> Self {
        Self::with_timer(self.timer.clone())
    }
}
