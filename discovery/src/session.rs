use std::sync::Arc;

use discovery_types::{Responses, SurveyDefinition, SurveyError};
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tracing::{debug, info};

use crate::{
    PendingAdvance, SurveyConfig, SurveyController, SurveyEvent, TimerGuard, TokioScheduler,
};

/// A live survey session on the Tokio runtime.
///
/// Owns the controller, the channel its deferred auto-advances arrive on, and
/// the once-per-second timer. Dropping the session stops the timer and
/// cancels any advance still waiting.
#[derive(Debug)]
pub struct Session {
    controller: SurveyController<TokioScheduler>,
    advances: UnboundedReceiver<PendingAdvance>,
    _timer: TimerGuard,
}

impl Session {
    /// Start a session. Must be called from within a Tokio runtime.
    pub fn start(
        definition: impl Into<Arc<SurveyDefinition>>,
        config: SurveyConfig,
    ) -> Result<Self, SurveyError> {
        let (scheduler, advances) = TokioScheduler::new();
        let controller = SurveyController::new(definition, scheduler)?.with_config(config);
        let timer = controller.state().timer().spawn();
        info!(steps = controller.definition().len(), "survey session started");

        Ok(Self {
            controller,
            advances,
            _timer: timer,
        })
    }

    pub fn controller(&self) -> &SurveyController<TokioScheduler> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SurveyController<TokioScheduler> {
        &mut self.controller
    }

    /// Process events one at a time until the survey completes.
    ///
    /// User events and due auto-advances are interleaved, but each is applied
    /// to completion before the next. [`SurveyEvent::Tick`] is ignored since
    /// the session's own timer already counts seconds. Returns [`SurveyError::Cancelled`] if the
    /// event source closes first.
    pub async fn run(
        &mut self,
        events: &mut Receiver<SurveyEvent>,
    ) -> Result<Responses, SurveyError> {
        while !self.controller.is_completed() {
            tokio::select! {
                Some(advance) = self.advances.recv() => {
                    self.controller.deliver(advance);
                }
                event = events.recv() => match event {
                    Some(SurveyEvent::Tick) => {
                        debug!("ignoring tick, the session timer keeps time");
                    }
                    Some(event) => {
                        debug!(?event, "handling event");
                        self.controller.handle(event);
                    }
                    None => {
                        info!(
                            elapsed_seconds = self.controller.elapsed_seconds(),
                            "survey abandoned"
                        );
                        return Err(SurveyError::Cancelled);
                    }
                },
            }
        }

        Ok(self.controller.responses().clone())
    }
}
