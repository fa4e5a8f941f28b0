//! Deferred auto-advance after a single-select choice.
//!
//! The controller never sleeps. It hands a [`PendingAdvance`] to a
//! [`Scheduler`], and whoever owns the scheduler hands it back through
//! [`SurveyController::deliver`](crate::SurveyController::deliver) once the
//! delay has passed. Delivery re-checks the advance against the current
//! state, so late or superseded advances are dropped.

use std::time::Duration;

use discovery_types::StepId;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

/// A step change requested by a single-select choice, waiting for its delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdvance {
    pub(crate) step_index: usize,
    pub(crate) step_id: StepId,
    pub(crate) value: String,
    pub(crate) generation: u64,
}

impl PendingAdvance {
    pub(crate) fn new(
        step_index: usize,
        step_id: StepId,
        value: impl Into<String>,
        generation: u64,
    ) -> Self {
        Self {
            step_index,
            step_id,
            value: value.into(),
            generation,
        }
    }

    /// Index of the step the choice was made on.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Id of the step the choice was made on.
    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }

    /// The chosen option value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Outcome of handing an advance to a scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scheduled {
    /// The scheduler will hand the advance back later.
    Deferred,

    /// Apply the advance right away.
    Now(PendingAdvance),
}

/// Defers auto-advances on behalf of a controller.
pub trait Scheduler {
    /// Arrange for `advance` to be delivered after `delay`.
    fn schedule_after(&mut self, delay: Duration, advance: PendingAdvance) -> Scheduled;

    /// Give back every advance still waiting, earliest first, without waiting
    /// for its delay. Schedulers that cannot recall their work return nothing.
    fn flush(&mut self) -> Vec<PendingAdvance> {
        Vec::new()
    }
}

/// Applies every advance synchronously, ignoring the delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule_after(&mut self, _delay: Duration, advance: PendingAdvance) -> Scheduled {
        Scheduled::Now(advance)
    }
}

/// A scheduler driven by a virtual clock.
///
/// Nothing happens until [`advance`](ManualScheduler::advance) moves the clock
/// forward, which makes deferred behavior testable without real waits.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: Vec<(Duration, PendingAdvance)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of advances still waiting.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward by `by` and return every advance that became due,
    /// in due order.
    pub fn advance(&mut self, by: Duration) -> Vec<PendingAdvance> {
        self.now += by;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|(at, _)| *at <= now);
        self.queue = waiting;

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, advance)| advance).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, advance: PendingAdvance) -> Scheduled {
        self.queue.push((self.now + delay, advance));
        Scheduled::Deferred
    }

    fn flush(&mut self) -> Vec<PendingAdvance> {
        let mut queue = std::mem::take(&mut self.queue);
        queue.sort_by_key(|(at, _)| *at);
        if let Some((at, _)) = queue.last() {
            self.now = self.now.max(*at);
        }
        queue.into_iter().map(|(_, advance)| advance).collect()
    }
}

/// Schedules advances on the Tokio timer.
///
/// Each advance is sent through the channel returned by [`TokioScheduler::new`]
/// once its delay elapsed. Advances still sleeping are cancelled when the
/// scheduler is dropped.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    sender: UnboundedSender<PendingAdvance>,
    tasks: Vec<JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create the scheduler and the receiving end the event loop listens on.
    pub fn new() -> (Self, UnboundedReceiver<PendingAdvance>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                tasks: Vec::new(),
            },
            receiver,
        )
    }

    /// Number of advances still sleeping.
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration, advance: PendingAdvance) -> Scheduled {
        self.tasks.retain(|task| !task.is_finished());

        let sender = self.sender.clone();
        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing left to advance.
            let _ = sender.send(advance);
        }));

        Scheduled::Deferred
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
