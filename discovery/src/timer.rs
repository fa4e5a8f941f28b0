use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::trace;

/// Seconds spent in the current session.
///
/// Clones share one counter. The counter only goes up; it has no pause and is
/// not touched by [`SurveyController::reset`](crate::SurveyController::reset).
#[derive(Debug, Clone, Default)]
pub struct ElapsedTimer {
    seconds: Arc<AtomicU64>,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more second and return the new total.
    pub fn tick(&self) -> u64 {
        self.seconds.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Elapsed time as `m:ss`.
    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_seconds())
    }

    /// Tick once per second on the Tokio timer until the returned guard is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(&self) -> TimerGuard {
        let timer = self.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let seconds = timer.tick();
                trace!(seconds, "session timer tick");
            }
        });
        TimerGuard { task }
    }
}

/// Stops the ticking task of [`ElapsedTimer::spawn`] when dropped.
#[derive(Debug)]
pub struct TimerGuard {
    task: JoinHandle<()>,
}

impl TimerGuard {
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Format seconds as minutes and zero-padded seconds, e.g. `2:05`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
