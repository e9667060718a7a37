//! Periodic auto-save scheduling on a tokio runtime.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Default auto-save cadence, also substituted when a caller asks for a
/// zero interval.
pub const DEFAULT_AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Owns at most one periodic auto-save task.
///
/// `start` always cancels any existing task before installing a new one,
/// so two timers can never run at once. The callback runs to completion on
/// each tick; ticks never overlap.
pub struct AutoSaveScheduler {
    handle: tokio::runtime::Handle,
    task: Option<JoinHandle<()>>,
}

impl AutoSaveScheduler {
    /// Create a scheduler that spawns onto the given runtime handle.
    pub const fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle, task: None }
    }

    /// Install the periodic task, cancelling any existing one first. A
    /// zero interval is replaced with [`DEFAULT_AUTO_SAVE_INTERVAL`]; a
    /// zero-period timer would panic inside the spawned task and silently
    /// kill auto-save.
    pub fn start<F>(&mut self, callback: F, interval: Duration)
    where
        F: Fn() + Send + 'static,
    {
        self.stop();
        let interval = if interval.is_zero() {
            DEFAULT_AUTO_SAVE_INTERVAL
        } else {
            interval
        };
        tracing::debug!(?interval, "auto-save scheduler started");
        self.task = Some(self.handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately; skip it
            // so the first save happens one full interval after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        }));
    }

    /// Cancel the periodic task; safe to call when none is running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("auto-save scheduler stopped");
        }
    }

    /// Whether a periodic task is currently installed.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for AutoSaveScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
