//! The control loop tying watcher, strategy and notifier together.

use crate::error::{MonitorError, Result};
use crate::notifier::Notifier;
use crate::pipeline::{strategy::NotifyStrategy, watcher::Watcher};
use crate::sensor::data::Event;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Lifecycle of a [`Controller`]. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    Running,
    Stopped,
}

/// Counters for one controller run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Events taken off the watcher
    pub events_seen: u64,
    /// Notifications the endpoint accepted
    pub notifications_sent: u64,
    /// Events that passed the strategy but could not be decorated
    pub decorate_failures: u64,
    /// Notifications that failed in transport or with a bad status
    pub notify_failures: u64,
}

/// Create a linked stop handle and signal.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), StopSignal(rx))
}

/// Fires the stop signal. Dropping the handle also counts as a stop.
#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.send_replace(true);
    }
}

/// Observed by the controller once per loop iteration.
#[derive(Debug, Clone)]
pub struct StopSignal(watch::Receiver<bool>);

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Resolve once a stop has been requested.
    pub async fn stopped(&mut self) {
        // An error means the handle is gone, which is a stop as well.
        let _ = self.0.wait_for(|stopped| *stopped).await;
    }
}

/// Runs the poll -> decide -> decorate -> notify loop.
pub struct Controller<W, S, N> {
    stop: StopSignal,
    watcher: W,
    strategy: S,
    notifier: N,
    state: ControllerState,
    summary: RunSummary,
}

impl<W, S, N> Controller<W, S, N>
where
    W: Watcher,
    S: NotifyStrategy,
    N: Notifier,
{
    pub fn new(stop: StopSignal, watcher: W, strategy: S, notifier: N) -> Self {
        Self {
            stop,
            watcher,
            strategy,
            notifier,
            state: ControllerState::Idle,
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Start the watcher and process events until stopped.
    ///
    /// Returns when the stop signal fires or the watcher's event stream ends.
    /// A notification already in flight is allowed to finish; no event is
    /// taken off the watcher once the stop has been observed.
    pub async fn start(&mut self) -> Result<RunSummary> {
        if self.state != ControllerState::Idle {
            return Err(MonitorError::controller_error(format!(
                "Cannot start a controller in state {:?}",
                self.state
            )));
        }

        if let Err(err) = self.watcher.watch() {
            self.state = ControllerState::Stopped;
            return Err(err);
        }
        self.state = ControllerState::Running;
        tracing::info!("Controller running");

        loop {
            if self.stop.is_stopped() {
                tracing::info!("Stop requested");
                break;
            }

            let next = tokio::select! {
                biased;
                _ = self.stop.stopped() => {
                    tracing::info!("Stop requested");
                    break;
                }
                event = self.watcher.next_event() => event,
            };

            let Some(event) = next else {
                tracing::warn!("Watcher event stream ended");
                break;
            };
            self.handle_event(event).await;
        }

        self.state = ControllerState::Stopped;
        tracing::info!(
            events = self.summary.events_seen,
            sent = self.summary.notifications_sent,
            "Controller stopped"
        );
        Ok(self.summary)
    }

    async fn handle_event(&mut self, event: Event) {
        self.summary.events_seen += 1;

        if !self.strategy.should_notify(&event) {
            return;
        }

        let payload = match self.strategy.decorate(&event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(event = %event, error = %err, "Could not transform event");
                self.summary.decorate_failures += 1;
                return;
            }
        };

        match self.notifier.notify(&payload).await {
            Ok(()) => {
                self.summary.notifications_sent += 1;
                tracing::info!(payload = %payload, "Notification sent");
            }
            Err(err) => {
                self.summary.notify_failures += 1;
                tracing::error!(payload = %payload, error = %err, "Error during notify");
            }
        }
    }
}
