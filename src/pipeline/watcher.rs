//! Background sensor polling.
//!
//! [`TemperatureWatcher`] owns a polling task that reads the sensor once per
//! tick and publishes each successful reading as an [`Event`] on a bounded
//! channel. The consumer side waits on [`Watcher::next_event`]; nothing spins.

use crate::error::{MonitorError, Result};
use crate::sensor::{data::Event, traits::SensorReader};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

/// A source of events produced at a fixed cadence.
#[async_trait]
pub trait Watcher: Send {
    /// Start producing events in the background.
    fn watch(&mut self) -> Result<()>;

    /// Wait for the next event in production order.
    ///
    /// Returns `None` once the watcher has shut down, or if it was never
    /// started.
    async fn next_event(&mut self) -> Option<Event>;
}

/// Polls a [`SensorReader`] on a fixed interval.
pub struct TemperatureWatcher<R> {
    reader: Arc<R>,
    interval: Duration,
    capacity: usize,
    events: Option<mpsc::Receiver<Event>>,
    task: Option<JoinHandle<()>>,
}

impl<R: SensorReader + 'static> TemperatureWatcher<R> {
    pub fn new(interval: Duration, reader: R) -> Self {
        Self {
            reader: Arc::new(reader),
            interval,
            capacity: crate::DEFAULT_EVENT_CAPACITY,
            events: None,
            task: None,
        }
    }

    /// Set how many unconsumed events may queue up before polling waits.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the polling task has been started and is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

#[async_trait]
impl<R: SensorReader + 'static> Watcher for TemperatureWatcher<R> {
    fn watch(&mut self) -> Result<()> {
        if self.task.is_some() {
            return Err(MonitorError::watcher_error("Watcher already started"));
        }
        if self.interval.is_zero() {
            return Err(MonitorError::watcher_error("Polling interval must be non-zero"));
        }
        if self.capacity == 0 {
            return Err(MonitorError::watcher_error("Event capacity must be non-zero"));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| MonitorError::watcher_error("Watcher requires a Tokio runtime"))?;

        let (tx, rx) = mpsc::channel(self.capacity);
        let reader = Arc::clone(&self.reader);
        self.task = Some(runtime.spawn(poll_sensor(reader, self.interval, tx)));
        self.events = Some(rx);

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Watcher started");
        Ok(())
    }

    async fn next_event(&mut self) -> Option<Event> {
        match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => None,
        }
    }
}

impl<R> Drop for TemperatureWatcher<R> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_sensor<R: SensorReader + 'static>(
    reader: Arc<R>,
    period: Duration,
    events: mpsc::Sender<Event>,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = events.closed() => break,
        }

        let sensor = Arc::clone(&reader);
        let reading = match task::spawn_blocking(move || sensor.read()).await {
            Ok(Ok(reading)) => reading,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Can not read from sensor, skipping tick");
                continue;
            }
            Err(err) => {
                tracing::error!(error = %err, "Sensor read task failed, skipping tick");
                continue;
            }
        };

        let event = reading.to_event();
        tracing::debug!(event = %event, "Publishing event");
        if events.send(event).await.is_err() {
            break;
        }
    }

    tracing::debug!("Event consumer gone, watcher stopped");
}
