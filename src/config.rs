//! Runtime configuration.

use crate::error::{MonitorError, Result};
use crate::sensor::data::TemperatureUnit;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a monitoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Base URL notifications are appended to
    pub remote_endpoint: String,
    /// Threshold in degrees Celsius
    pub threshold: f64,
    /// Unit of the notification payload
    pub units: TemperatureUnit,
    /// Sensor polling interval in milliseconds
    pub interval_ms: u64,
    /// Timeout for one notification request in milliseconds
    pub request_timeout_ms: u64,
    /// Capacity of the watcher event channel
    pub event_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: crate::DEFAULT_REMOTE_ENDPOINT.to_string(),
            threshold: crate::DEFAULT_THRESHOLD,
            units: TemperatureUnit::Celsius,
            interval_ms: crate::DEFAULT_INTERVAL_MS,
            request_timeout_ms: crate::DEFAULT_REQUEST_TIMEOUT_MS,
            event_capacity: crate::DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl MonitorConfig {
    /// Set the remote endpoint.
    pub fn with_remote_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote_endpoint = endpoint.into();
        self
    }

    /// Set the temperature threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the payload unit.
    pub fn with_units(mut self, units: TemperatureUnit) -> Self {
        self.units = units;
        self
    }

    /// Set the polling interval.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the notification request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Set the event channel capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.remote_endpoint.trim().is_empty() {
            return Err(MonitorError::config_error("Remote endpoint must not be empty"));
        }
        if !self.threshold.is_finite() {
            return Err(MonitorError::config_error(format!(
                "Temperature threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.interval_ms == 0 {
            return Err(MonitorError::config_error("Polling interval must be non-zero"));
        }
        if self.request_timeout_ms == 0 {
            return Err(MonitorError::config_error("Request timeout must be non-zero"));
        }
        if self.event_capacity == 0 {
            return Err(MonitorError::config_error("Event capacity must be non-zero"));
        }
        Ok(())
    }
}
