//! Per-event notification decisions and payload formatting.

use crate::error::Result;
use crate::sensor::data::{Event, TemperatureUnit};

/// Decides whether an event triggers a notification and renders its payload.
pub trait NotifyStrategy: Send {
    /// Evaluate one event. Events are fed in arrival order and the strategy
    /// may update internal state on every call.
    fn should_notify(&mut self, event: &Event) -> bool;

    /// Render the outbound payload for an event.
    fn decorate(&self, event: &Event) -> Result<String>;
}

/// Notifies on every event and forwards it untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughStrategy;

impl NotifyStrategy for PassThroughStrategy {
    fn should_notify(&mut self, _event: &Event) -> bool {
        true
    }

    fn decorate(&self, event: &Event) -> Result<String> {
        Ok(event.as_str().to_string())
    }
}

/// Rising-edge threshold detector.
///
/// Fires once when the temperature goes above the threshold and stays quiet
/// until a reading at or below the threshold re-arms it. Payloads are
/// converted to the output unit chosen at construction and rendered with
/// three decimals, e.g. `34.600 C`.
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    threshold: f64,
    unit: TemperatureUnit,
    exceeded: bool,
}

impl ThresholdStrategy {
    /// `threshold` is in degrees Celsius, like the readings it is compared to.
    pub fn new(threshold: f64, unit: TemperatureUnit) -> Self {
        Self {
            threshold,
            unit,
            exceeded: false,
        }
    }

    pub fn celsius(threshold: f64) -> Self {
        Self::new(threshold, TemperatureUnit::Celsius)
    }

    pub fn fahrenheit(threshold: f64) -> Self {
        Self::new(threshold, TemperatureUnit::Fahrenheit)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Whether the last evaluated value was above the threshold.
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

impl NotifyStrategy for ThresholdStrategy {
    fn should_notify(&mut self, event: &Event) -> bool {
        let value = match event.value() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(event = %event, "Could not process event, will not notify");
                return false;
            }
        };

        let above = value > self.threshold;
        let rising = above && !self.exceeded;
        self.exceeded = above;

        if rising {
            tracing::info!(value, threshold = self.threshold, "Threshold exceeded");
        }
        rising
    }

    fn decorate(&self, event: &Event) -> Result<String> {
        let celsius = event.value()?;
        Ok(format!(
            "{:.3} {}",
            self.unit.from_celsius(celsius),
            self.unit.suffix()
        ))
    }
}
