//! Data structures for readings and events.

use crate::error::{MonitorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single temperature reading taken from a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub celsius: f64,
    /// When the reading was taken
    pub taken_at: DateTime<Utc>,
}

impl Reading {
    /// Create a reading stamped with the current time.
    pub fn new(celsius: f64) -> Self {
        Self {
            celsius,
            taken_at: Utc::now(),
        }
    }

    /// Serialize the reading into the event passed down the pipeline.
    pub fn to_event(&self) -> Event {
        Event::new(self.celsius.to_string())
    }
}

/// Textual form of a reading as it travels from watcher to strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(String);

impl Event {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the event as a finite temperature value. Surrounding
    /// whitespace is not accepted.
    pub fn value(&self) -> Result<f64> {
        match self.0.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MonitorError::parse_error(self.0.as_str())),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Event {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Event {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<Reading> for Event {
    fn from(reading: Reading) -> Self {
        reading.to_event()
    }
}

/// Unit a notification payload is expressed in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TemperatureUnit {
    #[default]
    #[value(name = "Celsius", alias = "celsius")]
    Celsius,
    #[value(name = "Fahrenheit", alias = "fahrenheit")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius value into this unit.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Suffix appended to decorated payloads.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_value_parsing() {
        assert_eq!(Event::from("33.1").value().unwrap(), 33.1);
        assert_eq!(Event::from("21").value().unwrap(), 21.0);
        assert!(matches!(
            Event::from("abc").value(),
            Err(MonitorError::Parse { .. })
        ));
    }

    #[test]
    fn test_padded_events_are_rejected() {
        assert!(Event::from(" 21 ").value().is_err());
        assert!(Event::from("33.0\n").value().is_err());
    }

    #[test]
    fn test_non_finite_events_are_rejected() {
        assert!(Event::from("NaN").value().is_err());
        assert!(Event::from("inf").value().is_err());
    }

    #[test]
    fn test_reading_to_event_is_lossless() {
        let reading = Reading::new(34.6);
        let event = reading.to_event();
        assert_eq!(event.as_str(), "34.6");
        assert_eq!(event.value().unwrap(), 34.6);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(TemperatureUnit::Celsius.from_celsius(34.6), 34.6);
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(100.0), 212.0);
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(-40.0), -40.0);
    }
}
