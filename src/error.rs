//! Error handling for the thermowatch crate.

/// A specialized `Result` type for thermowatch operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for thermowatch operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The sensor could not produce a reading
    #[error("Sensor read failed: {0}")]
    SensorRead(String),

    /// An event did not contain a usable number
    #[error("Could not parse event {event:?} as a temperature")]
    Parse { event: String },

    /// The notification request could not be sent
    #[error("Failed to notify {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote endpoint answered with something other than 200
    #[error("Unexpected status during notify: {0}")]
    UnexpectedStatus(u16),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Watcher lifecycle misuse
    #[error("Watcher error: {0}")]
    Watcher(String),

    /// Controller lifecycle misuse
    #[error("Controller error: {0}")]
    Controller(String),
}

impl MonitorError {
    /// Create a new sensor read error
    pub fn sensor_error(msg: impl Into<String>) -> Self {
        Self::SensorRead(msg.into())
    }

    /// Create a new parse error for the given event text
    pub fn parse_error(event: impl Into<String>) -> Self {
        Self::Parse {
            event: event.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new watcher error
    pub fn watcher_error(msg: impl Into<String>) -> Self {
        Self::Watcher(msg.into())
    }

    /// Create a new controller error
    pub fn controller_error(msg: impl Into<String>) -> Self {
        Self::Controller(msg.into())
    }
}
