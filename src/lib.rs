//! # thermowatch - temperature threshold notifier
//!
//! Polls a temperature sensor at a fixed interval and sends an HTTP GET to a
//! remote endpoint whenever the temperature rises above a configured
//! threshold. Repeated readings above the threshold produce a single
//! notification until the temperature drops back.
//!
//! ## Pipeline
//!
//! - **Sensor**: a [`SensorReader`] produces one [`Reading`] on demand
//! - **Watcher**: polls the reader and publishes [`Event`]s on a bounded channel
//! - **Strategy**: rising-edge detection and payload decoration
//! - **Notifier**: `GET {endpoint}/{payload}`
//! - **Controller**: drives the loop until stopped
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use thermowatch::{
//!     stop_channel, Controller, SysfsReader, TemperatureUnit, TemperatureWatcher,
//!     ThresholdStrategy, UrlPathNotifier,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = SysfsReader::new("/sys/class/thermal/thermal_zone0/temp");
//!     let watcher = TemperatureWatcher::new(Duration::from_secs(2), reader);
//!     let notifier = UrlPathNotifier::new("http://localhost:8080/push", Duration::from_secs(10))?;
//!     let strategy = ThresholdStrategy::new(32.5, TemperatureUnit::Celsius);
//!
//!     let (_stop, signal) = stop_channel();
//!     let mut controller = Controller::new(signal, watcher, strategy, notifier);
//!     controller.start().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod notifier;
pub mod pipeline;
pub mod sensor;

// Re-export public API
pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use notifier::{Notifier, UrlPathNotifier};
pub use pipeline::{
    controller::{stop_channel, Controller, ControllerState, RunSummary, StopHandle, StopSignal},
    strategy::{NotifyStrategy, PassThroughStrategy, ThresholdStrategy},
    watcher::{TemperatureWatcher, Watcher},
};
pub use sensor::{
    component::ComponentReader,
    data::{Event, Reading, TemperatureUnit},
    sysfs::SysfsReader,
    traits::SensorReader,
};

/// The default remote endpoint notifications are sent to
pub const DEFAULT_REMOTE_ENDPOINT: &str =
    "http://104.155.11.172:8080/api/v1/proxy/namespaces/default/services/demo/push";

/// The default temperature threshold
pub const DEFAULT_THRESHOLD: f64 = 32.5;

/// The default sensor polling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// The default timeout for a single notification request in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// The default capacity of the watcher event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// The default sysfs temperature file
pub const DEFAULT_SENSOR_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";
