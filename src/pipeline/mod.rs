//! The watch -> decide -> decorate -> notify pipeline.
//!
//! [`watcher`] turns sensor readings into a stream of events on a background
//! task, [`strategy`] decides which events are worth a notification and how
//! they are rendered, and [`controller`] drives the loop until it is told to
//! stop.

pub mod controller;
pub mod strategy;
pub mod watcher;

// Re-export commonly used items
pub use controller::{stop_channel, Controller, ControllerState, RunSummary};
pub use strategy::{NotifyStrategy, PassThroughStrategy, ThresholdStrategy};
pub use watcher::{TemperatureWatcher, Watcher};
