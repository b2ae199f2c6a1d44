//! Temperature sensor access and the reading/event data model.
//!
//! The pipeline only depends on [`SensorReader`]; the concrete readers here
//! cover the sysfs thermal interfaces found on a Raspberry Pi and whatever
//! hardware components `sysinfo` can enumerate.

pub mod component;
pub mod data;
pub mod sysfs;
pub mod traits;

// Re-export commonly used items
pub use data::{Event, Reading, TemperatureUnit};
pub use traits::SensorReader;
