//! Traits for temperature sensors.

use crate::error::Result;
use crate::sensor::data::Reading;
use std::sync::Arc;

/// A source of temperature readings.
///
/// Reads are synchronous and may block for as long as the hardware needs
/// (a DS18B20 conversion takes up to 750ms). Callers running on an async
/// runtime should move the call onto the blocking pool.
pub trait SensorReader: Send + Sync {
    /// Take one reading, in degrees Celsius.
    fn read(&self) -> Result<Reading>;
}

impl<R: SensorReader + ?Sized> SensorReader for Arc<R> {
    fn read(&self) -> Result<Reading> {
        (**self).read()
    }
}

impl<R: SensorReader + ?Sized> SensorReader for Box<R> {
    fn read(&self) -> Result<Reading> {
        (**self).read()
    }
}
