//! Sensor reader backed by the hardware components `sysinfo` enumerates.

use crate::error::{MonitorError, Result};
use crate::sensor::{data::Reading, traits::SensorReader};
use std::sync::Mutex;
use sysinfo::Components;

/// Reads the temperature of a hardware component (CPU package, SoC, ...).
pub struct ComponentReader {
    components: Mutex<Components>,
    label_filter: Option<String>,
}

impl ComponentReader {
    /// Create a reader for the first component whose label contains
    /// `label_filter`, or the first component at all when no filter is given.
    pub fn new(label_filter: Option<String>) -> Result<Self> {
        let components = Components::new_with_refreshed_list();

        if components.list().is_empty() {
            return Err(MonitorError::sensor_error(
                "No temperature components available",
            ));
        }

        for component in components.list() {
            tracing::debug!(label = component.label(), "Found temperature component");
        }

        Ok(Self {
            components: Mutex::new(components),
            label_filter,
        })
    }

    fn matches(&self, label: &str) -> bool {
        match &self.label_filter {
            Some(filter) => label.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        }
    }
}

impl SensorReader for ComponentReader {
    fn read(&self) -> Result<Reading> {
        let mut components = self
            .components
            .lock()
            .map_err(|_| MonitorError::sensor_error("Component list lock poisoned"))?;
        components.refresh();

        let component = components
            .list()
            .iter()
            .find(|c| self.matches(c.label()))
            .ok_or_else(|| {
                MonitorError::sensor_error(format!(
                    "No component matches label {:?}",
                    self.label_filter.as_deref().unwrap_or_default()
                ))
            })?;

        let celsius = f64::from(component.temperature());
        if !celsius.is_finite() {
            return Err(MonitorError::sensor_error(format!(
                "Component {} reported no temperature",
                component.label()
            )));
        }

        Ok(Reading::new(celsius))
    }
}
