//! Sensor reader backed by a sysfs temperature file.
//!
//! Two formats are understood:
//!
//! - the kernel thermal zone interface (`/sys/class/thermal/thermal_zoneN/temp`),
//!   a single integer in millidegrees Celsius
//! - the 1-Wire `w1_slave` file of a DS18B20, where the first line ends with
//!   the CRC verdict and the second carries `t=<millidegrees>`

use crate::error::{MonitorError, Result};
use crate::sensor::{data::Reading, traits::SensorReader};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads temperatures from a sysfs file on every call.
#[derive(Debug, Clone)]
pub struct SysfsReader {
    path: PathBuf,
}

impl SysfsReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SensorReader for SysfsReader {
    fn read(&self) -> Result<Reading> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            MonitorError::sensor_error(format!("{}: {}", self.path.display(), e))
        })?;
        let celsius = parse_temperature(&contents)?;
        tracing::debug!(path = %self.path.display(), celsius, "Sensor read");
        Ok(Reading::new(celsius))
    }
}

/// Parse the contents of a sysfs temperature file into degrees Celsius.
pub fn parse_temperature(contents: &str) -> Result<f64> {
    let millidegrees = if contents.contains("t=") {
        parse_w1_slave(contents)?
    } else {
        contents.trim()
    };

    millidegrees
        .parse::<i64>()
        .map(|milli| milli as f64 / 1000.0)
        .map_err(|_| {
            MonitorError::sensor_error(format!("Malformed temperature value: {:?}", millidegrees))
        })
}

fn parse_w1_slave(contents: &str) -> Result<&str> {
    let mut lines = contents.lines();

    let crc_line = lines.next().unwrap_or_default();
    if !crc_line.trim_end().ends_with("YES") {
        return Err(MonitorError::sensor_error("1-Wire CRC check failed"));
    }

    lines
        .next()
        .and_then(|line| line.split_once("t="))
        .map(|(_, value)| value.trim())
        .ok_or_else(|| MonitorError::sensor_error("1-Wire reply has no temperature field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const W1_OK: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
                         72 01 4b 46 7f ff 0e 10 57 t=23125\n";

    #[test]
    fn test_thermal_zone_format() {
        assert_eq!(parse_temperature("48312\n").unwrap(), 48.312);
        assert_eq!(parse_temperature("-2500").unwrap(), -2.5);
    }

    #[test]
    fn test_w1_slave_format() {
        assert_eq!(parse_temperature(W1_OK).unwrap(), 23.125);
    }

    #[test]
    fn test_w1_slave_crc_failure() {
        let bad = W1_OK.replace("YES", "NO");
        let err = parse_temperature(&bad).unwrap_err();
        assert!(err.to_string().contains("CRC"));
    }

    #[test]
    fn test_garbage_is_a_sensor_error() {
        assert!(matches!(
            parse_temperature("not a number"),
            Err(MonitorError::SensorRead(_))
        ));
        assert!(parse_temperature("").is_err());
    }

    #[test]
    fn test_missing_file_is_a_sensor_error() {
        let reader = SysfsReader::new("/nonexistent/thermowatch/temp");
        assert!(matches!(reader.read(), Err(MonitorError::SensorRead(_))));
    }

    #[test]
    fn test_reads_file_contents() {
        let path = std::env::temp_dir().join(format!("thermowatch-sysfs-{}", std::process::id()));
        fs::write(&path, "33000\n").unwrap();

        let reading = SysfsReader::new(&path).read().unwrap();
        assert_eq!(reading.celsius, 33.0);

        fs::remove_file(&path).ok();
    }
}
