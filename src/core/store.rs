//! Data access the pages depend on.

use crate::prelude::*;

/// Source of sensors and their measurements.
pub trait Store: Send + Sync {
    /// Returns `None` for an unknown sensor.
    fn sensor_by_id(&self, sensor_id: &str) -> Result<Option<Sensor>>;

    /// All the sensor measurements, in storage order.
    fn measurements_by_id(&self, sensor_id: &str) -> Result<Vec<Measurement>>;

    fn sensors(&self) -> Result<Vec<Sensor>>;

    fn group_sensors(&self, group_id: &str) -> Result<Vec<Sensor>>;
}
