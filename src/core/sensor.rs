//! Sensor record.

use crate::prelude::*;

/// Group identifier of a sensor that belongs to no group.
pub const NO_GROUP: &str = "0";

/// A physical monitoring device with a location and a group membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,

    /// Human-readable sensor name.
    pub name: String,

    /// [`NO_GROUP`] when the sensor is not a part of any group.
    pub group_id: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl Sensor {
    pub fn has_group(&self) -> bool {
        self.group_id != NO_GROUP
    }

    /// Sensor page link.
    pub fn href(&self) -> String {
        format!("/sensors/{}", self.id)
    }

    /// Group page link, unless the sensor is not grouped.
    pub fn group_href(&self) -> Option<String> {
        if self.has_group() {
            Some(format!("/groups/{}", self.group_id))
        } else {
            None
        }
    }

    pub fn position(&self) -> Position {
        Position {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// Map coordinates in the shape Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    /// Mean position of the sensors, `None` for no sensors.
    pub fn centroid<'a, I: IntoIterator<Item = &'a Sensor>>(sensors: I) -> Option<Self> {
        let (count, lat, lng) = sensors
            .into_iter()
            .fold((0_usize, 0.0, 0.0), |(count, lat, lng), sensor| {
                (count + 1, lat + sensor.latitude, lng + sensor.longitude)
            });
        if count == 0 {
            return None;
        }
        Some(Self {
            lat: lat / count as f64,
            lng: lng / count as f64,
        })
    }
}
