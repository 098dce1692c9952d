//! Imports sensors and measurements from JSON files.
//!
//! Both files hold a `{"data": [...]}` object. Sensor records need `id`, `latitude`
//! and `longitude`, while `name` and `group_id` are optional. Measurement records
//! refer to their sensor by `id` and carry `timestamp`, `pH`, `turbidity`,
//! `temperature` and `conductivity`.

use crate::core::sensor::NO_GROUP;
use crate::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Timestamp format of the generated files, for example `01/31/2021 01:00 PM`.
const US_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M %p";

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct SensorRecord {
    id: String,
    name: Option<String>,
    group_id: Option<GroupId>,
    latitude: f64,
    longitude: f64,
}

/// Group IDs come both as strings and as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum GroupId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
struct MeasurementRecord {
    id: String,
    timestamp: String,
    #[serde(rename = "pH")]
    ph: f64,
    turbidity: f64,
    temperature: f64,
    conductivity: f64,
}

pub fn read_files(sensors: &Path, measurements: &Path) -> Result<Vec<(Sensor, Vec<Measurement>)>> {
    info!("Reading `{}` and `{}`…", sensors.display(), measurements.display());
    read(
        BufReader::new(File::open(sensors)?),
        BufReader::new(File::open(measurements)?),
    )
}

/// Reads the sensors and attaches the measurements to them.
///
/// Measurements of unknown sensors are skipped.
pub fn read<S: Read, M: Read>(sensors: S, measurements: M) -> Result<Vec<(Sensor, Vec<Measurement>)>> {
    let sensors: Envelope<SensorRecord> = serde_json::from_reader(sensors)?;
    let measurements: Envelope<MeasurementRecord> = serde_json::from_reader(measurements)?;

    let mut data: Vec<(Sensor, Vec<Measurement>)> = sensors.data.into_iter().map(|record| (record.into(), Vec::new())).collect();
    let indices: HashMap<String, usize> = data
        .iter()
        .enumerate()
        .map(|(i, (sensor, _))| (sensor.id.clone(), i))
        .collect();

    let mut skipped = 0_usize;
    for record in measurements.data.into_iter() {
        match indices.get(&record.id) {
            Some(&i) => data[i].1.push(Measurement {
                timestamp: parse_timestamp(&record.timestamp)?,
                ph: record.ph,
                turbidity: record.turbidity,
                temperature: record.temperature,
                conductivity: record.conductivity,
            }),
            None => skipped += 1,
        }
    }
    if skipped != 0 {
        warn!("Skipped {} measurements of unknown sensors.", skipped);
    }
    Ok(data)
}

/// Parses an RFC 3339 timestamp or a `%m/%d/%Y %I:%M %p` one, the latter is taken as UTC.
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => Ok(NaiveDateTime::parse_from_str(timestamp, US_TIMESTAMP_FORMAT)?.and_utc()),
    }
}

impl From<SensorRecord> for Sensor {
    fn from(record: SensorRecord) -> Self {
        Self {
            name: record.name.unwrap_or_else(|| record.id.clone()),
            group_id: match record.group_id {
                Some(GroupId::Text(group_id)) => group_id,
                Some(GroupId::Number(group_id)) => group_id.to_string(),
                None => NO_GROUP.to_string(),
            },
            id: record.id,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSORS: &str = r#"{
        "data": [
            {"id": "s1", "name": "Fjord A", "group_id": "2", "latitude": 59.9, "longitude": 10.7},
            {"id": "a6f1", "latitude": 63.3, "longitude": 10.4},
            {"id": "b7c2", "group_id": 3, "latitude": 63.4, "longitude": 10.5}
        ]
    }"#;

    const MEASUREMENTS: &str = r#"{
        "data": [
            {"id": "s1", "timestamp": "2024-01-01T00:00:00Z", "pH": 7.1, "turbidity": 2, "temperature": 10, "conductivity": 300},
            {"id": "s1", "timestamp": "2024-01-02T00:00:00Z", "pH": 7.3, "turbidity": 1, "temperature": 11, "conductivity": 310},
            {"id": "a6f1", "latitude": 63.3, "longitude": 10.4, "timestamp": "01/01/2021 01:00 PM", "pH": 6.2, "temperature": 9.5, "conductivity": 512.3, "turbidity": 0.7},
            {"id": "unknown", "timestamp": "01/01/2021 01:00 PM", "pH": 6.2, "temperature": 9.5, "conductivity": 512.3, "turbidity": 0.7}
        ]
    }"#;

    #[test]
    fn read_ok() -> Result {
        let data = read(SENSORS.as_bytes(), MEASUREMENTS.as_bytes())?;
        assert_eq!(data.len(), 3);

        let (fjord_a, measurements) = &data[0];
        assert_eq!(fjord_a.name, "Fjord A");
        assert_eq!(fjord_a.group_id, "2");
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[1].ph, 7.3);

        let (generated, measurements) = &data[1];
        assert_eq!(generated.name, "a6f1");
        assert_eq!(generated.group_id, NO_GROUP);
        assert_eq!(measurements[0].timestamp, Utc.with_ymd_and_hms(2021, 1, 1, 13, 0, 0).unwrap());

        let (numbered, measurements) = &data[2];
        assert_eq!(numbered.group_id, "3");
        assert!(measurements.is_empty());
        Ok(())
    }

    #[test]
    fn bad_timestamp() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn rfc3339_with_offset() -> Result {
        assert_eq!(
            parse_timestamp("2024-01-01T01:00:00+01:00")?,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        Ok(())
    }
}
