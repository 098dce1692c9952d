//! Synthetic sensors and measurements for trying the dashboard out.
//!
//! Sensors are scattered over the Trondheim area and measured once a day.
//! Value distributions:
//!
//! - pH: normal, mean 7, three standard deviations cover ±3.5;
//! - temperature: uniform within 5..15 ℃;
//! - [conductivity](https://en.wikipedia.org/wiki/Conductivity_(electrolytic)): normal within roughly 200..800 µS/cm;
//! - [turbidity](https://www.lenntech.com/turbidity.htm): gamma with shape 1 and scale 1.5.

use crate::core::sensor::NO_GROUP;
use crate::prelude::*;
use crate::settings::GeneratorSettings;
use chrono::Duration;
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::{Gamma, Normal, Uniform};
use uuid::Builder;

/// South-west corner of the area.
pub const MIN_POSITION: Position = Position {
    lat: 63.275_016_451_033_615,
    lng: 10.221_439_450_323_036,
};

/// North-east corner of the area.
pub const MAX_POSITION: Position = Position {
    lat: 63.447_691_000_209_21,
    lng: 10.760_151_547_420_39,
};

const TEMPERATURE_RANGE: (f64, f64) = (5.0, 15.0);
const CONDUCTIVITY_RANGE: (f64, f64) = (200.0, 800.0);
const TURBIDITY_SHAPE: f64 = 1.0;
const TURBIDITY_SCALE: f64 = 1.5;

/// First measurement time.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, 13, 0, 0).unwrap()
}

/// Generates the sensors and their daily measurements.
pub fn generate<R: Rng>(rng: &mut R, settings: &GeneratorSettings) -> Result<Vec<(Sensor, Vec<Measurement>)>> {
    let distributions = Distributions::new()?;
    let start_time = start_time();

    let mut data = Vec::with_capacity(settings.sensor_count);
    for i in 0..settings.sensor_count {
        let sensor = Sensor {
            id: sensor_id(&mut *rng),
            name: format!("Sensor {}", i + 1),
            group_id: group_id(i, settings.group_count),
            latitude: rng.gen_range(MIN_POSITION.lat..MAX_POSITION.lat),
            longitude: rng.gen_range(MIN_POSITION.lng..MAX_POSITION.lng),
        };
        let mut measurements = Vec::with_capacity(settings.days as usize);
        for day in 0..settings.days {
            measurements.push(distributions.sample(&mut *rng, start_time + Duration::days(day.into())));
        }
        data.push((sensor, measurements));
    }
    Ok(data)
}

/// Random 32-hex-digit sensor ID drawn from the generator so that a seed reproduces it.
fn sensor_id<R: Rng>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().simple().to_string()
}

/// Deals the sensors round-robin into `group_count` groups numbered from 1.
fn group_id(i: usize, group_count: usize) -> String {
    if group_count == 0 {
        NO_GROUP.to_string()
    } else {
        (i % group_count + 1).to_string()
    }
}

struct Distributions {
    ph: Normal,
    temperature: Uniform,
    conductivity: Normal,
    turbidity: Gamma,
}

impl Distributions {
    fn new() -> Result<Self> {
        let (min_conductivity, max_conductivity) = CONDUCTIVITY_RANGE;
        let mean_conductivity = (min_conductivity + max_conductivity) / 2.0;
        Ok(Self {
            ph: Normal::new(7.0, 3.5 / 3.0)?,
            temperature: Uniform::new(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)?,
            conductivity: Normal::new(mean_conductivity, (max_conductivity - mean_conductivity) / 3.0)?,
            // Parameterized by rate.
            turbidity: Gamma::new(TURBIDITY_SHAPE, 1.0 / TURBIDITY_SCALE)?,
        })
    }

    fn sample<R: Rng>(&self, rng: &mut R, timestamp: DateTime<Utc>) -> Measurement {
        Measurement {
            timestamp,
            ph: round2(self.ph.sample(rng)),
            turbidity: round2(self.turbidity.sample(rng)),
            temperature: round2(self.temperature.sample(rng)),
            conductivity: round2(self.conductivity.sample(rng)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
