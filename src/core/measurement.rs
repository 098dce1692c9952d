//! Measurements and the measured parameters.

use crate::prelude::*;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One timestamped reading bundling all the parameter values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "pH")]
    pub ph: f64,

    /// Nephelometric turbidity units.
    pub turbidity: f64,

    /// Celsius.
    pub temperature: f64,

    /// Microsiemens per centimetre.
    pub conductivity: f64,
}

impl Measurement {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Turbidity => self.turbidity,
            Parameter::Temperature => self.temperature,
            Parameter::Conductivity => self.conductivity,
        }
    }
}

/// Measured parameter, one chart each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "pH")]
    Ph,

    #[serde(rename = "turbidity")]
    Turbidity,

    #[serde(rename = "temperature")]
    Temperature,

    #[serde(rename = "conductivity")]
    Conductivity,
}

impl Parameter {
    /// Chart order on the sensor page.
    pub const ALL: [Parameter; 4] = [
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::Temperature,
        Parameter::Conductivity,
    ];

    /// Field name in measurement records.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Turbidity => "turbidity",
            Parameter::Temperature => "temperature",
            Parameter::Conductivity => "conductivity",
        }
    }

    /// Chart title.
    pub fn title(self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Turbidity => "Turbiditet",
            Parameter::Temperature => "Temperatur",
            Parameter::Conductivity => "Konduktivitet",
        }
    }

    pub fn chart_id(self) -> u32 {
        match self {
            Parameter::Ph => 1,
            Parameter::Turbidity => 2,
            Parameter::Temperature => 3,
            Parameter::Conductivity => 4,
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self> {
        Parameter::ALL
            .iter()
            .copied()
            .find(|parameter| parameter.key() == key)
            .ok_or_else(|| Error::new(format!("unknown parameter `{}`", key)))
    }
}
