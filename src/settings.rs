//! # Settings
//!
//! The dashboard is configured with a single TOML file
//! which must contain exactly one [`Settings`](struct.Settings.html) object.
//! Every key is optional.
//!
//! ## Example
//!
//! ```toml
//! http_port = 8080
//! http_address = "0.0.0.0"
//! page_max_age_secs = 60
//! loading_refresh_secs = 2
//!
//! [map]
//! zoom = 11
//! default_center = { lat = 63.43, lng = 10.39 }
//!
//! [generator]
//! sensor_count = 5
//! group_count = 2
//! days = 31
//! ```

use crate::prelude::*;
use std::fs::read_to_string;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

/// Reads the settings file. A missing file means the default settings.
pub fn read(path: &Path) -> Result<Settings> {
    if !path.exists() {
        warn!("Settings file `{}` is missing, using the defaults.", path.display());
        return Ok(Settings::default());
    }
    Ok(toml::from_str(&read_to_string(path)?)?)
}

/// Represents a root settings object.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Web server port.
    pub http_port: u16,

    /// Web server address.
    pub http_address: IpAddr,

    /// Loaded sensor pages older than this get reloaded in the background.
    pub page_max_age_secs: u64,

    /// How often a page that is still loading asks the browser to refresh.
    pub loading_refresh_secs: u32,

    pub map: MapSettings,

    pub generator: GeneratorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: 8080,
            http_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            page_max_age_secs: 60,
            loading_refresh_secs: 2,
            map: MapSettings::default(),
            generator: GeneratorSettings::default(),
        }
    }
}

impl Settings {
    pub fn page_max_age(&self) -> Duration {
        Duration::from_secs(self.page_max_age_secs)
    }
}

/// Map widget settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    /// [Leaflet tile layer](https://leafletjs.com/reference.html#tilelayer) URL template.
    pub tile_url: String,

    pub attribution: String,

    pub zoom: u8,

    /// Map centre when there are no sensors to centre on.
    pub default_center: Position,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a>"#.into(),
            zoom: 11,
            default_center: Position {
                lat: 63.4305,
                lng: 10.3951,
            },
        }
    }
}

/// Synthetic data generator settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub sensor_count: usize,

    /// Sensors get spread over this many groups. Zero puts every sensor outside of any group.
    pub group_count: usize,

    /// One measurement per sensor and day.
    pub days: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            sensor_count: 5,
            group_count: 2,
            days: 31,
        }
    }
}
