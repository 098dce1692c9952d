//! Sensor page state.
//!
//! The page holds one sensor and its measurements. A load is started by
//! [`SensorPage::navigate`] or [`SensorPage::refresh`], which hand out a [`Ticket`].
//! The store is queried elsewhere, and the outcome comes back through
//! [`SensorPage::apply`]. Only the ticket of the latest request is accepted,
//! so a slow request can never overwrite the data of a newer one.

use crate::core::series::{ParameterMeasurement, SeriesCache};
use crate::prelude::*;
use std::time::{Duration, Instant};

/// Page status.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// Waiting for the first result of the current sensor.
    Loading,

    /// The sensor and at least one measurement.
    Loaded,

    /// The sensor exists but has no measurements.
    Empty,

    /// There's no such sensor.
    NotFound,

    /// The store failed and there's nothing to display.
    Failed(String),
}

/// Identifies a load request.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub sensor_id: String,
    generation: u64,
}

/// What the store returned for a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub sensor: Option<Sensor>,
    pub measurements: Vec<Measurement>,
}

/// Queries the store for everything the page displays.
pub fn fetch(store: &dyn Store, sensor_id: &str) -> Result<Fetched> {
    let sensor = store.sensor_by_id(sensor_id)?;
    let measurements = match sensor {
        Some(_) => store.measurements_by_id(sensor_id)?,
        None => Vec::new(),
    };
    Ok(Fetched { sensor, measurements })
}

#[derive(Debug, Default)]
pub struct SensorPage {
    sensor_id: Option<String>,

    /// Incremented on every request. Only the latest request gets applied.
    generation: u64,

    /// Whether the latest request is still being loaded.
    is_pending: bool,

    status: Status,
    sensor: Option<Sensor>,
    measurements: Option<Arc<Vec<Measurement>>>,
    loaded_at: Option<Instant>,
    series: SeriesCache,
}

impl SensorPage {
    /// Switches the page to the sensor.
    ///
    /// Returns `None` when the page already shows the sensor. Otherwise, the
    /// current data is dropped and the returned ticket must be used to apply
    /// the new data.
    pub fn navigate(&mut self, sensor_id: &str) -> Option<Ticket> {
        if self.sensor_id.as_deref() == Some(sensor_id) {
            return None;
        }
        debug!("Navigating to `{}`…", sensor_id);
        self.sensor_id = Some(sensor_id.to_string());
        self.status = Status::Loading;
        self.sensor = None;
        self.measurements = None;
        self.loaded_at = None;
        Some(self.request())
    }

    /// Starts reloading the current sensor while keeping the displayed data.
    pub fn refresh(&mut self) -> Option<Ticket> {
        if self.sensor_id.is_none() {
            return None;
        }
        Some(self.request())
    }

    fn request(&mut self) -> Ticket {
        self.generation += 1;
        self.is_pending = true;
        Ticket {
            sensor_id: self.sensor_id.clone().unwrap_or_default(),
            generation: self.generation,
        }
    }

    /// Applies the load result. Returns `false` if the ticket is outdated and the result got discarded.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Fetched>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding outdated result for `{}` (#{} < #{}).",
                &ticket.sensor_id, ticket.generation, self.generation
            );
            return false;
        }
        self.is_pending = false;
        self.loaded_at = Some(Instant::now());

        match result {
            Ok(Fetched { sensor: None, .. }) => {
                self.status = Status::NotFound;
                self.sensor = None;
                self.measurements = None;
            }
            Ok(Fetched {
                sensor: Some(sensor),
                measurements,
            }) => {
                self.status = if measurements.is_empty() {
                    Status::Empty
                } else {
                    Status::Loaded
                };
                self.sensor = Some(sensor);
                self.measurements = Some(Arc::new(measurements));
            }
            Err(error) if self.has_data() => {
                warn!("Keeping the previous data of `{}`: {}", &ticket.sensor_id, error);
            }
            Err(error) => {
                self.status = Status::Failed(error.to_string());
            }
        }
        true
    }

    pub fn sensor_id(&self) -> Option<&str> {
        self.sensor_id.as_deref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn sensor(&self) -> Option<&Sensor> {
        self.sensor.as_ref()
    }

    pub fn measurements(&self) -> Option<&[Measurement]> {
        self.measurements.as_ref().map(|measurements| measurements.as_slice())
    }

    /// Tells whether the page has nothing to display yet.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Idle | Status::Loading)
    }

    pub fn is_pending(&self) -> bool {
        self.is_pending
    }

    /// Tells whether the page displays a sensor.
    pub fn has_data(&self) -> bool {
        matches!(self.status, Status::Loaded | Status::Empty)
    }

    /// Tells whether the settled page is older than `max_age` and nothing is being loaded.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        !self.is_pending && self.loaded_at.map_or(false, |loaded_at| loaded_at.elapsed() >= max_age)
    }

    /// Group page link, if the sensor is a part of a group.
    pub fn group_href(&self) -> Option<String> {
        self.sensor.as_ref().and_then(Sensor::group_href)
    }

    /// The parameter series, memoized until the measurements get replaced.
    pub fn series(&mut self, parameter: Parameter) -> Arc<Vec<ParameterMeasurement>> {
        self.series.get(self.measurements.as_ref(), parameter)
    }

    /// All the parameter series in chart order.
    pub fn all_series(&mut self) -> Vec<(Parameter, Arc<Vec<ParameterMeasurement>>)> {
        Parameter::ALL
            .iter()
            .map(|parameter| (*parameter, self.series(*parameter)))
            .collect()
    }
}
