//! Sensor data model, storage and the sensor page state.

pub mod db;
pub mod error;
pub mod generator;
pub mod import;
pub mod loader;
pub mod measurement;
pub mod page;
pub mod sensor;
pub mod series;
pub mod store;
