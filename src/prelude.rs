pub use crate::core::error::Error;
pub use crate::core::measurement::{Measurement, Parameter};
pub use crate::core::sensor::{Position, Sensor};
pub use crate::core::store::Store;
pub use crate::logging::Log;
pub use chrono::prelude::*;
pub use log::{debug, error, info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::sync::{Arc, Mutex};

pub type Result<T = ()> = std::result::Result<T, Error>;
