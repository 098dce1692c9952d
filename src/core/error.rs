//! Application error and conversions from the other errors.

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(&self.message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

macro_rules! from_error {
    ($type_:ty, $message:expr) => {
        impl From<$type_> for Error {
            fn from(error: $type_) -> Self {
                Self::new(format!("{}: {}", $message, error.to_string()))
            }
        }
    };
}

from_error!(rusqlite::Error, "SQLite error");
from_error!(std::io::Error, "I/O error");
from_error!(toml::de::Error, "TOML deserialization error");
from_error!(serde_json::Error, "JSON error");
from_error!(chrono::ParseError, "Timestamp could not be parsed");
from_error!(log::SetLoggerError, "Logging initialization error");
from_error!(rocket::Error, "Rocket error");
from_error!(statrs::StatsError, "Invalid distribution");
