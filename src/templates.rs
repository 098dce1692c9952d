//! Web interface templates.

use serde::Serialize;

pub mod back_button;
pub mod base;
pub mod group;
pub mod heading;
pub mod index;
pub mod param_graph;
pub mod sensor;
pub mod sensor_table;
pub mod simple_map;

/// Serializes the value for an inline `<script>`.
///
/// `</` gets escaped so that a string value can't close the script element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".into())
        .replace("</", r"<\/")
}
