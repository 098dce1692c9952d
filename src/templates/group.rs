//! Group page: the group sensors on a map.

use crate::prelude::*;
use crate::settings::MapSettings;
use crate::templates::back_button::BackButton;
use crate::templates::sensor_table::SensorTable;
use crate::templates::simple_map::SimpleMap;

markup::define! {
    Group<'a>(group_id: &'a str, sensors: &'a [Sensor], center: Position, map: &'a MapSettings) {
        div.block { @BackButton {} }
        div.block {
            h1.title."is-3" { "Gruppe " @group_id }
            h2.subtitle."is-5" { @sensors.len().to_string() " sensorer" }
        }
        div.block {
            @SimpleMap { id: "group-map", data: sensors, center: center.to_owned(), settings: map }
        }
        @SensorTable { sensors: sensors.iter().collect() }
    }
}
