//! Sensor map: every sensor on one map, grouped below.

use crate::core::sensor::NO_GROUP;
use crate::prelude::*;
use crate::settings::MapSettings;
use crate::templates::heading::Heading;
use crate::templates::sensor_table::SensorTable;
use crate::templates::simple_map::SimpleMap;
use itertools::Itertools;

markup::define! {
    Index<'a>(sensors: &'a [Sensor], center: Position, map: &'a MapSettings) {
        @Heading { title: Some("Sensorkart"), subtitle: Some("Vannkvalitet målt av sensorene") }
        @if sensors.is_empty() {
            div.notification {
                "Ingen sensorer ennå. Kjør " code { "sensor-dashboard generate" } " eller "
                code { "sensor-dashboard import" } "."
            }
        }
        div.block {
            @SimpleMap { id: "sensors-map", data: sensors, center: center.to_owned(), settings: map }
        }
        @for (group_id, group) in group_sensors(sensors) {
            div.block {
                h3.title."is-5" {
                    @if group_id == NO_GROUP {
                        "Uten gruppe"
                    } else {
                        a[href = group_href(&group_id)] { "Gruppe " @group_id }
                    }
                }
                @SensorTable { sensors: group }
            }
        }
    }
}

fn group_href(group_id: &str) -> String {
    format!("/groups/{}", group_id)
}

/// Groups the sensors by their group ID, keeping the order within a group.
fn group_sensors(sensors: &[Sensor]) -> Vec<(String, Vec<&Sensor>)> {
    sensors
        .iter()
        .sorted_by(|a, b| a.group_id.cmp(&b.group_id))
        .chunk_by(|sensor| sensor.group_id.clone())
        .into_iter()
        .map(|(group_id, group)| (group_id, group.collect_vec()))
        .collect_vec()
}
