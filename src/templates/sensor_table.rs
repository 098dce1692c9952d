use crate::prelude::*;

markup::define! {
    SensorTable<'a>(sensors: Vec<&'a Sensor>) {
        table.table."is-fullwidth"."is-striped"."is-hoverable" {
            thead {
                tr {
                    th { "Navn" }
                    th { "Breddegrad" }
                    th { "Lengdegrad" }
                }
            }
            tbody {
                @for sensor in sensors.iter() {
                    tr {
                        td { a[href = sensor.href()] { @sensor.name } }
                        td { @coordinate(sensor.latitude) }
                        td { @coordinate(sensor.longitude) }
                    }
                }
            }
        }
    }
}

fn coordinate(degrees: f64) -> String {
    format!("{:.5}°", degrees)
}
