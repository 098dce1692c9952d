//! Sensor page.

use crate::core::page::{SensorPage, Status};
use crate::core::series::ParameterMeasurement;
use crate::prelude::*;
use crate::settings::MapSettings;
use crate::templates::back_button::BackButton;
use crate::templates::heading::Heading;
use crate::templates::param_graph::ParamGraph;
use crate::templates::simple_map::SimpleMap;

markup::define! {
    SensorPageTemplate<'a>(
        page: &'a SensorPage,
        charts: &'a [(Parameter, Arc<Vec<ParameterMeasurement>>)],
        map: &'a MapSettings,
    ) {
        div.block { @BackButton {} }

        @if page.is_loading() {
            @Heading { title: None, subtitle: Some("Henter måledata...") }
            progress.progress."is-small"."is-primary"[max = "100"] {}
        }

        @if let Some(sensor) = page.sensor() {
            div.columns."is-vcentered" {
                div.column {
                    @Heading { title: Some(sensor.name.as_str()), subtitle: None }
                }
                @if let Some(group_href) = sensor.group_href() {
                    div.column."is-narrow" {
                        a.button."is-primary"[href = group_href] { "Se hele gruppen" }
                    }
                }
            }
            @if *page.status() == Status::Empty {
                div.notification."is-warning" { "Sensoren har ingen målinger ennå." }
            } else {
                div.columns."is-multiline" {
                    @for (parameter, data) in charts.iter() {
                        div.column."is-12-tablet"."is-6-desktop" {
                            @ParamGraph { title: parameter.title(), id: parameter.chart_id(), data: data.as_slice() }
                        }
                    }
                }
            }
            div.block {
                @SimpleMap {
                    id: "sensor-map",
                    data: std::slice::from_ref(sensor),
                    center: sensor.position(),
                    settings: map,
                }
            }
        }

        @if let Status::Failed(message) = page.status() {
            @Heading { title: page.sensor_id(), subtitle: None }
            div.notification."is-danger" { "Kunne ikke hente måledata: " @message }
        }

        @if *page.status() == Status::NotFound {
            @Heading { title: page.sensor_id(), subtitle: Some("Fant ikke sensoren") }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::{Fetched, Ticket};

    fn fjord_a(group_id: &str) -> Sensor {
        Sensor {
            id: "s1".into(),
            name: "Fjord A".into(),
            group_id: group_id.into(),
            latitude: 59.9,
            longitude: 10.7,
        }
    }

    fn measurements() -> Vec<Measurement> {
        vec![
            Measurement {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                ph: 7.1,
                turbidity: 2.0,
                temperature: 10.0,
                conductivity: 300.0,
            },
            Measurement {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                ph: 7.3,
                turbidity: 1.0,
                temperature: 11.0,
                conductivity: 310.0,
            },
        ]
    }

    fn render(page: &mut SensorPage) -> String {
        let charts = page.all_series();
        SensorPageTemplate {
            page,
            charts: &charts,
            map: &MapSettings::default(),
        }
        .to_string()
    }

    fn loaded(sensor: Option<Sensor>, measurements: Vec<Measurement>) -> SensorPage {
        let mut page = SensorPage::default();
        let ticket: Ticket = page.navigate("s1").unwrap();
        page.apply(ticket, Ok(Fetched { sensor, measurements }));
        page
    }

    #[test]
    fn loading_shows_spinner_only() {
        let mut page = SensorPage::default();
        page.navigate("s1");
        let html = render(&mut page);
        assert!(html.contains("Tilbake til sensorkart"));
        assert!(html.contains("Henter måledata..."));
        assert!(html.contains("<progress"));
        assert!(!html.contains("Plotly.newPlot"));
        assert!(!html.contains("L.map"));
    }

    #[test]
    fn loaded_shows_charts_map_and_group_link() {
        let html = render(&mut loaded(Some(fjord_a("2")), measurements()));
        assert!(html.contains("Fjord A"));
        assert!(html.contains(r#"href="/groups/2""#));
        assert!(html.contains("Se hele gruppen"));
        for id in 1..=4 {
            assert!(html.contains(&format!(r#"Plotly.newPlot("graph-{}""#, id)));
        }
        for title in ["pH", "Turbiditet", "Temperatur", "Konduktivitet"].iter() {
            assert!(html.contains(title));
        }
        assert!(html.contains(r#"L.map("sensor-map").setView({"lat":59.9,"lng":10.7}"#));
        assert!(!html.contains("Henter måledata..."));
    }

    #[test]
    fn ungrouped_sensor_has_no_group_link() {
        let html = render(&mut loaded(Some(fjord_a("0")), measurements()));
        assert!(!html.contains("Se hele gruppen"));
        assert!(!html.contains("/groups/"));
    }

    #[test]
    fn empty_sensor_is_not_loading() {
        let html = render(&mut loaded(Some(fjord_a("2")), vec![]));
        assert!(html.contains("Sensoren har ingen målinger ennå."));
        assert!(!html.contains("Henter måledata..."));
        assert!(!html.contains("Plotly.newPlot"));
    }

    #[test]
    fn failed_load() {
        let mut page = SensorPage::default();
        let ticket = page.navigate("s1").unwrap();
        page.apply(ticket, Err("disk I/O error".into()));
        let html = render(&mut page);
        assert!(html.contains("Kunne ikke hente måledata: disk I/O error"));
    }

    #[test]
    fn sensor_name_is_escaped() {
        let mut sensor = fjord_a("2");
        sensor.name = "<b>Fjord</b>".into();
        let html = render(&mut loaded(Some(sensor), measurements()));
        assert!(html.contains("&lt;b&gt;Fjord&lt;/b&gt;"));
    }
}
