//! Web interface.

use crate::core::loader::Pages;
use crate::core::page::Status as PageStatus;
use crate::core::series::param_series_by_key;
use crate::prelude::*;
use crate::settings::{MapSettings, Settings};
use crate::templates::base::Base;
use crate::templates::group::Group;
use crate::templates::index::Index;
use crate::templates::sensor::SensorPageTemplate;
use crate::web::to_html_string::ToHtmlString;
use rocket::config::{Config, LogLevel};
use rocket::http::Status;
use rocket::response::content::RawJson;
use rocket::response::{self, Responder};
use rocket::tokio::task::spawn_blocking;
use rocket::{get, routes, Build, Request, Rocket, State};

mod to_html_string;

type HtmlResult = Result<Option<ToHtmlString<String>>>;

pub fn rocket(settings: Settings, store: Arc<dyn Store>) -> Rocket<Build> {
    let config = Config {
        port: settings.http_port,
        address: settings.http_address,
        log_level: LogLevel::Off,
        ..Config::release_default()
    };
    let pages = Pages::new(store.clone(), settings.page_max_age());

    rocket::custom(config)
        .manage(settings)
        .manage(store)
        .manage(pages)
        .mount("/", routes![index, get_sensor, get_group, get_series, health])
}

pub async fn start_server(settings: Settings, store: Arc<dyn Store>) -> Result {
    info!("Listening on {}:{}…", settings.http_address, settings.http_port);
    rocket(settings, store).launch().await?;
    Ok(())
}

/// Internal errors end up as `500 Internal Server Error`.
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        error!("Request failed: {}", self);
        Err(Status::InternalServerError)
    }
}

/// Runs the store queries and the page locking off the async workers.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|error| Error::new(format!("blocking task failed: {}", error)))?
}

#[get("/")]
async fn index(store: &State<Arc<dyn Store>>, settings: &State<Settings>) -> Result<ToHtmlString<String>> {
    let store = store.inner().clone();
    let map = settings.map.clone();
    blocking(move || render_index(&*store, &map)).await
}

fn render_index(store: &dyn Store, map: &MapSettings) -> Result<ToHtmlString<String>> {
    let sensors = store.sensors()?;
    let center = Position::centroid(&sensors).unwrap_or(map.default_center);
    Ok(ToHtmlString(
        Base {
            title: "Sensorkart".to_string(),
            refresh_secs: None,
            body: Index {
                sensors: &sensors,
                center,
                map,
            },
        }
        .to_string(),
    ))
}

#[get("/sensors/<sensor_id>")]
async fn get_sensor(sensor_id: String, pages: &State<Pages>, settings: &State<Settings>) -> HtmlResult {
    let pages = pages.inner().clone();
    let settings = settings.inner().clone();
    blocking(move || render_sensor(&pages, &sensor_id, &settings)).await
}

fn render_sensor(pages: &Pages, sensor_id: &str, settings: &Settings) -> HtmlResult {
    let page = pages.open(sensor_id)?;
    let mut page = page.lock().map_err(|_| Error::new("a page lock is poisoned"))?;
    if *page.status() == PageStatus::NotFound {
        return Ok(None);
    }

    let charts = page.all_series();
    let title = page
        .sensor()
        .map_or_else(|| sensor_id.to_string(), |sensor| sensor.name.clone());
    let refresh_secs = if page.is_loading() {
        Some(settings.loading_refresh_secs)
    } else {
        None
    };
    Ok(Some(ToHtmlString(
        Base {
            title,
            refresh_secs,
            body: SensorPageTemplate {
                page: &page,
                charts: &charts,
                map: &settings.map,
            },
        }
        .to_string(),
    )))
}

#[get("/groups/<group_id>")]
async fn get_group(group_id: String, store: &State<Arc<dyn Store>>, settings: &State<Settings>) -> HtmlResult {
    let store = store.inner().clone();
    let map = settings.map.clone();
    blocking(move || render_group(&*store, &group_id, &map)).await
}

fn render_group(store: &dyn Store, group_id: &str, map: &MapSettings) -> HtmlResult {
    let sensors = store.group_sensors(group_id)?;
    let center = match Position::centroid(&sensors) {
        Some(center) => center,
        None => return Ok(None),
    };
    Ok(Some(ToHtmlString(
        Base {
            title: format!("Gruppe {}", group_id),
            refresh_secs: None,
            body: Group {
                group_id,
                sensors: &sensors,
                center,
                map,
            },
        }
        .to_string(),
    )))
}

/// Parameter series of the sensor, newest first.
#[get("/api/sensors/<sensor_id>/series/<parameter>")]
async fn get_series(
    sensor_id: String,
    parameter: String,
    store: &State<Arc<dyn Store>>,
) -> Result<Option<RawJson<String>>> {
    let store = store.inner().clone();
    blocking(move || series_json(&*store, &sensor_id, &parameter)).await
}

fn series_json(store: &dyn Store, sensor_id: &str, parameter: &str) -> Result<Option<RawJson<String>>> {
    if store.sensor_by_id(sensor_id)?.is_none() {
        return Ok(None);
    }
    let measurements = store.measurements_by_id(sensor_id)?;
    match param_series_by_key(Some(measurements.as_slice()), parameter) {
        Ok(series) => Ok(Some(RawJson(serde_json::to_string(&series)?))),
        Err(error) => {
            debug!("{}", error);
            Ok(None)
        }
    }
}

#[get("/health")]
fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::Connection;
    use rocket::http::Status;
    use rocket::local::blocking::Client;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    fn client() -> Client {
        let db = Connection::open_and_initialize(":memory:").unwrap();
        db.upsert_bulk(&[
            (
                Sensor {
                    id: "s1".into(),
                    name: "Fjord A".into(),
                    group_id: "2".into(),
                    latitude: 59.9,
                    longitude: 10.7,
                },
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
                ],
            ),
            (
                Sensor {
                    id: "s2".into(),
                    name: "Lone buoy".into(),
                    group_id: "0".into(),
                    latitude: 63.4,
                    longitude: 10.4,
                },
                vec![],
            ),
        ])
        .unwrap();
        Client::tracked(rocket(Settings::default(), Arc::new(db))).unwrap()
    }

    /// Requests the sensor page until it stops loading.
    fn get_settled_sensor(client: &Client, uri: &str) -> (Status, String) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let response = client.get(uri.to_string()).dispatch();
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            if !body.contains("Henter måledata...") || Instant::now() > deadline {
                return (status, body);
            }
            sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn index_ok() {
        let client = client();
        let response = client.get("/").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.headers().get_one("Cache-Control"), Some("private"));
        let body = response.into_string().unwrap();
        assert!(body.contains(r#"href="/sensors/s1""#));
        assert!(body.contains(r#"href="/sensors/s2""#));
    }

    #[test]
    fn sensor_page_ok() {
        let client = client();
        let (status, body) = get_settled_sensor(&client, "/sensors/s1");
        assert_eq!(status, Status::Ok);
        assert!(body.contains("Fjord A"));
        assert!(body.contains(r#"href="/groups/2""#));
        assert!(body.contains(r#"Plotly.newPlot("graph-1""#));
        assert!(!body.contains(r#"http-equiv="refresh""#));
    }

    #[test]
    fn empty_sensor_page_settles() {
        let client = client();
        let (status, body) = get_settled_sensor(&client, "/sensors/s2");
        assert_eq!(status, Status::Ok);
        assert!(body.contains("Sensoren har ingen målinger ennå."));
        assert!(!body.contains("Se hele gruppen"));
    }

    #[test]
    fn unknown_sensor_is_not_found() {
        let client = client();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut status = client.get("/sensors/missing").dispatch().status();
        while status == Status::Ok && Instant::now() < deadline {
            sleep(Duration::from_millis(10));
            status = client.get("/sensors/missing").dispatch().status();
        }
        assert_eq!(status, Status::NotFound);
    }

    #[test]
    fn group_ok() {
        let client = client();
        let response = client.get("/groups/2").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains("Gruppe 2"));
        assert_eq!(client.get("/groups/42").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn series_ok() {
        let client = client();
        let response = client.get("/api/sensors/s1/series/pH").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let series: serde_json::Value = serde_json::from_str(&response.into_string().unwrap()).unwrap();
        assert_eq!(series[0]["value"], 7.3);
        assert_eq!(series[1]["value"], 7.1);

        assert_eq!(client.get("/api/sensors/s1/series/salinity").dispatch().status(), Status::NotFound);
        assert_eq!(client.get("/api/sensors/missing/series/pH").dispatch().status(), Status::NotFound);
    }

    #[test]
    fn health_ok() {
        let client = client();
        let response = client.get("/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "OK");
    }

    /// Store without a database behind it.
    struct Buoys(Vec<Sensor>);

    impl Store for Buoys {
        fn sensor_by_id(&self, sensor_id: &str) -> Result<Option<Sensor>> {
            Ok(self.0.iter().find(|sensor| sensor.id == sensor_id).cloned())
        }

        fn measurements_by_id(&self, _sensor_id: &str) -> Result<Vec<Measurement>> {
            Ok(Vec::new())
        }

        fn sensors(&self) -> Result<Vec<Sensor>> {
            Ok(self.0.clone())
        }

        fn group_sensors(&self, group_id: &str) -> Result<Vec<Sensor>> {
            Ok(self.0.iter().filter(|sensor| sensor.group_id == group_id).cloned().collect())
        }
    }

    #[test]
    fn pages_are_served_from_any_store() {
        let store = Buoys(vec![Sensor {
            id: "b1".into(),
            name: "Munkholmen".into(),
            group_id: "7".into(),
            latitude: 63.45,
            longitude: 10.38,
        }]);
        let client = Client::tracked(rocket(Settings::default(), Arc::new(store))).unwrap();

        let body = client.get("/").dispatch().into_string().unwrap();
        assert!(body.contains("Munkholmen"));
        assert!(body.contains(r#"href="/groups/7""#));

        let response = client.get("/groups/7").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert!(response.into_string().unwrap().contains(r#"href="/sensors/b1""#));

        let response = client.get("/api/sensors/b1/series/temperature").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), "[]");
    }
}
