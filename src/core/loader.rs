//! Loads the sensor pages in the background.

use crate::core::page::{fetch, SensorPage, Status, Ticket};
use crate::prelude::*;
use crate::threading;
use std::collections::HashMap;
use std::sync::MutexGuard;
use std::time::Duration;

pub type SharedPage = Arc<Mutex<SensorPage>>;

/// Settled pages idle for this many `max_age` periods are dropped from the registry.
const EXPIRY_PERIODS: u32 = 10;

/// Sensor pages by sensor ID.
///
/// Clones share the same registry.
#[derive(Clone)]
pub struct Pages {
    store: Arc<dyn Store>,

    /// Settled pages older than this get reloaded on the next visit.
    max_age: Duration,

    pages: Arc<Mutex<HashMap<String, SharedPage>>>,
}

impl Pages {
    pub fn new(store: Arc<dyn Store>, max_age: Duration) -> Self {
        Self {
            store,
            max_age,
            pages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the sensor page, starting a load if the page is new or stale.
    ///
    /// The returned page may still be loading.
    pub fn open(&self, sensor_id: &str) -> Result<SharedPage> {
        let page = {
            let mut pages = lock(&self.pages)?;
            self.sweep(&mut pages, sensor_id);
            pages.entry(sensor_id.to_string()).or_default().clone()
        };

        let ticket = {
            let mut page = lock(&page)?;
            match page.navigate(sensor_id) {
                Some(ticket) => Some(ticket),
                None if page.is_stale(self.max_age) => {
                    debug!("Page `{}` is stale, refreshing…", sensor_id);
                    page.refresh()
                }
                None => None,
            }
        };

        if let Some(ticket) = ticket {
            self.spawn_load(page.clone(), ticket)?;
        }
        Ok(page)
    }

    /// Number of the open pages.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.pages)?.len())
    }

    /// Drops the settled pages of unknown sensors and the long idle ones, except `keep`.
    fn sweep(&self, pages: &mut HashMap<String, SharedPage>, keep: &str) {
        let expiry = self.max_age.checked_mul(EXPIRY_PERIODS).unwrap_or(Duration::MAX);
        let len = pages.len();
        pages.retain(|sensor_id, page| {
            if sensor_id == keep {
                return true;
            }
            match page.lock() {
                Ok(page) => !(page.is_stale(expiry) || (!page.is_pending() && *page.status() == Status::NotFound)),
                Err(_) => false,
            }
        });
        if pages.len() != len {
            debug!("Dropped {} pages.", len - pages.len());
        }
    }

    /// Fetches the sensor on a separate thread and applies the result to the page.
    fn spawn_load(&self, page: SharedPage, ticket: Ticket) -> Result {
        let store = self.store.clone();
        let fallback = (page.clone(), ticket.clone());

        let spawned = threading::spawn("sensor-dashboard::loader", move || {
            let result = fetch(&*store, &ticket.sensor_id).log(|| format!("Failed to load `{}`", ticket.sensor_id));
            match lock(&page) {
                Ok(mut page) => {
                    page.apply(ticket, result);
                }
                Err(error) => error!("Failed to apply the result: {}", error),
            }
        });

        if let Err(error) = spawned {
            let (page, ticket) = fallback;
            let error: Error = error.into();
            error!("Failed to spawn the loader: {}", error);
            lock(&page)?.apply(ticket, Err(error));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| Error::new("a page lock is poisoned"))
}
