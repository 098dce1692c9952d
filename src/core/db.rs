//! Database interface.

use crate::prelude::*;
use rusqlite::types::FromSql;
use rusqlite::{params, OptionalExtension, Row};
use std::path::Path;
use std::sync::MutexGuard;

mod migrations;

use migrations::MIGRATIONS;

/// Wraps `rusqlite::Connection` and provides the high-level database methods.
#[derive(Clone)]
pub struct Connection {
    connection: Arc<Mutex<rusqlite::Connection>>,
}

impl Connection {
    pub fn open_and_initialize<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Self {
            connection: Arc::new(Mutex::new(rusqlite::Connection::open(path)?)),
        };
        connection.connection()?.execute_batch("PRAGMA foreign_keys = ON;")?;
        connection.migrate()?;
        Ok(connection)
    }

    fn migrate(&self) -> Result {
        let user_version = self.get_user_version()?;
        let mut connection = self.connection()?;
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            if user_version < i + 1 {
                info!("Applying migration #{}…", i + 1);
                let tx = connection.transaction()?;
                tx.execute_batch(migration)?;
                tx.commit()?;
            }
        }
        Ok(())
    }

    /// Acquires lock and returns the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> Result<MutexGuard<'_, rusqlite::Connection>> {
        self.connection
            .lock()
            .map_err(|_| Error::new("the database lock is poisoned"))
    }

    pub fn get_user_version(&self) -> Result<usize> {
        Ok(self
            .connection()?
            .pragma_query_value(None, "user_version", get_single::<i64, usize>)?)
    }

    /// Inserts or updates the sensor.
    pub fn upsert_sensor(&self, sensor: &Sensor) -> Result {
        sensor.upsert_into(&*self.connection()?)
    }

    /// Inserts or updates the sensor measurement.
    pub fn upsert_measurement(&self, sensor_id: &str, measurement: &Measurement) -> Result {
        measurement.upsert_into(sensor_id, &*self.connection()?)
    }

    /// Upserts the sensors and their measurements within a single transaction.
    ///
    /// Inserting one by one is quite slow, whereas the generator and the import
    /// produce thousands of measurements at once.
    pub fn upsert_bulk(&self, data: &[(Sensor, Vec<Measurement>)]) -> Result {
        let mut connection = self.connection()?;
        let transaction = connection.transaction()?;
        for (sensor, measurements) in data.iter() {
            debug!("Upserting `{}` with {} measurements…", &sensor.id, measurements.len());
            sensor.upsert_into(&transaction)?;
            for measurement in measurements.iter() {
                measurement.upsert_into(&sensor.id, &transaction)?;
            }
        }
        transaction.commit()?;
        Ok(())
    }

    /// Selects the specified sensor.
    pub fn select_sensor(&self, sensor_id: &str) -> Result<Option<Sensor>> {
        Ok(self
            .connection()?
            // language=sql
            .prepare_cached(r"SELECT * FROM sensors WHERE id = ?1")?
            .query_row(params![sensor_id], get_sensor)
            .optional()?)
    }

    /// Selects all sensors ordered by group and name.
    pub fn select_sensors(&self) -> Result<Vec<Sensor>> {
        self.connection()?
            // language=sql
            .prepare_cached(r"SELECT * FROM sensors ORDER BY group_id, name, id")?
            .query_map([], get_sensor)?
            .map(|r| r.map_err(Into::into))
            .collect()
    }

    /// Selects the group sensors ordered by name.
    pub fn select_group_sensors(&self, group_id: &str) -> Result<Vec<Sensor>> {
        self.connection()?
            // language=sql
            .prepare_cached(r"SELECT * FROM sensors WHERE group_id = ?1 ORDER BY name, id")?
            .query_map(params![group_id], get_sensor)?
            .map(|r| r.map_err(Into::into))
            .collect()
    }

    pub fn delete_sensor(&self, sensor_id: &str) -> Result {
        self.connection()?
            // language=sql
            .prepare_cached(r"DELETE FROM sensors WHERE id = ?1")?
            .execute(params![sensor_id])?;
        Ok(())
    }

    /// Selects all the sensor measurements in storage order.
    pub fn select_measurements(&self, sensor_id: &str) -> Result<Vec<Measurement>> {
        self.connection()?
            // language=sql
            .prepare_cached(
                r#"
                SELECT timestamp, ph, turbidity, temperature, conductivity
                FROM measurements
                WHERE sensor_id = ?1
                "#,
            )?
            .query_map(params![sensor_id], get_measurement)?
            .map(|r| r.map_err(Into::into))
            .collect()
    }

    pub fn select_sensor_count(&self) -> Result<usize> {
        Ok(self
            .connection()?
            // language=sql
            .prepare_cached("SELECT COUNT(*) FROM sensors")?
            .query_row([], get_single::<i64, usize>)?)
    }

    pub fn select_measurement_count(&self) -> Result<u64> {
        Ok(self
            .connection()?
            // language=sql
            .prepare_cached("SELECT COUNT(*) FROM measurements")?
            .query_row([], get_single::<i64, u64>)?)
    }
}

impl Store for Connection {
    fn sensor_by_id(&self, sensor_id: &str) -> Result<Option<Sensor>> {
        self.select_sensor(sensor_id)
    }

    fn measurements_by_id(&self, sensor_id: &str) -> Result<Vec<Measurement>> {
        self.select_measurements(sensor_id)
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        self.select_sensors()
    }

    fn group_sensors(&self, group_id: &str) -> Result<Vec<Sensor>> {
        self.select_group_sensors(group_id)
    }
}

impl Sensor {
    /// Upsert the sensor into the database, keeping its measurements.
    fn upsert_into(&self, connection: &rusqlite::Connection) -> Result {
        connection
            .prepare_cached(
                // language=sql
                r#"
                -- noinspection SqlResolve @ any/"excluded"
                INSERT INTO sensors (id, name, group_id, latitude, longitude)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    group_id = excluded.group_id,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude
                "#,
            )?
            .execute(params![self.id, self.name, self.group_id, self.latitude, self.longitude])?;
        Ok(())
    }
}

impl Measurement {
    /// Upsert the measurement into the database. There's one measurement per sensor and timestamp.
    fn upsert_into(&self, sensor_id: &str, connection: &rusqlite::Connection) -> Result {
        connection
            .prepare_cached(
                // language=sql
                r#"
                -- noinspection SqlResolve @ any/"excluded"
                INSERT INTO measurements (sensor_id, timestamp, ph, turbidity, temperature, conductivity)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT (sensor_id, timestamp) DO UPDATE SET
                    ph = excluded.ph,
                    turbidity = excluded.turbidity,
                    temperature = excluded.temperature,
                    conductivity = excluded.conductivity
                "#,
            )?
            .execute(params![
                sensor_id,
                self.timestamp.timestamp_millis(),
                self.ph,
                self.turbidity,
                self.temperature,
                self.conductivity,
            ])?;
        Ok(())
    }
}

/// Builds a `Sensor` instance based on the database row.
fn get_sensor(row: &Row) -> rusqlite::Result<Sensor> {
    Ok(Sensor {
        id: row.get("id")?,
        name: row.get("name")?,
        group_id: row.get("group_id")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

/// Builds a `Measurement` instance based on the database row.
fn get_measurement(row: &Row) -> rusqlite::Result<Measurement> {
    let millis: i64 = row.get("timestamp")?;
    Ok(Measurement {
        timestamp: Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, millis))?,
        ph: row.get("ph")?,
        turbidity: row.get("turbidity")?,
        temperature: row.get("temperature")?,
        conductivity: row.get("conductivity")?,
    })
}

/// Gets a single value from the row.
///
/// # Type Arguments
///
/// - `T`: type that is passed to the database driver.
/// - `R`: desired return type.
#[inline(always)]
fn get_single<T, R>(row: &Row) -> rusqlite::Result<R>
where
    T: FromSql,
    R: TryFrom<T>,
    R::Error: Send + Sync + std::error::Error + 'static,
{
    TryInto::<R>::try_into(row.get::<_, T>(0)?)
        .map_err(Box::new)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(0, row.get_ref_unwrap(0).data_type(), error))
}
