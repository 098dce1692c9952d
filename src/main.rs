//! Entry point.

use crate::core::db::Connection;
use crate::core::{generator, import};
use crate::opts::{Command, Opts};
use crate::prelude::*;
use crate::settings::Settings;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

mod core;
mod logging;
mod opts;
mod prelude;
mod settings;
mod templates;
mod threading;
mod web;

/// Entry point.
fn main() -> Result {
    let opts = Opts::from_args();
    logging::init(&opts)?;

    info!("Reading settings from `{}`…", opts.settings.display());
    let settings = settings::read(&opts.settings)?;
    debug!("Settings: {:?}", &settings);

    info!("Opening database `{}`…", opts.db);
    let db = Connection::open_and_initialize(&opts.db)?;

    match opts.command.unwrap_or(Command::Serve) {
        Command::Serve => rocket::execute(web::start_server(settings, Arc::new(db))),
        Command::Generate { seed } => generate(&settings, &db, seed),
        Command::Import { sensors, measurements } => {
            let data = import::read_files(&sensors, &measurements)?;
            store(&db, &data)
        }
    }
}

fn generate(settings: &Settings, db: &Connection, seed: Option<u64>) -> Result {
    info!("Generating {} sensors…", settings.generator.sensor_count);
    let data = match seed {
        Some(seed) => generator::generate(&mut StdRng::seed_from_u64(seed), &settings.generator)?,
        None => generator::generate(&mut rand::thread_rng(), &settings.generator)?,
    };
    store(db, &data)
}

fn store(db: &Connection, data: &[(Sensor, Vec<Measurement>)]) -> Result {
    db.upsert_bulk(data)?;
    info!(
        "Stored {} sensors. The database now has {} sensors and {} measurements.",
        data.len(),
        db.select_sensor_count()?,
        db.select_measurement_count()?,
    );
    Ok(())
}
