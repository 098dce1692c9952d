use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "sensor-dashboard", author, about)]
pub struct Opts {
    /// Show only warnings and errors
    #[structopt(short = "s", long = "silent", conflicts_with = "verbose")]
    pub silent: bool,

    /// Show all log messages
    #[structopt(short = "v", long = "verbose", conflicts_with = "silent")]
    pub verbose: bool,

    /// Suppress timestamps in logs, useful with journald
    #[structopt(long = "suppress-log-timestamps")]
    pub suppress_log_timestamps: bool,

    /// Database path
    #[structopt(long, env = "SENSOR_DASHBOARD_DB", default_value = "sensor-dashboard.sqlite3")]
    pub db: String,

    /// Settings file
    #[structopt(
        long,
        parse(from_os_str),
        env = "SENSOR_DASHBOARD_SETTINGS",
        default_value = "sensor-dashboard.toml"
    )]
    pub settings: PathBuf,

    #[structopt(subcommand)]
    pub command: Option<Command>,
}

#[derive(StructOpt, Debug, PartialEq)]
pub enum Command {
    /// Serve the dashboard (default)
    Serve,

    /// Fill the database with synthetic sensors and measurements
    Generate {
        /// Random seed, makes the generated data reproducible
        #[structopt(long)]
        seed: Option<u64>,
    },

    /// Import sensors and measurements from JSON files
    Import {
        /// File with a `{"data": [...]}` list of sensors
        #[structopt(parse(from_os_str))]
        sensors: PathBuf,

        /// File with a `{"data": [...]}` list of measurements
        #[structopt(parse(from_os_str))]
        measurements: PathBuf,
    },
}
