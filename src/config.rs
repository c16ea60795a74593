use std::path::{Path, PathBuf};

use clap::Parser;

/// Environment variable naming the dataset to open at startup.
pub const DATA_ENV: &str = "BIKE_PULSE_DATA";

/// Looked up in the working directory when nothing else is given.
pub const DEFAULT_DATA_FILE: &str = "all_data_bike_sharing.csv";

/// Startup configuration. Log levels come from `RUST_LOG` via `env_logger`.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "bike-pulse", version, about = "Bike-sharing usage dashboard")]
pub struct Config {
    /// Ride dataset to open (.csv, .json or .parquet)
    #[arg(value_name = "FILE", env = DATA_ENV)]
    pub data: Option<PathBuf>,
}

impl Config {
    /// The given path, else the default file name.
    pub fn data_path(&self) -> &Path {
        self.data
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_FILE))
    }

    /// An explicit path is always tried so a typo surfaces as an error; the
    /// default file only when it exists.
    pub fn should_autoload(&self) -> bool {
        self.data.is_some() || self.data_path().exists()
    }
}
