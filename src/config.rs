use crate::writer::DEFAULT_DEBOUNCE;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: DEFAULT_PORT,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Config {
    /// Reads `APP_DATA_DIR`, `PORT` and `COUNTER_DEBOUNCE_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("APP_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(port) = parsed(&lookup, "PORT") {
            config.port = port;
        }
        if let Some(millis) = parsed(&lookup, "COUNTER_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(millis);
        }

        config
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid {key}={raw:?}");
            None
        }
    }
}
