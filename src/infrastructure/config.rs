use std::{env, fmt::{Debug, Display}, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const LOG_FILE_VAR: &str = "RESTAURANTS_LOG_FILE";
pub const DEFAULT_LOG_FILE: &str = "restaurants.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    Remote,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(SourceKind::Static),
            "remote" => Ok(SourceKind::Remote),
            other => Err(format!("unknown source '{other}', expected 'static' or 'remote'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceKind,
    pub base_url: String,
    pub state_file: PathBuf,
    pub fetch_timeout: Duration,
    pub clear_on_exit: bool,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source: try_load(&lookup, "RESTAURANTS_SOURCE", SourceKind::Remote),
            base_url: try_load(&lookup, "RESTAURANTS_BASE_URL", "http://127.0.0.1:8080".to_string()),
            state_file: try_load(&lookup, "RESTAURANTS_STATE_FILE", PathBuf::from("restaurants-state.json")),
            fetch_timeout: Duration::from_secs(try_load(&lookup, "RESTAURANTS_FETCH_TIMEOUT_SECS", 10)),
            clear_on_exit: try_load(&lookup, "RESTAURANTS_CLEAR_ON_EXIT", false),
        }
    }
}

/// Path of the log file, read before logging is set up.
pub fn log_file() -> PathBuf {
    env::var(LOG_FILE_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE))
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default:?}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.state_file, PathBuf::from("restaurants-state.json"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!(!config.clear_on_exit);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RESTAURANTS_SOURCE", "Static"),
            ("RESTAURANTS_STATE_FILE", "/tmp/favs.json"),
            ("RESTAURANTS_FETCH_TIMEOUT_SECS", "3"),
            ("RESTAURANTS_CLEAR_ON_EXIT", "true"),
        ]);
        assert_eq!(config.source, SourceKind::Static);
        assert_eq!(config.state_file, PathBuf::from("/tmp/favs.json"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert!(config.clear_on_exit);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("RESTAURANTS_SOURCE", "carrier-pigeon"),
            ("RESTAURANTS_FETCH_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }
}
