use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::latency::{JitteredLatency, LatencyPolicy, NoLatency, SimulatedLatency};
use crate::store::DEFAULT_CHANNEL_CAPACITY;

/// Application-level constants
pub const APP_NAME: &str = "Wardbook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_LATENCY: &str = "WARDBOOK_LATENCY";
pub const ENV_FIXTURES_DIR: &str = "WARDBOOK_FIXTURES_DIR";
pub const ENV_CHANNEL_CAPACITY: &str = "WARDBOOK_CHANNEL_CAPACITY";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "wardbook=info"
}

/// Which latency policy the access API runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatencyMode {
    /// Fixed per-operation delays of the mock backend.
    #[default]
    Simulated,
    Off,
    Jittered,
}

impl LatencyMode {
    pub fn policy(&self) -> Arc<dyn LatencyPolicy> {
        match self {
            Self::Simulated => Arc::new(SimulatedLatency),
            Self::Off => Arc::new(NoLatency),
            Self::Jittered => Arc::new(JitteredLatency::default()),
        }
    }
}

impl std::str::FromStr for LatencyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "none" | "off" => Ok(Self::Off),
            "jittered" => Ok(Self::Jittered),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_LATENCY,
                value: s.to_string(),
            }),
        }
    }
}

/// How to start the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub latency: LatencyMode,
    /// Directory of fixture files; `None` uses the embedded set.
    pub fixtures_dir: Option<PathBuf>,
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: LatencyMode::default(),
            fixtures_dir: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Read `WARDBOOK_LATENCY`, `WARDBOOK_FIXTURES_DIR` and
    /// `WARDBOOK_CHANNEL_CAPACITY`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(mode) = lookup(ENV_LATENCY) {
            config.latency = mode.parse()?;
        }
        if let Some(dir) = lookup(ENV_FIXTURES_DIR).filter(|d| !d.trim().is_empty()) {
            config.fixtures_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_CHANNEL_CAPACITY) {
            config.channel_capacity = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: ENV_CHANNEL_CAPACITY,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.latency, LatencyMode::Simulated);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn reads_every_variable() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_LATENCY, "None"),
            (ENV_FIXTURES_DIR, "/srv/wardbook/fixtures"),
            (ENV_CHANNEL_CAPACITY, "8"),
        ]))
        .unwrap();
        assert_eq!(config.latency, LatencyMode::Off);
        assert_eq!(config.fixtures_dir, Some(PathBuf::from("/srv/wardbook/fixtures")));
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn rejects_unknown_latency_mode() {
        let err = StoreConfig::from_lookup(lookup(&[(ENV_LATENCY, "warp")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_LATENCY,
                value: "warp".into()
            }
        );
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(StoreConfig::from_lookup(lookup(&[(ENV_CHANNEL_CAPACITY, "0")])).is_err());
        assert!(StoreConfig::from_lookup(lookup(&[(ENV_CHANNEL_CAPACITY, "lots")])).is_err());
    }

    #[test]
    fn blank_fixture_dir_means_embedded() {
        let config = StoreConfig::from_lookup(lookup(&[(ENV_FIXTURES_DIR, "  ")])).unwrap();
        assert!(config.fixtures_dir.is_none());
    }

    #[test]
    fn app_name_is_wardbook() {
        assert_eq!(APP_NAME, "Wardbook");
    }
}
