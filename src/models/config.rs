//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::source::NetworkProfile;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signs the flash message cookie; at least 64 bytes.
    pub secret: String,
    /// Wrap every data source in simulated latency and failures.
    #[serde(default)]
    pub simulate_latency: bool,
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u32,
}

fn default_latency_min_ms() -> u64 {
    300
}

fn default_latency_max_ms() -> u64 {
    1500
}

fn default_failure_rate() -> f64 {
    0.1
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_mobile_breakpoint() -> u32 {
    768
}

impl ServerConfig {
    pub fn network_profile(&self) -> NetworkProfile {
        NetworkProfile::new(self.latency_min_ms, self.latency_max_ms, self.failure_rate)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Layers `{dir}/default.yaml`, the optional `{dir}/{app_env}.yaml` and
/// `APP_*` environment variables, later sources winning.
pub fn load_server_config(dir: &Path, app_env: &str) -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(dir.join("default")))
        .add_source(File::from(dir.join(app_env)).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const DEFAULT: &str = "\
address: 127.0.0.1
port: 8080
templates_dir: templates/**/*
secret: test-secret
";

    #[test]
    fn defaults_fill_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT).unwrap();

        let config = load_server_config(dir.path(), "missing").unwrap();

        assert_eq!(config.port, 8080);
        assert!(!config.simulate_latency);
        assert_eq!(config.network_profile(), NetworkProfile::default());
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.mobile_breakpoint, 768);
    }

    #[test]
    fn profile_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), DEFAULT).unwrap();
        fs::write(
            dir.path().join("demo.yaml"),
            "simulate_latency: true\nfailure_rate: 0.25\nport: 9000\n",
        )
        .unwrap();

        let config = load_server_config(dir.path(), "demo").unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.simulate_latency);
        assert_eq!(config.network_profile().failure_rate(), 0.25);
    }

    #[test]
    fn missing_default_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_server_config(dir.path(), "local").is_err());
    }
}
