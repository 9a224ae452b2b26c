//! Server Settings

use serde::Deserialize;
use storage::StorageSettings;

/// Server configuration
///
/// Defaults are layered with `TELEMETRY__*` environment overrides, e.g.
/// `TELEMETRY__PORT=9090` or `TELEMETRY__STORAGE__URL=sqlite:/var/lib/sensors.db`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listen address (default: 0.0.0.0)
    pub host: String,
    /// Listen port (default: 8080)
    pub port: u16,
    /// Database connection settings
    pub storage: StorageSettings,
}

impl Settings {
    /// Load settings from defaults plus environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("storage.url", "sqlite:sensors.db")?
            .set_default("storage.max_connections", 5)?
            .add_source(config::Environment::with_prefix("TELEMETRY").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.storage.url, "sqlite:sensors.db");
        assert_eq!(settings.storage.max_connections, 5);
    }

    #[test]
    fn test_bind_addr() {
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            port: 9090,
            storage: StorageSettings::default(),
        };
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090");
    }
}
