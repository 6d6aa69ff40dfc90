//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency conversion configuration.
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Currency conversion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Significant digits kept when dividing two reference rates.
    #[serde(default = "default_cross_rate_precision")]
    pub cross_rate_precision: u32,
    /// Upper bound on a single exchange rate lookup, in milliseconds.
    #[serde(default = "default_rate_timeout_ms")]
    pub rate_timeout_ms: u64,
}

fn default_cross_rate_precision() -> u32 {
    10
}

fn default_rate_timeout_ms() -> u64 {
    5000
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            cross_rate_precision: default_cross_rate_precision(),
            rate_timeout_ms: default_rate_timeout_ms(),
        }
    }
}

impl ConversionConfig {
    /// Returns the rate lookup timeout.
    #[must_use]
    pub const fn rate_timeout(&self) -> Duration {
        Duration::from_millis(self.rate_timeout_ms)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "remit=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `REMIT__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("REMIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.conversion.cross_rate_precision, 10);
        assert_eq!(config.conversion.rate_timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.filter, "remit=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "REMIT__CONVERSION__CROSS_RATE_PRECISION",
                "REMIT__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.conversion.cross_rate_precision, 10);
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_env_overrides() {
        temp_env::with_vars(
            [
                ("REMIT__CONVERSION__CROSS_RATE_PRECISION", Some("12")),
                ("REMIT__CONVERSION__RATE_TIMEOUT_MS", Some("250")),
                ("REMIT__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.conversion.cross_rate_precision, 12);
                assert_eq!(
                    config.conversion.rate_timeout(),
                    Duration::from_millis(250)
                );
                assert!(config.logging.json);
            },
        );
    }
}
