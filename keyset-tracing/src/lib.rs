#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn init_tracer(config: TracingConfig) -> anyhow::Result<()> {
    let filter_layer = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };
    let registry = tracing_subscriber::registry().with(filter_layer);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }
    tracing::debug!(service_name = %config.service_name, "tracing initialized");
    Ok(())
}

fn default_service_name() -> String {
    "keyset".to_string()
}

fn default_filter() -> String {
    "warn,keyset_cursor=info,keyset_cli=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config: TracingConfig = serde_yaml::from_str("format: json").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.service_name, "keyset");
        assert_eq!(config.filter, default_filter());
    }
}
