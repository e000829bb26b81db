use anyhow::Context;
use keyset_cursor::{PaginationConfig, SortRegistry};
use keyset_tracing::{LogFormat, TracingConfig};
use serde::{Deserialize, Serialize};

use std::{collections::BTreeMap, path::Path};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
    /// Order-by options per cursor kind.
    #[serde(default)]
    pub registries: BTreeMap<String, SortRegistry>,
}

pub struct EnvOverride {
    pub json_logs: bool,
}

impl Config {
    pub fn load_config(
        path: Option<impl AsRef<Path>>,
        env_override: EnvOverride,
    ) -> anyhow::Result<Self> {
        let mut config: Config = if let Some(config_path) = path {
            let config_file =
                std::fs::read_to_string(config_path).context("Couldn't read config file")?;
            serde_yaml::from_str(&config_file).context("Couldn't parse config file")?
        } else {
            Config::default()
        };

        config.apply_env_override(env_override);
        Ok(config)
    }

    fn apply_env_override(&mut self, EnvOverride { json_logs }: EnvOverride) {
        if json_logs {
            self.tracing.format = LogFormat::Json;
        }
    }
}
