use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "config/generator";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub datasources: DatasourceSettings,
    pub links: LinkSettings,
    pub output: OutputSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatasourceSettings {
    /// Default selection of the metrics data source variable.
    pub metrics_instance: String,
    /// Default selection of the logging data source variable.
    pub logging_instance: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LinkSettings {
    pub docs_base_url: String,
    pub github_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub address: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            datasources: DatasourceSettings {
                metrics_instance: "Nebius Services".to_string(),
                logging_instance: "Nebius Logging".to_string(),
            },
            links: LinkSettings {
                docs_base_url: "https://docs.nebius.com".to_string(),
                github_url: "https://github.com/nebius/observability".to_string(),
            },
            output: OutputSettings {
                directory: PathBuf::from("dashboards"),
            },
            server: ServerSettings {
                address: "127.0.0.1:8080".to_string(),
            },
        }
    }
}

/// Load settings layered over the built-in defaults.
///
/// Without an explicit path, `config/generator.*` is read when present.
pub fn load_generator_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let defaults = config::Config::try_from(&GeneratorConfig::default())
        .context("Failed to build default configuration")?;

    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
        .add_source(defaults)
        .add_source(file)
        .build()
        .context("Failed to load generator configuration")?;

    Ok(settings.try_deserialize()?)
}

pub fn render_config(config: &GeneratorConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
