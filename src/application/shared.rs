// Shared definitions - Data sources, variables and links reused across dashboards
use crate::domain::dashboard::DashboardLink;
use crate::domain::datasource::{DataSourceKind, DataSourceRef};
use crate::domain::variable::Variable;
use crate::infrastructure::config::GeneratorConfig;

pub const DATASOURCE_VARIABLE: &str = "datasource";

/// Values every dashboard builder receives explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedDefinitions {
    pub metrics: DataSourceRef,
    pub logging: DataSourceRef,
    pub metrics_variable: Variable,
    pub logging_variable: Variable,
    docs_base_url: String,
    github_url: String,
}

impl SharedDefinitions {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            metrics: DataSourceRef::from_variable(DataSourceKind::Prometheus, DATASOURCE_VARIABLE),
            logging: DataSourceRef::from_variable(DataSourceKind::Loki, DATASOURCE_VARIABLE),
            metrics_variable: Variable::datasource(
                DATASOURCE_VARIABLE,
                DataSourceKind::Prometheus,
                config.datasources.metrics_instance.as_str(),
            ),
            logging_variable: Variable::datasource(
                DATASOURCE_VARIABLE,
                DataSourceKind::Loki,
                config.datasources.logging_instance.as_str(),
            )
            .hidden(),
            docs_base_url: config.links.docs_base_url.trim_end_matches('/').to_string(),
            github_url: config.links.github_url.clone(),
        }
    }

    pub fn docs_url(&self, path: &str) -> String {
        format!("{}/{}", self.docs_base_url, path.trim_start_matches('/'))
    }

    pub fn docs_link(&self, path: &str) -> DashboardLink {
        DashboardLink::new("Docs", self.docs_url(path))
            .icon("doc")
            .target_blank()
    }

    pub fn github_link(&self) -> DashboardLink {
        DashboardLink::new("GitHub", self.github_url.as_str())
            .icon("external link")
            .target_blank()
    }
}

impl Default for SharedDefinitions {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::{VariableHide, VariableKind};

    #[test]
    fn test_docs_url_joins_cleanly() {
        let mut config = GeneratorConfig::default();
        config.links.docs_base_url = "https://docs.example.com/".to_string();
        let shared = SharedDefinitions::from_config(&config);
        assert_eq!(
            shared.docs_url("/observability"),
            "https://docs.example.com/observability"
        );
    }

    #[test]
    fn test_logging_variable_is_hidden_loki() {
        let shared = SharedDefinitions::default();
        assert_eq!(shared.logging_variable.hide, VariableHide::HideVariable);
        match &shared.logging_variable.kind {
            VariableKind::Datasource { plugin, current, .. } => {
                assert_eq!(*plugin, DataSourceKind::Loki);
                assert_eq!(current, "Nebius Logging");
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(shared.logging.uid, "${datasource}");
    }
}
