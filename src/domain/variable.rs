// Dashboard variable domain model
use super::datasource::{DataSourceKind, DataSourceRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableHide {
    DontHide,
    HideVariable,
}

impl VariableHide {
    pub fn code(&self) -> u8 {
        match self {
            VariableHide::DontHide => 0,
            VariableHide::HideVariable => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableKind {
    /// Picker over data source instances of one plugin type.
    Datasource {
        plugin: DataSourceKind,
        current: String,
        allow_custom_value: bool,
    },
    /// Options discovered at render time by a label query.
    Query {
        datasource: DataSourceRef,
        query: String,
        multi: bool,
        include_all: bool,
        all_value: Option<String>,
        allow_custom_value: bool,
    },
    Constant {
        value: String,
        allow_custom_value: bool,
    },
    Textbox {
        default: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub label: Option<String>,
    pub hide: VariableHide,
    pub kind: VariableKind,
}

impl Variable {
    fn new(name: impl Into<String>, hide: VariableHide, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            hide,
            kind,
        }
    }

    pub fn datasource(name: impl Into<String>, plugin: DataSourceKind, current: impl Into<String>) -> Self {
        Self::new(
            name,
            VariableHide::DontHide,
            VariableKind::Datasource {
                plugin,
                current: current.into(),
                allow_custom_value: false,
            },
        )
    }

    pub fn query(name: impl Into<String>, datasource: &DataSourceRef, query: impl Into<String>) -> Self {
        Self::new(
            name,
            VariableHide::DontHide,
            VariableKind::Query {
                datasource: datasource.clone(),
                query: query.into(),
                multi: false,
                include_all: false,
                all_value: None,
                allow_custom_value: false,
            },
        )
    }

    pub fn constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            VariableHide::HideVariable,
            VariableKind::Constant {
                value: value.into(),
                allow_custom_value: false,
            },
        )
    }

    pub fn textbox(name: impl Into<String>) -> Self {
        Self::new(
            name,
            VariableHide::DontHide,
            VariableKind::Textbox {
                default: String::new(),
            },
        )
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide = VariableHide::HideVariable;
        self
    }

    /// Allow selecting several values. Only meaningful for query variables.
    pub fn multi(mut self) -> Self {
        if let VariableKind::Query { multi, .. } = &mut self.kind {
            *multi = true;
        }
        self
    }

    /// Add the synthetic "All" option, resolved to `all_value` in queries.
    pub fn include_all(mut self, value: impl Into<String>) -> Self {
        if let VariableKind::Query {
            include_all,
            all_value,
            ..
        } = &mut self.kind
        {
            *include_all = true;
            *all_value = Some(value.into());
        }
        self
    }

    /// Texts that may reference other variables.
    pub fn expressions(&self) -> Vec<&str> {
        match &self.kind {
            VariableKind::Query {
                datasource, query, ..
            } => vec![datasource.uid.as_str(), query.as_str()],
            VariableKind::Constant { value, .. } => vec![value.as_str()],
            VariableKind::Datasource { .. } | VariableKind::Textbox { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_variable_flags() {
        let ds = DataSourceRef::from_variable(DataSourceKind::Prometheus, "datasource");
        let var = Variable::query("bucket", &ds, "label_values(buckets_stat_quantity, bucket)")
            .multi()
            .include_all(".*");

        match &var.kind {
            VariableKind::Query {
                multi,
                include_all,
                all_value,
                ..
            } => {
                assert!(*multi);
                assert!(*include_all);
                assert_eq!(all_value.as_deref(), Some(".*"));
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(
            var.expressions(),
            vec!["${datasource}", "label_values(buckets_stat_quantity, bucket)"]
        );
    }

    #[test]
    fn test_multi_ignored_for_textbox() {
        let var = Variable::textbox("search").multi().label("Log Search");
        assert_eq!(var.kind, VariableKind::Textbox { default: String::new() });
        assert_eq!(var.label.as_deref(), Some("Log Search"));
    }

    #[test]
    fn test_constant_is_hidden() {
        let var = Variable::constant("bucket", "default");
        assert_eq!(var.hide, VariableHide::HideVariable);
        assert_eq!(var.hide.code(), 2);
    }
}
