// Data source domain model

/// Backend plugin a panel or variable queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSourceKind {
    Prometheus,
    Loki,
}

impl DataSourceKind {
    pub fn plugin_id(&self) -> &'static str {
        match self {
            DataSourceKind::Prometheus => "prometheus",
            DataSourceKind::Loki => "loki",
        }
    }
}

/// Reference to a data source, usually through a dashboard variable (`${datasource}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceRef {
    pub kind: DataSourceKind,
    pub uid: String,
}

impl DataSourceRef {
    pub fn new(kind: DataSourceKind, uid: impl Into<String>) -> Self {
        Self {
            kind,
            uid: uid.into(),
        }
    }

    pub fn from_variable(kind: DataSourceKind, variable: &str) -> Self {
        Self::new(kind, format!("${{{}}}", variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_variable() {
        let reference = DataSourceRef::from_variable(DataSourceKind::Loki, "datasource");
        assert_eq!(reference.uid, "${datasource}");
        assert_eq!(reference.kind.plugin_id(), "loki");
    }
}
