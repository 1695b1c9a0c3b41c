// Query target domain model
use super::datasource::DataSourceKind;

/// One query attached to a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub backend: DataSourceKind,
    pub expr: String,
    pub legend_format: Option<String>,
    pub ref_id: Option<String>,
    /// Evaluate over the whole time range rather than at a single instant.
    pub range: bool,
    pub max_lines: Option<u32>,
}

impl Target {
    fn new(backend: DataSourceKind, expr: impl Into<String>) -> Self {
        Self {
            backend,
            expr: expr.into(),
            legend_format: None,
            ref_id: None,
            range: false,
            max_lines: None,
        }
    }

    pub fn prometheus(expr: impl Into<String>) -> Self {
        Self::new(DataSourceKind::Prometheus, expr)
    }

    pub fn loki(expr: impl Into<String>) -> Self {
        Self::new(DataSourceKind::Loki, expr)
    }

    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend_format = Some(legend.into());
        self
    }

    pub fn ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    pub fn range(mut self) -> Self {
        self.range = true;
        self
    }

    pub fn max_lines(mut self, lines: u32) -> Self {
        self.max_lines = Some(lines);
        self
    }
}
