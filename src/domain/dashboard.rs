// Dashboard domain model
use super::panel::{GridPos, Panel, PanelBuilder};
use super::variable::Variable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLink {
    pub title: String,
    pub url: String,
    pub icon: String,
    pub target_blank: bool,
    pub keep_time: bool,
}

impl DashboardLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: "external link".to_string(),
            target_blank: false,
            keep_time: false,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn target_blank(mut self) -> Self {
        self.target_blank = true;
        self
    }

    pub fn keep_time(mut self) -> Self {
        self.keep_time = true;
        self
    }
}

/// Horizontal group of panels.
///
/// With `repeat` set, the rendering service clones the row once per value of
/// that variable at view time; only the template row is emitted here.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Option<u32>,
    pub title: String,
    pub repeat: Option<String>,
    pub grid_pos: Option<GridPos>,
    pub panels: Vec<Panel>,
}

impl Row {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            repeat: None,
            grid_pos: None,
            panels: Vec::new(),
        }
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn repeat(mut self, variable: impl Into<String>) -> Self {
        self.repeat = Some(variable.into());
        self
    }

    pub fn grid_pos(mut self, h: u32, w: u32, x: u32, y: u32) -> Self {
        self.grid_pos = Some(GridPos::new(h, w, x, y));
        self
    }

    pub fn with_panel(mut self, panel: impl PanelBuilder) -> Self {
        self.panels.push(panel.build());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub uid: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub timezone: Option<String>,
    pub refresh: Option<String>,
    pub time: TimeRange,
    pub readonly: bool,
    pub links: Vec<DashboardLink>,
    pub variables: Vec<Variable>,
    /// Panels placed above the first row.
    pub panels: Vec<Panel>,
    pub rows: Vec<Row>,
}

impl Dashboard {
    pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            description: None,
            tags: Vec::new(),
            timezone: None,
            refresh: None,
            time: TimeRange {
                from: "now-6h".to_string(),
                to: "now".to_string(),
            },
            readonly: false,
            links: Vec::new(),
            variables: Vec::new(),
            panels: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    pub fn time(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.time = TimeRange {
            from: from.into(),
            to: to.into(),
        };
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn link(mut self, link: DashboardLink) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_panel(mut self, panel: impl PanelBuilder) -> Self {
        self.panels.push(panel.build());
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Every panel in document order.
    pub fn all_panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels
            .iter()
            .chain(self.rows.iter().flat_map(|row| row.panels.iter()))
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::TimeSeriesPanel;

    #[test]
    fn test_all_panels_in_document_order() {
        let dashboard = Dashboard::new("uid", "Title")
            .with_panel(TimeSeriesPanel::new().title("loose"))
            .with_row(
                Row::new("first")
                    .with_panel(TimeSeriesPanel::new().title("a"))
                    .with_panel(TimeSeriesPanel::new().title("b")),
            )
            .with_row(Row::new("second").with_panel(TimeSeriesPanel::new().title("c")));

        let titles: Vec<&str> = dashboard
            .all_panels()
            .map(|panel| panel.common.title.as_str())
            .collect();
        assert_eq!(titles, vec!["loose", "a", "b", "c"]);
    }

    #[test]
    fn test_repeat_row_keeps_single_template() {
        let row = Row::new("Requests for $bucket")
            .repeat("bucket")
            .with_panel(TimeSeriesPanel::new().title("Read requests"));
        assert_eq!(row.repeat.as_deref(), Some("bucket"));
        assert_eq!(row.panels.len(), 1);
    }
}
