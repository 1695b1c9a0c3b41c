// Mapper to convert domain dashboards to the Grafana JSON model
use crate::domain::dashboard::{Dashboard, DashboardLink, Row};
use crate::domain::datasource::DataSourceRef;
use crate::domain::override_rule::OverrideTable;
use crate::domain::panel::{GridPos, Layout, Panel, PanelKind, GRID_WIDTH};
use crate::domain::query::Target;
use crate::domain::variable::{Variable, VariableKind};
use crate::infrastructure::grafana_schema::{
    Annotations, CurrentOption, DashboardDocument, DataSourceDocument, FieldConfigDocument,
    FieldDefaultsDocument, GridPosDocument, LinkDocument, MatcherDocument, OverrideDocument,
    PanelDocument, PropertyDocument, TargetDocument, Templating, ThresholdsDocument, TimeWindow,
    VariableDocument, SCHEMA_VERSION,
};
use serde_json::{json, Map};
use std::collections::HashSet;

pub fn dashboard_to_document(dashboard: &Dashboard) -> DashboardDocument {
    let mut ids = IdAllocator::new(dashboard);
    let mut cursor = GridCursor::default();
    let mut panels = Vec::new();

    for panel in &dashboard.panels {
        panels.push(panel_to_document(panel, &mut cursor, &mut ids));
    }
    for row in &dashboard.rows {
        panels.push(row_to_document(row, &mut cursor, &mut ids));
        for panel in &row.panels {
            panels.push(panel_to_document(panel, &mut cursor, &mut ids));
        }
    }

    DashboardDocument {
        uid: dashboard.uid.clone(),
        title: dashboard.title.clone(),
        description: dashboard.description.clone(),
        tags: dashboard.tags.clone(),
        timezone: dashboard.timezone.clone(),
        editable: !dashboard.readonly,
        graph_tooltip: 0,
        time: TimeWindow {
            from: dashboard.time.from.clone(),
            to: dashboard.time.to.clone(),
        },
        refresh: dashboard.refresh.clone(),
        schema_version: SCHEMA_VERSION,
        links: dashboard.links.iter().map(link_to_document).collect(),
        templating: Templating {
            list: dashboard.variables.iter().map(variable_to_document).collect(),
        },
        annotations: Annotations::default(),
        panels,
    }
}

/// Pretty-printed document; identical input always yields identical bytes.
pub fn render_dashboard(dashboard: &Dashboard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&dashboard_to_document(dashboard))
}

fn link_to_document(link: &DashboardLink) -> LinkDocument {
    LinkDocument {
        title: link.title.clone(),
        kind: "link",
        url: link.url.clone(),
        icon: link.icon.clone(),
        target_blank: link.target_blank,
        keep_time: link.keep_time,
        include_vars: false,
        as_dropdown: false,
        tags: Vec::new(),
        tooltip: String::new(),
    }
}

fn datasource_to_document(datasource: &DataSourceRef) -> DataSourceDocument {
    DataSourceDocument {
        kind: datasource.kind.plugin_id(),
        uid: datasource.uid.clone(),
    }
}

fn variable_to_document(variable: &Variable) -> VariableDocument {
    let mut document = VariableDocument {
        kind: "",
        name: variable.name.clone(),
        label: variable.label.clone(),
        hide: variable.hide.code(),
        datasource: None,
        query: String::new(),
        current: None,
        multi: None,
        include_all: None,
        all_value: None,
        allow_custom_value: None,
    };

    match &variable.kind {
        VariableKind::Datasource {
            plugin,
            current,
            allow_custom_value,
        } => {
            document.kind = "datasource";
            document.query = plugin.plugin_id().to_string();
            document.current = Some(CurrentOption {
                text: current.clone(),
                value: current.clone(),
            });
            document.allow_custom_value = Some(*allow_custom_value);
        }
        VariableKind::Query {
            datasource,
            query,
            multi,
            include_all,
            all_value,
            allow_custom_value,
        } => {
            document.kind = "query";
            document.datasource = Some(datasource_to_document(datasource));
            document.query = query.clone();
            document.multi = Some(*multi);
            document.include_all = Some(*include_all);
            document.all_value = all_value.clone();
            document.allow_custom_value = Some(*allow_custom_value);
        }
        VariableKind::Constant {
            value,
            allow_custom_value,
        } => {
            document.kind = "constant";
            document.query = value.clone();
            document.allow_custom_value = Some(*allow_custom_value);
        }
        VariableKind::Textbox { default } => {
            document.kind = "textbox";
            document.query = default.clone();
        }
    }

    document
}

fn row_to_document(row: &Row, cursor: &mut GridCursor, ids: &mut IdAllocator) -> PanelDocument {
    PanelDocument {
        kind: "row",
        id: ids.assign(row.id),
        title: row.title.clone(),
        description: None,
        datasource: None,
        grid_pos: cursor.place_row(row.grid_pos),
        collapsed: Some(false),
        repeat: row.repeat.clone(),
        panels: Some(Vec::new()),
        targets: Vec::new(),
        max_data_points: None,
        field_config: None,
        options: None,
    }
}

fn panel_to_document(panel: &Panel, cursor: &mut GridCursor, ids: &mut IdAllocator) -> PanelDocument {
    let common = &panel.common;
    let mut defaults = FieldDefaultsDocument {
        unit: common.unit.clone(),
        min: common.min,
        thresholds: common.thresholds.then(ThresholdsDocument::default),
        custom: Map::new(),
    };
    let mut options = Map::new();

    match &panel.kind {
        PanelKind::TimeSeries(ts) => {
            let custom = &mut defaults.custom;
            if let Some(opacity) = ts.fill_opacity {
                custom.insert("fillOpacity".into(), json!(opacity));
            }
            if let Some(points) = ts.show_points {
                custom.insert("showPoints".into(), json!(points.as_str()));
            }
            if let Some(style) = ts.draw_style {
                custom.insert("drawStyle".into(), json!(style.as_str()));
            }
            if let Some(placement) = ts.axis_placement {
                custom.insert("axisPlacement".into(), json!(placement.as_str()));
            }
            if let Some(min) = ts.axis_soft_min {
                custom.insert("axisSoftMin".into(), json!(min));
            }
            if let Some(max) = ts.axis_soft_max {
                custom.insert("axisSoftMax".into(), json!(max));
            }
            if let Some(tooltip) = ts.tooltip {
                options.insert(
                    "tooltip".into(),
                    json!({ "mode": tooltip.mode.as_str(), "sort": tooltip.sort.as_str() }),
                );
            }
            if let Some(legend) = ts.legend {
                let mut value = json!({
                    "showLegend": legend.show,
                    "displayMode": "list",
                    "calcs": [],
                });
                if let Some(placement) = legend.placement {
                    value["placement"] = json!(placement.as_str());
                }
                options.insert("legend".into(), value);
            }
        }
        PanelKind::Stat(stat) => {
            options.insert(
                "reduceOptions".into(),
                json!({ "calcs": stat.reduce_calcs }),
            );
            if let Some(mode) = stat.graph_mode {
                options.insert("graphMode".into(), json!(mode.as_str()));
            }
        }
        PanelKind::Logs(logs) => {
            options.insert("showTime".into(), json!(logs.show_time));
            options.insert("enableLogDetails".into(), json!(logs.enable_log_details));
        }
    }

    PanelDocument {
        kind: panel.kind.type_id(),
        id: ids.assign(None),
        title: common.title.clone(),
        description: common.description.clone(),
        datasource: common.datasource.as_ref().map(datasource_to_document),
        grid_pos: cursor.place_panel(common.layout),
        collapsed: None,
        repeat: None,
        panels: None,
        targets: common.targets.iter().map(target_to_document).collect(),
        max_data_points: common.max_data_points,
        field_config: Some(FieldConfigDocument {
            defaults,
            overrides: overrides_to_document(&common.overrides),
        }),
        options: (!options.is_empty()).then_some(options),
    }
}

fn target_to_document(target: &Target) -> TargetDocument {
    TargetDocument {
        expr: target.expr.clone(),
        legend_format: target.legend_format.clone(),
        ref_id: target.ref_id.clone(),
        range: target.range.then_some(true),
        max_lines: target.max_lines,
    }
}

fn overrides_to_document(table: &OverrideTable) -> Vec<OverrideDocument> {
    table
        .iter()
        .map(|rule| OverrideDocument {
            matcher: MatcherDocument {
                id: rule.matcher.id(),
                options: rule.matcher.options().to_string(),
            },
            properties: rule
                .properties
                .iter()
                .map(|property| PropertyDocument {
                    id: property.path.clone(),
                    value: property.value.clone(),
                })
                .collect::<Vec<_>>(),
        })
        .collect()
}

/// Flows span-sized items left to right over the grid, wrapping full lines.
/// Rows always open a fresh line below everything placed so far.
#[derive(Debug, Default)]
struct GridCursor {
    x: u32,
    y: u32,
    line_height: u32,
    bottom: u32,
}

impl GridCursor {
    fn place_row(&mut self, explicit: Option<GridPos>) -> GridPosDocument {
        let pos = explicit.unwrap_or_else(|| GridPos::new(1, GRID_WIDTH, 0, self.bottom));
        self.x = 0;
        self.y = pos.y + pos.h;
        self.line_height = 0;
        self.bottom = self.bottom.max(self.y);
        to_document(pos)
    }

    fn place_panel(&mut self, layout: Layout) -> GridPosDocument {
        let pos = match layout {
            Layout::Grid(pos) => {
                self.x = pos.x + pos.w;
                self.y = pos.y;
                self.line_height = pos.h;
                pos
            }
            Layout::Span { height, span } => {
                let width = span.clamp(1, GRID_WIDTH);
                if self.x + width > GRID_WIDTH {
                    self.y += self.line_height;
                    self.x = 0;
                    self.line_height = 0;
                }
                let pos = GridPos::new(height, width, self.x, self.y);
                self.x += width;
                self.line_height = self.line_height.max(height);
                pos
            }
        };
        self.bottom = self.bottom.max(pos.y + pos.h);
        to_document(pos)
    }
}

fn to_document(pos: GridPos) -> GridPosDocument {
    GridPosDocument {
        h: pos.h,
        w: pos.w,
        x: pos.x,
        y: pos.y,
    }
}

/// Keeps explicit ids and numbers everything else from 1, skipping taken ids.
struct IdAllocator {
    taken: HashSet<u32>,
    next: u32,
}

impl IdAllocator {
    fn new(dashboard: &Dashboard) -> Self {
        let taken = dashboard
            .rows
            .iter()
            .filter_map(|row| row.id)
            .collect();
        Self { taken, next: 1 }
    }

    fn assign(&mut self, explicit: Option<u32>) -> u32 {
        if let Some(id) = explicit {
            return id;
        }
        while self.taken.contains(&self.next) {
            self.next += 1;
        }
        let id = self.next;
        self.taken.insert(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboards::{logging, mk8s_logs, monitoring, object_storage};
    use crate::application::shared::SharedDefinitions;
    use crate::domain::panel::{PanelBuilder, TimeSeriesPanel};
    use serde_json::Value;

    fn document(build: fn(&SharedDefinitions) -> Dashboard) -> Value {
        serde_json::to_value(dashboard_to_document(&build(&SharedDefinitions::default()))).unwrap()
    }

    #[test]
    fn test_span_layout_flows_and_wraps() {
        let doc = document(logging::build);
        let positions: Vec<(&str, &Value)> = doc["panels"]
            .as_array()
            .unwrap()
            .iter()
            .take(5)
            .map(|panel| (panel["type"].as_str().unwrap(), &panel["gridPos"]))
            .collect();

        assert_eq!(positions[0], ("row", &json!({"h": 1, "w": 24, "x": 0, "y": 0})));
        assert_eq!(positions[1], ("stat", &json!({"h": 3, "w": 12, "x": 0, "y": 1})));
        assert_eq!(positions[2], ("stat", &json!({"h": 3, "w": 12, "x": 12, "y": 1})));
        assert_eq!(
            positions[3],
            ("timeseries", &json!({"h": 8, "w": 12, "x": 0, "y": 4}))
        );
        assert_eq!(
            positions[4],
            ("timeseries", &json!({"h": 8, "w": 12, "x": 12, "y": 4}))
        );
    }

    #[test]
    fn test_row_after_panels_starts_new_line() {
        let dashboard = Dashboard::new("layout", "Layout")
            .with_row(Row::new("first").with_panel(TimeSeriesPanel::new().height(5).span(8)))
            .with_row(Row::new("second"));
        let doc = dashboard_to_document(&dashboard);
        assert_eq!(doc.panels[2].kind, "row");
        assert_eq!(doc.panels[2].grid_pos, GridPosDocument { h: 1, w: 24, x: 0, y: 6 });
    }

    #[test]
    fn test_explicit_ids_kept_and_others_skip_them() {
        let doc = document(monitoring::build);
        let ids: Vec<u64> = doc["panels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|panel| panel["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 8, 4, 6, 5, 7]);
    }

    #[test]
    fn test_repeat_row_document() {
        let doc = document(object_storage::build);
        let row = doc["panels"]
            .as_array()
            .unwrap()
            .iter()
            .find(|panel| panel["title"] == "Requests for $bucket")
            .unwrap();
        assert_eq!(row["type"], "row");
        assert_eq!(row["repeat"], "bucket");
        assert_eq!(row["collapsed"], false);
        assert_eq!(row["panels"], json!([]));
    }

    #[test]
    fn test_readonly_and_metadata() {
        let doc = document(monitoring::build);
        assert_eq!(doc["editable"], false);
        assert_eq!(doc["uid"], "nebius-monitoring");
        assert_eq!(doc["refresh"], "1m");
        assert_eq!(doc["time"], json!({"from": "now-15m", "to": "now"}));
        assert_eq!(doc["templating"]["list"][0]["type"], "datasource");
        assert_eq!(doc["templating"]["list"][0]["query"], "prometheus");
        assert_eq!(
            doc["templating"]["list"][0]["current"],
            json!({"text": "Nebius Services", "value": "Nebius Services"})
        );
    }

    #[test]
    fn test_override_and_target_documents() {
        let doc = document(monitoring::build);
        let ingest = &doc["panels"][1];
        assert_eq!(ingest["targets"][0]["refId"], "Requests rate");
        assert_eq!(ingest["targets"][0]["range"], true);
        assert_eq!(
            ingest["fieldConfig"]["overrides"][0]["matcher"],
            json!({"id": "byFrameRefID", "options": "Requests limit"})
        );
        assert_eq!(
            ingest["fieldConfig"]["overrides"][0]["properties"][0],
            json!({"id": "color", "value": {"mode": "fixed", "fixedColor": "dark-red"}})
        );
        assert_eq!(
            ingest["fieldConfig"]["overrides"][1]["matcher"],
            json!({"id": "byRegexp", "options": ".*"})
        );
    }

    #[test]
    fn test_logs_explorer_document() {
        let doc = document(mk8s_logs::build);
        let volume = &doc["panels"][0];
        assert_eq!(volume["gridPos"], json!({"h": 3, "w": 24, "x": 0, "y": 0}));
        assert_eq!(volume["maxDataPoints"], 300);
        assert_eq!(volume["fieldConfig"]["defaults"]["min"], 0.0);
        assert_eq!(volume["fieldConfig"]["defaults"]["custom"]["drawStyle"], "bars");
        assert_eq!(volume["options"]["legend"]["showLegend"], false);

        let logs = &doc["panels"][1];
        assert_eq!(logs["type"], "logs");
        assert_eq!(logs["gridPos"]["y"], 3);
        assert_eq!(logs["targets"][0]["maxLines"], 100);
        assert_eq!(logs["options"], json!({"showTime": true, "enableLogDetails": true}));
        assert_eq!(logs["datasource"], json!({"type": "loki", "uid": "${datasource}"}));

        let constant = &doc["templating"]["list"][1];
        assert_eq!(constant["type"], "constant");
        assert_eq!(constant["hide"], 2);
    }

    #[test]
    fn test_rendering_is_byte_identical() {
        let dashboard = object_storage::build(&SharedDefinitions::default());
        let first = render_dashboard(&dashboard).unwrap();
        let second = render_dashboard(&object_storage::build(&SharedDefinitions::default())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_panel_without_styling_has_no_options() {
        let dashboard = Dashboard::new("plain", "Plain")
            .with_panel(TimeSeriesPanel::new().title("bare"));
        let doc = dashboard_to_document(&dashboard);
        assert!(doc.panels[0].options.is_none());
        assert!(doc.panels[0].targets.is_empty());
    }
}
