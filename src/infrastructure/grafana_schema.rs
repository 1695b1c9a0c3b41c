// Grafana dashboard JSON model, as consumed by the rendering service
use serde::Serialize;
use serde_json::{Map, Value};

pub const SCHEMA_VERSION: u32 = 39;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDocument {
    pub uid: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub editable: bool,
    pub graph_tooltip: u8,
    pub time: TimeWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    pub schema_version: u32,
    pub links: Vec<LinkDocument>,
    pub templating: Templating,
    pub annotations: Annotations,
    pub panels: Vec<PanelDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeWindow {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDocument {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
    pub icon: String,
    pub target_blank: bool,
    pub keep_time: bool,
    pub include_vars: bool,
    pub as_dropdown: bool,
    pub tags: Vec<String>,
    pub tooltip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Templating {
    pub list: Vec<VariableDocument>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Annotations {
    pub list: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub hide: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DataSourceDocument>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_custom_value: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentOption {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub uid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPosDocument {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

/// A panel, or a row when `kind` is `row`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDocument {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DataSourceDocument>,
    pub grid_pos: GridPosDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels: Option<Vec<PanelDocument>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_data_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_config: Option<FieldConfigDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDocument {
    pub expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldConfigDocument {
    pub defaults: FieldDefaultsDocument,
    pub overrides: Vec<OverrideDocument>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldDefaultsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsDocument>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdsDocument {
    pub mode: &'static str,
    pub steps: Vec<ThresholdStep>,
}

impl Default for ThresholdsDocument {
    fn default() -> Self {
        Self {
            mode: "absolute",
            steps: vec![ThresholdStep {
                color: "green",
                value: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdStep {
    pub color: &'static str,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverrideDocument {
    pub matcher: MatcherDocument,
    pub properties: Vec<PropertyDocument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatcherDocument {
    pub id: &'static str,
    pub options: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDocument {
    pub id: String,
    pub value: Value,
}
