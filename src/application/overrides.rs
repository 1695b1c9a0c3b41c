// Override properties and status tables shared by the dashboards
use crate::domain::override_rule::{Matcher, OverrideRule, Property};
use crate::domain::panel::{DrawStyle, Visibility};
use serde_json::json;

/// Display name and color for one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub status: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

const fn style(status: &'static str, label: &'static str, color: &'static str) -> StatusStyle {
    StatusStyle {
        status,
        label,
        color,
    }
}

pub const MONITORING_STATUS_CODES: &[StatusStyle] = &[
    style("400", "400: Bad Request", "#FFF176"),
    style("401", "401: Unauthorized", "#FFB3B8"),
    style("403", "403: Forbidden", "#FF9E80"),
    style("404", "404: Not Found", "#FFB347"),
    style("408", "408: Request Timeout", "#FFD966"),
    style("409", "409: Conflict", "#FFE066"),
    style("422", "422: Unprocessable Entity", "#FFC1E3"),
    style("429", "429: Too Many Requests", "#FFEE58"),
];

/// The overview also maps `412`; kept apart from the monitoring table.
pub const OVERVIEW_STATUS_CODES: &[StatusStyle] = &[
    style("400", "400: Bad Request", "#FFF176"),
    style("401", "401: Unauthorized", "#FFB3B8"),
    style("403", "403: Forbidden", "#FF9E80"),
    style("404", "404: Not Found", "#FFB347"),
    style("408", "408: Request Timeout", "#FFD966"),
    style("409", "409: Conflict", "#FFE066"),
    style("412", "412: Invalid token", "#FFE084"),
    style("422", "422: Unprocessable Entity", "#FFC1E3"),
    style("429", "429: Too Many Requests", "#FFEE58"),
];

pub const LOGGING_ERROR_STATUSES: &[StatusStyle] = &[
    style("err_auth", "Auth error", "#FFF176"),
    style("err_process", "Processing error", "#FFB3B8"),
    style("err_validate", "Validation error", "#FF9E80"),
    style("quota_exceeded", "Quota exceeded", "#FFB347"),
    style("workspace_inactive", "Inactive workspace", "#FFD966"),
];

pub fn display_name(name: &str) -> Property {
    Property::new("displayName", name)
}

pub fn fixed_color(color: &str) -> Property {
    Property::new("color", json!({ "mode": "fixed", "fixedColor": color }))
}

pub fn fill_opacity(opacity: u32) -> Property {
    Property::new("custom.fillOpacity", opacity)
}

pub fn hide_from(legend: bool, tooltip: bool, viz: bool) -> Property {
    Property::new(
        "custom.hideFrom",
        json!({ "legend": legend, "tooltip": tooltip, "viz": viz }),
    )
}

pub fn draw_style(style: DrawStyle) -> Property {
    Property::new("custom.drawStyle", style.as_str())
}

pub fn show_points(visibility: Visibility) -> Property {
    Property::new("custom.showPoints", visibility.as_str())
}

pub fn line_width(width: u32) -> Property {
    Property::new("custom.lineWidth", width)
}

/// Thin solid line without points.
pub fn line_style() -> Vec<Property> {
    vec![
        draw_style(DrawStyle::Line),
        show_points(Visibility::Never),
        line_width(1),
    ]
}

/// Panel-wide baseline applied to every series.
pub fn baseline() -> OverrideRule {
    OverrideRule::new(Matcher::match_all(), line_style())
}

/// Whether each status rule repeats the line style of the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLineStyle {
    Inline,
    BaselineOnly,
}

/// One by-name rule per table entry, in table order.
pub fn status_overrides(table: &[StatusStyle], line: StatusLineStyle) -> Vec<OverrideRule> {
    table
        .iter()
        .map(|entry| {
            let mut properties = vec![display_name(entry.label), fixed_color(entry.color)];
            if line == StatusLineStyle::Inline {
                properties.extend(line_style());
            }
            OverrideRule::new(Matcher::ByName(entry.status.to_string()), properties)
        })
        .collect()
}
