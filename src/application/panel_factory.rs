// Panel factory - Pre-styled panel templates bound to one data source
use crate::domain::datasource::DataSourceRef;
use crate::domain::panel::{
    GraphMode, LegendPlacement, LogsPanel, PanelBuilder, SortOrder, StatPanel, TimeSeriesPanel,
    TooltipMode, Visibility,
};

/// Unit identifiers understood by the rendering service.
pub mod units {
    pub const SHORT: &str = "short";
    pub const SECONDS: &str = "s";
    pub const REQUESTS_PER_SECOND: &str = "reqps";
    pub const ROWS_PER_SECOND: &str = "rowsps";
    pub const BYTES_IEC: &str = "bytes";
    pub const BYTES_SI: &str = "decbytes";
    pub const BYTES_PER_SECOND_IEC: &str = "binBps";
    pub const BYTES_PER_SECOND_SI: &str = "Bps";
}

pub const PANEL_SPAN: u32 = 12;
pub const PANEL_HEIGHT: u32 = 8;
pub const STAT_HEIGHT: u32 = 3;

/// Every call returns a fresh builder; nothing is shared between panels.
#[derive(Debug, Clone)]
pub struct PanelFactory {
    datasource: DataSourceRef,
}

impl PanelFactory {
    pub fn new(datasource: &DataSourceRef) -> Self {
        Self {
            datasource: datasource.clone(),
        }
    }

    /// Time series bound to the data source, without any styling.
    pub fn bare_time_series(&self) -> TimeSeriesPanel {
        TimeSeriesPanel::new().datasource(&self.datasource)
    }

    /// Time series with the house style: hidden points, light fill, shared
    /// tooltip, legend shown and a soft 0..1 y axis.
    pub fn time_series(&self, title: &str, description: &str, unit: &str) -> TimeSeriesPanel {
        self.bare_time_series()
            .title(title)
            .description(description)
            .unit(unit)
            .fill_opacity(5)
            .show_points(Visibility::Never)
            .thresholds()
            .tooltip(TooltipMode::Multi, SortOrder::None)
            .legend(true, Some(LegendPlacement::Bottom))
            .axis_soft_min(0.0)
            .axis_soft_max(1.0)
            .height(PANEL_HEIGHT)
            .span(PANEL_SPAN)
    }

    /// Single value summing the series over the selected range.
    pub fn stat(&self, title: &str, description: &str, unit: &str) -> StatPanel {
        StatPanel::new()
            .datasource(&self.datasource)
            .title(title)
            .description(description)
            .unit(unit)
            .height(STAT_HEIGHT)
            .span(PANEL_SPAN)
            .reduce_calcs(["sum"])
            .thresholds()
            .graph_mode(GraphMode::None)
    }

    pub fn logs(&self) -> LogsPanel {
        LogsPanel::new()
            .datasource(&self.datasource)
            .show_time(true)
            .enable_log_details(true)
    }
}
