// Panel domain model and builders
use super::datasource::DataSourceRef;
use super::override_rule::{Matcher, OverrideRule, OverrideTable, Property};
use super::query::Target;

pub const GRID_WIDTH: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }
}

/// Where a panel sits: a fixed grid cell, or a height/span flowed by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid(GridPos),
    Span { height: u32, span: u32 },
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Span {
            height: 8,
            span: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Never,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Never => "never",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStyle {
    Line,
    Bars,
}

impl DrawStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawStyle::Line => "line",
            DrawStyle::Bars => "bars",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPlacement {
    Auto,
}

impl AxisPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisPlacement::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipMode {
    Single,
    Multi,
}

impl TooltipMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipMode::Single => "single",
            TooltipMode::Multi => "multi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    None,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPlacement {
    Bottom,
}

impl LegendPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPlacement::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphMode {
    None,
}

impl GraphMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphMode::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    pub mode: TooltipMode,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legend {
    pub show: bool,
    pub placement: Option<LegendPlacement>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesOptions {
    pub fill_opacity: Option<u32>,
    pub show_points: Option<Visibility>,
    pub draw_style: Option<DrawStyle>,
    pub axis_placement: Option<AxisPlacement>,
    pub axis_soft_min: Option<f64>,
    pub axis_soft_max: Option<f64>,
    pub tooltip: Option<Tooltip>,
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatOptions {
    pub reduce_calcs: Vec<String>,
    pub graph_mode: Option<GraphMode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogsOptions {
    pub show_time: bool,
    pub enable_log_details: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    TimeSeries(TimeSeriesOptions),
    Stat(StatOptions),
    Logs(LogsOptions),
}

impl PanelKind {
    pub fn type_id(&self) -> &'static str {
        match self {
            PanelKind::TimeSeries(_) => "timeseries",
            PanelKind::Stat(_) => "stat",
            PanelKind::Logs(_) => "logs",
        }
    }
}

/// Settings shared by every panel type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelCommon {
    pub title: String,
    pub description: Option<String>,
    pub datasource: Option<DataSourceRef>,
    pub unit: Option<String>,
    pub min: Option<f64>,
    pub thresholds: bool,
    pub layout: Layout,
    pub max_data_points: Option<u32>,
    pub targets: Vec<Target>,
    pub overrides: OverrideTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub common: PanelCommon,
    pub kind: PanelKind,
}

/// Chained setters shared by the typed panel builders.
pub trait PanelBuilder: Sized {
    fn common_mut(&mut self) -> &mut PanelCommon;

    fn build(self) -> Panel;

    fn title(mut self, title: impl Into<String>) -> Self {
        self.common_mut().title = title.into();
        self
    }

    fn description(mut self, description: impl Into<String>) -> Self {
        self.common_mut().description = Some(description.into());
        self
    }

    fn datasource(mut self, datasource: &DataSourceRef) -> Self {
        self.common_mut().datasource = Some(datasource.clone());
        self
    }

    fn unit(mut self, unit: impl Into<String>) -> Self {
        self.common_mut().unit = Some(unit.into());
        self
    }

    fn min(mut self, min: f64) -> Self {
        self.common_mut().min = Some(min);
        self
    }

    fn thresholds(mut self) -> Self {
        self.common_mut().thresholds = true;
        self
    }

    fn grid_pos(mut self, h: u32, w: u32, x: u32, y: u32) -> Self {
        self.common_mut().layout = Layout::Grid(GridPos::new(h, w, x, y));
        self
    }

    fn height(mut self, height: u32) -> Self {
        let common = self.common_mut();
        common.layout = match common.layout {
            Layout::Span { span, .. } => Layout::Span { height, span },
            Layout::Grid(pos) => Layout::Grid(GridPos { h: height, ..pos }),
        };
        self
    }

    fn span(mut self, span: u32) -> Self {
        let common = self.common_mut();
        common.layout = match common.layout {
            Layout::Span { height, .. } => Layout::Span { height, span },
            Layout::Grid(pos) => Layout::Grid(GridPos { w: span, ..pos }),
        };
        self
    }

    fn max_data_points(mut self, points: u32) -> Self {
        self.common_mut().max_data_points = Some(points);
        self
    }

    fn with_target(mut self, target: Target) -> Self {
        self.common_mut().targets.push(target);
        self
    }

    fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.common_mut().targets.extend(targets);
        self
    }

    fn with_override(mut self, matcher: Matcher, properties: Vec<Property>) -> Self {
        self.common_mut()
            .overrides
            .push(OverrideRule::new(matcher, properties));
        self
    }

    fn with_overrides(mut self, rules: impl IntoIterator<Item = OverrideRule>) -> Self {
        for rule in rules {
            self.common_mut().overrides.push(rule);
        }
        self
    }

    fn override_by_name(self, name: impl Into<String>, properties: Vec<Property>) -> Self {
        self.with_override(Matcher::ByName(name.into()), properties)
    }

    fn override_by_query(self, ref_id: impl Into<String>, properties: Vec<Property>) -> Self {
        self.with_override(Matcher::ByQuery(ref_id.into()), properties)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeSeriesPanel {
    common: PanelCommon,
    options: TimeSeriesOptions,
}

impl TimeSeriesPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_opacity(mut self, opacity: u32) -> Self {
        self.options.fill_opacity = Some(opacity);
        self
    }

    pub fn show_points(mut self, visibility: Visibility) -> Self {
        self.options.show_points = Some(visibility);
        self
    }

    pub fn draw_style(mut self, style: DrawStyle) -> Self {
        self.options.draw_style = Some(style);
        self
    }

    pub fn axis_placement(mut self, placement: AxisPlacement) -> Self {
        self.options.axis_placement = Some(placement);
        self
    }

    pub fn axis_soft_min(mut self, min: f64) -> Self {
        self.options.axis_soft_min = Some(min);
        self
    }

    pub fn axis_soft_max(mut self, max: f64) -> Self {
        self.options.axis_soft_max = Some(max);
        self
    }

    pub fn tooltip(mut self, mode: TooltipMode, sort: SortOrder) -> Self {
        self.options.tooltip = Some(Tooltip { mode, sort });
        self
    }

    pub fn legend(mut self, show: bool, placement: Option<LegendPlacement>) -> Self {
        self.options.legend = Some(Legend { show, placement });
        self
    }
}

impl PanelBuilder for TimeSeriesPanel {
    fn common_mut(&mut self) -> &mut PanelCommon {
        &mut self.common
    }

    fn build(self) -> Panel {
        Panel {
            common: self.common,
            kind: PanelKind::TimeSeries(self.options),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatPanel {
    common: PanelCommon,
    options: StatOptions,
}

impl StatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce_calcs<I, S>(mut self, calcs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.reduce_calcs = calcs.into_iter().map(Into::into).collect();
        self
    }

    pub fn graph_mode(mut self, mode: GraphMode) -> Self {
        self.options.graph_mode = Some(mode);
        self
    }
}

impl PanelBuilder for StatPanel {
    fn common_mut(&mut self) -> &mut PanelCommon {
        &mut self.common
    }

    fn build(self) -> Panel {
        Panel {
            common: self.common,
            kind: PanelKind::Stat(self.options),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogsPanel {
    common: PanelCommon,
    options: LogsOptions,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_time(mut self, show: bool) -> Self {
        self.options.show_time = show;
        self
    }

    pub fn enable_log_details(mut self, enable: bool) -> Self {
        self.options.enable_log_details = enable;
        self
    }
}

impl PanelBuilder for LogsPanel {
    fn common_mut(&mut self) -> &mut PanelCommon {
        &mut self.common
    }

    fn build(self) -> Panel {
        Panel {
            common: self.common,
            kind: PanelKind::Logs(self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_and_span_keep_each_other() {
        let panel = TimeSeriesPanel::new().height(9).span(8).build();
        assert_eq!(
            panel.common.layout,
            Layout::Span {
                height: 9,
                span: 8
            }
        );
    }

    #[test]
    fn test_grid_pos_replaces_span() {
        let panel = StatPanel::new().span(6).grid_pos(7, 12, 12, 1).build();
        assert_eq!(panel.common.layout, Layout::Grid(GridPos::new(7, 12, 12, 1)));
        assert_eq!(panel.kind.type_id(), "stat");
    }

    #[test]
    fn test_builders_are_independent() {
        let base = TimeSeriesPanel::new().fill_opacity(5);
        let first = base.clone().title("first").fill_opacity(70).build();
        let second = base.title("second").build();

        match (&first.kind, &second.kind) {
            (PanelKind::TimeSeries(a), PanelKind::TimeSeries(b)) => {
                assert_eq!(a.fill_opacity, Some(70));
                assert_eq!(b.fill_opacity, Some(5));
            }
            _ => panic!("expected time series panels"),
        }
        assert_eq!(second.common.title, "second");
    }
}
