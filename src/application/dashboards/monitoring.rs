// Metrics ingestion and read path dashboard
use crate::application::overrides::{
    baseline, fill_opacity, fixed_color, hide_from, line_style, status_overrides, StatusLineStyle,
    MONITORING_STATUS_CODES,
};
use crate::application::panel_factory::{units, PanelFactory};
use crate::application::query_builder::{Expr, Selector, Spacing, RATE_INTERVAL};
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::panel::PanelBuilder;
use crate::domain::query::Target;

pub const UID: &str = "nebius-monitoring";

pub fn build(shared: &SharedDefinitions) -> Dashboard {
    let panels = PanelFactory::new(&shared.metrics);

    Dashboard::new(UID, "Nebius Monitoring")
        .tags(["Nebius", "Monitoring"])
        .refresh("1m")
        .time("now-15m", "now")
        .timezone("browser")
        .readonly()
        .with_variable(shared.metrics_variable.clone())
        .description(format!(
            "Dashboard provides an overview of the Nebius Monitoring. {}",
            shared.docs_url("observability/monitoring")
        ))
        .link(shared.docs_link("observability"))
        .link(shared.github_link())
        .with_row(
            Row::new("Ingest")
                .grid_pos(1, 24, 0, 0)
                .id(1)
                .with_panel(
                    panels
                        .bare_time_series()
                        .title("Ingest requests")
                        .description("Number of metrics ingestion requests per second")
                        .unit(units::REQUESTS_PER_SECOND)
                        .grid_pos(7, 12, 0, 1)
                        .with_target(
                            Target::prometheus(requests_rate("write", Spacing::Loose))
                                .legend("Requests")
                                .ref_id("Requests rate")
                                .range(),
                        )
                        .with_target(
                            Target::prometheus(requests_limit("write"))
                                .legend("Requests limit")
                                .ref_id("Requests limit")
                                .range(),
                        )
                        .override_by_query("Requests limit", {
                            let mut properties = vec![
                                fixed_color("dark-red"),
                                fill_opacity(0),
                                hide_from(true, false, false),
                            ];
                            properties.extend(line_style());
                            properties
                        })
                        .with_overrides([baseline()]),
                )
                .with_panel(
                    panels
                        .bare_time_series()
                        .title("Ingest requests errors")
                        .description(
                            "Number of failed metrics ingestion requests per second, by status code",
                        )
                        .unit(units::REQUESTS_PER_SECOND)
                        .grid_pos(7, 12, 12, 1)
                        .with_target(
                            Target::prometheus(request_errors("write"))
                                .legend("{{status_code}}")
                                .ref_id("Write errors by status")
                                .range(),
                        )
                        .with_overrides(status_overrides(
                            MONITORING_STATUS_CODES,
                            StatusLineStyle::Inline,
                        ))
                        .with_overrides([baseline()]),
                ),
        )
        .with_row(
            Row::new("Read")
                .grid_pos(1, 24, 0, 8)
                .id(8)
                .with_panel(
                    panels
                        .bare_time_series()
                        .title("Read requests")
                        .description("Number of metrics read requests per second")
                        .unit(units::REQUESTS_PER_SECOND)
                        .grid_pos(7, 12, 0, 9)
                        .with_target(
                            Target::prometheus(requests_rate("read", Spacing::Loose))
                                .legend("Requests")
                                .ref_id("Requests")
                                .range(),
                        )
                        .with_target(
                            Target::prometheus(requests_limit("read"))
                                .legend("Limit")
                                .ref_id("Limit")
                                .range(),
                        )
                        .override_by_query("Limit", {
                            let mut properties = vec![fixed_color("dark-red")];
                            properties.extend(line_style());
                            properties
                        })
                        .with_overrides([baseline()]),
                )
                .with_panel(
                    panels
                        .bare_time_series()
                        .title("Read requests errors")
                        .description(
                            "Number of failed metrics read requests per second, by status code",
                        )
                        .unit(units::REQUESTS_PER_SECOND)
                        .grid_pos(7, 12, 12, 9)
                        .with_target(
                            Target::prometheus(request_errors("read"))
                                .legend("{{status_code}}")
                                .ref_id("Read errors by status")
                                .range(),
                        )
                        .with_overrides(status_overrides(
                            MONITORING_STATUS_CODES,
                            StatusLineStyle::BaselineOnly,
                        ))
                        .with_overrides([baseline()]),
                ),
        )
        .with_row(
            Row::new("Workload")
                .grid_pos(1, 24, 0, 16)
                .id(5)
                .with_panel(
                    panels
                        .bare_time_series()
                        .title("Samples ingestion rate")
                        .description("Number of samples ingested per second, by type")
                        .unit(units::ROWS_PER_SECOND)
                        .grid_pos(8, 12, 0, 17)
                        .with_target(
                            Target::prometheus(samples_rate(RATE_INTERVAL))
                                .legend("{{type}}")
                                .ref_id("Samples rate by type")
                                .range(),
                        )
                        .with_overrides([baseline()]),
                ),
        )
}

/// `sum (rate(requests_total{type="<kind>"}[$__rate_interval]))`
pub(crate) fn requests_rate(kind: &str, spacing: Spacing) -> Expr {
    Selector::new("requests_total")
        .filter(format!(r#"type="{}""#, kind))
        .rate(RATE_INTERVAL)
        .sum_spaced(spacing)
}

pub(crate) fn requests_limit(kind: &str) -> Expr {
    Selector::new("requests_limits")
        .filter(format!(r#"type="monitoring.{}.throughput.requests""#, kind))
        .into()
}

pub(crate) fn request_errors(kind: &str) -> Expr {
    Selector::new("requests_total")
        .filter(r#"status_code!~"2.*""#)
        .filter(format!(r#"type="{}""#, kind))
        .rate(RATE_INTERVAL)
        .sum_by_spaced(Spacing::Loose, &["status_code"])
        .or_zero_lowercase()
}

pub(crate) fn samples_rate(window: &str) -> Expr {
    Selector::new("samples_total")
        .rate(window)
        .sum_by(&["type"])
        .or_zero()
}
