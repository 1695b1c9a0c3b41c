// Unified overview across monitoring and logging
use super::monitoring::{request_errors, requests_limit, requests_rate, samples_rate};
use crate::application::overrides::{
    baseline, fill_opacity, fixed_color, hide_from, line_style, status_overrides, StatusLineStyle,
    LOGGING_ERROR_STATUSES, OVERVIEW_STATUS_CODES,
};
use crate::application::panel_factory::{units, PanelFactory};
use crate::application::query_builder::{
    lettered, quantile_targets, Expr, Selector, Spacing, RATE_INTERVAL,
};
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::panel::{PanelBuilder, TimeSeriesPanel};
use crate::domain::query::Target;

pub const UID: &str = "nebius-observability";

pub fn build(shared: &SharedDefinitions) -> Dashboard {
    let panels = PanelFactory::new(&shared.metrics);
    let panel = |title: &str, description: &str, unit: &str, h: u32, w: u32, x: u32, y: u32| {
        panels
            .bare_time_series()
            .title(title)
            .description(description)
            .unit(unit)
            .grid_pos(h, w, x, y)
    };

    Dashboard::new(UID, "Nebius Observability")
        .tags(["Nebius", "Observability"])
        .refresh("1m")
        .time("now-1h", "now")
        .timezone("browser")
        .readonly()
        .with_variable(shared.metrics_variable.clone())
        .description(format!(
            "Unified overview of Nebius Observability. {}",
            shared.docs_url("observability")
        ))
        .link(shared.docs_link("observability"))
        .link(shared.github_link())
        .with_row(
            Row::new("Monitoring")
                .grid_pos(1, 24, 0, 0)
                .id(100)
                .with_panel(
                    panel(
                        "Write requests",
                        "Number of metrics ingestion requests per second",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 0, 1,
                    )
                    .with_target(
                        Target::prometheus(requests_rate("write", Spacing::Tight))
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
                    panel(
                        "Read requests",
                        "Number of metrics read requests per second",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 12, 1,
                    )
                    .with_target(
                        Target::prometheus(requests_rate("read", Spacing::Tight))
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
                    panel(
                        "Write errors",
                        "Number of failed metrics ingestion requests per second, by status code",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 0, 9,
                    )
                    .with_target(
                        Target::prometheus(request_errors("write"))
                            .legend("{{status_code}}")
                            .ref_id("Write errors by status")
                            .range(),
                    )
                    .with_overrides(status_overrides(OVERVIEW_STATUS_CODES, StatusLineStyle::Inline))
                    .with_overrides([baseline()]),
                )
                .with_panel(
                    panel(
                        "Read errors",
                        "Number of failed metrics read requests per second, by status code",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 12, 9,
                    )
                    .with_target(
                        Target::prometheus(request_errors("read"))
                            .legend("{{status_code}}")
                            .ref_id("Read errors by status")
                            .range(),
                    )
                    .with_overrides(status_overrides(
                        OVERVIEW_STATUS_CODES,
                        StatusLineStyle::BaselineOnly,
                    ))
                    .with_overrides([baseline()]),
                )
                .with_panel(
                    panel(
                        "Samples write rate",
                        "Number of samples ingested per second, by type",
                        units::ROWS_PER_SECOND,
                        8, 24, 0, 17,
                    )
                    .with_target(
                        Target::prometheus(samples_rate("10m"))
                            .legend("{{type}}")
                            .ref_id("Samples rate by type")
                            .range(),
                    )
                    .with_overrides([baseline()]),
                ),
        )
        .with_row(
            Row::new("Logging")
                .grid_pos(1, 24, 0, 25)
                .id(200)
                .with_panel(single_series(
                    panel(
                        "Write requests",
                        "Number of successful log ingestion requests per second",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 0, 26,
                    ),
                    ok_requests("logging_ingest_requests_total").or_zero(),
                    "requests",
                ))
                .with_panel(single_series(
                    panel(
                        "Read requests",
                        "Number of successful log read/query requests per second",
                        units::REQUESTS_PER_SECOND,
                        8, 12, 12, 26,
                    ),
                    ok_requests("logging_read_requests_total").or_zero(),
                    "requests",
                ))
                .with_panel(
                    single_series(
                        panel(
                            "Write errors",
                            "Number of failed log ingestion requests per second, by status code",
                            units::REQUESTS_PER_SECOND,
                            8, 12, 0, 34,
                        ),
                        failed_requests("logging_ingest_requests_total").or_zero_lowercase(),
                        "{{status}}",
                    )
                    .with_overrides(status_overrides(
                        LOGGING_ERROR_STATUSES,
                        StatusLineStyle::BaselineOnly,
                    )),
                )
                .with_panel(
                    single_series(
                        panel(
                            "Read errors",
                            "Number of failed log read/query requests per second, by status code",
                            units::REQUESTS_PER_SECOND,
                            8, 12, 12, 34,
                        ),
                        failed_requests("logging_read_requests_total"),
                        "{{status}}",
                    )
                    .with_overrides(status_overrides(
                        LOGGING_ERROR_STATUSES,
                        StatusLineStyle::BaselineOnly,
                    )),
                )
                .with_panel(
                    panel(
                        "Write duration (p50/p75/p90/p95/p99)",
                        "Request processing time quantiles for log ingestion operations",
                        units::SECONDS,
                        8, 12, 0, 42,
                    )
                    .with_targets(lettered(quantile_targets(&Selector::new(
                        "logging_ingest_duration_seconds_bucket",
                    ))))
                    .with_overrides([baseline()]),
                )
                .with_panel(
                    panel(
                        "Logs save lag (p50/p75/p90/p95/p99)",
                        "Time delay between receiving a log and saving it to storage",
                        units::SECONDS,
                        8, 12, 12, 42,
                    )
                    .with_targets(lettered(quantile_targets(&Selector::new(
                        "logging_storage_save_lag_seconds_bucket",
                    ))))
                    .with_overrides([baseline()]),
                )
                .with_panel(single_series(
                    panel(
                        "Written lines rate",
                        "Number of log lines ingested per second",
                        units::SHORT,
                        8, 12, 0, 50,
                    ),
                    total_rate("logging_ingest_logs_total"),
                    "lines",
                ))
                .with_panel(single_series(
                    panel(
                        "Write bytes",
                        "Volume of log data ingested per second in bytes",
                        units::BYTES_PER_SECOND_IEC,
                        8, 12, 12, 50,
                    ),
                    total_rate("logging_ingest_logs_bytes_total"),
                    "data",
                )),
        )
}

/// One range target with reference id `A` and the baseline line style.
fn single_series(panel: TimeSeriesPanel, expr: Expr, legend: &str) -> TimeSeriesPanel {
    panel
        .with_target(Target::prometheus(expr).legend(legend).ref_id("A").range())
        .with_overrides([baseline()])
}

pub(crate) fn ok_requests(metric: &str) -> Expr {
    Selector::new(metric)
        .filter(r#"status="ok""#)
        .rate(RATE_INTERVAL)
        .sum()
}

pub(crate) fn failed_requests(metric: &str) -> Expr {
    Selector::new(metric)
        .filter(r#"status!="ok""#)
        .rate(RATE_INTERVAL)
        .sum_by(&["status"])
}

pub(crate) fn total_rate(metric: &str) -> Expr {
    Selector::new(metric).rate(RATE_INTERVAL).sum().or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_rows_with_fixed_ids() {
        let dashboard = build(&SharedDefinitions::default());
        assert_eq!(dashboard.rows.len(), 2);
        assert_eq!(dashboard.rows[0].id, Some(100));
        assert_eq!(dashboard.rows[1].id, Some(200));
        assert_eq!(dashboard.rows[0].panels.len(), 5);
        assert_eq!(dashboard.rows[1].panels.len(), 8);
    }

    #[test]
    fn test_samples_rate_uses_fixed_window() {
        let dashboard = build(&SharedDefinitions::default());
        let samples = &dashboard.rows[0].panels[4];
        assert_eq!(
            samples.common.targets[0].expr,
            "sum by(type) (rate(samples_total{}[10m])) OR on() vector(0)"
        );
    }

    #[test]
    fn test_expressions_keep_their_written_form() {
        let dashboard = build(&SharedDefinitions::default());
        assert_eq!(
            dashboard.rows[0].panels[0].common.targets[0].expr,
            r#"sum(rate(requests_total{type="write"}[$__rate_interval]))"#
        );
        assert_eq!(
            dashboard.rows[0].panels[2].common.targets[0].expr,
            r#"sum by (status_code) (rate(requests_total{status_code!~"2.*", type="write"}[$__rate_interval])) or on() vector(0)"#
        );
        assert_eq!(
            dashboard.rows[1].panels[2].common.targets[0].expr,
            r#"sum by(status) (rate(logging_ingest_requests_total{status!="ok"}[$__rate_interval])) or on() vector(0)"#
        );
        assert_eq!(
            dashboard.rows[1].panels[3].common.targets[0].expr,
            r#"sum by(status) (rate(logging_read_requests_total{status!="ok"}[$__rate_interval]))"#
        );
    }

    #[test]
    fn test_error_overrides_precede_baseline() {
        let dashboard = build(&SharedDefinitions::default());
        let write_errors = &dashboard.rows[1].panels[2];
        let matchers: Vec<&str> = write_errors
            .common
            .overrides
            .iter()
            .map(|rule| rule.matcher.options())
            .collect();
        assert_eq!(matchers.first(), Some(&"err_auth"));
        assert_eq!(matchers.last(), Some(&".*"));
        assert_eq!(matchers.len(), LOGGING_ERROR_STATUSES.len() + 1);
    }

    #[test]
    fn test_quantile_panels_use_lettered_ids() {
        let dashboard = build(&SharedDefinitions::default());
        let lag = &dashboard.rows[1].panels[5];
        let ids: Vec<&str> = lag
            .common
            .targets
            .iter()
            .filter_map(|target| target.ref_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
    }
}
