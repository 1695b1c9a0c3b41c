// Logging service dashboard
use super::observability::{failed_requests, ok_requests, total_rate};
use crate::application::panel_factory::{units, PanelFactory};
use crate::application::query_builder::{quantile_targets, Selector, INTERVAL};
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::panel::PanelBuilder;
use crate::domain::query::Target;

pub const UID: &str = "nebius-logging";

pub fn build(shared: &SharedDefinitions) -> Dashboard {
    let panels = PanelFactory::new(&shared.metrics);

    Dashboard::new(UID, "Nebius Logging")
        .description(format!(
            "Dashboard provides an overview of the Nebius Logging. {}",
            shared.docs_url("observability/logging")
        ))
        .tags(["Nebius", "Logging"])
        .link(shared.docs_link("observability"))
        .link(shared.github_link())
        .with_variable(shared.metrics_variable.clone())
        .with_row(
            Row::new("Ingest")
                .with_panel(
                    panels
                        .stat(
                            "Total ingested logs",
                            "Total number of logs ingested over time",
                            units::SHORT,
                        )
                        .with_target(Target::prometheus(
                            Selector::new("logging_ingest_logs_total")
                                .increase(INTERVAL)
                                .sum(),
                        )),
                )
                .with_panel(
                    panels
                        .stat(
                            "Total ingested bytes",
                            "Total size of ingested logs over time",
                            units::BYTES_SI,
                        )
                        .with_target(Target::prometheus(
                            Selector::new("logging_ingest_logs_bytes_total")
                                .increase(INTERVAL)
                                .sum(),
                        )),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Ingested logs per second",
                            "Number of logs ingested per second",
                            units::SHORT,
                        )
                        .with_target(
                            Target::prometheus(total_rate("logging_ingest_logs_total"))
                                .legend("logs"),
                        ),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Ingest bytes per second",
                            "Volume of log data ingested per second in bytes",
                            units::BYTES_PER_SECOND_SI,
                        )
                        .with_target(
                            Target::prometheus(total_rate("logging_ingest_logs_bytes_total"))
                                .legend("bytes"),
                        ),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Ingest requests",
                            "Successful ingestion requests per second",
                            units::REQUESTS_PER_SECOND,
                        )
                        .with_target(
                            Target::prometheus(
                                ok_requests("logging_ingest_requests_total").or_zero(),
                            )
                            .legend("success"),
                        ),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Failed ingest requests",
                            "Failed ingestion requests per second, by status",
                            units::REQUESTS_PER_SECOND,
                        )
                        .with_target(
                            Target::prometheus(
                                failed_requests("logging_ingest_requests_total").or_zero(),
                            )
                            .legend("{{status}}"),
                        ),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Ingest requests latency",
                            "Ingestion request latency (quantiles)",
                            units::SECONDS,
                        )
                        .with_targets(quantile_targets(&Selector::new(
                            "logging_ingest_duration_seconds_bucket",
                        ))),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Log save latency",
                            "Time delay between receiving a log and saving it to storage, shown as quantiles",
                            units::SECONDS,
                        )
                        .with_targets(quantile_targets(&Selector::new(
                            "logging_storage_save_lag_seconds_bucket",
                        ))),
                ),
        )
        .with_row(
            Row::new("Read")
                .with_panel(
                    panels
                        .time_series(
                            "Successful read requests",
                            "Successful log read requests per second",
                            units::REQUESTS_PER_SECOND,
                        )
                        .with_target(
                            Target::prometheus(ok_requests("logging_read_requests_total").or_zero())
                                .legend("success"),
                        ),
                )
                .with_panel(
                    panels
                        .time_series(
                            "Failed read requests",
                            "Failed read requests per second, by status",
                            units::REQUESTS_PER_SECOND,
                        )
                        .with_target(
                            Target::prometheus(
                                failed_requests("logging_read_requests_total").or_zero(),
                            )
                            .legend("{{status}}"),
                        ),
                ),
        )
        .time("now-24h", "now")
        .refresh("1m")
        .readonly()
}
