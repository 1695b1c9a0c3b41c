// Object storage dashboard
use crate::application::overrides::hide_from;
use crate::application::panel_factory::{units, PanelFactory};
use crate::application::query_builder::{label_values, Expr, Selector, RATE_INTERVAL};
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::panel::{
    LegendPlacement, PanelBuilder, SortOrder, TimeSeriesPanel, TooltipMode, Visibility,
};
use crate::domain::query::Target;
use crate::domain::variable::Variable;

pub const UID: &str = "nebius-object-storage";

const BUCKETS: &str = r#"bucket=~"$bucket""#;
const CURRENT_BUCKET: &str = r#"bucket="$bucket""#;

pub fn build(shared: &SharedDefinitions) -> Dashboard {
    let panels = PanelFactory::new(&shared.metrics);
    let panel = |title: &str, description: &str, unit: &str, fill: u32| -> TimeSeriesPanel {
        panels
            .bare_time_series()
            .title(title)
            .description(description)
            .unit(unit)
            .fill_opacity(fill)
            .show_points(Visibility::Never)
            .thresholds()
    };

    Dashboard::new(UID, "Nebius Object Storage")
        .description("Nebius Object Storage Overview.")
        .tags(["Nebius", "Object Storage"])
        .link(shared.docs_link("object-storage"))
        .link(shared.github_link())
        .with_variable(shared.metrics_variable.clone())
        .with_variable(
            Variable::query(
                "bucket",
                &shared.metrics,
                label_values("buckets_stat_quantity", "bucket"),
            )
            .multi()
            .include_all(".*"),
        )
        .with_row(
            Row::new("Storage space")
                .with_panel(
                    panel(
                        "Traffic",
                        "Data transfer speed to and from storage.",
                        units::BYTES_PER_SECOND_IEC,
                        5,
                    )
                    .with_target(
                        Target::prometheus(bucket_traffic("http_bytes_sent"))
                            .legend("Download {{bucket}}")
                            .ref_id("A"),
                    )
                    .with_target(
                        Target::prometheus(bucket_traffic("http_bytes_received"))
                            .legend("Upload {{bucket}}")
                            .ref_id("B"),
                    )
                    .tooltip(TooltipMode::Multi, SortOrder::None)
                    .legend(true, Some(LegendPlacement::Bottom))
                    .override_by_name("Download ", vec![hide_from(true, true, false)])
                    .override_by_name("Upload ", vec![hide_from(true, true, true)])
                    .height(9)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "Total bucket size",
                        "Storage space used by all objects in a bucket.",
                        units::BYTES_IEC,
                        70,
                    )
                    .with_target(
                        Target::prometheus(bucket_stat("buckets_stat_size", BUCKETS))
                            .legend("{{bucket}}")
                            .ref_id("A"),
                    )
                    .tooltip(TooltipMode::Single, SortOrder::None)
                    .legend(true, Some(LegendPlacement::Bottom))
                    .height(9)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "Space by storage class",
                        "Amount of storage used by objects in different storage classes.",
                        units::BYTES_IEC,
                        70,
                    )
                    .with_targets(storage_class_targets("buckets_stat_size", ","))
                    .tooltip(TooltipMode::Single, SortOrder::None)
                    .legend(true, Some(LegendPlacement::Bottom))
                    .height(9)
                    .span(8),
                ),
        )
        .with_row(
            Row::new("Requests for $bucket")
                .repeat("bucket")
                .with_panel(
                    panel(
                        "Read requests",
                        "Number of requests made to retrieve object content from a bucket. ",
                        units::REQUESTS_PER_SECOND,
                        5,
                    )
                    .with_target(
                        Target::prometheus(handler_requests("read"))
                            .legend("{{handler}}")
                            .ref_id("A"),
                    )
                    .height(8)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "Modify requests",
                        "Number of requests made to upload objects or modify object content. ",
                        units::REQUESTS_PER_SECOND,
                        5,
                    )
                    .with_target(
                        Target::prometheus(handler_requests("mutate"))
                            .legend("{{handler}}")
                            .ref_id("A"),
                    )
                    .height(8)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "API errors",
                        "Number of errors when accessing S3 API. Number of errors per 5 minutes.",
                        units::SHORT,
                        5,
                    )
                    .with_target(
                        Target::prometheus(
                            Selector::new("http_errors_total")
                                .filter(CURRENT_BUCKET)
                                .increase("5m")
                                .sum_by(&["handler", "http_code", "api_error_code"]),
                        )
                        .legend("{{handler}}:{{http_code}}:{{api_error_code}}")
                        .ref_id("A"),
                    )
                    .height(8)
                    .span(8),
                ),
        )
        .with_row(
            Row::new("Objects statistics")
                .with_panel(
                    panel(
                        "Object counts",
                        "Number of objects. Single, multipart objects, and incomplete multipart uploads are counted separately.",
                        units::SHORT,
                        5,
                    )
                    .with_targets(object_type_targets("buckets_stat_quantity"))
                    .height(8)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "Space by object type",
                        "Amount of storage used by objects of different types.",
                        units::BYTES_IEC,
                        70,
                    )
                    .with_targets(object_type_targets("buckets_stat_size"))
                    .height(8)
                    .span(8),
                )
                .with_panel(
                    panel(
                        "Object counts by storage class",
                        "Number of objects stored in different storage classes.",
                        units::SHORT,
                        5,
                    )
                    .with_targets(storage_class_targets("buckets_stat_quantity", ", "))
                    .height(8)
                    .span(8),
                ),
        )
        .time("now-24h", "now")
        .refresh("1m")
        .readonly()
}

fn bucket_traffic(metric: &str) -> Expr {
    Selector::new(metric)
        .filter(BUCKETS)
        .rate(RATE_INTERVAL)
        .sum_by(&["bucket"])
        .or_zero()
}

fn handler_requests(operation: &str) -> Expr {
    Selector::new("request_rate")
        .filter(CURRENT_BUCKET)
        .filter(format!(r#"operation_type="{}""#, operation))
        .rate(RATE_INTERVAL)
        .sum_by(&["handler"])
}

/// Latest per-counter gauge, summed per bucket. `filter` is the full
/// selector body, so callers control how clauses are joined.
fn bucket_stat(metric: &str, filter: &str) -> Expr {
    Selector::new(metric)
        .filter(filter)
        .last_over_time("1m")
        .max_by(&["bucket", "counter"])
        .sum_by(&["bucket"])
}

/// Per storage class series; the size metric's selector joins clauses without a space.
fn storage_class_targets(metric: &str, separator: &str) -> Vec<Target> {
    [
        ("A", r#"storage_class="STANDARD""#, "{{bucket}} Standard"),
        (
            "B",
            r#"storage_class="ENHANCED_THROUGHPUT""#,
            "{{bucket}} Enhanced Throughput",
        ),
    ]
    .into_iter()
    .map(|(ref_id, filter, legend)| {
        let filter = format!("{}{}{}", BUCKETS, separator, filter);
        Target::prometheus(bucket_stat(metric, &filter))
            .legend(legend)
            .ref_id(ref_id)
    })
    .collect()
}

fn object_type_targets(metric: &str) -> Vec<Target> {
    [
        ("A", r#"counter="simple_objects""#, "{{bucket}} Simple objects"),
        ("B", r#"counter="multipart_objects""#, "{{bucket}} Multipart objects"),
        ("C", r#"counter="inflight_parts""#, "{{bucket}} Multipart uploads"),
    ]
    .into_iter()
    .map(|(ref_id, filter, legend)| {
        let filter = format!("{}, {}", BUCKETS, filter);
        Target::prometheus(bucket_stat(metric, &filter))
            .legend(legend)
            .ref_id(ref_id)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::VariableKind;

    #[test]
    fn test_bucket_variable() {
        let dashboard = build(&SharedDefinitions::default());
        let bucket = dashboard.variable("bucket").unwrap();
        match &bucket.kind {
            VariableKind::Query {
                query,
                multi,
                include_all,
                all_value,
                ..
            } => {
                assert_eq!(query, "label_values(buckets_stat_quantity, bucket)");
                assert!(*multi && *include_all);
                assert_eq!(all_value.as_deref(), Some(".*"));
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_requests_row_repeats_per_bucket() {
        let dashboard = build(&SharedDefinitions::default());
        let requests = &dashboard.rows[1];
        assert_eq!(requests.title, "Requests for $bucket");
        assert_eq!(requests.repeat.as_deref(), Some("bucket"));
        assert_eq!(
            requests.panels[0].common.targets[0].expr,
            r#"sum by(handler) (rate(request_rate{bucket="$bucket", operation_type="read"}[$__rate_interval]))"#
        );
    }

    #[test]
    fn test_storage_class_expression() {
        let targets = storage_class_targets("buckets_stat_size", ",");
        assert_eq!(
            targets[1].expr,
            r#"sum by(bucket) (max by(bucket, counter) (last_over_time(buckets_stat_size{bucket=~"$bucket",storage_class="ENHANCED_THROUGHPUT"}[1m])))"#
        );
        assert_eq!(targets[1].ref_id.as_deref(), Some("B"));

        let quantity = storage_class_targets("buckets_stat_quantity", ", ");
        assert_eq!(
            quantity[0].expr,
            r#"sum by(bucket) (max by(bucket, counter) (last_over_time(buckets_stat_quantity{bucket=~"$bucket", storage_class="STANDARD"}[1m])))"#
        );
    }

    #[test]
    fn test_traffic_falls_back_to_zero() {
        assert_eq!(
            bucket_traffic("http_bytes_sent").as_str(),
            r#"sum by(bucket) (rate(http_bytes_sent{bucket=~"$bucket"}[$__rate_interval])) OR on() vector(0)"#
        );
    }
}
