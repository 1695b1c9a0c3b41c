// Managed Kubernetes cluster log explorer
use crate::application::panel_factory::PanelFactory;
use crate::application::query_builder::{label_values, StreamSelector, INTERVAL};
use crate::application::shared::SharedDefinitions;
use crate::domain::dashboard::{Dashboard, DashboardLink};
use crate::domain::panel::{AxisPlacement, DrawStyle, PanelBuilder};
use crate::domain::query::Target;
use crate::domain::variable::Variable;

pub const UID: &str = "nebius-mk8s-logs";

const BUCKET_FILTER: &str = r#"__bucket__="$bucket""#;
const CLUSTER_FILTER: &str = r#"k8s_cluster_id=~"$cluster""#;
const NAMESPACE_FILTER: &str = r#"k8s_namespace_name=~"$namespace""#;
const SEARCH_FILTER: &str = r#"|="$search""#;

/// Streams selected by every variable, narrowed by the search box.
pub fn full_filter() -> StreamSelector {
    StreamSelector::new()
        .matcher(BUCKET_FILTER)
        .matcher(CLUSTER_FILTER)
        .matcher(NAMESPACE_FILTER)
        .line_filter(SEARCH_FILTER)
}

fn explore_url(filter: &StreamSelector) -> String {
    format!(
        r#"/explore?orgId=1&left=["now-1h","now","Loki",{{"expr":{:?}}},{{"ui":[true,true,true,"none"]}}]"#,
        filter.to_string()
    )
}

/// Query variable over a label, scoped by the variables declared before it.
fn cascading(name: &str, shared: &SharedDefinitions, scope: &[&str], label: &str) -> Variable {
    let selector = scope
        .iter()
        .fold(StreamSelector::new(), |selector, filter| selector.matcher(*filter));
    Variable::query(name, &shared.logging, label_values(&selector, label))
        .multi()
        .include_all(".*")
}

pub fn build(shared: &SharedDefinitions) -> Dashboard {
    let panels = PanelFactory::new(&shared.logging);
    let filter = full_filter();

    Dashboard::new(UID, "Nebius mk8s logs")
        .description(format!(
            "Overview of logs from Nebius Managed Kubernetes (mk8s) clusters. {}",
            shared.docs_url("observability/logging")
        ))
        .tags(["Nebius", "Logging", "mk8s"])
        .link(shared.docs_link("observability"))
        .link(shared.github_link())
        .link(
            DashboardLink::new("View in Explore", explore_url(&filter))
                .target_blank()
                .keep_time()
                .icon("link"),
        )
        .with_variable(shared.logging_variable.clone())
        .with_variable(Variable::constant("bucket", "default"))
        .with_variable(cascading("cluster", shared, &[BUCKET_FILTER], "k8s_cluster_id"))
        .with_variable(cascading(
            "namespace",
            shared,
            &[BUCKET_FILTER, CLUSTER_FILTER],
            "k8s_namespace_name",
        ))
        .with_variable(cascading(
            "pod",
            shared,
            &[BUCKET_FILTER, CLUSTER_FILTER, NAMESPACE_FILTER],
            "k8s_pod_name",
        ))
        .with_variable(Variable::textbox("search").label("Log Search"))
        .with_panel(
            panels
                .bare_time_series()
                .with_target(Target::loki(filter.count_over_time(INTERVAL).sum()).legend("Logs"))
                .draw_style(DrawStyle::Bars)
                .max_data_points(300)
                .legend(false, None)
                .axis_placement(AxisPlacement::Auto)
                .min(0.0)
                .height(3)
                .span(24),
        )
        .with_panel(
            panels
                .logs()
                .with_target(Target::loki(filter.to_string()).max_lines(100))
                .height(20)
                .span(24),
        )
        .time("now-24h", "now")
        .refresh("1m")
        .readonly()
}
