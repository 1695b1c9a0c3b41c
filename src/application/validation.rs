// Validation - Checks run over built dashboards before anything is rendered
use crate::application::error::{GenerationError, Result};
use crate::domain::dashboard::Dashboard;
use crate::domain::datasource::DataSourceRef;
use crate::domain::override_rule::{FieldRef, Matcher, OverrideRule, OverrideTable};
use crate::domain::panel::Panel;
use crate::domain::variable::VariableKind;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `$name` or `${name}`; the `[[name]]` form is not used by these dashboards.
static VARIABLE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{?([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Names supplied by the rendering service itself, e.g. `$__rate_interval`.
const BUILTIN_PREFIX: &str = "__";

pub fn ensure_unique_uids(dashboards: &[Dashboard]) -> Result<()> {
    let mut seen = HashSet::new();
    for dashboard in dashboards {
        if !seen.insert(dashboard.uid.as_str()) {
            return Err(GenerationError::DuplicateUid {
                uid: dashboard.uid.clone(),
            });
        }
    }
    Ok(())
}

pub fn validate_dashboard(dashboard: &Dashboard) -> Result<()> {
    let checker = ReferenceChecker { dashboard };

    checker.check("title", &dashboard.title)?;
    if let Some(description) = &dashboard.description {
        checker.check("description", description)?;
    }
    for link in &dashboard.links {
        checker.check(&format!("link {:?}", link.title), &link.url)?;
    }
    for variable in &dashboard.variables {
        let location = format!("variable {:?}", variable.name);
        for expression in variable.expressions() {
            checker.check(&location, expression)?;
        }
        if let VariableKind::Query { datasource, .. } = &variable.kind {
            checker.check_datasource(&location, datasource)?;
        }
    }
    let mut row_ids = HashSet::new();
    for row in &dashboard.rows {
        if let Some(id) = row.id {
            if !row_ids.insert(id) {
                return Err(GenerationError::DuplicatePanelId {
                    dashboard: dashboard.uid.clone(),
                    id,
                });
            }
        }
        let location = format!("row {:?}", row.title);
        checker.check(&location, &row.title)?;
        if let Some(repeat) = &row.repeat {
            checker.require(&location, repeat)?;
        }
    }
    for panel in dashboard.all_panels() {
        checker.check_panel(panel)?;
        check_overrides(dashboard, panel)?;
    }

    Ok(())
}

struct ReferenceChecker<'a> {
    dashboard: &'a Dashboard,
}

impl ReferenceChecker<'_> {
    fn check(&self, location: &str, text: &str) -> Result<()> {
        for captures in VARIABLE_REFERENCE.captures_iter(text) {
            let name = &captures[1];
            if !name.starts_with(BUILTIN_PREFIX) {
                self.require(location, name)?;
            }
        }
        Ok(())
    }

    fn require(&self, location: &str, name: &str) -> Result<()> {
        if self.dashboard.variable(name).is_some() {
            return Ok(());
        }
        Err(GenerationError::UndeclaredVariable {
            dashboard: self.dashboard.uid.clone(),
            variable: name.to_string(),
            location: location.to_string(),
        })
    }

    /// A `${name}` uid must name a data-source variable of the same plugin.
    /// Literal uids are taken as they are.
    fn check_datasource(&self, location: &str, datasource: &DataSourceRef) -> Result<()> {
        self.check(location, &datasource.uid)?;

        let Some(captures) = VARIABLE_REFERENCE.captures(&datasource.uid) else {
            return Ok(());
        };
        let name = &captures[1];
        let matches_plugin = matches!(
            self.dashboard.variable(name).map(|variable| &variable.kind),
            Some(VariableKind::Datasource { plugin, .. }) if *plugin == datasource.kind
        );
        if matches_plugin {
            return Ok(());
        }
        Err(GenerationError::DataSourceMismatch {
            dashboard: self.dashboard.uid.clone(),
            variable: name.to_string(),
            location: location.to_string(),
            expected: datasource.kind.plugin_id(),
        })
    }

    fn check_panel(&self, panel: &Panel) -> Result<()> {
        let common = &panel.common;
        let location = format!("panel {:?}", common.title);

        self.check(&location, &common.title)?;
        if let Some(description) = &common.description {
            self.check(&location, description)?;
        }
        if let Some(datasource) = &common.datasource {
            self.check_datasource(&location, datasource)?;
        }
        for target in &common.targets {
            if let Some(datasource) = &common.datasource {
                if target.backend != datasource.kind {
                    return Err(GenerationError::TargetBackendMismatch {
                        dashboard: self.dashboard.uid.clone(),
                        panel: common.title.clone(),
                        expected: datasource.kind.plugin_id(),
                        found: target.backend.plugin_id(),
                    });
                }
            }
            self.check(&location, &target.expr)?;
            if let Some(legend) = &target.legend_format {
                self.check(&location, legend)?;
            }
        }
        Ok(())
    }
}

/// Every non-baseline override must be able to hit at least one series and
/// keep at least one of its properties once later rules are merged over it.
fn check_overrides(dashboard: &Dashboard, panel: &Panel) -> Result<()> {
    let common = &panel.common;
    let describe = |matcher: &Matcher| format!("{}={:?}", matcher.id(), matcher.options());
    let unmatched = |matcher: &Matcher| GenerationError::UnmatchedOverride {
        dashboard: dashboard.uid.clone(),
        panel: common.title.clone(),
        matcher: describe(matcher),
    };

    for rule in common.overrides.iter() {
        match &rule.matcher {
            Matcher::ByRegex(pattern) => {
                Regex::new(pattern).map_err(|source| GenerationError::InvalidMatcherPattern {
                    dashboard: dashboard.uid.clone(),
                    panel: common.title.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
            }
            Matcher::ByQuery(ref_id) => {
                let found = common
                    .targets
                    .iter()
                    .any(|target| target.ref_id.as_deref() == Some(ref_id.as_str()));
                if !found {
                    return Err(unmatched(&rule.matcher));
                }
            }
            Matcher::ByName(name) => {
                let found = common
                    .targets
                    .iter()
                    .any(|target| legend_may_produce(target.legend_format.as_deref(), name));
                if !found {
                    return Err(unmatched(&rule.matcher));
                }
            }
        }

        if is_masked(&common.overrides, rule) {
            return Err(GenerationError::MaskedOverride {
                dashboard: dashboard.uid.clone(),
                panel: common.title.clone(),
                matcher: describe(&rule.matcher),
            });
        }
    }
    Ok(())
}

/// A rule is masked when a series it selects resolves none of its properties
/// to the values it sets. Regex rules have no representative series.
fn is_masked(table: &OverrideTable, rule: &OverrideRule) -> bool {
    let field = match &rule.matcher {
        Matcher::ByName(name) => FieldRef {
            name,
            ref_id: None,
        },
        Matcher::ByQuery(ref_id) => FieldRef {
            name: ref_id,
            ref_id: Some(ref_id),
        },
        Matcher::ByRegex(_) => return false,
    };
    if rule.properties.is_empty() {
        return false;
    }

    let resolved = table.resolve(&field);
    !rule
        .properties
        .iter()
        .any(|property| resolved.get(&property.path) == Some(&property.value))
}

/// Whether a legend template can render as `name` for some label values.
/// Targets without a legend are named from their labels and may produce anything.
fn legend_may_produce(legend: Option<&str>, name: &str) -> bool {
    let Some(legend) = legend else {
        return true;
    };

    let mut pattern = String::from("^");
    let mut rest = legend;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start..].find("}}") else {
            break;
        };
        pattern.push_str(&regex::escape(&rest[..start]));
        pattern.push_str(".*");
        rest = &rest[start + len + 2..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');

    Regex::new(&pattern)
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboards;
    use crate::application::shared::SharedDefinitions;
    use crate::domain::dashboard::Row;
    use crate::domain::datasource::DataSourceKind;
    use crate::domain::override_rule::Property;
    use crate::domain::panel::{PanelBuilder, TimeSeriesPanel};
    use crate::domain::query::Target;
    use crate::domain::variable::Variable;

    fn dashboard_with(panel: TimeSeriesPanel) -> Dashboard {
        Dashboard::new("test", "Test")
            .with_variable(Variable::constant("bucket", "default"))
            .with_panel(panel)
    }

    #[test]
    fn test_all_dashboards_are_valid() {
        let all = dashboards::all(&SharedDefinitions::default());
        ensure_unique_uids(&all).unwrap();
        for dashboard in &all {
            validate_dashboard(dashboard).unwrap();
        }
    }

    #[test]
    fn test_duplicate_uid() {
        let all = vec![Dashboard::new("a", "A"), Dashboard::new("b", "B"), Dashboard::new("a", "C")];
        match ensure_unique_uids(&all) {
            Err(GenerationError::DuplicateUid { uid }) => assert_eq!(uid, "a"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_undeclared_variable_in_expression() {
        let dashboard = dashboard_with(
            TimeSeriesPanel::new()
                .title("usage")
                .with_target(Target::prometheus(r#"up{bucket="$bucket", zone="${zone}"}"#)),
        );
        match validate_dashboard(&dashboard) {
            Err(GenerationError::UndeclaredVariable { variable, location, .. }) => {
                assert_eq!(variable, "zone");
                assert_eq!(location, r#"panel "usage""#);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_builtin_variables_are_exempt() {
        let dashboard = dashboard_with(TimeSeriesPanel::new().with_target(Target::prometheus(
            "rate(x[$__rate_interval]) + increase(y[$__interval])",
        )));
        assert!(validate_dashboard(&dashboard).is_ok());
    }

    #[test]
    fn test_repeat_requires_declared_variable() {
        let dashboard = Dashboard::new("test", "Test").with_row(Row::new("Per zone").repeat("zone"));
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::UndeclaredVariable { .. })
        ));
    }

    #[test]
    fn test_panel_bound_to_constant_is_rejected() {
        let loki = DataSourceRef::from_variable(DataSourceKind::Loki, "bucket");
        let dashboard = dashboard_with(TimeSeriesPanel::new().title("logs").datasource(&loki));
        match validate_dashboard(&dashboard) {
            Err(GenerationError::DataSourceMismatch {
                variable, expected, ..
            }) => {
                assert_eq!(variable, "bucket");
                assert_eq!(expected, "loki");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_panel_plugin_must_match_variable() {
        let metrics = Variable::datasource("datasource", DataSourceKind::Prometheus, "Nebius Services");
        let loki = DataSourceRef::from_variable(DataSourceKind::Loki, "datasource");
        let prometheus = DataSourceRef::from_variable(DataSourceKind::Prometheus, "datasource");

        let mismatched = Dashboard::new("test", "Test")
            .with_variable(metrics.clone())
            .with_panel(TimeSeriesPanel::new().datasource(&loki));
        assert!(matches!(
            validate_dashboard(&mismatched),
            Err(GenerationError::DataSourceMismatch { .. })
        ));

        let matching = Dashboard::new("test", "Test")
            .with_variable(metrics)
            .with_panel(TimeSeriesPanel::new().datasource(&prometheus));
        assert!(validate_dashboard(&matching).is_ok());
    }

    #[test]
    fn test_query_variable_datasource_is_checked() {
        let loki = DataSourceRef::from_variable(DataSourceKind::Loki, "datasource");
        let dashboard = Dashboard::new("test", "Test")
            .with_variable(Variable::datasource(
                "datasource",
                DataSourceKind::Prometheus,
                "Nebius Services",
            ))
            .with_variable(Variable::query("cluster", &loki, "label_values({}, k8s_cluster_id)"));
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::DataSourceMismatch { location, .. }) if location == r#"variable "cluster""#
        ));
    }

    #[test]
    fn test_target_backend_must_match_panel() {
        let metrics = DataSourceRef::from_variable(DataSourceKind::Prometheus, "datasource");
        let dashboard = Dashboard::new("test", "Test")
            .with_variable(Variable::datasource(
                "datasource",
                DataSourceKind::Prometheus,
                "Nebius Services",
            ))
            .with_panel(
                TimeSeriesPanel::new()
                    .datasource(&metrics)
                    .with_target(Target::loki(r#"{app="x"}"#)),
            );
        match validate_dashboard(&dashboard) {
            Err(GenerationError::TargetBackendMismatch { expected, found, .. }) => {
                assert_eq!(expected, "prometheus");
                assert_eq!(found, "loki");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_row_ids() {
        let dashboard = Dashboard::new("test", "Test")
            .with_row(Row::new("Ingest").id(1))
            .with_row(Row::new("Read").id(1));
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::DuplicatePanelId { id: 1, .. })
        ));
    }

    #[test]
    fn test_override_masked_by_later_rule() {
        let masked = dashboard_with(
            TimeSeriesPanel::new()
                .with_target(Target::prometheus("x").legend("{{status}}"))
                .override_by_name("404", vec![Property::new("custom.lineWidth", 3)])
                .with_override(
                    Matcher::match_all(),
                    vec![Property::new("custom.lineWidth", 1)],
                ),
        );
        assert!(matches!(
            validate_dashboard(&masked),
            Err(GenerationError::MaskedOverride { matcher, .. }) if matcher == r#"byName="404""#
        ));

        let kept = dashboard_with(
            TimeSeriesPanel::new()
                .with_target(Target::prometheus("x").legend("{{status}}"))
                .override_by_name(
                    "404",
                    vec![
                        Property::new("displayName", "404: Not Found"),
                        Property::new("custom.lineWidth", 3),
                    ],
                )
                .with_override(
                    Matcher::match_all(),
                    vec![Property::new("custom.lineWidth", 1)],
                ),
        );
        assert!(validate_dashboard(&kept).is_ok());
    }

    #[test]
    fn test_override_by_query_needs_ref_id() {
        let dashboard = dashboard_with(
            TimeSeriesPanel::new()
                .with_target(Target::prometheus("x").ref_id("A"))
                .override_by_query("Limit", Vec::new()),
        );
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::UnmatchedOverride { .. })
        ));
    }

    #[test]
    fn test_override_by_name_against_legend_template() {
        assert!(legend_may_produce(Some("{{status_code}}"), "404"));
        assert!(legend_may_produce(Some("Download {{bucket}}"), "Download "));
        assert!(legend_may_produce(None, "anything"));
        assert!(!legend_may_produce(Some("Requests"), "Limit"));
        assert!(!legend_may_produce(Some("p(50)"), "p50"));

        let dashboard = dashboard_with(
            TimeSeriesPanel::new()
                .with_target(Target::prometheus("x").legend("Requests"))
                .override_by_name("Limit", Vec::new()),
        );
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::UnmatchedOverride { .. })
        ));
    }

    #[test]
    fn test_invalid_regex_pattern() {
        let dashboard = dashboard_with(
            TimeSeriesPanel::new()
                .with_target(Target::prometheus("x"))
                .with_override(Matcher::ByRegex("[4".to_string()), Vec::new()),
        );
        assert!(matches!(
            validate_dashboard(&dashboard),
            Err(GenerationError::InvalidMatcherPattern { .. })
        ));
    }
}
