// Query expression builder for PromQL and LogQL strings
//
// Filters are passed through verbatim; syntax errors surface only when the
// query backend evaluates the expression.
use crate::domain::query::Target;
use std::fmt;

pub const RATE_INTERVAL: &str = "$__rate_interval";
pub const INTERVAL: &str = "$__interval";

/// Quantile levels and their legends, in emission order.
pub const QUANTILES: [(&str, &str); 5] = [
    ("0.5", "p50"),
    ("0.75", "p75"),
    ("0.90", "p90"),
    ("0.95", "p95"),
    ("0.99", "p99"),
];

/// Metric selector: `metric{filter, filter}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    metric: String,
    filters: Vec<String>,
}

impl Selector {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            filters: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn rate(&self, window: &str) -> Expr {
        self.range_function("rate", window)
    }

    pub fn increase(&self, window: &str) -> Expr {
        self.range_function("increase", window)
    }

    pub fn last_over_time(&self, window: &str) -> Expr {
        self.range_function("last_over_time", window)
    }

    fn range_function(&self, function: &str, window: &str) -> Expr {
        Expr(format!("{}({}[{}])", function, self, window))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.metric, self.filters.join(", "))
    }
}

/// Log stream selector with optional line filters: `{a, b} |="text"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSelector {
    matchers: Vec<String>,
    line_filters: Vec<String>,
}

impl StreamSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matchers.push(matcher.into());
        self
    }

    pub fn line_filter(mut self, filter: impl Into<String>) -> Self {
        self.line_filters.push(filter.into());
        self
    }

    pub fn count_over_time(&self, window: &str) -> Expr {
        Expr(format!("count_over_time({} [{}])", self, window))
    }
}

impl fmt::Display for StreamSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.matchers.join(", "))?;
        for filter in &self.line_filters {
            write!(f, " {}", filter)?;
        }
        Ok(())
    }
}

/// Whitespace between an aggregation keyword and its parentheses:
/// `sum(x)` / `sum by(l) (x)` versus `sum (x)` / `sum by (l) (x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Tight,
    Loose,
}

/// A composed query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr(String);

impl Expr {
    pub fn sum(self) -> Self {
        self.sum_spaced(Spacing::Tight)
    }

    pub fn sum_spaced(self, spacing: Spacing) -> Self {
        match spacing {
            Spacing::Tight => Self(format!("sum({})", self.0)),
            Spacing::Loose => Self(format!("sum ({})", self.0)),
        }
    }

    pub fn sum_by(self, labels: &[&str]) -> Self {
        self.aggregate_by("sum", Spacing::Tight, labels)
    }

    pub fn sum_by_spaced(self, spacing: Spacing, labels: &[&str]) -> Self {
        self.aggregate_by("sum", spacing, labels)
    }

    pub fn max_by(self, labels: &[&str]) -> Self {
        self.aggregate_by("max", Spacing::Tight, labels)
    }

    fn aggregate_by(self, operator: &str, spacing: Spacing, labels: &[&str]) -> Self {
        let gap = match spacing {
            Spacing::Tight => "",
            Spacing::Loose => " ",
        };
        Self(format!(
            "{} by{}({}) ({})",
            operator,
            gap,
            labels.join(", "),
            self.0
        ))
    }

    /// Keep the graph drawn at zero while the series is absent.
    pub fn or_zero(self) -> Self {
        Self(format!("{} OR on() vector(0)", self.0))
    }

    /// Same as [`Expr::or_zero`] with a lowercase `or`.
    pub fn or_zero_lowercase(self) -> Self {
        Self(format!("{} or on() vector(0)", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Selector> for Expr {
    fn from(selector: Selector) -> Self {
        Self(selector.to_string())
    }
}

impl From<Expr> for String {
    fn from(expr: Expr) -> Self {
        expr.0
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn quantile_expr(level: &str, selector: &Selector) -> String {
    format!(
        "histogram_quantile({}, sum by(le)(rate({}[{}])))",
        level, selector, RATE_INTERVAL
    )
}

/// One range target per quantile level, legends `p50` through `p99`.
pub fn quantile_targets(selector: &Selector) -> Vec<Target> {
    QUANTILES
        .iter()
        .map(|(level, legend)| {
            Target::prometheus(quantile_expr(level, selector))
                .legend(*legend)
                .range()
        })
        .collect()
}

/// Assign reference ids `A` .. `Z`, then `AA`, `AB`, ... in order.
pub fn lettered(targets: Vec<Target>) -> Vec<Target> {
    targets
        .into_iter()
        .enumerate()
        .map(|(index, target)| target.ref_id(ref_id_for(index)))
        .collect()
}

/// Spreadsheet-style column name for a zero-based index.
fn ref_id_for(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Label discovery over series matched by `source` (a metric name or selector).
pub fn label_values(source: impl fmt::Display, label: &str) -> String {
    format!("label_values({}, {})", source, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_requests_expression() {
        let expr = Selector::new("requests_total")
            .filter(r#"type="write""#)
            .rate(RATE_INTERVAL)
            .sum_spaced(Spacing::Loose);
        assert_eq!(
            expr.as_str(),
            r#"sum (rate(requests_total{type="write"}[$__rate_interval]))"#
        );
    }

    #[test]
    fn test_errors_by_status_falls_back_to_zero() {
        let expr = Selector::new("requests_total")
            .filter(r#"status_code!~"2.*""#)
            .filter(r#"type="read""#)
            .rate(RATE_INTERVAL)
            .sum_by_spaced(Spacing::Loose, &["status_code"])
            .or_zero_lowercase();
        assert_eq!(
            expr.to_string(),
            r#"sum by (status_code) (rate(requests_total{status_code!~"2.*", type="read"}[$__rate_interval])) or on() vector(0)"#
        );
    }

    #[test]
    fn test_quantile_targets() {
        let targets = quantile_targets(&Selector::new("m"));
        assert_eq!(targets.len(), 5);

        let exprs: Vec<&str> = targets.iter().map(|t| t.expr.as_str()).collect();
        assert_eq!(
            exprs,
            vec![
                "histogram_quantile(0.5, sum by(le)(rate(m{}[$__rate_interval])))",
                "histogram_quantile(0.75, sum by(le)(rate(m{}[$__rate_interval])))",
                "histogram_quantile(0.90, sum by(le)(rate(m{}[$__rate_interval])))",
                "histogram_quantile(0.95, sum by(le)(rate(m{}[$__rate_interval])))",
                "histogram_quantile(0.99, sum by(le)(rate(m{}[$__rate_interval])))",
            ]
        );

        let legends: Vec<&str> = targets
            .iter()
            .filter_map(|t| t.legend_format.as_deref())
            .collect();
        assert_eq!(legends, vec!["p50", "p75", "p90", "p95", "p99"]);
        assert!(targets.iter().all(|t| t.range));
        assert_eq!(quantile_targets(&Selector::new("m")), targets);
    }

    #[test]
    fn test_lettered_ref_ids() {
        let targets = lettered(quantile_targets(&Selector::new("m")));
        let ids: Vec<&str> = targets.iter().filter_map(|t| t.ref_id.as_deref()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_lettered_keeps_targets_past_z() {
        let targets: Vec<Target> = (0..28)
            .map(|i| Target::prometheus(format!("m{}", i)))
            .collect();
        let targets = lettered(targets);
        assert_eq!(targets.len(), 28);
        assert_eq!(targets[25].ref_id.as_deref(), Some("Z"));
        assert_eq!(targets[26].ref_id.as_deref(), Some("AA"));
        assert_eq!(targets[27].ref_id.as_deref(), Some("AB"));
        assert_eq!(targets[27].expr, "m27");
        assert_eq!(ref_id_for(701), "ZZ");
        assert_eq!(ref_id_for(702), "AAA");
    }

    #[test]
    fn test_tight_aggregation_with_uppercase_fallback() {
        let expr = Selector::new("logging_ingest_requests_total")
            .filter(r#"status!="ok""#)
            .rate(RATE_INTERVAL)
            .sum_by(&["status"])
            .or_zero();
        assert_eq!(
            expr.as_str(),
            r#"sum by(status) (rate(logging_ingest_requests_total{status!="ok"}[$__rate_interval])) OR on() vector(0)"#
        );
        assert_eq!(
            Selector::new("m").increase(INTERVAL).sum().as_str(),
            "sum(increase(m{}[$__interval]))"
        );
    }

    #[test]
    fn test_nested_aggregation() {
        let expr = Selector::new("buckets_stat_size")
            .filter(r#"bucket=~"$bucket""#)
            .last_over_time("1m")
            .max_by(&["bucket", "counter"])
            .sum_by(&["bucket"]);
        assert_eq!(
            expr.as_str(),
            r#"sum by(bucket) (max by(bucket, counter) (last_over_time(buckets_stat_size{bucket=~"$bucket"}[1m])))"#
        );
    }

    #[test]
    fn test_stream_selector_and_label_values() {
        let scope = StreamSelector::new()
            .matcher(r#"__bucket__="$bucket""#)
            .matcher(r#"k8s_cluster_id=~"$cluster""#);
        assert_eq!(
            label_values(&scope, "k8s_namespace_name"),
            r#"label_values({__bucket__="$bucket", k8s_cluster_id=~"$cluster"}, k8s_namespace_name)"#
        );

        let search = scope.line_filter(r#"|="$search""#);
        assert_eq!(
            search.count_over_time(INTERVAL).sum().as_str(),
            r#"sum(count_over_time({__bucket__="$bucket", k8s_cluster_id=~"$cluster"} |="$search" [$__interval]))"#
        );
    }

    #[test]
    fn test_label_values_of_metric() {
        assert_eq!(
            label_values("buckets_stat_quantity", "bucket"),
            "label_values(buckets_stat_quantity, bucket)"
        );
    }
}
