// Field override domain model
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

const MATCH_ALL_PATTERN: &str = ".*";

/// Selects the fields an override applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact display name of a series.
    ByName(String),
    /// Every series returned by the target with this reference id.
    ByQuery(String),
    /// Regular expression over the display name.
    ByRegex(String),
}

impl Matcher {
    pub fn match_all() -> Self {
        Matcher::ByRegex(MATCH_ALL_PATTERN.to_string())
    }

    pub fn id(&self) -> &'static str {
        match self {
            Matcher::ByName(_) => "byName",
            Matcher::ByQuery(_) => "byFrameRefID",
            Matcher::ByRegex(_) => "byRegexp",
        }
    }

    pub fn options(&self) -> &str {
        match self {
            Matcher::ByName(value) | Matcher::ByQuery(value) | Matcher::ByRegex(value) => value,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Matcher::ByRegex(pattern) if pattern == MATCH_ALL_PATTERN)
    }

    /// An invalid pattern matches nothing.
    pub fn matches(&self, field: &FieldRef<'_>) -> bool {
        match self {
            Matcher::ByName(name) => field.name == name,
            Matcher::ByQuery(ref_id) => field.ref_id == Some(ref_id.as_str()),
            Matcher::ByRegex(pattern) => Regex::new(pattern)
                .map(|re| re.is_match(field.name))
                .unwrap_or(false),
        }
    }
}

/// A rendered series as seen by matchers.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub name: &'a str,
    pub ref_id: Option<&'a str>,
}

/// One display property, addressed by its dotted path (`custom.lineWidth`).
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub path: String,
    pub value: Value,
}

impl Property {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    pub matcher: Matcher,
    pub properties: Vec<Property>,
}

impl OverrideRule {
    pub fn new(matcher: Matcher, properties: Vec<Property>) -> Self {
        Self {
            matcher,
            properties,
        }
    }
}

/// Ordered override rules of one panel.
///
/// Rules apply in insertion order and a later rule wins for the same property
/// path. Rules matching every field (`.*`) form the panel baseline, which is
/// always emitted after the specific rules so it never masks them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    rules: Vec<OverrideRule>,
    baseline: Option<OverrideRule>,
}

impl OverrideTable {
    pub fn push(&mut self, rule: OverrideRule) {
        if !rule.matcher.is_match_all() {
            self.rules.push(rule);
            return;
        }

        match &mut self.baseline {
            Some(baseline) => baseline.properties.extend(rule.properties),
            None => self.baseline = Some(rule),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> {
        self.rules.iter().chain(self.baseline.iter())
    }

    /// Effective properties for a field after layering every matching rule.
    pub fn resolve(&self, field: &FieldRef<'_>) -> BTreeMap<String, Value> {
        let mut resolved = BTreeMap::new();
        for rule in self.iter().filter(|rule| rule.matcher.matches(field)) {
            for property in &rule.properties {
                resolved.insert(property.path.clone(), property.value.clone());
            }
        }
        resolved
    }
}
