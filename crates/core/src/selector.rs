//! Which statistic to plot and how to present it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::error::{Error, Result};

/// How the backend aggregates the selected statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Raw values
    #[default]
    Raw,
    /// Percent change relative to the first commit
    PercentFromFirst,
    /// Percent change relative to the previous commit
    PercentRelative,
}

impl GraphKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GraphKind::Raw => "raw",
            GraphKind::PercentFromFirst => "percentfromfirst",
            GraphKind::PercentRelative => "percentrelative",
        }
    }
}

impl FromStr for GraphKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(GraphKind::Raw),
            "percentfromfirst" => Ok(GraphKind::PercentFromFirst),
            "percentrelative" => Ok(GraphKind::PercentRelative),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistic + aggregation kind, plus filters forwarded to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphsSelector {
    pub stat: String,
    pub kind: GraphKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl Default for GraphsSelector {
    fn default() -> Self {
        Self {
            stat: "instructions:u".to_string(),
            kind: GraphKind::Raw,
            start: None,
            end: None,
            benchmark: None,
            profile: None,
            scenario: None,
        }
    }
}

impl GraphsSelector {
    pub fn new(stat: impl Into<String>, kind: GraphKind) -> Self {
        Self {
            stat: stat.into(),
            kind,
            ..Self::default()
        }
    }

    /// Read a selector from a page query string (leading `?` optional).
    /// Missing or empty parameters keep their defaults.
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut selector = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let value = value.into_owned();
            match key.as_ref() {
                "stat" => selector.stat = value,
                "kind" => selector.kind = value.parse()?,
                "start" => selector.start = Some(value),
                "end" => selector.end = Some(value),
                "benchmark" => selector.benchmark = Some(value),
                "profile" => selector.profile = Some(value),
                "scenario" => selector.scenario = Some(value),
                _ => {}
            }
        }

        Ok(selector)
    }

    /// Query string for the graphs endpoint
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("start", self.start.as_deref().unwrap_or(""));
        query.append_pair("end", self.end.as_deref().unwrap_or(""));
        query.append_pair("kind", self.kind.as_str());
        query.append_pair("stat", &self.stat);
        for (key, value) in [
            ("benchmark", &self.benchmark),
            ("profile", &self.profile),
            ("scenario", &self.scenario),
        ] {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
        query.finish()
    }

    /// Raw values are drawn on a zero-floored axis
    pub fn absolute_mode(&self) -> bool {
        self.kind == GraphKind::Raw
    }

    /// Y-axis caption for a chart of `benchmark`, e.g. "CPU instructions (count)"
    pub fn y_axis_label(&self, benchmark: &str) -> String {
        let (name, mut unit) = stat_caption(&self.stat);

        match self.kind {
            GraphKind::Raw if benchmark == "Summary" => unit = Some("relative"),
            GraphKind::PercentFromFirst => unit = Some("% change from first"),
            GraphKind::PercentRelative => unit = Some("% change from previous"),
            GraphKind::Raw => {}
        }

        match unit {
            Some(unit) => format!("{name} ({unit})"),
            None => name.to_string(),
        }
    }
}

/// Display name and unit of a statistic
fn stat_caption(stat: &str) -> (&'static str, Option<&'static str>) {
    match stat {
        "instructions:u" => ("CPU instructions", Some("count")),
        "cycles:u" => ("CPU cycles", Some("count")),
        "cpu-clock" => ("CPU clock", Some("seconds")),
        "task-clock" => ("Task clock", Some("seconds")),
        "wall-time" => ("Wall time", Some("seconds")),
        "max-rss" => ("Maximum resident set size", Some("kB")),
        "faults" => ("Faults", Some("count")),
        _ => ("Value", None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let selector =
            GraphsSelector::from_query("?stat=cycles%3Au&kind=percentfromfirst&start=&benchmark=syn")
                .unwrap();

        assert_eq!(selector.stat, "cycles:u");
        assert_eq!(selector.kind, GraphKind::PercentFromFirst);
        assert_eq!(selector.start, None);
        assert_eq!(selector.benchmark.as_deref(), Some("syn"));
    }

    #[test]
    fn test_from_query_defaults() {
        assert_eq!(GraphsSelector::from_query("").unwrap(), GraphsSelector::default());
    }

    #[test]
    fn test_from_query_unknown_kind() {
        assert!(matches!(
            GraphsSelector::from_query("kind=median"),
            Err(Error::UnknownKind(k)) if k == "median"
        ));
    }

    #[test]
    fn test_to_query() {
        let mut selector = GraphsSelector::new("wall-time", GraphKind::PercentRelative);
        selector.start = Some("2024-01-01".to_string());
        selector.profile = Some("opt".to_string());

        assert_eq!(
            selector.to_query(),
            "start=2024-01-01&end=&kind=percentrelative&stat=wall-time&profile=opt"
        );
        assert_eq!(GraphsSelector::from_query(&selector.to_query()).unwrap(), selector);
    }

    #[test]
    fn test_y_axis_label() {
        let raw = GraphsSelector::new("instructions:u", GraphKind::Raw);
        assert_eq!(raw.y_axis_label("syn"), "CPU instructions (count)");
        assert_eq!(raw.y_axis_label("Summary"), "CPU instructions (relative)");

        let rss = GraphsSelector::new("max-rss", GraphKind::Raw);
        assert_eq!(rss.y_axis_label("syn"), "Maximum resident set size (kB)");

        let pct = GraphsSelector::new("task-clock", GraphKind::PercentFromFirst);
        assert_eq!(pct.y_axis_label("syn"), "Task clock (% change from first)");

        let rel = GraphsSelector::new("faults", GraphKind::PercentRelative);
        assert_eq!(rel.y_axis_label("syn"), "Faults (% change from previous)");

        let unknown = GraphsSelector::new("size:codegen", GraphKind::Raw);
        assert_eq!(unknown.y_axis_label("syn"), "Value");
    }
}
