//! Payload types served by the perf backend
//!
//! The graphs endpoint answers with a [`RawDashboardPayload`] which is turned
//! into a [`DashboardPayload`] by [`crate::normalize`]. The summary endpoint
//! answers with a [`SummaryPayload`]. Both are wrapped in a [`Response`]
//! envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::Result;

/// A commit on the x axis: `[timestamp, id]` on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "(i64, String)", into = "(i64, String)")]
pub struct Commit {
    /// Commit time in seconds since the Unix epoch
    pub timestamp: i64,
    /// Commit SHA
    pub id: String,
}

impl Commit {
    pub fn new(timestamp: i64, id: impl Into<String>) -> Self {
        Self {
            timestamp,
            id: id.into(),
        }
    }
}

impl From<(i64, String)> for Commit {
    fn from((timestamp, id): (i64, String)) -> Self {
        Self { timestamp, id }
    }
}

impl From<Commit> for (i64, String) {
    fn from(commit: Commit) -> Self {
        (commit.timestamp, commit.id)
    }
}

/// Build profile a group of cache states was measured under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Check,
    Debug,
    Opt,
    Doc,
}

impl Profile {
    /// All profiles, in display order
    pub const ALL: [Profile; 4] = [Profile::Check, Profile::Debug, Profile::Opt, Profile::Doc];

    /// Lower-case name used as a key and in chart titles
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Check => "check",
            Profile::Debug => "debug",
            Profile::Opt => "opt",
            Profile::Doc => "doc",
        }
    }

    /// Match a profile label regardless of casing (`Check`, `check`, `CHECK`)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(label))
    }

    /// Indefinite article for "a check build" / "an opt build"
    pub fn article(self) -> &'static str {
        match self {
            Profile::Opt => "an",
            _ => "a",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cache-state series as sent by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawSeries {
    /// One sample per commit
    pub points: Vec<f64>,
    /// Indices of samples the backend filled in
    #[serde(default)]
    pub interpolated_indices: Vec<usize>,
}

/// Benchmark name -> profile label -> cache state -> series
pub type RawBenchmarks = BTreeMap<String, BTreeMap<String, BTreeMap<String, RawSeries>>>;

/// The graphs payload before normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawDashboardPayload {
    /// Commits, parallel to every series' points
    pub commits: Vec<Commit>,
    /// Benchmarks keyed by name; profile labels use any casing
    pub benchmarks: RawBenchmarks,
}

impl RawDashboardPayload {
    /// Decode a `{"Ok": payload}` response body
    pub fn from_response_str(body: &str) -> Result<Self> {
        parse_response(body)
    }
}

/// A cache-state series with its interpolated indices as a set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchmarkSeries {
    pub points: Vec<f64>,
    pub interpolated_indices: HashSet<usize>,
}

impl BenchmarkSeries {
    pub fn is_interpolated(&self, index: usize) -> bool {
        self.interpolated_indices.contains(&index)
    }
}

impl From<RawSeries> for BenchmarkSeries {
    fn from(raw: RawSeries) -> Self {
        Self {
            points: raw.points,
            interpolated_indices: raw.interpolated_indices.into_iter().collect(),
        }
    }
}

/// Cache-state label -> series
pub type ProfileBucket = BTreeMap<String, BenchmarkSeries>;

/// The profiles measured for one benchmark
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchmarkEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<ProfileBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<ProfileBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt: Option<ProfileBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<ProfileBucket>,
}

impl BenchmarkEntry {
    pub fn get(&self, profile: Profile) -> Option<&ProfileBucket> {
        self.slot(profile).as_ref()
    }

    /// Store a bucket unless the profile is already taken.
    /// Returns `false` when an earlier bucket was kept.
    pub fn insert(&mut self, profile: Profile, bucket: ProfileBucket) -> bool {
        let slot = self.slot_mut(profile);
        if slot.is_some() {
            return false;
        }
        *slot = Some(bucket);
        true
    }

    /// Present profiles in check, debug, opt, doc order
    pub fn profiles(&self) -> impl Iterator<Item = (Profile, &ProfileBucket)> {
        Profile::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|bucket| (p, bucket)))
    }

    pub fn is_empty(&self) -> bool {
        self.profiles().next().is_none()
    }

    fn slot(&self, profile: Profile) -> &Option<ProfileBucket> {
        match profile {
            Profile::Check => &self.check,
            Profile::Debug => &self.debug,
            Profile::Opt => &self.opt,
            Profile::Doc => &self.doc,
        }
    }

    fn slot_mut(&mut self, profile: Profile) -> &mut Option<ProfileBucket> {
        match profile {
            Profile::Check => &mut self.check,
            Profile::Debug => &mut self.debug,
            Profile::Opt => &mut self.opt,
            Profile::Doc => &mut self.doc,
        }
    }
}

/// The normalized graphs payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardPayload {
    pub commits: Vec<Commit>,
    pub benchmarks: BTreeMap<String, BenchmarkEntry>,
}

/// Average build times of one profile across releases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileAverages {
    #[serde(default)]
    pub clean_averages: Vec<f64>,
    #[serde(default)]
    pub base_incr_averages: Vec<f64>,
    #[serde(default)]
    pub clean_incr_averages: Vec<f64>,
    #[serde(default)]
    pub println_incr_averages: Vec<f64>,
}

impl ProfileAverages {
    /// Series in legend order, labelled with their cache state
    pub fn series(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("full", self.clean_averages.as_slice()),
            ("incr-full", self.base_incr_averages.as_slice()),
            ("incr-unchanged", self.clean_incr_averages.as_slice()),
            ("incr-patched: println", self.println_incr_averages.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.clean_averages.is_empty()
    }
}

/// The summary dashboard payload: averages per profile across releases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SummaryPayload {
    /// Release labels, parallel to every averages vector
    pub versions: Vec<String>,
    pub check: ProfileAverages,
    pub debug: ProfileAverages,
    pub opt: ProfileAverages,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<ProfileAverages>,
}

impl SummaryPayload {
    /// Decode a `{"Ok": payload}` response body
    pub fn from_response_str(body: &str) -> Result<Self> {
        parse_response(body)
    }

    pub fn profile(&self, profile: Profile) -> Option<&ProfileAverages> {
        match profile {
            Profile::Check => Some(&self.check),
            Profile::Debug => Some(&self.debug),
            Profile::Opt => Some(&self.opt),
            Profile::Doc => self.doc.as_ref(),
        }
    }
}

/// Success envelope wrapping every backend response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Response<T> {
    Ok(T),
}

impl<T> Response<T> {
    pub fn into_inner(self) -> T {
        match self {
            Response::Ok(payload) => payload,
        }
    }
}

/// Decode an enveloped response body
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: Response<T> = serde_json::from_str(body)?;
    Ok(response.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_wire_format() {
        let commit: Commit = serde_json::from_str(r#"[1000, "aaaa"]"#).unwrap();
        assert_eq!(commit, Commit::new(1000, "aaaa"));
        assert_eq!(serde_json::to_string(&commit).unwrap(), r#"[1000,"aaaa"]"#);
    }

    #[test]
    fn test_profile_from_label() {
        assert_eq!(Profile::from_label("Check"), Some(Profile::Check));
        assert_eq!(Profile::from_label("OPT"), Some(Profile::Opt));
        assert_eq!(Profile::from_label("doc"), Some(Profile::Doc));
        assert_eq!(Profile::from_label("release"), None);
    }

    #[test]
    fn test_parse_graphs_response() {
        let body = r#"{"Ok": {
            "commits": [[1000, "aaaa"], [2000, "bbbb"]],
            "benchmarks": {"bench-a": {"Debug": {"full": {"points": [1.0, 2.0], "interpolated_indices": []}}}}
        }}"#;
        let payload = RawDashboardPayload::from_response_str(body).unwrap();

        assert_eq!(payload.commits.len(), 2);
        let series = &payload.benchmarks["bench-a"]["Debug"]["full"];
        assert_eq!(series.points, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_rejects_error_envelope() {
        let body = r#"{"Err": "no data"}"#;
        assert!(RawDashboardPayload::from_response_str(body).is_err());
    }

    #[test]
    fn test_summary_without_doc() {
        let body = r#"{"Ok": {
            "versions": ["1.0.0", "1.1.0"],
            "check": {"clean_averages": [1.0, 2.0]},
            "debug": {},
            "opt": {}
        }}"#;
        let payload = SummaryPayload::from_response_str(body).unwrap();

        assert_eq!(payload.versions.len(), 2);
        assert!(payload.profile(Profile::Doc).is_none());
        assert!(payload.profile(Profile::Debug).unwrap().is_empty());
    }

    #[test]
    fn test_entry_insert_keeps_first() {
        let mut entry = BenchmarkEntry::default();
        let mut first = ProfileBucket::new();
        first.insert("full".to_string(), BenchmarkSeries::default());

        assert!(entry.insert(Profile::Opt, first.clone()));
        assert!(!entry.insert(Profile::Opt, ProfileBucket::new()));
        assert_eq!(entry.get(Profile::Opt), Some(&first));

        let profiles: Vec<_> = entry.profiles().map(|(p, _)| p).collect();
        assert_eq!(profiles, vec![Profile::Opt]);
    }
}
