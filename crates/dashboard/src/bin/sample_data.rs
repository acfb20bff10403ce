//! Sample payload generator for local dashboard development
//!
//! Writes the two endpoint responses the dashboard fetches, so the pages can
//! be served from a static directory:
//!
//! - `<out_dir>/perf/graphs` - grid payload
//! - `<out_dir>/perf/dashboard` - summary payload
//!
//! Usage:
//!   cargo run --bin sample_data [scenario] [out_dir]
//!
//! Scenarios:
//!   simple        - 3 commits, 2 benchmarks
//!   interpolated  - Missing samples filled in and flagged
//!   regression    - Regression then recovery across cache states
//!   full          - All scenarios combined (default)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bench_trends_core::data::RawBenchmarks;
use bench_trends_core::{
    Commit, ProfileAverages, RawDashboardPayload, RawSeries, Response, SummaryPayload,
};
use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CACHE_STATES: [&str; 4] = ["full", "incr-full", "incr-unchanged", "incr-patched: println"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = std::env::args().nth(1).unwrap_or_else(|| "full".to_string());
    let out_dir = PathBuf::from(std::env::args().nth(2).unwrap_or_else(|| "dist".to_string()));

    let graphs = match scenario.as_str() {
        "simple" => generate_simple(),
        "interpolated" => generate_interpolated(),
        "regression" => generate_regression(),
        _ => generate_full(),
    };
    let summary = generate_summary();

    let perf_dir = out_dir.join("perf");
    fs::create_dir_all(&perf_dir)
        .with_context(|| format!("Failed to create {}", perf_dir.display()))?;
    write_response(&perf_dir.join("graphs"), graphs)?;
    write_response(&perf_dir.join("dashboard"), summary)?;

    info!("Generated sample payloads with scenario: {}", scenario);
    info!("Serve {} and open graphs.html or dashboard.html", out_dir.display());
    Ok(())
}

fn write_response<T: Serialize>(path: &Path, payload: T) -> Result<()> {
    let json = serde_json::to_string_pretty(&Response::Ok(payload))
        .context("Failed to serialize payload")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// One commit per day, oldest first
fn make_commits(count: usize) -> Vec<Commit> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let date = now - Duration::days((count - i) as i64);
            Commit::new(date.timestamp(), format!("{:040x}", 0xabc0_0000 + i * 7919))
        })
        .collect()
}

fn make_series(base: f64, count: usize, shape: impl Fn(usize) -> f64) -> RawSeries {
    RawSeries {
        points: (0..count).map(|i| base * shape(i)).collect(),
        interpolated_indices: Vec::new(),
    }
}

/// Every cache state for one profile, incremental states cheaper than full
fn make_profile(base: f64, count: usize, shape: impl Fn(usize) -> f64 + Copy) -> BTreeMap<String, RawSeries> {
    CACHE_STATES
        .iter()
        .enumerate()
        .map(|(i, state)| {
            let scale = 1.0 / (i + 1) as f64;
            (state.to_string(), make_series(base * scale, count, shape))
        })
        .collect()
}

fn wobble(i: usize) -> f64 {
    1.0 + ((i * 37) % 11) as f64 / 200.0
}

fn generate_simple() -> RawDashboardPayload {
    let count = 3;
    let mut benchmarks = RawBenchmarks::new();
    for (name, base) in [("helloworld", 1.2e9), ("syn", 8.5e9)] {
        let mut profiles = BTreeMap::new();
        profiles.insert("Check".to_string(), make_profile(base, count, wobble));
        profiles.insert("Debug".to_string(), make_profile(base * 1.8, count, wobble));
        benchmarks.insert(name.to_string(), profiles);
    }

    RawDashboardPayload {
        commits: make_commits(count),
        benchmarks,
    }
}

fn generate_interpolated() -> RawDashboardPayload {
    let count = 20;
    let mut opt = make_profile(3.4e10, count, wobble);
    for series in opt.values_mut() {
        series.interpolated_indices = vec![4, 5, 12];
    }

    let mut profiles = BTreeMap::new();
    profiles.insert("Opt".to_string(), opt);
    profiles.insert("Check".to_string(), make_profile(1.1e10, count, wobble));

    let mut benchmarks = RawBenchmarks::new();
    benchmarks.insert("regex".to_string(), profiles);

    RawDashboardPayload {
        commits: make_commits(count),
        benchmarks,
    }
}

fn generate_regression() -> RawDashboardPayload {
    let count = 30;
    let shape = |i: usize| {
        let step = if (10..20).contains(&i) { 1.25 } else { 1.0 };
        step * wobble(i)
    };

    let mut profiles = BTreeMap::new();
    profiles.insert("Check".to_string(), make_profile(5.0e9, count, shape));
    profiles.insert("Debug".to_string(), make_profile(9.0e9, count, shape));
    profiles.insert("Opt".to_string(), make_profile(2.2e10, count, shape));
    profiles.insert("Doc".to_string(), make_profile(3.0e9, count, wobble));

    let mut benchmarks = RawBenchmarks::new();
    benchmarks.insert("cargo".to_string(), profiles);

    RawDashboardPayload {
        commits: make_commits(count),
        benchmarks,
    }
}

fn generate_full() -> RawDashboardPayload {
    let count = 30;
    let mut benchmarks = RawBenchmarks::new();

    for (name, payload) in [
        ("simple", generate_simple()),
        ("interpolated", generate_interpolated()),
        ("regression", generate_regression()),
    ] {
        for (bench, mut profiles) in payload.benchmarks {
            // stretch shorter histories over the full commit range
            for cache_states in profiles.values_mut() {
                for series in cache_states.values_mut() {
                    let last = series.points.last().copied().unwrap_or_default();
                    series.points.resize(count, last);
                }
            }
            benchmarks.insert(format!("{}-{}", name, bench), profiles);
        }
    }

    // a cache state outside the common four picks a fallback color
    if let Some(check) = benchmarks
        .get_mut("simple-syn")
        .and_then(|profiles| profiles.get_mut("Check"))
    {
        check.insert(
            "incr-patched: dummy fn".to_string(),
            make_series(2.0e9, count, wobble),
        );
    }

    RawDashboardPayload {
        commits: make_commits(count),
        benchmarks,
    }
}

fn generate_summary() -> SummaryPayload {
    let versions: Vec<String> = (50..70).map(|minor| format!("1.{}.0", minor)).collect();
    let n = versions.len();
    // build times shrink release over release
    let trend = |base: f64| -> Vec<f64> {
        (0..n)
            .map(|i| base * (1.0 - i as f64 / (n as f64 * 3.0)) * wobble(i))
            .collect()
    };
    let averages = |base: f64| ProfileAverages {
        clean_averages: trend(base),
        base_incr_averages: trend(base * 1.1),
        clean_incr_averages: trend(base * 0.2),
        println_incr_averages: trend(base * 0.35),
    };

    SummaryPayload {
        versions,
        check: averages(4.0),
        debug: averages(7.5),
        opt: averages(19.0),
        doc: Some(ProfileAverages::default()),
    }
}
