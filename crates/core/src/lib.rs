//! bench-trends-core - Data shaping and chart logic for the bench-trends dashboard
//!
//! This crate contains WASM-compatible code shared by the dashboard app and
//! its helper binaries. It has no DOM dependency.
//!
//! # Features
//!
//! - Decode the graphs and summary payloads served by the perf backend
//! - Normalize profile keys and interpolated indices
//! - Assemble plot options (axes, ranges, colors, interpolation markers)
//! - Chart geometry and a tooltip state machine with click-to-compare
//! - Render the summary page and the per-benchmark grid into chart handles
//!
//! # Example
//!
//! ```
//! use bench_trends_core::{normalize, DashboardRenderer, GraphsSelector, RawDashboardPayload};
//!
//! let body = r#"{"Ok": {
//!     "commits": [[1000, "aaaa"], [2000, "bbbb"]],
//!     "benchmarks": {"syn": {"Check": {"full": {"points": [1.0, 2.0], "interpolated_indices": []}}}}
//! }}"#;
//! let payload = normalize(RawDashboardPayload::from_response_str(body).unwrap());
//!
//! let charts = DashboardRenderer::default()
//!     .render_grid(&payload, &GraphsSelector::default())
//!     .unwrap();
//! assert_eq!(charts.len(), 1);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod normalize;
pub mod options;
pub mod plot;
pub mod render;
pub mod selector;
pub mod tooltip;

pub use config::RenderConfig;
pub use data::{
    BenchmarkEntry, BenchmarkSeries, Commit, DashboardPayload, Profile, ProfileAverages,
    ProfileBucket, RawDashboardPayload, RawSeries, Response, SummaryPayload,
};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use options::{
    build_category_options, build_plot_options, ClickAction, PlotOptions, PlotParams,
    PointClick, SeriesOptions, XAxis, YRange,
};
pub use plot::{Plot, PlotRect, Tick};
pub use render::{ChartHandle, ChartSet, DashboardRenderer};
pub use selector::{GraphKind, GraphsSelector};
pub use tooltip::{Tooltip, TooltipController};
