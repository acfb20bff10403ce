//! Dashboard renderers: turn payloads into chart handles
//!
//! Two layouts are supported:
//!
//! - the summary page with one chart per build profile, each comparing the
//!   four standard cache states across releases
//! - the graphs grid with one chart per benchmark and profile, each plotting
//!   every cache state across commits
//!
//! Renderers return [`ChartHandle`]s owned by the caller. Dropping a
//! [`ChartSet`] tears its charts down; rendering again builds a new set.

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::data::{DashboardPayload, Profile, SummaryPayload};
use crate::error::{Error, Result};
use crate::options::{
    build_category_options, build_plot_options, PlotOptions, PlotParams, SeriesOptions,
};
use crate::plot::Plot;
use crate::selector::GraphsSelector;

/// Element ids of the summary charts
pub const SUMMARY_TARGETS: [(Profile, &str); 4] = [
    (Profile::Check, "check-average-times"),
    (Profile::Debug, "debug-average-times"),
    (Profile::Opt, "opt-average-times"),
    (Profile::Doc, "doc-average-times"),
];

/// Element id of the container holding every grid chart
pub const GRID_CONTAINER: &str = "charts";

/// Colors of the well-known cache states
pub const COMMON_CACHE_STATE_COLORS: [(&str, &str); 4] = [
    ("full", "#7cb5ec"),
    ("incr-full", "#434348"),
    ("incr-unchanged", "#90ed7d"),
    ("incr-patched: println", "#f7a35c"),
];

/// Colors handed out, in turn, to any other cache state
pub const OTHER_CACHE_STATE_COLORS: [&str; 6] = [
    "#8085e9", "#f15c80", "#e4d354", "#2b908f", "#f45b5b", "#91e8e1",
];

/// Assigns series colors within one chart.
///
/// Unknown cache states take the fallback colors in order and start over
/// after the sixth.
#[derive(Debug, Default)]
pub struct CacheStatePalette {
    next_other: usize,
}

impl CacheStatePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, cache_state: &str) -> &'static str {
        if let Some(&(_, color)) = COMMON_CACHE_STATE_COLORS
            .iter()
            .find(|(name, _)| *name == cache_state)
        {
            return color;
        }
        let color = OTHER_CACHE_STATE_COLORS[self.next_other % OTHER_CACHE_STATE_COLORS.len()];
        self.next_other += 1;
        color
    }
}

/// A chart instantiated into a target element
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    /// Id of the element the chart renders into
    pub target: String,
    pub plot: Plot,
}

impl ChartHandle {
    pub fn new(target: impl Into<String>, options: PlotOptions) -> Self {
        Self {
            target: target.into(),
            plot: Plot::new(options),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.plot.options().title.as_deref()
    }

    pub fn options(&self) -> &PlotOptions {
        self.plot.options()
    }
}

/// The charts of one rendering pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSet {
    charts: Vec<ChartHandle>,
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chart: ChartHandle) {
        self.charts.push(chart);
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartHandle> {
        self.charts.iter()
    }

    /// Charts rendering into `target`
    pub fn in_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a ChartHandle> {
        self.charts.iter().filter(move |c| c.target == target)
    }

    /// Tear down every chart
    pub fn clear(&mut self) {
        self.charts.clear();
    }
}

impl IntoIterator for ChartSet {
    type Item = ChartHandle;
    type IntoIter = std::vec::IntoIter<ChartHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.charts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChartSet {
    type Item = &'a ChartHandle;
    type IntoIter = std::slice::Iter<'a, ChartHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.charts.iter()
    }
}

/// Builds the charts of both dashboard pages
#[derive(Debug, Clone, Default)]
pub struct DashboardRenderer {
    config: RenderConfig,
}

impl DashboardRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// One chart per profile comparing the standard cache states across
    /// releases. The doc chart is left out when there is no doc data, and a
    /// profile whose recorded series do not have one value per release is
    /// skipped.
    pub fn render_summary(&self, payload: &SummaryPayload) -> ChartSet {
        let mut charts = ChartSet::new();

        for (profile, target) in SUMMARY_TARGETS {
            let Some(averages) = payload.profile(profile) else {
                continue;
            };
            if profile == Profile::Doc && averages.is_empty() {
                continue;
            }
            // doc only records full builds, so empty cache states are left out
            let present: Vec<_> = averages
                .series()
                .into_iter()
                .zip(COMMON_CACHE_STATE_COLORS)
                .filter(|((_, values), _)| !values.is_empty())
                .collect();
            if let Some(((label, values), _)) = present
                .iter()
                .find(|((_, values), _)| values.len() != payload.versions.len())
            {
                warn!(
                    %profile,
                    series = *label,
                    points = values.len(),
                    versions = payload.versions.len(),
                    "skipping summary chart with mismatched series"
                );
                continue;
            }

            let series = present
                .into_iter()
                .map(|((label, values), (_, color))| SeriesOptions::new(label, color, values.to_vec()))
                .collect();
            let params = PlotParams {
                title: Some(format!(
                    "Average time for {} {} build",
                    profile.article(),
                    profile
                )),
                width: self.config.summary_width,
                height: self.config.chart_height,
                y_axis_label: Some("Seconds".to_string()),
                x_axis_label: Some("Version".to_string()),
                tooltip_shift: self.config.tooltip_shift,
                compare_path: self.config.compare_path.clone(),
            };

            let options = build_category_options(params, series, payload.versions.clone());
            charts.push(ChartHandle::new(target, options));
        }

        debug!(charts = charts.len(), "rendered summary dashboard");
        charts
    }

    /// One chart per benchmark and present profile, in benchmark name order.
    ///
    /// Only the first chart of each benchmark carries the y-axis caption.
    /// Fails if a series does not have one sample per commit.
    pub fn render_grid(
        &self,
        payload: &DashboardPayload,
        selector: &GraphsSelector,
    ) -> Result<ChartSet> {
        let mut charts = ChartSet::new();
        let width = self.config.grid_chart_width();
        let commit_count = payload.commits.len();

        for (bench_name, entry) in &payload.benchmarks {
            for (i, (profile, cache_states)) in entry.profiles().enumerate() {
                let chart_name = format!("{bench_name}-{profile}");

                let mut palette = CacheStatePalette::new();
                let mut series = Vec::with_capacity(cache_states.len());
                for (cache_state, data) in cache_states {
                    if data.points.len() != commit_count {
                        return Err(Error::SeriesLengthMismatch {
                            chart: chart_name,
                            label: cache_state.clone(),
                            points: data.points.len(),
                            commits: commit_count,
                        });
                    }
                    let color = palette.color_for(cache_state);
                    series.push(SeriesOptions::new(cache_state.as_str(), color, data.points.clone()));
                }

                let params = PlotParams {
                    title: self.config.render_title.then(|| chart_name.clone()),
                    width,
                    height: self.config.chart_height,
                    y_axis_label: (i == 0).then(|| selector.y_axis_label(bench_name)),
                    x_axis_label: None,
                    tooltip_shift: self.config.tooltip_shift,
                    compare_path: self.config.compare_path.clone(),
                };

                // markers follow the first cache state
                let first = cache_states.values().next();
                let options = build_plot_options(
                    params,
                    series,
                    &payload.commits,
                    selector,
                    |idx| first.is_some_and(|s| s.is_interpolated(idx)),
                );

                debug!(chart = %chart_name, series = options.series.len(), "built chart");
                charts.push(ChartHandle::new(GRID_CONTAINER, options));
            }
        }

        debug!(charts = charts.len(), "rendered graphs grid");
        Ok(charts)
    }
}
