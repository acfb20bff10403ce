//! Plot options: everything a chart needs to draw itself
//!
//! [`build_plot_options`] assembles the options of a commit-indexed chart with
//! the tooltip and compare-on-click behaviour, [`build_category_options`] the
//! options of a plain category chart.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::data::Commit;
use crate::selector::GraphsSelector;

/// Color of the vertical markers flagging interpolated samples
pub const INTERPOLATED_HIGHLIGHT: &str = "rgba(255, 170, 0, 0.25)";

/// Fraction of the data span added as headroom on the y axis
const RANGE_PADDING: f64 = 0.2;

/// Display parameters of a single chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotParams {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub y_axis_label: Option<String>,
    pub x_axis_label: Option<String>,
    /// Tooltip offset from the hovered point, in pixels
    pub tooltip_shift: f64,
    /// Page opened on click, e.g. `/compare.html`
    pub compare_path: String,
}

/// One line on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOptions {
    pub label: String,
    pub stroke: String,
    pub width: f64,
    pub values: Vec<f64>,
}

impl SeriesOptions {
    pub fn new(label: impl Into<String>, stroke: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            stroke: stroke.into(),
            width: 1.0,
            values,
        }
    }
}

/// What the x axis is indexed by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XAxis {
    /// Commit timestamps (seconds), positioned by time
    Time(Vec<f64>),
    /// Evenly spaced labels, e.g. release versions
    Categories(Vec<String>),
}

impl XAxis {
    pub fn len(&self) -> usize {
        match self {
            XAxis::Time(values) => values.len(),
            XAxis::Categories(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Visible y interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

impl YRange {
    /// Pad the data interval by 20% of its span.
    ///
    /// In absolute mode the lower bound is pinned to zero and only the top is
    /// padded. A zero span is padded by 20% of the value, or by one if the
    /// value is zero.
    pub fn from_bounds(data_min: f64, data_max: f64, absolute_mode: bool) -> Self {
        let (low, high) = if absolute_mode {
            (0.0, data_max.max(0.0))
        } else {
            (data_min, data_max)
        };

        let span = high - low;
        let pad = if span > 0.0 {
            span * RANGE_PADDING
        } else if high != 0.0 {
            high.abs() * RANGE_PADDING
        } else {
            1.0
        };

        Self {
            min: if absolute_mode { 0.0 } else { low - pad },
            max: high + pad,
        }
    }

    /// Range covering every finite value of `series`
    pub fn from_series(series: &[SeriesOptions], absolute_mode: bool) -> Self {
        let (min, max) = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return Self::from_bounds(0.0, 0.0, absolute_mode);
        }
        Self::from_bounds(min, max, absolute_mode)
    }
}

/// A clicked data point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointClick {
    pub series: usize,
    pub index: usize,
}

/// Side effect of clicking a data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickAction {
    /// Open the compare page for the clicked commit and its predecessor
    Compare { path: String, stat: String },
}

impl ClickAction {
    /// URL to open for a click on commit `index`; the first commit has no
    /// predecessor and opens nothing.
    pub fn resolve(&self, commits: &[Commit], index: usize) -> Option<String> {
        match self {
            ClickAction::Compare { path, stat } => {
                let current = commits.get(index)?;
                let previous = commits.get(index.checked_sub(1)?)?;
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("start", &previous.id)
                    .append_pair("end", &current.id)
                    .append_pair("stat", stat)
                    .finish();
                Some(format!("{path}?{query}"))
            }
        }
    }
}

/// Tooltip plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub commits: Vec<Commit>,
    pub absolute_mode: bool,
    pub shift_x: f64,
    pub shift_y: f64,
    pub on_click: ClickAction,
}

/// Full configuration of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub x_axis: XAxis,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub series: Vec<SeriesOptions>,
    pub y_range: YRange,
    /// Indices that get a full-height highlight marker
    pub interpolated: Vec<usize>,
    pub highlight: String,
    /// Opacity of unfocused series while one is focused
    pub focus_alpha: f64,
    /// Max pixel distance for a series to take focus
    pub focus_proximity: f64,
    pub tooltip: Option<TooltipOptions>,
}

impl PlotOptions {
    fn base(params: PlotParams, x_axis: XAxis, series: Vec<SeriesOptions>, y_range: YRange) -> Self {
        Self {
            title: params.title,
            width: params.width,
            height: params.height,
            x_axis,
            x_label: params.x_axis_label,
            y_label: params.y_axis_label,
            series,
            y_range,
            interpolated: Vec::new(),
            highlight: INTERPOLATED_HIGHLIGHT.to_string(),
            focus_alpha: 0.3,
            focus_proximity: 5.0,
            tooltip: None,
        }
    }

    /// Navigation target for a clicked point, if the chart is clickable
    pub fn click_url(&self, click: PointClick) -> Option<String> {
        let tooltip = self.tooltip.as_ref()?;
        tooltip.on_click.resolve(&tooltip.commits, click.index)
    }
}

/// Options of a commit-indexed chart.
///
/// Interpolated samples are flagged with a vertical marker, the y range
/// follows the selector's absolute mode and clicking a point opens the compare
/// page for that commit.
pub fn build_plot_options(
    params: PlotParams,
    series: Vec<SeriesOptions>,
    commits: &[Commit],
    selector: &GraphsSelector,
    is_interpolated: impl Fn(usize) -> bool,
) -> PlotOptions {
    let absolute_mode = selector.absolute_mode();
    let y_range = YRange::from_series(&series, absolute_mode);
    let x_axis = XAxis::Time(commits.iter().map(|c| c.timestamp as f64).collect());
    let shift = params.tooltip_shift;
    let on_click = ClickAction::Compare {
        path: params.compare_path.clone(),
        stat: selector.stat.clone(),
    };

    let mut options = PlotOptions::base(params, x_axis, series, y_range);
    options.interpolated = (0..commits.len()).filter(|&i| is_interpolated(i)).collect();
    options.tooltip = Some(TooltipOptions {
        commits: commits.to_vec(),
        absolute_mode,
        shift_x: shift,
        shift_y: shift,
        on_click,
    });
    options
}

/// Options of a zero-floored chart over evenly spaced categories
pub fn build_category_options(
    params: PlotParams,
    series: Vec<SeriesOptions>,
    categories: Vec<String>,
) -> PlotOptions {
    let y_range = YRange::from_series(&series, true);
    PlotOptions::base(params, XAxis::Categories(categories), series, y_range)
}
