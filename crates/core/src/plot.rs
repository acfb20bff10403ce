//! Chart geometry: projecting plot options onto an SVG canvas
//!
//! A [`Plot`] owns its [`PlotOptions`] and knows where every sample lands in
//! pixel space. The dashboard draws from it and feeds cursor positions back
//! through [`Plot::index_at`] and [`Plot::nearest_series`].

use chrono::DateTime;

use crate::format::format_tick;
use crate::options::{PlotOptions, XAxis, YRange};

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 28.0;
const TITLE_HEIGHT: f64 = 24.0;
const X_LABEL_HEIGHT: f64 = 16.0;

/// Target number of y ticks
const Y_TICKS: usize = 5;
const MAX_Y_TICKS: usize = 12;
const MAX_TIME_LABELS: usize = 4;
const MAX_CATEGORY_LABELS: usize = 12;

/// Drawing area inside the chart margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// An axis label at a pixel position
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

/// A chart laid out in pixel space
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    options: PlotOptions,
    rect: PlotRect,
    xs: Vec<f64>,
}

impl Plot {
    pub fn new(options: PlotOptions) -> Self {
        let top = MARGIN_TOP + if options.title.is_some() { TITLE_HEIGHT } else { 0.0 };
        let bottom = MARGIN_BOTTOM + if options.x_label.is_some() { X_LABEL_HEIGHT } else { 0.0 };
        let rect = PlotRect {
            left: MARGIN_LEFT,
            top,
            width: (options.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (options.height as f64 - top - bottom).max(1.0),
        };
        let xs = x_positions(&options.x_axis, &rect);

        Self { options, rect, xs }
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    pub fn rect(&self) -> PlotRect {
        self.rect
    }

    /// Number of x positions
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sample `index` of series `series`
    pub fn value(&self, series: usize, index: usize) -> Option<f64> {
        self.options
            .series
            .get(series)?
            .values
            .get(index)
            .copied()
            .filter(|v| v.is_finite())
    }

    pub fn x_pos(&self, index: usize) -> Option<f64> {
        self.xs.get(index).copied()
    }

    pub fn y_pos(&self, value: f64) -> f64 {
        let YRange { min, max } = self.options.y_range;
        let span = if max > min { max - min } else { 1.0 };
        self.rect.top + self.rect.height * (1.0 - (value - min) / span)
    }

    /// Pixel position of a sample
    pub fn point_pos(&self, series: usize, index: usize) -> Option<(f64, f64)> {
        let value = self.value(series, index)?;
        Some((self.x_pos(index)?, self.y_pos(value)))
    }

    /// SVG path data for one series; non-finite samples break the line
    pub fn line_path(&self, series: usize) -> String {
        let Some(series) = self.options.series.get(series) else {
            return String::new();
        };

        let mut path = String::new();
        let mut pen_down = false;
        for (x, value) in self.xs.iter().zip(&series.values) {
            if !value.is_finite() {
                pen_down = false;
                continue;
            }
            let y = self.y_pos(*value);
            let cmd = if pen_down { " L" } else { " M" };
            path.push_str(&format!("{cmd} {:.1} {:.1}", x, y));
            pen_down = true;
        }

        path.trim_start().to_string()
    }

    /// x positions of the interpolation markers; each spans the full plot height
    pub fn interpolation_markers(&self) -> Vec<f64> {
        self.options
            .interpolated
            .iter()
            .filter_map(|&i| self.x_pos(i))
            .collect()
    }

    /// Labelled y ticks at round values inside the range
    pub fn y_ticks(&self) -> Vec<Tick> {
        let YRange { min, max } = self.options.y_range;
        if !(max > min) {
            return Vec::new();
        }

        let step = nice_step(max - min, Y_TICKS);
        let decimals = (-step.log10().floor()).max(0.0) as i32;
        let scale = 10f64.powi(decimals);
        if !step.is_finite() || step <= 0.0 || !scale.is_finite() {
            return Vec::new();
        }

        let first = (min / step).ceil();
        let last = (max / step + 1e-9).floor();
        let count = (last - first + 1.0).clamp(0.0, MAX_Y_TICKS as f64) as usize;

        let mut ticks: Vec<Tick> = (0..count)
            .map(|i| {
                let value = (((first + i as f64) * step) * scale).round() / scale;
                Tick {
                    pos: self.y_pos(value),
                    label: format_tick(value),
                }
            })
            .collect();
        // steps below the float spacing of the range collapse onto one value
        ticks.dedup_by(|a, b| a.label == b.label);
        ticks
    }

    /// Labelled x ticks: dates for time axes, category names otherwise
    pub fn x_ticks(&self) -> Vec<Tick> {
        let (labels, max_labels): (Vec<String>, usize) = match &self.options.x_axis {
            XAxis::Time(values) => (
                values.iter().map(|&t| format_date(t as i64)).collect(),
                MAX_TIME_LABELS,
            ),
            XAxis::Categories(labels) => (labels.clone(), MAX_CATEGORY_LABELS),
        };

        let stride = labels.len().div_ceil(max_labels).max(1);
        labels
            .into_iter()
            .zip(&self.xs)
            .step_by(stride)
            .map(|(label, &pos)| Tick { pos, label })
            .collect()
    }

    /// Index of the sample closest to pixel `x`; positions outside the plot
    /// snap to the first or last sample
    pub fn index_at(&self, x: f64) -> Option<usize> {
        self.xs
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
            .map(|(i, _)| i)
    }

    /// Series whose sample at `index` is within the focus proximity of `y`
    pub fn nearest_series(&self, index: usize, y: f64) -> Option<usize> {
        let proximity = self.options.focus_proximity;
        (0..self.options.series.len())
            .filter_map(|s| self.value(s, index).map(|v| (s, (self.y_pos(v) - y).abs())))
            .filter(|&(_, distance)| distance <= proximity)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s)
    }

    /// Stroke opacity of `series` given the focused series
    pub fn series_alpha(&self, series: usize, focused: Option<usize>) -> f64 {
        match focused {
            Some(f) if f != series => self.options.focus_alpha,
            _ => 1.0,
        }
    }
}

/// Evenly spread categories, or time-proportional positions
fn x_positions(axis: &XAxis, rect: &PlotRect) -> Vec<f64> {
    match axis {
        XAxis::Categories(labels) => {
            let n = labels.len();
            (0..n)
                .map(|i| rect.left + rect.width * (i as f64 / (n.max(1) - 1).max(1) as f64))
                .collect()
        }
        XAxis::Time(values) => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            values
                .iter()
                .map(|&t| {
                    if span > 0.0 {
                        rect.left + rect.width * (t - min) / span
                    } else {
                        rect.left
                    }
                })
                .collect()
        }
    }
}

/// Smallest 1/2/5 x 10^n step that yields at most `target` intervals
fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_date(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%-m/%-d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Commit;
    use crate::options::{build_category_options, build_plot_options, PlotParams, SeriesOptions};
    use crate::selector::{GraphKind, GraphsSelector};
    use std::collections::HashSet;

    fn plot(values: Vec<Vec<f64>>, categories: usize) -> Plot {
        let series = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| SeriesOptions::new(format!("s{i}"), "#7cb5ec", v))
            .collect();
        let params = PlotParams {
            width: 280,
            height: 240,
            ..PlotParams::default()
        };
        let labels = (0..categories).map(|i| format!("1.{i}.0")).collect();
        Plot::new(build_category_options(params, series, labels))
    }

    #[test]
    fn test_rect_and_positions() {
        let plot = plot(vec![vec![0.0, 5.0, 10.0]], 3);
        let rect = plot.rect();

        assert_eq!(rect.left, 64.0);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.top, 12.0);
        assert_eq!(rect.height, 200.0);

        assert_eq!(plot.x_pos(0), Some(64.0));
        assert_eq!(plot.x_pos(1), Some(164.0));
        assert_eq!(plot.x_pos(2), Some(264.0));
        assert_eq!(plot.x_pos(3), None);

        // range is [0, 12]
        assert_eq!(plot.y_pos(0.0), rect.bottom());
        assert_eq!(plot.y_pos(12.0), rect.top);
    }

    #[test]
    fn test_line_path_breaks_on_nan() {
        let plot = plot(vec![vec![0.0, f64::NAN, 10.0]], 3);
        let expected = format!("M 64.0 212.0 M 264.0 {:.1}", plot.y_pos(10.0));
        assert_eq!(plot.line_path(0), expected);
        assert_eq!(plot.line_path(5), "");
    }

    #[test]
    fn test_y_ticks_are_round() {
        let plot = plot(vec![vec![0.0, 10.0]], 2);
        let labels: Vec<_> = plot.y_ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["0", "5", "10"]);
    }

    #[test]
    fn test_y_ticks_terminate_for_huge_offsets() {
        let commits = vec![Commit::new(0, "aaaa"), Commit::new(60, "bbbb")];
        let params = PlotParams {
            width: 280,
            height: 240,
            ..PlotParams::default()
        };
        let series = vec![SeriesOptions::new("full", "#7cb5ec", vec![1e16, 1e16 + 2.0])];
        let selector = GraphsSelector::new("instructions:u", GraphKind::PercentRelative);
        let plot = Plot::new(build_plot_options(params, series, &commits, &selector, |_| false));

        let ticks = plot.y_ticks();
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_Y_TICKS);
        let labels: HashSet<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels.len(), ticks.len());
    }

    #[test]
    fn test_y_ticks_use_suffixes() {
        let plot = plot(vec![vec![0.0, 2_000_000.0]], 2);
        let labels: Vec<_> = plot.y_ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels.first().map(String::as_str), Some("0"));
        assert!(labels.contains(&"1M".to_string()));
        assert!(labels.contains(&"500k".to_string()));
    }

    #[test]
    fn test_x_ticks_thin_out_categories() {
        let plot = plot(vec![vec![1.0; 30]], 30);
        let ticks = plot.x_ticks();
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0].label, "1.0.0");
        assert_eq!(ticks[1].label, "1.3.0");
    }

    #[test]
    fn test_index_at_snaps() {
        let plot = plot(vec![vec![1.0, 2.0, 3.0]], 3);
        assert_eq!(plot.index_at(0.0), Some(0));
        assert_eq!(plot.index_at(150.0), Some(1));
        assert_eq!(plot.index_at(500.0), Some(2));
    }

    #[test]
    fn test_nearest_series_within_proximity() {
        let plot = plot(vec![vec![0.0, 10.0], vec![0.0, 6.0]], 2);
        let y_high = plot.y_pos(10.0);
        let y_low = plot.y_pos(6.0);

        assert_eq!(plot.nearest_series(1, y_high + 2.0), Some(0));
        assert_eq!(plot.nearest_series(1, y_low - 3.0), Some(1));
        assert_eq!(plot.nearest_series(1, (y_high + y_low) / 2.0), None);
        assert_eq!(plot.series_alpha(0, Some(1)), 0.3);
        assert_eq!(plot.series_alpha(1, Some(1)), 1.0);
        assert_eq!(plot.series_alpha(0, None), 1.0);
    }
}
