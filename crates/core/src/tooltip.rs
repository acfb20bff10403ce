//! Tooltip state machine
//!
//! The controller tracks which series and which sample the pointer is over,
//! keeps the floating tooltip positioned next to that sample, and tells
//! clicks apart from drags. It is driven by the chart's pointer events:
//!
//! - [`TooltipController::on_cursor_move`] when the hovered sample changes
//! - [`TooltipController::on_series_focus`] when a series gains or loses focus
//! - [`TooltipController::on_pointer_down`] / [`TooltipController::on_pointer_up`]
//!   for click detection

use crate::format::{format_number, format_timestamp, short_commit};
use crate::options::PointClick;
use crate::plot::Plot;

/// Tooltip contents and position, relative to the chart root
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    /// Commit date and short id
    pub heading: String,
    /// Value and change since the first sample
    pub trailer: String,
}

impl Tooltip {
    pub fn text(&self) -> String {
        format!("{}\n{}", self.heading, self.trailer)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipController {
    hovered_series: Option<usize>,
    hovered_data: Option<usize>,
    visible: bool,
    origin: (f64, f64),
    pointer_down: Option<(f64, f64)>,
    tooltip: Option<Tooltip>,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the offset of the plot overlay once the chart is mounted
    pub fn on_ready(&mut self, left: f64, top: f64) {
        self.origin = (left, top);
    }

    pub fn on_cursor_move(&mut self, plot: &Plot, index: Option<usize>) {
        if self.hovered_data == index {
            return;
        }
        self.hovered_data = index;
        if self.hovered_series.is_some() {
            self.reposition(plot);
        }
    }

    pub fn on_series_focus(&mut self, plot: &Plot, series: Option<usize>) {
        if self.hovered_series == series {
            return;
        }
        self.hovered_series = series;
        match series {
            None => self.hide(),
            Some(_) if self.hovered_data.is_some() => self.reposition(plot),
            Some(_) => {}
        }
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.pointer_down = Some((x, y));
    }

    /// A press and release at the same spot over a focused sample is a click
    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Option<PointClick> {
        let origin = self.pointer_down.take()?;
        if origin != (x, y) {
            return None;
        }
        Some(PointClick {
            series: self.hovered_series?,
            index: self.hovered_data?,
        })
    }

    pub fn hovered_series(&self) -> Option<usize> {
        self.hovered_series
    }

    pub fn hovered_data(&self) -> Option<usize> {
        self.hovered_data
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The tooltip to draw, if any
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref().filter(|_| self.visible)
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn reposition(&mut self, plot: &Plot) {
        match (self.hovered_series, self.hovered_data) {
            (Some(series), Some(index)) => match build_tooltip(plot, series, index, self.origin) {
                Some(tooltip) => {
                    self.tooltip = Some(tooltip);
                    self.visible = true;
                }
                None => self.hide(),
            },
            _ => self.hide(),
        }
    }
}

fn build_tooltip(plot: &Plot, series: usize, index: usize, origin: (f64, f64)) -> Option<Tooltip> {
    let options = plot.options().tooltip.as_ref()?;
    let commit = options.commits.get(index)?;
    let value = plot.value(series, index)?;
    let (x, y) = plot.point_pos(series, index)?;

    let trailer = if options.absolute_mode {
        match plot.value(series, 0).filter(|first| *first != 0.0) {
            Some(first) => format!(
                "{} ({:.2}% since start)",
                format_number(value),
                (value - first) / first * 100.0
            ),
            None => format_number(value),
        }
    } else {
        format!("{}% since start", format_number(value))
    };

    Some(Tooltip {
        left: origin.0 + x + options.shift_x,
        top: origin.1 + y + options.shift_y,
        heading: format!(
            "{} - {}",
            format_timestamp(commit.timestamp),
            short_commit(&commit.id)
        ),
        trailer,
    })
}
