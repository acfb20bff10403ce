//! Dashboard configuration

use serde::{Deserialize, Serialize};

/// Endpoints and layout parameters shared by both dashboard pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Endpoint serving the per-benchmark graphs payload
    pub graphs_endpoint: String,
    /// Endpoint serving the summary (per-release averages) payload
    pub summary_endpoint: String,
    /// Page opened when a data point is clicked
    pub compare_path: String,
    /// Width of the browser viewport in CSS pixels
    pub viewport_width: u32,
    /// Grid charts per row
    pub columns: u32,
    /// Horizontal space taken away from every grid chart
    pub gutter: u32,
    /// Height of every chart
    pub chart_height: u32,
    /// Width of the summary charts
    pub summary_width: u32,
    /// Whether grid charts carry a `<benchmark>-<profile>` title
    pub render_title: bool,
    /// Tooltip offset from the hovered point, in pixels
    pub tooltip_shift: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            graphs_endpoint: "/perf/graphs".to_string(),
            summary_endpoint: "/perf/dashboard".to_string(),
            compare_path: "/compare.html".to_string(),
            viewport_width: 1600,
            columns: 4,
            gutter: 40,
            chart_height: 300,
            summary_width: 800,
            render_title: true,
            tooltip_shift: 10.0,
        }
    }
}

impl RenderConfig {
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Width of one grid chart: the viewport split into columns minus the gutter
    pub fn grid_chart_width(&self) -> u32 {
        (self.viewport_width / self.columns.max(1)).saturating_sub(self.gutter)
    }
}
