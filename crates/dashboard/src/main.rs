//! Dioxus front end for bench-trends
//!
//! A pure Rust frontend that compiles to WebAssembly.
//! All styling is inline in Rust code.
//!
//! ## Pages
//!
//! - `dashboard.html` shows the summary: one chart per build profile with
//!   average build times per release.
//! - Any other path shows the grid: one chart per benchmark and profile,
//!   driven by the page's query string (`stat`, `kind`, `start`, `end`, ...).
//!
//! Payload shaping and chart layout live in `bench_trends_core`; this crate
//! only fetches, draws and wires events.

use bench_trends_core::render::{GRID_CONTAINER, SUMMARY_TARGETS};
use bench_trends_core::{ChartSet, DashboardRenderer, GraphsSelector, RenderConfig};
use dioxus::prelude::*;

mod api;
mod chart;
mod styles;

use chart::Chart;
use styles::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Page {
    Summary,
    Graphs,
}

impl Page {
    fn from_path(path: &str) -> Self {
        if path.ends_with("dashboard.html") {
            Page::Summary
        } else {
            Page::Graphs
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Page::Summary => "Build times by release",
            Page::Graphs => "Benchmark graphs",
        }
    }
}

/// Charts of the current page, ready to draw
#[derive(Debug, Clone, PartialEq)]
struct Rendered {
    page: Page,
    gutter: u32,
    charts: ChartSet,
}

fn main() {
    tracing_wasm::set_as_global_default();
    launch(App);
}

#[component]
fn App() -> Element {
    let mut rendered = use_signal(|| None::<Rendered>);

    use_effect(move || {
        spawn(async move {
            match load_page().await {
                Ok(page) => rendered.set(Some(page)),
                // the page stays blank
                Err(e) => tracing::error!("failed to load dashboard: {}", e),
            }
        });
    });

    rsx! {
        div { style: "{app_style()}",
            if let Some(page) = rendered.read().as_ref() {
                header { style: "{header_style()}",
                    h1 { style: "{title_style()}", "{page.page.heading()}" }
                }
                match page.page {
                    Page::Summary => rsx! { SummaryPage { charts: page.charts.clone(), gutter: page.gutter } },
                    Page::Graphs => rsx! { GridPage { charts: page.charts.clone(), gutter: page.gutter } },
                }
            }
        }
    }
}

#[component]
fn SummaryPage(charts: ChartSet, gutter: u32) -> Element {
    rsx! {
        div { style: "{summary_layout_style()}",
            for (_, target) in SUMMARY_TARGETS {
                div { key: "{target}", id: "{target}",
                    for handle in charts.in_target(target) {
                        Chart { handle: handle.clone(), gutter }
                    }
                }
            }
        }
    }
}

#[component]
fn GridPage(charts: ChartSet, gutter: u32) -> Element {
    rsx! {
        div { id: GRID_CONTAINER, style: "{grid_layout_style(gutter)}",
            for (i, handle) in charts.in_target(GRID_CONTAINER).enumerate() {
                Chart { key: "{i}", handle: handle.clone(), gutter }
            }
        }
    }
}

async fn load_page() -> Result<Rendered, String> {
    let window = web_sys::window().ok_or("no window")?;
    let location = window.location();
    let path = location
        .pathname()
        .map_err(|e| format!("Failed to read location: {:?}", e))?;
    let viewport = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(1600.0) as u32;

    let renderer = DashboardRenderer::new(RenderConfig::default().with_viewport_width(viewport));
    let config = renderer.config();
    let page = Page::from_path(&path);

    let charts = match page {
        Page::Summary => {
            let payload = api::load_summary(&config.summary_endpoint).await?;
            renderer.render_summary(&payload)
        }
        Page::Graphs => {
            let search = location
                .search()
                .map_err(|e| format!("Failed to read query: {:?}", e))?;
            let selector = GraphsSelector::from_query(&search).map_err(|e| e.to_string())?;
            let payload = api::load_graphs(&config.graphs_endpoint, &selector).await?;
            renderer
                .render_grid(&payload, &selector)
                .map_err(|e| e.to_string())?
        }
    };
    tracing::info!(charts = charts.len(), ?page, "dashboard rendered");

    Ok(Rendered {
        page,
        gutter: config.gutter,
        charts,
    })
}
