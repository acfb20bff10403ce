//! SVG chart component
//!
//! Draws a [`ChartHandle`] and routes pointer events into its
//! [`TooltipController`]. All layout comes from the handle's `Plot`.

use std::rc::Rc;

use bench_trends_core::{ChartHandle, TooltipController};
use dioxus::prelude::*;

use crate::styles::*;

#[component]
pub fn Chart(handle: ChartHandle, gutter: u32) -> Element {
    let mut controller = use_signal(TooltipController::new);
    let mut root_node = use_signal(|| None::<Rc<MountedData>>);
    let mut svg_node = use_signal(|| None::<Rc<MountedData>>);

    // offset of the plot overlay inside the card, once both are mounted
    use_effect(move || {
        let (Some(root), Some(svg)) = (root_node.read().clone(), svg_node.read().clone()) else {
            return;
        };
        spawn(async move {
            if let (Ok(outer), Ok(inner)) = (root.get_client_rect().await, svg.get_client_rect().await) {
                controller
                    .write()
                    .on_ready(inner.min_x() - outer.min_x(), inner.min_y() - outer.min_y());
            }
        });
    });

    let plot = handle.plot;
    let options = plot.options().clone();
    let rect = plot.rect();
    let width = options.width as f64;

    let focused = controller.read().hovered_series();
    let tooltip = controller.read().tooltip().cloned();
    let hovered_point = match (focused, controller.read().hovered_data()) {
        (Some(series), Some(index)) if tooltip.is_some() => plot.point_pos(series, index),
        _ => None,
    };

    let y_ticks = plot.y_ticks();
    let x_ticks = plot.x_ticks();
    let markers = plot.interpolation_markers();
    let paths: Vec<(String, String, f64, f64)> = options
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| (plot.line_path(i), s.stroke.clone(), s.width, plot.series_alpha(i, focused)))
        .collect();
    let y_label_x = 14.0;
    let y_label_y = rect.top + rect.height / 2.0;

    let move_plot = plot.clone();
    let leave_plot = plot.clone();
    let click_plot = plot.clone();

    rsx! {
        div {
            style: "{chart_card_style(gutter)}",
            onmounted: move |evt| root_node.set(Some(evt.data())),

            svg {
                width: "{options.width}",
                height: "{options.height}",
                style: "display: block; cursor: crosshair;",
                onmounted: move |evt| svg_node.set(Some(evt.data())),
                onmousemove: move |e| {
                    let point = e.data().element_coordinates();
                    let index = move_plot.index_at(point.x);
                    let series = index.and_then(|i| move_plot.nearest_series(i, point.y));
                    let mut state = controller.write();
                    state.on_cursor_move(&move_plot, index);
                    state.on_series_focus(&move_plot, series);
                },
                onmouseleave: move |_| {
                    let mut state = controller.write();
                    state.on_series_focus(&leave_plot, None);
                    state.on_cursor_move(&leave_plot, None);
                },
                onmousedown: move |e| {
                    let point = e.data().element_coordinates();
                    controller.write().on_pointer_down(point.x, point.y);
                },
                onmouseup: move |e| {
                    let point = e.data().element_coordinates();
                    let click = controller.write().on_pointer_up(point.x, point.y);
                    if let Some(url) = click.and_then(|c| click_plot.options().click_url(c)) {
                        open_in_new_tab(&url);
                    }
                },

                g { style: "pointer-events: none;",
                    if let Some(title) = options.title.clone() {
                        text {
                            x: "{width / 2.0}",
                            y: "20",
                            fill: "{TEXT_COLOR}",
                            "font-size": "13",
                            "font-weight": "600",
                            "text-anchor": "middle",
                            "{title}"
                        }
                    }

                    for (i, x) in markers.iter().enumerate() {
                        line {
                            key: "marker-{i}",
                            x1: "{x}", y1: "{rect.top}", x2: "{x}", y2: "{rect.bottom()}",
                            stroke: "{options.highlight}",
                            "stroke-width": "4"
                        }
                    }

                    for tick in y_ticks.iter() {
                        g { key: "ytick-{tick.label}",
                            line {
                                x1: "{rect.left}", y1: "{tick.pos}", x2: "{rect.right()}", y2: "{tick.pos}",
                                stroke: "{GRID_COLOR}",
                                "stroke-width": "1"
                            }
                            text {
                                x: "{rect.left - 6.0}",
                                y: "{tick.pos + 3.0}",
                                fill: "{AXIS_COLOR}",
                                "font-size": "10",
                                "text-anchor": "end",
                                "{tick.label}"
                            }
                        }
                    }

                    line {
                        x1: "{rect.left}", y1: "{rect.bottom()}", x2: "{rect.right()}", y2: "{rect.bottom()}",
                        stroke: "{AXIS_COLOR}",
                        "stroke-width": "1"
                    }
                    for (i, tick) in x_ticks.iter().enumerate() {
                        text {
                            key: "xtick-{i}",
                            x: "{tick.pos}",
                            y: "{rect.bottom() + 14.0}",
                            fill: "{AXIS_COLOR}",
                            "font-size": "10",
                            "text-anchor": "middle",
                            "{tick.label}"
                        }
                    }

                    if let Some(label) = options.y_label.clone() {
                        text {
                            x: "{y_label_x}",
                            y: "{y_label_y}",
                            fill: "{AXIS_COLOR}",
                            "font-size": "10",
                            "text-anchor": "middle",
                            "transform": "rotate(-90 {y_label_x} {y_label_y})",
                            "{label}"
                        }
                    }
                    if let Some(label) = options.x_label.clone() {
                        text {
                            x: "{rect.left + rect.width / 2.0}",
                            y: "{rect.bottom() + 30.0}",
                            fill: "{AXIS_COLOR}",
                            "font-size": "10",
                            "text-anchor": "middle",
                            "{label}"
                        }
                    }

                    for (i, (d, stroke, stroke_width, alpha)) in paths.iter().enumerate() {
                        path {
                            key: "series-{i}",
                            d: "{d}",
                            fill: "none",
                            stroke: "{stroke}",
                            "stroke-width": "{stroke_width}",
                            opacity: "{alpha}"
                        }
                    }

                    if let Some((x, y)) = hovered_point {
                        circle { cx: "{x}", cy: "{y}", r: "3", fill: "{TEXT_COLOR}" }
                    }
                }
            }

            div { style: "{chart_legend_style()}",
                for series in options.series.iter() {
                    span { key: "{series.label}",
                        span { style: "{legend_swatch_style(&series.stroke)}" }
                        "{series.label}"
                    }
                }
            }

            if let Some(tooltip) = tooltip {
                div { style: "{hover_tooltip_style(tooltip.left, tooltip.top)}",
                    div { style: "{muted_style()}", "{tooltip.heading}" }
                    div { "{tooltip.trailer}" }
                }
            }
        }
    }
}

fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        tracing::warn!("failed to open {}: {:?}", url, e);
    }
}
