//! Payload to chart: decode, normalize, render, then interact

use bench_trends_core::{
    normalize, DashboardRenderer, GraphKind, GraphsSelector, PointClick, Profile,
    RawDashboardPayload, RenderConfig, SummaryPayload, TooltipController,
};
use pretty_assertions::assert_eq;

const GRAPHS_RESPONSE: &str = r#"{"Ok": {
    "commits": [[1000, "aaaa"], [2000, "bbbb"], [3000, "cccc"]],
    "benchmarks": {
        "bench-a": {
            "Check": {"full": {"points": [1, 2, 3], "interpolated_indices": [1]}}
        }
    }
}}"#;

#[test]
fn single_benchmark_renders_one_chart() {
    let raw = RawDashboardPayload::from_response_str(GRAPHS_RESPONSE).unwrap();
    let payload = normalize(raw);

    let entry = &payload.benchmarks["bench-a"];
    let bucket = entry.get(Profile::Check).expect("check profile");
    assert!(bucket["full"].is_interpolated(1));
    assert_eq!(entry.profiles().count(), 1);

    let selector = GraphsSelector::new("instructions:u", GraphKind::Raw);
    let charts = DashboardRenderer::default()
        .render_grid(&payload, &selector)
        .unwrap();
    assert_eq!(charts.len(), 1);

    let chart = charts.iter().next().unwrap();
    assert_eq!(chart.title(), Some("bench-a-check"));
    assert_eq!(chart.target, "charts");

    let labels: Vec<_> = chart.options().series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["full"]);
    assert_eq!(chart.options().interpolated, vec![1]);
    assert_eq!(
        chart.plot.interpolation_markers(),
        vec![chart.plot.x_pos(1).unwrap()]
    );
    assert_eq!(
        chart.options().y_label.as_deref(),
        Some("CPU instructions (count)")
    );
}

#[test]
fn clicking_a_point_opens_compare_page() {
    let payload = normalize(RawDashboardPayload::from_response_str(GRAPHS_RESPONSE).unwrap());
    let selector = GraphsSelector::from_query("?stat=wall-time&kind=raw").unwrap();
    let renderer = DashboardRenderer::new(RenderConfig::default().with_viewport_width(1280));
    let charts = renderer.render_grid(&payload, &selector).unwrap();
    let plot = &charts.iter().next().unwrap().plot;

    let (x, y) = plot.point_pos(0, 2).unwrap();
    let index = plot.index_at(x);
    let series = index.and_then(|i| plot.nearest_series(i, y));
    assert_eq!((index, series), (Some(2), Some(0)));

    let mut tooltip = TooltipController::new();
    tooltip.on_cursor_move(plot, index);
    tooltip.on_series_focus(plot, series);
    assert!(tooltip.tooltip().unwrap().text().contains("cccc"));

    tooltip.on_pointer_down(x, y);
    let click = tooltip.on_pointer_up(x, y).unwrap();
    assert_eq!(click, PointClick { series: 0, index: 2 });
    assert_eq!(
        plot.options().click_url(click).as_deref(),
        Some("/compare.html?start=bbbb&end=cccc&stat=wall-time")
    );
}

#[test]
fn summary_payload_renders_fixed_layout() {
    let body = r#"{"Ok": {
        "versions": ["1.60.0", "1.61.0", "1.62.0"],
        "check": {"clean_averages": [3, 2, 1], "base_incr_averages": [4, 3, 2],
                  "clean_incr_averages": [1, 1, 1], "println_incr_averages": [2, 2, 2]},
        "debug": {"clean_averages": [6, 5, 4], "base_incr_averages": [7, 6, 5],
                  "clean_incr_averages": [1, 1, 1], "println_incr_averages": [3, 3, 3]},
        "opt": {"clean_averages": [9, 8, 7], "base_incr_averages": [9, 9, 9],
                "clean_incr_averages": [2, 2, 2], "println_incr_averages": [5, 5, 5]},
        "doc": {"clean_averages": [], "base_incr_averages": [],
                "clean_incr_averages": [], "println_incr_averages": []}
    }}"#;
    let payload = SummaryPayload::from_response_str(body).unwrap();

    let charts = DashboardRenderer::default().render_summary(&payload);
    let titles: Vec<_> = charts.iter().filter_map(|c| c.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Average time for a check build",
            "Average time for a debug build",
            "Average time for an opt build",
        ]
    );

    let check = charts.in_target("check-average-times").next().unwrap();
    let ticks: Vec<_> = check.plot.x_ticks().into_iter().map(|t| t.label).collect();
    assert_eq!(ticks, vec!["1.60.0", "1.61.0", "1.62.0"]);
    assert!(check.options().tooltip.is_none());
}
