// File: crates/animchart-core/tests/hit_test.rs
// Purpose: Pointer-to-data resolution for stacked, horizontal, overlay and pie charts.

use animchart_core::{
    ChartConfig, ChartController, ChartKind, Dimension, HitLayer, HitTester, HostMetrics, Point, RecordingSurface, Scene,
    TooltipPattern,
};

fn controller(config: ChartConfig) -> ChartController<RecordingSurface> {
    let mut chart = ChartController::new(
        config,
        RecordingSurface::new(1, 1),
        RecordingSurface::new(100, 25),
        Dimension::Pixels(400.0),
        Dimension::Pixels(300.0),
        HostMetrics { container_width: 400.0, window_height: 300.0 },
    )
    .expect("valid config");
    chart.run_to_completion();
    chart
}

fn bar_center(scene: &Scene, series: usize, category: usize) -> Option<Point> {
    let Scene::Bars { bars, .. } = scene else { return None };
    let b = bars.iter().find(|b| b.series == series && b.category == category)?;
    Some(Point::new(b.slot.x + b.slot.width / 2.0, (b.slot.top + b.slot.base) / 2.0))
}

#[test]
fn stacked_segments_report_value_and_total() {
    let config = ChartConfig::new(ChartKind::StackedBar, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).with_style("cylinder");
    let mut chart = controller(config);
    let p = bar_center(chart.final_scene(), 1, 0).expect("bar");
    let hover = chart.pointer_move(p).expect("hover");
    assert_eq!(hover.message, "3 / 4");

    let p = bar_center(chart.final_scene(), 0, 1).expect("bar");
    assert_eq!(chart.pointer_move(p).expect("hover").message, "2 / 6");
}

#[test]
fn horizontal_bars_round_trip_through_device_space() {
    let config = ChartConfig::new(ChartKind::HBar, vec![vec![10.0, 20.0, 30.0]]).with_labels(["A", "B", "C"]);
    let mut chart = controller(config);
    let orientation = chart.state().layout.orientation();
    assert!(orientation.is_horizontal());

    for category in 0..3 {
        let logical = bar_center(chart.final_scene(), 0, category).expect("bar");
        let device = orientation.to_device(logical);
        let back = orientation.to_logical(device);
        assert!((back.x - logical.x).abs() < 1e-3 && (back.y - logical.y).abs() < 1e-3);
        let clicked = chart.click(device).map(|v| v.category);
        assert_eq!(clicked, Some(category));
    }
}

#[test]
fn overlay_points_win_over_bars() {
    let mut config = ChartConfig::new(ChartKind::Bar, vec![vec![10.0, 20.0, 30.0]]);
    config.line_data = Some(vec![vec![10.0, 20.0, 30.0]]);
    config.message = Some("bar #val".into());
    let chart = controller(config);

    let Scene::Bars { overlay, .. } = chart.final_scene() else { panic!("expected bars") };
    let dot = overlay[0].points[1].center;
    let tester = HitTester::new(chart.config(), chart.final_scene());
    let hit = tester.locate(dot).expect("hit");
    assert_eq!(hit.layer, HitLayer::Line);
    assert_eq!(hit.category, 1);
    assert_eq!(tester.message(&hit), "20");

    let p = bar_center(chart.final_scene(), 0, 1).expect("bar");
    let hit = tester.locate(p).expect("hit");
    assert_eq!(hit.layer, HitLayer::Bar);
    assert_eq!(tester.message(&hit), "bar 20");
}

#[test]
fn later_series_win_where_shapes_overlap() {
    let config = ChartConfig::new(ChartKind::Line, vec![vec![10.0, 20.0], vec![10.0, 25.0]]);
    let chart = controller(config);
    let Scene::Lines { series } = chart.final_scene() else { panic!("expected lines") };
    let shared = series[0].points[0].center;
    assert_eq!(shared, series[1].points[0].center);
    let hit = HitTester::new(chart.config(), chart.final_scene()).locate(shared).expect("hit");
    assert_eq!(hit.series, 1);
}

#[test]
fn pie_slices_resolve_by_angle() {
    let config = ChartConfig::new(ChartKind::Pie, vec![vec![1.0, 1.0, 2.0]]).with_labels(["a", "b", "c"]);
    let mut chart = controller(config);
    let Scene::Pie { slices, layout, total, .. } = chart.final_scene().clone() else { panic!("expected pie") };
    assert_eq!(total, 4.0);

    for slice in &slices {
        let r = layout.radius / 2.0;
        let p = layout.center.offset(r * slice.mid_angle.cos(), r * slice.mid_angle.sin());
        let value = chart.click(p).map(|v| v.label);
        assert_eq!(value.as_deref(), Some(["a", "b", "c"][slice.index]));
    }

    let c = &slices[2];
    let p = layout.center.offset(10.0 * c.mid_angle.cos(), 10.0 * c.mid_angle.sin());
    let hover = chart.pointer_move(p).expect("hover");
    assert_eq!(hover.message, "2 / 4<br>50% of 100%");
    assert_eq!(hover.tooltip.lines.len(), 2);

    let outside = layout.center.offset(layout.radius + 5.0, 0.0);
    assert!(chart.click(outside).is_none());
}

#[test]
fn tooltip_pattern_formats_values() {
    let mut config = ChartConfig::new(ChartKind::Bar, vec![vec![1234.5, 20.0]]);
    config.tooltip_pattern = Some(TooltipPattern { decimals: 1, decimal_separator: ",".into(), thousand_separator: ".".into() });
    let mut chart = controller(config);
    let p = bar_center(chart.final_scene(), 0, 0).expect("bar");
    assert_eq!(chart.pointer_move(p).expect("hover").message, "1.234,5");
}
