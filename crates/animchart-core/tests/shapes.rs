// File: crates/animchart-core/tests/shapes.rs
// Purpose: Bar style builders, reveal clamping, line markers and pie slices.

use animchart_core::config::LineStyle;
use animchart_core::path::PathCmd;
use animchart_core::render::bar::{build_bars, cylinder_bar, dome_bar, flat_bar, glass_bar, parallelepiped_bar};
use animchart_core::render::line::{build_line_series, marker_path};
use animchart_core::render::pie::{compute_slices, leader};
use animchart_core::render::{BarSlot, FillRole};
use animchart_core::scale::scale_for;
use animchart_core::{BarStyle, ChartConfig, ChartKind, FixedAdvanceMeasurer, LayoutNegotiator, Point, ShapePath};

fn slot(top: f32, base: f32) -> BarSlot {
    BarSlot {
        x: 100.0,
        width: 40.0,
        top,
        base,
        corner_radius: 6.0,
        stacked: false,
        topmost: true,
        settled: true,
        series_count: 1,
        gap: 20.0,
        next_top: None,
    }
}

#[test]
fn every_style_contains_the_bar_center() {
    let s = slot(100.0, 250.0);
    let center = Point::new(120.0, 175.0);
    for build in [flat_bar, glass_bar, cylinder_bar, dome_bar, parallelepiped_bar] {
        let parts = build(&s);
        assert!(parts.iter().any(|p| p.is_hit_region() && p.path.contains(center)));
        assert!(!parts.iter().any(|p| p.path.contains(Point::new(20.0, 20.0))));
    }
}

#[test]
fn glass_corners_shrink_on_crowded_groups() {
    // 40px wide with four series: 40 <= 2 * 6 * 4
    let mut narrow = slot(100.0, 250.0);
    narrow.series_count = 4;
    let first = glass_bar(&narrow)[0].path.commands().first().cloned();
    assert_eq!(first, Some(PathCmd::MoveTo(Point::new(102.0, 100.0))));

    let wide = slot(100.0, 250.0);
    let first = glass_bar(&wide)[0].path.commands().first().cloned();
    assert_eq!(first, Some(PathCmd::MoveTo(Point::new(106.0, 100.0))));
}

#[test]
fn glass_rounds_only_the_topmost_segment() {
    let mut lower = slot(150.0, 250.0);
    lower.stacked = true;
    lower.topmost = false;
    let parts = glass_bar(&lower);
    let square = ShapePath::polygon(&[
        Point::new(100.0, 150.0),
        Point::new(140.0, 150.0),
        Point::new(140.0, 250.0),
        Point::new(100.0, 250.0),
    ]);
    assert_eq!(parts[0].path, square);

    lower.topmost = true;
    let rounded = glass_bar(&lower);
    assert!(rounded[0].path.commands().iter().any(|c| matches!(c, PathCmd::Arc { .. })));
}

#[test]
fn stacked_dome_caps_once_settled() {
    let mut top = slot(100.0, 250.0);
    top.stacked = true;
    top.settled = false;
    let growing = dome_bar(&top);
    assert_eq!(growing[0].path.commands().first(), Some(&PathCmd::MoveTo(Point::new(100.0, 100.0))));
    assert_eq!(growing[0].path.bounds().map(|b| b.top), Some(100.0));

    top.settled = true;
    let capped = dome_bar(&top);
    assert!(matches!(capped[0].path.commands().first(), Some(PathCmd::Arc { radius, .. }) if *radius == 20.0));

    // grouped domes are capped while growing
    let mut grouped = slot(100.0, 250.0);
    grouped.settled = false;
    assert_eq!(dome_bar(&grouped)[0].path, capped[0].path);
}

#[test]
fn stacked_reveal_settles_with_the_last_frame() {
    let config = ChartConfig::new(ChartKind::StackedBar, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).with_style("dome");
    let range = scale_for(&config);
    let metrics = LayoutNegotiator::negotiate(&config, &range, &FixedAdvanceMeasurer::default(), (400.0, 300.0));
    let scale = metrics.value_scale(range);
    let mut acc = Vec::new();
    let (early, complete) = build_bars(&config, &metrics, &scale, BarStyle::Dome.builder(), 10.0, &mut acc);
    assert!(!complete);
    assert!(early.iter().all(|b| !b.slot.settled));
    let (done, complete) = build_bars(&config, &metrics, &scale, BarStyle::Dome.builder(), f32::INFINITY, &mut acc);
    assert!(complete);
    assert!(done.iter().all(|b| b.slot.settled));
}

#[test]
fn cylinder_rim_is_outline_only() {
    let parts = cylinder_bar(&slot(100.0, 250.0));
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[2].role, FillRole::None);
    assert!(!parts[2].is_hit_region());
    assert_eq!(parts[1].role, FillRole::Gradient);
}

#[test]
fn dome_cap_peaks_at_the_bar_top() {
    // tall bar: circular cap
    let tall = slot(100.0, 250.0);
    let top = dome_bar(&tall)[0].path.bounds().map(|b| b.top);
    assert!((top.unwrap_or(0.0) - 100.0).abs() < 0.05);

    // shorter than its half width: elliptic cap, still peaking at the top
    let short = slot(240.0, 250.0);
    let top = dome_bar(&short)[0].path.bounds().map(|b| b.top);
    assert!((top.unwrap_or(0.0) - 240.0).abs() < 0.05);
}

#[test]
fn parallelepiped_side_face_depends_on_the_neighbour() {
    let mut s = slot(100.0, 250.0);
    assert_eq!(parallelepiped_bar(&s).len(), 3);

    s.next_top = Some(80.0);
    assert_eq!(parallelepiped_bar(&s).len(), 2, "hidden behind a taller neighbour");

    s.next_top = Some(150.0);
    let parts = parallelepiped_bar(&s);
    assert_eq!(parts.len(), 3);
    let side = parts[2].path.bounds().map(|b| b.bottom).unwrap_or(0.0);
    assert!((side - 150.0).abs() < 1e-4, "cut at the neighbour's top");
}

#[test]
fn bars_grow_monotonically_and_end_proportional() {
    let config = ChartConfig::new(ChartKind::Bar, vec![vec![10.0, 20.0, 30.0]]).with_labels(["A", "B", "C"]);
    let range = scale_for(&config);
    let metrics = LayoutNegotiator::negotiate(&config, &range, &FixedAdvanceMeasurer::default(), (400.0, 300.0));
    let scale = metrics.value_scale(range);
    let builder = BarStyle::Normal.builder();
    let mut acc = Vec::new();

    let mut last = vec![0.0f32; 3];
    let mut reveal = 6.0;
    let mut finished = false;
    for _ in 0..100 {
        let (bars, complete) = build_bars(&config, &metrics, &scale, builder, reveal, &mut acc);
        assert_eq!(bars.len(), 3);
        for bar in &bars {
            let h = bar.slot.base - bar.slot.top;
            assert!(h + 1e-4 >= last[bar.category]);
            last[bar.category] = h;
        }
        if complete {
            finished = true;
            break;
        }
        reveal += 10.0;
    }
    assert!(finished);
    assert!((last[1] / last[0] - 2.0).abs() < 1e-3);
    assert!((last[2] / last[0] - 3.0).abs() < 1e-3);
}

#[test]
fn stacked_segments_start_where_the_previous_ended() {
    let config = ChartConfig::new(ChartKind::StackedBar, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let range = scale_for(&config);
    let metrics = LayoutNegotiator::negotiate(&config, &range, &FixedAdvanceMeasurer::default(), (400.0, 300.0));
    let scale = metrics.value_scale(range);
    let mut acc = Vec::new();
    let (bars, complete) = build_bars(&config, &metrics, &scale, BarStyle::Glass.builder(), f32::INFINITY, &mut acc);
    assert!(complete);

    let lower = bars.iter().find(|b| b.series == 0 && b.category == 1).map(|b| b.slot);
    let upper = bars.iter().find(|b| b.series == 1 && b.category == 1).map(|b| b.slot);
    let (lower, upper) = (lower.unwrap_or(slot(0.0, 0.0)), upper.unwrap_or(slot(0.0, 0.0)));
    assert_eq!(upper.base, lower.top);
    assert_eq!(lower.base, metrics.baseline);
    assert!(!lower.topmost);
    assert!(upper.topmost);
    assert_eq!(acc[1], upper.top);
}

#[test]
fn line_segments_leave_room_for_markers() {
    let config = ChartConfig::new(ChartKind::Line, vec![vec![10.0, 40.0, 20.0]]).with_labels(["a", "b", "c"]);
    let range = scale_for(&config);
    let metrics = LayoutNegotiator::negotiate(&config, &range, &FixedAdvanceMeasurer::default(), (400.0, 300.0));
    let scale = metrics.value_scale(range);
    let (series, complete) = build_line_series(&config.data, &metrics, &scale, LineStyle::SolidDot, false, 1, f32::INFINITY);
    assert!(complete);
    let g = &series[0];
    assert_eq!(g.points.len(), 3);
    assert_eq!(g.segments.len(), 2);
    let (a, _) = g.segments[0];
    let gap = a.distance(g.points[0].center);
    assert!((gap - (g.radius + 2.0)).abs() < 1e-3);
    assert!(g.area.is_none());
}

#[test]
fn area_closes_down_to_the_axis() {
    let config = ChartConfig::new(ChartKind::Area, vec![vec![10.0, 40.0, 20.0]]);
    let range = scale_for(&config);
    let metrics = LayoutNegotiator::negotiate(&config, &range, &FixedAdvanceMeasurer::default(), (400.0, 300.0));
    let scale = metrics.value_scale(range);
    let (series, _) = build_line_series(&config.data, &metrics, &scale, LineStyle::Normal, true, 1, f32::INFINITY);
    let bottom = series[0].area.as_ref().and_then(|a| a.bounds()).map(|b| b.bottom);
    assert_eq!(bottom, Some(metrics.baseline));
}

#[test]
fn star_marker_has_ten_points() {
    let star = marker_path(LineStyle::StarDot, Point::new(50.0, 50.0), 3.0);
    // move plus ten line segments
    assert_eq!(star.commands().len(), 11);
    let b = star.bounds().map(|b| (b.top, b.bottom));
    assert_eq!(b.map(|(t, _)| (t - 45.0).abs() < 1e-4), Some(true));
}

#[test]
fn pie_quarters() {
    let (slices, total) = compute_slices(&[1.0, 1.0, 2.0]);
    assert_eq!(total, 4.0);
    let percents: Vec<f64> = slices.iter().map(|s| s.percent).collect();
    assert_eq!(percents, vec![25.0, 25.0, 50.0]);
    assert_eq!(slices[0].start_angle, 0.0);
    assert_eq!(slices[2].end_angle, std::f32::consts::TAU);
    for pair in slices.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
    let swept: f32 = slices.iter().map(|s| s.end_angle - s.start_angle).sum();
    assert!((swept - std::f32::consts::TAU).abs() < 1e-5);
}

#[test]
fn zero_total_pie_is_empty() {
    let (slices, total) = compute_slices(&[0.0, 0.0]);
    assert!(slices.is_empty());
    assert_eq!(total, 0.0);
}

#[test]
fn leaders_bend_away_from_the_pie() {
    let c = Point::new(100.0, 100.0);
    let right = leader(c, 50.0, 0.3, false);
    assert!(right.write_from);
    assert!(right.end.x > right.elbow.x);

    let left = leader(c, 50.0, 2.5, false);
    assert!(!left.write_from);
    assert!(left.end.x < left.elbow.x);

    // a lone slice's midpoint sits at pi: no bend, label to the left
    let lone = leader(c, 50.0, std::f32::consts::PI, true);
    assert!(!lone.write_from);
    assert_eq!(lone.end, lone.elbow);
}
