// File: crates/animchart-core/tests/controller.rs
// Purpose: Controller lifecycle: reveal frames, stale tokens, hover, click and resize.

use std::sync::{Arc, Mutex};

use animchart_core::render::PlacedBar;
use animchart_core::{
    ChartConfig, ChartController, ChartError, ChartKind, ClickValue, Cursor, Dimension, DrawOp, FrameOutcome,
    HostMetrics, Phase, Point, RecordingSurface, RevealAnimator, Scene,
};

const HOST: HostMetrics = HostMetrics { container_width: 800.0, window_height: 600.0 };

fn controller(config: ChartConfig) -> ChartController<RecordingSurface> {
    ChartController::new(
        config,
        RecordingSurface::new(1, 1),
        RecordingSurface::new(100, 25),
        Dimension::Pixels(400.0),
        Dimension::Pixels(300.0),
        HOST,
    )
    .expect("valid config")
}

fn sales() -> ChartConfig {
    ChartConfig::new(ChartKind::Bar, vec![vec![10.0, 20.0, 30.0]]).with_labels(["A", "B", "C"])
}

fn bars(chart: &ChartController<RecordingSurface>) -> Vec<PlacedBar> {
    match chart.final_scene() {
        Scene::Bars { bars, .. } => bars.clone(),
        other => panic!("expected bars, got {:?}", other.family()),
    }
}

fn center(bar: &PlacedBar) -> Point {
    Point::new(bar.slot.x + bar.slot.width / 2.0, (bar.slot.top + bar.slot.base) / 2.0)
}

#[test]
fn reveal_stops_in_about_thirty_frames() {
    let mut chart = controller(sales());
    assert_eq!(chart.phase(), Phase::Animating);
    let frames = chart.run_to_completion();
    assert!((2..=35).contains(&frames), "took {frames} frames");
    assert_eq!(chart.phase(), Phase::Idle);
    assert!(chart.state().render.reveal.is_stopped());
    assert_eq!(chart.state().render.reveal.frames(), frames);
    assert_eq!(chart.frame(chart.frame_token()), FrameOutcome::Done);

    // three bars were filled in the last frame
    assert!(chart.main().fill_count() >= 3);
    assert!(matches!(chart.main().ops().first(), Some(DrawOp::Clear(_))));
}

#[test]
fn animator_grows_until_a_frame_needs_no_clamping() {
    let mut a = RevealAnimator::new(300.0);
    assert_eq!(a.amount(), 6.0);
    assert!(a.finish_frame(false));
    assert_eq!(a.amount(), 17.0);
    a.clamp_to(10.0);
    assert_eq!(a.amount(), 10.0);
    assert!(!a.finish_frame(true));
    assert!(a.is_stopped());
    assert_eq!(a.frames(), 2);
}

#[test]
fn every_family_finishes() {
    let configs = [
        sales(),
        ChartConfig::new(ChartKind::HStackedBar, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).with_style("dome"),
        ChartConfig::new(ChartKind::Area, vec![vec![5.0, 9.0, 2.0, 7.0]]),
        ChartConfig::new(ChartKind::Line, vec![vec![5.0, 5.0, 5.0]]).with_style("stardot"),
        ChartConfig::new(ChartKind::Pie, vec![vec![3.0, 1.0, 4.0]]).with_labels(["x", "y", "z"]),
    ];
    for config in configs {
        let kind = config.kind;
        let mut chart = controller(config);
        let frames = chart.run_to_completion();
        assert!(frames <= 40, "{kind:?} took {frames} frames");
    }
}

#[test]
fn stale_tokens_are_ignored_after_resize() {
    let mut chart = controller(sales());
    let old = chart.frame_token();
    assert_eq!(chart.frame(old), FrameOutcome::Continue);
    let new = chart.resize(HostMetrics { container_width: 1000.0, window_height: 700.0 }).expect("resize");
    assert_ne!(old, new);
    assert_eq!(chart.frame(old), FrameOutcome::Stale);
    assert_eq!(chart.frame(new), FrameOutcome::Continue);
}

#[test]
fn percent_sizes_follow_the_host() {
    let mut chart = ChartController::new(
        sales(),
        RecordingSurface::new(1, 1),
        RecordingSurface::new(100, 25),
        Dimension::Percent(50.0),
        Dimension::Percent(50.0),
        HOST,
    )
    .expect("valid config");
    assert_eq!(animchart_core::DrawingContext::size(chart.main()), (400.0, 300.0));
    chart.resize(HostMetrics { container_width: 1000.0, window_height: 500.0 }).expect("resize");
    assert_eq!(animchart_core::DrawingContext::size(chart.main()), (500.0, 250.0));
}

#[test]
fn pointer_over_a_bar_resolves_that_bar() {
    let mut chart = controller(sales());
    chart.run_to_completion();
    for bar in bars(&chart) {
        let hover = chart.pointer_move(center(&bar)).expect("hover");
        assert_eq!(hover.message, animchart_core::format::format_plain(bar.value));
        assert!(hover.tooltip.visible);
    }
    let miss = chart.pointer_move(Point::new(2.0, 2.0)).expect("hover");
    assert_eq!(miss.message, "");
    assert!(!miss.tooltip.visible);
    assert_eq!(miss.cursor, Cursor::Default);
}

#[test]
fn hover_works_while_animating() {
    let mut chart = controller(sales());
    let token = chart.frame_token();
    chart.frame(token);
    let bar = bars(&chart)[2].clone();
    let hover = chart.pointer_move(center(&bar)).expect("hover");
    assert_eq!(hover.message, "30");
    assert_eq!(chart.phase(), Phase::Animating);
}

#[test]
fn click_invokes_the_handler_with_the_label() {
    let seen: Arc<Mutex<Vec<ClickValue>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let config = sales().with_click_handler(move |v| sink.lock().expect("lock").push(v.clone()));
    let mut chart = controller(config);
    chart.run_to_completion();

    let b = bars(&chart)[1].clone();
    assert_eq!(chart.pointer_move(center(&b)).expect("hover").cursor, Cursor::Pointer);
    let value = chart.click(center(&b));
    assert_eq!(value.as_ref().map(|v| v.label.as_str()), Some("B"));

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].category, 1);
    assert_eq!(seen[0].value, 20.0);

    assert!(chart.click(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn click_without_labels_reports_the_value() {
    let mut chart = controller(ChartConfig::new(ChartKind::Bar, vec![vec![10.0, 20.0]]));
    chart.run_to_completion();
    let b = bars(&chart)[0].clone();
    let value = chart.click(center(&b)).map(|v| v.label);
    assert_eq!(value.as_deref(), Some("10"));
    assert_eq!(chart.cursor(), Cursor::Default);
}

#[test]
fn invalid_config_is_rejected_before_rendering() {
    let config = ChartConfig::new(ChartKind::Bar, vec![vec![1.0, 2.0], vec![1.0]]);
    let err = ChartController::new(
        config,
        RecordingSurface::new(1, 1),
        RecordingSurface::new(1, 1),
        Dimension::Pixels(400.0),
        Dimension::Pixels(300.0),
        HOST,
    )
    .err();
    match err {
        Some(ChartError::Config(e)) => assert_eq!(e.field, "data"),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn zero_sized_surface_is_a_surface_error() {
    let err = ChartController::new(
        sales(),
        RecordingSurface::new(1, 1),
        RecordingSurface::new(1, 1),
        Dimension::Pixels(0.0),
        Dimension::Pixels(300.0),
        HOST,
    )
    .err();
    assert!(matches!(err, Some(ChartError::Surface(_))));
}

#[test]
fn rebuild_restarts_the_reveal() {
    let mut chart = controller(sales());
    chart.run_to_completion();
    let token = chart.rebuild(ChartConfig::new(ChartKind::Pie, vec![vec![1.0, 1.0, 2.0]])).expect("rebuild");
    assert_eq!(chart.phase(), Phase::Animating);
    assert_eq!(chart.frame(token), FrameOutcome::Continue);
    assert!(matches!(chart.final_scene(), Scene::Pie { .. }));
}

#[test]
fn failed_rebuild_keeps_the_running_chart() {
    let mut chart = controller(sales());
    chart.run_to_completion();
    let token = chart.frame_token();

    assert!(chart.rebuild(ChartConfig::new(ChartKind::Bar, vec![])).is_err());
    assert_eq!(chart.phase(), Phase::Idle);
    assert_eq!(chart.frame_token(), token);
    assert_eq!(chart.frame(token), FrameOutcome::Done);
    assert_eq!(chart.config().labels.as_deref().map(<[String]>::len), Some(3));
    assert!(matches!(chart.final_scene(), Scene::Bars { .. }));
}

#[test]
fn failed_resize_keeps_the_previous_size() {
    let mut chart = ChartController::new(
        sales(),
        RecordingSurface::new(1, 1),
        RecordingSurface::new(100, 25),
        Dimension::Percent(50.0),
        Dimension::Percent(50.0),
        HOST,
    )
    .expect("valid config");
    chart.run_to_completion();
    let token = chart.frame_token();

    let err = chart.resize(HostMetrics { container_width: 0.0, window_height: 500.0 }).err();
    assert!(matches!(err, Some(ChartError::Surface(_))));
    assert_eq!(chart.phase(), Phase::Idle);
    assert_eq!(chart.frame_token(), token);
    assert_eq!(animchart_core::DrawingContext::size(chart.main()), (400.0, 300.0));

    // the host that failed was not kept: a later good resize works from scratch
    let next = chart.resize(HostMetrics { container_width: 600.0, window_height: 400.0 }).expect("resize");
    assert_ne!(next, token);
    assert_eq!(animchart_core::DrawingContext::size(chart.main()), (300.0, 200.0));
}

#[test]
fn area_outline_is_stroked_lighter() {
    let config = ChartConfig::new(ChartKind::Area, vec![vec![5.0, 9.0, 2.0, 7.0]]);
    let light = config.series_colors()[0].luminance(1.3);
    let mut chart = controller(config);
    chart.run_to_completion();
    let outlines: Vec<_> = chart
        .main()
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Stroke { path, color, .. } if *color == light => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(outlines.len(), 1);
    assert!(outlines[0].contours.iter().all(|c| c.closed));
}
