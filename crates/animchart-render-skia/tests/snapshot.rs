// File: crates/animchart-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic fully-revealed bar chart to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use animchart_core::{ChartConfig, ChartKind, Dimension, HostMetrics};
use animchart_render_skia::skia_controller;

fn render_bytes() -> Vec<u8> {
    let mut config = ChartConfig::new(ChartKind::Bar, vec![vec![3.0, 7.0, 5.0], vec![4.0, 2.0, 6.0]]).with_style("glass");
    // no text: avoid font variance across platforms
    config.show_ticks = false;
    let mut chart = skia_controller(
        config,
        Dimension::Pixels(240.0),
        Dimension::Pixels(160.0),
        HostMetrics { container_width: 240.0, window_height: 160.0 },
    )
    .expect("chart");
    chart.run_to_completion();
    chart.main_mut().encode_png().expect("encode png")
}

#[test]
fn golden_glass_bars() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("glass_bars.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
        // Skip without failing on first run
    }
}

#[test]
fn rendering_is_deterministic() {
    let a = image::load_from_memory(&render_bytes()).expect("decode").to_rgba8();
    let b = image::load_from_memory(&render_bytes()).expect("decode").to_rgba8();
    assert_eq!(a.as_raw(), b.as_raw());
}
