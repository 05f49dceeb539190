// File: crates/animchart-demo/src/main.rs
// Summary: Demo loads category CSV data, animates each chart kind on Skia surfaces and writes frames, hover and click results to PNGs.

use anyhow::{Context, Result};
use animchart_core::{
    ChartConfig, ChartController, ChartKind, Dimension, FrameOutcome, HostMetrics, Point, Scene, TextBlock,
};
use animchart_render_skia::{skia_controller, SkiaSurface};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HOST: HostMetrics = HostMetrics { container_width: 1280.0, window_height: 800.0 };

/// Category data from CSV: first column labels, one series per further column.
struct Table {
    labels: Vec<String>,
    names: Vec<String>,
    series: Vec<Vec<f64>>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "animchart_core=debug,animchart_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Accept CSV (and optional JSON config) from CLI or fall back to the bundled sample
    let mut args = std::env::args().skip(1);
    let csv_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data/quarterly.csv"));
    let config_path = args.next().map(PathBuf::from);

    let table = load_table(&csv_path).with_context(|| format!("failed to load CSV '{}'", csv_path.display()))?;
    info!(path = %csv_path.display(), categories = table.labels.len(), series = table.series.len(), "loaded table");
    if table.series.is_empty() || table.labels.is_empty() {
        anyhow::bail!("no data loaded; expected a label column followed by numeric columns");
    }

    let configs = match &config_path {
        Some(path) => vec![(stem(path), load_config(path, &table)?)],
        None => gallery(&table),
    };

    let out_dir = PathBuf::from("target/out");
    for (name, config) in configs {
        render_chart(&name, config, &out_dir).with_context(|| format!("rendering '{name}'"))?;
    }
    Ok(())
}

fn stem(path: &Path) -> String { path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart").to_string() }

fn load_table(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let names: Vec<String> = rdr.headers()?.iter().skip(1).map(str::to_string).collect();
    let mut table = Table { labels: Vec::new(), series: vec![Vec::new(); names.len()], names };

    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(label) = rec.get(0) else { continue };
        let values: Option<Vec<f64>> = (1..=table.names.len()).map(|i| rec.get(i)?.parse::<f64>().ok()).collect();
        match values {
            Some(values) => {
                table.labels.push(label.to_string());
                for (series, v) in table.series.iter_mut().zip(values) {
                    series.push(v);
                }
            }
            None => warn!(row = row + 2, "skipping row with missing or non-numeric values"),
        }
    }
    Ok(table)
}

/// JSON config from disk; data, labels and legend come from the table
/// unless the file sets them.
fn load_config(path: &Path, table: &Table) -> Result<ChartConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut config: ChartConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    if config.data.is_empty() {
        config.data = match config.kind {
            ChartKind::Pie => table.series.iter().take(1).cloned().collect(),
            _ => table.series.clone(),
        };
    }
    if config.labels.is_none() {
        config.labels = Some(table.labels.clone());
    }
    if config.legend.is_none() && config.kind != ChartKind::Pie {
        config.legend = Some(table.names.clone());
    }
    Ok(config)
}

fn gallery(table: &Table) -> Vec<(String, ChartConfig)> {
    let base = |kind: ChartKind, style: &str, title: &str| {
        let mut c = ChartConfig::new(kind, table.series.clone()).with_style(style).with_labels(table.labels.clone());
        c.legend = Some(table.names.clone());
        c.title = Some(TextBlock::new(title));
        c
    };

    let mut overlay = base(ChartKind::Bar, "parallelepiped", "Regions with running mean");
    let mean: Vec<f64> = (0..table.labels.len())
        .map(|i| table.series.iter().map(|s| s[i]).sum::<f64>() / table.series.len() as f64)
        .collect();
    overlay.line_data = Some(vec![mean]);
    overlay.line_legend = Some(vec!["mean".to_string()]);

    let mut pie = ChartConfig::new(ChartKind::Pie, table.series.iter().take(1).cloned().collect())
        .with_labels(table.labels.clone());
    pie.title = Some(TextBlock::new(format!("{} share", table.names.first().map_or("", String::as_str))));

    let mut hbar = base(ChartKind::HBar, "dome", "Regions (horizontal)");
    hbar.label_orientation = animchart_core::LabelOrientation::Diagonal;

    vec![
        ("bar_glass".to_string(), base(ChartKind::Bar, "glass", "Regions")),
        ("stacked_cylinder".to_string(), base(ChartKind::StackedBar, "cylinder", "Regions stacked")),
        ("hbar_dome".to_string(), hbar),
        ("bar_overlay".to_string(), overlay),
        ("line_stardot".to_string(), base(ChartKind::Line, "stardot", "Trend")),
        ("area".to_string(), base(ChartKind::Area, "normal", "Trend (area)")),
        ("pie".to_string(), pie),
    ]
}

fn render_chart(name: &str, config: ChartConfig, out_dir: &Path) -> Result<()> {
    let config = config.with_click_handler(|v| info!(label = %v.label, value = v.value, series = v.series, "clicked"));
    let mut chart = skia_controller(config, Dimension::Pixels(800.0), Dimension::Percent(62.5), HOST)?;

    let token = chart.frame_token();
    let mut frame = 0u32;
    loop {
        let outcome = chart.frame(token);
        frame += 1;
        // first frame and every tenth while growing
        if frame == 1 || frame % 10 == 0 {
            chart.main_mut().write_png(out_dir.join(format!("{name}_frame{frame:02}.png")))?;
        }
        if outcome != FrameOutcome::Continue {
            break;
        }
    }
    let final_png = out_dir.join(format!("{name}.png"));
    chart.main_mut().write_png(&final_png)?;
    info!(chart = name, frames = frame, path = %final_png.display(), "reveal finished");

    simulate_pointer(name, &mut chart, out_dir)
}

/// Hover and click over the first shape of the finished chart.
fn simulate_pointer(name: &str, chart: &mut ChartController<SkiaSurface>, out_dir: &Path) -> Result<()> {
    let Some(target) = first_target(chart) else {
        warn!(chart = name, "nothing to point at");
        return Ok(());
    };
    let hover = chart.pointer_move(target)?;
    info!(chart = name, x = target.x, y = target.y, message = %hover.message, cursor = ?hover.cursor, "hover");
    if hover.tooltip.visible {
        chart.tooltip_mut().write_png(out_dir.join(format!("{name}_tooltip.png")))?;
    }
    if chart.click(target).is_none() {
        warn!(chart = name, "click resolved nothing");
    }
    chart.pointer_leave();
    Ok(())
}

fn first_target(chart: &ChartController<SkiaSurface>) -> Option<Point> {
    let logical = match chart.final_scene() {
        Scene::Bars { bars, .. } => bars.first().map(|b| Point::new(b.slot.center_x(), (b.slot.top + b.slot.base) / 2.0)),
        Scene::Lines { series } => series.first()?.points.first().map(|p| p.center),
        Scene::Pie { slices, layout, .. } => slices
            .first()
            .map(|s| layout.center.offset(layout.radius / 2.0 * s.mid_angle.cos(), layout.radius / 2.0 * s.mid_angle.sin())),
    }?;
    Some(chart.state().layout.orientation().to_device(logical))
}
