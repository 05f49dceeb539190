// File: crates/animchart-core/src/hit.rs
// Summary: Resolves a logical pointer position against full-reveal scene geometry into a data point.

use tracing::trace;

use crate::config::{ChartConfig, ClickValue};
use crate::format::{expand_message, format_plain, format_value, MessageValues};
use crate::geometry::Point;
use crate::render::{category_total, LineSeriesGeometry, Scene};

/// Which kind of shape was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitLayer {
    Bar,
    /// Line chart point, or an overlay point on a bar chart.
    Line,
    Slice,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub layer: HitLayer,
    pub series: usize,
    pub category: usize,
    pub value: f64,
    /// Pie only.
    pub percent: Option<f64>,
}

/// Point-in-path queries against the geometry a finished render drew.
pub struct HitTester<'a> {
    config: &'a ChartConfig,
    scene: &'a Scene,
}

impl<'a> HitTester<'a> {
    pub fn new(config: &'a ChartConfig, scene: &'a Scene) -> Self { Self { config, scene } }

    /// Topmost shape under `p` (logical frame). Shapes painted later win;
    /// overlay points win over bars.
    pub fn locate(&self, p: Point) -> Option<Hit> {
        let hit = match self.scene {
            Scene::Bars { bars, overlay } => line_hit(overlay, p).or_else(|| {
                bars.iter().rev().find(|b| b.contains(p)).map(|b| Hit {
                    layer: HitLayer::Bar,
                    series: b.series,
                    category: b.category,
                    value: b.value,
                    percent: None,
                })
            }),
            Scene::Lines { series } => line_hit(series, p),
            Scene::Pie { slices, layout, .. } => layout.hit(slices, p).map(|s| Hit {
                layer: HitLayer::Slice,
                series: 0,
                category: s.index,
                value: s.value,
                percent: Some(s.percent),
            }),
        };
        trace!(x = p.x, y = p.y, ?hit, "hit query");
        hit
    }

    /// Tooltip text for a hit.
    pub fn message(&self, hit: &Hit) -> String {
        let pattern = self.config.tooltip_pattern.as_ref();
        let overlay = hit.layer == HitLayer::Line && matches!(self.scene, Scene::Bars { .. });
        let template = if overlay { "#val" } else { self.config.message_template() };
        let total = match self.scene {
            Scene::Pie { total, .. } => *total,
            _ => category_total(self.config, hit.category),
        };
        let values = MessageValues {
            value: format_value(hit.value, pattern),
            total: Some(format_value(total, pattern)),
            percent: hit.percent.map(format_plain),
        };
        expand_message(template, &values)
    }

    /// Click payload: the category label, or the formatted value when the
    /// chart has no labels.
    pub fn click_value(&self, hit: &Hit) -> ClickValue {
        let label = match self.config.label(hit.category) {
            "" => format_value(hit.value, self.config.tooltip_pattern.as_ref()),
            l => l.to_string(),
        };
        ClickValue { label, value: hit.value, series: hit.series, category: hit.category }
    }
}

fn line_hit(series: &[LineSeriesGeometry], p: Point) -> Option<Hit> {
    series.iter().rev().find_map(|g| {
        g.hit(p).map(|i| {
            let pt = &g.points[i];
            Hit { layer: HitLayer::Line, series: g.series, category: pt.category, value: pt.value, percent: None }
        })
    })
}
