// File: crates/animchart-core/src/scale.rs
// Summary: "Nice number" tick-range computation and the value-to-pixel transform.

use tracing::debug;

use crate::config::{ChartConfig, ChartFamily};

/// Nearest of `{1, 2, 5, 10} x 10^k` to `x`.
///
/// `round = true` picks the closest (thresholds 1.5 / 3 / 7); `round = false`
/// picks the next value at or above `x` (thresholds 1 / 2 / 5).
pub fn nice_number(x: f64, round: bool) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return 1.0;
    }
    let mut exponent = x.log10().floor() as i32;
    let mut fraction = x / 10f64.powi(exponent);
    if fraction < 1.0 {
        exponent -= 1;
        fraction = x / 10f64.powi(exponent);
    } else if fraction >= 10.0 {
        exponent += 1;
        fraction = x / 10f64.powi(exponent);
    }

    let nice = if round {
        if fraction < 1.5 { 1.0 } else if fraction < 3.0 { 2.0 } else if fraction < 7.0 { 5.0 } else { 10.0 }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powi(exponent)
}

/// Value-axis range with `tick_count` equal steps between two nice bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    pub tick_count: usize,
}

impl ScaleRange {
    /// Tick values from the top of the axis down, `tick_count + 1` of them.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.tick_count).map(move |i| self.max_value - i as f64 * self.step)
    }
}

pub fn compute_tick_range(min: f64, max: f64, tick_count: usize) -> ScaleRange {
    let max = if min == max { min + 1.0 } else { max };
    let tick_count = tick_count.max(2);

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (tick_count - 1) as f64, true);
    let mut min_value = (min / spacing).floor() * spacing;
    let max_value = (max / spacing).ceil() * spacing;
    // keep the lowest data point off the axis line
    if min_value == min && min != 0.0 {
        min_value -= spacing;
    }

    ScaleRange { min_value, max_value, step: (max_value - min_value) / tick_count as f64, tick_count }
}

/// Data extent feeding the scale: series and overlay values pooled, stacked
/// charts use category sums for the top. Bar families always include zero.
pub fn pooled_extent(config: &ChartConfig) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in config.data.iter().flatten().chain(config.overlay().iter().flatten()) {
        min = min.min(*v);
        max = max.max(*v);
    }
    if config.kind.is_stacked() {
        for i in 0..config.category_count() {
            let sum: f64 = config.data.iter().filter_map(|s| s.get(i)).sum();
            max = max.max(sum);
        }
    }
    if config.kind.family() == ChartFamily::Bar {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    (min, max)
}

pub fn scale_for(config: &ChartConfig) -> ScaleRange {
    let (min, max) = pooled_extent(config);
    let range = compute_tick_range(min, max, config.tick_count);
    debug!(min, max, lo = range.min_value, hi = range.max_value, step = range.step, "scale range");
    range
}

/// Maps values onto the logical y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    /// Logical y of the x axis line.
    pub baseline: f32,
    /// Pixels between two ticks.
    pub tick_step: f32,
    pub range: ScaleRange,
}

impl ValueScale {
    pub fn new(baseline: f32, tick_step: f32, range: ScaleRange) -> Self { Self { baseline, tick_step, range } }

    /// Pixel height of `v` above the axis line.
    #[inline]
    pub fn extent(&self, v: f64) -> f32 {
        ((v - self.range.min_value) * self.tick_step as f64 / self.range.step) as f32
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 { self.baseline - self.extent(v) }

    #[inline]
    pub fn from_px(&self, py: f32) -> f64 {
        self.range.min_value + (self.baseline - py) as f64 * self.range.step / self.tick_step as f64
    }
}
