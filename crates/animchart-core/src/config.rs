// File: crates/animchart-core/src/config.rs
// Summary: Typed chart configuration, enumerated options with lenient parsing, and validation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::color::{distinct_colors, Rgba};
use crate::error::ConfigError;
use crate::text::FontSpec;
use crate::types::{DEFAULT_ALPHA, DEFAULT_TICK_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ChartKind {
    Bar,
    HBar,
    StackedBar,
    HStackedBar,
    #[default]
    Line,
    Area,
    Pie,
}

/// The three chart families with distinct geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartFamily {
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub fn family(self) -> ChartFamily {
        match self {
            ChartKind::Bar | ChartKind::HBar | ChartKind::StackedBar | ChartKind::HStackedBar => ChartFamily::Bar,
            ChartKind::Line | ChartKind::Area => ChartFamily::Line,
            ChartKind::Pie => ChartFamily::Pie,
        }
    }
    pub fn is_stacked(self) -> bool { matches!(self, ChartKind::StackedBar | ChartKind::HStackedBar) }
    pub fn is_horizontal(self) -> bool { matches!(self, ChartKind::HBar | ChartKind::HStackedBar) }
}

impl From<String> for ChartKind {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => ChartKind::Bar,
            "hbar" => ChartKind::HBar,
            "stackedbar" => ChartKind::StackedBar,
            "hstackedbar" => ChartKind::HStackedBar,
            "area" => ChartKind::Area,
            "pie" => ChartKind::Pie,
            _ => ChartKind::Line,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BarStyle {
    #[default]
    Normal,
    Glass,
    Cylinder,
    Dome,
    Parallelepiped,
}

impl BarStyle {
    /// Unknown names fall back to `Normal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "glass" => BarStyle::Glass,
            "cylinder" => BarStyle::Cylinder,
            "dome" => BarStyle::Dome,
            "parallelepiped" => BarStyle::Parallelepiped,
            _ => BarStyle::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    #[default]
    Normal,
    SolidDot,
    HollowDot,
    AnchorDot,
    BowDot,
    StarDot,
}

impl LineStyle {
    /// Unknown names fall back to `Normal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "soliddot" => LineStyle::SolidDot,
            "hollowdot" => LineStyle::HollowDot,
            "anchordot" => LineStyle::AnchorDot,
            "bowdot" => LineStyle::BowDot,
            "stardot" => LineStyle::StarDot,
            _ => LineStyle::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LabelOrientation {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    HalfDiagonal,
}

impl LabelOrientation {
    /// Rotation angle of angled labels, radians.
    pub fn angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};
        match self {
            LabelOrientation::Horizontal => 0.0,
            LabelOrientation::Vertical => FRAC_PI_2,
            LabelOrientation::Diagonal => FRAC_PI_4,
            LabelOrientation::HalfDiagonal => FRAC_PI_8,
        }
    }
}

impl From<String> for LabelOrientation {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => LabelOrientation::Vertical,
            "diagonal" => LabelOrientation::Diagonal,
            "halfdiagonal" => LabelOrientation::HalfDiagonal,
            _ => LabelOrientation::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TitleAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl From<String> for TitleAlignment {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => TitleAlignment::Left,
            "right" => TitleAlignment::Right,
            _ => TitleAlignment::Center,
        }
    }
}

/// Title, x-legend or y-legend text with its font and color.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    pub text: String,
    pub font: FontSpec,
    pub color: Rgba,
    pub alignment: TitleAlignment,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self { text: String::new(), font: FontSpec::default(), color: Rgba::BLACK, alignment: TitleAlignment::Center }
    }
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self { Self { text: text.into(), ..Self::default() } }
}

/// Font and color for category (`xData`) or tick (`yData`) labels.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelFont {
    pub font: FontSpec,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipPattern {
    pub decimals: u32,
    pub decimal_separator: String,
    pub thousand_separator: String,
}

impl Default for TooltipPattern {
    fn default() -> Self { Self { decimals: 2, decimal_separator: ".".into(), thousand_separator: ",".into() } }
}

/// What a click resolved to.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickValue {
    /// Category label, or the formatted value when the chart has no labels.
    pub label: String,
    pub value: f64,
    pub series: usize,
    pub category: usize,
}

/// Host callback invoked with the clicked value.
#[derive(Clone)]
pub struct ClickHandler(Arc<dyn Fn(&ClickValue) + Send + Sync>);

impl ClickHandler {
    pub fn new(f: impl Fn(&ClickValue) + Send + Sync + 'static) -> Self { Self(Arc::new(f)) }
    pub fn call(&self, value: &ClickValue) { (self.0)(value) }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("ClickHandler(..)") }
}

/// Requested surface extent: absolute pixels or a percentage of the host.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawDimension")]
pub enum Dimension {
    Pixels(f32),
    Percent(f32),
}

impl Dimension {
    pub fn resolve(&self, reference: f32) -> f32 {
        match *self {
            Dimension::Pixels(px) => px,
            Dimension::Percent(pct) => reference * pct / 100.0,
        }
    }
}

impl FromStr for Dimension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || ConfigError::new("dimension", format!("expected pixels or NN%, got '{s}'"));
        if let Some(pct) = s.strip_suffix('%') {
            return pct.trim().parse::<f32>().map(Dimension::Percent).map_err(|_| bad());
        }
        s.strip_suffix("px").unwrap_or(s).trim().parse::<f32>().map(Dimension::Pixels).map_err(|_| bad())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f32),
    Text(String),
}

impl TryFrom<RawDimension> for Dimension {
    type Error = ConfigError;
    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        match raw {
            RawDimension::Number(px) => Ok(Dimension::Pixels(px)),
            RawDimension::Text(s) => s.parse(),
        }
    }
}

/// Host sizes percentages resolve against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostMetrics {
    pub container_width: f32,
    pub window_height: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub style: String,
    pub data: Vec<Vec<f64>>,
    pub line_data: Option<Vec<Vec<f64>>>,
    pub labels: Option<Vec<String>>,
    pub label_orientation: LabelOrientation,
    pub color: Option<Vec<Rgba>>,
    pub line_color: Option<Vec<Rgba>>,
    pub legend: Option<Vec<String>>,
    pub line_legend: Option<Vec<String>>,
    pub alpha: f32,
    pub background: Rgba,
    pub show_grid_x: bool,
    pub show_grid_y: bool,
    pub color_grid_x: Rgba,
    pub color_grid_y: Rgba,
    #[serde(rename = "colorXaxis")]
    pub color_x_axis: Rgba,
    #[serde(rename = "colorYaxis")]
    pub color_y_axis: Rgba,
    pub message: Option<String>,
    pub show_ticks: bool,
    pub tick_count: usize,
    pub title: Option<TextBlock>,
    pub x_data: Option<LabelFont>,
    pub y_data: Option<LabelFont>,
    pub x_legend: Option<TextBlock>,
    pub y_legend: Option<TextBlock>,
    pub tooltip_pattern: Option<TooltipPattern>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            style: "normal".into(),
            data: Vec::new(),
            line_data: None,
            labels: None,
            label_orientation: LabelOrientation::default(),
            color: None,
            line_color: None,
            legend: None,
            line_legend: None,
            alpha: DEFAULT_ALPHA,
            background: Rgba::WHITE,
            show_grid_x: true,
            show_grid_y: true,
            color_grid_x: Rgba::BLACK,
            color_grid_y: Rgba::BLACK,
            color_x_axis: Rgba::BLACK,
            color_y_axis: Rgba::BLACK,
            message: None,
            show_ticks: true,
            tick_count: DEFAULT_TICK_COUNT,
            title: None,
            x_data: None,
            y_data: None,
            x_legend: None,
            y_legend: None,
            tooltip_pattern: None,
            on_click: None,
        }
    }
}

impl ChartConfig {
    pub fn new(kind: ChartKind, data: Vec<Vec<f64>>) -> Self { Self { kind, data, ..Self::default() } }

    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = style.to_string();
        self
    }

    pub fn with_click_handler(mut self, f: impl Fn(&ClickValue) + Send + Sync + 'static) -> Self {
        self.on_click = Some(ClickHandler::new(f));
        self
    }

    pub fn bar_style(&self) -> BarStyle { BarStyle::parse(&self.style) }
    pub fn line_style(&self) -> LineStyle { LineStyle::parse(&self.style) }

    pub fn series_count(&self) -> usize { self.data.len() }
    pub fn category_count(&self) -> usize { self.data.first().map_or(0, Vec::len) }
    pub fn overlay(&self) -> &[Vec<f64>] { self.line_data.as_deref().unwrap_or(&[]) }

    pub fn label(&self, category: usize) -> &str {
        self.labels.as_ref().and_then(|l| l.get(category)).map_or("", String::as_str)
    }

    /// Template for hover messages when none is configured.
    pub fn message_template(&self) -> &str {
        if let Some(m) = &self.message {
            return m;
        }
        match self.kind {
            ChartKind::StackedBar | ChartKind::HStackedBar => "#val / #total",
            ChartKind::Pie => "#val / #total<br>#percent% of 100%",
            _ => "#val",
        }
    }

    /// Per-series colors (per slice for pie), filling gaps with generated hues.
    pub fn series_colors(&self) -> Vec<Rgba> {
        let wanted = match self.kind {
            ChartKind::Pie => self.category_count(),
            _ => self.series_count(),
        };
        extend_colors(self.color.as_deref(), wanted)
    }

    pub fn line_colors(&self) -> Vec<Rgba> { extend_colors(self.line_color.as_deref(), self.overlay().len()) }

    pub fn x_label_font(&self) -> FontSpec { self.x_data.as_ref().map(|d| d.font.clone()).unwrap_or_default() }
    pub fn x_label_color(&self) -> Rgba { self.x_data.as_ref().map_or(Rgba::BLACK, |d| d.color) }
    pub fn y_label_font(&self) -> FontSpec { self.y_data.as_ref().map(|d| d.font.clone()).unwrap_or_default() }
    pub fn y_label_color(&self) -> Rgba { self.y_data.as_ref().map_or(Rgba::BLACK, |d| d.color) }

    /// Fail fast on malformed input before any rendering starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = self.data.first().ok_or_else(|| ConfigError::new("data", "at least one series is required"))?;
        if first.is_empty() {
            return Err(ConfigError::new("data", "series must not be empty"));
        }
        let n = first.len();
        if let Some(k) = self.data.iter().position(|s| s.len() != n) {
            return Err(ConfigError::new("data", format!("series {k} has {} values, expected {n}", self.data[k].len())));
        }
        if self.data.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ConfigError::new("data", "values must be finite"));
        }
        if let Some(labels) = &self.labels {
            if labels.len() != n {
                return Err(ConfigError::new("labels", format!("{} labels for {n} categories", labels.len())));
            }
        }
        if let Some(line_data) = &self.line_data {
            if let Some(k) = line_data.iter().position(|s| s.len() != n) {
                return Err(ConfigError::new("lineData", format!("line series {k} has {} values, expected {n}", line_data[k].len())));
            }
            if line_data.iter().flatten().any(|v| !v.is_finite()) {
                return Err(ConfigError::new("lineData", "values must be finite"));
            }
        }
        if self.tick_count < 2 {
            return Err(ConfigError::new("tickCount", format!("must be at least 2, got {}", self.tick_count)));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::new("alpha", format!("must be within [0, 1], got {}", self.alpha)));
        }
        match self.kind {
            ChartKind::Pie => {
                if first.iter().any(|v| *v < 0.0) {
                    return Err(ConfigError::new("data", "pie values must not be negative"));
                }
            }
            _ => {
                if let Some(colors) = &self.color {
                    if colors.len() < self.series_count() {
                        return Err(ConfigError::new("color", format!("{} colors for {} series", colors.len(), self.series_count())));
                    }
                }
            }
        }
        Ok(())
    }
}

fn extend_colors(given: Option<&[Rgba]>, wanted: usize) -> Vec<Rgba> {
    let mut colors = given.map(<[Rgba]>::to_vec).unwrap_or_default();
    if colors.len() < wanted {
        let missing = wanted - colors.len();
        colors.extend(distinct_colors(missing));
    }
    colors
}
