// File: crates/animchart-core/src/types.rs
// Summary: Shared constants (defaults, spacing, animation pacing).

pub const DEFAULT_TICK_COUNT: usize = 5;
pub const DEFAULT_ALPHA: f32 = 0.8;

/// Reveal counter start value, in pixels (radius units for pie).
pub const REVEAL_SEED: f32 = 6.0;
/// Frames the reveal takes to sweep the full plot extent.
pub const REVEAL_FRAMES: f32 = 30.0;

/// Glass corner radius; shrinks to the narrow value on thin bars.
pub const CORNER_RADIUS: f32 = 6.0;
pub const NARROW_CORNER_RADIUS: f32 = 2.0;

pub const LEGEND_ROW_HEIGHT: f32 = 14.0;
pub const LEGEND_ROW_RESERVE: f32 = 20.0;
pub const LEGEND_CHIP_PADDING: f32 = 24.0;
pub const LEGEND_PREFIX: &str = "---- ";

pub const TOOLTIP_LINE_HEIGHT: f32 = 12.0;
pub const TOOLTIP_GAP: f32 = 40.0;

/// Pie leader: radial run, then horizontal bend.
pub const PIE_LEADER: f32 = 20.0;
pub const PIE_LEADER_BEND: f32 = 5.0;
