// File: crates/animchart-core/src/animation.rs
// Summary: Frame-driven reveal counter that grows the drawn envelope until every shape is complete.

use tracing::{debug, trace};

use crate::types::{REVEAL_FRAMES, REVEAL_SEED};

/// Monotonic reveal amount `H`, in pixels (radius units for pie).
///
/// Each frame draws every shape clamped to `H`; the frame that needed no
/// clamping reports stopped and the animator stops asking for frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealAnimator {
    amount: f32,
    increment: f32,
    frames: u32,
    stopped: bool,
}

impl RevealAnimator {
    /// `extent` is the distance the reveal must cover; the step is sized so
    /// the sweep takes about [`REVEAL_FRAMES`] frames whatever the data.
    pub fn new(extent: f32) -> Self {
        Self { amount: REVEAL_SEED, increment: 1.0 + extent.max(0.0) / REVEAL_FRAMES, frames: 0, stopped: false }
    }

    pub fn amount(&self) -> f32 { self.amount }
    pub fn frames(&self) -> u32 { self.frames }
    pub fn is_stopped(&self) -> bool { self.stopped }

    /// Clamp the envelope, e.g. pie radius.
    pub fn clamp_to(&mut self, max: f32) {
        if self.amount > max {
            self.amount = max;
        }
    }

    /// Record the outcome of the frame just drawn at `amount()`.
    /// Returns `true` while more frames are needed.
    pub fn finish_frame(&mut self, complete: bool) -> bool {
        self.frames += 1;
        if complete {
            if !self.stopped {
                debug!(frames = self.frames, amount = self.amount, "reveal complete");
            }
            self.stopped = true;
            return false;
        }
        self.amount += self.increment;
        trace!(frame = self.frames, amount = self.amount, "reveal advanced");
        true
    }
}
