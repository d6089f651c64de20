//=========================================================================
// Frame-Strip Animation
//=========================================================================
//
// Cycles through a list of renderables at a fixed speed.
//
// Frame selection is a pure function of the frame clock:
// ```text
//   if now - start >= frames * speed { start = now }
//   frame = (now - start) / speed
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{SceneError, SceneResult};
use crate::core::render::{PixelRect, Renderable, TextureHandle};

//=== Animation ===========================================================

/// Sequence of `(texture, source region)` frames selected by elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<Renderable>,
    speed_ms: u64,
    start_tick: u64,
    turned_left: bool,
}

impl Animation {
    /// Creates an animation advancing one frame every `speed_ms`.
    pub fn new(speed_ms: u64, frames: Vec<Renderable>) -> SceneResult<Self> {
        if frames.is_empty() {
            return Err(SceneError::InvalidAnimation("no frames"));
        }
        if speed_ms == 0 {
            return Err(SceneError::InvalidAnimation("speed must be positive"));
        }
        Ok(Self {
            frames,
            speed_ms,
            start_tick: 0,
            turned_left: false,
        })
    }

    /// A one-frame animation (a still image).
    pub fn single(renderable: Renderable) -> Self {
        Self {
            frames: vec![renderable],
            speed_ms: 1,
            start_tick: 0,
            turned_left: false,
        }
    }

    /// Slices a vertical strip: frame `i` is `(0, i * frame_h, frame_w, frame_h)`.
    pub fn from_strip(
        texture: TextureHandle,
        frame_w: i32,
        frame_h: i32,
        frame_count: usize,
        speed_ms: u64,
    ) -> SceneResult<Self> {
        let frames = (0..frame_count)
            .map(|i| Renderable::region(texture, PixelRect::new(0, i as i32 * frame_h, frame_w, frame_h)))
            .collect();
        Self::new(speed_ms, frames)
    }

    /// Restarts the cycle at `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.start_tick = now_ms;
    }

    pub fn frames(&self) -> &[Renderable] {
        &self.frames
    }

    pub fn is_turned_left(&self) -> bool {
        self.turned_left
    }

    /// Faces the animation left (horizontally flipped) or right.
    ///
    /// Frames are only touched when the facing actually changes.
    pub fn turn_left(&mut self, to_the_left: bool) {
        if to_the_left == self.turned_left {
            return;
        }
        self.turned_left = to_the_left;
        for frame in &mut self.frames {
            frame.flip = to_the_left;
        }
    }

    /// Returns the frame to show at `now_ms`, restarting the cycle when a
    /// full period has elapsed.
    pub fn current(&mut self, now_ms: u64) -> Renderable {
        let period = self.frames.len() as u64 * self.speed_ms;
        if now_ms.saturating_sub(self.start_tick) >= period {
            self.start_tick = now_ms;
        }
        let index = (now_ms.saturating_sub(self.start_tick) / self.speed_ms) as usize;
        self.frames[index.min(self.frames.len() - 1)]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
