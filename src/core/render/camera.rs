//=========================================================================
// Camera Projection
//=========================================================================
//
// Maps world-space rectangles into window pixels through the visible
// world window (the camera).
//
// Transform for a node at world position `p` with size `s`, viewed by a
// camera at `c` with size `cs` in a `W x H` window:
// ```text
//   rel     = p - s/2 - c + cs/2
//   dest.x  = W * rel.x / cs.width      dest.w = W * s.width  / cs.width
//   dest.y  = H * rel.y / cs.height     dest.h = H * s.height / cs.height
// ```
// Results are rounded half to even. No culling: off-screen nodes still
// produce a rectangle.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{SceneError, SceneResult};
use crate::core::geometry::{Size, Vector2D};
use crate::core::globals::Settings;

use super::PixelRect;

//=== Viewport ============================================================

/// A validated camera window: world-space center plus strictly positive size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    position: Vector2D,
    size: Size,
}

impl Viewport {
    /// Validates the camera size; zero, negative or non-finite sizes are
    /// rejected instead of dividing by them later.
    pub fn new(position: Vector2D, size: Size) -> SceneResult<Self> {
        if !size.is_positive() {
            return Err(SceneError::InvalidCamera {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self { position, size })
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Projects a world-space box into window pixels.
    pub fn project(&self, world_center: Vector2D, size: Size, settings: &Settings) -> PixelRect {
        let half = size.half();
        let camera_half = self.size.half();
        let relative = Vector2D::new(
            world_center.x - half.width - self.position.x + camera_half.width,
            world_center.y - half.height - self.position.y + camera_half.height,
        );

        let window_w = settings.window_width as f32;
        let window_h = settings.window_height as f32;

        PixelRect {
            x: (window_w * (relative.x / self.size.width)).round_ties_even() as i32,
            y: (window_h * (relative.y / self.size.height)).round_ties_even() as i32,
            w: (window_w * (size.width / self.size.width)).round_ties_even() as i32,
            h: (window_h * (size.height / self.size.height)).round_ties_even() as i32,
        }
    }
}

/// One-shot form of [`Viewport::project`] that validates the camera first.
pub fn project(
    world_center: Vector2D,
    size: Size,
    camera_position: Vector2D,
    camera_size: Size,
    settings: &Settings,
) -> SceneResult<PixelRect> {
    Ok(Viewport::new(camera_position, camera_size)?.project(world_center, size, settings))
}

//=========================================================================
// Unit Tests
//=========================================================================
