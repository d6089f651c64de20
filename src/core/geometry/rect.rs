//=========================================================================
// Rect
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Size, Vector2D};

//=== Rect ================================================================

/// Axis-aligned box described by its center and size.
///
/// A node's `frame` is expressed in its parent's coordinate space. The
/// rectangle stores copies of its inputs, so later changes to the caller's
/// vector or size never leak into it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub center: Vector2D,
    pub size: Size,
}

impl Rect {
    pub const fn new(center: Vector2D, size: Size) -> Self {
        Self { center, size }
    }

    /// Builds a rectangle from raw center coordinates and dimensions.
    pub const fn make(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vector2D::new(x, y), Size::new(width, height))
    }

    /// Top-left corner (smallest x and y).
    pub fn min(&self) -> Vector2D {
        Vector2D::new(
            self.center.x - self.size.width / 2.0,
            self.center.y - self.size.height / 2.0,
        )
    }

    /// Bottom-right corner (largest x and y).
    pub fn max(&self) -> Vector2D {
        Vector2D::new(
            self.center.x + self.size.width / 2.0,
            self.center.y + self.size.height / 2.0,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
