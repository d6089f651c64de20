//=========================================================================
// Size
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Div, Mul};

//=== Size ================================================================

/// Width and height in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half extents, used to go from a center to a box edge.
    pub fn half(self) -> Self {
        self / 2.0
    }

    /// Returns `true` when both dimensions are finite and strictly positive.
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

//--- Operators -----------------------------------------------------------

impl Mul<f32> for Size {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.width * s, self.height * s)
    }
}

impl Div<f32> for Size {
    type Output = Self;

    fn div(self, s: f32) -> Self {
        Self::new(self.width / s, self.height / s)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
