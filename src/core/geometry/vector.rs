//=========================================================================
// Vector2D
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

//=== Vector2D ============================================================

/// A 2D vector in world units.
///
/// Positions, velocities and overlap vectors all use this type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//--- Operators -----------------------------------------------------------

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -4.0);

        assert_eq!(a + b, Vector2D::new(4.0, -2.0));
        assert_eq!(a - b, Vector2D::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2D::new(1.5, -2.0));
        assert_eq!(-a, Vector2D::new(-1.0, -2.0));

        // Operands are untouched.
        assert_eq!(a, Vector2D::new(1.0, 2.0));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut v = Vector2D::ZERO;
        v += Vector2D::new(0.5, 1.5);
        v += Vector2D::new(0.5, 1.5);
        assert_eq!(v, Vector2D::new(1.0, 3.0));
    }
}
