//=========================================================================
// Geometry
//=========================================================================
//
// Plain 2D value types shared by every subsystem.
//
// All types are `Copy`: arithmetic always yields a fresh value and a
// `Rect` holds its own copies of the vector and size it was built from.
//
//=========================================================================

//=== Module Declarations =================================================

mod rect;
mod size;
mod vector;

//=== Public API ==========================================================

pub use rect::Rect;
pub use size::Size;
pub use vector::Vector2D;
