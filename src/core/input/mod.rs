//=========================================================================
// Input
//=========================================================================
//
// Input records consumed by the frame loop:
// - `InputEvent`: discrete events broadcast through the tree
// - `KeyboardState`: continuous held-key snapshot, broadcast after events
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod keyboard_state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use keyboard_state::KeyboardState;
