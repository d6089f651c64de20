//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_scene::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{CameraSource, Engine, EngineBuilder, RenderLayer};

// Errors
pub use crate::core::error::{SceneError, SceneResult};

// Geometry
pub use crate::core::geometry::{Rect, Size, Vector2D};

// Per-frame context and settings
pub use crate::core::globals::{FrameContext, Settings};

// Input
pub use crate::core::input::{InputEvent, KeyCode, KeyboardState, Modifiers, MouseButton};

// Platform channel
pub use crate::core::platform_bridge::PlatformEvent;

// Rendering and animation
pub use crate::core::animation::Animation;
pub use crate::core::render::{
    DrawCommand, PixelRect, RecordingBackend, RenderBackend, Renderable, TextureHandle,
};

// Scene graph and physics
pub use crate::core::physics::{CollisionEvent, PhysicsState};
pub use crate::core::scene::{NodeBehavior, NodeId, SceneNode, SceneTree};
