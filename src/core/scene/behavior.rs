//=========================================================================
// Node Behaviour
//=========================================================================
//
// Capability interface through which game entities react to the frame
// loop. Every hook defaults to a no-op, so an entity implements only what
// it cares about.
//
// Hooks receive the whole tree plus their own id, which lets them mutate
// other nodes (mark a consumable removed, push a body out of a wall).
// While a hook runs, its own behaviour is detached from the node.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::FrameContext;
use crate::core::input::{InputEvent, KeyboardState};
use crate::core::physics::CollisionEvent;

use super::{NodeId, SceneTree};

//=== NodeBehavior ========================================================

/// Per-entity callbacks invoked by the tree traversals.
///
/// # Minimal Implementation
///
/// ```rust
/// use aetheric_scene::prelude::*;
///
/// struct QuitOnQ;
///
/// impl NodeBehavior for QuitOnQ {
///     fn on_event(
///         &mut self,
///         _scene: &mut SceneTree,
///         _this: NodeId,
///         event: &InputEvent,
///         context: &mut FrameContext,
///     ) {
///         if event.pressed_key() == Some(KeyCode::KeyQ) {
///             context.request_quit();
///         }
///     }
/// }
/// ```
pub trait NodeBehavior {
    /// Called once per discrete input event, before the node's children.
    fn on_event(
        &mut self,
        _scene: &mut SceneTree,
        _this: NodeId,
        _event: &InputEvent,
        _context: &mut FrameContext,
    ) {
    }

    /// Called once per frame with the held-key snapshot, before children.
    fn on_keyboard(
        &mut self,
        _scene: &mut SceneTree,
        _this: NodeId,
        _state: &KeyboardState,
        _context: &mut FrameContext,
    ) {
    }

    /// First tick of an overlap. Always followed by `on_collision_stay`.
    fn on_collision_enter(&mut self, _scene: &mut SceneTree, _this: NodeId, _collision: &CollisionEvent) {}

    /// Every tick the overlap holds, the entering tick included.
    fn on_collision_stay(&mut self, _scene: &mut SceneTree, _this: NodeId, _collision: &CollisionEvent) {}

    /// First tick after an overlap ended.
    fn on_collision_exit(&mut self, _scene: &mut SceneTree, _this: NodeId, _collider: NodeId) {}
}
