//=========================================================================
// Scene Graph
//=========================================================================
//
// Arena-backed node tree with recursive broadcast traversals.
//
// Architecture:
//   SceneTree
//     ├─ slots: Vec<Slot>          (generation + Option<SceneNode>)
//     └─ free:  Vec<u32>           (recycled slot indices)
//
//   SceneNode
//     ├─ frame: Rect               (local to parent)
//     ├─ parent / children         (NodeId links, no ownership cycles)
//     └─ physics / renderable / animation / behavior
//
// Flow (per frame):
//   dispatch_event → dispatch_keyboard → prune → step_physics
//     → detect_collisions → refresh_animation → render
//
//=========================================================================

//=== Module Declarations =================================================

mod behavior;
mod node;
mod node_id;
mod tree;

//=== Public API ==========================================================

pub use behavior::NodeBehavior;
pub use node::SceneNode;
pub use node_id::NodeId;
pub use tree::SceneTree;
