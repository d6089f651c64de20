//=========================================================================
// Physics
//=========================================================================
//
// Per-node integration and brute-force pairwise AABB collisions.
//
// Flow per frame:
//   SceneTree::step_physics(root)       → PhysicsState::integrate
//   SceneTree::detect_collisions(root)  → collect_colliders → O(n²) pairs
//     → SceneTree::detect_collision(a, b)
//         → overlap_vector → enter / stay / exit hooks on both owners
//
//=========================================================================

//=== Module Declarations =================================================

mod collision;
mod physics_state;

//=== Public API ==========================================================

pub use collision::{overlap_vector, CollisionEvent};
pub use physics_state::PhysicsState;
