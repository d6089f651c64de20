//=========================================================================
// Collision Detection
//=========================================================================
//
// Discrete, per-tick AABB overlap with enter/stay/exit tracking.
//
// Overlap test for boxes A (self) and B (other), world space:
// ```text
//   dx1 = A.right  - B.left     dx2 = A.left - B.right
//   dy1 = A.bottom - B.top      dy2 = A.top  - B.bottom
//   overlap ⇔ dx1 > 0 ∧ dx2 < 0 ∧ dy1 > 0 ∧ dy2 < 0
// ```
// Touching edges (distance zero) are not an overlap. Each axis of the
// overlap vector independently takes whichever candidate has the smaller
// magnitude (ties pick the second one), so both axes are always filled.
//
// Transitions, tracked through the symmetric `colliders` sets:
// ```text
//   overlap, new      → enter(A), enter(B), stay(A), stay(B)
//   overlap, known    → stay(A), stay(B)
//   apart,   known    → exit(A), exit(B)
//   apart,   new      → nothing
// ```
// B always receives the negated vector.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneResult;
use crate::core::geometry::{Rect, Vector2D};
use crate::core::scene::{NodeId, SceneTree};

//=== CollisionEvent ======================================================

/// Payload of the enter and stay hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The other participant of the pair.
    pub collider: NodeId,

    /// Per-axis shallowest penetration, seen from the receiving node.
    pub overlap: Vector2D,
}

//=== Overlap Test ========================================================

/// Returns the overlap vector of two world-space boxes, or `None` when
/// they do not strictly overlap.
pub fn overlap_vector(this: &Rect, other: &Rect) -> Option<Vector2D> {
    let (this_min, this_max) = (this.min(), this.max());
    let (other_min, other_max) = (other.min(), other.max());

    let dx1 = this_max.x - other_min.x;
    let dx2 = this_min.x - other_max.x;
    let dy1 = this_max.y - other_min.y;
    let dy2 = this_min.y - other_max.y;

    if !(dx1 > 0.0 && dx2 < 0.0 && dy1 > 0.0 && dy2 < 0.0) {
        return None;
    }

    Some(Vector2D::new(
        if dx1.abs() < dx2.abs() { dx1 } else { dx2 },
        if dy1.abs() < dy2.abs() { dy1 } else { dy2 },
    ))
}

//=== SceneTree Collision Pass ============================================

impl SceneTree {
    /// Appends the id of every node under `root` that has physics
    /// attached, in pre-order.
    pub fn collect_colliders(&self, root: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.get(root) else {
            return;
        };
        if node.physics.is_some() {
            out.push(root);
        }
        for &child in node.children() {
            self.collect_colliders(child, out);
        }
    }

    /// Tests every unordered pair of physics nodes under `root` once.
    ///
    /// The collider list is collected before any hook runs; pairs whose
    /// nodes lost their physics or were freed by an earlier hook of the
    /// same pass are skipped.
    pub fn detect_collisions(&mut self, root: NodeId) {
        let mut colliders = Vec::new();
        self.collect_colliders(root, &mut colliders);

        for i in 0..colliders.len() {
            for j in (i + 1)..colliders.len() {
                if let Err(err) = self.detect_collision(colliders[i], colliders[j]) {
                    debug!("Skipping pair ({}, {}): {}", colliders[i], colliders[j], err);
                }
            }
        }
    }

    /// Tests one pair and dispatches the resulting transition hooks.
    ///
    /// Both nodes must have physics attached. Static/static pairs return
    /// immediately without touching the collider sets.
    pub fn detect_collision(&mut self, this: NodeId, other: NodeId) -> SceneResult<()> {
        let this_physics = self.physics(this)?;
        let other_physics = self.physics(other)?;
        if this_physics.still && other_physics.still {
            return Ok(());
        }
        let already_collided =
            this_physics.is_colliding_with(other) || other_physics.is_colliding_with(this);

        let this_box = Rect::new(self.global_position(this)?, self.node(this)?.frame.size);
        let other_box = Rect::new(self.global_position(other)?, self.node(other)?.frame.size);

        match (overlap_vector(&this_box, &other_box), already_collided) {
            (Some(overlap), false) => {
                self.physics_mut(this)?.colliders.insert(other);
                self.physics_mut(other)?.colliders.insert(this);
                debug!("Collision enter: {} <-> {}", this, other);

                let (to_this, to_other) = Self::event_pair(this, other, overlap);
                self.with_behavior(this, |b, tree| b.on_collision_enter(tree, this, &to_this));
                self.with_behavior(other, |b, tree| b.on_collision_enter(tree, other, &to_other));
                self.dispatch_stay(this, other, overlap);
            }
            (Some(overlap), true) => self.dispatch_stay(this, other, overlap),
            (None, true) => {
                self.physics_mut(this)?.colliders.remove(&other);
                self.physics_mut(other)?.colliders.remove(&this);
                debug!("Collision exit: {} <-> {}", this, other);

                self.with_behavior(this, |b, tree| b.on_collision_exit(tree, this, other));
                self.with_behavior(other, |b, tree| b.on_collision_exit(tree, other, this));
            }
            (None, false) => {}
        }
        Ok(())
    }

    fn dispatch_stay(&mut self, this: NodeId, other: NodeId, overlap: Vector2D) {
        let (to_this, to_other) = Self::event_pair(this, other, overlap);
        self.with_behavior(this, |b, tree| b.on_collision_stay(tree, this, &to_this));
        self.with_behavior(other, |b, tree| b.on_collision_stay(tree, other, &to_other));
    }

    fn event_pair(this: NodeId, other: NodeId, overlap: Vector2D) -> (CollisionEvent, CollisionEvent) {
        (
            CollisionEvent {
                collider: other,
                overlap,
            },
            CollisionEvent {
                collider: this,
                overlap: -overlap,
            },
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
