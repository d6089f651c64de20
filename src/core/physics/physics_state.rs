//=========================================================================
// Physics State
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Rect, Vector2D};
use crate::core::scene::NodeId;

//=== PhysicsState ========================================================

/// Physics component attached 1:1 to a scene node.
///
/// A `still` body is static: pairs where both sides are still are never
/// tested. `colliders` holds the nodes currently overlapping this one and
/// is kept symmetric by the collision pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhysicsState {
    pub velocity: Vector2D,
    pub gravity: bool,
    pub still: bool,
    pub gravity_force: f32,
    pub(crate) colliders: HashSet<NodeId>,
}

impl PhysicsState {
    /// A static body: no gravity, no velocity.
    pub fn new() -> Self {
        Self {
            still: true,
            ..Self::default()
        }
    }

    /// A moving body.
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Enables gravity with the given per-tick acceleration.
    pub fn with_gravity(mut self, gravity_force: f32) -> Self {
        self.gravity = true;
        self.gravity_force = gravity_force;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    /// Nodes currently overlapping this body.
    pub fn colliders(&self) -> &HashSet<NodeId> {
        &self.colliders
    }

    pub fn is_colliding_with(&self, other: NodeId) -> bool {
        self.colliders.contains(&other)
    }

    /// One simulation tick: gravity accelerates, velocity moves the frame.
    ///
    /// There is no time delta; one call is one tick. Velocity is applied
    /// whether or not gravity is enabled.
    pub fn integrate(&mut self, frame: &mut Rect) {
        if self.gravity {
            self.velocity.y += self.gravity_force;
        }
        frame.center += self.velocity;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
