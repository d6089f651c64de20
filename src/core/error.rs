//=========================================================================
// Scene Errors
//=========================================================================
//
// Error type shared by the scene tree, physics and render projection.
//
// Collision detection itself never fails: every error here is either a
// stale handle or a precondition the caller was expected to check.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::NodeId;

//=== SceneError ==========================================================

/// Errors reported by scene-graph operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The id does not refer to a live node (stale, pruned, or foreign).
    UnknownNode(NodeId),

    /// A physics-dependent operation was invoked on a node that has no
    /// attached `PhysicsState`.
    MissingPhysics(NodeId),

    /// Camera dimensions must be strictly positive and finite.
    InvalidCamera { width: f32, height: f32 },

    /// Frame-strip animation built from an empty strip or a zero speed.
    InvalidAnimation(&'static str),
}

/// Convenience alias used throughout the crate.
pub type SceneResult<T> = Result<T, SceneError>;

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "Unknown scene node {}", id),
            Self::MissingPhysics(id) => {
                write!(f, "Scene node {} has no physics state attached", id)
            }
            Self::InvalidCamera { width, height } => write!(
                f,
                "Camera size must be strictly positive, got {}x{}",
                width, height
            ),
            Self::InvalidAnimation(reason) => write!(f, "Invalid animation: {}", reason),
        }
    }
}

impl std::error::Error for SceneError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_node_id() {
        let id = NodeId::from_parts(3, 1);
        let message = SceneError::MissingPhysics(id).to_string();
        assert!(message.contains("3v1"), "unexpected message: {}", message);
    }

    #[test]
    fn display_invalid_camera() {
        let message = SceneError::InvalidCamera { width: 0.0, height: 10.0 }.to_string();
        assert_eq!(message, "Camera size must be strictly positive, got 0x10");
    }
}
