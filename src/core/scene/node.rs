//=========================================================================
// Scene Node
//=========================================================================
//
// Data stored in one arena slot. Tree links (parent, children) are ids
// and are maintained by `SceneTree`; everything else is plain data the
// game may edit freely.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::animation::Animation;
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsState;
use crate::core::render::Renderable;

use super::{NodeBehavior, NodeId};

//=== SceneNode ===========================================================

/// A positioned element of the scene tree.
///
/// `frame` is relative to the parent. `removed` is a lazy-deletion mark:
/// the node keeps taking part in the frame until an ancestor prunes it,
/// which detaches it without freeing it.
pub struct SceneNode {
    pub frame: Rect,
    pub visible: bool,
    pub removed: bool,
    pub physics: Option<PhysicsState>,
    pub renderable: Option<Renderable>,
    pub animation: Option<Animation>,
    pub(crate) behavior: Option<Box<dyn NodeBehavior>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Creates a visible, detached node with no attachments.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            visible: true,
            removed: false,
            physics: None,
            renderable: None,
            animation: None,
            behavior: None,
            parent: None,
            children: Vec::new(),
        }
    }

    //--- Builder-style attachments ----------------------------------------

    pub fn with_physics(mut self, physics: PhysicsState) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_behavior<B>(mut self, behavior: B) -> Self
    where
        B: NodeBehavior + 'static,
    {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Replaces the behaviour, returning the previous one.
    pub fn set_behavior(&mut self, behavior: Box<dyn NodeBehavior>) -> Option<Box<dyn NodeBehavior>> {
        self.behavior.replace(behavior)
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("frame", &self.frame)
            .field("visible", &self.visible)
            .field("removed", &self.removed)
            .field("physics", &self.physics)
            .field("renderable", &self.renderable)
            .field("has_animation", &self.animation.is_some())
            .field("has_behavior", &self.behavior.is_some())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}
