//=========================================================================
// Scene Tree
//=========================================================================
//
// Arena of scene nodes plus the recursive frame traversals.
//
// Architecture:
//   SceneTree
//     ├─ slots: Vec<Slot>      (generation + Option<SceneNode>)
//     └─ free:  Vec<u32>       (reusable slot indices)
//
// Nodes own their children by id and know their parent by id, so there
// is no ownership cycle. Callers must not create cycles with `add_child`.
//
// Traversals (all pre-order, self before children):
//   dispatch_event / dispatch_keyboard → NodeBehavior hooks
//   step_physics                       → PhysicsState::integrate
//   refresh_animation                  → Animation::current
//   render                             → Viewport::project → RenderBackend
//
// Any traversal that may run callbacks iterates a snapshot of the child
// list, since a callback is allowed to restructure the tree.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{SceneError, SceneResult};
use crate::core::geometry::Vector2D;
use crate::core::globals::{FrameContext, Settings};
use crate::core::input::{InputEvent, KeyboardState};
use crate::core::physics::PhysicsState;
use crate::core::render::{DrawCommand, RenderBackend, Viewport};

use super::{NodeBehavior, NodeId, SceneNode};

//=== Slot ================================================================

struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

//=== SceneTree ===========================================================

/// Owner of every scene node.
#[derive(Default)]
pub struct SceneTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl SceneTree {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Arena ------------------------------------------------------------

    /// Stores a node and returns its id. The node starts detached.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId::from_parts(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::from_parts(index, 0)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    /// Like [`get`](Self::get) but reports stale ids as an error.
    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.get(id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Iterates over every live node in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId::from_parts(index as u32, slot.generation), node))
        })
    }

    //--- Tree Maintenance -------------------------------------------------

    /// Attaches `child` under `parent` and sets its back-reference.
    ///
    /// A child that already has another parent is moved. Adding a child
    /// twice to the same parent is a no-op, so the child list never holds
    /// duplicates.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        debug_assert_ne!(parent, child, "a node cannot be its own child");
        self.node(parent)?;
        let previous = self.node(child)?.parent;

        match previous {
            Some(old) if old == parent => return Ok(()),
            Some(old) => {
                if let Some(old_parent) = self.get_mut(old) {
                    old_parent.children.retain(|&c| c != child);
                }
                debug!("Re-parenting {} from {} to {}", child, old, parent);
            }
            None => debug!("Attaching {} under {}", child, parent),
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Flags a node for removal at the next prune of one of its ancestors.
    pub fn mark_removed(&mut self, id: NodeId) -> SceneResult<()> {
        self.node_mut(id)?.removed = true;
        Ok(())
    }

    /// Detaches every descendant of `root` flagged `removed` from its
    /// parent. Returns the number of detached nodes.
    ///
    /// Pruning recurses through the entire subtree, so removable nodes at
    /// any depth are collected by a single call on the root. A detached
    /// node keeps its slot and its own children: it becomes a parentless
    /// root with the flag cleared, ids held elsewhere keep resolving, and
    /// `add_child` can attach it again. Use [`destroy`](Self::destroy) to
    /// free it.
    ///
    /// Detached subtrees leave the collision pass, so their ids are dropped
    /// from every other `colliders` set and their own sets are cleared. No
    /// exit event is sent for them.
    pub fn prune(&mut self, root: NodeId) -> usize {
        if !self.contains(root) {
            warn!("Prune requested on unknown node {}", root);
            return 0;
        }

        let mut detached = Vec::new();
        self.prune_children(root, &mut detached);
        if detached.is_empty() {
            return 0;
        }

        let mut gone = HashSet::new();
        for &id in &detached {
            self.collect_subtree(id, &mut gone);
        }
        self.forget_contacts(&gone);

        debug!("Pruned {} node(s) under {}", detached.len(), root);
        detached.len()
    }

    /// Frees `id` and its whole subtree from the arena. Returns the number
    /// of freed nodes.
    ///
    /// The node is unlinked from its parent first. Every id in the subtree
    /// goes stale and the slots are recycled by later inserts. Freed ids
    /// are dropped from every `colliders` set without an exit event.
    pub fn destroy(&mut self, id: NodeId) -> SceneResult<usize> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.unlink(parent, id);
        }

        let mut freed = Vec::new();
        self.free_subtree(id, &mut freed);
        let freed: HashSet<NodeId> = freed.into_iter().collect();
        self.forget_contacts(&freed);

        debug!("Destroyed {} node(s) rooted at {}", freed.len(), id);
        Ok(freed.len())
    }

    fn prune_children(&mut self, id: NodeId, detached: &mut Vec<NodeId>) {
        for child in self.children_snapshot(id) {
            match self.get(child).map(|c| c.removed) {
                Some(false) => self.prune_children(child, detached),
                Some(true) => {
                    self.unlink(id, child);
                    if let Some(node) = self.get_mut(child) {
                        node.removed = false;
                    }
                    detached.push(child);
                }
                None => {
                    if let Some(node) = self.get_mut(id) {
                        node.children.retain(|&c| c != child);
                    }
                }
            }
        }
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    fn collect_subtree(&self, id: NodeId, into: &mut HashSet<NodeId>) {
        let Some(node) = self.get(id) else {
            return;
        };
        into.insert(id);
        for &child in &node.children {
            self.collect_subtree(child, into);
        }
    }

    /// Drops `gone` from every contact set; members of `gone` forget all
    /// of their contacts.
    fn forget_contacts(&mut self, gone: &HashSet<NodeId>) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let id = NodeId::from_parts(index as u32, slot.generation);
            let Some(physics) = slot.node.as_mut().and_then(|n| n.physics.as_mut()) else {
                continue;
            };
            if gone.contains(&id) {
                physics.colliders.clear();
            } else {
                physics.colliders.retain(|other| !gone.contains(other));
            }
        }
    }

    fn free_subtree(&mut self, id: NodeId, freed: &mut Vec<NodeId>) {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return;
        };
        if slot.generation != id.generation() {
            return;
        }
        let Some(node) = slot.node.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.live -= 1;
        freed.push(id);

        for child in node.children {
            self.free_subtree(child, freed);
        }
    }

    fn children_snapshot(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    //--- Positions --------------------------------------------------------

    /// World position: the node's center plus every ancestor's center.
    ///
    /// Sums from the root down so the result is bit-identical to the basis
    /// accumulated by [`for_each_global`](Self::for_each_global) and
    /// [`render`](Self::render).
    pub fn global_position(&self, id: NodeId) -> SceneResult<Vector2D> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            chain.push(node.frame.center);
            current = node.parent;
        }

        let mut position = Vector2D::ZERO;
        for center in chain.into_iter().rev() {
            position = center + position;
        }
        Ok(position)
    }

    /// Top-down walk handing each node its accumulated world position.
    ///
    /// `basis` is the position of `root`'s parent space (zero for a root).
    pub fn for_each_global<F>(&self, root: NodeId, basis: Vector2D, visit: &mut F)
    where
        F: FnMut(NodeId, &SceneNode, Vector2D),
    {
        let Some(node) = self.get(root) else {
            return;
        };
        let global = node.frame.center + basis;
        visit(root, node, global);
        for &child in &node.children {
            self.for_each_global(child, global, visit);
        }
    }

    //--- Physics Access ---------------------------------------------------

    /// Physics state of `id`; a node without one is an error.
    pub fn physics(&self, id: NodeId) -> SceneResult<&PhysicsState> {
        self.node(id)?
            .physics
            .as_ref()
            .ok_or(SceneError::MissingPhysics(id))
    }

    pub fn physics_mut(&mut self, id: NodeId) -> SceneResult<&mut PhysicsState> {
        self.node_mut(id)?
            .physics
            .as_mut()
            .ok_or(SceneError::MissingPhysics(id))
    }

    pub fn velocity(&self, id: NodeId) -> SceneResult<Vector2D> {
        Ok(self.physics(id)?.velocity)
    }

    pub fn set_velocity(&mut self, id: NodeId, velocity: Vector2D) -> SceneResult<()> {
        self.physics_mut(id)?.velocity = velocity;
        Ok(())
    }

    /// Runs one integration tick on a single node.
    pub fn integrate(&mut self, id: NodeId) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        let physics = node.physics.as_mut().ok_or(SceneError::MissingPhysics(id))?;
        physics.integrate(&mut node.frame);
        Ok(())
    }

    //--- Behaviour Dispatch -----------------------------------------------

    /// Runs `hook` with the node's behaviour detached from its slot.
    ///
    /// The behaviour is put back afterwards unless the hook installed a new
    /// one or the node was freed in the meantime.
    pub(crate) fn with_behavior<F>(&mut self, id: NodeId, hook: F)
    where
        F: FnOnce(&mut dyn NodeBehavior, &mut SceneTree),
    {
        let Some(mut behavior) = self.get_mut(id).and_then(|n| n.behavior.take()) else {
            return;
        };

        hook(behavior.as_mut(), self);

        if let Some(node) = self.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
    }

    //--- Traversals -------------------------------------------------------

    /// Broadcasts a discrete event to `root` and every descendant.
    pub fn dispatch_event(&mut self, root: NodeId, event: &InputEvent, context: &mut FrameContext) {
        self.with_behavior(root, |behavior, tree| {
            behavior.on_event(tree, root, event, context)
        });
        for child in self.children_snapshot(root) {
            self.dispatch_event(child, event, context);
        }
    }

    /// Broadcasts the held-key snapshot to `root` and every descendant.
    pub fn dispatch_keyboard(
        &mut self,
        root: NodeId,
        state: &KeyboardState,
        context: &mut FrameContext,
    ) {
        self.with_behavior(root, |behavior, tree| {
            behavior.on_keyboard(tree, root, state, context)
        });
        for child in self.children_snapshot(root) {
            self.dispatch_keyboard(child, state, context);
        }
    }

    /// Integrates every node with physics attached, one tick each.
    pub fn step_physics(&mut self, root: NodeId) {
        let Some(node) = self.get_mut(root) else {
            return;
        };
        if let Some(physics) = node.physics.as_mut() {
            physics.integrate(&mut node.frame);
        }
        for child in self.children_snapshot(root) {
            self.step_physics(child);
        }
    }

    /// Stores each animated node's current frame as its renderable.
    pub fn refresh_animation(&mut self, root: NodeId, now_ms: u64) {
        let Some(node) = self.get_mut(root) else {
            return;
        };
        if let Some(animation) = node.animation.as_mut() {
            node.renderable = Some(animation.current(now_ms));
        }
        for child in self.children_snapshot(root) {
            self.refresh_animation(child, now_ms);
        }
    }

    /// Issues one draw call per visible node with a renderable.
    ///
    /// Hidden nodes still pass their position down to their children.
    pub fn render(
        &self,
        root: NodeId,
        basis: Vector2D,
        viewport: &Viewport,
        settings: &Settings,
        backend: &mut dyn RenderBackend,
    ) {
        self.for_each_global(root, basis, &mut |_: NodeId, node: &SceneNode, global: Vector2D| {
            if !node.visible {
                return;
            }
            if let Some(renderable) = node.renderable {
                backend.draw(&DrawCommand {
                    texture: renderable.texture,
                    dest: viewport.project(global, node.frame.size, settings),
                    source: renderable.source,
                    flip: renderable.flip,
                });
            }
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::animation::Animation;
    use crate::core::geometry::{Rect, Size};
    use crate::core::input::KeyCode;
    use crate::core::render::{PixelRect, RecordingBackend, Renderable, TextureHandle};

    //--- Test Helpers -----------------------------------------------------

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl NodeBehavior for Recorder {
        fn on_event(
            &mut self,
            _scene: &mut SceneTree,
            _this: NodeId,
            event: &InputEvent,
            _context: &mut FrameContext,
        ) {
            self.log.borrow_mut().push(format!("{}:{:?}", self.name, event));
        }

        fn on_keyboard(
            &mut self,
            _scene: &mut SceneTree,
            _this: NodeId,
            state: &KeyboardState,
            _context: &mut FrameContext,
        ) {
            let held = state.is_down(KeyCode::Space);
            self.log.borrow_mut().push(format!("{}:space={}", self.name, held));
        }
    }

    /// Marks its sibling removed and appends a fresh node when it sees an event.
    struct Mutator {
        victim: NodeId,
        parent: NodeId,
    }

    impl NodeBehavior for Mutator {
        fn on_event(
            &mut self,
            scene: &mut SceneTree,
            _this: NodeId,
            _event: &InputEvent,
            _context: &mut FrameContext,
        ) {
            scene.mark_removed(self.victim).unwrap();
            let extra = scene.insert(SceneNode::new(Rect::default()));
            scene.add_child(self.parent, extra).unwrap();
        }
    }

    /// Swaps itself for a `Recorder` on the first event it sees.
    struct Shapeshifter {
        log: Log,
    }

    impl NodeBehavior for Shapeshifter {
        fn on_event(
            &mut self,
            scene: &mut SceneTree,
            this: NodeId,
            _event: &InputEvent,
            _context: &mut FrameContext,
        ) {
            self.log.borrow_mut().push("shapeshifter".to_string());
            let previous = scene.node_mut(this).unwrap().set_behavior(Box::new(Recorder {
                name: "replacement",
                log: Rc::clone(&self.log),
            }));
            assert!(previous.is_none(), "own behaviour is detached while running");
        }
    }

    fn node_at(x: f32, y: f32) -> SceneNode {
        SceneNode::new(Rect::make(x, y, 10.0, 10.0))
    }

    fn recorder(name: &'static str, log: &Log) -> SceneNode {
        SceneNode::new(Rect::default()).with_behavior(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    //--- Arena ------------------------------------------------------------

    #[test]
    fn stale_ids_do_not_resolve_after_slot_reuse() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let child = tree.insert(node_at(1.0, 1.0));
        tree.add_child(root, child).unwrap();

        assert_eq!(tree.destroy(child).unwrap(), 1);
        assert!(tree.node(root).unwrap().children().is_empty());

        let reused = tree.insert(node_at(2.0, 2.0));
        assert_eq!(reused.index(), child.index(), "slot should be reused");
        assert!(tree.get(child).is_none(), "old id must be stale");
        assert_eq!(tree.node(child).unwrap_err(), SceneError::UnknownNode(child));
        assert_eq!(tree.len(), 2);
    }

    //--- Tree Maintenance -------------------------------------------------

    #[test]
    fn add_child_sets_parent_and_ignores_duplicates() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let child = tree.insert(node_at(1.0, 0.0));

        tree.add_child(root, child).unwrap();
        tree.add_child(root, child).unwrap();

        assert_eq!(tree.node(root).unwrap().children(), &[child]);
        assert_eq!(tree.node(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn add_child_moves_between_parents() {
        let mut tree = SceneTree::new();
        let a = tree.insert(node_at(0.0, 0.0));
        let b = tree.insert(node_at(0.0, 0.0));
        let child = tree.insert(node_at(0.0, 0.0));

        tree.add_child(a, child).unwrap();
        tree.add_child(b, child).unwrap();

        assert!(tree.node(a).unwrap().children().is_empty());
        assert_eq!(tree.node(b).unwrap().children(), &[child]);
        assert_eq!(tree.node(child).unwrap().parent(), Some(b));
    }

    #[test]
    fn prune_is_idempotent() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let keep = tree.insert(node_at(1.0, 0.0));
        let doomed = tree.insert(node_at(2.0, 0.0));
        tree.add_child(root, keep).unwrap();
        tree.add_child(root, doomed).unwrap();
        tree.mark_removed(doomed).unwrap();

        assert_eq!(tree.prune(root), 1);
        let after_once = tree.node(root).unwrap().children().to_vec();

        assert_eq!(tree.prune(root), 0);
        assert_eq!(tree.node(root).unwrap().children(), after_once.as_slice());
        assert_eq!(after_once, vec![keep]);
    }

    #[test]
    fn prune_reaches_grandchildren_and_keeps_subtrees() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let mid = tree.insert(node_at(0.0, 0.0));
        let deep = tree.insert(node_at(0.0, 0.0));
        let deep_child = tree.insert(node_at(0.0, 0.0));
        tree.add_child(root, mid).unwrap();
        tree.add_child(mid, deep).unwrap();
        tree.add_child(deep, deep_child).unwrap();

        tree.mark_removed(deep).unwrap();

        assert_eq!(tree.prune(root), 1);
        assert!(tree.node(mid).unwrap().children().is_empty());
        assert_eq!(tree.node(deep).unwrap().parent(), None);
        assert_eq!(tree.node(deep).unwrap().children(), &[deep_child]);
        assert_eq!(tree.node(deep_child).unwrap().parent(), Some(deep));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn pruned_node_stays_resolvable_and_can_be_reattached() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let player = tree.insert(node_at(5.0, 5.0));
        let camera = tree.insert(node_at(1.0, 0.0));
        tree.add_child(root, player).unwrap();
        tree.add_child(player, camera).unwrap();

        tree.mark_removed(player).unwrap();
        tree.prune(root);

        assert!(tree.contains(player));
        assert!(!tree.node(player).unwrap().removed, "detaching clears the flag");
        assert_eq!(tree.global_position(camera).unwrap(), Vector2D::new(6.0, 5.0));

        tree.add_child(root, player).unwrap();
        assert_eq!(tree.prune(root), 0, "re-attached node is not pruned again");
        assert_eq!(tree.node(root).unwrap().children(), &[player]);
        assert_eq!(tree.node(player).unwrap().parent(), Some(root));
    }

    #[test]
    fn prune_drops_detached_ids_from_colliders() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let body = tree.insert(node_at(0.0, 0.0).with_physics(PhysicsState::dynamic()));
        let pickup = tree.insert(node_at(0.0, 0.0).with_physics(PhysicsState::new()));
        tree.add_child(root, body).unwrap();
        tree.add_child(root, pickup).unwrap();
        tree.physics_mut(body).unwrap().colliders.insert(pickup);
        tree.physics_mut(pickup).unwrap().colliders.insert(body);

        tree.mark_removed(pickup).unwrap();
        tree.prune(root);

        assert!(tree.physics(body).unwrap().colliders().is_empty());
        assert!(tree.physics(pickup).unwrap().colliders().is_empty());
    }

    #[test]
    fn destroy_frees_the_whole_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0).with_physics(PhysicsState::dynamic()));
        let branch = tree.insert(node_at(0.0, 0.0).with_physics(PhysicsState::new()));
        let leaf = tree.insert(node_at(0.0, 0.0));
        tree.add_child(root, branch).unwrap();
        tree.add_child(branch, leaf).unwrap();
        tree.physics_mut(root).unwrap().colliders.insert(branch);

        assert_eq!(tree.destroy(branch).unwrap(), 2);

        assert!(!tree.contains(branch));
        assert!(!tree.contains(leaf));
        assert!(tree.node(root).unwrap().children().is_empty());
        assert!(tree.physics(root).unwrap().colliders().is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.destroy(branch), Err(SceneError::UnknownNode(branch)));
    }

    //--- Positions --------------------------------------------------------

    #[test]
    fn global_position_sums_ancestor_centers() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(10.0, 20.0));
        let child = tree.insert(node_at(1.0, 2.0));
        let grandchild = tree.insert(node_at(-3.0, 0.5));
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        assert_eq!(tree.global_position(root).unwrap(), Vector2D::new(10.0, 20.0));
        assert_eq!(tree.global_position(grandchild).unwrap(), Vector2D::new(8.0, 22.5));
    }

    #[test]
    fn parent_walk_matches_top_down_accumulation() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.1, -0.3));
        let mut parent = root;
        for depth in 0..6 {
            let child = tree.insert(node_at(0.7 * depth as f32, 1.0 / 3.0));
            tree.add_child(parent, child).unwrap();
            let sibling = tree.insert(node_at(-0.2, 0.9));
            tree.add_child(parent, sibling).unwrap();
            parent = child;
        }

        let mut visited = 0;
        tree.for_each_global(root, Vector2D::ZERO, &mut |id: NodeId, _: &SceneNode, accumulated: Vector2D| {
            visited += 1;
            assert_eq!(
                tree.global_position(id).unwrap(),
                accumulated,
                "walk and accumulation disagree for {}",
                id
            );
        });
        assert_eq!(visited, 13);
    }

    //--- Physics Access ---------------------------------------------------

    #[test]
    fn physics_operations_fail_fast_without_state() {
        let mut tree = SceneTree::new();
        let plain = tree.insert(node_at(0.0, 0.0));

        assert_eq!(tree.velocity(plain), Err(SceneError::MissingPhysics(plain)));
        assert_eq!(tree.integrate(plain), Err(SceneError::MissingPhysics(plain)));
        assert_eq!(
            tree.set_velocity(plain, Vector2D::new(1.0, 0.0)),
            Err(SceneError::MissingPhysics(plain))
        );
    }

    #[test]
    fn step_physics_moves_descendants_only_when_attached() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let plain = tree.insert(node_at(0.0, 0.0));
        let mover = tree.insert(node_at(0.0, 0.0).with_physics(PhysicsState::dynamic()));
        tree.add_child(root, plain).unwrap();
        tree.add_child(plain, mover).unwrap();
        tree.set_velocity(mover, Vector2D::new(2.0, -1.0)).unwrap();

        tree.step_physics(root);
        tree.step_physics(root);

        assert_eq!(tree.node(mover).unwrap().frame.center, Vector2D::new(4.0, -2.0));
        assert_eq!(tree.node(plain).unwrap().frame.center, Vector2D::ZERO);
    }

    //--- Dispatch ---------------------------------------------------------

    #[test]
    fn events_reach_every_node_parent_first() {
        let log: Log = Rc::default();
        let mut tree = SceneTree::new();
        let root = tree.insert(recorder("root", &log));
        let child = tree.insert(recorder("child", &log));
        let grandchild = tree.insert(recorder("grandchild", &log));
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        let mut context = FrameContext::default();
        tree.dispatch_event(root, &InputEvent::Quit, &mut context);

        assert_eq!(
            *log.borrow(),
            vec!["root:Quit", "child:Quit", "grandchild:Quit"]
        );
    }

    #[test]
    fn keyboard_snapshot_is_broadcast() {
        let log: Log = Rc::default();
        let mut tree = SceneTree::new();
        let root = tree.insert(recorder("root", &log));
        let child = tree.insert(recorder("child", &log));
        tree.add_child(root, child).unwrap();

        let state = KeyboardState::with_keys([KeyCode::Space]);
        tree.dispatch_keyboard(root, &state, &mut FrameContext::default());

        assert_eq!(*log.borrow(), vec!["root:space=true", "child:space=true"]);
    }

    #[test]
    fn dispatch_survives_tree_mutation_in_handlers() {
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let victim = tree.insert(node_at(0.0, 0.0));
        let mutator = tree.insert(SceneNode::new(Rect::default()).with_behavior(Mutator {
            victim,
            parent: root,
        }));
        tree.add_child(root, mutator).unwrap();
        tree.add_child(root, victim).unwrap();

        tree.dispatch_event(root, &InputEvent::Unidentified, &mut FrameContext::default());

        assert!(tree.node(victim).unwrap().removed);
        assert_eq!(tree.node(root).unwrap().children().len(), 3);
        assert!(tree.node(mutator).unwrap().has_behavior(), "behaviour must be restored");
    }

    #[test]
    fn behaviour_installed_by_its_own_hook_replaces_it() {
        let log: Log = Rc::default();
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::new(Rect::default()).with_behavior(Shapeshifter {
            log: Rc::clone(&log),
        }));

        let mut context = FrameContext::default();
        tree.dispatch_event(node, &InputEvent::Unidentified, &mut context);
        tree.dispatch_event(node, &InputEvent::Quit, &mut context);

        assert_eq!(*log.borrow(), vec!["shapeshifter", "replacement:Quit"]);
        assert!(tree.node(node).unwrap().has_behavior());
    }

    //--- Animation & Render -----------------------------------------------

    #[test]
    fn refresh_animation_stores_current_frame() {
        let sheet = TextureHandle(1);
        let mut tree = SceneTree::new();
        let root = tree.insert(node_at(0.0, 0.0));
        let animated = tree.insert(
            node_at(0.0, 0.0).with_animation(Animation::from_strip(sheet, 8, 8, 4, 10).unwrap()),
        );
        tree.add_child(root, animated).unwrap();

        tree.refresh_animation(root, 25);

        let renderable = tree.node(animated).unwrap().renderable.unwrap();
        assert_eq!(renderable.source, Some(PixelRect::new(0, 16, 8, 8)));
        assert!(tree.node(root).unwrap().renderable.is_none());
    }

    #[test]
    fn render_skips_hidden_nodes_but_keeps_their_children() {
        let texture = TextureHandle(3);
        let settings = Settings::new("test", 100, 100);
        let mut tree = SceneTree::new();
        let root = tree.insert(
            SceneNode::new(Rect::make(10.0, 10.0, 20.0, 20.0))
                .with_renderable(Renderable::full(texture))
                .hidden(),
        );
        let child = tree.insert(
            SceneNode::new(Rect::make(5.0, 0.0, 10.0, 10.0)).with_renderable(Renderable::full(texture)),
        );
        tree.add_child(root, child).unwrap();

        let viewport = Viewport::new(Vector2D::ZERO, Size::new(100.0, 100.0)).unwrap();
        let mut backend = RecordingBackend::default();
        tree.render(root, Vector2D::ZERO, &viewport, &settings, &mut backend);

        // child world center (15, 10): top-left (10, 5) + camera half (50, 50)
        assert_eq!(backend.commands.len(), 1);
        assert_eq!(backend.commands[0].dest, PixelRect::new(60, 55, 10, 10));
        assert_eq!(backend.commands[0].source, None);
        assert!(!backend.commands[0].flip);
    }
}
