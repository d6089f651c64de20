//=========================================================================
// Aetheric Scene Engine
//
// Main entry point and frame-loop driver.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Frame Loop]
//         │                          │
//         ├─ with_title()            ├─ SceneTree
//         ├─ with_window_size()      ├─ FrameContext
//         └─ with_channel_capacity() ├─ EventCollector ◄── Sender<PlatformEvent>
//                                    └─ RenderLayers
// ```
//
// One frame (`step`), strictly in this order:
// ```text
//   collect → events → keyboard → prune → physics → collisions
//     → animation → clear → render layers → present
// ```
// Everything after `collect` runs on the simulation root (the root of
// the first layer); the remaining layers are only rendered.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use crossbeam_channel::{bounded, Sender};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::SceneResult;
use crate::core::geometry::{Size, Vector2D};
use crate::core::globals::{FrameContext, Settings};
use crate::core::input::{InputEvent, KeyboardState};
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::render::{RenderBackend, Viewport};
use crate::core::scene::{NodeId, SceneTree};

//=== Render Layers =======================================================

/// Where a layer's camera window comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraSource {
    /// Camera is a node: its world position and frame size, read each frame.
    Follow(NodeId),

    /// Camera sits at the world origin with a fixed size (HUD overlays).
    Fixed(Size),
}

/// A subtree rendered through one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLayer {
    pub root: NodeId,
    pub camera: CameraSource,
}

impl RenderLayer {
    /// World layer following a camera node.
    pub fn world(root: NodeId, camera: NodeId) -> Self {
        Self {
            root,
            camera: CameraSource::Follow(camera),
        }
    }

    /// Screen-fixed overlay layer.
    pub fn overlay(root: NodeId, camera_size: Size) -> Self {
        Self {
            root,
            camera: CameraSource::Fixed(camera_size),
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: `"Aetheric"`
/// - **Window size**: 800 x 600
/// - **Channel capacity**: 128 platform messages
///
/// # Examples
///
/// ```
/// use aetheric_scene::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_title("Platformer")
///     .with_window_size(1280, 720)
///     .build();
///
/// assert_eq!(engine.context().settings.window_width, 1280);
/// ```
pub struct EngineBuilder {
    settings: Settings,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            channel_capacity: 128,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    /// Sets the window size the projection scales to, in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.settings.window_width = width;
        self.settings.window_height = height;
        self
    }

    /// Sets the channel capacity for platform → engine communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine with an empty scene tree and no layers.
    pub fn build(self) -> Engine {
        info!(
            "Building engine ('{}', {}x{}, channel: {})",
            self.settings.title,
            self.settings.window_width,
            self.settings.window_height,
            self.channel_capacity
        );

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            tree: SceneTree::new(),
            context: FrameContext::new(self.settings),
            collector: EventCollector::new(receiver),
            sender,
            layers: Vec::new(),
            started: Instant::now(),
            frames: 0,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Single-threaded scene engine runtime.
///
/// Create via [`EngineBuilder`], populate the tree in [`Engine::init`],
/// then drive it with [`Engine::run`] or one [`Engine::step`] at a time.
pub struct Engine {
    tree: SceneTree,
    context: FrameContext,
    collector: EventCollector,
    sender: Sender<PlatformEvent>,
    layers: Vec<RenderLayer>,
    started: Instant,
    frames: u64,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Builds the scene before execution.
    ///
    /// The closure populates the tree and returns the layers to render,
    /// simulation layer first.
    ///
    /// # Examples
    ///
    /// ```
    /// use aetheric_scene::prelude::*;
    ///
    /// let engine = EngineBuilder::new().build().init(|tree| {
    ///     let world = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 100.0, 100.0)));
    ///     let camera = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 40.0, 30.0)));
    ///     tree.add_child(world, camera).unwrap();
    ///     vec![RenderLayer::world(world, camera)]
    /// });
    ///
    /// assert_eq!(engine.tree().len(), 2);
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneTree) -> Vec<RenderLayer>,
    {
        info!("Initializing scene");

        let layers = init_fn(&mut self.tree);
        self.layers.extend(layers);

        info!(
            "Scene initialization complete ({} nodes, {} layers)",
            self.tree.len(),
            self.layers.len()
        );
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SceneTree {
        &mut self.tree
    }

    pub fn context(&self) -> &FrameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut FrameContext {
        &mut self.context
    }

    /// Held-key snapshot as of the last collected frame.
    pub fn keyboard(&self) -> &KeyboardState {
        self.collector.keyboard()
    }

    pub fn add_layer(&mut self, layer: RenderLayer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[RenderLayer] {
        &self.layers
    }

    /// Root of the first layer; the frame's simulation runs on it.
    pub fn simulation_root(&self) -> Option<NodeId> {
        self.layers.first().map(|layer| layer.root)
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Sender half of the platform channel.
    ///
    /// The engine keeps its own sender, so dropping clones never
    /// disconnects the channel.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    //--- Execution --------------------------------------------------------

    /// Runs frames until a handler or the platform requests quit.
    ///
    /// The flag is checked once at the top of each iteration; the frame in
    /// progress always completes.
    ///
    /// # Errors
    ///
    /// Stops at the first frame that fails (e.g. a camera with a
    /// non-positive size) and returns its error.
    pub fn run(&mut self, backend: &mut dyn RenderBackend) -> SceneResult<()> {
        info!("Starting frame loop");

        while !self.context.quit_requested() {
            self.step(backend)?;
        }

        info!("Frame loop exited after {} frames", self.frames);
        Ok(())
    }

    /// Runs one frame, reading the animation clock from the engine's
    /// monotonic start time.
    pub fn step(&mut self, backend: &mut dyn RenderBackend) -> SceneResult<()> {
        let elapsed = self.started.elapsed().as_millis();
        let ticks_ms = u64::try_from(elapsed).unwrap_or(u64::MAX);
        self.step_at(backend, ticks_ms)
    }

    /// Runs one frame with an explicit animation clock.
    pub fn step_at(&mut self, backend: &mut dyn RenderBackend, ticks_ms: u64) -> SceneResult<()> {
        self.context.ticks_ms = ticks_ms;

        //--- Step 1: Gather platform events -------------------------------
        self.collector.collect_frame();
        let events = self.collector.take_events();

        if let Some(root) = self.simulation_root() {
            //--- Step 2: Discrete events ----------------------------------
            for event in &events {
                self.dispatch(root, event);
            }

            //--- Step 3: Continuous keyboard state ------------------------
            self.tree
                .dispatch_keyboard(root, self.collector.keyboard(), &mut self.context);

            //--- Step 4: Simulation ---------------------------------------
            self.tree.prune(root);
            self.tree.step_physics(root);
            self.tree.detect_collisions(root);
            self.tree.refresh_animation(root, ticks_ms);
        } else {
            for event in &events {
                if *event == InputEvent::Quit {
                    self.context.request_quit();
                }
            }
        }

        //--- Step 5: Render -----------------------------------------------
        backend.clear();
        for layer in &self.layers {
            let viewport = self.viewport(layer.camera)?;
            self.tree.render(
                layer.root,
                Vector2D::ZERO,
                &viewport,
                &self.context.settings,
                backend,
            );
        }
        backend.present();

        self.frames += 1;
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn dispatch(&mut self, root: NodeId, event: &InputEvent) {
        if *event == InputEvent::Quit {
            self.context.request_quit();
        }
        debug!("Dispatching {:?}", event);
        self.tree.dispatch_event(root, event, &mut self.context);
    }

    fn viewport(&self, camera: CameraSource) -> SceneResult<Viewport> {
        match camera {
            CameraSource::Follow(node) => Viewport::new(
                self.tree.global_position(node)?,
                self.tree.node(node)?.frame.size,
            ),
            CameraSource::Fixed(size) => Viewport::new(Vector2D::ZERO, size),
        }
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

    use crate::core::error::SceneError;
    use crate::core::geometry::Rect;
    use crate::core::input::KeyCode;
    use crate::core::physics::{CollisionEvent, PhysicsState};
    use crate::core::render::{PixelRect, RecordingBackend, Renderable, TextureHandle};
    use crate::core::scene::{NodeBehavior, SceneNode};

    //--- Test Helpers -----------------------------------------------------

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Records every hook it receives, tagged with a name.
    struct Tracer {
        name: &'static str,
        trace: Trace,
    }

    impl NodeBehavior for Tracer {
        fn on_event(
            &mut self,
            _scene: &mut SceneTree,
            _this: NodeId,
            event: &InputEvent,
            context: &mut FrameContext,
        ) {
            if event.pressed_key() == Some(KeyCode::KeyQ) {
                context.request_quit();
            }
            self.trace.borrow_mut().push(format!("{}:event", self.name));
        }

        fn on_keyboard(
            &mut self,
            _scene: &mut SceneTree,
            _this: NodeId,
            _state: &KeyboardState,
            _context: &mut FrameContext,
        ) {
            self.trace.borrow_mut().push(format!("{}:keyboard", self.name));
        }

        fn on_collision_enter(&mut self, _scene: &mut SceneTree, _this: NodeId, _c: &CollisionEvent) {
            self.trace.borrow_mut().push(format!("{}:enter", self.name));
        }
    }

    fn tracer(name: &'static str, trace: &Trace) -> Tracer {
        Tracer {
            name,
            trace: Rc::clone(trace),
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.settings, Settings::default());
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_window_size() {
        let builder = EngineBuilder::new().with_window_size(1024, 768);
        assert_eq!(builder.settings.window_width, 1024);
        assert_eq!(builder.settings.window_height, 768);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_title("Test")
            .with_window_size(320, 240)
            .with_channel_capacity(4)
            .build();

        assert_eq!(engine.context().settings, Settings::new("Test", 320, 240));
        assert!(engine.tree().is_empty());
        assert!(engine.layers().is_empty());
    }

    //=====================================================================
    // Frame Tests
    //=====================================================================

    #[test]
    fn frame_runs_hooks_in_order() {
        let trace: Trace = Rc::default();
        let mut engine = EngineBuilder::new().build().init(|tree| {
            let world = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 100.0, 100.0))
                    .with_behavior(tracer("world", &trace)),
            );
            let a = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 1.0, 1.0))
                    .with_physics(PhysicsState::dynamic())
                    .with_behavior(tracer("a", &trace)),
            );
            let b = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 1.0, 1.0)).with_physics(PhysicsState::new()),
            );
            tree.add_child(world, a).unwrap();
            tree.add_child(world, b).unwrap();
            vec![RenderLayer::overlay(world, Size::new(100.0, 100.0))]
        });

        engine
            .event_sender()
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::Space)]))
            .unwrap();

        let mut backend = RecordingBackend::default();
        engine.step_at(&mut backend, 0).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec!["world:event", "a:event", "world:keyboard", "a:keyboard", "a:enter"]
        );
        assert!(engine.keyboard().is_down(KeyCode::Space));
        assert_eq!(backend.frames_presented, 1);
        assert_eq!(engine.frame_count(), 1);
    }

    #[test]
    fn quit_event_sets_flag_before_broadcast_and_run_stops() {
        let trace: Trace = Rc::default();
        let mut engine = EngineBuilder::new().build().init(|tree| {
            let world = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 10.0, 10.0))
                    .with_behavior(tracer("world", &trace)),
            );
            vec![RenderLayer::overlay(world, Size::new(10.0, 10.0))]
        });

        engine.event_sender().send(PlatformEvent::WindowClosed).unwrap();

        let mut backend = RecordingBackend::default();
        engine.run(&mut backend).unwrap();

        assert!(engine.context().quit_requested());
        assert_eq!(engine.frame_count(), 1, "the quitting frame completes");
        assert_eq!(*trace.borrow(), vec!["world:event", "world:keyboard"]);
    }

    #[test]
    fn handler_can_request_quit() {
        let trace: Trace = Rc::default();
        let mut engine = EngineBuilder::new().build().init(|tree| {
            let world = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 10.0, 10.0))
                    .with_behavior(tracer("world", &trace)),
            );
            vec![RenderLayer::overlay(world, Size::new(10.0, 10.0))]
        });

        let sender = engine.event_sender();
        sender
            .send(PlatformEvent::Inputs(vec![InputEvent::key_down(KeyCode::KeyQ)]))
            .unwrap();

        let mut backend = RecordingBackend::default();
        engine.run(&mut backend).unwrap();

        assert_eq!(engine.frame_count(), 1);
    }

    #[test]
    fn follow_camera_tracks_node_and_overlay_stays_fixed() {
        let mut engine = EngineBuilder::new()
            .with_window_size(100, 100)
            .build()
            .init(|tree| {
                let world = tree.insert(SceneNode::new(Rect::default()));
                let player = tree.insert(
                    SceneNode::new(Rect::make(50.0, 0.0, 10.0, 10.0))
                        .with_physics(PhysicsState::dynamic().with_velocity(Vector2D::new(10.0, 0.0)))
                        .with_renderable(Renderable::full(TextureHandle(1))),
                );
                let camera = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 100.0, 100.0)));
                tree.add_child(world, player).unwrap();
                tree.add_child(player, camera).unwrap();

                let hud = tree.insert(SceneNode::new(Rect::default()));
                let bar = tree.insert(
                    SceneNode::new(Rect::make(0.0, 0.0, 20.0, 10.0))
                        .with_renderable(Renderable::full(TextureHandle(2))),
                );
                tree.add_child(hud, bar).unwrap();

                vec![
                    RenderLayer::world(world, camera),
                    RenderLayer::overlay(hud, Size::new(100.0, 100.0)),
                ]
            });

        let mut backend = RecordingBackend::default();
        engine.step_at(&mut backend, 0).unwrap();

        // Camera rides on the player, so the player stays centered.
        assert_eq!(backend.commands[0].texture, TextureHandle(1));
        assert_eq!(backend.commands[0].dest, PixelRect::new(45, 45, 10, 10));
        // Overlay camera sits at the origin: (0,0) is the screen center.
        assert_eq!(backend.commands[1].texture, TextureHandle(2));
        assert_eq!(backend.commands[1].dest, PixelRect::new(40, 45, 20, 10));
    }

    #[test]
    fn zero_sized_camera_fails_the_frame() {
        let mut engine = EngineBuilder::new().build().init(|tree| {
            let world = tree.insert(SceneNode::new(Rect::default()));
            let camera = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 0.0, 10.0)));
            tree.add_child(world, camera).unwrap();
            vec![RenderLayer::world(world, camera)]
        });

        let mut backend = RecordingBackend::default();
        assert_eq!(
            engine.step_at(&mut backend, 0),
            Err(SceneError::InvalidCamera {
                width: 0.0,
                height: 10.0
            })
        );
    }

    #[test]
    fn removed_nodes_are_pruned_before_physics() {
        let mut engine = EngineBuilder::new().build().init(|tree| {
            let world = tree.insert(SceneNode::new(Rect::default()));
            let doomed = tree.insert(
                SceneNode::new(Rect::make(0.0, 0.0, 1.0, 1.0))
                    .with_physics(PhysicsState::dynamic().with_velocity(Vector2D::new(1.0, 0.0))),
            );
            tree.add_child(world, doomed).unwrap();
            tree.mark_removed(doomed).unwrap();
            vec![RenderLayer::overlay(world, Size::new(10.0, 10.0))]
        });

        let mut backend = RecordingBackend::default();
        engine.step_at(&mut backend, 0).unwrap();

        let world = engine.simulation_root().unwrap();
        assert!(engine.tree().node(world).unwrap().children().is_empty());
        // Detached before integration, so the velocity was never applied.
        let (_, doomed) = engine.tree().iter().find(|(id, _)| *id != world).unwrap();
        assert_eq!(doomed.frame.center, Vector2D::ZERO);
        assert_eq!(engine.tree().len(), 2);
    }

    #[test]
    fn follow_camera_survives_removal_of_its_carrier() {
        let mut ids = None;
        let mut engine = EngineBuilder::new()
            .with_window_size(100, 100)
            .build()
            .init(|tree| {
                let world = tree.insert(SceneNode::new(Rect::default()));
                let player = tree.insert(SceneNode::new(Rect::make(30.0, 0.0, 10.0, 10.0)));
                let camera = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 100.0, 100.0)));
                tree.add_child(world, player).unwrap();
                tree.add_child(player, camera).unwrap();
                ids = Some((player, camera));
                vec![RenderLayer::world(world, camera)]
            });
        let (player, camera) = ids.unwrap();

        let mut backend = RecordingBackend::default();
        engine.tree_mut().mark_removed(player).unwrap();
        engine.step_at(&mut backend, 0).unwrap();
        engine.step_at(&mut backend, 16).unwrap();

        assert!(engine.tree().contains(player));
        assert_eq!(engine.tree().global_position(camera).unwrap(), Vector2D::new(30.0, 0.0));
        assert_eq!(backend.frames_presented, 2);
    }

    #[test]
    fn engine_without_layers_still_honours_quit() {
        let mut engine = EngineBuilder::new().build();
        engine.event_sender().send(PlatformEvent::WindowClosed).unwrap();

        let mut backend = RecordingBackend::default();
        engine.step_at(&mut backend, 0).unwrap();

        assert!(engine.context().quit_requested());
        assert!(backend.commands.is_empty());
    }
}
