//=========================================================================
// Platform Subsystem
//
// Drives an `Engine` from a Winit window on the calling thread.
//
// Architecture:
// ```text
//  Winit Event Loop (main thread)
//   │
//   ├─ WindowEvent ──► EventMapper ──► pending: Vec<InputEvent>
//   │
//   ├─ Focused(false) ──► flush pending, then PlatformEvent::FocusLost
//   │
//   └─ RedrawRequested (frame boundary)
//        ├─ flush pending ──► Sender<PlatformEvent> ──► EventCollector
//        ├─ Engine::step(backend)
//        └─ quit requested? exit : request_redraw
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input since the previous
//   frame is sent as one batch, so arrival order is preserved.
// - **Non-blocking send**: the producer and the consumer share a thread,
//   so a full channel drops the batch with a warning instead of blocking.
// - **Close goes through the scene**: `CloseRequested` maps to `Quit`,
//   which every node observes before the loop stops.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `run_windowed`.
//
// The render backend is supplied by the caller; this layer only owns the
// window and the event loop.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;

pub use event_mapper::{map_window_event, EventMapper};

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::error::SceneError;
use crate::core::input::InputEvent;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::RenderBackend;
use crate::engine::Engine;

//=== PlatformError =======================================================

/// Window and event-loop failures.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// Window creation failed.
    WindowCreation(winit::error::OsError),

    /// A frame failed inside the engine.
    Frame(SceneError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Frame(e) => write!(f, "Frame failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::WindowCreation(e) => Some(e),
            Self::Frame(e) => Some(e),
        }
    }
}

//=== Entry Point =========================================================

/// Opens a window sized from the engine settings and runs frames on
/// every redraw until quit is requested.
///
/// # Errors
///
/// Returns [`PlatformError`] if the event loop or the window cannot be
/// created, or if a frame fails.
pub fn run_windowed(
    engine: &mut Engine,
    backend: &mut dyn RenderBackend,
) -> Result<(), PlatformError> {
    debug!(target: "platform", "Starting Winit event loop");

    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    let mut platform = Platform::new(engine, backend);

    event_loop
        .run_app(&mut platform)
        .map_err(PlatformError::EventLoopExecution)?;

    match platform.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

//=== Platform ============================================================

/// Window owner and per-frame driver.
///
/// This type is not `Send`; it must stay on the thread running the event
/// loop. The engine is reached only through the channel and `step`.
struct Platform<'a> {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    /// Input mapped since the last frame boundary.
    pending: Vec<InputEvent>,

    sender: Sender<PlatformEvent>,
    mapper: EventMapper,
    engine: &'a mut Engine,
    backend: &'a mut dyn RenderBackend,

    /// First fatal error, reported after the loop exits.
    failure: Option<PlatformError>,
}

impl<'a> Platform<'a> {
    fn new(engine: &'a mut Engine, backend: &'a mut dyn RenderBackend) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            pending: Vec::new(),
            sender: engine.event_sender(),
            mapper: EventMapper::new(),
            engine,
            backend,
            failure: None,
        }
    }

    /// Sends buffered input to the engine as one batch.
    ///
    /// Empty batches are not sent. A full or disconnected channel drops the
    /// batch with a warning.
    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        trace!(target: "platform", "Flushing {} input events", count);

        match self.sender.try_send(PlatformEvent::Inputs(batch)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform", "Event channel full, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform", "Event channel disconnected, dropping {} events", count);
            }
        }
    }

    /// Tells the engine that held keys will get no release events.
    ///
    /// Pending input is flushed first so it is applied before the release.
    fn focus_lost(&mut self) {
        self.flush_pending();

        if let Err(e) = self.sender.try_send(PlatformEvent::FocusLost) {
            warn!(target: "platform", "Could not report focus loss: {}", e);
        }
    }

    /// Runs one engine frame. Returns `false` once the loop should stop.
    fn frame(&mut self) -> bool {
        self.flush_pending();

        if let Err(err) = self.engine.step(&mut *self.backend) {
            error!(target: "platform", "Frame failed: {}", err);
            self.failure = Some(PlatformError::Frame(err));
            return false;
        }

        !self.engine.context().quit_requested()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform<'_> {
    /// Creates the window on first activation (or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let settings = &self.engine.context().settings;
        let attrs = WindowAttributes::default()
            .with_title(settings.title.clone())
            .with_inner_size(LogicalSize::new(settings.window_width, settings.window_height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(PlatformError::WindowCreation(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            if self.frame() {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            } else {
                info!(target: "platform", "Leaving event loop");
                event_loop.exit();
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
            }
            WindowEvent::Focused(false) => {
                debug!(target: "platform", "Window lost focus");
                self.focus_lost();
                return;
            }
            _ => {}
        }

        if let Some(input) = self.mapper.map(&event) {
            self.pending.push(input);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
