//=========================================================================
// Frame Context
//=========================================================================
//
// Explicit per-run context passed by reference through the frame loop.
//
// Mutated only by the loop driver (clock) and by dispatched event or
// keyboard handlers (quit flag). Nothing in the tree holds onto it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::Settings;

//=== FrameContext ========================================================

/// Shared state visible to input handlers and the render traversal.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Window settings used by the projection.
    pub settings: Settings,

    /// Milliseconds since the engine started; drives frame-strip animations.
    pub ticks_ms: u64,

    quit: bool,
}

impl FrameContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ticks_ms: 0,
            quit: false,
        }
    }

    /// Asks the loop to stop after the current frame.
    ///
    /// The flag is only checked at the top of each iteration, so the frame
    /// in progress always completes.
    pub fn request_quit(&mut self) {
        if !self.quit {
            info!("Quit requested");
        }
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
