//=========================================================================
// Render Backend
//=========================================================================
//
// Output seam of the frame loop. A concrete backend (SDL, wgpu, a test
// recorder) receives one `DrawCommand` per visible renderable node and
// is responsible for its own clipping.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::DrawCommand;

//=== RenderBackend =======================================================

/// Drawing surface driven once per frame: `clear`, `draw`*, `present`.
pub trait RenderBackend {
    /// Clears the back buffer before any draw call of the frame.
    fn clear(&mut self) {}

    /// Copies the command's source region into `dest`, flipping if asked.
    fn draw(&mut self, command: &DrawCommand);

    /// Presents the finished frame.
    fn present(&mut self) {}
}

//=== Recording Backend ===================================================

/// Backend that only records the commands it receives.
///
/// Handy for headless runs and for asserting on the render traversal.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<DrawCommand>,
    pub frames_presented: usize,
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
