//=========================================================================
// Render
//=========================================================================
//
// Camera projection and the output seam towards the rendering backend.
//
// Flow:
//   SceneTree::render(root, basis, &Viewport) → Viewport::project()
//     → DrawCommand → RenderBackend::draw()
//
//=========================================================================

//=== Module Declarations =================================================

mod backend;
mod camera;
mod renderable;

//=== Public API ==========================================================

pub use backend::{RecordingBackend, RenderBackend};
pub use camera::{project, Viewport};
pub use renderable::{DrawCommand, PixelRect, Renderable, TextureHandle};
