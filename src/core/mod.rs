//=========================================================================
// Core Systems
//
// Everything the frame loop runs on, independent of any window or
// graphics API.
//
// Modules (leaves first):
// - `geometry`: Vector2D, Size, Rect value types
// - `error`: SceneError / SceneResult
// - `globals`: Settings and the per-frame FrameContext
// - `input`: portable input events and the held-key snapshot
// - `render`: draw commands, backend trait, camera projection
// - `animation`: time-driven frame strips
// - `physics`: per-node physics state and the collision pass
// - `scene`: the arena tree, node type, and behaviour hooks
// - `platform_bridge`: channel message type and per-frame collector
//
//=========================================================================

pub mod animation;
pub mod error;
pub mod geometry;
pub mod globals;
pub mod input;
pub mod physics;
pub mod platform_bridge;
pub mod render;
pub mod scene;
