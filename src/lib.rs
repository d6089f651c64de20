//=========================================================================
// Aetheric Scene — Library Root
//
// This crate defines the public API surface of the Aetheric scene engine.
//
// Responsibilities:
// - Expose the scene-graph core (`core`) and the frame-loop facade
//   (`Engine`)
// - Keep the Winit integration behind a single entry point
//   (`run_windowed`) so headless drivers never touch it
//
// Typical usage:
// ```no_run
// use aetheric_scene::prelude::*;
//
// let mut engine = EngineBuilder::new().build().init(|tree| {
//     let world = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 800.0, 600.0)));
//     let camera = tree.insert(SceneNode::new(Rect::make(0.0, 0.0, 80.0, 60.0)));
//     tree.add_child(world, camera).unwrap();
//     vec![RenderLayer::world(world, camera)]
// });
//
// let mut backend = RecordingBackend::default();
// aetheric_scene::run_windowed(&mut engine, &mut backend).unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene tree, physics, projection and input types.
// `prelude` re-exports what game code needs most.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the Winit window and event loop; only its entry point,
// error type and event mapper are re-exported below.
//
// `engine` defines the builder and the frame loop.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{CameraSource, Engine, EngineBuilder, RenderLayer};
pub use platform::{map_window_event, run_windowed, EventMapper, PlatformError};
