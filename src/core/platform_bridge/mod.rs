//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (Winit or a headless driver) with the frame
// loop.
//
// Components:
// - `interface`: the message type sent across the channel
// - `event_collector`: core-side per-frame drain and keyboard tracking
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, MAX_EVENTS_PER_FRAME};
pub use interface::PlatformEvent;
