//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core message type.
//
// The window side (Winit or a test harness) batches what it observed and
// sends it over a bounded channel; the frame loop drains it once per
// frame through the `EventCollector`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Messages sent from the platform layer to the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Input events observed since the previous send, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,

    /// The window lost keyboard focus; key releases after this point are
    /// never reported, so every held key is released.
    FocusLost,
}
