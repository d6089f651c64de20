//=========================================================================
// Global Engine State
//=========================================================================
//
// Settings: window title and size (configuration)
// FrameContext: settings + quit flag + clock, passed to handlers
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_context;
mod settings;

//=== Public API ==========================================================

pub use frame_context::FrameContext;
pub use settings::Settings;
