//=========================================================================
// Settings
//=========================================================================
//
// Window-level settings read by the render projection.
//
//=========================================================================

//=== Settings ============================================================

/// Window title and pixel dimensions.
///
/// The projection maps the camera window onto exactly
/// `window_width x window_height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Settings {
    pub fn new(title: impl Into<String>, window_width: u32, window_height: u32) -> Self {
        Self {
            title: title.into(),
            window_width,
            window_height,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new("Aetheric", 800, 600)
    }
}
