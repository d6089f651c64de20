//=========================================================================
// Renderables
//=========================================================================
//
// Opaque handles to externally loaded assets plus the draw command the
// render traversal emits for them. The core never touches pixel data.
//
//=========================================================================

//=== TextureHandle =======================================================

/// Non-owning reference to a texture owned by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

//=== PixelRect ===========================================================

/// Integer rectangle in pixel space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

//=== Renderable ==========================================================

/// A texture plus the part of it to draw.
///
/// `source == None` draws the full texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub texture: TextureHandle,
    pub source: Option<PixelRect>,
    pub flip: bool,
}

impl Renderable {
    /// Draws the whole texture, unflipped.
    pub const fn full(texture: TextureHandle) -> Self {
        Self {
            texture,
            source: None,
            flip: false,
        }
    }

    /// Draws only `source` of the texture, unflipped.
    pub const fn region(texture: TextureHandle, source: PixelRect) -> Self {
        Self {
            texture,
            source: Some(source),
            flip: false,
        }
    }
}

//=== DrawCommand =========================================================

/// One draw call handed to the [`RenderBackend`](super::RenderBackend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    pub dest: PixelRect,
    pub source: Option<PixelRect>,
    pub flip: bool,
}
