//! Draw commands produced by the renderer, in paint order.
//!
//! The window layer replays them onto its render target. Coordinates are pixels of the
//! internal view (`view_width` x `view_height`).
use crate::render::textures::TextureId;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Colour, or colour modulation when applied to a texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Tint = Tint::rgb(255, 255, 255);
    pub const BLACK: Tint = Tint::rgb(0, 0, 0);
    /// Darkening for walls seen across a vertical grid line.
    pub const SHADED: Tint = Tint::rgb(100, 100, 100);
    pub const HURT: Tint = Tint::rgb(250, 129, 129);
    pub const BACKGROUND: Tint = Tint::rgb(50, 50, 50);
    pub const MISSING: Tint = Tint::rgb(255, 0, 255);

    pub const MAP_WALL: Tint = Tint::rgb(0, 0, 155);
    pub const MAP_PLAYER: Tint = Tint::rgb(255, 0, 0);
    pub const MAP_RAY_VERTICAL: Tint = Tint::rgb(255, 255, 0);
    pub const MAP_RAY_HORIZONTAL: Tint = Tint::rgb(255, 127, 80);
    pub const MAP_PROP: Tint = Tint::rgb(0, 255, 0);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Tint),
    /// `src: None` samples the whole texture.
    Texture { texture: TextureId, src: Option<Rect>, dst: Rect, tint: Tint },
    FillRect { rect: Rect, color: Tint },
    OutlineRect { rect: Rect, color: Tint },
    Line { from: (f32, f32), to: (f32, f32), color: Tint },
    FillCircle { center: (f32, f32), radius: f32, color: Tint },
}

impl DrawCommand {
    pub fn texture(&self) -> Option<TextureId> {
        match self {
            DrawCommand::Texture { texture, .. } => Some(*texture),
            _ => None,
        }
    }
}
