use anyhow::{Result, anyhow};
use raylib::prelude::*;

use gridcaster::render::draw::{DrawCommand, Rect, Tint};

use crate::textures::TextureManager;

#[inline]
fn color(t: Tint) -> Color {
    Color::new(t.r, t.g, t.b, 255)
}

#[inline]
fn rect(r: Rect) -> Rectangle {
    Rectangle::new(r.x, r.y, r.w, r.h)
}

/// Low-resolution render target the scene is drawn into, then stretched over the window.
pub struct Framebuffer {
    target: RenderTexture2D,
    pub width: u32,
    pub height: u32,
}

impl Framebuffer {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, width: u32, height: u32) -> Result<Self> {
        let target = rl
            .load_render_texture(thread, width, height)
            .map_err(|e| anyhow!("creating {width}x{height} render target: {e}"))?;
        Ok(Self { target, width, height })
    }

    /// Replays the frame's commands into the target, then draws it over the whole window
    /// with a small text HUD on top.
    pub fn present(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        commands: &[DrawCommand],
        texman: &TextureManager,
        hud: &str,
    ) {
        let (win_w, win_h) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let mut d = rl.begin_drawing(thread);
        {
            let mut t = d.begin_texture_mode(thread, &mut self.target);
            for cmd in commands {
                Self::replay(&mut t, cmd, texman);
            }
        }

        d.clear_background(Color::BLACK);
        // render textures are stored upside down
        let src = Rectangle::new(0.0, 0.0, self.width as f32, -(self.height as f32));
        let dst = Rectangle::new(0.0, 0.0, win_w, win_h);
        d.draw_texture_pro(self.target.texture(), src, dst, Vector2::zero(), 0.0, Color::WHITE);
        d.draw_text(hud, 10, 10, 20, Color::WHITE);
    }

    fn replay(d: &mut impl RaylibDraw, cmd: &DrawCommand, texman: &TextureManager) {
        match cmd {
            DrawCommand::Clear(c) => d.clear_background(color(*c)),
            DrawCommand::Texture { texture, src, dst, tint } => {
                let Some(tex) = texman.get(*texture) else {
                    return;
                };
                let src = src.map(rect).unwrap_or_else(|| {
                    Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32)
                });
                d.draw_texture_pro(tex, src, rect(*dst), Vector2::zero(), 0.0, color(*tint));
            }
            DrawCommand::FillRect { rect: r, color: c } => d.draw_rectangle_rec(rect(*r), color(*c)),
            DrawCommand::OutlineRect { rect: r, color: c } => {
                d.draw_rectangle_lines_ex(rect(*r), 1.0, color(*c))
            }
            DrawCommand::Line { from, to, color: c } => d.draw_line_v(
                Vector2::new(from.0, from.1),
                Vector2::new(to.0, to.1),
                color(*c),
            ),
            DrawCommand::FillCircle { center, radius, color: c } => {
                d.draw_circle_v(Vector2::new(center.0, center.1), *radius, color(*c))
            }
        }
    }
}
