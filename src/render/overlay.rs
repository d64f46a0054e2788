//! Weapon HUD and the top-down map view.
use crate::config::EngineConfig;
use crate::core::map::OPEN;
use crate::core::world::World;
use crate::render::caster::{Face, cast};
use crate::render::draw::{DrawCommand, Rect, Tint};
use crate::render::textures::TextureTable;
use crate::render::walls::column_angle;

// radius of a prop marker, in cells
const PROP_DOT: f32 = 0.05;

/// Current weapon frame, centred along the bottom edge at a quarter of the view width.
pub fn draw_weapon(out: &mut Vec<DrawCommand>, world: &World, textures: &TextureTable, cfg: &EngineConfig) {
    let texture = world.player.weapon.sprite.texture();
    let Some((w, h)) = textures.size(texture).filter(|(w, h)| *w > 0.0 && *h > 0.0) else {
        log::debug!("weapon frame {texture:?} has no usable size");
        return;
    };
    let view_w = cfg.view_width as f32;
    let width = view_w / 4.0;
    let height = h * (width / w);
    out.push(DrawCommand::Texture {
        texture,
        src: None,
        dst: Rect::new(view_w * 0.5 - width * 0.5, cfg.view_height as f32 - height, width, height),
        tint: Tint::WHITE,
    });
}

/// Top-down view of the grid, the player, the rays of the current frame and the props.
pub fn draw_map(out: &mut Vec<DrawCommand>, world: &World, cfg: &EngineConfig) {
    let map = &world.map;
    let player = &world.player;
    let sx = cfg.view_width as f32 / map.width() as f32;
    let sy = cfg.view_height as f32 / map.height() as f32;

    out.push(DrawCommand::Clear(Tint::BLACK));
    for (row, cells) in map.rows().enumerate() {
        for (col, &code) in cells.iter().enumerate() {
            let rect = Rect::new(col as f32 * sx, row as f32 * sy, sx, sy);
            out.push(if code != OPEN {
                DrawCommand::FillRect { rect, color: Tint::MAP_WALL }
            } else {
                DrawCommand::OutlineRect { rect, color: Tint::WHITE }
            });
        }
    }

    let eye = (player.x * sx, player.y * sy);
    out.push(DrawCommand::FillCircle { center: eye, radius: player.radius * sx, color: Tint::MAP_PLAYER });

    let n = cfg.ray_count;
    for i in 0..n {
        let hit = cast(map, player.x, player.y, column_angle(player.angle, player.fov, i, n), cfg.ray_step);
        if hit.is_miss() {
            continue;
        }
        let color = match hit.face {
            Face::Vertical => Tint::MAP_RAY_VERTICAL,
            Face::Horizontal => Tint::MAP_RAY_HORIZONTAL,
        };
        out.push(DrawCommand::Line { from: eye, to: (hit.x * sx, hit.y * sy), color });
    }

    for prop in &world.props {
        out.push(DrawCommand::FillCircle {
            center: (prop.x * sx, prop.y * sy),
            radius: PROP_DOT * sx,
            color: Tint::MAP_PROP,
        });
    }
}
