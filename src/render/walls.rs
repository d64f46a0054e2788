//! Sky backdrop and textured wall columns.
use crate::config::EngineConfig;
use crate::core::map::GridMap;
use crate::core::player::Player;
use crate::render::caster::{Face, cast};
use crate::render::draw::{DrawCommand, Rect, Tint};
use crate::render::textures::TextureTable;

/// Smallest depth used for projection; keeps strip heights finite against a wall.
pub const MIN_DEPTH: f32 = 1e-4;

/// Ray angle for column `i` of `n`. Column `n / 2` looks straight ahead.
#[inline]
pub fn column_angle(facing: f32, fov: f32, i: usize, n: usize) -> f32 {
    facing - fov * 0.5 + fov * i as f32 / n as f32
}

/// Clears the view and lays the sky panorama across the top half.
///
/// The panorama covers twice the field of view and scrolls with the facing; a second copy
/// fills the gap left by the first.
pub fn draw_sky(out: &mut Vec<DrawCommand>, player: &Player, textures: &TextureTable, cfg: &EngineConfig) {
    out.push(DrawCommand::Clear(Tint::BACKGROUND));
    let Some(sky) = textures.sky() else {
        return;
    };
    let sky_fov = player.fov * 2.0;
    let sky_angle = -(player.angle % sky_fov);
    let x1 = sky_angle * cfg.sky_width / sky_fov;
    let x2 = x1 + if sky_angle < 0.0 { cfg.sky_width } else { -cfg.sky_width };
    let h = cfg.view_height as f32 * 0.5;
    for x in [x1, x2] {
        out.push(DrawCommand::Texture {
            texture: sky,
            src: None,
            dst: Rect::new(x, 0.0, cfg.sky_width, h),
            tint: Tint::WHITE,
        });
    }
}

/// Casts one ray per column, emits its wall strip and records the perpendicular depth.
///
/// `depth` must already be filled with `f32::INFINITY`; columns whose ray misses keep it.
pub fn draw_walls(
    out: &mut Vec<DrawCommand>,
    depth: &mut [f32],
    map: &GridMap,
    player: &Player,
    textures: &TextureTable,
    cfg: &EngineConfig,
) {
    let n = depth.len();
    let cw = cfg.column_width();
    let view_h = cfg.view_height as f32;

    for (i, z) in depth.iter_mut().enumerate() {
        let angle = column_angle(player.angle, player.fov, i, n);
        let hit = cast(map, player.x, player.y, angle, cfg.ray_step);
        if hit.is_miss() {
            continue;
        }

        // fish-eye correction
        let perp = (hit.distance * (angle - player.angle).to_radians().cos()).max(MIN_DEPTH);
        *z = perp;

        let strip_h = view_h * (cfg.wall_scale * player.radius / perp);
        let dst = Rect::new(i as f32 * cw, view_h * 0.5 - strip_h * 0.5, cw, strip_h);

        let texture = textures.wall(hit.wall);
        let size = texture.and_then(|id| textures.size(id).map(|s| (id, s)));
        let Some((texture, (tex_w, tex_h))) = size else {
            out.push(DrawCommand::FillRect { rect: dst, color: Tint::MISSING });
            continue;
        };
        let tint = match hit.face {
            Face::Horizontal => Tint::WHITE,
            Face::Vertical => Tint::SHADED,
        };
        let src = Rect::new((hit.texture_u() * tex_w).floor(), 0.0, 1.0, tex_h);
        out.push(DrawCommand::Texture { texture, src: Some(src), dst, tint });
    }
}
