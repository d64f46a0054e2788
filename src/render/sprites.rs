//! Billboard sprites (collection, sorting, column-occluded projection).
//!
//! Exposes:
//! - `collect_sprites`: props and living enemies as drawable instances
//! - `sort_far_to_near`: painter's order
//! - `draw_sprite`: one billboard against the depth buffer
//! - `draw_sprites`: all of the above for a world
use std::cmp::Ordering;

use crate::config::EngineConfig;
use crate::core::enemy::EnemyState;
use crate::core::player::{Player, normalize_degrees};
use crate::core::world::World;
use crate::render::draw::{DrawCommand, Rect, Tint};
use crate::render::textures::{TextureId, TextureTable};

// closer than this a billboard would cover an unbounded number of columns
const MIN_SPRITE_DISTANCE: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteInstance {
    pub x: f32,
    pub y: f32,
    pub texture: TextureId,
    pub tint: Tint,
    /// Raw distance to the player.
    pub distance: f32,
}

pub fn collect_sprites(world: &World) -> Vec<SpriteInstance> {
    let player = &world.player;
    let instance = |x: f32, y: f32, texture, tint| SpriteInstance {
        x,
        y,
        texture,
        tint,
        distance: (x - player.x).hypot(y - player.y),
    };

    let mut sprites = Vec::with_capacity(world.props.len() + world.enemies.len());
    for prop in &world.props {
        sprites.push(instance(prop.x, prop.y, prop.sprite.texture(), Tint::WHITE));
    }
    for enemy in world.living_enemies() {
        let tint = match enemy.state {
            EnemyState::Hurt => Tint::HURT,
            EnemyState::Normal => Tint::WHITE,
        };
        sprites.push(instance(enemy.x, enemy.y, enemy.sprite.texture(), tint));
    }
    sprites
}

/// Farthest first, so nearer sprites paint over farther ones.
pub fn sort_far_to_near(sprites: &mut [SpriteInstance]) {
    sprites.sort_by(|a, b| b.distance.partial_cmp(&a.distance).unwrap_or(Ordering::Equal));
}

/// Signed angle in degrees from the sprite's bearing to the facing, in (-180, 180].
/// Positive means the sprite is left of centre.
pub fn view_offset(player: &Player, x: f32, y: f32) -> f32 {
    let bearing = normalize_degrees((y - player.y).atan2(x - player.x).to_degrees());
    let offset = (player.angle - bearing).rem_euclid(360.0);
    if offset > 180.0 { offset - 360.0 } else { offset }
}

pub fn draw_sprite(
    out: &mut Vec<DrawCommand>,
    depth: &[f32],
    player: &Player,
    sprite: &SpriteInstance,
    textures: &TextureTable,
    cfg: &EngineConfig,
) {
    let offset = view_offset(player, sprite.x, sprite.y);
    if offset.abs() > player.fov {
        return;
    }
    let Some((tex_w, tex_h)) = textures.size(sprite.texture) else {
        log::debug!("sprite texture {:?} has no size, skipped", sprite.texture);
        return;
    };
    if tex_h <= 0.0 || tex_w <= 0.0 || !(sprite.distance > MIN_SPRITE_DISTANCE) {
        log::debug!(
            "degenerate sprite at ({:.2}, {:.2}) dist {:.4}, skipped",
            sprite.x,
            sprite.y,
            sprite.distance
        );
        return;
    }

    let n = depth.len();
    let cw = cfg.column_width();
    let view_h = cfg.view_height as f32;
    let height = view_h * (cfg.object_scale * player.radius / sprite.distance);
    let width = height * (tex_w / tex_h);

    let count = (width / cw).ceil().max(1.0);
    let centre = (player.fov * 0.5 - offset) / player.fov * n as f32;
    let start = (centre - width / (2.0 * cw)).floor();
    let top = view_h * 0.5 - height * (0.5 - cfg.object_offset);

    // only walk the columns that are on screen
    // depth holds perpendicular distances; measure the billboard the same way
    let sprite_depth = sprite.distance * offset.to_radians().cos();
    let first = start.max(0.0) as usize;
    let last = (start + count).clamp(0.0, n as f32) as usize;
    for i in first..last {
        if depth[i] < sprite_depth {
            continue;
        }
        let slice = i as f32 - start;
        let src = Rect::new(tex_w * slice / count, 0.0, tex_w / count, tex_h);
        let dst = Rect::new(i as f32 * cw, top, cw, height);
        out.push(DrawCommand::Texture { texture: sprite.texture, src: Some(src), dst, tint: sprite.tint });
    }
}

pub fn draw_sprites(
    out: &mut Vec<DrawCommand>,
    depth: &[f32],
    world: &World,
    textures: &TextureTable,
    cfg: &EngineConfig,
) {
    let mut sprites = collect_sprites(world);
    sort_far_to_near(&mut sprites);
    for sprite in &sprites {
        draw_sprite(out, depth, &world.player, sprite, textures, cfg);
    }
}
