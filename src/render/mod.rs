//! Frame rendering into draw commands.
//!
//! Modules:
//! - `textures`: Texture registry (ids, sizes, wall and sky slots)
//! - `caster`: Fixed-step ray march against the grid
//! - `draw`: Draw command output surface
//! - `walls`: Sky backdrop, wall columns and the depth buffer
//! - `sprites`: Billboard sorting, projection and occlusion
//! - `overlay`: Weapon HUD and the top-down map view

pub mod caster;
pub mod draw;
pub mod overlay;
pub mod sprites;
pub mod textures;
pub mod walls;

use crate::config::EngineConfig;
use crate::core::world::World;
use draw::DrawCommand;
use textures::TextureTable;

/// Owns the per-frame scratch state: one depth value per column and the command list.
#[derive(Debug, Default)]
pub struct Renderer {
    depth: Vec<f32>,
    commands: Vec<DrawCommand>,
}

impl Renderer {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            depth: vec![f32::INFINITY; cfg.ray_count],
            commands: Vec::with_capacity(cfg.ray_count * 2),
        }
    }

    /// Perpendicular wall depth per column from the last rendered frame.
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Walls first, then sprites far to near, then the weapon; or the map view.
    pub fn render(&mut self, world: &World, textures: &TextureTable, cfg: &EngineConfig) -> &[DrawCommand] {
        self.commands.clear();
        self.depth.clear();
        self.depth.resize(cfg.ray_count, f32::INFINITY);

        if world.map_mode {
            overlay::draw_map(&mut self.commands, world, cfg);
        } else {
            walls::draw_sky(&mut self.commands, &world.player, textures, cfg);
            walls::draw_walls(&mut self.commands, &mut self.depth, &world.map, &world.player, textures, cfg);
            sprites::draw_sprites(&mut self.commands, &self.depth, world, textures, cfg);
            overlay::draw_weapon(&mut self.commands, world, textures, cfg);
        }
        &self.commands
    }
}
