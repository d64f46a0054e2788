//! Everything that changes during play, updated once per frame.
use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::core::anim::SpriteImage;
use crate::core::enemy::Enemy;
use crate::core::input::InputState;
use crate::core::level::Level;
use crate::core::map::GridMap;
use crate::core::player::Player;
use crate::core::weapon::{Trigger, Weapon};
use crate::render::textures::TextureTable;

/// Decorative billboard.
pub struct Prop {
    pub x: f32,
    pub y: f32,
    pub sprite: SpriteImage,
}

/// What happened during one `World::update`, for sound and logging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub fired: bool,
    pub dry_fire: bool,
    pub reload_started: bool,
    pub reload_finished: bool,
    pub enemies_hit: usize,
    pub enemies_killed: usize,
}

pub struct World {
    pub map: GridMap,
    pub player: Player,
    pub props: Vec<Prop>,
    pub enemies: Vec<Enemy>,
    pub map_mode: bool,
}

impl World {
    pub fn new(map: GridMap, player: Player) -> Self {
        Self { map, player, props: Vec::new(), enemies: Vec::new(), map_mode: false }
    }

    /// Builds the world for a level whose assets are already registered in `textures`.
    pub fn from_level(level: &Level, textures: &TextureTable, cfg: &EngineConfig) -> Result<Self> {
        let loadout = &level.weapon;
        let sprite = loadout
            .sprite
            .animation(textures, cfg.weapon_frame_time())
            .context("loading weapon sprite")?;
        let weapon = Weapon::new(
            sprite,
            loadout.shoot_frames,
            loadout.reload_frames,
            loadout.max_ammo,
            loadout.base_damage,
        )?;

        let (x, y, angle) = level.player_start;
        let mut world = World::new(level.map.clone(), Player::new(x, y, angle, weapon));

        for spawn in &level.props {
            let sprite = spawn
                .sprite
                .resolve(textures, cfg.anim_frame_time)
                .with_context(|| format!("prop at ({}, {})", spawn.x, spawn.y))?;
            world.props.push(Prop { x: spawn.x, y: spawn.y, sprite });
        }
        for spawn in &level.enemies {
            let sprite = spawn
                .sprite
                .resolve(textures, cfg.anim_frame_time)
                .with_context(|| format!("enemy at ({}, {})", spawn.x, spawn.y))?;
            world
                .enemies
                .push(Enemy::new(spawn.x, spawn.y, spawn.radius, spawn.health, sprite));
        }

        log::info!(
            "level ready: {}x{} map, {} props, {} enemies",
            world.map.width(),
            world.map.height(),
            world.props.len(),
            world.enemies.len()
        );
        Ok(world)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    /// Advances one frame. Bad time deltas are treated as zero.
    pub fn update(&mut self, input: &InputState, dt: f32, cfg: &EngineConfig) -> FrameEvents {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = FrameEvents::default();

        self.player.update(input, &self.map, cfg, dt);

        if input.toggle_map {
            self.map_mode = !self.map_mode;
        }
        if input.reload && self.player.weapon.reload() {
            events.reload_started = true;
        }
        if input.fire {
            let origin = (self.player.x, self.player.y);
            let facing = self.player.angle;
            match self.player.weapon.pull_trigger(origin, facing, &self.map, &mut self.enemies, cfg)
            {
                Trigger::Fired(report) => {
                    events.fired = true;
                    events.enemies_hit = report.hit.len();
                    events.enemies_killed = report.killed.len();
                    for &i in &report.killed {
                        log::debug!("enemy {i} killed");
                    }
                }
                Trigger::DryFire => {
                    events.dry_fire = true;
                    events.reload_started = true;
                }
                Trigger::Ignored => {}
            }
        }

        for prop in &mut self.props {
            prop.sprite.tick(dt);
        }
        events.reload_finished = self.player.weapon.update(dt);
        for enemy in &mut self.enemies {
            enemy.update(dt);
        }
        events
    }
}
