//! Level description: layout, spawns and the assets they need.
//!
//! A level only names image files. The window layer loads every path from
//! `asset_paths` into the texture table, then `World::from_level` resolves the names.
use anyhow::{Context, Result};

use crate::core::anim::{AnimatedSprite, SpriteImage};
use crate::core::map::GridMap;
use crate::render::textures::TextureTable;

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteSource {
    Static(String),
    /// A directory holding `0.png`, `1.png`, ...
    Animated { dir: String, frames: usize },
}

impl SpriteSource {
    pub fn animated(dir: &str, frames: usize) -> Self {
        SpriteSource::Animated { dir: dir.to_string(), frames }
    }

    pub fn paths(&self) -> Vec<String> {
        match self {
            SpriteSource::Static(path) => vec![path.clone()],
            SpriteSource::Animated { dir, frames } => {
                (0..*frames).map(|i| format!("{dir}/{i}.png")).collect()
            }
        }
    }

    pub fn animation(&self, textures: &TextureTable, frame_time: f32) -> Result<AnimatedSprite> {
        let frames = self
            .paths()
            .iter()
            .map(|p| textures.lookup(p))
            .collect::<Result<Vec<_>>>()?;
        AnimatedSprite::new(frames, frame_time)
    }

    pub fn resolve(&self, textures: &TextureTable, frame_time: f32) -> Result<SpriteImage> {
        match self {
            SpriteSource::Static(path) => Ok(SpriteImage::Static(textures.lookup(path)?)),
            SpriteSource::Animated { .. } => {
                Ok(SpriteImage::Animated(self.animation(textures, frame_time)?))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropSpawn {
    pub x: f32,
    pub y: f32,
    pub sprite: SpriteSource,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub health: i32,
    pub sprite: SpriteSource,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponLoadout {
    pub sprite: SpriteSource,
    pub shoot_frames: usize,
    pub reload_frames: usize,
    pub max_ammo: u32,
    pub base_damage: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub map: GridMap,
    /// Wall material id and the texture drawn for it.
    pub walls: Vec<(u8, String)>,
    pub sky: Option<String>,
    pub player_start: (f32, f32, f32),
    pub props: Vec<PropSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub weapon: WeaponLoadout,
}

const DEMO_LAYOUT: &str = "
    2 2 2 2 2 2 2 2 2 2 2 2 2 2
    2 0 0 0 0 0 0 0 0 0 0 0 0 2
    2 0 0 0 0 0 0 0 4 4 4 4 0 2
    2 0 0 0 0 0 0 0 0 0 0 4 0 2
    2 0 0 5 5 5 0 0 0 0 0 4 0 2
    2 0 0 0 0 0 0 0 4 4 4 4 0 2
    2 0 0 0 0 0 0 0 0 0 0 0 0 2
    2 0 0 0 0 0 0 0 0 0 0 0 0 2
    2 2 2 2 2 2 2 2 0 0 2 2 2 2
    2 0 0 0 0 0 0 2 0 0 2 5 5 2
    2 0 0 0 0 0 0 2 0 0 2 0 0 2
    2 0 0 3 3 0 0 2 0 0 2 0 0 2
    2 0 0 3 3 0 0 2 0 0 2 0 0 2
    2 0 0 0 0 0 0 0 0 0 0 0 0 2
    2 2 2 2 2 2 2 2 2 2 2 2 2 2
";

impl Level {
    /// The built-in level: two rooms joined by a corridor, lights, a candelabra and a
    /// handful of enemies including one large one.
    pub fn demo() -> Result<Self> {
        let map = GridMap::parse(DEMO_LAYOUT).context("demo layout")?;
        let walls = (1..=5).map(|id| (id, format!("res/textures/{id}.png"))).collect();

        let mut props = vec![
            PropSpawn {
                x: 4.5,
                y: 5.5,
                sprite: SpriteSource::Static("res/sprites/static_sprites/candlebra.png".into()),
            },
            PropSpawn {
                x: 4.0,
                y: 3.0,
                sprite: SpriteSource::animated("res/sprites/animated_sprites/green_light", 4),
            },
        ];
        let red = SpriteSource::animated("res/sprites/animated_sprites/red_light", 4);
        for (x, y) in [(9.5, 3.5), (10.5, 3.5), (9.5, 4.5), (10.5, 4.5)] {
            props.push(PropSpawn { x, y, sprite: red.clone() });
        }

        let grunt = SpriteSource::animated("res/sprites/npc/amog", 1);
        let mut enemies: Vec<EnemySpawn> = [
            (8.0, 7.0),
            (9.0, 7.0),
            (10.0, 7.0),
            (10.0, 1.5),
            (9.0, 1.5),
            (8.0, 1.5),
            // tucked away in the lower room
            (3.0, 10.0),
            (4.0, 10.0),
        ]
        .into_iter()
        .map(|(x, y)| EnemySpawn { x, y, radius: 0.5, health: 100, sprite: grunt.clone() })
        .collect();
        enemies.push(EnemySpawn {
            x: 10.0,
            y: 4.0,
            radius: 0.7,
            health: 600,
            sprite: SpriteSource::animated("res/sprites/npc/vsauce", 1),
        });

        Ok(Self {
            map,
            walls,
            sky: Some("res/textures/sky.png".into()),
            player_start: (2.0, 2.0, 0.0),
            props,
            enemies,
            weapon: WeaponLoadout {
                sprite: SpriteSource::animated("res/sprites/weapon/shotgun", 8),
                shoot_frames: 3,
                reload_frames: 4,
                max_ammo: 6,
                base_damage: 30,
            },
        })
    }

    /// Every image the level refers to, each listed once.
    pub fn asset_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.walls.iter().map(|(_, p)| p.clone()).collect();
        paths.extend(self.sky.iter().cloned());
        for prop in &self.props {
            paths.extend(prop.sprite.paths());
        }
        for enemy in &self.enemies {
            paths.extend(enemy.sprite.paths());
        }
        paths.extend(self.weapon.sprite.paths());

        let mut seen = std::collections::HashSet::new();
        paths.retain(|p| seen.insert(p.clone()));
        paths
    }

    /// Points the wall and sky slots of a loaded table at this level's textures.
    pub fn bind_textures(&self, textures: &mut TextureTable) -> Result<()> {
        for (wall_id, path) in &self.walls {
            let id = textures.lookup(path)?;
            textures.set_wall(*wall_id, id)?;
        }
        if let Some(path) = &self.sky {
            let id = textures.lookup(path)?;
            textures.set_sky(id);
        }
        Ok(())
    }
}
