//! Grid raycasting engine.
//!
//! - `config`: engine tunables
//! - `core`: map, player, weapon, enemies and the per-frame world update
//! - `render`: ray caster, wall/sprite projection and the draw command list

pub mod config;
pub mod core;
pub mod render;

pub use config::EngineConfig;
pub use crate::core::world::World;
pub use render::Renderer;
