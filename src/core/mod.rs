//! Core game types and logic (map, input, entities, world).
//!
//! Modules:
//! - `map`: Grid map parsing, validation and cell lookups
//! - `level`: Built-in level layout, spawns and asset manifest
//! - `input`: Per-frame input snapshot
//! - `anim`: Animation clock and sprite images
//! - `player`: Movement, grid collision and facing
//! - `weapon`: Weapon state machine and shotgun hit test
//! - `enemy`: Enemy hurt/dead state
//! - `world`: Aggregate state and the per-frame update

pub mod anim;
pub mod enemy;
pub mod input;
pub mod level;
pub mod map;
pub mod player;
pub mod weapon;
pub mod world;
