//! Engine tunables.
//!
//! Every field has a default, so a config file only needs the values it changes.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable holding an alternative config path.
pub const CONFIG_ENV: &str = "GRIDCASTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "gridcaster.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // window and internal render target
    pub window_width: u32,
    pub window_height: u32,
    pub view_width: u32,
    pub view_height: u32,
    pub target_fps: u32,
    pub max_frame_dt: f32,

    // projection
    pub ray_count: usize,
    pub ray_step: f32,
    pub wall_scale: f32,
    pub object_scale: f32,
    pub object_offset: f32,
    pub sky_width: f32,

    // controls
    pub mouse_sens: f32,
    pub turn_multiplier: f32,
    pub sprint_multiplier: f32,

    // animation and combat
    pub anim_frame_time: f32,
    pub weapon_frame_factor: f32,
    pub shotgun_rays: usize,
    pub shotgun_spread: f32,
    pub hurt_time: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            view_width: 620,
            view_height: 400,
            target_fps: 1000,
            max_frame_dt: 0.1,

            ray_count: 620,
            ray_step: 0.005,
            wall_scale: 15.0,
            object_scale: 10.0,
            object_offset: 0.3,
            sky_width: 1200.0,

            mouse_sens: 60.0,
            turn_multiplier: 2.0,
            sprint_multiplier: 2.0,

            anim_frame_time: 1.0 / 12.0,
            weapon_frame_factor: 4.0,
            shotgun_rays: 12,
            shotgun_spread: 6.0,
            hurt_time: 0.6,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text).context("invalid engine config")?;
        cfg.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Loads `$GRIDCASTER_CONFIG`, else `gridcaster.json` when present, else defaults.
    pub fn load_or_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(path);
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::load(DEFAULT_CONFIG_PATH);
        }
        log::info!("no config file found, using defaults");
        Ok(Self::default())
    }

    fn validated(self) -> Result<Self> {
        anyhow::ensure!(self.ray_count > 0, "ray_count must be positive");
        anyhow::ensure!(self.view_width > 0 && self.view_height > 0, "view size must be positive");
        anyhow::ensure!(self.ray_step > 0.0, "ray_step must be positive");
        anyhow::ensure!(self.shotgun_rays > 0, "shotgun_rays must be positive");
        anyhow::ensure!(self.anim_frame_time > 0.0, "anim_frame_time must be positive");
        Ok(self)
    }

    /// Screen pixels covered by one ray column.
    #[inline]
    pub fn column_width(&self) -> f32 {
        self.view_width as f32 / self.ray_count as f32
    }

    #[inline]
    pub fn weapon_frame_time(&self) -> f32 {
        self.weapon_frame_factor * self.anim_frame_time
    }
}
