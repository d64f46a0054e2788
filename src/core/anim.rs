//! Sprite images and the animation clock.
use anyhow::{Result, ensure};

use crate::render::textures::TextureId;

/// Ordered frames played at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    frames: Vec<TextureId>,
    pub current: usize,
    pub frame_time: f32,
    pub timer: f32,
}

impl AnimatedSprite {
    pub fn new(frames: Vec<TextureId>, frame_time: f32) -> Result<Self> {
        ensure!(!frames.is_empty(), "animation needs at least one frame");
        ensure!(frame_time > 0.0, "frame time must be positive, got {frame_time}");
        Ok(Self { frames, current: 0, frame_time, timer: frame_time })
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.frames[self.current.min(self.frames.len() - 1)]
    }

    /// Counts the timer down; returns true when a frame boundary passed and resets it.
    #[inline]
    pub fn elapse(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = self.frame_time;
            true
        } else {
            false
        }
    }

    /// Jumps to `frame` with a fresh timer.
    pub fn restart_at(&mut self, frame: usize) {
        self.current = frame.min(self.frames.len() - 1);
        self.timer = self.frame_time;
    }

    /// Looping playback.
    pub fn tick(&mut self, dt: f32) {
        if self.elapse(dt) {
            self.current = (self.current + 1) % self.frames.len();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteImage {
    Static(TextureId),
    Animated(AnimatedSprite),
}

impl SpriteImage {
    pub fn texture(&self) -> TextureId {
        match self {
            SpriteImage::Static(id) => *id,
            SpriteImage::Animated(anim) => anim.texture(),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let SpriteImage::Animated(anim) = self {
            anim.tick(dt);
        }
    }
}
