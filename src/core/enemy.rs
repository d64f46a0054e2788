//! Enemy combat state.
use crate::core::anim::SpriteImage;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Normal,
    Hurt,
}

pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub health: i32,
    /// Set once health drops to zero. Dead enemies stay in the list but are neither
    /// drawn nor hit.
    pub dead: bool,
    pub state: EnemyState,
    hurt_timer: f32,
    pub sprite: SpriteImage,
}

impl Enemy {
    pub fn new(x: f32, y: f32, radius: f32, health: i32, sprite: SpriteImage) -> Self {
        Self {
            x,
            y,
            radius,
            health,
            dead: health <= 0,
            state: EnemyState::Normal,
            hurt_timer: 0.0,
            sprite,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    #[inline]
    pub fn hurt_remaining(&self) -> f32 {
        self.hurt_timer
    }

    /// Applies one hit. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32, hurt_time: f32) -> bool {
        if self.dead {
            return false;
        }
        self.health -= amount;
        self.state = EnemyState::Hurt;
        self.hurt_timer = hurt_time;
        self.dead = self.health <= 0;
        self.dead
    }

    pub fn update(&mut self, dt: f32) {
        if self.state == EnemyState::Hurt {
            self.hurt_timer -= dt;
            if self.hurt_timer <= 0.0 {
                self.hurt_timer = 0.0;
                self.state = EnemyState::Normal;
            }
        }
        if self.health <= 0 {
            self.dead = true;
        }
        if !self.dead {
            self.sprite.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::textures::TextureId;

    fn grunt(health: i32) -> Enemy {
        Enemy::new(3.0, 4.0, 0.5, health, SpriteImage::Static(TextureId(0)))
    }

    #[test]
    fn hurt_wears_off() {
        let mut e = grunt(100);
        assert!(!e.take_damage(30, 0.6));
        assert_eq!(e.state, EnemyState::Hurt);
        e.update(0.5);
        assert_eq!(e.state, EnemyState::Hurt);
        e.update(0.2);
        assert_eq!(e.state, EnemyState::Normal);
        assert_eq!(e.health, 70);
    }

    #[test]
    fn another_hit_restarts_the_timer() {
        let mut e = grunt(100);
        e.take_damage(10, 0.6);
        e.update(0.5);
        e.take_damage(10, 0.6);
        e.update(0.5);
        assert_eq!(e.state, EnemyState::Hurt);
        assert!((e.hurt_remaining() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn dies_at_zero_and_stays_dead() {
        let mut e = grunt(60);
        assert!(!e.take_damage(30, 0.6));
        assert!(e.take_damage(30, 0.6));
        assert!(e.dead);
        assert!(!e.take_damage(30, 0.6));
        assert_eq!(e.health, 0);
        e.update(1.0);
        assert!(!e.is_alive());
    }

    #[test]
    fn health_set_directly_is_caught_on_update() {
        let mut e = grunt(100);
        e.health = -5;
        e.update(0.016);
        assert!(e.dead);
    }
}
