//! Weapon state machine and the shotgun spread hit test.
use anyhow::{Result, ensure};

use crate::config::EngineConfig;
use crate::core::anim::AnimatedSprite;
use crate::core::enemy::Enemy;
use crate::core::map::GridMap;
use crate::render::caster::cast;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeaponState {
    Idle,
    Firing,
    Reloading,
}

/// Enemies affected by one discharge, as indices into the enemy list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotReport {
    pub hit: Vec<usize>,
    pub killed: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    Fired(ShotReport),
    /// Empty magazine, a reload started instead.
    DryFire,
    /// Busy firing or reloading.
    Ignored,
}

/// Frame layout of the sprite: `[0]` idle, `[1..=shoot_frames]` firing, the rest reloading.
pub struct Weapon {
    pub sprite: AnimatedSprite,
    pub shoot_frames: usize,
    pub reload_frames: usize,
    pub state: WeaponState,
    pub base_damage: i32,
    pub max_ammo: u32,
    pub ammo: u32,
}

impl Weapon {
    pub fn new(
        mut sprite: AnimatedSprite,
        shoot_frames: usize,
        reload_frames: usize,
        max_ammo: u32,
        base_damage: i32,
    ) -> Result<Self> {
        ensure!(shoot_frames > 0 && reload_frames > 0, "weapon needs shoot and reload frames");
        ensure!(
            1 + shoot_frames + reload_frames == sprite.frame_count(),
            "weapon sprite has {} frames, expected 1 idle + {shoot_frames} shoot + {reload_frames} reload",
            sprite.frame_count()
        );
        sprite.restart_at(0);
        Ok(Self {
            sprite,
            shoot_frames,
            reload_frames,
            state: WeaponState::Idle,
            base_damage,
            max_ammo,
            ammo: max_ammo,
        })
    }

    #[inline]
    fn reload_start(&self) -> usize {
        self.shoot_frames + 1
    }

    fn start_reload(&mut self) {
        self.state = WeaponState::Reloading;
        self.sprite.restart_at(self.reload_start());
    }

    /// Explicit reload; only from idle with a partly empty magazine.
    pub fn reload(&mut self) -> bool {
        if self.state != WeaponState::Idle || self.ammo >= self.max_ammo {
            return false;
        }
        self.start_reload();
        true
    }

    /// Fires from the player's pose. Damage is resolved here, not per animation frame.
    pub fn pull_trigger(
        &mut self,
        origin: (f32, f32),
        facing: f32,
        map: &GridMap,
        enemies: &mut [Enemy],
        cfg: &EngineConfig,
    ) -> Trigger {
        if self.state != WeaponState::Idle {
            return Trigger::Ignored;
        }
        if self.ammo == 0 {
            self.start_reload();
            return Trigger::DryFire;
        }

        let report = shotgun_blast(origin, facing, map, enemies, self.base_damage, cfg);
        self.ammo -= 1;
        self.state = WeaponState::Firing;
        self.sprite.restart_at(1);
        Trigger::Fired(report)
    }

    /// Advances the firing/reload animation. Returns true when a reload just completed.
    pub fn update(&mut self, dt: f32) -> bool {
        match self.state {
            WeaponState::Idle => false,
            WeaponState::Firing => {
                if self.sprite.elapse(dt) {
                    self.sprite.current += 1;
                    if self.sprite.current > self.shoot_frames {
                        self.state = WeaponState::Idle;
                        self.sprite.restart_at(0);
                    }
                }
                false
            }
            WeaponState::Reloading => {
                if self.sprite.elapse(dt) {
                    self.sprite.current += 1;
                    if self.sprite.current >= self.sprite.frame_count() {
                        self.ammo = self.max_ammo;
                        self.state = WeaponState::Idle;
                        self.sprite.restart_at(0);
                        return true;
                    }
                }
                false
            }
        }
    }
}

/// Angles of the spread rays, `spread / rays` apart starting at `facing - spread / 2`.
pub fn spread_angles(facing: f32, rays: usize, spread: f32) -> impl Iterator<Item = f32> {
    let step = spread / rays as f32;
    let start = facing - spread / 2.0;
    (0..rays).map(move |r| start + r as f32 * step)
}

/// Whether segment p1-p2 passes within `radius` of (cx, cy).
pub fn circle_hits_segment(cx: f32, cy: f32, radius: f32, p1: (f32, f32), p2: (f32, f32)) -> bool {
    let (sx, sy) = (p2.0 - p1.0, p2.1 - p1.1);
    let len2 = sx * sx + sy * sy;
    let t = if len2 > 0.0 {
        (((cx - p1.0) * sx + (cy - p1.1) * sy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = p1.0 + t * sx - cx;
    let dy = p1.1 + t * sy - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Casts the spread once and damages every living enemy crossed by at least one ray,
/// at most once per enemy.
fn shotgun_blast(
    origin: (f32, f32),
    facing: f32,
    map: &GridMap,
    enemies: &mut [Enemy],
    damage: i32,
    cfg: &EngineConfig,
) -> ShotReport {
    let ends: Vec<(f32, f32)> = spread_angles(facing, cfg.shotgun_rays, cfg.shotgun_spread)
        .map(|a| cast(map, origin.0, origin.1, a, cfg.ray_step))
        .filter(|hit| !hit.is_miss())
        .map(|hit| (hit.x, hit.y))
        .collect();

    let mut report = ShotReport::default();
    for (i, enemy) in enemies.iter_mut().enumerate() {
        if enemy.dead {
            continue;
        }
        let struck = ends
            .iter()
            .any(|&end| circle_hits_segment(enemy.x, enemy.y, enemy.radius, origin, end));
        if struck {
            report.hit.push(i);
            if enemy.take_damage(damage, cfg.hurt_time) {
                report.killed.push(i);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anim::SpriteImage;
    use crate::core::enemy::EnemyState;
    use crate::render::textures::TextureId;

    fn shotgun(frame_time: f32) -> Weapon {
        let frames = (0..8).map(TextureId).collect();
        Weapon::new(AnimatedSprite::new(frames, frame_time).unwrap(), 3, 4, 6, 30).unwrap()
    }

    fn corridor() -> GridMap {
        GridMap::parse(
            "1 1 1 1 1 1 1 1 1 1
             1 0 0 0 0 0 0 0 0 1
             1 0 0 0 0 0 0 0 0 1
             1 0 0 0 0 0 0 0 0 1
             1 1 1 1 1 1 1 1 1 1",
        )
        .unwrap()
    }

    fn enemy(x: f32, y: f32) -> Enemy {
        Enemy::new(x, y, 0.5, 100, SpriteImage::Static(TextureId(99)))
    }

    #[test]
    fn spread_covers_the_facing_ray() {
        let angles: Vec<f32> = spread_angles(90.0, 12, 6.0).collect();
        assert_eq!(angles.len(), 12);
        assert_eq!(angles[0], 87.0);
        assert!(angles.contains(&90.0));
        assert!(angles.iter().all(|a| (87.0..=93.0).contains(a)));
    }

    #[test]
    fn segment_test_uses_the_closest_point() {
        assert!(circle_hits_segment(2.0, 0.4, 0.5, (0.0, 0.0), (4.0, 0.0)));
        assert!(!circle_hits_segment(2.0, 0.6, 0.5, (0.0, 0.0), (4.0, 0.0)));
        // beyond the end of the segment
        assert!(!circle_hits_segment(5.0, 0.0, 0.5, (0.0, 0.0), (4.0, 0.0)));
        assert!(circle_hits_segment(4.4, 0.0, 0.5, (0.0, 0.0), (4.0, 0.0)));
        // degenerate segment
        assert!(circle_hits_segment(0.1, 0.0, 0.5, (0.0, 0.0), (0.0, 0.0)));
    }

    #[test]
    fn each_shot_damages_once() {
        let cfg = EngineConfig::default();
        let map = corridor();
        let mut enemies = vec![enemy(5.5, 2.5)];
        let mut gun = shotgun(0.1);

        let Trigger::Fired(report) = gun.pull_trigger((1.5, 2.5), 0.0, &map, &mut enemies, &cfg)
        else {
            panic!("expected a shot");
        };
        assert_eq!(report.hit, vec![0]);
        assert!(report.killed.is_empty());
        assert_eq!(enemies[0].health, 70);
        assert_eq!(enemies[0].state, EnemyState::Hurt);
        assert_eq!(gun.ammo, 5);
        assert_eq!(gun.state, WeaponState::Firing);
        assert_eq!(gun.sprite.current, 1);
    }

    #[test]
    fn busy_weapon_ignores_the_trigger() {
        let cfg = EngineConfig::default();
        let map = corridor();
        let mut enemies = vec![enemy(5.5, 2.5)];
        let mut gun = shotgun(0.1);
        gun.pull_trigger((1.5, 2.5), 0.0, &map, &mut enemies, &cfg);
        let again = gun.pull_trigger((1.5, 2.5), 0.0, &map, &mut enemies, &cfg);
        assert_eq!(again, Trigger::Ignored);
        assert_eq!(enemies[0].health, 70);
    }

    #[test]
    fn misses_enemies_off_axis_and_behind_walls() {
        let cfg = EngineConfig::default();
        let map = corridor();
        // the second one stands beyond the far wall, past every ray's end point
        let mut enemies = vec![enemy(5.5, 1.2), enemy(12.0, 2.5)];
        let mut gun = shotgun(0.1);
        let shot = gun.pull_trigger((1.5, 3.5), 0.0, &map, &mut enemies, &cfg);
        assert_eq!(shot, Trigger::Fired(ShotReport::default()));
        assert!(enemies.iter().all(|e| e.health == 100));
    }

    #[test]
    fn firing_animation_returns_to_idle() {
        let cfg = EngineConfig::default();
        let mut gun = shotgun(0.1);
        gun.pull_trigger((1.5, 2.5), 0.0, &corridor(), &mut [], &cfg);
        for expected in [2, 3] {
            assert!(!gun.update(0.1));
            assert_eq!(gun.sprite.current, expected);
        }
        gun.update(0.1);
        assert_eq!(gun.state, WeaponState::Idle);
        assert_eq!(gun.sprite.current, 0);
    }

    #[test]
    fn empty_trigger_starts_reload_and_refills() {
        let cfg = EngineConfig::default();
        let map = corridor();
        let mut enemies = vec![enemy(5.5, 2.5)];
        let mut gun = shotgun(0.25);
        gun.ammo = 0;

        assert_eq!(gun.pull_trigger((1.5, 2.5), 0.0, &map, &mut enemies, &cfg), Trigger::DryFire);
        assert_eq!(gun.state, WeaponState::Reloading);
        assert_eq!(gun.sprite.current, 4);
        assert_eq!(enemies[0].health, 100);

        let finished: Vec<bool> = (0..4).map(|_| gun.update(0.25)).collect();
        assert_eq!(finished, vec![false, false, false, true]);
        assert_eq!(gun.ammo, 6);
        assert_eq!(gun.state, WeaponState::Idle);
    }

    #[test]
    fn reload_needs_idle_and_missing_ammo() {
        let cfg = EngineConfig::default();
        let mut gun = shotgun(0.1);
        assert!(!gun.reload());
        gun.pull_trigger((1.5, 2.5), 0.0, &corridor(), &mut [], &cfg);
        assert!(!gun.reload());
        while gun.state != WeaponState::Idle {
            gun.update(0.1);
        }
        assert!(gun.reload());
        assert_eq!(gun.state, WeaponState::Reloading);
    }

    #[test]
    fn rejects_mismatched_frame_layout() {
        let frames = (0..6).map(TextureId).collect();
        let sprite = AnimatedSprite::new(frames, 0.1).unwrap();
        assert!(Weapon::new(sprite, 3, 4, 6, 30).is_err());
    }
}
