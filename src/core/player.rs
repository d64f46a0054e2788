//! Player pose, movement and grid collision.
use crate::config::EngineConfig;
use crate::core::input::{InputState, Key};
use crate::core::map::GridMap;
use crate::core::weapon::Weapon;

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(a: f32) -> f32 {
    let r = a.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if r >= 360.0 { 0.0 } else { r }
}

pub struct Player {
    pub x: f32,
    pub y: f32,
    pub angle: f32, // facing, degrees
    pub fov: f32,   // degrees
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
    pub sprinting: bool,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32, weapon: Weapon) -> Self {
        Self {
            x,
            y,
            angle: normalize_degrees(angle),
            fov: 60.0,
            radius: 0.1,
            speed: 1.5,
            health: 100,
            sprinting: false,
            weapon,
        }
    }

    /// Unit-or-shorter world direction requested by the movement keys.
    pub fn wish_dir(&self, input: &InputState) -> (f32, f32) {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (mut dx, mut dy) = (0.0, 0.0);
        if input.is_held(Key::Forward) {
            dx += cos;
            dy += sin;
        }
        if input.is_held(Key::Back) {
            dx -= cos;
            dy -= sin;
        }
        // strafing right is facing + 90 in a y-down world: (-sin, cos)
        if input.is_held(Key::StrafeRight) {
            dx -= sin;
            dy += cos;
        }
        if input.is_held(Key::StrafeLeft) {
            dx += sin;
            dy -= cos;
        }
        let len = (dx * dx + dy * dy).sqrt();
        if len > 1.0 {
            dx /= len;
            dy /= len;
        }
        (dx, dy)
    }

    /// Moves, clamps into the map, pushes out of walls and turns. One call per frame.
    pub fn update(&mut self, input: &InputState, map: &GridMap, cfg: &EngineConfig, dt: f32) {
        self.sprinting = input.is_held(Key::Sprint);
        let sprint = if self.sprinting { cfg.sprint_multiplier } else { 1.0 };
        let (dx, dy) = self.wish_dir(input);
        self.x += dx * self.speed * sprint * dt;
        self.y += dy * self.speed * sprint * dt;

        self.clamp_to(map);
        self.collide(map);

        if input.is_held(Key::TurnLeft) {
            self.angle -= cfg.turn_multiplier * cfg.mouse_sens * dt;
        } else if input.is_held(Key::TurnRight) {
            self.angle += cfg.turn_multiplier * cfg.mouse_sens * dt;
        } else {
            self.angle += cfg.mouse_sens * input.mouse_dx * dt;
        }
        self.angle = normalize_degrees(self.angle);
    }

    /// Keeps every collision probe inside the grid.
    pub fn clamp_to(&mut self, map: &GridMap) {
        let r = self.radius;
        let max_x = map.width() as f32 - r - 1e-4;
        let max_y = map.height() as f32 - r - 1e-4;
        self.x = if self.x.is_finite() { self.x.clamp(r, max_x) } else { r };
        self.y = if self.y.is_finite() { self.y.clamp(r, max_y) } else { r };
    }

    /// Axis-separated push-out, probing y-, y+, x+, x- in that order.
    ///
    /// Each probe only looks at the row or column through the centre, so a diagonal
    /// contact with a wall corner can leave a little penetration.
    pub fn collide(&mut self, map: &GridMap) {
        let r = self.radius;

        let cell_y = (self.y - r).floor();
        if map.is_solid(self.x, cell_y) {
            self.y = cell_y + 1.0 + r;
        }
        let cell_y = (self.y + r).floor();
        if map.is_solid(self.x, cell_y) {
            self.y = cell_y - r;
        }
        let cell_x = (self.x + r).floor();
        if map.is_solid(cell_x, self.y) {
            self.x = cell_x - r;
        }
        let cell_x = (self.x - r).floor();
        if map.is_solid(cell_x, self.y) {
            self.x = cell_x + 1.0 + r;
        }
    }
}
