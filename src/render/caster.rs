//! Fixed-step ray march against the grid.
use crate::core::map::{GridMap, OPEN};

/// Distance reported by a ray that never hit anything.
pub const MISS_DISTANCE: f32 = f32::MAX;

// how far back (in steps) to re-sample when classifying the struck face
const BACKSTEP: f32 = 1.1;

/// Which grid line the ray crossed to enter the wall cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub x: f32,
    pub y: f32,
    pub wall: u8,
    pub face: Face,
    pub distance: f32,
}

impl RayHit {
    pub fn miss() -> Self {
        Self { x: 0.0, y: 0.0, wall: OPEN, face: Face::Horizontal, distance: MISS_DISTANCE }
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        self.wall == OPEN
    }

    /// Position along the struck face in `[0, 1)`, used as the texture column.
    #[inline]
    pub fn texture_u(&self) -> f32 {
        match self.face {
            Face::Horizontal => self.x.fract(),
            Face::Vertical => self.y.fract(),
        }
    }
}

/// Snaps a coordinate to the cell boundary the ray reaches first.
#[inline]
fn snap(v: f32, step: f32) -> f32 {
    if step > 0.0 { v.trunc() } else { v.trunc() + 1.0 }
}

/// Marches from (ox, oy) along `angle_deg` in increments of `step` until a solid cell.
///
/// The coordinate across the crossed grid line is snapped to that line; the other one
/// keeps its continuous value. Corner hits (both back-samples solid) are reported as
/// horizontal with both coordinates on the cell corner.
pub fn cast(map: &GridMap, ox: f32, oy: f32, angle_deg: f32, step: f32) -> RayHit {
    if !map.contains(ox, oy) {
        log::warn!("ray origin ({ox:.3}, {oy:.3}) is outside the map");
        return RayHit::miss();
    }
    if !(step > 0.0) {
        log::warn!("ray step must be positive, got {step}");
        return RayHit::miss();
    }

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let x_step = step * cos;
    let y_step = step * sin;
    let max_steps = (map.diagonal() / step) as usize;

    for i in 0..max_steps {
        let cx = ox + i as f32 * x_step;
        let cy = oy + i as f32 * y_step;

        let wall = match map.code_at(cx, cy) {
            Some(OPEN) => continue,
            Some(code) => code,
            None => break,
        };

        let back_y_open = map.code_at(cx, cy - y_step * BACKSTEP) == Some(OPEN);
        let back_x_open = map.code_at(cx - x_step * BACKSTEP, cy) == Some(OPEN);
        let (x, y, face) = if back_y_open {
            (cx, snap(cy, y_step), Face::Horizontal)
        } else if back_x_open {
            (snap(cx, x_step), cy, Face::Vertical)
        } else {
            (snap(cx, x_step), snap(cy, y_step), Face::Horizontal)
        };

        let (dx, dy) = (x - ox, y - oy);
        return RayHit { x, y, wall, face, distance: (dx * dx + dy * dy).sqrt() };
    }

    log::warn!("ray from ({ox:.3}, {oy:.3}) at {angle_deg:.2} deg did not hit a wall");
    RayHit::miss()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.005;

    fn room(width: usize, height: usize) -> GridMap {
        let mut cells = vec![OPEN; width * height];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || col == 0 || row == height - 1 || col == width - 1 {
                    cells[row * width + col] = 1;
                }
            }
        }
        GridMap::new(width, height, cells).unwrap()
    }

    #[test]
    fn straight_down_hits_a_horizontal_face() {
        let map = room(8, 8);
        let hit = cast(&map, 2.5, 6.5, 90.0, STEP);
        assert_eq!(hit.face, Face::Horizontal);
        assert_eq!(hit.x, 2.5);
        assert_eq!(hit.y, 7.0);
        assert_eq!(hit.wall, 1);
        assert!((hit.distance - 0.5).abs() < 1e-4);
    }

    #[test]
    fn straight_up_snaps_to_the_lower_edge() {
        let map = room(8, 8);
        let hit = cast(&map, 3.25, 4.0, 270.0, STEP);
        assert_eq!(hit.face, Face::Horizontal);
        assert_eq!(hit.y, 1.0);
        assert!((hit.x - 3.25).abs() < 1e-5);
    }

    #[test]
    fn east_and_west_hit_vertical_faces() {
        let map = room(8, 8);
        let east = cast(&map, 2.0, 2.5, 0.0, STEP);
        assert_eq!(east.face, Face::Vertical);
        assert_eq!(east.x, 7.0);
        assert!((east.y - 2.5).abs() < 1e-5);

        let west = cast(&map, 2.0, 2.5, 180.0, STEP);
        assert_eq!(west.face, Face::Vertical);
        assert_eq!(west.x, 1.0);
        assert!((west.distance - 1.0).abs() < 1e-3);
    }

    #[test]
    fn corner_hits_count_as_horizontal() {
        // diagonal straight into the far corner of the room
        let map = room(4, 4);
        let hit = cast(&map, 1.5, 1.5, 45.0, STEP);
        assert_eq!(hit.face, Face::Horizontal);
        assert_eq!((hit.x, hit.y), (3.0, 3.0));
    }

    #[test]
    fn distance_grows_with_the_room() {
        let mut last = 0.0;
        for width in 4..12 {
            let map = room(width, 6);
            for angle in [0.0_f32, 10.0, -20.0, 30.0] {
                let hit = cast(&map, 1.5, 3.0, angle, STEP);
                assert!(!hit.is_miss());
                if angle == 0.0 {
                    assert!(hit.distance >= last, "width {width}: {} < {last}", hit.distance);
                    last = hit.distance;
                }
            }
        }
    }

    #[test]
    fn origin_outside_is_a_miss() {
        let map = room(4, 4);
        for (x, y) in [(0.0, 2.0), (-1.0, 2.0), (2.0, 4.0), (f32::NAN, 1.0)] {
            let hit = cast(&map, x, y, 0.0, STEP);
            assert!(hit.is_miss());
            assert_eq!(hit.distance, MISS_DISTANCE);
        }
    }

    #[test]
    fn texture_u_follows_the_face() {
        let h = RayHit { x: 3.25, y: 5.0, wall: 1, face: Face::Horizontal, distance: 1.0 };
        let v = RayHit { x: 5.0, y: 2.75, wall: 1, face: Face::Vertical, distance: 1.0 };
        assert_eq!(h.texture_u(), 0.25);
        assert_eq!(v.texture_u(), 0.75);
    }
}
