// star.rs - Starfield pool
//
// Fixed pool, never shrinks. A star that passes the camera is respawned in
// its own slot.

use super::{span, unit};
use rand::Rng;

pub const STAR_COUNT: usize = 400;

/// Far plane. Every live star keeps `0 < z <= Z_MAX`.
pub const Z_MAX: f32 = 1500.0;
const Z_SPAWN_MIN: f32 = 500.0;

const SIZE_MIN: f32 = 0.5;
const SIZE_MAX: f32 = 2.0;
const BRIGHTNESS_MIN: f32 = 0.5;
const SPEED_MIN: f32 = 0.5;

pub struct Stars {
    // Offset from screen centre, pre-projection
    pub x: [f32; STAR_COUNT],
    pub y: [f32; STAR_COUNT],
    pub z: [f32; STAR_COUNT],

    // Last projected screen position, valid once `seeded`
    pub px: [f32; STAR_COUNT],
    pub py: [f32; STAR_COUNT],
    pub seeded: [bool; STAR_COUNT],

    pub size: [f32; STAR_COUNT],
    pub brightness: [f32; STAR_COUNT],
    pub speed: [f32; STAR_COUNT],
}

impl Stars {
    /// Fill the whole pool with fresh stars scattered through the depth range.
    pub fn populate<R: Rng>(rng: &mut R, w: f32, h: f32) -> Self {
        let mut stars = Self {
            x: [0.0; STAR_COUNT],
            y: [0.0; STAR_COUNT],
            z: [Z_MAX; STAR_COUNT],
            px: [0.0; STAR_COUNT],
            py: [0.0; STAR_COUNT],
            seeded: [false; STAR_COUNT],
            size: [0.0; STAR_COUNT],
            brightness: [0.0; STAR_COUNT],
            speed: [0.0; STAR_COUNT],
        };
        for i in 0..STAR_COUNT {
            stars.spawn(i, rng, w, h);
        }
        stars
    }

    /// Fresh random star in slot `i`, depth anywhere in `[Z_SPAWN_MIN, Z_MAX)`.
    pub fn spawn<R: Rng>(&mut self, i: usize, rng: &mut R, w: f32, h: f32) {
        self.x[i] = unit(rng) * w - w * 0.5;
        self.y[i] = unit(rng) * h - h * 0.5;
        self.z[i] = span(rng, Z_SPAWN_MIN, Z_MAX);
        self.seeded[i] = false;
        self.size[i] = span(rng, SIZE_MIN, SIZE_MAX);
        self.brightness[i] = span(rng, BRIGHTNESS_MIN, 1.0);
        self.speed[i] = span(rng, SPEED_MIN, 1.0);
    }

    /// Respawn a star that passed the camera, back at the far plane.
    pub fn recycle<R: Rng>(&mut self, i: usize, rng: &mut R, w: f32, h: f32) {
        self.spawn(i, rng, w, h);
        self.z[i] = Z_MAX;
    }

    /// Move star `i` toward the camera. Returns true once it has passed it.
    #[inline]
    pub fn advance(&mut self, i: usize) -> bool {
        self.z[i] -= self.speed[i] * 2.0;
        self.z[i] <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded;

    #[test]
    fn populate_respects_depth_range() {
        let stars = Stars::populate(&mut seeded(1), 800.0, 600.0);
        for i in 0..STAR_COUNT {
            assert!(stars.z[i] >= Z_SPAWN_MIN && stars.z[i] <= Z_MAX);
            assert!(stars.x[i] >= -400.0 && stars.x[i] < 400.0);
            assert!(!stars.seeded[i]);
        }
    }

    #[test]
    fn advance_reports_camera_crossing() {
        let mut stars = Stars::populate(&mut seeded(2), 100.0, 100.0);
        stars.z[0] = 3.0;
        stars.speed[0] = 1.0;
        assert!(!stars.advance(0));
        assert_eq!(stars.z[0], 1.0);
        assert!(stars.advance(0));
    }

    #[test]
    fn recycle_resets_to_far_plane() {
        let mut rng = seeded(3);
        let mut stars = Stars::populate(&mut rng, 100.0, 100.0);
        stars.z[7] = -1.0;
        stars.seeded[7] = true;
        stars.recycle(7, &mut rng, 100.0, 100.0);
        assert_eq!(stars.z[7], Z_MAX);
        assert!(!stars.seeded[7]);
    }
}
