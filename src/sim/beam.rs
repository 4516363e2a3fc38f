// beam.rs - Energy beams
//
// Short-lived jagged polylines: axis-aligned segments that turn left or
// right at every joint, pulsing while they fade out.

use super::{span, unit};
use crate::render::Point;
use rand::Rng;
use std::f32::consts::{PI, TAU};

pub const MAX_BEAMS: usize = 32;
pub const MAX_BEAM_POINTS: usize = 4;
pub const BEAM_LIFESPAN: f64 = 2000.0;

const MIN_POINTS: usize = 2;
const SEGMENT_MIN: f32 = 100.0;
const SEGMENT_MAX: f32 = 250.0;
const PULSES: f32 = 8.0;

pub struct Beams {
    // Geometry, immutable after spawn
    pub points: [[Point; MAX_BEAM_POINTS]; MAX_BEAMS],
    pub len: [u8; MAX_BEAMS],

    pub hue: [f32; MAX_BEAMS],
    pub birth: [f64; MAX_BEAMS],
    pub width: [f32; MAX_BEAMS],
    pub alpha: [f32; MAX_BEAMS],
    pub pulse_phase: [f32; MAX_BEAMS],
    pub pulse_speed: [f32; MAX_BEAMS],

    // Count
    pub n: usize,
}

impl Beams {
    pub fn new() -> Self {
        Self {
            points: [[(0.0, 0.0); MAX_BEAM_POINTS]; MAX_BEAMS],
            len: [0; MAX_BEAMS],
            hue: [0.0; MAX_BEAMS],
            birth: [0.0; MAX_BEAMS],
            width: [0.0; MAX_BEAMS],
            alpha: [0.0; MAX_BEAMS],
            pulse_phase: [0.0; MAX_BEAMS],
            pulse_speed: [0.0; MAX_BEAMS],
            n: 0,
        }
    }

    pub fn clear(&mut self) {
        self.n = 0;
    }

    /// Spawn a beam born at `t`. Returns false when the pool is full.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, w: f32, h: f32, t: f64) -> bool {
        if self.n >= MAX_BEAMS { return false; }

        let i = self.n;
        let count = MIN_POINTS + (unit(rng) * 3.0) as usize;
        let count = count.min(MAX_BEAM_POINTS);

        let mut x = unit(rng) * w;
        let mut y = unit(rng) * h;
        // 0 = +x, 1 = +y, 2 = -x, 3 = -y
        let mut dir = (unit(rng) * 4.0) as u8 % 4;

        for p in 0..count {
            self.points[i][p] = (x, y);
            let length = span(rng, SEGMENT_MIN, SEGMENT_MAX);
            match dir {
                0 => x += length,
                1 => y += length,
                2 => x -= length,
                _ => y -= length,
            }
            // Quarter turn left or right
            dir = (dir + if unit(rng) < 0.5 { 1 } else { 3 }) % 4;
        }

        self.len[i] = count as u8;
        self.hue[i] = unit(rng) * 360.0;
        self.birth[i] = t;
        self.width[i] = span(rng, 1.0, 3.0);
        self.alpha[i] = span(rng, 0.3, 0.6);
        self.pulse_phase[i] = unit(rng) * TAU;
        self.pulse_speed[i] = span(rng, 0.001, 0.002);
        self.n += 1;
        true
    }

    #[inline]
    pub fn is_alive(&self, i: usize, t: f64) -> bool {
        t - self.birth[i] < BEAM_LIFESPAN
    }

    /// Drop every beam whose lifespan has run out at `t`.
    pub fn expire(&mut self, t: f64) {
        let mut write = 0;

        for read in 0..self.n {
            if !self.is_alive(read, t) { continue; }

            self.points[write] = self.points[read];
            self.len[write] = self.len[read];
            self.hue[write] = self.hue[read];
            self.birth[write] = self.birth[read];
            self.width[write] = self.width[read];
            self.alpha[write] = self.alpha[read];
            self.pulse_phase[write] = self.pulse_phase[read];
            self.pulse_speed[write] = self.pulse_speed[read];
            write += 1;
        }

        self.n = write;
    }

    pub fn path(&self, i: usize) -> &[Point] {
        &self.points[i][..self.len[i] as usize]
    }

    pub fn alpha_at(&self, i: usize, t: f64) -> f32 {
        beam_alpha(t - self.birth[i], self.alpha[i], self.pulse_phase[i])
    }
}

impl Default for Beams {
    fn default() -> Self {
        Self::new()
    }
}

/// Opacity of a beam `age` ms old: linear fade times an 8-pulse flicker.
pub fn beam_alpha(age: f64, base: f32, phase: f32) -> f32 {
    let n = (age / BEAM_LIFESPAN) as f32;
    let pulse = (n * PI * PULSES + phase).sin() * 0.4 + 0.6;
    ((1.0 - n) * base * pulse).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded;

    #[test]
    fn segments_are_axis_aligned_and_turn() {
        let mut rng = seeded(11);
        let mut beams = Beams::new();
        for _ in 0..MAX_BEAMS {
            assert!(beams.spawn(&mut rng, 1000.0, 1000.0, 0.0));
        }
        assert!(!beams.spawn(&mut rng, 1000.0, 1000.0, 0.0));

        for i in 0..beams.n {
            let path = beams.path(i);
            assert!((MIN_POINTS..=MAX_BEAM_POINTS).contains(&path.len()));
            let mut prev_horizontal = None;
            for seg in path.windows(2) {
                let (dx, dy) = (seg[1].0 - seg[0].0, seg[1].1 - seg[0].1);
                let horizontal = dy == 0.0;
                assert!(horizontal || dx == 0.0);
                let length = dx.abs() + dy.abs();
                assert!(length > SEGMENT_MIN - 0.01 && length < SEGMENT_MAX + 0.01);
                if let Some(prev) = prev_horizontal {
                    assert_ne!(prev, horizontal);
                }
                prev_horizontal = Some(horizontal);
            }
        }
    }

    #[test]
    fn expire_keeps_live_beams_in_place() {
        let mut rng = seeded(12);
        let mut beams = Beams::new();
        beams.spawn(&mut rng, 500.0, 500.0, 0.0);
        beams.spawn(&mut rng, 500.0, 500.0, 1000.0);
        let kept = beams.path(1).to_vec();

        beams.expire(1999.0);
        assert_eq!(beams.n, 2);
        beams.expire(2000.0);
        assert_eq!(beams.n, 1);
        assert_eq!(beams.birth[0], 1000.0);
        assert_eq!(beams.path(0), kept.as_slice());
    }

    #[test]
    fn alpha_fades_to_zero() {
        assert_eq!(beam_alpha(BEAM_LIFESPAN, 0.5, 1.0), 0.0);
        assert_eq!(beam_alpha(BEAM_LIFESPAN * 1.5, 0.5, 1.0), 0.0);
        let a = beam_alpha(0.0, 0.5, 0.0);
        assert!((a - 0.3).abs() < 1e-6);
    }
}
