// blob.rs - Pulsing colour blobs of the abstract field
//
// Each blob breathes on three independent oscillators and wanders around its
// anchor by easing toward a drift target that is re-rolled every few seconds.

use super::{span, unit};
use rand::Rng;
use std::f32::consts::TAU;

pub const BLOB_COUNT: usize = 12;

const BASE_MIN: f32 = 40.0;
const BASE_MAX: f32 = 160.0;

// Drift
const RETARGET_MS: f64 = 3000.0;
const DRIFT_RANGE: f32 = 30.0;
const DRIFT_EASE: f32 = 0.002;

// Hue rotation, degrees per ms
const HUE_RATE: f64 = 0.01;

pub struct Blobs {
    // Anchor
    pub x: [f32; BLOB_COUNT],
    pub y: [f32; BLOB_COUNT],
    pub base_w: [f32; BLOB_COUNT],
    pub base_h: [f32; BLOB_COUNT],

    // Oscillators (rad, rad/ms)
    pub phase: [f32; BLOB_COUNT],
    pub speed: [f32; BLOB_COUNT],
    pub width_phase: [f32; BLOB_COUNT],
    pub width_freq: [f32; BLOB_COUNT],
    pub height_phase: [f32; BLOB_COUNT],
    pub height_freq: [f32; BLOB_COUNT],

    // Colour
    pub hue_offset: [f32; BLOB_COUNT],
    pub saturation: [f32; BLOB_COUNT],
    pub lightness: [f32; BLOB_COUNT],

    // Drift
    pub drift_x: [f32; BLOB_COUNT],
    pub drift_y: [f32; BLOB_COUNT],
    pub target_x: [f32; BLOB_COUNT],
    pub target_y: [f32; BLOB_COUNT],
    pub retargeted_at: [f64; BLOB_COUNT],
}

impl Blobs {
    pub fn populate<R: Rng>(rng: &mut R, w: f32, h: f32) -> Self {
        let mut b = Self {
            x: [0.0; BLOB_COUNT],
            y: [0.0; BLOB_COUNT],
            base_w: [0.0; BLOB_COUNT],
            base_h: [0.0; BLOB_COUNT],
            phase: [0.0; BLOB_COUNT],
            speed: [0.0; BLOB_COUNT],
            width_phase: [0.0; BLOB_COUNT],
            width_freq: [0.0; BLOB_COUNT],
            height_phase: [0.0; BLOB_COUNT],
            height_freq: [0.0; BLOB_COUNT],
            hue_offset: [0.0; BLOB_COUNT],
            saturation: [0.0; BLOB_COUNT],
            lightness: [0.0; BLOB_COUNT],
            drift_x: [0.0; BLOB_COUNT],
            drift_y: [0.0; BLOB_COUNT],
            target_x: [0.0; BLOB_COUNT],
            target_y: [0.0; BLOB_COUNT],
            retargeted_at: [0.0; BLOB_COUNT],
        };

        for i in 0..BLOB_COUNT {
            b.x[i] = unit(rng) * w;
            b.y[i] = unit(rng) * h;
            b.base_w[i] = span(rng, BASE_MIN, BASE_MAX);
            b.base_h[i] = span(rng, BASE_MIN, BASE_MAX);
            b.phase[i] = unit(rng) * TAU;
            b.speed[i] = span(rng, 0.0002, 0.0006);
            b.hue_offset[i] = unit(rng) * 360.0;
            b.saturation[i] = span(rng, 60.0, 80.0);
            b.lightness[i] = span(rng, 30.0, 50.0);
            b.width_phase[i] = unit(rng) * TAU;
            b.height_phase[i] = unit(rng) * TAU;
            b.width_freq[i] = span(rng, 0.0001, 0.0003);
            b.height_freq[i] = span(rng, 0.0002, 0.0004);
        }
        b
    }

    /// Re-roll the drift target when it is stale, then ease toward it.
    pub fn drift<R: Rng>(&mut self, i: usize, t: f64, rng: &mut R) {
        if t - self.retargeted_at[i] > RETARGET_MS {
            self.target_x[i] = (unit(rng) - 0.5) * DRIFT_RANGE;
            self.target_y[i] = (unit(rng) - 0.5) * DRIFT_RANGE;
            self.retargeted_at[i] = t;
        }
        self.drift_x[i] += (self.target_x[i] - self.drift_x[i]) * DRIFT_EASE;
        self.drift_y[i] += (self.target_y[i] - self.drift_y[i]) * DRIFT_EASE;
    }

    /// Rendered (width, height) at time `t`.
    ///
    /// Width/height factors live in [0.6, 1.0] and the shared breathing factor
    /// in [0.7, 1.0], so the result is always a positive fraction of the base.
    pub fn size(&self, i: usize, t: f64) -> (f32, f32) {
        let ws = wave(t, self.width_freq[i], self.width_phase[i]) * 0.2 + 0.8;
        let hs = wave(t, self.height_freq[i], self.height_phase[i]) * 0.2 + 0.8;
        let bs = wave(t, self.speed[i], self.phase[i]) * 0.15 + 0.85;
        (self.base_w[i] * ws * bs, self.base_h[i] * hs * bs)
    }

    pub fn hue(&self, i: usize, t: f64) -> f32 {
        (t * HUE_RATE + self.hue_offset[i] as f64).rem_euclid(360.0) as f32
    }

    pub fn center(&self, i: usize) -> (f32, f32) {
        (self.x[i] + self.drift_x[i], self.y[i] + self.drift_y[i])
    }
}

// sin(t * freq + phase), evaluated in f64 so long sessions keep precision
#[inline]
fn wave(t: f64, freq: f32, phase: f32) -> f32 {
    (t * freq as f64 + phase as f64).sin() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded;
    use proptest::prelude::*;

    #[test]
    fn drift_retargets_only_after_interval() {
        let mut rng = seeded(5);
        let mut b = Blobs::populate(&mut rng, 800.0, 600.0);
        b.drift(0, 1000.0, &mut rng);
        assert_eq!(b.retargeted_at[0], 0.0);
        b.drift(0, 3001.0, &mut rng);
        assert_eq!(b.retargeted_at[0], 3001.0);
        assert!(b.target_x[0].abs() <= DRIFT_RANGE * 0.5);
    }

    #[test]
    fn drift_eases_without_jumping() {
        let mut rng = seeded(6);
        let mut b = Blobs::populate(&mut rng, 800.0, 600.0);
        b.target_x[0] = 10.0;
        b.retargeted_at[0] = 0.0;
        b.drift(0, 16.0, &mut rng);
        assert!((b.drift_x[0] - 0.02).abs() < 1e-6);
    }

    #[test]
    fn hue_wraps() {
        let mut b = Blobs::populate(&mut seeded(7), 10.0, 10.0);
        b.hue_offset[0] = 350.0;
        assert!((b.hue(0, 2000.0) - 10.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn size_is_positive_and_bounded(seed in any::<u64>(), t in 0.0f64..1.0e9) {
            let b = Blobs::populate(&mut seeded(seed), 1280.0, 720.0);
            for i in 0..BLOB_COUNT {
                let (w, h) = b.size(i, t);
                prop_assert!(w > 0.0 && h > 0.0);
                prop_assert!(w >= b.base_w[i] * 0.6 * 0.7 - 1e-3);
                prop_assert!(w <= b.base_w[i] + 1e-3);
                prop_assert!(h <= b.base_h[i] + 1e-3);
            }
        }
    }
}
