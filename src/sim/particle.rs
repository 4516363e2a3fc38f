// particle.rs - Drifting particle trails
//
// Dots that travel in a straight line at constant speed and fade linearly
// over a randomised lifetime.

use super::{span, unit};
use rand::Rng;
use std::f32::consts::TAU;

pub const MAX_PARTICLES: usize = 256;

const LIFE_MIN: f32 = 2000.0;
const LIFE_MAX: f32 = 4000.0;

pub struct Particles {
    // Position
    pub x: [f32; MAX_PARTICLES],
    pub y: [f32; MAX_PARTICLES],

    // Motion, px per frame along `angle`
    pub speed: [f32; MAX_PARTICLES],
    pub angle: [f32; MAX_PARTICLES],

    pub size: [f32; MAX_PARTICLES],
    pub hue: [f32; MAX_PARTICLES],

    // Lifetime (ms)
    pub birth: [f64; MAX_PARTICLES],
    pub life: [f32; MAX_PARTICLES],

    // Count
    pub n: usize,
}

impl Particles {
    pub fn new() -> Self {
        Self {
            x: [0.0; MAX_PARTICLES],
            y: [0.0; MAX_PARTICLES],
            speed: [0.0; MAX_PARTICLES],
            angle: [0.0; MAX_PARTICLES],
            size: [0.0; MAX_PARTICLES],
            hue: [0.0; MAX_PARTICLES],
            birth: [0.0; MAX_PARTICLES],
            life: [0.0; MAX_PARTICLES],
            n: 0,
        }
    }

    pub fn clear(&mut self) {
        self.n = 0;
    }

    /// Spawn a particle born at `t`. Returns false when the pool is full.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, w: f32, h: f32, t: f64) -> bool {
        if self.n >= MAX_PARTICLES { return false; }

        let i = self.n;
        self.x[i] = unit(rng) * w;
        self.y[i] = unit(rng) * h;
        self.size[i] = span(rng, 1.0, 3.0);
        self.hue[i] = unit(rng) * 360.0;
        self.birth[i] = t;
        self.speed[i] = span(rng, 0.5, 1.5);
        self.angle[i] = unit(rng) * TAU;
        self.life[i] = span(rng, LIFE_MIN, LIFE_MAX);
        self.n += 1;
        true
    }

    #[inline]
    pub fn is_alive(&self, i: usize, t: f64) -> bool {
        t - self.birth[i] < self.life[i] as f64
    }

    /// Drop every particle past its lifetime at `t`.
    pub fn expire(&mut self, t: f64) {
        let mut write = 0;

        for read in 0..self.n {
            if !self.is_alive(read, t) { continue; }

            self.x[write] = self.x[read];
            self.y[write] = self.y[read];
            self.speed[write] = self.speed[read];
            self.angle[write] = self.angle[read];
            self.size[write] = self.size[read];
            self.hue[write] = self.hue[read];
            self.birth[write] = self.birth[read];
            self.life[write] = self.life[read];
            write += 1;
        }

        self.n = write;
    }

    /// Move particle `i` one frame along its heading.
    #[inline]
    pub fn advance(&mut self, i: usize) {
        let (sin, cos) = self.angle[i].sin_cos();
        self.x[i] += cos * self.speed[i];
        self.y[i] += sin * self.speed[i];
    }

    pub fn alpha_at(&self, i: usize, t: f64) -> f32 {
        fade_alpha(t - self.birth[i], self.life[i] as f64)
    }
}

impl Default for Particles {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear fade: 1 at birth, exactly 0 from `age == life` on.
pub fn fade_alpha(age: f64, life: f64) -> f32 {
    (1.0 - age / life).max(0.0) as f32
}
