// field.rs - Abstract colour field
//
// Frame layout:
//   fade -> screen blend -> blobs -> spawn -> expire -> particles -> beams
//   -> normal blend -> quote tick

use super::{Beams, BLOB_COUNT, Blobs, DefaultRng, Particles, Renderer, unit};
use crate::color::Color;
use crate::render::{Blend, DrawCmd, Fill, RadialGradient, Surface, fade};
use rand::Rng;

/// Per-frame spawn probabilities.
pub const BEAM_CHANCE: f32 = 0.03;
pub const PARTICLE_CHANCE: f32 = 0.1;

/// Minimum simulated time between two outward ticks (ms).
pub const TICK_INTERVAL: f64 = 5000.0;

const FADE: Color = Color::rgba(0, 0, 0, 0.15);

// Beam passes: (width multiplier, saturation, lightness, alpha multiplier)
const BEAM_PASSES: [(f32, f32, f32, f32); 3] = [
    (1.0, 95.0, 85.0, 1.0),
    (2.0, 90.0, 65.0, 0.5),
    (4.0, 80.0, 45.0, 0.2),
];

pub struct AbstractFieldRenderer<R = DefaultRng> {
    w: f32,
    h: f32,
    blobs: Blobs,
    beams: Beams,
    particles: Particles,
    rng: R,
    last_tick: f64,
    on_tick: Option<Box<dyn FnMut()>>,
}

impl<R: Rng> AbstractFieldRenderer<R> {
    pub fn new(w: u32, h: u32, mut rng: R) -> Self {
        let (w, h) = (w as f32, h as f32);
        let blobs = Blobs::populate(&mut rng, w, h);
        Self {
            w,
            h,
            blobs,
            beams: Beams::new(),
            particles: Particles::new(),
            rng,
            last_tick: 0.0,
            on_tick: None,
        }
    }

    /// Register the callback fired at most once per `TICK_INTERVAL`.
    pub fn on_tick(&mut self, f: impl FnMut() + 'static) {
        self.on_tick = Some(Box::new(f));
    }

    pub fn blobs(&self) -> &Blobs {
        &self.blobs
    }

    pub fn beams(&self) -> &Beams {
        &self.beams
    }

    pub fn beams_mut(&mut self) -> &mut Beams {
        &mut self.beams
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Particles {
        &mut self.particles
    }

    fn draw_blobs<S: Surface>(&mut self, t: f64, surface: &mut S) {
        for i in 0..BLOB_COUNT {
            self.blobs.drift(i, t, &mut self.rng);

            let b = &self.blobs;
            let (w, h) = b.size(i, t);
            let hue = b.hue(i, t);
            let (s, l) = (b.saturation[i], b.lightness[i]);
            let center = b.center(i);

            surface.draw(DrawCmd::Ellipse {
                center,
                rx: w * 0.5,
                ry: h * 0.5,
                fill: Fill::Radial(RadialGradient {
                    center,
                    r0: 0.0,
                    r1: w,
                    inner: Color::hsla(hue, s, l, 0.15),
                    outer: Color::hsla(hue + 30.0, s, l, 0.02),
                }),
            });
        }
    }

    fn spawn(&mut self, t: f64) {
        if unit(&mut self.rng) < BEAM_CHANCE {
            self.beams.spawn(&mut self.rng, self.w, self.h, t);
        }
        if unit(&mut self.rng) < PARTICLE_CHANCE {
            self.particles.spawn(&mut self.rng, self.w, self.h, t);
        }
    }

    fn draw_particles<S: Surface>(&mut self, t: f64, surface: &mut S) {
        let p = &mut self.particles;
        for i in 0..p.n {
            p.advance(i);
            let alpha = p.alpha_at(i, t);
            surface.draw(DrawCmd::Circle {
                center: (p.x[i], p.y[i]),
                radius: p.size[i],
                fill: Fill::Solid(Color::hsla(p.hue[i], 80.0, 60.0, alpha * 0.15)),
            });
        }
    }

    fn draw_beams<S: Surface>(&self, t: f64, surface: &mut S) {
        let b = &self.beams;
        for i in 0..b.n {
            let alpha = b.alpha_at(i, t);
            for (wm, s, l, am) in BEAM_PASSES {
                surface.draw(DrawCmd::Polyline {
                    points: b.path(i).to_vec(),
                    width: b.width[i] * wm,
                    color: Color::hsla(b.hue[i], s, l, alpha * am),
                });
            }
        }
    }

    fn tick(&mut self, t: f64) {
        if t - self.last_tick < TICK_INTERVAL { return; }
        self.last_tick = t;
        if let Some(f) = self.on_tick.as_mut() {
            f();
        }
    }
}

impl<R: Rng> Renderer for AbstractFieldRenderer<R> {
    fn resize(&mut self, w: u32, h: u32) {
        self.w = w as f32;
        self.h = h as f32;
    }

    fn step<S: Surface>(&mut self, t: f64, surface: &mut S) {
        fade(surface, FADE);
        surface.draw(DrawCmd::SetBlend(Blend::Screen));

        self.draw_blobs(t, surface);
        self.spawn(t);
        self.beams.expire(t);
        self.particles.expire(t);
        self.draw_particles(t, surface);
        self.draw_beams(t, surface);

        surface.draw(DrawCmd::SetBlend(Blend::Normal));
        self.tick(t);
    }
}
