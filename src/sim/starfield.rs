// starfield.rs - Perspective warp through a field of stars
//
// Every frame: fade, fly each star toward the camera, project, then draw a
// streak from last frame's position, a dot and a soft glow.

use super::{DefaultRng, Renderer, STAR_COUNT, Stars, Z_MAX};
use crate::color::Color;
use crate::render::{DrawCmd, Fill, RadialGradient, Surface, fade};
use rand::Rng;

/// Perspective constant: screen offset = world offset * PROJECTION / z.
pub const PROJECTION: f32 = 800.0;

const FADE: Color = Color::rgba(0, 0, 0, 0.1);

pub struct StarfieldRenderer<R = DefaultRng> {
    w: f32,
    h: f32,
    cx: f32,
    cy: f32,
    stars: Stars,
    rng: R,
}

impl<R: Rng> StarfieldRenderer<R> {
    pub fn new(w: u32, h: u32, mut rng: R) -> Self {
        let (w, h) = (w as f32, h as f32);
        let stars = Stars::populate(&mut rng, w, h);
        Self { w, h, cx: w * 0.5, cy: h * 0.5, stars, rng }
    }

    pub fn stars(&self) -> &Stars {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut Stars {
        &mut self.stars
    }

    pub fn center(&self) -> (f32, f32) {
        (self.cx, self.cy)
    }

    fn draw_star<S: Surface>(&mut self, i: usize, surface: &mut S) {
        let s = &mut self.stars;
        let scale = PROJECTION / s.z[i];
        let x = s.x[i] * scale + self.cx;
        let y = s.y[i] * scale + self.cy;

        // First frame after spawn: no streak across the screen
        if !s.seeded[i] {
            s.px[i] = x;
            s.py[i] = y;
            s.seeded[i] = true;
        }

        let depth = depth(s.z[i]);
        let alpha = depth * s.brightness[i];
        let size = s.size[i] * depth;
        let blue = (200.0 + depth * 55.0) as u8;

        surface.draw(DrawCmd::Line {
            from: (s.px[i], s.py[i]),
            to: (x, y),
            width: size * 0.5,
            color: Color::rgba(255, 255, blue, alpha * 0.5),
        });
        surface.draw(DrawCmd::Circle {
            center: (x, y),
            radius: size,
            fill: Fill::Solid(Color::rgba(255, 255, blue, alpha)),
        });
        surface.draw(DrawCmd::Circle {
            center: (x, y),
            radius: size,
            fill: Fill::Radial(RadialGradient {
                center: (x, y),
                r0: 0.0,
                r1: size * 2.0,
                inner: Color::rgba(255, 255, 255, alpha * 0.2),
                outer: Color::TRANSPARENT_WHITE,
            }),
        });

        s.px[i] = x;
        s.py[i] = y;
    }
}

impl<R: Rng> Renderer for StarfieldRenderer<R> {
    fn resize(&mut self, w: u32, h: u32) {
        self.w = w as f32;
        self.h = h as f32;
        self.cx = self.w * 0.5;
        self.cy = self.h * 0.5;
    }

    fn step<S: Surface>(&mut self, _t: f64, surface: &mut S) {
        fade(surface, FADE);
        for i in 0..STAR_COUNT {
            if self.stars.advance(i) {
                self.stars.recycle(i, &mut self.rng, self.w, self.h);
            }
            self.draw_star(i, surface);
        }
    }
}

/// Normalised nearness: 0 at the far plane, 1 at the camera.
#[inline]
pub fn depth(z: f32) -> f32 {
    ((Z_MAX - z) / Z_MAX).clamp(0.0, 1.0)
}
