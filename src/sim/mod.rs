// sim/ - Backdrop simulations
//
// Entity pools use Structure-of-Arrays with fixed capacity; persistent pools
// recycle slots in place, transient pools compact on expiry.
// Each entity type in its own module, each renderer in its own module.

mod beam;
mod blob;
mod field;
mod particle;
mod star;
mod starfield;

pub use beam::{BEAM_LIFESPAN, Beams, MAX_BEAM_POINTS, MAX_BEAMS, beam_alpha};
pub use blob::{BLOB_COUNT, Blobs};
pub use field::{AbstractFieldRenderer, BEAM_CHANCE, PARTICLE_CHANCE, TICK_INTERVAL};
pub use particle::{MAX_PARTICLES, Particles, fade_alpha};
pub use star::{STAR_COUNT, Stars, Z_MAX};
pub use starfield::{PROJECTION, StarfieldRenderer, depth};

use crate::render::Surface;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random source used when the host does not inject one.
pub type DefaultRng = Pcg32;

pub fn seeded(seed: u64) -> DefaultRng {
    Pcg32::seed_from_u64(seed)
}

/// A per-frame simulation that draws onto a surface.
pub trait Renderer {
    /// Viewport changed. Simulation state must survive.
    fn resize(&mut self, w: u32, h: u32);

    /// Advance to simulated time `t` (ms) and draw the frame.
    fn step<S: Surface>(&mut self, t: f64, surface: &mut S);
}

// Uniform in [0, 1)
#[inline(always)]
pub(crate) fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

// Uniform in [lo, hi)
#[inline(always)]
pub(crate) fn span<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + unit(rng) * (hi - lo)
}
