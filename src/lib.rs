// ============================================================================
// BACKDROP ENGINE - Animated canvas backgrounds for the journal page
// ============================================================================
//
// Two independent layers, each a `Renderer` pumped once per display frame:
//   StarfieldRenderer      = perspective warp through a recycled star pool
//   AbstractFieldRenderer  = pulsing blobs, energy beams, particle trails
//
// Renderers emit `DrawCmd`s into a `Surface`. In the browser (wasm32) the
// surface is a 2D canvas fed from requestAnimationFrame; elsewhere a
// `CommandBuffer` records the frame.

pub mod color;
pub mod driver;
pub mod error;
pub mod quote;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Backdrop, CanvasSurface, QuoteDeck, mount_abstract_field, mount_starfield};

pub use color::Color;
pub use driver::{AnimationDriver, DriverState};
pub use error::HostError;
pub use quote::QuoteRotator;
pub use render::{Blend, CommandBuffer, DrawCmd, Fill, Surface};
pub use sim::{AbstractFieldRenderer, DefaultRng, Renderer, StarfieldRenderer, seeded};
