// driver.rs - Frame scheduling contract
//
// The host owns the real frame source (requestAnimationFrame in the browser,
// a plain loop in tests) and pumps `frame(timestamp)`. The driver owns the
// renderer and its surface and decides whether another frame is wanted.

use crate::render::Surface;
use crate::sim::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, not yet mounted.
    Idle,
    Running,
    /// Unmounted. Terminal.
    Stopped,
}

pub struct AnimationDriver<R, S> {
    renderer: R,
    surface: Option<S>,
    state: DriverState,
    last_t: f64,
    frames: u64,
}

impl<R: Renderer, S: Surface> AnimationDriver<R, S> {
    /// `surface` is `None` when the host could not obtain a drawable yet.
    pub fn new(renderer: R, surface: Option<S>) -> Self {
        Self { renderer, surface, state: DriverState::Idle, last_t: 0.0, frames: 0 }
    }

    /// Size the surface to the viewport and start accepting frames.
    ///
    /// Returns false without side effects when no surface is available or the
    /// driver was already unmounted.
    pub fn mount(&mut self, w: u32, h: u32) -> bool {
        match self.state {
            DriverState::Running => return true,
            DriverState::Stopped => return false,
            DriverState::Idle => {}
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("no drawing surface, skipping mount");
            return false;
        };
        surface.set_size(w, h);
        self.renderer.resize(w, h);
        self.state = DriverState::Running;
        log::info!("backdrop mounted at {w}x{h}");
        true
    }

    /// Resync surface and renderer to a new viewport. Simulation state is kept.
    pub fn resize(&mut self, w: u32, h: u32) {
        if self.state != DriverState::Running { return; }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_size(w, h);
            self.renderer.resize(w, h);
            log::debug!("backdrop resized to {w}x{h}");
        }
    }

    /// Run one frame at timestamp `t` (ms).
    ///
    /// Returns whether the host should schedule the next frame. Timestamps
    /// that go backwards are held at the last seen value.
    pub fn frame(&mut self, t: f64) -> bool {
        if self.state != DriverState::Running { return false; }
        let Some(surface) = self.surface.as_mut() else { return false; };

        let t = t.max(self.last_t);
        self.last_t = t;
        self.renderer.step(t, surface);
        self.frames += 1;
        true
    }

    /// Stop for good. Further frames draw nothing.
    pub fn unmount(&mut self) {
        if self.state == DriverState::Stopped { return; }
        self.state = DriverState::Stopped;
        log::info!("backdrop unmounted after {} frames", self.frames);
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}
