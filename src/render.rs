// render.rs - Draw commands and the surfaces that consume them
//
// Renderers never touch a canvas directly. Each frame they push `DrawCmd`s
// into a `Surface`:
//   CommandBuffer  = records commands (native hosts, tests)
//   CanvasSurface  = replays onto a 2D canvas context (wasm32, see web.rs)

use crate::color::Color;

pub type Point = (f32, f32);

/// Canvas compositing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// `source-over`
    Normal,
    /// `screen`
    Screen,
}

impl Blend {
    pub fn as_css(self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Screen => "screen",
        }
    }
}

/// Two-stop radial gradient, both circles sharing one centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub r0: f32,
    pub r1: f32,
    pub inner: Color,
    pub outer: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Color),
    Radial(RadialGradient),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    SetBlend(Blend),
    Line { from: Point, to: Point, width: f32, color: Color },
    Circle { center: Point, radius: f32, fill: Fill },
    Ellipse { center: Point, rx: f32, ry: f32, fill: Fill },
    /// Open polyline stroked with round caps and joins.
    Polyline { points: Vec<Point>, width: f32, color: Color },
}

/// A drawable surface with mutable pixel dimensions.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, w: u32, h: u32);
    fn draw(&mut self, cmd: DrawCmd);
}

/// Surface that keeps every command it receives.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    w: u32,
    h: u32,
    cmds: Vec<DrawCmd>,
}

impl CommandBuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h, cmds: Vec::new() }
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Drain recorded commands, keeping the allocation.
    pub fn take(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.cmds)
    }
}

impl Surface for CommandBuffer {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn set_size(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
    }

    fn draw(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }
}

/// Cover the whole surface with a translucent colour instead of clearing it,
/// leaving a fading trail of previous frames.
pub fn fade<S: Surface>(surface: &mut S, color: Color) {
    let (w, h) = surface.size();
    surface.draw(DrawCmd::FillRect { x: 0.0, y: 0.0, w: w as f32, h: h as f32, color });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_covers_surface() {
        let mut buf = CommandBuffer::new(640, 480);
        fade(&mut buf, Color::rgba(0, 0, 0, 0.1));
        assert_eq!(
            buf.cmds(),
            &[DrawCmd::FillRect { x: 0.0, y: 0.0, w: 640.0, h: 480.0, color: Color::rgba(0, 0, 0, 0.1) }]
        );
    }

    #[test]
    fn take_drains() {
        let mut buf = CommandBuffer::new(1, 1);
        buf.draw(DrawCmd::SetBlend(Blend::Screen));
        assert_eq!(buf.take().len(), 1);
        assert!(buf.is_empty());
        assert_eq!(Blend::Screen.as_css(), "screen");
    }
}
