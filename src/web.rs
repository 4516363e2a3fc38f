// web.rs - Browser host
//
// Binds renderers to <canvas> elements and pumps them from
// requestAnimationFrame. JS sees:
//   mount_starfield(id, seed?)               -> Backdrop
//   mount_abstract_field(id, on_tick, seed?) -> Backdrop
//   Backdrop.unmount()
//   new QuoteDeck(seed?)

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::driver::{AnimationDriver, DriverState};
use crate::error::HostError;
use crate::quote::QuoteRotator;
use crate::render::{DrawCmd, Fill, Surface};
use crate::sim::{AbstractFieldRenderer, DefaultRng, Renderer, StarfieldRenderer, seeded};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

// ============================================================================
// Canvas surface
// ============================================================================

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `#id`. A missing element or 2D context yields `Ok(None)`.
    pub fn find(document: &Document, id: &str) -> Result<Option<Self>, HostError> {
        let Some(el) = document.get_element_by_id(id) else {
            log::debug!("#{id} not in document");
            return Ok(None);
        };
        let canvas = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| HostError::NotACanvas(id.to_string()))?;
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
            _ => None,
        };
        Ok(ctx.map(|ctx| Self { canvas, ctx }))
    }

    fn replay(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::FillRect { x, y, w, h, color } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
            }
            DrawCmd::SetBlend(blend) => ctx.set_global_composite_operation(blend.as_css())?,
            DrawCmd::Line { from, to, width, color } => {
                ctx.begin_path();
                ctx.move_to(from.0 as f64, from.1 as f64);
                ctx.line_to(to.0 as f64, to.1 as f64);
                ctx.set_stroke_style_str(&color.to_string());
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCmd::Circle { center, radius, fill } => {
                ctx.begin_path();
                ctx.arc(center.0 as f64, center.1 as f64, *radius as f64, 0.0, TAU)?;
                self.fill(fill)?;
            }
            DrawCmd::Ellipse { center, rx, ry, fill } => {
                ctx.begin_path();
                ctx.ellipse(center.0 as f64, center.1 as f64, *rx as f64, *ry as f64, 0.0, 0.0, TAU)?;
                self.fill(fill)?;
            }
            DrawCmd::Polyline { points, width, color } => {
                let Some((first, rest)) = points.split_first() else { return Ok(()) };
                ctx.begin_path();
                ctx.move_to(first.0 as f64, first.1 as f64);
                for p in rest {
                    ctx.line_to(p.0 as f64, p.1 as f64);
                }
                ctx.set_stroke_style_str(&color.to_string());
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.set_line_join("round");
                ctx.stroke();
            }
        }
        Ok(())
    }

    // Fill the current path.
    fn fill(&self, fill: &Fill) -> Result<(), JsValue> {
        match fill {
            Fill::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            Fill::Radial(g) => {
                let (x, y) = (g.center.0 as f64, g.center.1 as f64);
                let grad = self.ctx.create_radial_gradient(x, y, g.r0 as f64, x, y, g.r1 as f64)?;
                grad.add_color_stop(0.0, &g.inner.to_string())?;
                grad.add_color_stop(1.0, &g.outer.to_string())?;
                self.ctx.set_fill_style_canvas_gradient(&grad);
            }
        }
        self.ctx.fill();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    fn draw(&mut self, cmd: DrawCmd) {
        if let Err(e) = self.replay(&cmd) {
            log::warn!("canvas replay failed: {e:?}");
        }
    }
}

// ============================================================================
// Frame loop
// ============================================================================

struct FrameLoop<R> {
    driver: AnimationDriver<R, CanvasSurface>,
    raf: Option<i32>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle to a mounted backdrop layer.
#[wasm_bindgen]
pub struct Backdrop {
    teardown: Option<Box<dyn FnOnce()>>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Stop drawing, cancel the pending frame, drop the resize listener.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.teardown.is_some()
    }
}

fn viewport(window: &Window) -> (u32, u32) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w as u32, h as u32)
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}

fn rng(seed: Option<u32>) -> DefaultRng {
    let seed = seed.map(u64::from).unwrap_or_else(|| (js_sys::Math::random() * (1u64 << 53) as f64) as u64);
    seeded(seed)
}

fn document(window: &Window) -> Result<Document, HostError> {
    window.document().ok_or(HostError::NoDocument)
}

/// Mount `driver` and keep it fed from requestAnimationFrame until unmounted.
/// `after_frame` runs once per frame with no renderer borrow held, so it may
/// call back into JS (and JS may unmount).
fn run<R: Renderer + 'static>(
    window: Window,
    driver: AnimationDriver<R, CanvasSurface>,
    mut after_frame: impl FnMut() + 'static,
) -> Result<Backdrop, HostError> {
    let state = Rc::new(RefCell::new(FrameLoop { driver, raf: None }));
    let (w, h) = viewport(&window);
    if !state.borrow_mut().driver.mount(w, h) {
        return Ok(Backdrop { teardown: None });
    }

    let on_resize = {
        let state = state.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let (w, h) = viewport(&window);
            if let Ok(mut st) = state.try_borrow_mut() {
                st.driver.resize(w, h);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let tick: FrameCallback = Rc::new(RefCell::new(None));
    {
        let state = state.clone();
        let window = window.clone();
        let next = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |t: f64| {
            let again = {
                let mut st = state.borrow_mut();
                st.raf = None;
                st.driver.frame(t)
            };
            after_frame();
            if !again { return; }

            let mut st = state.borrow_mut();
            if st.driver.state() != DriverState::Running { return; }
            if let Some(cb) = next.borrow().as_ref() {
                match request_frame(&window, cb) {
                    Ok(id) => st.raf = Some(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let first = tick.borrow().as_ref().map(|cb| request_frame(&window, cb)).transpose()?;
    state.borrow_mut().raf = first;

    let teardown = Box::new(move || {
        {
            let mut st = state.borrow_mut();
            if let Some(id) = st.raf.take() {
                let _ = window.cancel_animation_frame(id);
            }
            st.driver.unmount();
        }
        let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        drop(on_resize);
        // Breaks the closure's reference to itself
        tick.borrow_mut().take();
    });
    Ok(Backdrop { teardown: Some(teardown) })
}

// ============================================================================
// Exports
// ============================================================================

#[wasm_bindgen]
pub fn mount_starfield(canvas_id: &str, seed: Option<u32>) -> Result<Backdrop, JsValue> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let surface = CanvasSurface::find(&document(&window)?, canvas_id)?;
    let (w, h) = viewport(&window);
    let renderer = StarfieldRenderer::new(w, h, rng(seed));
    Ok(run(window, AnimationDriver::new(renderer, surface), || {})?)
}

#[wasm_bindgen]
pub fn mount_abstract_field(
    canvas_id: &str,
    on_tick: js_sys::Function,
    seed: Option<u32>,
) -> Result<Backdrop, JsValue> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let surface = CanvasSurface::find(&document(&window)?, canvas_id)?;
    let (w, h) = viewport(&window);

    let pending = Rc::new(Cell::new(0u32));
    let mut renderer = AbstractFieldRenderer::new(w, h, rng(seed));
    {
        let pending = pending.clone();
        renderer.on_tick(move || pending.set(pending.get() + 1));
    }

    let dispatch = move || {
        for _ in 0..pending.replace(0) {
            if let Err(e) = on_tick.call0(&JsValue::NULL) {
                log::warn!("on_tick threw: {e:?}");
            }
        }
    };
    Ok(run(window, AnimationDriver::new(renderer, surface), dispatch)?)
}

/// Quote rotation for the page overlay.
#[wasm_bindgen]
pub struct QuoteDeck {
    quotes: QuoteRotator,
    rng: DefaultRng,
}

#[wasm_bindgen]
impl QuoteDeck {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> QuoteDeck {
        QuoteDeck { quotes: QuoteRotator::default(), rng: rng(seed) }
    }

    pub fn current(&self) -> String {
        self.quotes.current().to_string()
    }

    pub fn advance(&mut self) -> String {
        self.quotes.advance(&mut self.rng).to_string()
    }

    pub fn hue(&self) -> f32 {
        self.quotes.hue()
    }
}
