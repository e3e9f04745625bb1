use crate::constants::{TRAIL_CANVAS_CLASS, TRAIL_GLOW_BLUR_PX, TRAIL_Z_INDEX};
use crate::dom::{self, Listener};
use crate::frame::AnimationLoop;
use crate::style::rgba;
use glam::Vec2;
use stage_core::trail::{CursorTrail, TrailParticle, GRADIENT_STOPS};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Full-window 2D overlay painting the pointer trail.
pub struct TrailView {
    canvas: web::HtmlCanvasElement,
    trail: Rc<RefCell<CursorTrail>>,
    frame_loop: Option<AnimationLoop>,
    listeners: Vec<Listener>,
}

impl TrailView {
    pub fn mount(document: &web::Document) -> Option<Self> {
        let body = document.body()?;
        let canvas = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        canvas.set_class_name(TRAIL_CANVAS_CLASS);
        let style = canvas.style();
        for (k, v) in [
            ("position", "fixed"),
            ("inset", "0"),
            ("pointer-events", "none"),
            ("mix-blend-mode", "screen"),
        ] {
            _ = style.set_property(k, v);
        }
        _ = style.set_property("z-index", &TRAIL_Z_INDEX.to_string());
        body.append_child(&canvas).ok()?;
        fit_to_window(&canvas);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;

        let trail = Rc::new(RefCell::new(CursorTrail::default()));
        let mut listeners = Vec::new();
        let t = trail.clone();
        listeners.extend(dom::window_listener("pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                t.borrow_mut()
                    .spawn(Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
            }
        }));
        let c = canvas.clone();
        listeners.extend(dom::window_listener("resize", move |_| fit_to_window(&c)));

        let t = trail.clone();
        let c = canvas.clone();
        let frame_loop = AnimationLoop::start("trail", move |_| {
            let mut trail = t.borrow_mut();
            ctx.clear_rect(0.0, 0.0, c.width() as f64, c.height() as f64);
            trail.step();
            for p in trail.particles() {
                paint(&ctx, p);
            }
            true
        });
        log::info!("[trail] mounted");

        Some(Self {
            canvas,
            trail,
            frame_loop: Some(frame_loop),
            listeners,
        })
    }

    pub fn unmount(&mut self) {
        if let Some(mut l) = self.frame_loop.take() {
            l.stop();
        }
        self.listeners.clear();
        self.trail.borrow_mut().clear();
        if self.canvas.is_connected() {
            self.canvas.remove();
            log::info!("[trail] unmounted");
        }
    }
}

impl Drop for TrailView {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn fit_to_window(canvas: &web::HtmlCanvasElement) {
    let Some(w) = web::window() else {
        return;
    };
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    canvas.set_width(px(w.inner_width()));
    canvas.set_height(px(w.inner_height()));
}

fn paint(ctx: &web::CanvasRenderingContext2d, p: &TrailParticle) {
    let (x, y) = (p.position.x as f64, p.position.y as f64);
    let size = p.radius() as f64;
    if size <= 0.0 {
        return;
    }
    let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, size) else {
        return;
    };
    for (offset, rgb, alpha) in GRADIENT_STOPS {
        _ = gradient.add_color_stop(offset, &rgba(rgb, p.life * alpha));
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.begin_path();
    _ = ctx.arc(x, y, size, 0.0, TAU);
    ctx.fill();

    // glow core
    ctx.set_shadow_blur(TRAIL_GLOW_BLUR_PX);
    ctx.set_shadow_color(&rgba(GRADIENT_STOPS[0].1, p.life));
    ctx.begin_path();
    _ = ctx.arc(x, y, size * 0.5, 0.0, TAU);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
}
