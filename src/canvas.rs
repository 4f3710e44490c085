use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::surface::LineCap;
use crate::core::{Canvas2d, VizError};
use crate::dom;

/// `Canvas2d` over a DOM canvas and its 2D context.
pub struct WebCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    released: bool,
}

impl WebCanvas {
    pub fn new(canvas: web::HtmlCanvasElement, layer: &'static str) -> Result<Self, VizError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok());
        let Some(ctx) = ctx else {
            dom::remove_canvas(&canvas);
            return Err(VizError::NoCanvasContext { layer });
        };
        Ok(Self {
            canvas,
            ctx,
            released: false,
        })
    }
}

impl Canvas2d for WebCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        // resizing resets the context state, transform included
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        _ = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn set_fill_style(&mut self, css: &str) {
        self.ctx.set_fill_style_str(css);
    }

    fn set_stroke_style(&mut self, css: &str) {
        self.ctx.set_stroke_style_str(css);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // only fails on a negative radius
        _ = self.ctx.arc(x, y, radius.max(0.0), start, end);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        _ = self.ctx.translate(x, y);
    }

    fn set_font(&mut self, css: &str) {
        self.ctx.set_font(css);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        _ = self.ctx.fill_text(text, x, y);
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            dom::remove_canvas(&self.canvas);
        }
    }
}

impl Drop for WebCanvas {
    fn drop(&mut self) {
        self.release();
    }
}
