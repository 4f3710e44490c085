use super::error::VizError;

/// Logical size of the drawing area plus the device pixel ratio.
///
/// Written by the stage on mount and resize, read by backends every render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl SurfaceMetrics {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Reject sizes the backing store cannot represent.
    pub fn validated(self) -> Result<Self, VizError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(VizError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        let device_pixel_ratio = if ok(self.device_pixel_ratio) {
            self.device_pixel_ratio
        } else {
            1.0
        };
        Ok(Self {
            device_pixel_ratio,
            ..self
        })
    }

    /// Backing pixel size: logical size times the device pixel ratio.
    pub fn backing_size(&self) -> (u32, u32) {
        let w_px = (self.width * self.device_pixel_ratio) as u32;
        let h_px = (self.height * self.device_pixel_ratio) as u32;
        (w_px.max(1), h_px.max(1))
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }
}

/// How stroke ends are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

/// Immediate-mode 2D drawing seam, modelled on the canvas 2D context.
///
/// Coordinates are logical pixels; implementations map them to the backing
/// store through `set_pixel_ratio`.
pub trait Canvas2d {
    /// Resize the backing pixel buffer. Resets any transform.
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn backing_size(&self) -> (u32, u32);
    /// Scale logical coordinates to backing pixels.
    fn set_pixel_ratio(&mut self, ratio: f64);

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&mut self, css: &str);
    fn set_stroke_style(&mut self, css: &str);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);

    fn set_font(&mut self, css: &str);
    /// Fill `text` centered on `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Detach the surface from the page. Further draws are ignored.
    fn release(&mut self);
}

/// Resize a canvas to the metrics' backing size and restore logical scaling.
pub fn fit_canvas<C: Canvas2d + ?Sized>(canvas: &mut C, metrics: &SurfaceMetrics) {
    let (w, h) = metrics.backing_size();
    canvas.set_backing_size(w, h);
    canvas.set_pixel_ratio(metrics.device_pixel_ratio);
}
