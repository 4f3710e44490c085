use instant::Instant;

use super::{FrameSignal, FrameTime, Visualization, VisualizationKind};
use crate::constants::*;
use crate::core::error::VizError;
use crate::core::surface::{fit_canvas, Canvas2d, SurfaceMetrics};

/// Static stand-in mounted when the selected visualization is disabled on
/// mobile devices. Ignores audio; redraws only when resized.
pub struct MobileNoticeViz<C: Canvas2d> {
    canvas: C,
    metrics: SurfaceMetrics,
    released: bool,
}

impl<C: Canvas2d> MobileNoticeViz<C> {
    pub fn new(mut canvas: C, metrics: SurfaceMetrics) -> Self {
        fit_canvas(&mut canvas, &metrics);
        let mut notice = Self {
            canvas,
            metrics,
            released: false,
        };
        notice.draw();
        notice
    }

    fn draw(&mut self) {
        let (w, h) = (self.metrics.width, self.metrics.height);
        let font_px = (w.min(h) / 24.0).clamp(12.0, 28.0);
        self.canvas.clear_rect(0.0, 0.0, w, h);
        self.canvas.set_fill_style(WALL_COLOR);
        self.canvas.fill_rect(0.0, 0.0, w, h);
        self.canvas.set_fill_style(NOTICE_TEXT_COLOR);
        self.canvas.set_font(&format!("{font_px:.0}px sans-serif"));
        self.canvas.fill_text(MOBILE_DISABLED_MESSAGE, w / 2.0, h / 2.0);
    }
}

impl<C: Canvas2d> Visualization for MobileNoticeViz<C> {
    fn kind(&self) -> VisualizationKind {
        VisualizationKind::MobileDisabled
    }

    fn resize(&mut self, metrics: SurfaceMetrics, _time: &FrameTime) {
        if self.released {
            return;
        }
        self.metrics = metrics;
        fit_canvas(&mut self.canvas, &metrics);
        self.draw();
    }

    fn on_sample(&mut self, _signal: &FrameSignal<'_>) -> Result<(), VizError> {
        Ok(())
    }

    fn on_frame(&mut self, _time: &FrameTime) -> Result<(), VizError> {
        Ok(())
    }

    fn cleanup(&mut self, _now: Instant) {
        if !self.released {
            self.released = true;
            self.canvas.release();
        }
    }
}
