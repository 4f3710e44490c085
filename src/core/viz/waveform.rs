use instant::Instant;
use smallvec::SmallVec;

use super::{FrameSignal, FrameTime, Visualization, VisualizationKind};
use crate::constants::*;
use crate::core::error::VizError;
use crate::core::quality::QualityTier;
use crate::core::surface::{fit_canvas, Canvas2d, LineCap, SurfaceMetrics};

type Bands = SmallVec<[f32; WAVEFORM_BANDS]>;

/// Mean magnitude per band, bins split into `WAVEFORM_BANDS` equal groups.
pub fn band_levels(magnitudes: &[f32]) -> Bands {
    let mut bands = Bands::new();
    if magnitudes.is_empty() {
        return bands;
    }
    let per_band = magnitudes.len().div_ceil(WAVEFORM_BANDS);
    for chunk in magnitudes.chunks(per_band) {
        bands.push(chunk.iter().sum::<f32>() / chunk.len() as f32);
    }
    bands
}

/// Spectrum line across the full width, with band columns behind it.
pub struct WaveformViz<C: Canvas2d> {
    canvas: C,
    quality: QualityTier,
    metrics: SurfaceMetrics,
    released: bool,
}

impl<C: Canvas2d> WaveformViz<C> {
    pub fn new(mut canvas: C, quality: QualityTier, metrics: SurfaceMetrics) -> Self {
        fit_canvas(&mut canvas, &metrics);
        Self {
            canvas,
            quality,
            metrics,
            released: false,
        }
    }

    fn level_to_y(&self, level: f32) -> f64 {
        let h = self.metrics.height;
        h - (level / MAGNITUDE_MAX).clamp(0.0, 1.0) as f64 * h * 0.8
    }
}

impl<C: Canvas2d> Visualization for WaveformViz<C> {
    fn kind(&self) -> VisualizationKind {
        VisualizationKind::Waveform
    }

    fn resize(&mut self, metrics: SurfaceMetrics, _time: &FrameTime) {
        if self.released {
            return;
        }
        self.metrics = metrics;
        fit_canvas(&mut self.canvas, &metrics);
    }

    fn on_sample(&mut self, signal: &FrameSignal<'_>) -> Result<(), VizError> {
        if self.released {
            return Ok(());
        }
        let (w, h) = (self.metrics.width, self.metrics.height);
        let q = self.quality.waveform();
        self.canvas.clear_rect(0.0, 0.0, w, h);

        if q.show_bands {
            let bands = band_levels(signal.magnitudes);
            let band_w = w / WAVEFORM_BANDS as f64;
            self.canvas.set_fill_style(WAVEFORM_BAND_COLOR);
            for (i, level) in bands.iter().enumerate() {
                let top = self.level_to_y(*level);
                self.canvas.fill_rect(i as f64 * band_w + 1.0, top, band_w - 2.0, h - top);
            }
        }

        let stride = q.bin_stride.max(1);
        let segments = signal.magnitudes.len().saturating_sub(1) / stride;
        if segments == 0 {
            return Ok(());
        }
        let dx = w / segments as f64;
        self.canvas.set_stroke_style(WAVEFORM_LINE_COLOR);
        self.canvas.set_line_width(1.0 + (signal.smoothed_intensity / 64.0).min(4.0) as f64);
        self.canvas.set_line_cap(LineCap::Round);
        self.canvas.begin_path();
        for (i, level) in signal.magnitudes.iter().step_by(stride).enumerate() {
            let (x, y) = (i as f64 * dx, self.level_to_y(*level));
            if i == 0 {
                self.canvas.move_to(x, y);
            } else {
                self.canvas.line_to(x, y);
            }
        }
        self.canvas.stroke();
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
