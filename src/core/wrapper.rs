use instant::Instant;

use super::error::VizError;
use super::feature::{sanitize, sanitize_magnitude, AudioFeatureSample};
use super::quality::QualityTier;
use super::reactive::RateLimiter;
use super::viz::{FrameSignal, FrameTime, Visualization, VisualizationKind};
use super::surface::SurfaceMetrics;

/// Gives every backend the same normalized per-frame input.
///
/// Owns the persistent smoothing state and the rate limiter for the backend's
/// reactive parameter, so both reset whenever the backend is remounted.
pub struct Wrapped {
    backend: Box<dyn Visualization>,
    quality: QualityTier,
    smoothing: f32,
    smoothed: Option<f32>,
    limiter: Option<RateLimiter>,
    magnitudes: Vec<f32>,
    dropped_updates: u64,
}

impl Wrapped {
    pub fn new(backend: Box<dyn Visualization>, quality: QualityTier, mounted_at: Instant) -> Self {
        let smoothing = backend.kind().options().smoothing.clamp(0.0, 1.0);
        let limiter = backend
            .reactive_limits()
            .map(|limits| RateLimiter::new(limits, mounted_at));
        Self {
            backend,
            quality,
            smoothing,
            smoothed: None,
            limiter,
            magnitudes: Vec::new(),
            dropped_updates: 0,
        }
    }

    pub fn kind(&self) -> VisualizationKind {
        self.backend.kind()
    }

    pub fn quality(&self) -> QualityTier {
        self.quality
    }

    pub fn smoothed_intensity(&self) -> Option<f32> {
        self.smoothed
    }

    /// Reactive updates dropped because the backend was not ready yet.
    pub fn dropped_updates(&self) -> u64 {
        self.dropped_updates
    }

    pub fn backend(&self) -> &dyn Visualization {
        self.backend.as_ref()
    }

    pub fn push(&mut self, sample: &AudioFeatureSample, now: Instant) -> Result<(), VizError> {
        let input = sanitize(sample.smoothed_intensity);
        let smoothed = match self.smoothed {
            Some(prev) => prev + (input - prev) * self.smoothing,
            None => input,
        };
        self.smoothed = Some(smoothed);

        self.magnitudes.clear();
        self.magnitudes
            .extend(sample.magnitudes.iter().copied().map(sanitize_magnitude));

        let signal = FrameSignal {
            smoothed_intensity: smoothed,
            band_intensity: sanitize(sample.band_intensity),
            magnitudes: &self.magnitudes,
            quality: self.quality,
            now,
        };

        if let Some(limiter) = self.limiter.as_mut() {
            let target = self.backend.reactive_target(&signal);
            match self.backend.reactive() {
                Some(param) => {
                    limiter.apply(param, target, now);
                }
                None => {
                    self.dropped_updates += 1;
                    log::debug!("[wrapper] backend not ready; reactive update dropped");
                }
            }
        }

        self.backend.on_sample(&signal)
    }

    pub fn frame(&mut self, time: &FrameTime) -> Result<(), VizError> {
        self.backend.on_frame(time)
    }

    pub fn resize(&mut self, metrics: SurfaceMetrics, time: &FrameTime) {
        self.backend.resize(metrics, time);
    }

    pub fn cleanup(&mut self, now: Instant) {
        self.backend.cleanup(now);
    }
}
