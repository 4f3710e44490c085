use instant::Instant;

use super::{FrameSignal, FrameTime, Visualization, VisualizationKind};
use crate::constants::*;
use crate::core::deferred::Deferred;
use crate::core::error::VizError;
use crate::core::quality::QualityTier;
use crate::core::reactive::{ReactiveLimits, ReactiveParam};
use crate::core::scene::{SceneManager, SceneRenderer};
use crate::core::surface::SurfaceMetrics;

pub const STARS_LIGHT_LIMITS: ReactiveLimits = ReactiveLimits {
    min_interval: MIN_DELAY_BETWEEN_INTENSITY_CHANGE,
    max_delta: MAX_LIGHT_INTENSITY_DELTA,
    floor: MIN_LIGHT_INTENSITY,
};

/// 3D starfield lit by a light that follows the bass band.
///
/// The renderer arrives asynchronously; until then the backend is mounted
/// but not ready and reactive updates are dropped.
pub struct StarsViz<R: SceneRenderer> {
    pending: Option<Deferred<R>>,
    manager: Option<SceneManager<R>>,
    quality: QualityTier,
    metrics: SurfaceMetrics,
    released: bool,
}

impl<R: SceneRenderer> StarsViz<R> {
    pub fn new(pending: Deferred<R>, quality: QualityTier, metrics: SurfaceMetrics) -> Self {
        Self {
            pending: Some(pending),
            manager: None,
            quality,
            metrics,
            released: false,
        }
    }

    pub fn manager(&self) -> Option<&SceneManager<R>> {
        self.manager.as_ref()
    }

    /// Install the renderer if it resolved. Errors are initialization failures.
    fn poll_pending(&mut self, now: Instant) -> Result<(), VizError> {
        let Some(pending) = self.pending.as_ref() else {
            return Ok(());
        };
        match pending.take() {
            None => Ok(()),
            Some(Ok(renderer)) => {
                self.pending = None;
                let mut manager = SceneManager::new(
                    renderer,
                    self.metrics,
                    self.quality.stars().star_count,
                    MIN_LIGHT_INTENSITY,
                );
                manager.clock.start(now);
                manager.animate();
                log::info!(
                    "[stars] scene ready: {} stars ({} quality)",
                    manager.starfield().len(),
                    self.quality
                );
                self.manager = Some(manager);
                Ok(())
            }
            Some(Err(e)) => {
                self.pending = None;
                Err(e)
            }
        }
    }
}

impl<R: SceneRenderer> Visualization for StarsViz<R> {
    fn kind(&self) -> VisualizationKind {
        VisualizationKind::Stars
    }

    fn resize(&mut self, metrics: SurfaceMetrics, _time: &FrameTime) {
        self.metrics = metrics;
        if let Some(manager) = self.manager.as_mut() {
            manager.resize(metrics);
        }
    }

    fn on_sample(&mut self, _signal: &FrameSignal<'_>) -> Result<(), VizError> {
        Ok(())
    }

    fn on_frame(&mut self, time: &FrameTime) -> Result<(), VizError> {
        if self.released {
            return Ok(());
        }
        self.poll_pending(time.now)?;
        if let Some(manager) = self.manager.as_mut() {
            manager.step(time.now)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, now: Instant) {
        if self.released {
            return;
        }
        self.released = true;
        // dropping the slot tells a still-running initializer to discard its result
        if let Some(pending) = self.pending.take() {
            if let Some(Ok(mut renderer)) = pending.take() {
                renderer.release();
            }
        }
        if let Some(manager) = self.manager.as_mut() {
            manager.cleanup(now);
        }
    }

    fn reactive_limits(&self) -> Option<ReactiveLimits> {
        Some(STARS_LIGHT_LIMITS)
    }

    fn reactive_target(&self, signal: &FrameSignal<'_>) -> f32 {
        signal.band_intensity / LIGHT_INTENSITY_DIVISOR
    }

    fn reactive(&mut self) -> Option<&mut dyn ReactiveParam> {
        if self.released {
            return None;
        }
        self.manager.as_mut().map(|m| m as &mut dyn ReactiveParam)
    }
}
