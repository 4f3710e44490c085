use instant::Instant;

use super::error::VizError;
use super::feature::AudioFeatureSample;
use super::quality::QualityTier;
use super::surface::SurfaceMetrics;
use super::viz::{create_backend, FrameTime, Platform, VisualizationKind};
use super::wrapper::Wrapped;

/// Host-provided mount options.
///
/// `style` is inline CSS applied to every surface the backend creates.
/// `mobile` marks a mobile device; visualizations disabled there mount the
/// mobile notice instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountOptions {
    pub quality: QualityTier,
    pub style: Option<String>,
    pub mobile: bool,
}

/// Mount point for exactly one visualization at a time.
///
/// Owns the platform, the current surface metrics and the wrapped backend.
/// Swapping or changing quality unmounts the old backend (stopping its loop
/// and releasing its surfaces) before the replacement is constructed.
pub struct Stage<P: Platform> {
    platform: P,
    kind: VisualizationKind,
    options: MountOptions,
    metrics: SurfaceMetrics,
    mounted: Option<Wrapped>,
}

impl<P: Platform> Stage<P> {
    pub fn mount(
        platform: P,
        kind: VisualizationKind,
        options: MountOptions,
        metrics: SurfaceMetrics,
        time: &FrameTime,
    ) -> Result<Self, VizError> {
        let mut stage = Self {
            platform,
            kind,
            options,
            metrics: metrics.validated()?,
            mounted: None,
        };
        stage.mount_current(time)?;
        Ok(stage)
    }

    fn mount_current(&mut self, time: &FrameTime) -> Result<(), VizError> {
        debug_assert!(self.mounted.is_none());
        let kind = self.kind.resolve(self.options.mobile);
        if kind != self.kind {
            log::info!("[stage] {} is disabled on mobile; showing notice", self.kind);
        }
        let backend = create_backend(
            kind,
            &mut self.platform,
            self.options.quality,
            self.metrics,
            self.options.style.as_deref(),
            time,
        )?;
        let (w_px, h_px) = self.metrics.backing_size();
        log::info!(
            "[stage] mounted {} ({} quality) at {}x{} px",
            kind,
            self.options.quality,
            w_px,
            h_px
        );
        self.mounted = Some(Wrapped::new(backend, self.options.quality, time.now));
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The selected visualization.
    pub fn kind(&self) -> VisualizationKind {
        self.kind
    }

    /// What is on screen: the selection, or its mobile fallback.
    pub fn active_kind(&self) -> Option<VisualizationKind> {
        self.mounted.as_ref().map(Wrapped::kind)
    }

    pub fn quality(&self) -> QualityTier {
        self.options.quality
    }

    pub fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    pub fn wrapped(&self) -> Option<&Wrapped> {
        self.mounted.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Feed one feature sample to the mounted backend.
    pub fn push_sample(&mut self, sample: &AudioFeatureSample, now: Instant) -> Result<(), VizError> {
        match self.mounted.as_mut() {
            Some(w) => w.push(sample, now),
            None => Ok(()),
        }
    }

    /// Per-animation-frame work. Fatal errors unmount the backend and are
    /// returned; render errors are logged and the loop goes on.
    pub fn animation_frame(&mut self, time: &FrameTime) -> Result<(), VizError> {
        let Some(w) = self.mounted.as_mut() else {
            return Ok(());
        };
        match w.frame(time) {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => {
                log::error!("[stage] {} failed: {}", self.kind, e);
                self.unmount(time.now);
                Err(e)
            }
            Err(e) => {
                log::warn!("[stage] {} frame error: {}", self.kind, e);
                Ok(())
            }
        }
    }

    /// Apply new window metrics to the mounted backend in place.
    pub fn resize(&mut self, metrics: SurfaceMetrics, time: &FrameTime) -> Result<(), VizError> {
        let metrics = metrics.validated()?;
        if metrics == self.metrics {
            return Ok(());
        }
        self.metrics = metrics;
        if let Some(w) = self.mounted.as_mut() {
            let (w_px, h_px) = metrics.backing_size();
            log::debug!("[stage] resize to {}x{} px", w_px, h_px);
            w.resize(metrics, time);
        }
        Ok(())
    }

    /// Changing quality is a full remount.
    pub fn set_quality(&mut self, quality: QualityTier, time: &FrameTime) -> Result<(), VizError> {
        if quality == self.options.quality && self.is_mounted() {
            return Ok(());
        }
        self.unmount(time.now);
        self.options.quality = quality;
        self.mount_current(time)
    }

    /// Replace the mounted visualization.
    pub fn swap(&mut self, kind: VisualizationKind, time: &FrameTime) -> Result<(), VizError> {
        if kind == self.kind && self.is_mounted() {
            return Ok(());
        }
        self.unmount(time.now);
        self.kind = kind;
        self.mount_current(time)
    }

    /// Stop loops and timers and release every surface of the mounted backend.
    pub fn unmount(&mut self, now: Instant) {
        if let Some(mut w) = self.mounted.take() {
            w.cleanup(now);
            log::info!("[stage] unmounted {}", w.kind());
        }
    }
}

impl<P: Platform> Drop for Stage<P> {
    fn drop(&mut self) {
        self.unmount(Instant::now());
    }
}
