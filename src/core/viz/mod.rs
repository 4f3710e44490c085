//! Interchangeable visualization backends behind one per-frame contract.

use instant::Instant;
use std::fmt;
use std::str::FromStr;

use super::deferred::Deferred;
use super::error::VizError;
use super::quality::QualityTier;
use super::reactive::{ReactiveLimits, ReactiveParam};
use super::scene::SceneRenderer;
use super::surface::{Canvas2d, SurfaceMetrics};
use crate::constants::WAVEFORM_SMOOTHING;

pub mod notice;
pub mod rain;
pub mod stars;
pub mod waveform;

pub use notice::MobileNoticeViz;
pub use rain::RainViz;
pub use stars::StarsViz;
pub use waveform::WaveformViz;

/// Timestamps for one animation frame.
///
/// `time_of_day` is local wall-clock seconds since midnight, used by
/// displayed clocks; `now` drives all simulation timing.
#[derive(Clone, Copy, Debug)]
pub struct FrameTime {
    pub now: Instant,
    pub time_of_day: f64,
}

impl FrameTime {
    pub fn new(now: Instant, time_of_day: f64) -> Self {
        Self { now, time_of_day }
    }
}

/// The normalized per-frame input every backend receives.
#[derive(Clone, Copy, Debug)]
pub struct FrameSignal<'a> {
    pub smoothed_intensity: f32,
    pub band_intensity: f32,
    pub magnitudes: &'a [f32],
    pub quality: QualityTier,
    pub now: Instant,
}

/// Per-visualization wrapper options.
///
/// `smoothing` is the low-pass factor applied to the smoothed intensity on
/// top of the analyser's own smoothing; 1.0 passes values through.
/// `mobile_disabled` backends are replaced by the mobile notice when the
/// host reports a mobile device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizationOptions {
    pub smoothing: f32,
    pub mobile_disabled: bool,
}

impl Default for VisualizationOptions {
    fn default() -> Self {
        Self {
            smoothing: 1.0,
            mobile_disabled: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualizationKind {
    #[default]
    Stars,
    Rain,
    Waveform,
    /// Fallback for `mobile_disabled` kinds on mobile. Never selectable.
    MobileDisabled,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 3] = [
        VisualizationKind::Stars,
        VisualizationKind::Rain,
        VisualizationKind::Waveform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VisualizationKind::Stars => "stars",
            VisualizationKind::Rain => "rain",
            VisualizationKind::Waveform => "waveform",
            VisualizationKind::MobileDisabled => "mobile-disabled",
        }
    }

    /// Next entry in selection order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn options(self) -> VisualizationOptions {
        match self {
            VisualizationKind::Stars => VisualizationOptions {
                mobile_disabled: true,
                ..Default::default()
            },
            VisualizationKind::Waveform => VisualizationOptions {
                smoothing: WAVEFORM_SMOOTHING,
                ..Default::default()
            },
            _ => VisualizationOptions::default(),
        }
    }

    /// The kind actually mounted for this selection on this device.
    pub fn resolve(self, mobile: bool) -> Self {
        if mobile && self.options().mobile_disabled {
            VisualizationKind::MobileDisabled
        } else {
            self
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualizationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown visualization '{wanted}'"))
    }
}

/// Shared per-frame contract of every backend.
///
/// Samples arrive through `on_sample`; `on_frame` runs once per animation
/// frame for loop-driven work (3D rendering, periodic timers). After
/// `cleanup` a backend draws nothing and holds no surfaces.
pub trait Visualization {
    fn kind(&self) -> VisualizationKind;

    /// Apply new surface metrics without rebuilding live simulation state.
    fn resize(&mut self, metrics: SurfaceMetrics, time: &FrameTime);

    fn on_sample(&mut self, signal: &FrameSignal<'_>) -> Result<(), VizError>;

    fn on_frame(&mut self, time: &FrameTime) -> Result<(), VizError>;

    fn cleanup(&mut self, now: Instant);

    /// Limits for the backend's audio-driven parameter, if it has one.
    fn reactive_limits(&self) -> Option<ReactiveLimits> {
        None
    }

    /// Desired value of the reactive parameter for this signal.
    fn reactive_target(&self, _signal: &FrameSignal<'_>) -> f32 {
        0.0
    }

    /// The reactive parameter, or `None` while the backend is still initializing.
    fn reactive(&mut self) -> Option<&mut dyn ReactiveParam> {
        None
    }
}

/// Surfaces a backend can acquire from the host page.
pub trait Platform {
    type Canvas: Canvas2d + 'static;
    type Scene: SceneRenderer + 'static;

    /// Create and attach a 2D canvas layer. Layers stack in creation order.
    fn create_canvas(&mut self, layer: &'static str, style: Option<&str>) -> Result<Self::Canvas, VizError>;

    /// Start creating a 3D renderer; it resolves once the GPU is available.
    fn create_scene(&mut self, metrics: SurfaceMetrics, style: Option<&str>) -> Deferred<Self::Scene>;
}

/// Construct the backend for `kind`, already sized to `metrics`.
pub fn create_backend<P: Platform>(
    kind: VisualizationKind,
    platform: &mut P,
    quality: QualityTier,
    metrics: SurfaceMetrics,
    style: Option<&str>,
    time: &FrameTime,
) -> Result<Box<dyn Visualization>, VizError> {
    let backend: Box<dyn Visualization> = match kind {
        VisualizationKind::Stars => {
            let pending = platform.create_scene(metrics, style);
            Box::new(StarsViz::new(pending, quality, metrics))
        }
        VisualizationKind::Rain => {
            let rain = platform.create_canvas("rain", style)?;
            let home = platform.create_canvas("home", style)?;
            Box::new(RainViz::new(rain, home, quality, metrics, time))
        }
        VisualizationKind::Waveform => {
            let canvas = platform.create_canvas("waveform", style)?;
            Box::new(WaveformViz::new(canvas, quality, metrics))
        }
        VisualizationKind::MobileDisabled => {
            let canvas = platform.create_canvas("notice", style)?;
            Box::new(MobileNoticeViz::new(canvas, metrics))
        }
    };
    Ok(backend)
}
