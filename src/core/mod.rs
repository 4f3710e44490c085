//! Platform-independent visualization core.
//!
//! Nothing in here touches browser APIs; the web frontend implements the
//! `Platform`, `Canvas2d` and `SceneRenderer` seams and drives the `Stage`.

pub mod deferred;
pub mod error;
pub mod feature;
pub mod home;
pub mod layout;
pub mod quality;
pub mod rain;
pub mod reactive;
pub mod scene;
pub mod stage;
pub mod surface;
pub mod timer;
pub mod viz;
pub mod wrapper;

pub use deferred::Deferred;
pub use error::VizError;
pub use feature::{AudioFeatureSample, FeatureExtractor};
pub use quality::QualityTier;
pub use reactive::{RateLimiter, ReactiveLimits, ReactiveParam};
pub use scene::{SceneFrame, SceneManager, SceneRenderer};
pub use stage::{MountOptions, Stage};
pub use surface::{Canvas2d, SurfaceMetrics};
pub use viz::{FrameSignal, FrameTime, Platform, Visualization, VisualizationKind};

pub static STARS_WGSL: &str = include_str!("../../shaders/stars.wgsl");
