/// Visualization tuning constants.
///
/// These express intended behavior (spawn ranges, rate limits, time
/// constants) and keep magic numbers out of the simulation code.
use std::time::Duration;

// Rain: spawn gating
pub const MIN_RAINDROPS_PER_TICK: usize = 1;
pub const RAIN_TIER_DIVISOR_BASE: i32 = 4; // spawn = floor(intensity / max(1, base - tier))

// Rain: per-drop ranges (logical pixels, seconds)
pub const RAINDROP_SPEED_MIN: f32 = 420.0;
pub const RAINDROP_SPEED_MAX: f32 = 900.0;
pub const RAINDROP_LENGTH_MIN: f32 = 8.0;
pub const RAINDROP_LENGTH_MAX: f32 = 22.0;
pub const RAINDROP_OPACITY_MIN: f32 = 0.25;
pub const RAINDROP_OPACITY_MAX: f32 = 0.7;
pub const RAINDROP_TTL_MIN_SEC: f32 = 2.0;
pub const RAINDROP_TTL_MAX_SEC: f32 = 6.0;
pub const RAINDROP_SPAWN_HEADROOM: f32 = 24.0; // drops start slightly above the top edge
pub const RAINDROP_WIDTH: f32 = 1.5;
pub const RAINDROP_COLOR: &str = "#a8c4e0";

// Largest simulation step; longer gaps (hidden tab) are treated as this long
pub const MAX_TICK_DT: Duration = Duration::from_millis(100);

// Renderer base: frame thickness is min(width, height) / divisor
pub const FRAME_THICKNESS_DIVISOR: f32 = 40.0;

// Home backdrop
pub const WALL_COLOR: &str = "#15161c";
pub const FRAME_COLOR: &str = "#2b2420";
pub const SILL_COLOR: &str = "#3a302a";
pub const CAT_COLOR: &str = "#1a1f1a";
pub const CLOCK_FACE_COLOR: &str = "#d8d2c4";
pub const CLOCK_HAND_COLOR: &str = "#22201d";
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

// Stars: reactive light
pub const MIN_DELAY_BETWEEN_INTENSITY_CHANGE: Duration = Duration::from_millis(75);
pub const MAX_LIGHT_INTENSITY_DELTA: f32 = 2.5;
pub const MIN_LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_INTENSITY_DIVISOR: f32 = 2.0; // light target = band intensity / divisor

// Stars: scene layout
pub const STARFIELD_RADIUS: f32 = 60.0;
pub const STARFIELD_INNER_RADIUS: f32 = 4.0;
pub const STAR_SIZE_MIN: f32 = 0.05;
pub const STAR_SIZE_MAX: f32 = 0.22;
pub const STAR_ROTATION_PER_SEC: f32 = 0.03; // radians around Y
pub const STAR_DRIFT_PER_SEC: f32 = 1.5; // world units toward the camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Feature extraction
pub const SMOOTHING_ALPHA: f32 = 0.25; // one-pole low-pass factor for smoothed intensity
pub const BASS_BAND_FRACTION: usize = 8; // lowest 1/N of the bins form the bass band
pub const MAGNITUDE_MAX: f32 = 255.0;

// Waveform
pub const WAVEFORM_BANDS: usize = 8;
pub const WAVEFORM_LINE_COLOR: &str = "#7fd4ff";
pub const WAVEFORM_BAND_COLOR: &str = "rgba(127, 212, 255, 0.18)";
pub const WAVEFORM_SMOOTHING: f32 = 0.35;

// Mobile fallback
pub const NOTICE_TEXT_COLOR: &str = "#9aa3b5";
pub const MOBILE_DISABLED_MESSAGE: &str = "This visualization is not available on mobile devices";
