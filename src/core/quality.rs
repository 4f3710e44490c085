use std::fmt;
use std::str::FromStr;

use crate::constants::{MIN_RAINDROPS_PER_TICK, RAIN_TIER_DIVISOR_BASE};

/// Discrete setting trading visual density for compute cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityTier {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Low, QualityTier::Medium, QualityTier::High];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "low" => Ok(QualityTier::Low),
            "1" | "med" | "medium" => Ok(QualityTier::Medium),
            "2" | "high" => Ok(QualityTier::High),
            other => Err(format!("unknown quality tier '{other}'")),
        }
    }
}

/// Rain simulation limits for one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RainQuality {
    pub max_spawn_per_tick: usize,
    pub max_live: usize,
}

pub const RAIN_QUALITY: [RainQuality; 3] = [
    RainQuality {
        max_spawn_per_tick: 10,
        max_live: 400,
    },
    RainQuality {
        max_spawn_per_tick: 33,
        max_live: 1200,
    },
    RainQuality {
        max_spawn_per_tick: 100,
        max_live: 3000,
    },
];

/// Starfield limits for one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarQuality {
    pub star_count: usize,
}

pub const STAR_QUALITY: [StarQuality; 3] = [
    StarQuality { star_count: 600 },
    StarQuality { star_count: 1800 },
    StarQuality { star_count: 5000 },
];

/// Waveform limits for one tier: draw every `bin_stride`th bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformQuality {
    pub bin_stride: usize,
    pub show_bands: bool,
}

pub const WAVEFORM_QUALITY: [WaveformQuality; 3] = [
    WaveformQuality {
        bin_stride: 4,
        show_bands: false,
    },
    WaveformQuality {
        bin_stride: 2,
        show_bands: true,
    },
    WaveformQuality {
        bin_stride: 1,
        show_bands: true,
    },
];

impl QualityTier {
    pub fn rain(self) -> RainQuality {
        RAIN_QUALITY[self.index()]
    }

    pub fn stars(self) -> StarQuality {
        STAR_QUALITY[self.index()]
    }

    pub fn waveform(self) -> WaveformQuality {
        WAVEFORM_QUALITY[self.index()]
    }
}

/// Number of raindrops to add this tick.
///
/// `floor(intensity / max(1, 4 - tier))` clamped to
/// `[MIN_RAINDROPS_PER_TICK, tier max]`. Invalid intensities count as zero.
pub fn raindrops_to_add(intensity: f32, tier: QualityTier) -> usize {
    let divisor = (RAIN_TIER_DIVISOR_BASE - tier.index() as i32).max(1) as f32;
    let intensity = crate::core::feature::sanitize(intensity);
    let raw = (intensity / divisor).floor();
    let max = tier.rain().max_spawn_per_tick;
    if raw < MIN_RAINDROPS_PER_TICK as f32 {
        MIN_RAINDROPS_PER_TICK
    } else if raw > max as f32 {
        max
    } else {
        raw as usize
    }
}

/// `raindrops_to_add` further limited by the room left in the pool.
#[inline]
pub fn gated_spawn_count(intensity: f32, tier: QualityTier, live: usize) -> usize {
    let room = tier.rain().max_live.saturating_sub(live);
    raindrops_to_add(intensity, tier).min(room)
}
