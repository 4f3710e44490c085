use crate::constants::{BASS_BAND_FRACTION, MAGNITUDE_MAX, SMOOTHING_ALPHA};

/// One frame of derived audio measurements.
///
/// Fields:
/// - `magnitudes`: frequency-domain bins on the byte scale `[0, 255]`
/// - `smoothed_intensity`: low-pass filtered mean magnitude across all bins
/// - `band_intensity`: mean magnitude of the bass band for this frame only
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioFeatureSample {
    pub magnitudes: Vec<f32>,
    pub smoothed_intensity: f32,
    pub band_intensity: f32,
}

impl AudioFeatureSample {
    pub fn silent(bins: usize) -> Self {
        Self {
            magnitudes: vec![0.0; bins],
            ..Default::default()
        }
    }
}

/// Clamp a measurement to a usable value: NaN, infinities and negatives become 0.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[inline]
pub fn sanitize_magnitude(value: f32) -> f32 {
    sanitize(value).min(MAGNITUDE_MAX)
}

/// Turns raw analyser bins into `AudioFeatureSample`s.
///
/// Keeps the low-pass state between frames; invalid bins are zeroed before
/// they reach the filter so one bad frame cannot poison later ones.
#[derive(Clone, Debug)]
pub struct FeatureExtractor {
    alpha: f32,
    smoothed: f32,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(SMOOTHING_ALPHA)
    }
}

impl FeatureExtractor {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            smoothed: 0.0,
        }
    }

    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    pub fn extract(&mut self, raw: &[f32]) -> AudioFeatureSample {
        let magnitudes: Vec<f32> = raw.iter().copied().map(sanitize_magnitude).collect();
        let mean = mean(&magnitudes);
        let band_len = (magnitudes.len() / BASS_BAND_FRACTION).max(1);
        let band_intensity = mean_of_prefix(&magnitudes, band_len);
        self.smoothed += (mean - self.smoothed) * self.alpha;
        AudioFeatureSample {
            magnitudes,
            smoothed_intensity: self.smoothed,
            band_intensity,
        }
    }

    /// Same as `extract` for analyser byte data.
    pub fn extract_bytes(&mut self, raw: &[u8]) -> AudioFeatureSample {
        let as_f32: Vec<f32> = raw.iter().map(|b| *b as f32).collect();
        self.extract(&as_f32)
    }
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

fn mean_of_prefix(values: &[f32], len: usize) -> f32 {
    mean(&values[..len.min(values.len())])
}
