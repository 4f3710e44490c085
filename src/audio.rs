use web_sys as web;

use crate::core::{AudioFeatureSample, FeatureExtractor};

/// Bin count used for the silent sample when no analyser is attached.
const SILENT_BINS: usize = 128;

/// Reads byte frequency data from a host-owned analyser once per frame.
pub struct AnalyserTap {
    analyser: web::AnalyserNode,
    buf: Vec<u8>,
}

impl AnalyserTap {
    pub fn new(analyser: web::AnalyserNode) -> Self {
        let bins = analyser.frequency_bin_count() as usize;
        log::info!("[audio] analyser attached ({} bins)", bins);
        Self {
            analyser,
            buf: vec![0; bins],
        }
    }

    pub fn sample(&mut self, extractor: &mut FeatureExtractor) -> AudioFeatureSample {
        let bins = self.analyser.frequency_bin_count() as usize;
        if self.buf.len() != bins {
            self.buf.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(&mut self.buf);
        extractor.extract_bytes(&self.buf)
    }
}

/// Sample for this frame: the analyser when attached, silence otherwise.
pub fn next_sample(tap: Option<&mut AnalyserTap>, extractor: &mut FeatureExtractor) -> AudioFeatureSample {
    match tap {
        Some(t) => t.sample(extractor),
        None => extractor.extract(&[0.0; SILENT_BINS]),
    }
}
