// Host-side tests for feature extraction and the waveform band split.

use viz_web::core::feature::{sanitize, sanitize_magnitude};
use viz_web::core::viz::waveform::band_levels;
use viz_web::core::FeatureExtractor;

#[test]
fn band_intensity_is_the_bass_eighth() {
    let mut bins = vec![0u8; 64];
    for b in bins.iter_mut().take(8) {
        *b = 200;
    }
    let mut fx = FeatureExtractor::new(1.0);
    let s = fx.extract_bytes(&bins);
    assert_eq!(s.band_intensity, 200.0);
    assert_eq!(s.smoothed_intensity, 25.0);
    assert_eq!(s.magnitudes.len(), 64);
}

#[test]
fn smoothing_converges_without_overshoot() {
    let mut fx = FeatureExtractor::new(0.25);
    let loud = [100.0f32; 32];
    let mut prev = 0.0;
    for _ in 0..60 {
        let s = fx.extract(&loud);
        assert!(s.smoothed_intensity >= prev);
        assert!(s.smoothed_intensity <= 100.0);
        prev = s.smoothed_intensity;
    }
    assert!((prev - 100.0).abs() < 0.01);
    // band intensity is not smoothed
    assert_eq!(fx.extract(&[0.0; 32]).band_intensity, 0.0);
}

#[test]
fn bad_bins_do_not_poison_the_filter() {
    let mut fx = FeatureExtractor::new(0.5);
    let s = fx.extract(&[f32::NAN, f32::INFINITY, -3.0, 10.0]);
    assert!(s.smoothed_intensity.is_finite());
    assert_eq!(s.magnitudes, [0.0, 0.0, 0.0, 10.0]);
    let s = fx.extract(&[10.0; 4]);
    assert!(s.smoothed_intensity.is_finite());
}

#[test]
fn empty_frames_are_silent() {
    let mut fx = FeatureExtractor::default();
    let s = fx.extract(&[]);
    assert_eq!(s.band_intensity, 0.0);
    assert_eq!(s.smoothed_intensity, 0.0);
}

#[test]
fn sanitizers() {
    assert_eq!(sanitize(f32::NAN), 0.0);
    assert_eq!(sanitize(-1.0), 0.0);
    assert_eq!(sanitize(3.5), 3.5);
    assert_eq!(sanitize_magnitude(1e9), 255.0);
}

#[test]
fn band_levels_average_equal_groups() {
    let mags: Vec<f32> = (0..16).map(|i| i as f32).collect();
    let bands = band_levels(&mags);
    assert_eq!(bands.len(), 8);
    assert_eq!(bands[0], 0.5);
    assert_eq!(bands[7], 14.5);
    assert!(band_levels(&[]).is_empty());
    // fewer bins than bands gives one band per bin
    assert_eq!(band_levels(&[4.0, 8.0]).as_slice(), &[4.0, 8.0]);
}
