// Host-side tests for the spectrum line backend.

mod common;

use instant::Instant;

use common::{metrics, FakePlatform, Op, SceneMode};
use viz_web::core::viz::{FrameSignal, Visualization, WaveformViz};
use viz_web::core::{Platform, QualityTier};

fn draw(quality: QualityTier, magnitudes: &[f32]) -> FakePlatform {
    let mut platform = FakePlatform::new(SceneMode::Ready);
    let canvas = platform.create_canvas("waveform", None).unwrap();
    let mut viz = WaveformViz::new(canvas, quality, metrics());
    viz.on_sample(&FrameSignal {
        smoothed_intensity: 40.0,
        band_intensity: 40.0,
        magnitudes,
        quality,
        now: Instant::now(),
    })
    .unwrap();
    platform
}

#[test]
fn medium_draws_bands_and_one_line() {
    let mags = [120.0f32; 64];
    let platform = draw(QualityTier::Medium, &mags);
    let log = platform.canvas("waveform").unwrap();
    let log = log.borrow();
    assert_eq!(log.count(&Op::Clear), 1);
    assert_eq!(log.count(&Op::FillRect), 8);
    assert_eq!(log.count(&Op::Stroke), 1);
}

#[test]
fn low_skips_bands() {
    let mags = [120.0f32; 64];
    let platform = draw(QualityTier::Low, &mags);
    let log = platform.canvas("waveform").unwrap();
    assert_eq!(log.borrow().count(&Op::FillRect), 0);
    assert_eq!(log.borrow().count(&Op::Stroke), 1);
}

#[test]
fn too_few_bins_only_clears() {
    let platform = draw(QualityTier::High, &[5.0]);
    let log = platform.canvas("waveform").unwrap();
    assert_eq!(log.borrow().count(&Op::Stroke), 0);
    assert_eq!(log.borrow().count(&Op::Clear), 1);
}

#[test]
fn line_spans_the_width_at_the_tier_stride() {
    let mags = [120.0f32; 64];
    let platform = draw(QualityTier::Low, &mags);
    let log = platform.canvas("waveform").unwrap();
    let log = log.borrow();
    let xs = log.path_xs();
    // every 4th of 64 bins
    assert_eq!(xs.len(), 16);
    assert_eq!(log.count(&Op::MoveTo(0.0)), 1);
    assert_eq!(log.ops.iter().filter(|o| matches!(o, Op::LineTo(_))).count(), 15);
    assert!(xs.windows(2).all(|p| p[1] > p[0]));
    assert!((xs[15] - 800.0).abs() < 1e-6);
}

#[test]
fn partial_last_stride_still_reaches_the_edge() {
    let platform = draw(QualityTier::Low, &[10.0; 5]);
    let log = platform.canvas("waveform").unwrap();
    assert_eq!(log.borrow().path_xs(), [0.0, 800.0]);
}
