// Host-side tests for quality tiers and the rain spawn rule.

use viz_web::core::quality::{gated_spawn_count, raindrops_to_add, RAIN_QUALITY};
use viz_web::core::QualityTier;

#[test]
fn silence_on_low_still_spawns_one_drop() {
    assert_eq!(raindrops_to_add(0.0, QualityTier::Low), 1);
}

#[test]
fn loud_input_on_high_is_capped_at_tier_max() {
    assert_eq!(raindrops_to_add(500.0, QualityTier::High), 100);
}

#[test]
fn divisor_shrinks_with_tier() {
    // divisors are 4, 3 and 2
    assert_eq!(raindrops_to_add(40.0, QualityTier::Low), 10);
    assert_eq!(raindrops_to_add(40.0, QualityTier::Medium), 13);
    assert_eq!(raindrops_to_add(40.0, QualityTier::High), 20);
}

#[test]
fn spawn_count_stays_within_tier_range() {
    for tier in QualityTier::ALL {
        let max = tier.rain().max_spawn_per_tick;
        let mut prev = 0;
        for i in 0..=1000 {
            let n = raindrops_to_add(i as f32 * 0.5, tier);
            assert!((1..=max).contains(&n), "{tier} at {i}: {n}");
            assert!(n >= prev, "spawn count must not decrease with intensity");
            prev = n;
        }
    }
}

#[test]
fn invalid_intensity_counts_as_silence() {
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -12.0] {
        assert_eq!(raindrops_to_add(bad, QualityTier::Medium), 1);
    }
}

#[test]
fn pool_room_limits_spawns() {
    let tier = QualityTier::Low;
    let max_live = RAIN_QUALITY[0].max_live;
    assert_eq!(gated_spawn_count(500.0, tier, 0), 10);
    assert_eq!(gated_spawn_count(500.0, tier, max_live - 3), 3);
    assert_eq!(gated_spawn_count(500.0, tier, max_live), 0);
    assert_eq!(gated_spawn_count(500.0, tier, max_live + 50), 0);
}

#[test]
fn tiers_scale_up() {
    let [low, med, high] = QualityTier::ALL;
    assert!(low.rain().max_live < med.rain().max_live);
    assert!(med.rain().max_live < high.rain().max_live);
    assert!(low.stars().star_count < high.stars().star_count);
    assert!(low.waveform().bin_stride > high.waveform().bin_stride);
}

#[test]
fn tier_parsing_and_indices() {
    assert_eq!("low".parse::<QualityTier>(), Ok(QualityTier::Low));
    assert_eq!(" High ".parse::<QualityTier>(), Ok(QualityTier::High));
    assert_eq!("1".parse::<QualityTier>(), Ok(QualityTier::Medium));
    assert!("ultra".parse::<QualityTier>().is_err());
    assert_eq!(QualityTier::default(), QualityTier::Medium);
    for tier in QualityTier::ALL {
        assert_eq!(QualityTier::from_index(tier.index()), Some(tier));
        assert_eq!(tier.to_string().parse::<QualityTier>(), Ok(tier));
    }
    assert_eq!(QualityTier::from_index(3), None);
}
