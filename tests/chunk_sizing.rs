//! Property-based testing for chunk size resolution
//!
//! Verifies the resolver's contract over the whole input space: band
//! classification with half-open boundaries, power-of-two/floor
//! postconditions on every adaptive result, and monotonicity of the
//! resolved chunk size in the estimated file size.

use proptest::prelude::*;

use stripefs_meta::config::ChunkSizeConfig;
use stripefs_meta::constants::{GIB, KIB, MIB};
use stripefs_meta::metadata::InMemoryMetaStore;
use stripefs_meta::sizing::{
    estimate_file_size, next_power_of_two, normalize_chunk_size, resolve_chunk_size,
    select_tier_chunk_size, DEFAULT_SIZE_ESTIMATE,
};

fn test_config() -> ChunkSizeConfig {
    ChunkSizeConfig {
        adaptive_chunk_sizing: true,
        default_chunk_size: 512 * KIB,
        min_chunk_size: 64 * KIB,
        threshold_small: MIB,
        threshold_medium: 100 * MIB,
        threshold_large: GIB,
        chunk_size_small: 64 * KIB,
        chunk_size_medium: 512 * KIB,
        chunk_size_large: 2 * MIB,
        chunk_size_very_large: 8 * MIB,
    }
}

#[test]
fn bands_cover_thresholds_half_open() {
    let config = test_config();

    let cases = [
        (0, config.chunk_size_small),
        (config.threshold_small - 1, config.chunk_size_small),
        (config.threshold_small, config.chunk_size_medium),
        (config.threshold_medium - 1, config.chunk_size_medium),
        (config.threshold_medium, config.chunk_size_large),
        (config.threshold_large - 1, config.chunk_size_large),
        (config.threshold_large, config.chunk_size_very_large),
        (u64::MAX, config.chunk_size_very_large),
    ];

    for (size, expected) in cases {
        assert_eq!(
            select_tier_chunk_size(size, &config),
            expected,
            "size {} selected the wrong band",
            size
        );
    }
}

#[test]
fn normalization_is_idempotent_for_configured_tiers() {
    let config = test_config();

    for tier in [
        config.chunk_size_small,
        config.chunk_size_medium,
        config.chunk_size_large,
        config.chunk_size_very_large,
    ] {
        // All configured tiers are powers of two at or above the floor;
        // normalization must hand them back unchanged
        assert_eq!(normalize_chunk_size(tier, config.min_chunk_size), tier);
    }
}

#[test]
fn spec_estimates_for_known_names() {
    let store = InMemoryMetaStore::new("meta1");
    store.add_dir("plain", "/home/user");
    store.add_dir("videos", "/data/videos");

    // Small-class estimate for text
    assert!(estimate_file_size("report.txt", "plain", &store) < MIB);

    // Large-class estimate for video
    assert!(estimate_file_size("movie.mp4", "plain", &store) >= GIB);

    // No signal at all: the documented default
    assert_eq!(
        estimate_file_size("data.unknownext", "plain", &store),
        DEFAULT_SIZE_ESTIMATE
    );

    // Directory hint dominates an unknown extension
    assert!(estimate_file_size("file.dat", "videos", &store) >= GIB);

    // Both signals: extension small, directory large, larger wins
    assert!(estimate_file_size("notes.txt", "videos", &store) >= GIB);
}

#[test]
fn explicit_and_disabled_bypasses() {
    let store = InMemoryMetaStore::new("meta1");
    store.add_dir("videos", "/data/videos");

    // Adaptive off: always the configured default
    let off = ChunkSizeConfig {
        adaptive_chunk_sizing: false,
        ..test_config()
    };
    assert_eq!(
        resolve_chunk_size(None, "movie.mp4", "videos", &store, &off),
        off.default_chunk_size
    );

    // Explicit size: returned unchanged even with adaptive sizing on
    let on = test_config();
    assert_eq!(
        resolve_chunk_size(Some(12345), "movie.mp4", "videos", &store, &on),
        12345
    );
}

proptest! {
    #[test]
    fn resolve_is_monotone_in_size(a in any::<u64>(), b in any::<u64>()) {
        let config = test_config();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(
            select_tier_chunk_size(lo, &config) <= select_tier_chunk_size(hi, &config)
        );
    }

    #[test]
    fn normalized_tiers_are_powers_of_two_above_floor(
        tier in 1u64..=(1 << 40),
        floor_shift in 10u32..=26,
    ) {
        let floor = 1u64 << floor_shift;
        let normalized = normalize_chunk_size(tier, floor);

        prop_assert!(normalized.is_power_of_two());
        prop_assert!(normalized >= floor);
        prop_assert!(normalized >= tier);
        // Tight: no smaller power of two fits
        prop_assert!(normalized / 2 < tier.max(floor));
    }

    #[test]
    fn next_power_of_two_rounds_up_tightly(v in 1u64..=(1 << 62)) {
        let p = next_power_of_two(v);

        prop_assert!(p.is_power_of_two());
        prop_assert!(p >= v);
        prop_assert!(p / 2 < v);
    }

    #[test]
    fn next_power_of_two_fixes_powers(shift in 0u32..=63) {
        let v = 1u64 << shift;
        prop_assert_eq!(next_power_of_two(v), v);
    }

    #[test]
    fn adaptive_resolution_postconditions(name in "[a-z]{1,8}(\\.[a-z0-9]{1,5})?") {
        let config = test_config();
        let store = InMemoryMetaStore::new("meta1");
        store.add_dir("dir-1", "/home/user");

        let chunk_size = resolve_chunk_size(None, &name, "dir-1", &store, &config);

        prop_assert!(chunk_size.is_power_of_two());
        prop_assert!(chunk_size >= config.min_chunk_size);
        prop_assert!(chunk_size <= config.chunk_size_very_large);

        // The estimation path never leaks a directory reference
        prop_assert_eq!(store.dir_ref_count("dir-1"), Some(0));
    }
}
