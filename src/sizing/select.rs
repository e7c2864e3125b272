//! Chunk size resolution
//!
//! Maps a byte size — explicit, or estimated by [`crate::sizing::estimate`]
//! — to one of four configured chunk-size tiers, then normalizes the result
//! to a power of two no smaller than the configured floor. The whole path
//! is infallible: every call returns a usable chunk size.

use tracing::instrument;

use crate::config::ChunkSizeConfig;
use crate::metadata::DirectoryLookup;
use crate::sizing::estimate::estimate_file_size;

/// Round a value up to the next power of two.
///
/// Bit-smear: decrement, OR the value with itself shifted right by 1, 2, 4,
/// 8, 16 and 32 bits, increment. Values that already are a power of two
/// come back unchanged. `0` maps to `0`, and values above `1 << 63` wrap to
/// `0`; callers clamp to a non-zero floor first, so neither case is
/// reachable from the resolution path.
pub fn next_power_of_two(value: u64) -> u64 {
    let mut v = value.wrapping_sub(1);
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v |= v >> 32;
    v.wrapping_add(1)
}

/// Map a byte size to the configured chunk size of its band.
///
/// Bands are half-open: a size strictly below a threshold selects the band
/// under it, a size equal to a threshold lands in the higher band.
pub fn select_tier_chunk_size(size: u64, config: &ChunkSizeConfig) -> u64 {
    if size < config.threshold_small {
        config.chunk_size_small
    } else if size < config.threshold_medium {
        config.chunk_size_medium
    } else if size < config.threshold_large {
        config.chunk_size_large
    } else {
        config.chunk_size_very_large
    }
}

/// Clamp a chunk size up to the floor and round it up to a power of two
pub fn normalize_chunk_size(chunk_size: u64, floor: u64) -> u64 {
    next_power_of_two(chunk_size.max(floor))
}

/// Resolve the chunk size for a file about to be created.
///
/// An explicit caller-supplied size is returned unchanged; caller intent
/// always wins over estimation. With adaptive sizing disabled the
/// configured default is returned. Otherwise the file's size is estimated
/// from its name and parent directory, classified into a band, and the
/// band's chunk size is normalized to a power of two at or above the floor.
#[instrument(level = "trace", name = "resolve_chunk_size", skip(dirs, config))]
pub fn resolve_chunk_size(
    explicit: Option<u64>,
    file_name: &str,
    parent_dir_id: &str,
    dirs: &dyn DirectoryLookup,
    config: &ChunkSizeConfig,
) -> u64 {
    if let Some(chunk_size) = explicit {
        tracing::trace!(chunk_size, "using caller-supplied chunk size");
        return chunk_size;
    }

    if !config.adaptive_chunk_sizing {
        return config.default_chunk_size;
    }

    let estimate = estimate_file_size(file_name, parent_dir_id, dirs);
    let tier = select_tier_chunk_size(estimate, config);
    let chunk_size = normalize_chunk_size(tier, config.min_chunk_size);

    tracing::debug!(estimate, chunk_size, "adaptive chunk size selected");

    chunk_size
}
