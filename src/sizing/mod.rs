// Adaptive chunk size selection
pub mod estimate;
pub mod select;

pub use estimate::{estimate_file_size, DEFAULT_SIZE_ESTIMATE};
pub use select::{
    next_power_of_two, normalize_chunk_size, resolve_chunk_size, select_tier_chunk_size,
};
