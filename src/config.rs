//! StripeFS metadata server configuration
//!
//! Only the pieces the file-creation path consumes live here: node identity,
//! log level, and the chunk-size tuning knobs. The tuning section is read as
//! an immutable snapshot at call time; nothing in this crate mutates it.

use serde::{Deserialize, Serialize};

use crate::constants::STRIPE_PATTERN_MIN_CHUNKSIZE;

/// Default configuration constants
///
/// This module centralizes all default values used throughout the metadata
/// service. By collecting these constants in one place, we ensure consistency
/// and make it easier to adjust defaults for different deployment scenarios.
pub mod defaults {
    use crate::constants::{GIB, KIB, MIB};

    /// Adaptive chunk sizing is opt-in
    pub const ADAPTIVE_CHUNK_SIZING: bool = false;

    /// Default (non-adaptive) chunk size: 512KB
    pub const DEFAULT_CHUNK_SIZE: u64 = 512 * KIB;

    /// Files estimated below this are striped with the small chunk size: 1MB
    pub const THRESHOLD_SMALL: u64 = MIB;

    /// Files estimated below this (and above small) use the medium chunk size: 100MB
    pub const THRESHOLD_MEDIUM: u64 = 100 * MIB;

    /// Files estimated below this (and above medium) use the large chunk size: 1GB
    pub const THRESHOLD_LARGE: u64 = GIB;

    /// Chunk size for the smallest band: 64KB
    pub const CHUNK_SIZE_SMALL: u64 = 64 * KIB;

    /// Chunk size for the medium band: 512KB
    pub const CHUNK_SIZE_MEDIUM: u64 = 512 * KIB;

    /// Chunk size for the large band: 2MB
    pub const CHUNK_SIZE_LARGE: u64 = 2 * MIB;

    /// Chunk size for files above the large threshold: 8MB
    pub const CHUNK_SIZE_VERY_LARGE: u64 = 8 * MIB;

    /// Default log level
    pub const fn default_log_level() -> &'static str {
        "info"
    }
}

/// StripeFS metadata server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Server node configuration
    pub node: NodeConfig,

    /// Chunk-size tuning configuration
    #[serde(default)]
    pub tune: ChunkSizeConfig,
}

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node ID (unique identifier)
    pub node_id: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    defaults::default_log_level().to_string()
}

/// Chunk-size tuning configuration
///
/// An immutable snapshot of the knobs consumed by the chunk size resolver.
/// Three strictly increasing thresholds split the estimated-file-size axis
/// into four half-open bands `(-inf,small) [small,medium) [medium,large)
/// [large,inf)`, each paired with one of the four tier chunk sizes.
///
/// The loader validates the band invariants once (`validate`); the resolver
/// assumes they hold and does not re-check them per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSizeConfig {
    /// Derive chunk sizes from estimated file sizes at file creation
    #[serde(default = "default_adaptive_chunk_sizing")]
    pub adaptive_chunk_sizing: bool,

    /// Chunk size used when adaptive sizing is disabled and the caller
    /// supplied none
    #[serde(default = "default_chunk_size")]
    pub default_chunk_size: u64,

    /// Minimum allowed chunk size; adaptively derived values are clamped
    /// up to this floor
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: u64,

    /// Upper bound (exclusive) of the small band, in bytes
    #[serde(default = "default_threshold_small")]
    pub threshold_small: u64,

    /// Upper bound (exclusive) of the medium band, in bytes
    #[serde(default = "default_threshold_medium")]
    pub threshold_medium: u64,

    /// Upper bound (exclusive) of the large band, in bytes
    #[serde(default = "default_threshold_large")]
    pub threshold_large: u64,

    /// Chunk size for the small band
    #[serde(default = "default_chunk_size_small")]
    pub chunk_size_small: u64,

    /// Chunk size for the medium band
    #[serde(default = "default_chunk_size_medium")]
    pub chunk_size_medium: u64,

    /// Chunk size for the large band
    #[serde(default = "default_chunk_size_large")]
    pub chunk_size_large: u64,

    /// Chunk size for the very large band
    #[serde(default = "default_chunk_size_very_large")]
    pub chunk_size_very_large: u64,
}

fn default_adaptive_chunk_sizing() -> bool {
    defaults::ADAPTIVE_CHUNK_SIZING
}

fn default_chunk_size() -> u64 {
    defaults::DEFAULT_CHUNK_SIZE
}

fn default_min_chunk_size() -> u64 {
    STRIPE_PATTERN_MIN_CHUNKSIZE
}

fn default_threshold_small() -> u64 {
    defaults::THRESHOLD_SMALL
}

fn default_threshold_medium() -> u64 {
    defaults::THRESHOLD_MEDIUM
}

fn default_threshold_large() -> u64 {
    defaults::THRESHOLD_LARGE
}

fn default_chunk_size_small() -> u64 {
    defaults::CHUNK_SIZE_SMALL
}

fn default_chunk_size_medium() -> u64 {
    defaults::CHUNK_SIZE_MEDIUM
}

fn default_chunk_size_large() -> u64 {
    defaults::CHUNK_SIZE_LARGE
}

fn default_chunk_size_very_large() -> u64 {
    defaults::CHUNK_SIZE_VERY_LARGE
}

impl Default for ChunkSizeConfig {
    fn default() -> Self {
        Self {
            adaptive_chunk_sizing: default_adaptive_chunk_sizing(),
            default_chunk_size: default_chunk_size(),
            min_chunk_size: default_min_chunk_size(),
            threshold_small: default_threshold_small(),
            threshold_medium: default_threshold_medium(),
            threshold_large: default_threshold_large(),
            chunk_size_small: default_chunk_size_small(),
            chunk_size_medium: default_chunk_size_medium(),
            chunk_size_large: default_chunk_size_large(),
            chunk_size_very_large: default_chunk_size_very_large(),
        }
    }
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig {
                node_id: "meta1".to_string(),
                log_level: default_log_level(),
            },
            tune: ChunkSizeConfig::default(),
        }
    }
}

impl MetaConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("Failed to read config file: {}", e)))?;

        let config: MetaConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializeError(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, contents)
            .map_err(|e| ConfigError::WriteError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node.node_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "Node ID cannot be empty".to_string(),
            ));
        }

        match self.node.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}",
                    self.node.log_level
                )));
            }
        }

        self.tune.validate()
    }
}

impl ChunkSizeConfig {
    /// Validate the band invariants
    ///
    /// Thresholds must be strictly increasing, tier chunk sizes strictly
    /// increasing, every chunk size a power of two no smaller than the floor.
    /// The resolver relies on these holding and does not re-check them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold_small < self.threshold_medium
            && self.threshold_medium < self.threshold_large)
        {
            return Err(ConfigError::ValidationError(
                "Chunk size thresholds must be strictly increasing".to_string(),
            ));
        }

        let tiers = [
            self.chunk_size_small,
            self.chunk_size_medium,
            self.chunk_size_large,
            self.chunk_size_very_large,
        ];

        if !tiers.windows(2).all(|w| w[0] < w[1]) {
            return Err(ConfigError::ValidationError(
                "Tier chunk sizes must be strictly increasing".to_string(),
            ));
        }

        for size in tiers
            .iter()
            .chain([&self.default_chunk_size, &self.min_chunk_size])
        {
            if *size < self.min_chunk_size {
                return Err(ConfigError::ValidationError(format!(
                    "Chunk size {} is below the minimum of {}",
                    size, self.min_chunk_size
                )));
            }

            if !size.is_power_of_two() {
                return Err(ConfigError::ValidationError(format!(
                    "Chunk size {} is not a power of two",
                    size
                )));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config: {0}")]
    WriteError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
