//! Stripe pattern types and the pattern-construction collaborator
//!
//! A stripe pattern records how a file's data is split across storage
//! targets: the chunk size (the striping unit) and the ordered set of
//! target IDs it covers. Pattern construction — picking targets, handling
//! target failures — lives behind [`StripePatternFactory`]; this crate only
//! supplies the chunk size and checks the empty-pattern failure case.

use serde::{Deserialize, Serialize};

/// Storage target ID
pub type TargetId = u16;

/// Storage pool ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoragePoolId(pub u16);

impl Default for StoragePoolId {
    fn default() -> Self {
        // Pool 1 is the default pool every target belongs to initially
        Self(1)
    }
}

/// On-disk striping layout of one file
///
/// Immutable once constructed; restriping an existing file is out of scope
/// for the creation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripePattern {
    /// Striping unit in bytes
    chunk_size: u64,

    /// Storage targets the pattern covers, in stripe order
    target_ids: Vec<TargetId>,

    /// Pool the targets were drawn from
    pool_id: StoragePoolId,
}

impl StripePattern {
    pub fn new(chunk_size: u64, target_ids: Vec<TargetId>, pool_id: StoragePoolId) -> Self {
        Self {
            chunk_size,
            target_ids,
            pool_id,
        }
    }

    /// Striping unit in bytes
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Storage targets the pattern covers
    pub fn target_ids(&self) -> &[TargetId] {
        &self.target_ids
    }

    /// Pool the targets were drawn from
    pub fn pool_id(&self) -> StoragePoolId {
        self.pool_id
    }

    /// A pattern covering no targets cannot store data
    pub fn is_empty(&self) -> bool {
        self.target_ids.is_empty()
    }
}

/// Stripe pattern construction collaborator
///
/// Target selection and failure handling during construction are the
/// factory's concern. A factory may legitimately return `None` (no usable
/// targets) or a pattern covering zero targets; the creation path treats
/// both as fatal.
pub trait StripePatternFactory {
    /// Build a pattern for a new file.
    ///
    /// # Arguments
    /// * `preferred_targets` - targets the caller would like used, may be empty
    /// * `num_targets` - desired stripe width
    /// * `chunk_size` - striping unit in bytes
    /// * `pool_id` - pool to draw targets from
    fn create_pattern(
        &self,
        preferred_targets: &[TargetId],
        num_targets: u32,
        chunk_size: u64,
        pool_id: StoragePoolId,
    ) -> Option<StripePattern>;
}
