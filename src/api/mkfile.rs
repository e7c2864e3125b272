//! File creation with adaptive chunk assignment
//!
//! This is the one place where the chunk size resolver feeds the
//! construction of a file's striping layout. The flow mirrors the rest of
//! the creation path: resolve a chunk size (unless the caller fixed the
//! pattern already), build the stripe pattern, create the metadata entry,
//! then notify.

use tracing::instrument;

use crate::api::types::{OpsError, OpsResult};
use crate::config::ChunkSizeConfig;
use crate::event::ModEventSink;
use crate::metadata::{MetaStore, MkFileDetails, MkFileOutcome};
use crate::sizing::resolve_chunk_size;
use crate::stripe::{StoragePoolId, StripePattern, StripePatternFactory, TargetId};

/// Striping parameters of a file-creation request
#[derive(Debug, Clone)]
pub struct StripeRequest {
    /// Targets the caller would like used; may be empty
    pub preferred_targets: Vec<TargetId>,

    /// Desired stripe width
    pub num_targets: u32,

    /// Explicit chunk size; `None` lets the resolver pick one
    pub chunk_size: Option<u64>,

    /// Pool to draw targets from
    pub pool_id: StoragePoolId,
}

impl StripeRequest {
    pub fn new(num_targets: u32) -> Self {
        Self {
            preferred_targets: Vec::new(),
            num_targets,
            chunk_size: None,
            pool_id: StoragePoolId::default(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_preferred_targets(mut self, targets: Vec<TargetId>) -> Self {
        self.preferred_targets = targets;
        self
    }
}

/// Create a file under `parent_dir_id`.
///
/// `existing_pattern` should only be set when the striping was fixed
/// elsewhere (e.g. by the primary of a mirror group); it is used as-is and
/// chunk-size resolution is skipped. Otherwise the chunk size is resolved
/// from the request and the file's name/location, and a fresh pattern is
/// built through the factory.
///
/// A missing pattern, or one covering zero targets, fails the whole
/// operation with [`OpsError::Internal`] before the metadata store is
/// touched. On confirmed creation, a single file-created event is emitted
/// if the sink is enabled. The store's result is returned unmodified.
#[instrument(
    level = "trace",
    name = "mk_file",
    skip_all,
    fields(parent = %parent_dir_id, name = %details.new_name)
)]
#[allow(clippy::too_many_arguments)]
pub fn mk_file<S: MetaStore>(
    store: &S,
    pattern_factory: &dyn StripePatternFactory,
    events: &dyn ModEventSink,
    config: &ChunkSizeConfig,
    parent_dir_id: &str,
    details: &MkFileDetails,
    stripe_req: &StripeRequest,
    existing_pattern: Option<StripePattern>,
) -> OpsResult<MkFileOutcome> {
    let pattern = match existing_pattern {
        Some(pattern) => Some(pattern),
        None => {
            let chunk_size = resolve_chunk_size(
                stripe_req.chunk_size,
                &details.new_name,
                parent_dir_id,
                store,
                config,
            );

            pattern_factory.create_pattern(
                &stripe_req.preferred_targets,
                stripe_req.num_targets,
                chunk_size,
                stripe_req.pool_id,
            )
        }
    };

    let pattern = match pattern {
        Some(pattern) if !pattern.is_empty() => pattern,
        _ => {
            // Drops any partially built (empty) pattern before returning
            tracing::error!(
                file = %details.new_name,
                "Unable to create stripe pattern. No storage targets available?"
            );
            return Err(OpsError::Internal(format!(
                "No storage targets available for file: {}",
                details.new_name
            )));
        }
    };

    let outcome = store.mk_new_meta_file(parent_dir_id, details, pattern)?;

    if events.enabled() {
        events.file_created(&outcome.entry_info.entry_id);
    }

    Ok(outcome)
}
