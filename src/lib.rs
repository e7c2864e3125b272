//! StripeFS metadata service core - adaptive chunk size selection
//!
//! When a file is created, the metadata service picks its *chunk size*: the
//! unit used to split the file's data across storage targets. A chunk size
//! that fits the file's eventual size matters — small files waste stripe
//! width on large chunks, large files drown in per-chunk overhead with
//! small ones. This crate implements the selection logic and its single
//! integration point into file creation:
//!
//! - **Size estimation** ([`sizing::estimate`]): a best-effort guess of a
//!   new file's eventual size from its extension and from naming patterns
//!   in its parent directory's path
//! - **Chunk size resolution** ([`sizing::select`]): mapping an explicit or
//!   estimated size onto configured chunk-size tiers, normalized to a
//!   power of two above a configured floor
//! - **File-creation assignment** ([`api::mkfile`]): the call site where
//!   the resolved chunk size feeds stripe-pattern construction and the new
//!   metadata entry is created
//!
//! The metadata store, stripe-pattern construction and change notification
//! are collaborators behind narrow traits ([`metadata::MetaStore`],
//! [`stripe::StripePatternFactory`], [`event::ModEventSink`]); an in-memory
//! store is provided for tests and single-node embedding.
//!
//! # Example
//!
//! ```
//! use stripefs_meta::api::{mk_file, StripeRequest};
//! use stripefs_meta::config::ChunkSizeConfig;
//! use stripefs_meta::event::NullEventSink;
//! use stripefs_meta::metadata::{InMemoryMetaStore, MkFileDetails};
//! use stripefs_meta::stripe::{StoragePoolId, StripePattern, StripePatternFactory, TargetId};
//!
//! struct AllTargets;
//!
//! impl StripePatternFactory for AllTargets {
//!     fn create_pattern(
//!         &self,
//!         _preferred_targets: &[TargetId],
//!         num_targets: u32,
//!         chunk_size: u64,
//!         pool_id: StoragePoolId,
//!     ) -> Option<StripePattern> {
//!         let targets = (1..=num_targets as TargetId).collect();
//!         Some(StripePattern::new(chunk_size, targets, pool_id))
//!     }
//! }
//!
//! let store = InMemoryMetaStore::new("meta1");
//! store.add_dir("root", "/");
//!
//! let config = ChunkSizeConfig {
//!     adaptive_chunk_sizing: true,
//!     ..ChunkSizeConfig::default()
//! };
//!
//! let outcome = mk_file(
//!     &store,
//!     &AllTargets,
//!     &NullEventSink,
//!     &config,
//!     "root",
//!     &MkFileDetails::new("movie.mp4"),
//!     &StripeRequest::new(4),
//!     None,
//! )
//! .unwrap();
//!
//! // A video extension estimates large; the very-large tier is 8MB
//! assert_eq!(outcome.inode_data.stripe_pattern.chunk_size(), 8 * 1024 * 1024);
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod event;
pub mod logging;
pub mod metadata;
pub mod sizing;
pub mod stripe;
