//! Global constants for the StripeFS metadata service
//!
//! This module centralizes commonly used size constants across the codebase
//! to improve maintainability and reduce duplication.

/// One kibibyte
pub const KIB: u64 = 1024;

/// One mebibyte
pub const MIB: u64 = 1024 * KIB;

/// One gibibyte
pub const GIB: u64 = 1024 * MIB;

/// Minimum allowed stripe-pattern chunk size (64KB)
///
/// No stripe pattern may be created with a chunk size below this value.
/// Adaptively derived chunk sizes are clamped up to it before the
/// power-of-two normalization step.
pub const STRIPE_PATTERN_MIN_CHUNKSIZE: u64 = 64 * KIB;
