//! Codec configuration.
//!
//! A [`Config`] is a small copyable record consulted at the start of every
//! decode or encode call. The plain `decode`/`encode` entry points read the
//! process-wide shared instance, so reconfiguration through the setters here
//! is observable on the very next call; the `*_with` variants take an
//! explicit `Config` instead, for tests and multi-configuration use.

use std::sync::{RwLock, RwLockWriteGuard};

/// Default maximum nesting depth, applied to decode and encode alike.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunable codec behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum nesting depth for arrays/objects, in either direction.
    pub max_depth: usize,
    /// Whether sufficiently sparse arrays are encoded as objects keyed by
    /// stringified index instead of null-filled arrays.
    pub sparse_convert: bool,
    /// Sparseness ratio (max index over occupied count) above which the
    /// object form is chosen.
    pub sparse_ratio: f64,
    /// Arrays whose max index is at or below this floor always encode as
    /// arrays, however sparse.
    pub sparse_safe: usize,
    /// Reject numeric literals outside the strict JSON grammar (leading
    /// zeros, hex, leading `+`, `Inf`/`NaN`).
    pub refuse_invalid_numbers: bool,
}

impl Config {
    /// Permissive defaults: extended numbers accepted, sparse conversion on.
    pub const fn permissive() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sparse_convert: true,
            sparse_ratio: 2.0,
            sparse_safe: 4,
            refuse_invalid_numbers: false,
        }
    }

    /// Strict numeric grammar; everything else as [`Config::permissive`].
    pub const fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sparse_convert: true,
            sparse_ratio: 2.0,
            sparse_safe: 4,
            refuse_invalid_numbers: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::permissive()
    }
}

static SHARED: RwLock<Config> = RwLock::new(Config::permissive());

/// Snapshot of the shared configuration.
pub fn config() -> Config {
    shared()
}

pub(crate) fn shared() -> Config {
    *SHARED.read().unwrap_or_else(|e| e.into_inner())
}

fn shared_mut() -> RwLockWriteGuard<'static, Config> {
    SHARED.write().unwrap_or_else(|e| e.into_inner())
}

/// Set the maximum nesting depth on the shared configuration.
///
/// Depth must be positive; zero is clamped to 1.
pub fn set_max_depth(depth: usize) {
    shared_mut().max_depth = depth.max(1);
}

/// Set the sparse-array encoding policy on the shared configuration.
pub fn set_sparse_array(convert: bool, ratio: f64, safe: usize) {
    let mut cfg = shared_mut();
    cfg.sparse_convert = convert;
    cfg.sparse_ratio = ratio;
    cfg.sparse_safe = safe;
}

/// Toggle strict-grammar number decoding on the shared configuration.
pub fn set_refuse_invalid_numbers(refuse: bool) {
    shared_mut().refuse_invalid_numbers = refuse;
}
