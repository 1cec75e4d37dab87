//! Attribution coverage counters.
//!
//! Tracks how often samples resolve to a user frame versus the sentinel,
//! and how often per-frame introspection degrades (undecodable source
//! names, unresolvable paths). Helps users understand why a profile looks
//! empty without wading through logs.

use log::warn;
use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

/// Process-wide attribution counters.
pub struct AttributionStats {
    /// Samples charged to a user frame
    attributed: AtomicU64,
    /// Samples that walked the whole chain without a match
    unattributed: AtomicU64,
    /// Frames skipped because their source name could not be decoded
    undecodable_frames: AtomicU64,
    /// Filter lookups that could not canonicalize the candidate path
    unresolvable_paths: AtomicU64,
    /// Paths already warned about (to avoid log spam)
    warned_paths: Mutex<HashSet<String>>,
}

impl AttributionStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributed: AtomicU64::new(0),
            unattributed: AtomicU64::new(0),
            undecodable_frames: AtomicU64::new(0),
            unresolvable_paths: AtomicU64::new(0),
            warned_paths: Mutex::new(HashSet::new()),
        }
    }

    /// Record the outcome of one resolver call.
    pub fn record_outcome(&self, found: bool) {
        if found {
            self.attributed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.unattributed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a frame skipped because its source name failed to decode.
    pub fn record_undecodable_frame(&self) {
        self.undecodable_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a path the filter could not canonicalize, warning once per
    /// distinct path.
    pub fn record_unresolvable_path(&self, filename: &str, err: &io::Error) {
        self.unresolvable_paths.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut warned) = self.warned_paths.lock() {
            if warned.insert(filename.to_owned()) {
                warn!("Cannot resolve '{filename}' ({err}) - treating as out of scope");
            }
        }
    }

    /// Percentage of samples charged to a user frame.
    ///
    /// Returns 100.0 before any sample has been resolved.
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for percentages
    pub fn attribution_coverage(&self) -> f64 {
        let attributed = self.attributed.load(Ordering::Relaxed);
        let unattributed = self.unattributed.load(Ordering::Relaxed);
        let total = attributed + unattributed;

        if total > 0 {
            (attributed as f64 / total as f64) * 100.0
        } else {
            100.0
        }
    }

    pub fn undecodable_frames(&self) -> u64 {
        self.undecodable_frames.load(Ordering::Relaxed)
    }

    pub fn unresolvable_paths(&self) -> u64 {
        self.unresolvable_paths.load(Ordering::Relaxed)
    }
}

impl Default for AttributionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Global counters, initialized on first access.
static STATS: OnceLock<AttributionStats> = OnceLock::new();

/// Get the global attribution counters.
pub fn stats() -> &'static AttributionStats {
    STATS.get_or_init(AttributionStats::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_with_no_samples_is_full() {
        let stats = AttributionStats::new();
        assert!((stats.attribution_coverage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_ratio() {
        let stats = AttributionStats::new();
        stats.record_outcome(true);
        stats.record_outcome(true);
        stats.record_outcome(true);
        stats.record_outcome(false);
        assert!((stats.attribution_coverage() - 75.0).abs() < 0.1);
    }

    #[test]
    fn test_unresolvable_paths_counted_per_lookup() {
        let stats = AttributionStats::new();
        let err = io::Error::from(io::ErrorKind::NotFound);
        stats.record_unresolvable_path("/gone/a.py", &err);
        stats.record_unresolvable_path("/gone/a.py", &err);
        // Counted twice, warned once.
        assert_eq!(stats.unresolvable_paths(), 2);
        let warned = stats.warned_paths.lock().unwrap();
        assert_eq!(warned.len(), 1);
    }
}
