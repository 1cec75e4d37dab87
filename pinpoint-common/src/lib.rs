//! # Shared Types (attribution engine ↔ sampling trigger)
//!
//! Defines the value type a resolved sample location is reported as, and the
//! process-wide slot through which the attribution engine publishes its
//! resolver entry point. The sampling trigger depends only on this crate, so
//! it can locate the resolver at runtime without a link-time dependency on
//! the engine.
//!
//! ## Key Types
//!
//! - [`ResolvedLocation`] - The `(file, line, instruction offset)` a sample
//!   is charged to, or the unattributed sentinel
//! - [`SampleResolver`] - Entry point the engine implements and publishes
//! - [`publish_resolver`] / [`installed_resolver`] - The publication slot

use std::sync::{Arc, Mutex};

/// Pseudo-filename reported when the stack walk found no in-scope frame.
///
/// Downstream consumers treat samples carrying this name specially (most
/// drop them); it can never collide with a real path because real source
/// files are never bracketed.
pub const UNATTRIBUTED_FILE: &str = "<BOGUS>";

/// Source location a sample is charged to.
///
/// Constructed fresh for every sample and never cached; the engine retains
/// no reference to it once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedLocation {
    /// Source file of the innermost in-scope frame, or [`UNATTRIBUTED_FILE`].
    pub file: String,
    /// 1-based line currently executing in that frame.
    pub line: u32,
    /// Bytecode offset within the line; 0 on runtimes that cannot expose it.
    pub instruction_offset: u32,
    /// Whether any in-scope frame was found. When false the other fields
    /// hold the sentinel values.
    pub found: bool,
}

impl ResolvedLocation {
    /// The sentinel "no location" value: `("<BOGUS>", 1, 0)`, not found.
    ///
    /// This is a normal outcome, not an error; every sample that lands
    /// entirely inside excluded code produces it.
    #[must_use]
    pub fn unattributed() -> Self {
        Self {
            file: UNATTRIBUTED_FILE.to_owned(),
            line: 1,
            instruction_offset: 0,
            found: false,
        }
    }

    #[must_use]
    pub fn is_unattributed(&self) -> bool {
        !self.found
    }
}

/// Per-sample entry point published by the attribution engine.
///
/// Called synchronously on whatever thread or signal context the sampling
/// trigger uses, so implementations must never unwind and must not retain
/// state across calls.
pub trait SampleResolver: Send + Sync {
    fn resolve_location(&self) -> ResolvedLocation;
}

static RESOLVER_SLOT: Mutex<Option<Arc<dyn SampleResolver>>> = Mutex::new(None);

/// Publish `resolver` as the process-wide resolver entry point.
///
/// Replaces any previously published resolver. A trigger that already
/// cloned the old handle keeps a valid instance until it drops it.
pub fn publish_resolver(resolver: Arc<dyn SampleResolver>) {
    if let Ok(mut slot) = RESOLVER_SLOT.lock() {
        *slot = Some(resolver);
    }
}

/// The currently published resolver, if any.
///
/// The slot lock is held only long enough to clone the handle.
#[must_use]
pub fn installed_resolver() -> Option<Arc<dyn SampleResolver>> {
    RESOLVER_SLOT.lock().ok().and_then(|slot| slot.clone())
}
