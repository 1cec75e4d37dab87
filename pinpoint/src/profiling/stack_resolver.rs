//! Per-sample stack walk.
//!
//! Walks the sampled thread's frame chain from the innermost frame outward
//! and charges the sample to the first frame the filter accepts. Runs on
//! every sample tick, synchronously on whatever thread or signal context
//! the sampling trigger uses, so it never unwinds and retains no state
//! between calls.

use pinpoint_common::{ResolvedLocation, SampleResolver};

use crate::filter::{self, TraceFilter, PROFILER_MODULE_FRAGMENT};
use crate::profiling::{diagnostics, thread_select};
use crate::runtime::{FrameRef, InterpreterRuntime};

/// Interpreter-internal path marker, excluded before the filter runs.
const INTERPRETER_PATH_MARKER: &str = "/python";

/// Resolves each sample to the innermost user source location.
pub struct StackResolver<R> {
    runtime: R,
}

impl<R: InterpreterRuntime> StackResolver<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Attribute one sample.
    ///
    /// Returns the location of the innermost frame the current filter
    /// accepts, or the unattributed sentinel when the interpreter is not
    /// running, no filter is installed, or the whole chain is excluded.
    /// The sentinel is a normal outcome, not an error.
    pub fn resolve(&self) -> ResolvedLocation {
        let location = self.resolve_inner();
        diagnostics::stats().record_outcome(location.found);
        location
    }

    fn resolve_inner(&self) -> ResolvedLocation {
        if !self.runtime.is_initialized() {
            return ResolvedLocation::unattributed();
        }

        // Grab a handle before taking the execution lock; matching against
        // the handle never blocks installation of a replacement.
        let Some(config) = filter::current() else {
            return ResolvedLocation::unattributed();
        };

        // Frames are mutated concurrently by the running program. The
        // guard stays alive for the whole walk and its drop releases the
        // lock on every exit path.
        let guard = self.runtime.lock_execution();

        let mut frame = self.runtime.current_thread_frame(&guard);
        if frame.is_none() {
            frame = thread_select::main_thread_frame(&self.runtime, &guard);
        }

        walk_frames(frame, &config)
    }
}

/// Walk outward from `frame` until the filter accepts a source file.
fn walk_frames<F: FrameRef>(mut frame: Option<F>, config: &TraceFilter) -> ResolvedLocation {
    while let Some(current) = frame {
        let Some(filename) = current.source_file() else {
            // Undecodable name: skip the frame rather than giving up on
            // the whole sample.
            diagnostics::stats().record_undecodable_frame();
            frame = current.caller();
            continue;
        };

        if filename.is_empty() || excluded_fast_path(&filename) {
            frame = current.caller();
            continue;
        }

        if config.should_trace(&filename) {
            return ResolvedLocation {
                line: current.line_number(),
                instruction_offset: current.instruction_offset(),
                file: filename,
                found: true,
            };
        }

        frame = current.caller();
    }

    ResolvedLocation::unattributed()
}

/// Frames excluded before the filter is consulted: synthetic pseudo-files,
/// interpreter internals, and the profiler's own package.
fn excluded_fast_path(filename: &str) -> bool {
    filename.starts_with('<')
        || filename.contains(INTERPRETER_PATH_MARKER)
        || filename.contains(PROFILER_MODULE_FRAGMENT)
}

impl<R: InterpreterRuntime + Send + Sync> SampleResolver for StackResolver<R> {
    fn resolve_location(&self) -> ResolvedLocation {
        self.resolve()
    }
}
