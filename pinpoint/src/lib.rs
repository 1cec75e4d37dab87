//! # pinpoint - Sampling Profiler Attribution Engine
//!
//! pinpoint is the attribution core of a sampling profiler for interpreted
//! programs: given the execution state at a sample tick, it determines
//! which *user* source location `(file, line, instruction offset)` the
//! sample should be charged to, ignoring frames that belong to the
//! interpreter's standard library, the profiler itself, and other excluded
//! paths.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Sampling Trigger (external)                  │
//! │                 timers / signals, per tick                   │
//! └──────────────────────────┬───────────────────────────────────┘
//!                            │ installed_resolver()
//!                            ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   pinpoint (this crate)                      │
//! │                                                              │
//! │  ┌───────────────┐   should_trace()   ┌───────────────┐      │
//! │  │ StackResolver │───────────────────▶│  TraceFilter  │      │
//! │  │  (per-sample  │                    │  (current     │      │
//! │  │   stack walk) │                    │   instance)   │      │
//! │  └───────┬───────┘                    └───────────────┘      │
//! │          │ borrowed frames, under the execution lock         │
//! │          ▼                                                   │
//! │  ┌───────────────────────────┐                               │
//! │  │    InterpreterRuntime     │  (abstract host capability)   │
//! │  └───────────────────────────┘                               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`filter`]: The path inclusion filter and its replace-not-mutate
//!   current instance
//! - [`profiling`]: The per-sample stack walk, the native-thread fallback
//!   heuristic, and attribution counters
//! - [`runtime`]: Traits the host interpreter runtime implements (frame
//!   chains, thread snapshots, the scoped execution-lock guard)
//! - [`register`]: Installation surface called by the embedder
//! - [`domain`]: Core domain types (`ThreadId`) and errors
//! - [`cli`]: Argument parsing for the filter-check binary
//!
//! ## Typical Usage
//!
//! ```ignore
//! // Embedder, once at start-up:
//! pinpoint::register_files_to_profile(
//!     runtime,
//!     vec!["myapp/".to_owned()],
//!     "/home/u/myapp",
//!     false,
//! )?;
//!
//! // Sampling trigger, on every tick:
//! if let Some(resolver) = pinpoint_common::installed_resolver() {
//!     let location = resolver.resolve_location();
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod filter;
pub mod profiling;
pub mod register;
pub mod runtime;

// Re-export the boundary types and the main entry points
pub use filter::TraceFilter;
pub use pinpoint_common::{ResolvedLocation, SampleResolver, UNATTRIBUTED_FILE};
pub use profiling::StackResolver;
pub use register::{print_files_to_profile, register_files_to_profile};
pub use runtime::{FrameRef, InterpreterRuntime, ThreadSnapshot};
