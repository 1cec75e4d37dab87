//! Registration surface wiring the filter and the resolver into the
//! process.
//!
//! The embedder calls [`register_files_to_profile`] once at start-up (or
//! again on reconfiguration); the external sampling trigger then finds the
//! resolver through [`pinpoint_common::installed_resolver`] on every tick.

use std::sync::Arc;

use crate::domain::FilterError;
use crate::filter::{self, TraceFilter};
use crate::profiling::StackResolver;
use crate::runtime::InterpreterRuntime;

/// Install the set of files to profile and publish the resolver entry
/// point.
///
/// Builds a [`TraceFilter`] from the registration arguments, installs it
/// as the current instance, and publishes a [`StackResolver`] bound to
/// `runtime` so the sampling trigger can reach it without a link-time
/// dependency on this crate.
///
/// # Errors
/// Returns a [`FilterError`] for malformed arguments; nothing is installed
/// or published on failure.
pub fn register_files_to_profile<R>(
    runtime: R,
    include_patterns: Vec<String>,
    base_path: impl Into<String>,
    profile_all: bool,
) -> Result<(), FilterError>
where
    R: InterpreterRuntime + Send + Sync + 'static,
{
    let trace_filter = TraceFilter::new(include_patterns, base_path, profile_all)?;
    filter::install(trace_filter);
    pinpoint_common::publish_resolver(Arc::new(StackResolver::new(runtime)));
    Ok(())
}

/// Print the current filter's configuration to stdout. No-op when none is
/// installed.
pub fn print_files_to_profile() {
    if let Some(config) = filter::current() {
        println!("{}", config.describe());
    }
}
