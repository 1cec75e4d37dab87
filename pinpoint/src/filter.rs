//! File-path inclusion filter deciding which frames belong to user code.
//!
//! The filter answers one question on every sample: is this source file
//! something the user asked to profile? Matching is plain substring
//! containment, no globs or regexes, evaluated in a fixed priority order:
//!
//! 1. **Interpreter library markers** - `site-packages`, `/lib/python`
//!    paths are never user code, even when an include fragment matches
//! 2. **Notebook cells** - `<ipython...>` pseudo-files are always user code
//! 3. **Profiler self-exclusion** - samples are never charged to the
//!    profiler's own support package
//! 4. **Include fragments** - the registered path fragments
//! 5. **Base path** - a file whose resolved (symlink-free) absolute path
//!    contains the base path is in scope even if not explicitly listed
//!
//! One filter instance is current at a time. Installation replaces it;
//! readers clone an `Arc` handle under a short-lived lock and match
//! against the clone, so a replaced instance stays alive until the last
//! in-flight match drops its handle.

use std::fmt::Write as _;
use std::fs;
use std::sync::{Arc, Mutex};

use crate::domain::FilterError;
use crate::profiling::diagnostics;

/// Path markers of the interpreter's bundled library code.
const LIBRARY_PATH_MARKERS: &[&str] = &["site-packages", "/lib/python"];

/// Synthetic cell files produced by interactive notebook sessions.
const NOTEBOOK_CELL_MARKER: &str = "<ipython";

/// Path fragment of the profiler's own support package. Samples landing
/// here are attributed to whatever user code called into it instead.
pub const PROFILER_MODULE_FRAGMENT: &str = "pinpoint/pinpoint";

/// Decides, for a given source-file path, whether it is profileable user
/// code.
///
/// The instance owns all of its string data; matching never depends on
/// caller-owned memory outliving the registration call.
#[derive(Debug)]
pub struct TraceFilter {
    include_patterns: Vec<String>,
    base_path: String,
    profile_all: bool,
}

impl TraceFilter {
    /// Build a filter from registration arguments.
    ///
    /// # Errors
    /// Returns a [`FilterError`] for fragments or a base path that would
    /// match every file (empty strings).
    pub fn new(
        include_patterns: Vec<String>,
        base_path: impl Into<String>,
        profile_all: bool,
    ) -> Result<Self, FilterError> {
        let base_path = base_path.into();
        if base_path.is_empty() {
            return Err(FilterError::EmptyBasePath);
        }
        if let Some(index) = include_patterns.iter().position(String::is_empty) {
            return Err(FilterError::EmptyPattern { index });
        }
        Ok(Self { include_patterns, base_path, profile_all })
    }

    /// Whether samples in `filename` should be charged to the user.
    ///
    /// First matching rule wins; see the module docs for the rule order.
    /// A path that fails to canonicalize cannot be classified and is
    /// treated as out of scope (logged once per distinct path).
    #[must_use]
    pub fn should_trace(&self, filename: &str) -> bool {
        if LIBRARY_PATH_MARKERS.iter().any(|marker| filename.contains(marker)) {
            return false;
        }

        if filename.starts_with('<') && filename.contains(NOTEBOOK_CELL_MARKER) {
            return true;
        }

        if filename.contains(PROFILER_MODULE_FRAGMENT) {
            return false;
        }

        if self.include_patterns.iter().any(|pattern| filename.contains(pattern.as_str())) {
            return true;
        }

        match fs::canonicalize(filename) {
            Ok(resolved) => resolved.to_string_lossy().contains(&self.base_path),
            Err(err) => {
                diagnostics::stats().record_unresolvable_path(filename, &err);
                false
            }
        }
    }

    /// Diagnostic dump of the configuration. Debug output only; the format
    /// carries no contract.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!("profile all? {}\ninclude patterns {{\n", self.profile_all);
        for pattern in &self.include_patterns {
            let _ = writeln!(out, "\t{pattern}");
        }
        let _ = write!(out, "}}\nbase path: {}", self.base_path);
        out
    }

    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The profile-all registration flag. Stored and displayed for
    /// diagnostics; the matching algorithm does not consult it.
    #[must_use]
    pub fn profile_all(&self) -> bool {
        self.profile_all
    }
}

static CURRENT_FILTER: Mutex<Option<Arc<TraceFilter>>> = Mutex::new(None);

/// Install `filter` as the current instance, replacing any previous one.
///
/// The previous instance is freed only once the last reader still matching
/// against it drops its handle.
pub fn install(filter: TraceFilter) {
    if let Ok(mut current) = CURRENT_FILTER.lock() {
        *current = Some(Arc::new(filter));
    }
}

/// Handle to the current filter, if one is installed.
///
/// The lock is held only long enough to clone the handle; matching runs
/// against the clone so installation never serializes the sampling path.
#[must_use]
pub fn current() -> Option<Arc<TraceFilter>> {
    CURRENT_FILTER.lock().ok().and_then(|current| current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str], base: &str) -> TraceFilter {
        TraceFilter::new(patterns.iter().map(|p| (*p).to_owned()).collect(), base, false)
            .expect("valid filter")
    }

    #[test]
    fn test_site_packages_never_traced() {
        let f = filter(&["myapp/"], "/home/u/myapp");
        assert!(!f.should_trace("/home/u/venv/lib/site-packages/requests/api.py"));
    }

    #[test]
    fn test_interpreter_library_never_traced() {
        let f = filter(&["myapp/"], "/home/u/myapp");
        assert!(!f.should_trace("/usr/lib/python3.11/threading.py"));
    }

    #[test]
    fn test_library_markers_outrank_include_patterns() {
        // Rule 1 runs before the include list is even consulted.
        let f = filter(&["myapp/"], "/home/u/myapp");
        assert!(!f.should_trace("/home/u/venv/site-packages/myapp/vendored.py"));
        assert!(!f.should_trace("/usr/lib/python3.11/myapp/shadow.py"));
    }

    #[test]
    fn test_notebook_cells_traced() {
        let f = filter(&[], "/home/u/myapp");
        assert!(f.should_trace("<ipython-input-5-abcdef>"));
    }

    #[test]
    fn test_notebook_marker_requires_bracket_prefix() {
        // Without the leading '<' the notebook rule does not apply and the
        // name falls through to path resolution, which fails.
        let f = filter(&[], "/home/u/myapp");
        assert!(!f.should_trace("cells<ipython>backup.py"));
    }

    #[test]
    fn test_profiler_package_never_traced() {
        let f = filter(&["pinpoint"], "/home/u/myapp");
        assert!(!f.should_trace("/opt/tools/pinpoint/pinpoint.py"));
    }

    #[test]
    fn test_include_fragment_traced_without_touching_filesystem() {
        // "/home/u/myapp" does not exist here; rule 4 must answer before
        // rule 5 tries to resolve the path.
        let f = filter(&["myapp/"], "/home/u/myapp");
        assert!(f.should_trace("/home/u/myapp/worker.py"));
    }

    #[test]
    fn test_pattern_order_is_irrelevant_within_the_include_list() {
        let f = filter(&["first/", "second/"], "/home/u/proj");
        assert!(f.should_trace("/srv/second/job.py"));
        assert!(f.should_trace("/srv/first/job.py"));
    }

    #[test]
    fn test_profile_all_flag_is_inert() {
        let traced = TraceFilter::new(vec![], "/home/u/myapp".to_owned(), true).unwrap();
        // Same verdicts as profile_all = false; the flag is stored only.
        assert!(!traced.should_trace("/usr/lib/python3.11/threading.py"));
        assert!(!traced.should_trace("/definitely/not/a/real/path.py"));
        assert!(traced.profile_all());
    }

    #[test]
    fn test_describe_lists_configuration() {
        let f = filter(&["myapp/", "tools/"], "/home/u/myapp");
        let dump = f.describe();
        assert!(dump.contains("profile all? false"));
        assert!(dump.contains("myapp/"));
        assert!(dump.contains("tools/"));
        assert!(dump.contains("/home/u/myapp"));
    }
}
