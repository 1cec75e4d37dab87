//! Structured error types for pinpoint
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Configuration errors surface to the registration caller and are never
//! fatal to the profiled process; per-sample failures never become errors
//! at all (the resolver fails soft with the unattributed sentinel).

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("include pattern {index} is empty; an empty fragment matches every path")]
    EmptyPattern { index: usize },

    #[error("base path is empty; an empty base path matches every resolvable file")]
    EmptyBasePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_display() {
        let err = FilterError::EmptyPattern { index: 2 };
        assert_eq!(
            err.to_string(),
            "include pattern 2 is empty; an empty fragment matches every path"
        );
    }

    #[test]
    fn test_empty_base_path_display() {
        assert!(FilterError::EmptyBasePath.to_string().contains("base path is empty"));
    }
}
