//! Glob pattern handling for template trees.
//! Builds the include set passed to materialization and the set of OS junk
//! files that are never copied into a generated project.

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::warn;

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};

/// Compiles `patterns` into a single [`GlobSet`].
///
/// # Errors
/// * `Error::ValidationError` if a pattern is not a valid glob
pub fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::ValidationError(format!("invalid glob pattern '{pattern}': {e}"))
        })?);
    }
    builder
        .build()
        .map_err(|e| Error::ValidationError(format!("glob set could not be built: {e}")))
}

/// Patterns for files that are never materialized, such as `.DS_Store`.
pub fn default_ignore_set() -> GlobSet {
    build_glob_set(&DEFAULT_IGNORE_PATTERNS).unwrap_or_else(|e| {
        warn!("{e}");
        GlobSet::empty()
    })
}
