use std::path::Path;

use stackgen::error::Error;
use stackgen::ignore::{build_glob_set, default_ignore_set};

#[test]
fn test_default_ignore_set() {
    let set = default_ignore_set();

    assert!(set.is_match(Path::new(".DS_Store")));
    assert!(set.is_match(Path::new("src/.DS_Store")));
    assert!(set.is_match(Path::new("assets/Thumbs.db")));
    assert!(set.is_match(Path::new(".git/HEAD")));
    assert!(!set.is_match(Path::new("_gitignore")));
    assert!(!set.is_match(Path::new("src/index.ts.hbs")));
}

#[test]
fn test_build_glob_set() {
    let set = build_glob_set(&["**/*.ts", "*.json"]).unwrap();

    assert!(set.is_match(Path::new("src/index.ts")));
    assert!(set.is_match(Path::new("package.json")));
    assert!(!set.is_match(Path::new("README.md")));
}

#[test]
fn test_invalid_pattern() {
    let err = build_glob_set(&["src/[index"]).unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
}
