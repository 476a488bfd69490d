use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use stackgen::cli::{Args, ConflictArg, TieBreakArg};
use stackgen::config::DirectoryConflict;
use stackgen::plugin::TieBreak;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("stackgen")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["./stackgen.json"])).unwrap();

    assert_eq!(parsed.config, PathBuf::from("./stackgen.json"));
    assert_eq!(parsed.output, None);
    assert_eq!(parsed.templates, None);
    assert_eq!(parsed.conflict, None);
    assert_eq!(parsed.tie_break, TieBreakArg::Registration);
    assert!(!parsed.format);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--verbose",
        "--format",
        "--no-git",
        "--no-install",
        "--conflict",
        "increment",
        "--tie-break",
        "name",
        "--templates",
        "./templates",
        "--output",
        "./out",
        "./config",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert!(parsed.format);
    assert!(parsed.no_git);
    assert!(parsed.no_install);
    assert_eq!(parsed.conflict, Some(ConflictArg::Increment));
    assert_eq!(parsed.tie_break, TieBreakArg::Name);
    assert_eq!(parsed.templates, Some(PathBuf::from("./templates")));
    assert_eq!(parsed.output, Some(PathBuf::from("./out")));
}

#[test]
fn test_value_conversions() {
    assert_eq!(DirectoryConflict::from(ConflictArg::Merge), DirectoryConflict::Merge);
    assert_eq!(DirectoryConflict::from(ConflictArg::Overwrite), DirectoryConflict::Overwrite);
    assert_eq!(TieBreak::from(TieBreakArg::Registration), TieBreak::RegistrationOrder);
    assert_eq!(TieBreak::from(TieBreakArg::Name), TieBreak::Name);
}

#[test]
fn test_missing_config() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_unknown_conflict_policy() {
    assert!(Args::try_parse_from(make_args(&["--conflict", "replace", "./config"])).is_err());
}
