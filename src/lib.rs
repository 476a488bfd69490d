//! Stackgen scaffolds full-stack TypeScript projects.
//! A project configuration is turned into a directory tree by a staged,
//! priority-ordered plugin pipeline that materializes Handlebars templates.

/// Command-line interface module for the stackgen binary
pub mod cli;

/// External commands: package-manager install and formatters
pub mod command;

/// Project configuration, its choices and validation
/// Supports JSON and YAML formats (stackgen.json, stackgen.yml, stackgen.yaml)
pub mod config;

pub mod constants;

/// Pinned versions of the packages written into generated manifests
pub mod deps;

/// Error types and handling for stackgen
pub mod error;

/// The generator façade and target directory resolution
pub mod generator;

/// Glob sets of template paths that are never materialized
pub mod ignore;

/// Logger setup shared by the binary
pub mod logger;

/// Stage-by-stage execution of the plugin set
pub mod pipeline;

/// Plugin trait, execution context and registry
pub mod plugin;

/// The standard plugin set
pub mod plugins;

/// Template tree materialization
/// Classifies each template file and writes its output
pub mod processor;

/// Handlebars rendering and helpers
pub mod renderer;

/// Run state and the generation result
pub mod result;
