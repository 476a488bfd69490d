//! Error handling for stackgen.
//! Defines the error taxonomy and the result alias used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::plugin::Stage;

/// Errors that can occur while validating a project, registering plugins,
/// rendering templates or running the generation pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The project configuration is malformed or contains conflicting choices.
    /// Always raised before any file is written.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Two plugins were registered under the same name.
    #[error("Plugin '{name}' is already registered.")]
    DuplicatePluginError { name: String },

    /// The template source could not be parsed or rendered.
    #[error("Template syntax error in '{template}': {message}.")]
    TemplateSyntaxError { template: String, message: String },

    /// A file or directory could not be read or written.
    #[error("Failed to materialize '{}': {source}.", path.display())]
    MaterializationError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A plugin handler failed. Carries the plugin name and stage it failed in.
    #[error("Plugin '{plugin}' failed during {stage}: {source}")]
    PluginExecutionError {
        plugin: String,
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    /// The project configuration file could not be loaded.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// An external command exited unsuccessfully.
    #[error("Command '{command}' failed: {message}.")]
    CommandError { command: String, message: String },

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Free-form failure raised by a custom plugin handler.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Wraps `self` with the plugin and stage it was raised from.
    pub fn in_plugin(self, plugin: impl Into<String>, stage: Stage) -> Self {
        Error::PluginExecutionError { plugin: plugin.into(), stage, source: Box::new(self) }
    }

    /// Creates a materialization error for `path`.
    pub fn materialization<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::MaterializationError { path: path.into(), source }
    }

    /// Returns the innermost error, looking through plugin wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::PluginExecutionError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
