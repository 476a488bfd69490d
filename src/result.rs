//! Outcome of a generation run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::plugin::{GeneratedFile, Warning};

/// Lifecycle of one generation run.
///
/// ```text
/// Created -> ValidatingTarget -> RunningPipeline -> Completed
///                   |                   |
///                   +-----> Failed <----+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    ValidatingTarget,
    RunningPipeline,
    Completed,
    Failed,
}

impl RunState {
    /// Moves to `next`, rejecting transitions the lifecycle does not allow.
    /// Terminal states cannot be left, so a failed run is never resumed.
    pub fn advance(self, next: RunState) -> Result<RunState> {
        use RunState::*;
        let allowed = matches!(
            (self, next),
            (Created, ValidatingTarget)
                | (ValidatingTarget, RunningPipeline)
                | (ValidatingTarget, Failed)
                | (RunningPipeline, Completed)
                | (RunningPipeline, Failed)
        );
        if allowed {
            Ok(next)
        } else {
            Err(Error::ValidationError(format!("illegal run transition {self} -> {next}")))
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Created => "created",
            RunState::ValidatingTarget => "validating-target",
            RunState::RunningPipeline => "running-pipeline",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything the caller needs to report a finished run.
#[derive(Debug)]
pub struct GenerationResult {
    pub success: bool,
    pub state: RunState,
    pub project_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
    pub warnings: Vec<Warning>,
    pub error: Option<Error>,
    pub elapsed: Duration,
}

impl GenerationResult {
    /// A run that reached the end of the pipeline. `error` decides the outcome.
    pub fn finished(
        project_dir: PathBuf,
        files: Vec<GeneratedFile>,
        warnings: Vec<Warning>,
        error: Option<Error>,
        elapsed: Duration,
    ) -> Self {
        let success = error.is_none();
        Self {
            success,
            state: if success { RunState::Completed } else { RunState::Failed },
            project_dir,
            files,
            warnings,
            error,
            elapsed,
        }
    }

    /// A run that failed before the pipeline started.
    pub fn failed(project_dir: PathBuf, error: Error, elapsed: Duration) -> Self {
        Self::finished(project_dir, Vec::new(), Vec::new(), Some(error), elapsed)
    }

    /// Written paths relative to the project directory, in write order.
    pub fn relative_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|f| f.path.strip_prefix(&self.project_dir).unwrap_or(&f.path).to_path_buf())
            .collect()
    }

    pub fn contains_file<P: AsRef<Path>>(&self, relative: P) -> bool {
        let wanted = self.project_dir.join(relative.as_ref());
        self.files.iter().any(|f| f.path == wanted)
    }

    /// Files attributed to `plugin`.
    pub fn files_by(&self, plugin: &str) -> impl Iterator<Item = &GeneratedFile> {
        let plugin = plugin.to_string();
        self.files.iter().filter(move |f| f.plugin == plugin)
    }
}
