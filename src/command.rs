//! External commands run against a generated project.
//! Covers the package-manager install step and the optional code formatter.

use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::config::PackageManager;
use crate::error::{Error, Result};

/// Runs `program args...` inside `cwd` and waits for it to finish.
///
/// # Errors
/// * `Error::CommandError` if the program cannot be spawned or exits unsuccessfully
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let display =
        std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    debug!("Running '{}' in {}", display, cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::CommandError { command: display.clone(), message: e.to_string() })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::CommandError {
            command: display,
            message: format!("{} {}", output.status, stderr.trim()),
        });
    }
    Ok(())
}

/// Installs project dependencies with the selected package manager.
pub fn install_dependencies(package_manager: PackageManager, project_dir: &Path) -> Result<()> {
    run_command(package_manager.as_str(), &["install"], project_dir)
}

/// A code formatter applied to the generated tree.
pub trait Formatter {
    fn name(&self) -> &str;

    /// Formats every file under `project_dir` in place.
    fn format(&self, project_dir: &Path) -> Result<()>;
}

/// Formatter implemented by an external program, e.g. `npx prettier --write .`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self { program: program.into(), args: args.iter().map(|a| a.to_string()).collect() }
    }

    /// `npx prettier --write .`
    pub fn prettier() -> Self {
        Self::new("npx", &["--yes", "prettier", "--write", "."])
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn format(&self, project_dir: &Path) -> Result<()> {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        run_command(&self.program, &args, project_dir)
    }
}
