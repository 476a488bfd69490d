//! The standard plugin set.
//!
//! | plugin               | stage         | priority |
//! |----------------------|---------------|----------|
//! | `project-context`    | init          | 0        |
//! | `base-template`      | generate      | 10       |
//! | `frontend-scaffold`  | generate      | 20       |
//! | `backend-scaffold`   | generate      | 30       |
//! | `database`           | generate      | 35       |
//! | `auth`               | generate      | 38       |
//! | `addon-*`            | generate      | 40       |
//! | `package-json`       | generate      | 50       |
//! | `entry-point`        | generate      | 60       |
//! | `readme`             | generate      | 70       |
//! | `git`                | post-generate | 10       |
//! | `install`            | post-generate | 20       |
//! | `formatter`          | post-generate | 90       |
//! | `verify-output`      | validate      | 0        |
//! | `rollback`           | cleanup       | 0        |

mod addons;
mod auth;
mod cleanup;
mod database;
mod entry_point;
mod format;
mod git;
mod init;
mod install;
mod package_json;
mod readme;
mod scaffold;
mod validate;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::debug;

pub use addons::AddonPlugin;
pub use auth::AuthPlugin;
pub use cleanup::RollbackPlugin;
pub use database::DatabasePlugin;
pub use entry_point::EntryPointPlugin;
pub use format::{FailurePolicy, FormatterPlugin};
pub use git::GitPlugin;
pub use init::ProjectContextPlugin;
pub use install::InstallPlugin;
pub use package_json::PackageJsonPlugin;
pub use readme::ReadmePlugin;
pub use scaffold::{BackendPlugin, BaseTemplatePlugin, FrontendPlugin};
pub use validate::VerifyOutputPlugin;

use crate::config::{Backend, ProjectConfig};
use crate::error::Result;
use crate::plugin::PluginContext;
use crate::processor::TemplateProcessor;

/// Workspace of the browser frontend.
pub const WEB_APP: &str = "apps/web";
/// Workspace of the native frontend.
pub const NATIVE_APP: &str = "apps/native";
/// Workspace of a standalone server backend.
pub const SERVER_APP: &str = "apps/server";
/// Workspace of the convex backend.
pub const CONVEX_PACKAGE: &str = "packages/backend";
/// The project root, as a workspace key.
pub const ROOT: &str = ".";

/// Workspace holding server-side code, if the backend has one.
pub fn server_workspace(config: &ProjectConfig) -> Option<&'static str> {
    match config.backend {
        Backend::None => None,
        Backend::Convex => Some(CONVEX_PACKAGE),
        Backend::Next => Some(WEB_APP),
        _ => Some(SERVER_APP),
    }
}

/// Directory of `workspace` inside `project_dir`.
pub fn workspace_path(project_dir: &Path, workspace: &str) -> PathBuf {
    if workspace == ROOT {
        project_dir.to_path_buf()
    } else {
        project_dir.join(workspace)
    }
}

/// A template source tree shared by the template-driven plugins.
pub struct TemplateTree {
    root: PathBuf,
    processor: TemplateProcessor,
}

impl TemplateTree {
    pub fn new<P: Into<PathBuf>>(root: P) -> Rc<Self> {
        Rc::new(Self { root: root.into(), processor: TemplateProcessor::new() })
    }

    pub fn processor(&self) -> &TemplateProcessor {
        &self.processor
    }

    /// Materializes `source` (relative to the tree root) into the workspace
    /// `dest` of the project and records the written files.
    ///
    /// A missing source directory is recorded as a warning.
    pub fn copy_into(&self, ctx: &mut PluginContext, source: &str, dest: &str) -> Result<()> {
        let source_dir = self.root.join(source);
        if !source_dir.is_dir() {
            ctx.add_warning(format!("no templates bundled for '{source}'"));
            return Ok(());
        }
        self.copy_existing(ctx, source, dest)
    }

    /// Like [`TemplateTree::copy_into`], but silently skips a missing source.
    pub fn copy_optional(&self, ctx: &mut PluginContext, source: &str, dest: &str) -> Result<()> {
        if !self.root.join(source).is_dir() {
            debug!("Optional templates '{source}' not present");
            return Ok(());
        }
        self.copy_existing(ctx, source, dest)
    }

    fn copy_existing(&self, ctx: &mut PluginContext, source: &str, dest: &str) -> Result<()> {
        let dest_dir = workspace_path(ctx.project_dir(), dest);
        let data = ctx.template_data();
        let written = self.processor.materialize(&self.root.join(source), &dest_dir, &data, None)?;
        ctx.record_files(written);
        Ok(())
    }
}
