use git2::Repository;
use log::{debug, info};

use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Initializes a git repository in the project directory.
pub struct GitPlugin;

impl GeneratorPlugin for GitPlugin {
    fn name(&self) -> &str {
        "git"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::PostGenerate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().git
    }

    fn fatal(&self) -> bool {
        false
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let project_dir = ctx.project_dir();
        if Repository::open(project_dir).is_ok() {
            debug!("{} is already a git repository", project_dir.display());
            return Ok(());
        }
        Repository::init(project_dir)?;
        info!("Initialized git repository in {}", project_dir.display());
        Ok(())
    }
}
