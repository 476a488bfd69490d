use std::fs;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::plugin::{keys, GeneratorPlugin, PluginContext, Stage};

/// Removes a half-written project after a failed run, when the directory was
/// created by that run. Pre-existing directories are left alone and the
/// partial state is reported instead.
pub struct RollbackPlugin;

impl GeneratorPlugin for RollbackPlugin {
    fn name(&self) -> &str {
        "rollback"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Cleanup]
    }

    fn fatal(&self) -> bool {
        false
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let Some(failure) = ctx.failure().map(str::to_string) else {
            debug!("Generated {} files, nothing to roll back", ctx.files().len());
            return Ok(());
        };

        let project_dir = ctx.project_dir().to_path_buf();
        let created = ctx.get_as::<bool>(keys::CREATED_PROJECT_DIR).unwrap_or(false);
        if !created {
            warn!(
                "Generation failed ({failure}); {} files were left in the existing directory {}",
                ctx.files().len(),
                project_dir.display()
            );
            return Ok(());
        }

        if project_dir.exists() {
            fs::remove_dir_all(&project_dir).map_err(|e| Error::materialization(&project_dir, e))?;
            info!("Removed partially generated project {}", project_dir.display());
        }
        Ok(())
    }
}
