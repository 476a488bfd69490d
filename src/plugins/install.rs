use log::info;

use crate::command::install_dependencies;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Runs `<package manager> install` in the project directory.
/// Failures are recorded as warnings.
pub struct InstallPlugin;

impl GeneratorPlugin for InstallPlugin {
    fn name(&self) -> &str {
        "install"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::PostGenerate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().install
    }

    fn fatal(&self) -> bool {
        false
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let package_manager = ctx.config().package_manager;
        info!("Installing dependencies with {package_manager}");
        install_dependencies(package_manager, ctx.project_dir())
    }
}
