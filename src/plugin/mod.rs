//! Generator plugins.
//!
//! A plugin is the unit of extension of the generator: it declares a name,
//! a version, a priority and the stages it hooks into. The [`PluginManager`]
//! invokes the hooked plugins of a stage in ascending priority order against
//! the shared [`PluginContext`].
//!
//! # Example
//!
//! ```ignore
//! struct LicensePlugin;
//!
//! impl GeneratorPlugin for LicensePlugin {
//!     fn name(&self) -> &str { "license" }
//!     fn priority(&self) -> i32 { 75 }
//!     fn stages(&self) -> &[Stage] { &[Stage::Generate] }
//!
//!     fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
//!         let path = ctx.project_dir().join("LICENSE");
//!         std::fs::write(&path, "MIT")?;
//!         ctx.record_file(path);
//!         Ok(())
//!     }
//! }
//! ```

mod context;
pub mod manager;
mod stage;

use semver::Version;

pub use context::{keys, Execution, GeneratedFile, PluginContext, Warning};
pub use manager::{PluginManager, TieBreak};
pub use stage::Stage;

use crate::error::Result;

/// Identity of a registered plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMeta {
    pub name: String,
    pub version: Version,
    pub priority: i32,
    pub stages: Vec<Stage>,
    pub fatal: bool,
}

/// A plugin that contributes to project generation.
pub trait GeneratorPlugin {
    /// Unique name of this plugin, used for ordering ties, attribution and errors.
    fn name(&self) -> &str;

    fn version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    /// Lower priorities run earlier within a stage.
    fn priority(&self) -> i32;

    /// Stages this plugin has a handler for.
    fn stages(&self) -> &[Stage];

    /// Lets a plugin opt out of a run. When false none of its handlers run.
    #[allow(unused_variables)]
    fn can_handle(&self, ctx: &PluginContext) -> bool {
        true
    }

    /// Fatal plugins abort the run on error; non-fatal ones record a warning.
    fn fatal(&self) -> bool {
        true
    }

    /// Handles `stage`. Only called for stages listed in [`GeneratorPlugin::stages`].
    ///
    /// # Errors
    ///
    /// Return an error to abort the run (fatal plugins) or to record a warning.
    fn execute(&self, stage: Stage, ctx: &mut PluginContext) -> Result<()>;

    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: self.name().to_string(),
            version: self.version(),
            priority: self.priority(),
            stages: self.stages().to_vec(),
            fatal: self.fatal(),
        }
    }
}
