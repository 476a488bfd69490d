//! Generation pipeline.
//!
//! The pipeline drives a [`PluginManager`] through the fixed stage list,
//! threading one [`PluginContext`] from INIT to CLEANUP. It only sequences
//! plugin invocations and performs no file I/O itself.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = PluginManager::new();
//! manager.register(MyPlugin)?;
//!
//! let pipeline = GeneratorPipeline::new(manager);
//! let result = pipeline.run(PluginContext::new(config, project_dir));
//!
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

use std::time::Instant;

use log::{debug, warn};

use crate::error::Error;
use crate::plugin::{PluginContext, PluginManager, Stage};
use crate::result::GenerationResult;

/// Sequences the stages of one generation run.
pub struct GeneratorPipeline {
    stages: Vec<Stage>,
    manager: PluginManager,
}

impl GeneratorPipeline {
    /// Creates a pipeline over every stage in [`Stage::ALL`] order.
    pub fn new(manager: PluginManager) -> Self {
        Self { stages: Stage::ALL.to_vec(), manager }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn manager(&self) -> &PluginManager {
        &self.manager
    }

    /// Runs every stage in order.
    ///
    /// A fatal plugin error skips the remaining stages except CLEANUP, which
    /// always runs with the failure visible through [`PluginContext::failure`].
    /// CLEANUP errors after a failure become warnings; on an otherwise
    /// successful run they fail the run.
    pub fn run(&self, mut ctx: PluginContext) -> GenerationResult {
        let started = Instant::now();
        let mut error = None;

        for stage in self.stages.iter().copied().filter(|s| *s != Stage::Cleanup) {
            debug!("Entering stage {stage}");
            if let Err(err) = self.manager.run_stage(stage, &mut ctx) {
                warn!("Stage {stage} aborted: {err}");
                ctx.set_failure(err.to_string());
                error = Some(err);
                break;
            }
        }

        debug!("Entering stage {}", Stage::Cleanup);
        if let Err(err) = self.manager.run_stage_best_effort(Stage::Cleanup, &mut ctx) {
            if error.is_some() {
                let plugin = match &err {
                    Error::PluginExecutionError { plugin, .. } => plugin.clone(),
                    _ => "pipeline".to_string(),
                };
                ctx.push_warning(plugin, Stage::Cleanup, err.to_string());
            } else {
                ctx.set_failure(err.to_string());
                error = Some(err);
            }
        }

        let (project_dir, files, warnings) = ctx.into_parts();
        GenerationResult::finished(project_dir, files, warnings, error, started.elapsed())
    }
}
