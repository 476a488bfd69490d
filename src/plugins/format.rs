use std::rc::Rc;

use log::{debug, warn};

use crate::command::Formatter;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// What to do when the formatter fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and carry on with an unformatted tree.
    Ignore,
    /// Record the failure as a warning on the result.
    Warn,
}

/// Runs an external formatter over the generated tree.
pub struct FormatterPlugin {
    formatter: Rc<dyn Formatter>,
    on_failure: FailurePolicy,
}

impl FormatterPlugin {
    pub fn new(formatter: Rc<dyn Formatter>, on_failure: FailurePolicy) -> Self {
        Self { formatter, on_failure }
    }
}

impl GeneratorPlugin for FormatterPlugin {
    fn name(&self) -> &str {
        "formatter"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::PostGenerate]
    }

    fn fatal(&self) -> bool {
        false
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        debug!("Formatting {} with {}", ctx.project_dir().display(), self.formatter.name());
        match (self.formatter.format(ctx.project_dir()), self.on_failure) {
            (Ok(()), _) => Ok(()),
            (Err(err), FailurePolicy::Ignore) => {
                warn!("Formatting skipped: {err}");
                Ok(())
            }
            (Err(err), FailurePolicy::Warn) => Err(err),
        }
    }
}
