use std::fs;

use crate::error::{Error, Result};
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Checks that every recorded file exists and every `package.json` parses.
pub struct VerifyOutputPlugin;

impl GeneratorPlugin for VerifyOutputPlugin {
    fn name(&self) -> &str {
        "verify-output"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Validate]
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        for file in ctx.files() {
            if !file.path.is_file() {
                return Err(Error::ValidationError(format!(
                    "'{}' recorded by plugin '{}' is missing",
                    file.path.display(),
                    file.plugin
                )));
            }
            if file.path.file_name().is_some_and(|n| n == "package.json") {
                let content = fs::read_to_string(&file.path)
                    .map_err(|e| Error::materialization(&file.path, e))?;
                serde_json::from_str::<serde_json::Value>(&content).map_err(|e| {
                    let path = file.path.display();
                    Error::ValidationError(format!("'{path}' is not valid JSON: {e}"))
                })?;
            }
        }
        Ok(())
    }
}
