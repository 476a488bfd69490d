use serde_json::{json, Value};

use super::{server_workspace, NATIVE_APP, SERVER_APP, WEB_APP};
use crate::config::{Backend, Database, PackageManager, Runtime};
use crate::constants::{DEFAULT_SERVER_PORT, DEFAULT_WEB_PORT};
use crate::error::Result;
use crate::plugin::{keys, GeneratorPlugin, PluginContext, Stage};

/// Seeds the data bag with the values every later plugin relies on:
/// the server port and the template variables.
pub struct ProjectContextPlugin;

impl GeneratorPlugin for ProjectContextPlugin {
    fn name(&self) -> &str {
        "project-context"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Init]
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let config = ctx.config();
        let server_port = ctx.get_as::<u16>(keys::SERVER_PORT).unwrap_or(DEFAULT_SERVER_PORT);

        let mut data = serde_json::to_value(config)?;
        let run = match config.package_manager {
            PackageManager::Npm => "npm run",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun run",
        };
        let server_runtime = match config.runtime {
            Runtime::Bun => "bun",
            Runtime::Workers => "workers",
            Runtime::Node | Runtime::None => "node",
        };
        let derived = json!({
            "serverPort": server_port,
            "webPort": DEFAULT_WEB_PORT,
            "serverUrl": format!("http://localhost:{server_port}"),
            "webUrl": format!("http://localhost:{DEFAULT_WEB_PORT}"),
            "webFrontend": config.web_frontend().map(|f| f.as_str()),
            "nativeFrontend": config.native_frontend().map(|f| f.as_str()),
            "hasWeb": config.web_frontend().is_some(),
            "hasNative": config.native_frontend().is_some(),
            "hasServer": config.backend.is_server(),
            "hasDatabase": config.database != Database::None,
            "isConvex": config.backend == Backend::Convex,
            "serverWorkspace": server_workspace(config),
            "webApp": WEB_APP,
            "nativeApp": NATIVE_APP,
            "serverApp": SERVER_APP,
            "runCmd": run,
            "serverRuntime": server_runtime,
        });

        if let (Value::Object(data), Value::Object(derived)) = (&mut data, derived) {
            data.extend(derived);
        }

        ctx.set(keys::SERVER_PORT, server_port);
        ctx.set(keys::TEMPLATE_DATA, data);
        Ok(())
    }
}
