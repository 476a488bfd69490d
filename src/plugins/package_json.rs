use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{workspace_path, ROOT};
use crate::config::PackageManager;
use crate::deps::version_of;
use crate::error::{Error, Result};
use crate::plugin::{keys, GeneratorPlugin, PluginContext, Stage};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueuedDependencies {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    dev_dependencies: Vec<String>,
}

/// Writes the root `package.json` and one per workspace from the packages and
/// scripts queued in the data bag. A `package.json` already materialized from
/// templates is kept and extended.
pub struct PackageJsonPlugin;

impl PackageJsonPlugin {
    fn write_manifest(
        ctx: &mut PluginContext,
        workspace: &str,
        queued: Option<&QueuedDependencies>,
        scripts: Option<&BTreeMap<String, String>>,
    ) -> Result<()> {
        let dir = workspace_path(ctx.project_dir(), workspace);
        let path = dir.join("package.json");
        let mut manifest = read_manifest(&path)?;

        let name = if workspace == ROOT {
            ctx.config().project_name.clone()
        } else {
            Path::new(workspace)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(workspace)
                .to_string()
        };
        manifest.entry("name".to_string()).or_insert_with(|| json!(name));
        if workspace != ROOT {
            manifest.entry("version".to_string()).or_insert_with(|| json!("0.0.0"));
        }
        manifest.entry("private".to_string()).or_insert(Value::Bool(true));
        manifest.entry("type".to_string()).or_insert_with(|| json!("module"));

        if workspace == ROOT && ctx.config().package_manager != PackageManager::Pnpm {
            manifest
                .entry("workspaces".to_string())
                .or_insert_with(|| json!(["apps/*", "packages/*"]));
        }

        if let Some(scripts) = scripts {
            let entry = object_entry(&mut manifest, "scripts");
            for (name, command) in scripts {
                entry.insert(name.clone(), json!(command));
            }
        }

        if let Some(queued) = queued {
            for (field, names) in [
                ("dependencies", &queued.dependencies),
                ("devDependencies", &queued.dev_dependencies),
            ] {
                if names.is_empty() {
                    continue;
                }
                let entry = object_entry(&mut manifest, field);
                for name in names {
                    entry.entry(name.clone()).or_insert_with(|| json!(version_of(name)));
                }
            }
        }

        debug!("Writing {}", path.display());
        fs::create_dir_all(&dir).map_err(|e| Error::materialization(&dir, e))?;
        let mut content = serde_json::to_string_pretty(&manifest)?;
        content.push('\n');
        fs::write(&path, content).map_err(|e| Error::materialization(&path, e))?;
        ctx.record_file(path);
        Ok(())
    }

    fn write_pnpm_workspace(ctx: &mut PluginContext) -> Result<()> {
        let path = ctx.project_dir().join("pnpm-workspace.yaml");
        let workspace = json!({ "packages": ["apps/*", "packages/*"] });
        let content = serde_yaml::to_string(&workspace).map_err(|e| {
            Error::ConfigError(format!("pnpm workspace could not be serialized: {e}"))
        })?;
        fs::write(&path, content).map_err(|e| Error::materialization(&path, e))?;
        ctx.record_file(path);
        Ok(())
    }
}

fn read_manifest(path: &Path) -> Result<IndexMap<String, Value>> {
    if !path.exists() {
        return Ok(IndexMap::new());
    }
    let content = fs::read_to_string(path).map_err(|e| Error::materialization(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn object_entry<'a>(
    manifest: &'a mut IndexMap<String, Value>,
    key: &str,
) -> &'a mut Map<String, Value> {
    let value = manifest.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    let Value::Object(map) = value else { unreachable!() };
    map
}

fn default_root_scripts(package_manager: PackageManager) -> [(&'static str, &'static str); 2] {
    match package_manager {
        PackageManager::Npm => [
            ("dev", "npm run dev --workspaces --if-present"),
            ("build", "npm run build --workspaces --if-present"),
        ],
        PackageManager::Pnpm => [("dev", "pnpm -r dev"), ("build", "pnpm -r build")],
        PackageManager::Bun => {
            [("dev", "bun run --filter '*' dev"), ("build", "bun run --filter '*' build")]
        }
    }
}

impl GeneratorPlugin for PackageJsonPlugin {
    fn name(&self) -> &str {
        "package-json"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let queued: BTreeMap<String, QueuedDependencies> =
            ctx.get_as(keys::DEPENDENCIES).unwrap_or_default();
        let mut scripts: BTreeMap<String, BTreeMap<String, String>> =
            ctx.get_as(keys::SCRIPTS).unwrap_or_default();

        let root_scripts = scripts.entry(ROOT.to_string()).or_default();
        for (name, command) in default_root_scripts(ctx.config().package_manager) {
            root_scripts.entry(name.to_string()).or_insert_with(|| command.to_string());
        }

        let mut workspaces: Vec<&String> = queued.keys().chain(scripts.keys()).collect();
        workspaces.sort();
        workspaces.dedup();

        for workspace in workspaces {
            Self::write_manifest(ctx, workspace, queued.get(workspace), scripts.get(workspace))?;
        }

        if ctx.config().package_manager == PackageManager::Pnpm {
            Self::write_pnpm_workspace(ctx)?;
        }
        Ok(())
    }
}
