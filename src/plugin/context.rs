//! Context passed through all pipeline stages.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::Stage;
use crate::config::ProjectConfig;

/// Documented keys of the free-form data bag.
///
/// Each key lists the plugins that write and read it, so ordering
/// dependencies between plugins are explicit.
pub mod keys {
    /// `number`: port of the generated server.
    /// Written by `project-context` (INIT); read by `entry-point`, `readme`.
    pub const SERVER_PORT: &str = "serverPort";

    /// `object`: variables handed to every template.
    /// Written by `project-context` (INIT); read by all template plugins.
    pub const TEMPLATE_DATA: &str = "templateData";

    /// `{ workspace: { "dependencies": [name], "devDependencies": [name] } }`.
    /// Appended by scaffold, database, auth and addon plugins; read by `package-json`.
    pub const DEPENDENCIES: &str = "dependencies";

    /// `{ workspace: { script: command } }`.
    /// Appended by scaffold and addon plugins; read by `package-json`.
    pub const SCRIPTS: &str = "scripts";

    /// `bool`: the project directory did not exist before this run.
    /// Written by the generator before INIT; read by `rollback`.
    pub const CREATED_PROJECT_DIR: &str = "createdProjectDir";
}

/// A file written during the run, attributed to the plugin that wrote it last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub plugin: String,
    pub stage: Stage,
}

/// A non-fatal problem recorded during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub plugin: String,
    pub stage: Stage,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.stage, self.plugin, self.message)
    }
}

/// One handler invocation, in the order the manager made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub stage: Stage,
    pub plugin: String,
}

/// The mutable state shared by every plugin during one generation run.
#[derive(Debug)]
pub struct PluginContext {
    config: ProjectConfig,
    project_dir: PathBuf,
    files: Vec<GeneratedFile>,
    warnings: Vec<Warning>,
    data: IndexMap<String, Value>,
    executions: Vec<Execution>,
    failure: Option<String>,
    current: Option<(String, Stage)>,
}

impl PluginContext {
    /// Creates a fresh context for one run into `project_dir`.
    pub fn new<P: Into<PathBuf>>(config: ProjectConfig, project_dir: P) -> Self {
        Self {
            config,
            project_dir: project_dir.into(),
            files: Vec::new(),
            warnings: Vec::new(),
            data: IndexMap::new(),
            executions: Vec::new(),
            failure: None,
            current: None,
        }
    }

    /// Read-only view of the project configuration.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// The resolved directory the project is generated into.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// The failure that aborted the run, visible to CLEANUP plugins.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Name of the plugin currently executing.
    pub fn current_plugin(&self) -> Option<&str> {
        self.current.as_ref().map(|(name, _)| name.as_str())
    }

    /// Records that `path` was written by the executing plugin.
    /// A path written twice keeps its first position and the last writer.
    pub fn record_file<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        let (plugin, stage) = self
            .current
            .clone()
            .unwrap_or_else(|| ("generator".to_string(), Stage::Init));

        match self.files.iter_mut().find(|f| f.path == path) {
            Some(existing) => {
                existing.plugin = plugin;
                existing.stage = stage;
            }
            None => self.files.push(GeneratedFile { path, plugin, stage }),
        }
    }

    pub fn record_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.record_file(path);
        }
    }

    /// Records a warning attributed to the executing plugin.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        let (plugin, stage) = self
            .current
            .clone()
            .unwrap_or_else(|| ("generator".to_string(), Stage::Init));
        self.push_warning(plugin, stage, message);
    }

    pub(crate) fn push_warning(
        &mut self,
        plugin: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) {
        self.warnings.push(Warning { plugin: plugin.into(), stage, message: message.into() });
    }

    pub(crate) fn begin(&mut self, plugin: &str, stage: Stage) {
        self.executions.push(Execution { stage, plugin: plugin.to_string() });
        self.current = Some((plugin.to_string(), stage));
    }

    pub(crate) fn end(&mut self) {
        self.current = None;
    }

    pub(crate) fn set_failure(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    pub(crate) fn into_parts(self) -> (PathBuf, Vec<GeneratedFile>, Vec<Warning>) {
        (self.project_dir, self.files, self.warnings)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads a bag value as `T`, returning `None` when missing or of another shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data.get(key).and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Variables for template rendering, as seeded during INIT.
    pub fn template_data(&self) -> Value {
        self.data.get(keys::TEMPLATE_DATA).cloned().unwrap_or(Value::Null)
    }

    /// Queues npm packages for `workspace` (e.g. `apps/server`).
    pub fn add_dependencies(&mut self, workspace: &str, names: &[&str], dev: bool) {
        let kind = if dev { "devDependencies" } else { "dependencies" };
        let list = self
            .workspace_entry(keys::DEPENDENCIES, workspace)
            .entry(kind)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = list {
            for name in names {
                let name = Value::String((*name).to_string());
                if !items.contains(&name) {
                    items.push(name);
                }
            }
        }
    }

    /// Queues a `package.json` script for `workspace`. Later calls win.
    pub fn add_script(&mut self, workspace: &str, name: &str, command: &str) {
        self.workspace_entry(keys::SCRIPTS, workspace)
            .insert(name.to_string(), Value::String(command.to_string()));
    }

    fn workspace_entry(&mut self, key: &str, workspace: &str) -> &mut Map<String, Value> {
        let root = self.data.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !root.is_object() {
            *root = Value::Object(Map::new());
        }
        let Value::Object(root) = root else { unreachable!() };

        let entry = root.entry(workspace.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(entry) = entry else { unreachable!() };
        entry
    }
}
