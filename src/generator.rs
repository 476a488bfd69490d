//! Generator façade.
//!
//! [`ModularGenerator`] turns a [`ProjectConfig`] into a project on disk:
//! it validates the configuration, resolves the target directory against the
//! conflict policy, then runs the standard plugin set through the
//! [`GeneratorPipeline`].

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use log::{debug, info};

use crate::command::Formatter;
use crate::config::{Addon, DirectoryConflict, ProjectConfig};
use crate::error::{Error, Result};
use crate::pipeline::GeneratorPipeline;
use crate::plugin::{keys, GeneratorPlugin, PluginContext, PluginManager, TieBreak};
use crate::plugins::{
    AddonPlugin, AuthPlugin, BackendPlugin, BaseTemplatePlugin, DatabasePlugin, EntryPointPlugin,
    FailurePolicy, FormatterPlugin, FrontendPlugin, GitPlugin, InstallPlugin, PackageJsonPlugin,
    ProjectContextPlugin, ReadmePlugin, RollbackPlugin, TemplateTree, VerifyOutputPlugin,
};
use crate::result::{GenerationResult, RunState};

/// Something that turns a configuration into a generated project.
pub trait Generator {
    /// Generates the project described by `config`.
    /// Never panics or returns early on failure: errors are reported in the result.
    fn generate(&self, config: ProjectConfig) -> GenerationResult;
}

/// Directory of the template tree shipped with the crate.
pub fn default_template_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Settings of a [`ModularGenerator`] that are not part of the project itself.
#[derive(Clone)]
pub struct GeneratorOptions {
    /// Root of the template source tree.
    pub template_root: PathBuf,
    /// Ordering of plugins with equal priority.
    pub tie_break: TieBreak,
    /// Formatter run after generation, if any.
    pub formatter: Option<Rc<dyn Formatter>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            template_root: default_template_root(),
            tie_break: TieBreak::default(),
            formatter: None,
        }
    }
}

/// The target directory a run writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub dir: PathBuf,
    /// The directory did not exist before this run.
    pub created: bool,
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| Error::materialization(dir, e))?;
    Ok(entries.next().is_none())
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::materialization(dir, e))
}

/// Returns the first `<dir>-<n>` sibling that does not exist yet.
fn next_free_dir(dir: &Path) -> Result<PathBuf> {
    let name = dir.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        Error::ValidationError(format!("invalid project directory '{}'", dir.display()))
    })?;
    let parent = dir.parent().unwrap_or_else(|| Path::new("."));

    (1..)
        .map(|n| parent.join(format!("{name}-{n}")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::ValidationError("no free directory name found".to_string()))
}

/// Applies the conflict policy to `dir` and makes sure the resulting
/// directory exists.
///
/// # Errors
/// * `Error::ValidationError` if `dir` is a file, or is non-empty under `error`
/// * `Error::MaterializationError` if the directory cannot be created or cleared
pub fn resolve_target_dir(dir: &Path, policy: DirectoryConflict) -> Result<ResolvedTarget> {
    if !dir.exists() {
        create_dir(dir)?;
        return Ok(ResolvedTarget { dir: dir.to_path_buf(), created: true });
    }
    if !dir.is_dir() {
        return Err(Error::ValidationError(format!(
            "'{}' exists and is not a directory",
            dir.display()
        )));
    }
    if is_empty_dir(dir)? {
        return Ok(ResolvedTarget { dir: dir.to_path_buf(), created: false });
    }

    match policy {
        DirectoryConflict::Error => Err(Error::ValidationError(format!(
            "directory '{}' already exists and is not empty",
            dir.display()
        ))),
        DirectoryConflict::Merge => {
            debug!("Merging into existing directory {}", dir.display());
            Ok(ResolvedTarget { dir: dir.to_path_buf(), created: false })
        }
        DirectoryConflict::Overwrite => {
            info!("Clearing existing directory {}", dir.display());
            fs::remove_dir_all(dir).map_err(|e| Error::materialization(dir, e))?;
            create_dir(dir)?;
            Ok(ResolvedTarget { dir: dir.to_path_buf(), created: false })
        }
        DirectoryConflict::Increment => {
            let free = next_free_dir(dir)?;
            info!("Directory {} is not empty, using {}", dir.display(), free.display());
            create_dir(&free)?;
            Ok(ResolvedTarget { dir: free, created: true })
        }
    }
}

/// Registers the standard plugin set. Every plugin is registered; the ones
/// whose selection is absent opt out through `can_handle`.
pub fn register_standard_plugins(
    manager: &mut PluginManager,
    options: &GeneratorOptions,
) -> Result<()> {
    let templates = TemplateTree::new(&options.template_root);

    manager.register(ProjectContextPlugin)?;
    manager.register(BaseTemplatePlugin::new(templates.clone()))?;
    manager.register(FrontendPlugin::new(templates.clone()))?;
    manager.register(BackendPlugin::new(templates.clone()))?;
    manager.register(DatabasePlugin::new(templates.clone()))?;
    manager.register(AuthPlugin::new(templates.clone()))?;
    for addon in Addon::ALL {
        manager.register(AddonPlugin::new(*addon, templates.clone()))?;
    }
    manager.register(PackageJsonPlugin)?;
    manager.register(EntryPointPlugin::new(templates.clone()))?;
    manager.register(ReadmePlugin::new(templates))?;
    manager.register(GitPlugin)?;
    manager.register(InstallPlugin)?;
    if let Some(formatter) = &options.formatter {
        // formatting is best-effort: a broken formatter never fails or warns a run
        manager.register(FormatterPlugin::new(formatter.clone(), FailurePolicy::Ignore))?;
    }
    manager.register(VerifyOutputPlugin)?;
    manager.register(RollbackPlugin)?;
    Ok(())
}

/// The standard generator: the standard plugin set plus any extra plugins.
pub struct ModularGenerator {
    pipeline: GeneratorPipeline,
}

impl ModularGenerator {
    /// Builds a generator with the standard plugin set.
    ///
    /// # Errors
    /// * `Error::DuplicatePluginError` if two plugins share a name
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        Self::with_plugins(options, Vec::new())
    }

    /// Builds a generator with the standard plugin set and `extra` plugins,
    /// registered after the standard ones.
    pub fn with_plugins(
        options: GeneratorOptions,
        extra: Vec<Box<dyn GeneratorPlugin>>,
    ) -> Result<Self> {
        let mut manager = PluginManager::with_tie_break(options.tie_break);
        register_standard_plugins(&mut manager, &options)?;
        for plugin in extra {
            manager.register_boxed(plugin)?;
        }
        Ok(Self { pipeline: GeneratorPipeline::new(manager) })
    }

    pub fn pipeline(&self) -> &GeneratorPipeline {
        &self.pipeline
    }
}

/// Tracks one run through its lifecycle.
struct Run {
    state: RunState,
    started: Instant,
}

impl Run {
    fn new() -> Self {
        Self { state: RunState::Created, started: Instant::now() }
    }

    fn advance(&mut self, next: RunState) -> Result<()> {
        self.state = self.state.advance(next)?;
        debug!("Run is now {}", self.state);
        Ok(())
    }

    fn fail(mut self, project_dir: PathBuf, error: Error) -> GenerationResult {
        if !self.state.is_terminal() {
            if let Err(err) = self.advance(RunState::Failed) {
                debug!("{err}");
            }
        }
        GenerationResult::failed(project_dir, error, self.started.elapsed())
    }
}

impl Generator for ModularGenerator {
    fn generate(&self, config: ProjectConfig) -> GenerationResult {
        let mut run = Run::new();
        info!("Generating '{}' in {}", config.project_name, config.display_path());

        if let Err(err) = run.advance(RunState::ValidatingTarget) {
            return run.fail(config.project_dir.clone(), err);
        }
        let target = match config
            .validate()
            .and_then(|()| resolve_target_dir(&config.project_dir, config.directory_conflict))
        {
            Ok(target) => target,
            Err(err) => return run.fail(config.project_dir.clone(), err),
        };

        if let Err(err) = run.advance(RunState::RunningPipeline) {
            return run.fail(target.dir, err);
        }
        let mut ctx = PluginContext::new(config, target.dir);
        ctx.set(keys::CREATED_PROJECT_DIR, target.created);

        let mut result = self.pipeline.run(ctx);
        let next = if result.success { RunState::Completed } else { RunState::Failed };
        if let Err(err) = run.advance(next) {
            debug!("{err}");
        }
        result.state = run.state;
        result.elapsed = run.started.elapsed();

        if result.success {
            info!("Generated {} files in {:?}", result.files.len(), result.elapsed);
        }
        result
    }
}
