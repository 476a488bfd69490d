//! Plugin registration and per-stage dispatch.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::{GeneratorPlugin, PluginContext, PluginMeta, Stage};
use crate::error::{Error, Result};

/// How plugins with equal priority are ordered within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Earlier registrations run first.
    #[default]
    RegistrationOrder,
    /// Plugins run in ascending name order.
    Name,
}

/// Holds the registered plugins and the stage dispatch table.
///
/// The dispatch table maps every stage to the indices of the plugins hooked
/// to it, already sorted. It is rebuilt on registration and never consulted
/// through the plugins themselves at run time, so the plan for a stage is
/// fixed once registration is complete.
pub struct PluginManager {
    plugins: Vec<Box<dyn GeneratorPlugin>>,
    dispatch: BTreeMap<Stage, Vec<usize>>,
    tie_break: TieBreak,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::with_tie_break(TieBreak::default())
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { plugins: Vec::new(), dispatch: BTreeMap::new(), tie_break }
    }

    /// Adds a plugin.
    ///
    /// # Errors
    /// * `Error::DuplicatePluginError` if a plugin with the same name is registered
    pub fn register(&mut self, plugin: impl GeneratorPlugin + 'static) -> Result<()> {
        self.register_boxed(Box::new(plugin))
    }

    pub fn register_boxed(&mut self, plugin: Box<dyn GeneratorPlugin>) -> Result<()> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(Error::DuplicatePluginError { name: plugin.name().to_string() });
        }
        debug!(
            "Registered plugin '{}' v{} (priority {}, stages {:?})",
            plugin.name(),
            plugin.version(),
            plugin.priority(),
            plugin.stages()
        );

        let index = self.plugins.len();
        for stage in plugin.stages() {
            let slots = self.dispatch.entry(*stage).or_default();
            if !slots.contains(&index) {
                slots.push(index);
            }
        }
        self.plugins.push(plugin);
        self.sort_dispatch();
        Ok(())
    }

    fn sort_dispatch(&mut self) {
        let plugins = &self.plugins;
        let tie_break = self.tie_break;
        for slots in self.dispatch.values_mut() {
            slots.sort_by(|&a, &b| {
                let (pa, pb) = (&plugins[a], &plugins[b]);
                pa.priority().cmp(&pb.priority()).then_with(|| match tie_break {
                    TieBreak::RegistrationOrder => a.cmp(&b),
                    TieBreak::Name => pa.name().cmp(pb.name()).then(a.cmp(&b)),
                })
            });
        }
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Metadata of every registered plugin, in registration order.
    pub fn plugins(&self) -> Vec<PluginMeta> {
        self.plugins.iter().map(|p| p.meta()).collect()
    }

    /// Names of the plugins hooked to `stage`, in execution order,
    /// before `can_handle` gating.
    pub fn plan(&self, stage: Stage) -> Vec<&str> {
        self.dispatch
            .get(&stage)
            .map(|slots| slots.iter().map(|&i| self.plugins[i].name()).collect())
            .unwrap_or_default()
    }

    /// Runs every eligible plugin hooked to `stage`, in order.
    ///
    /// A fatal plugin error stops the stage and is returned wrapped with the
    /// plugin name and stage. A non-fatal error becomes a warning.
    pub fn run_stage(&self, stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        self.run(stage, ctx, false)
    }

    /// Like [`PluginManager::run_stage`], but every eligible plugin runs even
    /// after a fatal error. The first fatal error is returned.
    pub fn run_stage_best_effort(&self, stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        self.run(stage, ctx, true)
    }

    fn run(&self, stage: Stage, ctx: &mut PluginContext, best_effort: bool) -> Result<()> {
        let Some(slots) = self.dispatch.get(&stage) else {
            debug!("No plugins hooked to {stage}");
            return Ok(());
        };

        let mut first_error = None;
        for &index in slots {
            let plugin = &self.plugins[index];
            if !plugin.can_handle(ctx) {
                debug!("Plugin '{}' skipped for {stage}", plugin.name());
                continue;
            }

            debug!("Running plugin '{}' for {stage}", plugin.name());
            ctx.begin(plugin.name(), stage);
            let outcome = plugin.execute(stage, ctx);
            ctx.end();

            let Err(err) = outcome else { continue };
            if plugin.fatal() {
                let err = err.in_plugin(plugin.name(), stage);
                if !best_effort {
                    return Err(err);
                }
                warn!("{err}");
                if first_error.is_some() {
                    ctx.push_warning(plugin.name(), stage, err.to_string());
                } else {
                    first_error = Some(err);
                }
            } else {
                warn!("Plugin '{}' failed during {stage}: {err}", plugin.name());
                ctx.push_warning(plugin.name(), stage, err.to_string());
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
