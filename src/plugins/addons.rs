use std::rc::Rc;

use super::{TemplateTree, ROOT, WEB_APP};
use crate::config::Addon;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Installs one addon. One instance is registered per [`Addon`] variant and
/// each opts out of runs where its addon was not selected.
pub struct AddonPlugin {
    addon: Addon,
    name: String,
    templates: Rc<TemplateTree>,
}

impl AddonPlugin {
    pub fn new(addon: Addon, templates: Rc<TemplateTree>) -> Self {
        Self { addon, name: format!("addon-{addon}"), templates }
    }

    fn workspace(&self) -> &'static str {
        match self.addon {
            Addon::Pwa | Addon::Tauri => WEB_APP,
            _ => ROOT,
        }
    }
}

impl GeneratorPlugin for AddonPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        40
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().has_addon(self.addon)
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let workspace = self.workspace();
        self.templates.copy_into(ctx, &format!("addons/{}", self.addon), workspace)?;

        match self.addon {
            Addon::Biome => {
                ctx.add_dependencies(ROOT, &["@biomejs/biome"], true);
                ctx.add_script(ROOT, "check", "biome check --write .");
            }
            Addon::Husky => {
                ctx.add_dependencies(ROOT, &["husky", "lint-staged"], true);
                ctx.add_script(ROOT, "prepare", "husky");
            }
            Addon::Turborepo => {
                ctx.add_dependencies(ROOT, &["turbo"], true);
                ctx.add_script(ROOT, "dev", "turbo dev");
                ctx.add_script(ROOT, "build", "turbo build");
            }
            Addon::Vitest | Addon::Testing => {
                ctx.add_dependencies(ROOT, &["vitest"], true);
                ctx.add_script(ROOT, "test", "vitest run");
            }
            Addon::Playwright => {
                ctx.add_dependencies(ROOT, &["@playwright/test"], true);
                ctx.add_script(ROOT, "test:e2e", "playwright test");
            }
            Addon::Cypress => {
                ctx.add_dependencies(ROOT, &["cypress"], true);
                ctx.add_script(ROOT, "test:e2e", "cypress run");
            }
            Addon::Pwa => {
                ctx.add_dependencies(WEB_APP, &["vite-plugin-pwa"], true);
            }
            Addon::Tauri => {
                ctx.add_dependencies(WEB_APP, &["@tauri-apps/cli"], true);
                ctx.add_script(WEB_APP, "desktop:dev", "tauri dev");
                ctx.add_script(WEB_APP, "desktop:build", "tauri build");
            }
            Addon::Docker => {
                let build = format!("docker build -t {} .", ctx.config().project_name);
                ctx.add_script(ROOT, "docker:build", &build);
            }
        }
        Ok(())
    }
}
