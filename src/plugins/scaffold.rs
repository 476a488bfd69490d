//! Framework scaffolding: the shared base tree, the frontend apps and the backend.

use std::rc::Rc;

use super::{server_workspace, TemplateTree, NATIVE_APP, ROOT, WEB_APP};
use crate::config::{Backend, Frontend, Runtime};
use crate::constants::DEFAULT_WEB_PORT;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Copies `base/` into the project root.
pub struct BaseTemplatePlugin {
    templates: Rc<TemplateTree>,
}

impl BaseTemplatePlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

impl GeneratorPlugin for BaseTemplatePlugin {
    fn name(&self) -> &str {
        "base-template"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        self.templates.copy_into(ctx, "base", ROOT)?;
        ctx.add_dependencies(ROOT, &["typescript"], true);
        Ok(())
    }
}

/// Copies `frontend/<name>/` into `apps/web` or `apps/native`.
pub struct FrontendPlugin {
    templates: Rc<TemplateTree>,
}

impl FrontendPlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

fn web_packages(frontend: Frontend) -> (&'static [&'static str], &'static [&'static str]) {
    match frontend {
        Frontend::React => (
            &["react", "react-dom"],
            &["vite", "@vitejs/plugin-react", "@types/react", "@types/react-dom"],
        ),
        Frontend::TanstackRouter => (
            &["react", "react-dom", "@tanstack/react-router"],
            &[
                "vite",
                "@vitejs/plugin-react",
                "@tanstack/router-plugin",
                "@types/react",
                "@types/react-dom",
            ],
        ),
        Frontend::ReactRouter => (
            &["react", "react-dom", "react-router"],
            &["vite", "@react-router/dev", "@types/react", "@types/react-dom"],
        ),
        Frontend::TanstackStart => (
            &["react", "react-dom", "@tanstack/react-router", "@tanstack/react-start"],
            &["vite", "@vitejs/plugin-react", "@types/react", "@types/react-dom"],
        ),
        Frontend::Next => (&["next", "react", "react-dom"], &["@types/react", "@types/react-dom"]),
        Frontend::Nuxt => (&["nuxt", "vue"], &[]),
        Frontend::Svelte => (&["svelte", "@sveltejs/kit"], &["vite"]),
        Frontend::Solid => (&["solid-js"], &["vite", "vite-plugin-solid"]),
        Frontend::NativeNativewind => (&["expo", "react", "react-native", "nativewind"], &[]),
        Frontend::NativeUnistyles => {
            (&["expo", "react", "react-native", "react-native-unistyles"], &[])
        }
        Frontend::None => (&[], &[]),
    }
}

fn web_dev_script(frontend: Frontend) -> String {
    match frontend {
        Frontend::Next => format!("next dev --port {DEFAULT_WEB_PORT}"),
        Frontend::Nuxt => format!("nuxt dev --port {DEFAULT_WEB_PORT}"),
        Frontend::ReactRouter => format!("react-router dev --port {DEFAULT_WEB_PORT}"),
        _ => format!("vite --port {DEFAULT_WEB_PORT}"),
    }
}

impl GeneratorPlugin for FrontendPlugin {
    fn name(&self) -> &str {
        "frontend-scaffold"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().frontend.iter().any(|f| *f != Frontend::None)
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let config = ctx.config();
        let (web, native) = (config.web_frontend(), config.native_frontend());

        if let Some(frontend) = web {
            self.templates.copy_into(ctx, &format!("frontend/{frontend}"), WEB_APP)?;
            let (deps, dev_deps) = web_packages(frontend);
            ctx.add_dependencies(WEB_APP, deps, false);
            ctx.add_dependencies(WEB_APP, dev_deps, true);
            ctx.add_script(WEB_APP, "dev", &web_dev_script(frontend));
            let build = match frontend {
                Frontend::Next => "next build",
                Frontend::Nuxt => "nuxt build",
                Frontend::ReactRouter => "react-router build",
                _ => "vite build",
            };
            ctx.add_script(WEB_APP, "build", build);
        }

        if let Some(frontend) = native {
            self.templates.copy_into(ctx, &format!("frontend/{frontend}"), NATIVE_APP)?;
            let (deps, dev_deps) = web_packages(frontend);
            ctx.add_dependencies(NATIVE_APP, deps, false);
            ctx.add_dependencies(NATIVE_APP, dev_deps, true);
            ctx.add_script(NATIVE_APP, "dev", "expo start");
        }
        Ok(())
    }
}

/// Copies `backend/<name>/` into the server workspace and queues its packages.
pub struct BackendPlugin {
    templates: Rc<TemplateTree>,
}

impl BackendPlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

impl GeneratorPlugin for BackendPlugin {
    fn name(&self) -> &str {
        "backend-scaffold"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().backend != Backend::None
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let (backend, runtime) = (ctx.config().backend, ctx.config().runtime);
        let Some(workspace) = server_workspace(ctx.config()) else {
            return Ok(());
        };

        self.templates.copy_into(ctx, &format!("backend/{backend}"), workspace)?;

        let (deps, dev_deps): (&[&str], &[&str]) = match backend {
            Backend::Hono => (&["hono", "dotenv", "zod"], &[]),
            Backend::Express => {
                (&["express", "cors", "dotenv", "zod"], &["@types/express", "@types/cors"])
            }
            Backend::Fastify => (&["fastify", "@fastify/cors", "dotenv", "zod"], &[]),
            Backend::Elysia => (&["elysia", "@elysiajs/cors", "dotenv", "zod"], &[]),
            Backend::Convex => (&["convex"], &[]),
            Backend::Next => (&["next", "zod"], &[]),
            Backend::None => (&[], &[]),
        };
        ctx.add_dependencies(workspace, deps, false);
        ctx.add_dependencies(workspace, dev_deps, true);

        if backend == Backend::Convex {
            ctx.add_script(workspace, "dev", "convex dev");
            return Ok(());
        }
        if !backend.is_server() {
            return Ok(());
        }

        match runtime {
            Runtime::Bun => {
                ctx.add_dependencies(workspace, &["@types/bun"], true);
                ctx.add_script(workspace, "dev", "bun run --hot src/index.ts");
                ctx.add_script(workspace, "start", "bun run dist/index.js");
            }
            Runtime::Workers => {
                ctx.add_dependencies(workspace, &["wrangler"], true);
                ctx.add_script(workspace, "dev", "wrangler dev --port=3000");
                ctx.add_script(workspace, "deploy", "wrangler deploy --minify");
            }
            Runtime::Node | Runtime::None => {
                if backend == Backend::Hono {
                    ctx.add_dependencies(workspace, &["@hono/node-server"], false);
                }
                ctx.add_dependencies(workspace, &["tsx", "@types/node"], true);
                ctx.add_script(workspace, "dev", "tsx watch src/index.ts");
                ctx.add_script(workspace, "start", "node dist/index.js");
            }
        }
        ctx.add_dependencies(workspace, &["tsdown", "typescript"], true);
        ctx.add_script(workspace, "build", "tsdown");
        Ok(())
    }
}
