use std::rc::Rc;

use super::{server_workspace, TemplateTree, WEB_APP};
use crate::config::Auth;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Copies `auth/<provider>/server` and `auth/<provider>/web` into the
/// matching workspaces.
pub struct AuthPlugin {
    templates: Rc<TemplateTree>,
}

impl AuthPlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

impl GeneratorPlugin for AuthPlugin {
    fn name(&self) -> &str {
        "auth"
    }

    fn priority(&self) -> i32 {
        38
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().auth != Auth::None
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let auth = ctx.config().auth;
        let has_web = ctx.config().web_frontend().is_some();

        if let Some(workspace) = server_workspace(ctx.config()) {
            self.templates.copy_into(ctx, &format!("auth/{auth}/server"), workspace)?;
            if auth == Auth::BetterAuth {
                ctx.add_dependencies(workspace, &["better-auth"], false);
            }
        }

        if has_web {
            self.templates.copy_optional(ctx, &format!("auth/{auth}/web"), WEB_APP)?;
            match auth {
                Auth::BetterAuth => ctx.add_dependencies(WEB_APP, &["better-auth"], false),
                Auth::Clerk => ctx.add_dependencies(WEB_APP, &["@clerk/clerk-react"], false),
                Auth::None => {}
            }
        }
        Ok(())
    }
}
