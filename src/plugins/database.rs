use std::rc::Rc;

use super::{server_workspace, TemplateTree};
use crate::config::{Database, Orm};
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

/// Copies `db/<orm>/<database>/` into the server workspace and queues the
/// ORM and driver packages.
pub struct DatabasePlugin {
    templates: Rc<TemplateTree>,
}

impl DatabasePlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

impl GeneratorPlugin for DatabasePlugin {
    fn name(&self) -> &str {
        "database"
    }

    fn priority(&self) -> i32 {
        35
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        let config = ctx.config();
        config.orm != Orm::None && config.database != Database::None
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let (orm, database) = (ctx.config().orm, ctx.config().database);
        let Some(workspace) = server_workspace(ctx.config()) else {
            return Ok(());
        };

        self.templates.copy_into(ctx, &format!("db/{orm}/{database}"), workspace)?;

        match orm {
            Orm::Drizzle => {
                ctx.add_dependencies(workspace, &["drizzle-orm"], false);
                ctx.add_dependencies(workspace, &["drizzle-kit"], true);
                let driver: &[&str] = match database {
                    Database::Sqlite => &["@libsql/client"],
                    Database::Postgres => &["pg"],
                    Database::Mysql => &["mysql2"],
                    _ => &[],
                };
                ctx.add_dependencies(workspace, driver, false);
                if database == Database::Postgres {
                    ctx.add_dependencies(workspace, &["@types/pg"], true);
                }
                ctx.add_script(workspace, "db:push", "drizzle-kit push");
                ctx.add_script(workspace, "db:studio", "drizzle-kit studio");
                ctx.add_script(workspace, "db:generate", "drizzle-kit generate");
            }
            Orm::Prisma => {
                ctx.add_dependencies(workspace, &["@prisma/client"], false);
                ctx.add_dependencies(workspace, &["prisma"], true);
                ctx.add_script(workspace, "db:push", "prisma db push");
                ctx.add_script(workspace, "db:studio", "prisma studio");
                ctx.add_script(workspace, "db:generate", "prisma generate");
            }
            Orm::Mongoose => {
                ctx.add_dependencies(workspace, &["mongoose"], false);
            }
            Orm::None => {}
        }
        Ok(())
    }
}
