use std::rc::Rc;

use log::debug;

use super::{TemplateTree, SERVER_APP};
use crate::config::{Backend, Runtime};
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

const ENTRY_CANDIDATES: [&str; 4] = ["index.ts", "index.js", "index.mts", "index.mjs"];

const HONO_ENTRY: &str = r#"import "dotenv/config";
import { Hono } from "hono";
import { cors } from "hono/cors";
import { logger } from "hono/logger";
{{#if (eq runtime "node")}}
import { serve } from "@hono/node-server";
{{/if}}

const app = new Hono();

app.use(logger());
app.use(
  "/*",
  cors({
    origin: process.env.CORS_ORIGIN || "{{webUrl}}",
    allowMethods: ["GET", "POST", "OPTIONS"],
  }),
);

app.get("/", (c) => {
  return c.text("OK");
});

{{#if (eq runtime "node")}}
serve(
  {
    fetch: app.fetch,
    port: {{serverPort}},
  },
  (info) => {
    console.log(`Server is running on http://localhost:${info.port}`);
  },
);
{{else}}
{{#if (eq runtime "workers")}}
export default app;
{{else}}
export default {
  port: {{serverPort}},
  fetch: app.fetch,
};
{{/if}}
{{/if}}
"#;

const EXPRESS_ENTRY: &str = r#"import "dotenv/config";
import cors from "cors";
import express from "express";

const app = express();

app.use(
  cors({
    origin: process.env.CORS_ORIGIN || "{{webUrl}}",
    methods: ["GET", "POST", "OPTIONS"],
  }),
);

app.use(express.json());

app.get("/", (_req, res) => {
  res.status(200).send("OK");
});

const port = process.env.PORT || {{serverPort}};
app.listen(port, () => {
  console.log(`Server is running on port ${port}`);
});
"#;

const FASTIFY_ENTRY: &str = r#"import "dotenv/config";
import Fastify from "fastify";
import fastifyCors from "@fastify/cors";

const fastify = Fastify({ logger: true });

fastify.register(fastifyCors, {
  origin: process.env.CORS_ORIGIN || "{{webUrl}}",
  methods: ["GET", "POST", "OPTIONS"],
});

fastify.get("/", async () => {
  return "OK";
});

fastify.listen({ port: {{serverPort}} }, (err) => {
  if (err) {
    fastify.log.error(err);
    process.exit(1);
  }
  console.log("Server running on port {{serverPort}}");
});
"#;

const ELYSIA_ENTRY: &str = r#"import "dotenv/config";
import { Elysia } from "elysia";
import { cors } from "@elysiajs/cors";

const app = new Elysia()
  .use(
    cors({
      origin: process.env.CORS_ORIGIN || "{{webUrl}}",
      methods: ["GET", "POST", "OPTIONS"],
    }),
  )
  .get("/", () => "OK")
  .listen({{serverPort}}, () => {
    console.log("Server is running on http://localhost:{{serverPort}}");
  });

export type App = typeof app;
"#;

/// Writes `apps/server/src/index.ts` for standalone server backends, unless an
/// entry point was already materialized from templates.
pub struct EntryPointPlugin {
    templates: Rc<TemplateTree>,
}

impl EntryPointPlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }

    fn entry_template(backend: Backend) -> Option<&'static str> {
        match backend {
            Backend::Hono => Some(HONO_ENTRY),
            Backend::Express => Some(EXPRESS_ENTRY),
            Backend::Fastify => Some(FASTIFY_ENTRY),
            Backend::Elysia => Some(ELYSIA_ENTRY),
            _ => None,
        }
    }
}

impl GeneratorPlugin for EntryPointPlugin {
    fn name(&self) -> &str {
        "entry-point"
    }

    // after files and package.json, before README
    fn priority(&self) -> i32 {
        60
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn can_handle(&self, ctx: &PluginContext) -> bool {
        ctx.config().backend.is_server()
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let src_dir = ctx.project_dir().join(SERVER_APP).join("src");
        if let Some(existing) =
            ENTRY_CANDIDATES.iter().map(|name| src_dir.join(name)).find(|p| p.exists())
        {
            debug!("Entry point {} already exists", existing.display());
            return Ok(());
        }

        let Some(template) = Self::entry_template(ctx.config().backend) else {
            return Ok(());
        };
        let mut data = ctx.template_data();
        if ctx.config().runtime == Runtime::None {
            if let Some(map) = data.as_object_mut() {
                map.insert("runtime".to_string(), "node".into());
            }
        }

        let target = src_dir.join("index.ts");
        self.templates.processor().render_to("index.ts", template, &target, &data)?;
        ctx.record_file(target);
        Ok(())
    }
}
