use std::rc::Rc;

use super::TemplateTree;
use crate::error::Result;
use crate::plugin::{GeneratorPlugin, PluginContext, Stage};

const README_TEMPLATE: &str = r#"# {{projectName}}

This project was created with stackgen, a modern TypeScript stack.

## Features

- **TypeScript** - For type safety and improved developer experience
{{#if webFrontend}}
- **{{webFrontend}}** - Web application in `{{webApp}}`
{{/if}}
{{#if nativeFrontend}}
- **{{nativeFrontend}}** - Mobile application in `{{nativeApp}}`
{{/if}}
{{#if (ne backend "none")}}
- **{{backend}}** - Backend{{#if hasServer}} in `{{serverApp}}`{{/if}}
{{/if}}
{{#if (ne runtime "none")}}
- **{{runtime}}** - Runtime environment
{{/if}}
{{#if (and (ne orm "none") (ne database "none"))}}
- **{{orm}}** - Database access for {{database}}
{{/if}}
{{#if (ne auth "none")}}
- **{{auth}}** - Authentication
{{/if}}
{{#each addons}}
- **{{this}}** addon
{{/each}}

## Getting Started

First, install the dependencies:

```bash
{{packageManager}} install
```

Then, run the development server:

```bash
{{runCmd}} dev
```

{{#if hasWeb}}
Open [{{webUrl}}]({{webUrl}}) in your browser to see the web application.
{{/if}}
{{#if hasServer}}
The API is running at [{{serverUrl}}]({{serverUrl}}).
{{/if}}
{{#if (eq orm "drizzle")}}

## Database

Push the schema to your database:

```bash
{{runCmd}} db:push
```
{{/if}}
{{#if (eq orm "prisma")}}

## Database

Generate the Prisma client and push the schema:

```bash
{{runCmd}} db:generate
{{runCmd}} db:push
```
{{/if}}

## Project Structure

```
{{projectName}}/
├── apps/
{{#if hasWeb}}
│   ├── web/         # Frontend application
{{/if}}
{{#if hasNative}}
│   ├── native/      # Mobile application
{{/if}}
{{#if hasServer}}
│   └── server/      # Backend API
{{/if}}
{{#if isConvex}}
└── packages/
    └── backend/     # Convex functions
{{/if}}
```

## Available Scripts

- `{{runCmd}} dev`: Start all applications in development mode
- `{{runCmd}} build`: Build all applications
{{#if (includes addons "biome")}}
- `{{runCmd}} check`: Run Biome formatting and linting
{{/if}}
{{#if (or (includes addons "vitest") (includes addons "testing"))}}
- `{{runCmd}} test`: Run unit tests
{{/if}}
"#;

/// Writes the project `README.md` describing the selected stack.
pub struct ReadmePlugin {
    templates: Rc<TemplateTree>,
}

impl ReadmePlugin {
    pub fn new(templates: Rc<TemplateTree>) -> Self {
        Self { templates }
    }
}

impl GeneratorPlugin for ReadmePlugin {
    fn name(&self) -> &str {
        "readme"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn stages(&self) -> &[Stage] {
        &[Stage::Generate]
    }

    fn execute(&self, _stage: Stage, ctx: &mut PluginContext) -> Result<()> {
        let target = ctx.project_dir().join("README.md");
        let data = ctx.template_data();
        self.templates.processor().render_to("README.md", README_TEMPLATE, &target, &data)?;
        ctx.record_file(target);
        Ok(())
    }
}
