//! Project configuration for stackgen.
//! A [`ProjectConfig`] is the immutable snapshot of every choice made for a
//! generated project. It is loaded from JSON or YAML and validated before any
//! file is written.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The identifier used in configuration files and template paths.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Database engine backing the server.
    pub enum Database {
        None => "none",
        Sqlite => "sqlite",
        Postgres => "postgres",
        Mysql => "mysql",
        Mongodb => "mongodb",
    }
}

choice_enum! {
    /// ORM or ODM used to talk to the database.
    pub enum Orm {
        None => "none",
        Drizzle => "drizzle",
        Prisma => "prisma",
        Mongoose => "mongoose",
    }
}

choice_enum! {
    /// Server framework.
    pub enum Backend {
        None => "none",
        Hono => "hono",
        Express => "express",
        Fastify => "fastify",
        Next => "next",
        Elysia => "elysia",
        Convex => "convex",
    }
}

choice_enum! {
    /// JavaScript runtime the server runs on.
    pub enum Runtime {
        None => "none",
        Bun => "bun",
        Node => "node",
        Workers => "workers",
    }
}

choice_enum! {
    /// Client application framework.
    pub enum Frontend {
        None => "none",
        React => "react",
        TanstackRouter => "tanstack-router",
        ReactRouter => "react-router",
        TanstackStart => "tanstack-start",
        Next => "next",
        Nuxt => "nuxt",
        Svelte => "svelte",
        Solid => "solid",
        NativeNativewind => "native-nativewind",
        NativeUnistyles => "native-unistyles",
    }
}

choice_enum! {
    /// Optional tooling layered on top of the project.
    pub enum Addon {
        Pwa => "pwa",
        Tauri => "tauri",
        Biome => "biome",
        Husky => "husky",
        Turborepo => "turborepo",
        Vitest => "vitest",
        Playwright => "playwright",
        Cypress => "cypress",
        Docker => "docker",
        Testing => "testing",
    }
}

choice_enum! {
    /// Authentication provider.
    pub enum Auth {
        None => "none",
        BetterAuth => "better-auth",
        Clerk => "clerk",
    }
}

choice_enum! {
    /// Package manager used for workspaces and installation.
    pub enum PackageManager {
        Npm => "npm",
        Pnpm => "pnpm",
        Bun => "bun",
    }
}

choice_enum! {
    /// What to do when the target directory already contains files.
    pub enum DirectoryConflict {
        Merge => "merge",
        Overwrite => "overwrite",
        Increment => "increment",
        Error => "error",
    }
}

impl Frontend {
    /// Returns true for React Native based frontends.
    pub fn is_native(&self) -> bool {
        matches!(self, Frontend::NativeNativewind | Frontend::NativeUnistyles)
    }

    /// Returns true for frontends that produce a browser application.
    pub fn is_web(&self) -> bool {
        !self.is_native() && *self != Frontend::None
    }

    /// Returns true for frontends built on React.
    pub fn is_react(&self) -> bool {
        matches!(
            self,
            Frontend::React
                | Frontend::TanstackRouter
                | Frontend::ReactRouter
                | Frontend::TanstackStart
                | Frontend::Next
        )
    }
}

impl Backend {
    /// Returns true for backends that run as a standalone HTTP server in `apps/server`.
    pub fn is_server(&self) -> bool {
        matches!(self, Backend::Hono | Backend::Express | Backend::Fastify | Backend::Elysia)
    }
}

impl Default for DirectoryConflict {
    fn default() -> Self {
        DirectoryConflict::Error
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        PackageManager::Npm
    }
}

fn default_none_database() -> Database {
    Database::None
}

fn default_none_orm() -> Orm {
    Orm::None
}

fn default_none_backend() -> Backend {
    Backend::None
}

fn default_none_runtime() -> Runtime {
    Runtime::None
}

fn default_none_auth() -> Auth {
    Auth::None
}

/// Immutable snapshot of the choices for one generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project_name: String,
    /// Absolute path of the directory to generate into.
    pub project_dir: PathBuf,
    /// Path as the user typed it, used in messages and the README.
    #[serde(default)]
    pub relative_path: String,
    #[serde(default = "default_none_database")]
    pub database: Database,
    #[serde(default = "default_none_orm")]
    pub orm: Orm,
    #[serde(default = "default_none_backend")]
    pub backend: Backend,
    #[serde(default = "default_none_runtime")]
    pub runtime: Runtime,
    #[serde(default)]
    pub frontend: Vec<Frontend>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default = "default_none_auth")]
    pub auth: Auth,
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default)]
    pub git: bool,
    #[serde(default)]
    pub install: bool,
    #[serde(default)]
    pub directory_conflict: DirectoryConflict,
}

impl ProjectConfig {
    /// Creates a configuration with every choice set to `none`.
    pub fn new<S: Into<String>, P: Into<PathBuf>>(project_name: S, project_dir: P) -> Self {
        let project_name = project_name.into();
        Self {
            relative_path: project_name.clone(),
            project_name,
            project_dir: project_dir.into(),
            database: Database::None,
            orm: Orm::None,
            backend: Backend::None,
            runtime: Runtime::None,
            frontend: Vec::new(),
            addons: Vec::new(),
            auth: Auth::None,
            package_manager: PackageManager::Npm,
            git: false,
            install: false,
            directory_conflict: DirectoryConflict::Error,
        }
    }

    /// The selected browser frontend, if any.
    pub fn web_frontend(&self) -> Option<Frontend> {
        self.frontend.iter().copied().find(Frontend::is_web)
    }

    /// The selected native frontend, if any.
    pub fn native_frontend(&self) -> Option<Frontend> {
        self.frontend.iter().copied().find(Frontend::is_native)
    }

    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    /// Name used in messages: the path the user typed, or the project name.
    pub fn display_path(&self) -> &str {
        if self.relative_path.is_empty() {
            &self.project_name
        } else {
            &self.relative_path
        }
    }

    /// Checks that the configuration is well formed and internally consistent.
    ///
    /// # Errors
    /// * `Error::ValidationError` describing the first problem found
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name)?;

        if self.frontend.contains(&Frontend::None) && self.frontend.len() > 1 {
            return invalid("frontend 'none' cannot be combined with other frontends");
        }
        if self.frontend.iter().filter(|f| f.is_web()).count() > 1 {
            return invalid("only one web frontend can be selected");
        }
        if self.frontend.iter().filter(|f| f.is_native()).count() > 1 {
            return invalid("only one native frontend can be selected");
        }
        for (i, addon) in self.addons.iter().enumerate() {
            if self.addons[..i].contains(addon) {
                return invalid(format!("addon '{addon}' is listed more than once"));
            }
        }

        self.validate_data_layer()?;
        self.validate_backend()?;
        self.validate_auth()?;
        self.validate_addons()
    }

    fn validate_data_layer(&self) -> Result<()> {
        match (self.database, self.orm) {
            (Database::None, Orm::None) => Ok(()),
            (Database::None, orm) => {
                invalid(format!("ORM '{orm}' requires a database to be selected"))
            }
            (database, Orm::None) => {
                invalid(format!("database '{database}' requires an ORM to be selected"))
            }
            (Database::Mongodb, Orm::Drizzle) => {
                invalid("drizzle does not support mongodb, use prisma or mongoose")
            }
            (database, Orm::Mongoose) if database != Database::Mongodb => {
                invalid("mongoose requires the mongodb database")
            }
            _ if self.backend == Backend::None => {
                invalid("a database requires a backend to be selected")
            }
            _ => Ok(()),
        }
    }

    fn validate_backend(&self) -> Result<()> {
        match self.backend {
            Backend::Convex => {
                if self.database != Database::None || self.runtime != Runtime::None {
                    return invalid("convex backend manages its own database and runtime");
                }
            }
            Backend::None | Backend::Next => {
                if self.runtime != Runtime::None {
                    return invalid(format!(
                        "runtime '{}' requires a standalone server backend",
                        self.runtime
                    ));
                }
            }
            Backend::Elysia if self.runtime != Runtime::Bun => {
                return invalid("elysia requires the bun runtime");
            }
            _ => {}
        }

        if self.runtime == Runtime::Workers && self.backend != Backend::Hono {
            return invalid("the workers runtime only supports the hono backend");
        }
        Ok(())
    }

    fn validate_auth(&self) -> Result<()> {
        match self.auth {
            Auth::None => Ok(()),
            Auth::BetterAuth if self.backend == Backend::None => {
                invalid("better-auth requires a backend")
            }
            Auth::BetterAuth if self.backend == Backend::Convex => {
                invalid("better-auth is not supported with the convex backend, use clerk")
            }
            Auth::BetterAuth if self.database == Database::None => {
                invalid("better-auth requires a database")
            }
            Auth::Clerk if self.backend != Backend::Convex => {
                invalid("clerk is only supported with the convex backend")
            }
            _ => Ok(()),
        }
    }

    fn validate_addons(&self) -> Result<()> {
        for addon in &self.addons {
            if matches!(addon, Addon::Pwa | Addon::Tauri) && self.web_frontend().is_none() {
                return invalid(format!("addon '{addon}' requires a web frontend"));
            }
        }
        if self.has_addon(Addon::Pwa)
            && !self.web_frontend().is_some_and(|f| f.is_react() || f == Frontend::Solid)
        {
            return invalid("the pwa addon requires a React or Solid frontend");
        }
        Ok(())
    }
}

fn invalid<T>(message: impl Into<String>) -> Result<T> {
    Err(Error::ValidationError(message.into()))
}

fn project_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$")
            .expect("project name pattern is valid")
    })
}

/// Checks a project name against npm package naming rules.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return invalid("project name cannot be empty");
    }
    if name.len() > 214 {
        return invalid("project name must be at most 214 characters");
    }
    if !project_name_pattern().is_match(name) {
        return invalid(format!(
            "project name '{name}' may only contain lowercase letters, digits, '-', '.', '_', '~'"
        ));
    }
    Ok(())
}

/// Parses a configuration from JSON, falling back to YAML.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            Error::ConfigError(format!(
                "invalid configuration format (json: {json_err}; yaml: {yaml_err})"
            ))
        }),
    }
}

/// Loads a configuration file.
///
/// A directory is searched for `stackgen.json`, `stackgen.yml` or `stackgen.yaml`.
/// A relative `projectDir` is resolved against `base_dir`.
pub fn load_config<P: AsRef<Path>>(path: P, base_dir: &Path) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let config_path = if path.is_dir() {
        CONFIG_FILES
            .iter()
            .map(|file| path.join(file))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "no configuration file found in '{}' (tried: {})",
                    path.display(),
                    CONFIG_FILES.join(", ")
                ))
            })?
    } else {
        path.to_path_buf()
    };

    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path)?;
    let mut config = parse_config(&content)?;

    if config.relative_path.is_empty() {
        config.relative_path = config.project_dir.display().to_string();
    }
    if config.project_dir.is_relative() {
        config.project_dir = base_dir.join(&config.project_dir);
    }
    Ok(config)
}
