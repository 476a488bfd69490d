use std::fs;
use std::path::PathBuf;

use stackgen::config::{
    load_config, parse_config, validate_project_name, Addon, Auth, Backend, Database,
    DirectoryConflict, Frontend, Orm, PackageManager, ProjectConfig, Runtime,
};
use stackgen::error::Error;
use tempfile::TempDir;

fn full_stack() -> ProjectConfig {
    let mut config = ProjectConfig::new("my-app", "/tmp/my-app");
    config.frontend = vec![Frontend::React];
    config.backend = Backend::Hono;
    config.runtime = Runtime::Bun;
    config.database = Database::Sqlite;
    config.orm = Orm::Drizzle;
    config
}

fn assert_invalid(config: &ProjectConfig) {
    match config.validate() {
        Err(Error::ValidationError(_)) => {}
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_parse_json_config() {
    let content = r#"{
        "projectName": "my-app",
        "projectDir": "/tmp/my-app",
        "frontend": ["tanstack-router", "native-nativewind"],
        "backend": "hono",
        "runtime": "bun",
        "database": "sqlite",
        "orm": "drizzle",
        "addons": ["turborepo", "biome"],
        "auth": "better-auth",
        "packageManager": "pnpm",
        "git": true,
        "install": false,
        "directoryConflict": "merge"
    }"#;
    let config = parse_config(content).unwrap();

    assert_eq!(config.project_name, "my-app");
    assert_eq!(config.frontend, vec![Frontend::TanstackRouter, Frontend::NativeNativewind]);
    assert_eq!(config.web_frontend(), Some(Frontend::TanstackRouter));
    assert_eq!(config.native_frontend(), Some(Frontend::NativeNativewind));
    assert_eq!(config.addons, vec![Addon::Turborepo, Addon::Biome]);
    assert_eq!(config.auth, Auth::BetterAuth);
    assert_eq!(config.package_manager, PackageManager::Pnpm);
    assert_eq!(config.directory_conflict, DirectoryConflict::Merge);
    assert!(config.git);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_yaml_config_with_defaults() {
    let content = "projectName: demo\nprojectDir: ./demo\nbackend: express\nruntime: node\n";
    let config = parse_config(content).unwrap();

    assert_eq!(config.backend, Backend::Express);
    assert_eq!(config.database, Database::None);
    assert_eq!(config.orm, Orm::None);
    assert!(config.frontend.is_empty());
    assert_eq!(config.package_manager, PackageManager::Npm);
    assert_eq!(config.directory_conflict, DirectoryConflict::Error);
    assert!(!config.git);
}

#[test]
fn test_parse_unknown_choice() {
    let err = parse_config(r#"{"projectName": "a", "projectDir": "a", "backend": "koa"}"#)
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_load_config_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("stackgen.yml"),
        "projectName: demo\nprojectDir: out/demo\n",
    )
    .unwrap();

    let config = load_config(dir.path(), dir.path()).unwrap();
    assert_eq!(config.project_dir, dir.path().join("out/demo"));
    assert_eq!(config.relative_path, "out/demo");
}

#[test]
fn test_load_config_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_config(dir.path(), dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_project_names() {
    assert!(validate_project_name("my-app").is_ok());
    assert!(validate_project_name("@acme/web.app").is_ok());
    assert!(validate_project_name("").is_err());
    assert!(validate_project_name("My App").is_err());
    assert!(validate_project_name(&"a".repeat(215)).is_err());
}

#[test]
fn test_valid_combinations() {
    assert!(full_stack().validate().is_ok());

    let mut config = ProjectConfig::new("convex-app", PathBuf::from("/tmp/c"));
    config.frontend = vec![Frontend::Next];
    config.backend = Backend::Convex;
    config.auth = Auth::Clerk;
    assert!(config.validate().is_ok());

    let mut config = ProjectConfig::new("frontend-only", "/tmp/f");
    config.frontend = vec![Frontend::Svelte];
    assert!(config.validate().is_ok());
}

#[test]
fn test_frontend_rules() {
    let mut config = full_stack();
    config.frontend = vec![Frontend::None, Frontend::React];
    assert_invalid(&config);

    config.frontend = vec![Frontend::React, Frontend::Solid];
    assert_invalid(&config);

    config.frontend = vec![Frontend::NativeNativewind, Frontend::NativeUnistyles];
    assert_invalid(&config);
}

#[test]
fn test_data_layer_rules() {
    let mut config = full_stack();
    config.orm = Orm::None;
    assert_invalid(&config);

    let mut config = full_stack();
    config.database = Database::Mongodb;
    assert_invalid(&config);

    let mut config = full_stack();
    config.orm = Orm::Mongoose;
    assert_invalid(&config);

    let mut config = full_stack();
    config.backend = Backend::None;
    config.runtime = Runtime::None;
    assert_invalid(&config);
}

#[test]
fn test_backend_rules() {
    let mut config = full_stack();
    config.backend = Backend::Convex;
    assert_invalid(&config);

    let mut config = full_stack();
    config.backend = Backend::Elysia;
    config.runtime = Runtime::Node;
    assert_invalid(&config);

    let mut config = full_stack();
    config.backend = Backend::Express;
    config.runtime = Runtime::Workers;
    assert_invalid(&config);

    let mut config = ProjectConfig::new("web", "/tmp/web");
    config.runtime = Runtime::Bun;
    assert_invalid(&config);
}

#[test]
fn test_elysia_requires_bun() {
    let mut config = full_stack();
    config.backend = Backend::Elysia;
    assert!(config.validate().is_ok());

    config.runtime = Runtime::None;
    match config.validate() {
        Err(Error::ValidationError(message)) => assert!(message.contains("bun")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_auth_rules() {
    let mut config = full_stack();
    config.auth = Auth::Clerk;
    assert_invalid(&config);

    let mut config = full_stack();
    config.auth = Auth::BetterAuth;
    assert!(config.validate().is_ok());
    config.database = Database::None;
    config.orm = Orm::None;
    assert_invalid(&config);
}

#[test]
fn test_addon_rules() {
    let mut config = full_stack();
    config.addons = vec![Addon::Biome, Addon::Biome];
    assert_invalid(&config);

    config.addons = vec![Addon::Pwa];
    assert!(config.validate().is_ok());

    config.frontend = vec![Frontend::Svelte];
    assert_invalid(&config);

    config.frontend = vec![];
    config.addons = vec![Addon::Tauri];
    assert_invalid(&config);
}

#[test]
fn test_serialized_names() {
    let value = serde_json::to_value(full_stack()).unwrap();
    assert_eq!(value["projectName"], "my-app");
    assert_eq!(value["frontend"][0], "react");
    assert_eq!(value["directoryConflict"], "error");
    assert_eq!(Frontend::NativeUnistyles.to_string(), "native-unistyles");
    assert_eq!(Auth::BetterAuth.as_str(), "better-auth");
}
