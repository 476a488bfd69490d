use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use stackgen::error::Error;
use stackgen::plugin::Stage;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }

    let err: Error = anyhow::anyhow!("custom failure").into();
    assert_eq!(err.to_string(), "custom failure");
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::ValidationError("project name cannot be empty".to_string());
    assert_eq!(err.to_string(), "Validation error: project name cannot be empty.");

    let err = Error::DuplicatePluginError { name: "readme".to_string() };
    assert_eq!(err.to_string(), "Plugin 'readme' is already registered.");
}

#[test]
fn test_plugin_error_keeps_cause() {
    let cause = Error::materialization(
        PathBuf::from("apps/web/index.html"),
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    let err = cause.in_plugin("frontend-scaffold", Stage::Generate);

    assert!(err.to_string().starts_with("Plugin 'frontend-scaffold' failed during generate:"));
    assert!(matches!(err.root_cause(), Error::MaterializationError { .. }));
    assert!(err.source().is_some());

    match err {
        Error::PluginExecutionError { plugin, stage, .. } => {
            assert_eq!(plugin, "frontend-scaffold");
            assert_eq!(stage, Stage::Generate);
        }
        _ => panic!("Expected PluginExecutionError variant"),
    }
}
