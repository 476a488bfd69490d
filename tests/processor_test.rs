use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use stackgen::error::Error;
use stackgen::processor::{
    is_binary, is_template, plan_file_operation, resolve_output_filename, FileOperation,
    TemplateProcessor,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_resolve_output_filename() {
    assert_eq!(resolve_output_filename("middleware.tsx.hbs"), "middleware.tsx");
    assert_eq!(resolve_output_filename("_gitignore"), ".gitignore");
    assert_eq!(resolve_output_filename("_npmrc.hbs"), ".npmrc");
    assert_eq!(resolve_output_filename("_env.example.hbs"), ".env.example");
    assert_eq!(resolve_output_filename("_layout.tsx"), "_layout.tsx");
    assert_eq!(resolve_output_filename("index.ts"), "index.ts");
    assert_eq!(resolve_output_filename(".hbs"), ".hbs");
}

#[test]
fn test_is_template() {
    assert!(is_template("index.ts.hbs"));
    assert!(is_template("src/_env.hbs"));
    assert!(!is_template(".hbs"));
    assert!(!is_template("index.ts"));
    assert!(!is_template("file.hbstxt"));
}

#[test]
fn test_binary_wins_over_template() {
    assert!(is_binary("logo.png"));
    assert!(is_binary("icons/LOGO.PNG.hbs"));
    assert!(!is_binary("index.ts.hbs"));

    let op = plan_file_operation(Path::new("public/logo.png.hbs"), Path::new("out"));
    assert_eq!(op, FileOperation::CopyBinary { target: PathBuf::from("out/public/logo.png") });

    let op = plan_file_operation(Path::new("src/index.ts.hbs"), Path::new("out"));
    assert_eq!(op, FileOperation::Render { target: PathBuf::from("out/src/index.ts") });

    let op = plan_file_operation(Path::new("_gitignore"), Path::new("out"));
    assert_eq!(op, FileOperation::Copy { target: PathBuf::from("out/.gitignore") });
}

#[test]
fn test_materialize_tree() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "src/index.ts.hbs", b"export const name = \"{{projectName}}\";\n");
    write(source.path(), "tsconfig.json", b"{ \"strict\": {{not rendered}} }");
    write(source.path(), "_gitignore", b"node_modules\n");
    write(source.path(), "public/favicon.ico", &[0, 159, 146, 150]);
    write(source.path(), ".DS_Store", b"junk");

    let processor = TemplateProcessor::new();
    let written = processor
        .materialize(source.path(), dest.path(), &json!({"projectName": "demo"}), None)
        .unwrap();

    let out = dest.path();
    assert_eq!(
        fs::read_to_string(out.join("src/index.ts")).unwrap(),
        "export const name = \"demo\";\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("tsconfig.json")).unwrap(),
        "{ \"strict\": {{not rendered}} }"
    );
    assert_eq!(fs::read_to_string(out.join(".gitignore")).unwrap(), "node_modules\n");
    assert_eq!(fs::read(out.join("public/favicon.ico")).unwrap(), vec![0, 159, 146, 150]);
    assert!(!out.join(".DS_Store").exists());
    assert!(!out.join("src/index.ts.hbs").exists());

    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|p| p.starts_with(out)));
}

#[test]
fn test_materialize_glob_filter() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "a.ts", b"a");
    write(source.path(), "b.md", b"b");

    let processor = TemplateProcessor::new();
    let written =
        processor.materialize(source.path(), dest.path(), &json!({}), Some("**/*.ts")).unwrap();

    assert_eq!(written, vec![dest.path().join("a.ts")]);
    assert!(!dest.path().join("b.md").exists());
}

#[test]
fn test_materialize_overwrites_colliding_files_only() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "README.md", b"new");
    write(dest.path(), "README.md", b"old");
    write(dest.path(), "notes.txt", b"mine");

    TemplateProcessor::new().materialize(source.path(), dest.path(), &json!({}), None).unwrap();

    assert_eq!(fs::read_to_string(dest.path().join("README.md")).unwrap(), "new");
    assert_eq!(fs::read_to_string(dest.path().join("notes.txt")).unwrap(), "mine");
}

#[test]
fn test_materialize_bare_suffix_file() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "sub/.hbs", b"{{kept}}");

    let op = plan_file_operation(Path::new("sub/.hbs"), Path::new("out"));
    assert_eq!(op, FileOperation::Copy { target: PathBuf::from("out/sub/.hbs") });

    let written = TemplateProcessor::new()
        .materialize(source.path(), dest.path(), &json!({"kept": "x"}), None)
        .unwrap();

    assert_eq!(written, vec![dest.path().join("sub/.hbs")]);
    assert_eq!(fs::read_to_string(dest.path().join("sub/.hbs")).unwrap(), "{{kept}}");
}

#[test]
fn test_materialize_syntax_error() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "broken.ts.hbs", b"{{#each items}}");

    let err = TemplateProcessor::new()
        .materialize(source.path(), dest.path(), &json!({}), None)
        .unwrap_err();
    assert!(matches!(err, Error::TemplateSyntaxError { .. }));
}

#[test]
fn test_materialize_missing_source() {
    let dest = TempDir::new().unwrap();
    let err = TemplateProcessor::new()
        .materialize(&dest.path().join("missing"), dest.path(), &json!({}), None)
        .unwrap_err();
    assert!(matches!(err, Error::MaterializationError { .. }));
}
