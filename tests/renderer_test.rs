use serde_json::json;
use stackgen::error::Error;
use stackgen::renderer::{is_truthy, HandlebarsRenderer, TemplateRenderer};

#[test]
fn test_simple_rendering() {
    let engine = HandlebarsRenderer::new();
    let result = engine.render("Hello {{name}}!", &json!({"name": "World"}));
    assert_eq!(result.unwrap(), "Hello World!");
}

#[test]
fn test_missing_variable_renders_empty() {
    let engine = HandlebarsRenderer::new();
    let result = engine.render("port={{serverPort}};", &json!({}));
    assert_eq!(result.unwrap(), "port=;");
}

#[test]
fn test_no_html_escaping() {
    let engine = HandlebarsRenderer::new();
    let result = engine.render("{{cmd}}", &json!({"cmd": "a && b <c>"}));
    assert_eq!(result.unwrap(), "a && b <c>");
}

#[test]
fn test_comparison_helpers() {
    let engine = HandlebarsRenderer::new();
    let ctx = json!({"backend": "hono", "runtime": "bun"});

    let template = r#"{{#if (eq backend "hono")}}hono{{else}}other{{/if}}"#;
    assert_eq!(engine.render(template, &ctx).unwrap(), "hono");

    let template = r#"{{#if (ne runtime "node")}}not-node{{/if}}"#;
    assert_eq!(engine.render(template, &ctx).unwrap(), "not-node");

    let template =
        r#"{{#if (and (eq backend "hono") (eq runtime "workers"))}}yes{{else}}no{{/if}}"#;
    assert_eq!(engine.render(template, &ctx).unwrap(), "no");

    let template = r#"{{#if (or (eq backend "express") (eq runtime "bun"))}}yes{{else}}no{{/if}}"#;
    assert_eq!(engine.render(template, &ctx).unwrap(), "yes");
}

#[test]
fn test_includes_helper() {
    let engine = HandlebarsRenderer::new();
    let ctx = json!({"addons": ["biome", "pwa"], "frontend": []});

    let template = concat!(
        r#"{{#if (includes addons "pwa")}}pwa{{/if}}|"#,
        r#"{{#if (includes addons "tauri")}}tauri{{/if}}"#
    );
    assert_eq!(engine.render(template, &ctx).unwrap(), "pwa|");

    let template = r#"{{#if (includes frontend "react")}}react{{else}}none{{/if}}"#;
    assert_eq!(engine.render(template, &ctx).unwrap(), "none");
}

#[test]
fn test_concat_and_default_helpers() {
    let engine = HandlebarsRenderer::new();
    let ctx = json!({"name": "app", "port": 3000, "empty": ""});

    assert_eq!(engine.render(r#"{{concat name "-" port}}"#, &ctx).unwrap(), "app-3000");
    assert_eq!(engine.render(r#"{{default empty "fallback"}}"#, &ctx).unwrap(), "fallback");
    assert_eq!(engine.render(r#"{{default name "fallback"}}"#, &ctx).unwrap(), "app");
}

#[test]
fn test_each_block() {
    let engine = HandlebarsRenderer::new();
    let ctx = json!({"addons": ["biome", "husky"]});
    let result = engine.render("{{#each addons}}[{{this}}]{{/each}}", &ctx);
    assert_eq!(result.unwrap(), "[biome][husky]");
}

#[test]
fn test_syntax_error() {
    let engine = HandlebarsRenderer::new();
    let err = engine
        .render_named("broken.ts.hbs", "{{#if hasServer}}unclosed", &json!({}))
        .unwrap_err();

    match err {
        Error::TemplateSyntaxError { template, .. } => assert_eq!(template, "broken.ts.hbs"),
        other => panic!("Expected TemplateSyntaxError, got {other:?}"),
    }
}

#[test]
fn test_truthiness() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&json!([])));
    assert!(!is_truthy(&json!(0)));
    assert!(is_truthy(&json!("x")));
    assert!(is_truthy(&json!({})));
}
