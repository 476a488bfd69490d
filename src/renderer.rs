//! Template rendering for stackgen.
//! Templates use Handlebars syntax with a small fixed helper set:
//! `eq`, `ne`, `and`, `or`, `includes`, `concat` and `default`.
use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson, Template,
};
use serde_json::Value;

use crate::error::{Error, Result};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Handlebars-based template rendering engine.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Creates a renderer with escaping disabled and the helper set registered.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);

        registry.register_helper("eq", Box::new(ValueHelper(eq)));
        registry.register_helper("ne", Box::new(ValueHelper(ne)));
        registry.register_helper("and", Box::new(ValueHelper(and)));
        registry.register_helper("or", Box::new(ValueHelper(or)));
        registry.register_helper("includes", Box::new(ValueHelper(includes)));
        registry.register_helper("concat", Box::new(ValueHelper(concat)));
        registry.register_helper("default", Box::new(ValueHelper(default_value)));

        Self { registry }
    }

    /// Renders `template`, naming it `name` in error messages.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template cannot be parsed or a helper fails
    pub fn render_named(&self, name: &str, template: &str, context: &Value) -> Result<String> {
        Template::compile(template).map_err(|e| Error::TemplateSyntaxError {
            template: name.to_string(),
            message: e.to_string(),
        })?;

        self.registry.render_template(template, context).map_err(|e| {
            Error::TemplateSyntaxError { template: name.to_string(), message: e.to_string() }
        })
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        HandlebarsRenderer::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        self.render_named("<inline>", template, context)
    }
}

/// Returns the Handlebars notion of truthiness: empty strings, empty arrays,
/// `0`, `false` and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn eq(args: &[&Value]) -> Value {
    Value::Bool(args.len() >= 2 && args.windows(2).all(|pair| pair[0] == pair[1]))
}

fn ne(args: &[&Value]) -> Value {
    Value::Bool(!matches!(eq(args), Value::Bool(true)))
}

fn and(args: &[&Value]) -> Value {
    Value::Bool(!args.is_empty() && args.iter().all(|v| is_truthy(v)))
}

fn or(args: &[&Value]) -> Value {
    Value::Bool(args.iter().any(|v| is_truthy(v)))
}

fn includes(args: &[&Value]) -> Value {
    let found = match args {
        [Value::Array(items), needle, ..] => items.contains(*needle),
        [Value::String(haystack), Value::String(needle), ..] => haystack.contains(needle.as_str()),
        _ => false,
    };
    Value::Bool(found)
}

fn concat(args: &[&Value]) -> Value {
    Value::String(args.iter().map(|v| as_text(v)).collect())
}

fn default_value(args: &[&Value]) -> Value {
    match args {
        [value, fallback, ..] if !is_truthy(value) => (*fallback).clone(),
        [value, ..] => (*value).clone(),
        [] => Value::Null,
    }
}

/// Adapts a function over the resolved parameters into a helper usable both
/// inline (`{{concat a b}}`) and as a subexpression (`{{#if (eq a b)}}`).
struct ValueHelper(fn(&[&Value]) -> Value);

impl HelperDef for ValueHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> std::result::Result<ScopedJson<'rc>, RenderError> {
        let params: Vec<&Value> = h.params().iter().map(|p| p.value()).collect();
        Ok(ScopedJson::Derived((self.0)(&params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_value_helper() {
        assert_eq!(default_value(&[&json!(""), &json!("x")]), json!("x"));
        assert_eq!(default_value(&[&json!("a"), &json!("x")]), json!("a"));
        assert_eq!(default_value(&[]), Value::Null);
    }

    #[test]
    fn test_includes_on_strings() {
        assert_eq!(includes(&[&json!("express"), &json!("press")]), json!(true));
        assert_eq!(includes(&[&json!(42), &json!(4)]), json!(false));
    }
}
