//! Handlebars-based renderer for output paths and file contents.
//!
//! Wraps [`handlebars::Handlebars`] with **strict mode** enabled, HTML escaping
//! disabled, and the naming helpers every template relies on:
//!
//! | helper            | input               | output             |
//! |-------------------|---------------------|--------------------|
//! | `snakeCase`       | `PaymentHistory`    | `payment_history`  |
//! | `pascalCase`      | `payment history`   | `PaymentHistory`   |
//! | `camelCase`       | `payment history`   | `paymentHistory`   |
//! | `kebabCase`       | `PaymentHistory`    | `payment-history`  |
//! | `shoutySnakeCase` | `PaymentHistory`    | `PAYMENT_HISTORY`  |
//! | `titleCase`       | `payment_history`   | `Payment History`  |
//! | `packagePath`     | `com.example.app`   | `com/example/app`  |
//! | `upper`, `lower`, `trim`, `replace s from to` | | |
//!
//! Handlebars' built-ins (`if`, `unless`, `each`, `with`, `eq`, `len`, ...) are
//! available as well.
//!
//! Field references may be written `Name` or Go-template style `.Name`; the
//! latter is rewritten before parsing so existing manifests keep working.
//!
//! ## Usage
//!
//! ```ignore
//! let renderer = TemplateRenderer::new();
//! let ctx = RenderContext::new("user profile", None);
//! let path = renderer.render("domain/{{pascalCase .Name}}Repository.kt", &ctx)?;
//! assert_eq!(path, "domain/UserProfileRepository.kt");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use handlebars::{handlebars_helper, no_escape, Handlebars, Template};
use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase,
};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::{MobwizError, Result};

/// Package identifier used when none is supplied.
pub const DEFAULT_PACKAGE_NAME: &str = "com.example";

static MUSTACHE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("mustache pattern is valid"));
// String literals are matched first so their contents are never rewritten.
static DOT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""[^"]*"|'[^']*'|(^|[\s({~=])\.([A-Za-z_])"#)
        .expect("field reference pattern is valid")
});

/// Data exposed to every template of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Module display name, e.g. `user profile`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Dot-separated package identifier, e.g. `com.example.app`.
    #[serde(rename = "PackageName")]
    pub package_name: String,
}

impl RenderContext {
    /// Build a context; a missing or blank package falls back to [`DEFAULT_PACKAGE_NAME`].
    pub fn new(name: impl Into<String>, package_name: Option<&str>) -> Self {
        let package_name = package_name
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PACKAGE_NAME);
        Self {
            name: name.into(),
            package_name: package_name.to_string(),
        }
    }
}

/// Convert `com.example.app` into `com/example/app`.
///
/// Always forward slashes: rendered paths are joined component-wise later, and
/// `/` is accepted as a separator on every supported OS.
pub fn package_path(package_name: &str) -> String {
    package_name
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

handlebars_helper!(snake_case: |s: str| s.to_snake_case());
handlebars_helper!(pascal_case: |s: str| s.to_pascal_case());
handlebars_helper!(camel_case: |s: str| s.to_lower_camel_case());
handlebars_helper!(kebab_case: |s: str| s.to_kebab_case());
handlebars_helper!(shouty_snake_case: |s: str| s.to_shouty_snake_case());
handlebars_helper!(title_case: |s: str| s.to_title_case());
handlebars_helper!(package_path_helper: |s: str| package_path(s));
handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(trim: |s: str| s.trim().to_string());
handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));

/// Template renderer shared by path and content rendering.
///
/// Strict mode makes `{{Missing}}` an error instead of an empty string, so a
/// typo in a template never produces a file named `Repository.kt`.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(no_escape);

        hbs.register_helper("snakeCase", Box::new(snake_case));
        hbs.register_helper("pascalCase", Box::new(pascal_case));
        hbs.register_helper("camelCase", Box::new(camel_case));
        hbs.register_helper("kebabCase", Box::new(kebab_case));
        hbs.register_helper("shoutySnakeCase", Box::new(shouty_snake_case));
        hbs.register_helper("titleCase", Box::new(title_case));
        hbs.register_helper("packagePath", Box::new(package_path_helper));
        hbs.register_helper("upper", Box::new(upper));
        hbs.register_helper("lower", Box::new(lower));
        hbs.register_helper("trim", Box::new(trim));
        hbs.register_helper("replace", Box::new(replace));

        Self { hbs }
    }

    /// Render an anonymous template string.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.render_named("<inline>", template, data)
    }

    /// Render `template`, using `label` to identify it in errors.
    pub fn render_named<T: Serialize>(&self, label: &str, template: &str, data: &T) -> Result<String> {
        let source = normalize_field_refs(template);

        Template::compile(&source).map_err(|e| MobwizError::RenderSyntax {
            template: label.to_string(),
            message: e.to_string(),
        })?;

        self.hbs
            .render_template(&source, data)
            .map_err(|e| MobwizError::RenderExecution {
                template: label.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `{{pascalCase .Name}}` to `{{pascalCase Name}}`.
fn normalize_field_refs(template: &str) -> Cow<'_, str> {
    MUSTACHE.replace_all(template, |caps: &Captures<'_>| {
        let inner = DOT_FIELD.replace_all(&caps[1], |field: &Captures<'_>| match field.get(2) {
            Some(first) => format!("{}{}", &field[1], first.as_str()),
            None => field[0].to_string(),
        });
        format!("{{{{{inner}}}}}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str) -> RenderContext {
        RenderContext::new(name, Some("com.example.app"))
    }

    fn render(template: &str, name: &str) -> String {
        TemplateRenderer::new().render(template, &ctx(name)).unwrap()
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(render("{{pascalCase Name}}", "payment history"), "PaymentHistory");
        assert_eq!(render("{{snakeCase Name}}", "PaymentHistory"), "payment_history");
        assert_eq!(render("{{camelCase Name}}", "payment history"), "paymentHistory");
        assert_eq!(render("{{kebabCase Name}}", "PaymentHistory"), "payment-history");
        assert_eq!(render("{{shoutySnakeCase Name}}", "payment history"), "PAYMENT_HISTORY");
        assert_eq!(render("{{titleCase Name}}", "payment_history"), "Payment History");
    }

    #[test]
    fn test_package_path() {
        assert_eq!(package_path("com.example.app"), "com/example/app");
        assert_eq!(package_path("com..example."), "com/example");
        assert_eq!(package_path(""), "");
        assert_eq!(render("{{packagePath PackageName}}", "x"), "com/example/app");
    }

    #[test]
    fn test_go_style_field_references() {
        assert_eq!(
            render("domain/{{pascalCase .Name}}Repository.kt", "user profile"),
            "domain/UserProfileRepository.kt"
        );
        assert_eq!(
            render("{{packagePath .PackageName}}/{{.Name}}", "feed"),
            "com/example/app/feed"
        );
    }

    #[test]
    fn test_dot_rewrite_leaves_text_outside_mustaches() {
        assert_eq!(normalize_field_refs("a .Name {{ .Name }}"), "a .Name {{ Name }}");
        assert_eq!(normalize_field_refs("{{../Name}}"), "{{../Name}}");
        assert_eq!(normalize_field_refs("{{this.Name}}"), "{{this.Name}}");
    }

    #[test]
    fn test_dot_rewrite_skips_string_literals() {
        assert_eq!(render(r#"{{replace Name "x" " .Name"}}"#, "x"), " .Name");
        assert_eq!(render(r#"{{replace .Name "x" "(.Name"}}"#, "x"), "(.Name");
        assert_eq!(
            normalize_field_refs(r#"{{replace .Name " .a" "b"}}"#),
            r#"{{replace Name " .a" "b"}}"#
        );
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(render("{{upper Name}}", "feed"), "FEED");
        assert_eq!(render("{{lower Name}}", "FEED"), "feed");
        assert_eq!(render("{{trim Name}}", "  feed "), "feed");
        assert_eq!(render(r#"{{replace Name " " "_"}}"#, "a b c"), "a_b_c");
    }

    #[test]
    fn test_no_html_escaping() {
        assert_eq!(render("{{Name}}", "List<Item> & more"), "List<Item> & more");
    }

    #[test]
    fn test_missing_field_is_execution_error() {
        let err = TemplateRenderer::new()
            .render_named("repo.kt.tmpl", "{{Missing}}", &ctx("x"))
            .unwrap_err();
        match err {
            MobwizError::RenderExecution { template, .. } => assert_eq!(template, "repo.kt.tmpl"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_helper_is_execution_error() {
        let err = TemplateRenderer::new()
            .render("{{noSuchHelper Name}}", &ctx("x"))
            .unwrap_err();
        assert!(matches!(err, MobwizError::RenderExecution { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = TemplateRenderer::new()
            .render("{{#if Name}}unclosed", &ctx("x"))
            .unwrap_err();
        assert!(matches!(err, MobwizError::RenderSyntax { .. }));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = TemplateRenderer::new();
        let template = "class {{pascalCase .Name}}Repository // {{snakeCase Name}}";
        let first = renderer.render(template, &ctx("user profile")).unwrap();
        for _ in 0..5 {
            assert_eq!(renderer.render(template, &ctx("user profile")).unwrap(), first);
        }
        assert_eq!(first, "class UserProfileRepository // user_profile");
    }

    #[test]
    fn test_context_package_default() {
        assert_eq!(RenderContext::new("x", None).package_name, DEFAULT_PACKAGE_NAME);
        assert_eq!(RenderContext::new("x", Some("  ")).package_name, DEFAULT_PACKAGE_NAME);
        assert_eq!(RenderContext::new("x", Some("io.app")).package_name, "io.app");
    }

    #[test]
    fn test_body_text_with_braces() {
        let body = "class {{pascalCase Name}} {\n    fun load() { }\n}\n";
        assert_eq!(render(body, "feed"), "class Feed {\n    fun load() { }\n}\n");
    }
}
