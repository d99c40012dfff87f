//! Template bundle and renderer for module scaffolding.
//!
//! The manifest and template bodies are embedded into the binary at
//! compile-time via [`include_str!`] in the [`embedded`] module and exposed as an
//! [`AssetSource`](crate::assets::AssetSource). Bodies and output paths are
//! rendered at runtime with [Handlebars](https://handlebarsjs.com/) via
//! [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{Name}}` — module name as typed by the user (e.g. `user profile`)
//! - `{{PackageName}}` — dot-separated package id (default `com.example`)
//!
//! Names are almost always passed through a case helper, e.g.
//! `{{pascalCase Name}}` or `{{snakeCase Name}}`.
//!
//! **Warning**: files in `templates/` and rows in [`embedded::BUNDLED_TEMPLATES`]
//! must stay in sync.

pub mod embedded;
pub mod renderer;
