//! Core library for the mobwiz module scaffolder.
//!
//! Turns a module request (name, platform, architecture, package) into a set of
//! rendered source files:
//!
//! - [`manifest`] — finds and parses `templates/templates.yaml`
//! - [`resolver`] — maps a platform/architecture request to an ordered template list
//! - [`assets`] — locates template bodies on disk, falling back to the bundle
//! - [`templates`] — the embedded bundle and the Handlebars renderer
//! - [`generator`] — runs the whole pipeline and writes files
//!
//! Platform and architecture labels typed by users are normalized in
//! [`platform`]; the rest of the crate works with canonical values.

pub mod assets;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod platform;
pub mod resolver;
pub mod templates;

pub use error::{MobwizError, Result};
pub use generator::{GeneratedFile, GenerationReport, GenerationRequest, ModuleGenerator};
pub use platform::{ArchitectureKey, Platform};
