//! Unified error types for the mobwiz toolkit.

use std::path::PathBuf;
use thiserror::Error;

use crate::assets::AssetOrigin;

/// All errors that can occur while resolving, rendering and writing a module.
#[derive(Error, Debug)]
pub enum MobwizError {
    // --- Manifest ---

    /// `templates/templates.yaml` was not found in any search root and no bundle was supplied.
    #[error("template manifest not found (searched: {})", display_paths(.searched))]
    ConfigurationNotFound { searched: Vec<PathBuf> },

    /// The manifest was found but is not valid YAML for the manifest schema.
    #[error("template manifest at {origin} is malformed")]
    ConfigurationMalformed {
        origin: AssetOrigin,
        #[source]
        source: serde_yaml::Error,
    },

    // --- Resolution ---

    /// The platform input contains none of `android`, `flutter`, `ios`.
    #[error("unsupported platform: {0} (supported: Flutter, Android, iOS)")]
    UnsupportedPlatform(String),

    /// The platform is known but the manifest has no entry for the requested architecture.
    #[error(
        "architecture '{architecture}' not found for platform '{platform}' (available: {})",
        display_list(.available)
    )]
    ArchitectureNotFound {
        architecture: String,
        platform: String,
        available: Vec<String>,
    },

    /// A manifest entry references a body file that exists in no search root and not in the bundle.
    #[error(
        "template not found: {platform}/{architecture}/{file} (searched: {})",
        display_paths(.searched)
    )]
    TemplateBodyMissing {
        platform: String,
        architecture: String,
        file: String,
        searched: Vec<PathBuf>,
    },

    /// A candidate asset file exists but could not be read.
    #[error("failed to read template asset {path}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template body is not valid UTF-8.
    #[error("template {file} is not valid UTF-8")]
    TemplateEncoding {
        file: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    // --- Rendering ---

    /// The template string could not be parsed.
    #[error("template syntax error in {template}: {message}")]
    RenderSyntax { template: String, message: String },

    /// The template parsed but failed while rendering (unknown helper, missing field).
    #[error("failed to render {template}: {message}")]
    RenderExecution { template: String, message: String },

    // --- Persistence ---

    /// A directory or output file could not be written.
    #[error("failed to write {path}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path template rendered to an empty string.
    #[error("path template '{template}' rendered to an empty path")]
    EmptyOutputPath { template: String },
}

impl MobwizError {
    /// Whether the error means something was missing rather than broken.
    ///
    /// A missing manifest or body can be fixed by pointing `--templates-dir`
    /// at a template tree; a malformed manifest cannot.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationNotFound { .. } | Self::TemplateBodyMissing { .. }
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no filesystem roots".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Alias for `Result<T, MobwizError>`.
pub type Result<T> = std::result::Result<T, MobwizError>;
