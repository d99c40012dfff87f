//! Module generation: manifest → resolved templates → rendered files on disk.
//!
//! For every template of the resolved set, in order:
//!
//! ```text
//! locate body → render output path → render content → write file
//! ```
//!
//! The first failure aborts the run. Files written before the failure stay on
//! disk; re-running with the same inputs overwrites them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::{AssetLocator, AssetOrigin, AssetSearch, SearchRoots};
use crate::error::{MobwizError, Result};
use crate::manifest::{LoadedManifest, ManifestLoader};
use crate::platform::{ArchitectureKey, Platform};
use crate::templates::embedded::EmbeddedAssets;
use crate::templates::renderer::{RenderContext, TemplateRenderer};

/// Everything needed to generate one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Module name as typed, e.g. `user profile`.
    pub name: String,
    /// Free-form platform label, e.g. `Android (Kotlin)`.
    pub platform: String,
    /// Free-form architecture label, e.g. `Clean Architecture + BLoC`.
    pub architecture: String,
    /// Package id; `None` uses the default.
    pub package_name: Option<String>,
    /// Directory the rendered paths are relative to.
    pub output_dir: PathBuf,
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// Body file the content was rendered from.
    pub template: String,
    pub bytes: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub platform: Platform,
    pub architecture: ArchitectureKey,
    pub manifest_origin: AssetOrigin,
    /// Files in the order they were written.
    pub files: Vec<GeneratedFile>,
}

/// Drives manifest loading, resolution, rendering and persistence.
pub struct ModuleGenerator {
    loader: ManifestLoader,
    locator: AssetLocator,
    renderer: TemplateRenderer,
}

impl ModuleGenerator {
    /// A generator that searches `search` for the manifest and bodies.
    pub fn new(search: AssetSearch) -> Self {
        Self {
            loader: ManifestLoader::new(search.clone()),
            locator: AssetLocator::new(search),
            renderer: TemplateRenderer::new(),
        }
    }

    /// The CLI configuration: optional explicit template dir, cwd and exe
    /// dir with ancestors, then the embedded bundle.
    pub fn with_defaults(templates_dir: Option<&Path>) -> Self {
        Self::new(AssetSearch::new(
            SearchRoots::from_env(templates_dir),
            Some(Arc::new(EmbeddedAssets)),
        ))
    }

    pub fn load_manifest(&self) -> Result<LoadedManifest> {
        self.loader.load()
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport> {
        self.generate_with(request, |_| {})
    }

    /// Generate the module, calling `on_file` after each file is written.
    pub fn generate_with<F>(&self, request: &GenerationRequest, mut on_file: F) -> Result<GenerationReport>
    where
        F: FnMut(&GeneratedFile),
    {
        let loaded = self.loader.load()?;
        let resolved = loaded
            .manifest
            .resolve(&request.platform, &request.architecture)?;

        let context = RenderContext::new(request.name.clone(), request.package_name.as_deref());

        tracing::info!(
            "generating {} module '{}' using {} architecture ({} files)",
            resolved.platform,
            request.name,
            resolved.architecture,
            resolved.templates.len()
        );

        let mut files = Vec::with_capacity(resolved.templates.len());
        for def in &resolved.templates {
            let body = self.locator.locate_str(
                resolved.platform.key(),
                resolved.architecture.as_str(),
                &def.template_file,
            )?;

            let relative = self
                .renderer
                .render_named(&def.output_path, &def.output_path, &context)?;
            if relative.trim().is_empty() {
                return Err(MobwizError::EmptyOutputPath {
                    template: def.output_path.clone(),
                });
            }

            let content = self
                .renderer
                .render_named(&def.template_file, &body, &context)?;

            let path = request.output_dir.join(&relative);
            write_file(&path, &content)?;
            tracing::info!("created {}", path.display());

            let file = GeneratedFile {
                path,
                template: def.template_file.clone(),
                bytes: content.len(),
            };
            on_file(&file);
            files.push(file);
        }

        Ok(GenerationReport {
            platform: resolved.platform,
            architecture: resolved.architecture,
            manifest_origin: loaded.origin,
            files,
        })
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MobwizError::Persist {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| MobwizError::Persist {
        path: path.to_path_buf(),
        source: e,
    })
}
