//! Template manifest (`templates/templates.yaml`) model and loader.
//!
//! The manifest maps platform → architecture → layer → templates:
//!
//! ```yaml
//! android:
//!   mvvm:
//!     domain:
//!       - path: "{{packagePath PackageName}}/domain/{{pascalCase Name}}Repository.kt"
//!         template: repository.kt.tmpl
//!     presentation:
//!       - path: ...
//! ```
//!
//! Layers are kept in document order, and that is the order files are written in.
//! An architecture may also list its layers explicitly:
//!
//! ```yaml
//! ios:
//!   mvvm:
//!     - name: domain
//!       templates:
//!         - { path: ..., template: ... }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::assets::{AssetOrigin, AssetSearch};
use crate::error::{MobwizError, Result};
use crate::platform::Platform;

/// File name of the manifest inside a templates directory.
pub const MANIFEST_FILE: &str = "templates.yaml";

/// One file to generate: where it goes and which body renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Output path template, e.g. `domain/{{pascalCase Name}}Repository.kt`.
    #[serde(rename = "path")]
    pub output_path: String,
    /// Body file name under `templates/<platform>/<architecture>/`.
    #[serde(rename = "template")]
    pub template_file: String,
}

/// A named group of templates. The name is only a label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub templates: Vec<TemplateDefinition>,
}

/// All layers registered for one architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawArchitecture")]
pub struct ArchitectureEntry {
    pub layers: Vec<Layer>,
}

impl ArchitectureEntry {
    /// Concatenate every layer's templates in layer order.
    pub fn flatten(&self) -> Vec<TemplateDefinition> {
        self.layers
            .iter()
            .flat_map(|layer| layer.templates.iter().cloned())
            .collect()
    }

    pub fn template_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.templates.len()).sum()
    }
}

/// The two spellings of an architecture's layers, plus an empty entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArchitecture {
    Empty,
    Map(IndexMap<String, Option<Vec<TemplateDefinition>>>),
    List(Vec<Layer>),
}

impl From<RawArchitecture> for ArchitectureEntry {
    fn from(raw: RawArchitecture) -> Self {
        let layers = match raw {
            RawArchitecture::Empty => Vec::new(),
            RawArchitecture::Map(map) => map
                .into_iter()
                .map(|(name, templates)| Layer {
                    name,
                    templates: templates.unwrap_or_default(),
                })
                .collect(),
            RawArchitecture::List(layers) => layers,
        };
        Self { layers }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Architecture key → entry, in document order.
pub type ArchitectureMap = IndexMap<String, ArchitectureEntry>;

/// Parsed `templates.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flutter: ArchitectureMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub android: ArchitectureMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ios: ArchitectureMap,
}

impl Manifest {
    /// Parse manifest bytes. `origin` is only used for error reporting.
    ///
    /// The document goes through [`serde_yaml::Value`] first: its mappings
    /// reject duplicate keys, which `IndexMap` alone would silently merge.
    pub fn from_yaml(bytes: &[u8], origin: AssetOrigin) -> Result<Self> {
        serde_yaml::from_slice::<serde_yaml::Value>(bytes)
            .and_then(serde_yaml::from_value::<Manifest>)
            .map_err(|source| MobwizError::ConfigurationMalformed { origin, source })
    }

    /// Architecture map registered for `platform`.
    pub fn architectures(&self, platform: Platform) -> &ArchitectureMap {
        match platform {
            Platform::Flutter => &self.flutter,
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        }
    }
}

/// A manifest together with where it was read from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub origin: AssetOrigin,
}

/// Finds and parses `templates.yaml`.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    search: AssetSearch,
}

impl ManifestLoader {
    pub fn new(search: AssetSearch) -> Self {
        Self { search }
    }

    pub fn load(&self) -> Result<LoadedManifest> {
        let found = self.search.find(MANIFEST_FILE)?.ok_or_else(|| {
            MobwizError::ConfigurationNotFound {
                searched: self.search.roots().candidates(MANIFEST_FILE),
            }
        })?;

        tracing::info!("using template manifest from {}", found.origin);
        let manifest = Manifest::from_yaml(&found.bytes, found.origin.clone())?;
        Ok(LoadedManifest {
            manifest,
            origin: found.origin,
        })
    }
}
