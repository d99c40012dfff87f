//! Resolution of a (platform, architecture) request to the templates to render.
//!
//! [`Manifest::templates_for`] works on canonical values only.
//! [`Manifest::resolve`] and [`Manifest::available_architectures`] accept the
//! free-form labels users type and normalize them through [`crate::platform`].

use crate::error::{MobwizError, Result};
use crate::manifest::{ArchitectureEntry, Manifest, TemplateDefinition};
use crate::platform::{ArchitectureKey, Platform};

/// The flattened template list for one platform/architecture pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplateSet {
    /// Templates in generation order: layers in manifest order, entries in layer order.
    pub templates: Vec<TemplateDefinition>,
    pub platform: Platform,
    pub architecture: ArchitectureKey,
}

impl Manifest {
    fn entry(&self, platform: Platform, architecture: &ArchitectureKey) -> Option<&ArchitectureEntry> {
        self.architectures(platform).get(architecture.as_str())
    }

    /// Architecture keys registered for `platform`, in manifest order.
    pub fn architecture_keys(&self, platform: Platform) -> Vec<String> {
        self.architectures(platform)
            .keys()
            .cloned()
            .collect()
    }

    /// Look up the templates for canonical `platform` and `architecture`.
    pub fn templates_for(
        &self,
        platform: Platform,
        architecture: &ArchitectureKey,
    ) -> Result<ResolvedTemplateSet> {
        let entry = self.entry(platform, architecture).ok_or_else(|| {
            MobwizError::ArchitectureNotFound {
                architecture: architecture.to_string(),
                platform: platform.to_string(),
                available: self.architecture_keys(platform),
            }
        })?;

        Ok(ResolvedTemplateSet {
            templates: entry.flatten(),
            platform,
            architecture: architecture.clone(),
        })
    }

    /// Normalize user input and look up the matching templates.
    ///
    /// Errors name the platform and architecture exactly as the user typed them.
    pub fn resolve(&self, platform_input: &str, architecture_input: &str) -> Result<ResolvedTemplateSet> {
        let platform = Platform::from_input(platform_input)?;
        let architecture = ArchitectureKey::from_input(architecture_input);
        tracing::debug!(
            "resolved '{platform_input}' / '{architecture_input}' to {}/{architecture}",
            platform.key()
        );

        match self.templates_for(platform, &architecture) {
            Err(MobwizError::ArchitectureNotFound { available, .. }) => {
                Err(MobwizError::ArchitectureNotFound {
                    architecture: architecture_input.to_string(),
                    platform: platform_input.to_string(),
                    available,
                })
            }
            other => other,
        }
    }

    /// Architecture keys for a free-form platform label.
    ///
    /// An unrecognized platform yields an empty list; callers choose a fallback.
    pub fn available_architectures(&self, platform_input: &str) -> Vec<String> {
        match Platform::from_input(platform_input) {
            Ok(platform) => self.architecture_keys(platform),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetOrigin;

    const MANIFEST: &str = r#"
flutter:
  bloc:
    domain:
      - { path: "lib/domain/{{snakeCase Name}}.dart", template: entity.dart.tmpl }
    data:
      - { path: "lib/data/{{snakeCase Name}}_repository.dart", template: repository.dart.tmpl }
    presentation:
      - { path: "lib/presentation/{{snakeCase Name}}_bloc.dart", template: bloc.dart.tmpl }
      - { path: "lib/presentation/{{snakeCase Name}}_page.dart", template: page.dart.tmpl }
  mvvm:
    presentation:
      - { path: "lib/{{snakeCase Name}}_view_model.dart", template: view_model.dart.tmpl }
android:
  mvvm:
    domain:
      - { path: "domain/{{pascalCase .Name}}Repository.kt", template: repo.kt.tmpl }
  redux:
    store:
      - { path: "store.kt", template: store.kt.tmpl }
"#;

    fn manifest() -> Manifest {
        Manifest::from_yaml(MANIFEST.as_bytes(), AssetOrigin::Bundle("test".into())).unwrap()
    }

    #[test]
    fn test_resolve_platform_variants() {
        let manifest = manifest();
        for input in ["Android", "Android (Kotlin)", "ANDROID"] {
            let set = manifest.resolve(input, "MVVM + Clean Architecture").unwrap();
            assert_eq!(set.platform, Platform::Android);
            assert_eq!(set.architecture.as_str(), "mvvm");
            assert_eq!(set.templates.len(), 1);
        }
    }

    #[test]
    fn test_resolve_bloc_fragment_anywhere() {
        let manifest = manifest();
        for input in ["bloc", "Clean Architecture + BLoC", "BLOC-ish"] {
            let set = manifest.resolve("Flutter", input).unwrap();
            assert_eq!(set.architecture.as_str(), "bloc");
        }
    }

    #[test]
    fn test_resolve_flattens_in_layer_order() {
        let set = manifest().resolve("flutter", "bloc").unwrap();
        let files: Vec<_> = set.templates.iter().map(|t| t.template_file.as_str()).collect();
        assert_eq!(
            files,
            vec!["entity.dart.tmpl", "repository.dart.tmpl", "bloc.dart.tmpl", "page.dart.tmpl"]
        );
    }

    #[test]
    fn test_resolve_is_stable() {
        let manifest = manifest();
        let first = manifest.resolve("flutter", "bloc").unwrap();
        for _ in 0..10 {
            assert_eq!(manifest.resolve("flutter", "bloc").unwrap(), first);
        }
    }

    #[test]
    fn test_resolve_verbatim_architecture_key() {
        let set = manifest().resolve("Android", "Redux").unwrap();
        assert_eq!(set.architecture.as_str(), "redux");
        assert_eq!(set.templates[0].template_file, "store.kt.tmpl");
    }

    #[test]
    fn test_missing_architecture_names_request() {
        let err = manifest().resolve("Flutter", "NonExistentPattern").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, MobwizError::ArchitectureNotFound { .. }));
        assert!(msg.contains("NonExistentPattern"), "{msg}");
        assert!(msg.contains("Flutter"), "{msg}");
        assert!(msg.contains("bloc, mvvm"), "{msg}");
    }

    #[test]
    fn test_templates_for_missing_architecture() {
        let err = manifest()
            .templates_for(Platform::Ios, &ArchitectureKey::from_input("mvvm"))
            .unwrap_err();
        match err {
            MobwizError::ArchitectureNotFound { architecture, platform, available } => {
                assert_eq!(architecture, "mvvm");
                assert_eq!(platform, "iOS");
                assert!(available.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_platform() {
        let err = manifest().resolve("Web", "bloc").unwrap_err();
        assert!(matches!(err, MobwizError::UnsupportedPlatform(_)));
    }

    #[test]
    fn test_available_architectures() {
        let manifest = manifest();
        assert_eq!(manifest.available_architectures("Flutter"), vec!["bloc", "mvvm"]);
        assert_eq!(
            manifest.available_architectures("Android (Kotlin)"),
            vec!["mvvm", "redux"]
        );
        assert!(manifest.available_architectures("iOS (Swift)").is_empty());
        assert!(manifest.available_architectures("Symbian").is_empty());
    }
}
