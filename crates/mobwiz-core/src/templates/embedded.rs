//! Template tree compiled into the binary.
//!
//! Each entry loads a file from the workspace `templates/` directory via
//! [`include_str!`]. The paths are relative to this source file
//! (`crates/mobwiz-core/src/templates/embedded.rs`); a wrong path fails the build.
//!
//! ## Adding a new template
//!
//! 1. Place the body under `templates/<platform>/<architecture>/`
//! 2. Reference it from `templates/templates.yaml`
//! 3. Add a `(key, include_str!(..))` row to [`BUNDLED_TEMPLATES`]
//!
//! A manifest entry without a matching row still works when the template tree
//! is on disk, but fails with `TemplateBodyMissing` for installed binaries.

use crate::assets::AssetSource;

macro_rules! bundled {
    ($path:literal) => {
        ($path, include_str!(concat!("../../../../templates/", $path)))
    };
}

/// `templates/`-relative path and contents of every bundled asset.
pub const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    // Manifest
    bundled!("templates.yaml"),
    // Flutter
    bundled!("flutter/bloc/bloc.dart.tmpl"),
    bundled!("flutter/bloc/entity.dart.tmpl"),
    bundled!("flutter/bloc/event.dart.tmpl"),
    bundled!("flutter/bloc/model.dart.tmpl"),
    bundled!("flutter/bloc/page.dart.tmpl"),
    bundled!("flutter/bloc/repository.dart.tmpl"),
    bundled!("flutter/bloc/repository_impl.dart.tmpl"),
    bundled!("flutter/bloc/state.dart.tmpl"),
    bundled!("flutter/bloc/usecase.dart.tmpl"),
    bundled!("flutter/mvvm/model.dart.tmpl"),
    bundled!("flutter/mvvm/repository.dart.tmpl"),
    bundled!("flutter/mvvm/view.dart.tmpl"),
    bundled!("flutter/mvvm/view_model.dart.tmpl"),
    // Android (Kotlin)
    bundled!("android/mvvm/model.kt.tmpl"),
    bundled!("android/mvvm/repository.kt.tmpl"),
    bundled!("android/mvvm/repository_impl.kt.tmpl"),
    bundled!("android/mvvm/screen.kt.tmpl"),
    bundled!("android/mvvm/ui_state.kt.tmpl"),
    bundled!("android/mvvm/view_model.kt.tmpl"),
    // iOS (Swift)
    bundled!("ios/mvvm/coordinator.swift.tmpl"),
    bundled!("ios/mvvm/model.swift.tmpl"),
    bundled!("ios/mvvm/repository.swift.tmpl"),
    bundled!("ios/mvvm/repository_impl.swift.tmpl"),
    bundled!("ios/mvvm/view.swift.tmpl"),
    bundled!("ios/mvvm/view_model.swift.tmpl"),
];

/// The [`AssetSource`] backed by [`BUNDLED_TEMPLATES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn name(&self) -> &str {
        "embedded"
    }

    fn read(&self, relative: &str) -> Option<Vec<u8>> {
        BUNDLED_TEMPLATES
            .iter()
            .find(|(path, _)| *path == relative)
            .map(|(_, contents)| contents.as_bytes().to_vec())
    }
}
