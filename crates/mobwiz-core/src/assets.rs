//! Layered lookup of template assets.
//!
//! Every asset (the manifest and each template body) is addressed by a path
//! relative to a `templates/` directory, e.g. `templates.yaml` or
//! `android/mvvm/repository.kt.tmpl`. Lookup walks the filesystem
//! [`SearchRoots`] in order and falls back to a bundled [`AssetSource`]. The
//! first hit wins; sources are never merged.
//!
//! ```text
//! --templates-dir <DIR>                      (explicit, if given)
//! $CWD/templates, $CWD/../templates, ...     (cwd + 3 ancestors)
//! $EXE_DIR/templates, ...                    (exe dir + 3 ancestors)
//! bundle                                     (compiled into the binary)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{MobwizError, Result};

/// Name of the directory that holds the manifest and template bodies.
pub const TEMPLATES_DIR: &str = "templates";

/// Number of ancestors checked above each base directory.
pub const ANCESTOR_DEPTH: usize = 3;

/// A read-only store of template assets keyed by `templates/`-relative path.
///
/// The compiled-in bundle implements this, and so does [`MemoryAssets`] for tests.
pub trait AssetSource: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    /// Return the bytes for `relative` (forward-slash separated), if present.
    fn read(&self, relative: &str) -> Option<Vec<u8>>;
}

/// In-memory [`AssetSource`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_file(mut self, relative: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(relative, contents);
        self
    }

    pub fn insert(&mut self, relative: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(relative.into(), contents.into());
    }
}

impl AssetSource for MemoryAssets {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self, relative: &str) -> Option<Vec<u8>> {
        self.files.get(relative).cloned()
    }
}

/// Ordered list of directories that may contain template assets.
///
/// Each entry plays the role of a `templates/` directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoots {
    roots: Vec<PathBuf>,
}

impl SearchRoots {
    /// No filesystem roots; lookups go straight to the bundle.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default search order for a CLI invocation.
    ///
    /// `explicit` is a template directory given by the user and is searched
    /// first. Then the working directory and the executable's directory are
    /// added, each with [`ANCESTOR_DEPTH`] ancestors.
    pub fn from_env(explicit: Option<&Path>) -> Self {
        let mut roots = Self::empty();
        if let Some(dir) = explicit {
            roots = roots.with_template_dir(dir);
        }
        match std::env::current_dir() {
            Ok(cwd) => roots = roots.with_base(&cwd),
            Err(e) => tracing::debug!("working directory unavailable: {e}"),
        }
        match std::env::current_exe() {
            Ok(exe) => {
                if let Some(dir) = exe.parent() {
                    roots = roots.with_base(dir);
                }
            }
            Err(e) => tracing::debug!("executable path unavailable: {e}"),
        }
        roots
    }

    /// Add a directory that directly contains `templates.yaml`.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.push(dir.into());
        self
    }

    /// Add `<base>/templates` and the same for up to [`ANCESTOR_DEPTH`] ancestors of `base`.
    pub fn with_base(mut self, base: &Path) -> Self {
        for dir in base.ancestors().take(ANCESTOR_DEPTH + 1) {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.push(dir.join(TEMPLATES_DIR));
        }
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Candidate filesystem paths for `relative`, in search order.
    pub fn candidates(&self, relative: &str) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| {
                relative
                    .split('/')
                    .filter(|part| !part.is_empty())
                    .fold(root.clone(), |path, part| path.join(part))
            })
            .collect()
    }

    fn push(&mut self, dir: PathBuf) {
        if !self.roots.contains(&dir) {
            self.roots.push(dir);
        }
    }
}

/// Where an asset was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOrigin {
    /// A file on disk.
    File(PathBuf),
    /// A bundled [`AssetSource`], by name.
    Bundle(String),
}

impl fmt::Display for AssetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundle(name) => write!(f, "<{name} bundle>"),
        }
    }
}

/// Bytes of a located asset together with their origin.
#[derive(Debug, Clone)]
pub struct FoundAsset {
    pub bytes: Vec<u8>,
    pub origin: AssetOrigin,
}

/// Filesystem roots plus an optional bundle, searched in that order.
#[derive(Clone, Default)]
pub struct AssetSearch {
    roots: SearchRoots,
    bundle: Option<Arc<dyn AssetSource>>,
}

impl AssetSearch {
    pub fn new(roots: SearchRoots, bundle: Option<Arc<dyn AssetSource>>) -> Self {
        Self { roots, bundle }
    }

    pub fn roots(&self) -> &SearchRoots {
        &self.roots
    }

    /// Find `relative`, returning `Ok(None)` when no source has it.
    ///
    /// A candidate file that exists but cannot be read is an error, not a miss.
    pub fn find(&self, relative: &str) -> Result<Option<FoundAsset>> {
        for candidate in self.roots.candidates(relative) {
            if !candidate.is_file() {
                tracing::trace!("miss: {}", candidate.display());
                continue;
            }
            let bytes = std::fs::read(&candidate).map_err(|e| MobwizError::AssetRead {
                path: candidate.clone(),
                source: e,
            })?;
            tracing::debug!("found {relative} at {}", candidate.display());
            return Ok(Some(FoundAsset {
                bytes,
                origin: AssetOrigin::File(candidate),
            }));
        }

        if let Some(bundle) = &self.bundle {
            if let Some(bytes) = bundle.read(relative) {
                tracing::debug!("found {relative} in {} bundle", bundle.name());
                return Ok(Some(FoundAsset {
                    bytes,
                    origin: AssetOrigin::Bundle(bundle.name().to_string()),
                }));
            }
        }

        Ok(None)
    }
}

impl fmt::Debug for AssetSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetSearch")
            .field("roots", &self.roots)
            .field("bundle", &self.bundle.as_ref().map(|b| b.name().to_string()))
            .finish()
    }
}

/// Locates template bodies under `<platform>/<architecture>/<file>`.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    search: AssetSearch,
}

impl AssetLocator {
    pub fn new(search: AssetSearch) -> Self {
        Self { search }
    }

    /// Read the body of `file` for the given canonical platform and architecture.
    pub fn locate(&self, platform: &str, architecture: &str, file: &str) -> Result<FoundAsset> {
        let relative = format!("{platform}/{architecture}/{file}");
        self.search
            .find(&relative)?
            .ok_or_else(|| MobwizError::TemplateBodyMissing {
                platform: platform.to_string(),
                architecture: architecture.to_string(),
                file: file.to_string(),
                searched: self.search.roots().candidates(&relative),
            })
    }

    /// Like [`locate`](Self::locate), decoded as UTF-8.
    pub fn locate_str(&self, platform: &str, architecture: &str, file: &str) -> Result<String> {
        let found = self.locate(platform, architecture, file)?;
        String::from_utf8(found.bytes).map_err(|e| MobwizError::TemplateEncoding {
            file: format!("{platform}/{architecture}/{file}"),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_from_env_orders_explicit_then_cwd_then_exe() {
        let explicit = tempfile::tempdir().unwrap();
        let roots = SearchRoots::from_env(Some(explicit.path()));
        let cwd = std::env::current_dir().unwrap();
        let exe_templates = std::env::current_exe()
            .unwrap()
            .parent()
            .unwrap()
            .join(TEMPLATES_DIR);

        assert_eq!(roots.roots()[0], explicit.path());
        assert_eq!(roots.roots()[1], cwd.join(TEMPLATES_DIR));

        let cwd_roots = SearchRoots::empty().with_base(&cwd);
        for (i, dir) in cwd_roots.roots().iter().enumerate() {
            assert_eq!(&roots.roots()[i + 1], dir);
        }
        if !cwd_roots.roots().contains(&exe_templates) {
            let exe_pos = roots
                .roots()
                .iter()
                .position(|dir| *dir == exe_templates)
                .unwrap();
            assert_eq!(exe_pos, cwd_roots.roots().len() + 1);
        }
    }

    #[test]
    fn test_with_base_adds_three_ancestors() {
        let roots = SearchRoots::empty().with_base(Path::new("/a/b/c/d/e"));
        assert_eq!(
            roots.roots(),
            &[
                PathBuf::from("/a/b/c/d/e/templates"),
                PathBuf::from("/a/b/c/d/templates"),
                PathBuf::from("/a/b/c/templates"),
                PathBuf::from("/a/b/templates"),
            ]
        );
    }

    #[test]
    fn test_with_base_stops_at_filesystem_root() {
        let roots = SearchRoots::empty().with_base(Path::new("/a"));
        assert_eq!(
            roots.roots(),
            &[PathBuf::from("/a/templates"), PathBuf::from("/templates")]
        );
    }

    #[test]
    fn test_duplicate_roots_are_dropped() {
        let roots = SearchRoots::empty()
            .with_base(Path::new("/x/y"))
            .with_base(Path::new("/x"));
        assert_eq!(
            roots.roots(),
            &[
                PathBuf::from("/x/y/templates"),
                PathBuf::from("/x/templates"),
                PathBuf::from("/templates"),
            ]
        );
    }

    #[test]
    fn test_explicit_dir_is_first() {
        let roots = SearchRoots::empty()
            .with_template_dir("/custom")
            .with_base(Path::new("/w"));
        assert_eq!(roots.roots()[0], PathBuf::from("/custom"));
        assert_eq!(
            roots.candidates("ios/mvvm/view.swift.tmpl")[0],
            PathBuf::from("/custom/ios/mvvm/view.swift.tmpl")
        );
    }

    #[test]
    fn test_filesystem_wins_over_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "templates/android/mvvm/repo.kt.tmpl", "from disk");

        let bundle = MemoryAssets::new().with_file("android/mvvm/repo.kt.tmpl", "from bundle");
        let search = AssetSearch::new(
            SearchRoots::empty().with_base(dir.path()),
            Some(Arc::new(bundle)),
        );
        let locator = AssetLocator::new(search);

        let body = locator.locate_str("android", "mvvm", "repo.kt.tmpl").unwrap();
        assert_eq!(body, "from disk");
    }

    #[test]
    fn test_ancestor_directory_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "templates/flutter/bloc/bloc.dart.tmpl", "ancestor");
        let nested = dir.path().join("one/two");
        std::fs::create_dir_all(&nested).unwrap();

        let locator = AssetLocator::new(AssetSearch::new(
            SearchRoots::empty().with_base(&nested),
            None,
        ));
        let found = locator.locate("flutter", "bloc", "bloc.dart.tmpl").unwrap();
        assert_eq!(found.bytes, b"ancestor");
        assert_eq!(
            found.origin,
            AssetOrigin::File(dir.path().join("templates/flutter/bloc/bloc.dart.tmpl"))
        );
    }

    #[test]
    fn test_bundle_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = MemoryAssets::new().with_file("ios/mvvm/view.swift.tmpl", "bundled");
        let locator = AssetLocator::new(AssetSearch::new(
            SearchRoots::empty().with_base(dir.path()),
            Some(Arc::new(bundle)),
        ));

        let found = locator.locate("ios", "mvvm", "view.swift.tmpl").unwrap();
        assert_eq!(found.bytes, b"bundled");
        assert_eq!(found.origin, AssetOrigin::Bundle("memory".into()));
    }

    #[test]
    fn test_missing_template_reports_searched_paths() {
        let dir = tempfile::tempdir().unwrap();
        let locator = AssetLocator::new(AssetSearch::new(
            SearchRoots::empty().with_template_dir(dir.path()),
            Some(Arc::new(MemoryAssets::new())),
        ));

        let err = locator.locate("ios", "mvvm", "missing.tmpl").unwrap_err();
        match err {
            MobwizError::TemplateBodyMissing { file, searched, .. } => {
                assert_eq!(file, "missing.tmpl");
                assert_eq!(searched, vec![dir.path().join("ios/mvvm/missing.tmpl")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_body() {
        let bundle = MemoryAssets::new().with_file("ios/mvvm/bad.tmpl", vec![0xff, 0xfe]);
        let locator = AssetLocator::new(AssetSearch::new(
            SearchRoots::empty(),
            Some(Arc::new(bundle)),
        ));
        let err = locator.locate_str("ios", "mvvm", "bad.tmpl").unwrap_err();
        assert!(matches!(err, MobwizError::TemplateEncoding { .. }));
    }
}
