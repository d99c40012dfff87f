//! Canonical platform and architecture identifiers.
//!
//! Users type free-form labels such as `Android (Kotlin)` or
//! `Clean Architecture + BLoC`. Those labels are normalized here, once, into a
//! [`Platform`] and an [`ArchitectureKey`]; everything downstream works with the
//! canonical values only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MobwizError, Result};

/// Target platform of a generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Cross-platform Flutter app.
    Flutter,
    /// Native Android app (Kotlin).
    Android,
    /// Native iOS app (Swift).
    Ios,
}

impl Platform {
    /// Every platform, in the order they are offered to users.
    pub const ALL: [Platform; 3] = [Platform::Flutter, Platform::Android, Platform::Ios];

    /// Key used in the manifest and as the template directory name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Flutter => "flutter",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// Label shown in prompts and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Flutter => "Flutter",
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// Normalize a free-form platform label.
    ///
    /// Matching is a case-insensitive substring test against `android`,
    /// `flutter` and `ios`, in that order.
    pub fn from_input(input: &str) -> Result<Self> {
        let lowered = input.to_lowercase();
        [Self::Android, Self::Flutter, Self::Ios]
            .into_iter()
            .find(|p| lowered.contains(p.key()))
            .ok_or_else(|| MobwizError::UnsupportedPlatform(input.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Architecture fragments recognized inside free-form labels, with their canonical key.
pub const KNOWN_ARCHITECTURES: &[(&str, &str)] = &[("bloc", "bloc"), ("mvvm", "mvvm")];

/// Canonical architecture identifier, as used in the manifest and template directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchitectureKey(String);

impl ArchitectureKey {
    /// Normalize a free-form architecture label.
    ///
    /// The first fragment of [`KNOWN_ARCHITECTURES`] contained in the
    /// lowercased input wins. Otherwise the lowercased input is used verbatim,
    /// so manifests may declare keys outside the known set.
    pub fn from_input(input: &str) -> Self {
        let lowered = input.to_lowercase();
        let key = KNOWN_ARCHITECTURES
            .iter()
            .find(|(fragment, _)| lowered.contains(fragment))
            .map(|(_, key)| key.to_string())
            .unwrap_or(lowered);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchitectureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
