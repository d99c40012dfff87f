//! Interactive flow used by `mobwiz create` when no module name is given.
//!
//! Asks, in order: platform, module name, architecture (from the manifest),
//! and for Android the package name. The answers become a
//! [`GenerationRequest`] identical to what the flags would have produced.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Input, Select};

use mobwiz_core::templates::renderer::DEFAULT_PACKAGE_NAME;
use mobwiz_core::{GenerationRequest, ModuleGenerator, Platform};

/// Platform labels offered in the first prompt.
pub const PLATFORM_CHOICES: [&str; 3] = ["Flutter", "Android (Kotlin)", "iOS (Swift)"];

const MIN_INPUT_LEN: usize = 3;

pub fn run_interactive_flow(generator: &ModuleGenerator, output_dir: PathBuf) -> Result<GenerationRequest> {
    let selection = Select::new()
        .with_prompt("Select platform")
        .items(&PLATFORM_CHOICES)
        .default(0)
        .interact()?;
    let platform_label = PLATFORM_CHOICES[selection];
    let platform = Platform::from_input(platform_label)?;

    let name: String = Input::new()
        .with_prompt("Module name")
        .validate_with(|input: &String| validate_min_len(input, "module name"))
        .interact_text()?;

    let architectures = architecture_choices(generator, platform_label, platform);
    let selection = Select::new()
        .with_prompt("Architecture pattern")
        .items(&architectures)
        .default(0)
        .interact()?;
    let architecture = architectures[selection].clone();

    let package_name = if platform == Platform::Android {
        let package: String = Input::new()
            .with_prompt("Package name")
            .default(DEFAULT_PACKAGE_NAME.to_string())
            .validate_with(|input: &String| validate_min_len(input, "package name"))
            .interact_text()?;
        Some(package)
    } else {
        None
    };

    Ok(GenerationRequest {
        name: name.trim().to_string(),
        platform: platform_label.to_string(),
        architecture,
        package_name,
        output_dir,
    })
}

/// Architectures to offer for the platform chosen as `platform_label`.
///
/// Falls back to a single platform default if the manifest cannot be loaded,
/// and to `Default` if the platform has no architectures registered.
fn architecture_choices(
    generator: &ModuleGenerator,
    platform_label: &str,
    platform: Platform,
) -> Vec<String> {
    match generator.load_manifest() {
        Ok(loaded) => choices_or_default(loaded.manifest.available_architectures(platform_label)),
        Err(e) => {
            tracing::warn!("could not load template manifest: {e}");
            vec![fallback_architecture(platform).to_string()]
        }
    }
}

fn choices_or_default(architectures: Vec<String>) -> Vec<String> {
    if architectures.is_empty() {
        vec!["Default".to_string()]
    } else {
        architectures
    }
}

/// Architecture label used when no manifest is available.
pub fn fallback_architecture(platform: Platform) -> &'static str {
    match platform {
        Platform::Flutter => "Clean Architecture + BLoC",
        Platform::Android => "MVVM + Clean Architecture",
        Platform::Ios => "MVVM + Coordinators",
    }
}

fn validate_min_len(input: &str, what: &str) -> std::result::Result<(), String> {
    if input.trim().chars().count() < MIN_INPUT_LEN {
        Err(format!("{what} must be at least {MIN_INPUT_LEN} characters"))
    } else {
        Ok(())
    }
}
