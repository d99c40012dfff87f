use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use mobwiz_core::manifest::Manifest;
use mobwiz_core::{ModuleGenerator, Platform};

use crate::output;

/// One architecture as shown by `mobwiz list`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ArchitectureSummary {
    pub architecture: String,
    pub layers: Vec<String>,
    pub templates: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlatformSummary {
    pub platform: &'static str,
    pub architectures: Vec<ArchitectureSummary>,
}

/// Print the platforms and architectures the active manifest supports.
pub fn run(templates_dir: Option<&Path>, platform: Option<&str>, json: bool) -> Result<()> {
    let generator = ModuleGenerator::with_defaults(templates_dir);
    let loaded = generator.load_manifest()?;

    let platforms = match platform {
        Some(input) => vec![Platform::from_input(input)?],
        None => Platform::ALL.to_vec(),
    };
    let summary = summarize(&loaded.manifest, &platforms);

    if json {
        let doc = serde_json::json!({
            "manifest": loaded.origin.to_string(),
            "platforms": summary,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    output::print_header("mobwiz templates");
    output::print_key_value("Manifest", &loaded.origin.to_string());
    for entry in &summary {
        println!();
        println!("{}", entry.platform);
        if entry.architectures.is_empty() {
            output::print_warning("no architectures registered");
            continue;
        }
        for arch in &entry.architectures {
            output::print_key_value(
                &arch.architecture,
                &format!("{} templates ({})", arch.templates, arch.layers.join(", ")),
            );
        }
    }
    Ok(())
}

fn summarize(manifest: &Manifest, platforms: &[Platform]) -> Vec<PlatformSummary> {
    platforms
        .iter()
        .map(|&platform| PlatformSummary {
            platform: platform.display_name(),
            architectures: manifest
                .architectures(platform)
                .iter()
                .map(|(key, entry)| ArchitectureSummary {
                    architecture: key.to_string(),
                    layers: entry.layers.iter().map(|l| l.name.clone()).collect(),
                    templates: entry.template_count(),
                })
                .collect(),
        })
        .collect()
}
