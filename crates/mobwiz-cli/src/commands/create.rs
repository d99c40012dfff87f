use std::path::{Path, PathBuf};

use anyhow::Result;

use mobwiz_core::{GenerationRequest, ModuleGenerator};

use crate::{output, prompt};

/// Flags accepted by `mobwiz create`.
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub platform: String,
    pub architecture: String,
    pub package: Option<String>,
    pub output: PathBuf,
}

/// Generate a module.
///
/// With `--name`, every value comes from flags. Without it, the interactive
/// flow asks for platform, name, architecture and (Android) package.
pub fn run(templates_dir: Option<&Path>, args: CreateArgs) -> Result<()> {
    let generator = ModuleGenerator::with_defaults(templates_dir);

    let request = match request_from_flags(&args) {
        Some(request) => request,
        None => {
            println!("Starting interactive mode...");
            prompt::run_interactive_flow(&generator, args.output.clone())?
        }
    };

    output::print_header(&format!("mobwiz create: {}", request.name));
    output::print_key_value("Platform", &request.platform);
    output::print_key_value("Architecture", &request.architecture);
    if let Some(package) = &request.package_name {
        output::print_key_value("Package", package);
    }
    output::print_key_value("Output", &request.output_dir.display().to_string());
    println!();

    let report = generator.generate_with(&request, |file| {
        let shown = file
            .path
            .strip_prefix(&request.output_dir)
            .unwrap_or(&file.path);
        output::print_created(shown);
    })?;

    println!();
    output::print_key_value("Templates", &report.manifest_origin.to_string());
    output::print_success(&format!(
        "Module '{}' generated: {} files for {} ({})",
        request.name,
        report.files.len(),
        report.platform,
        report.architecture
    ));

    Ok(())
}

/// Build a request from flags, or `None` when the name is missing or blank.
fn request_from_flags(args: &CreateArgs) -> Option<GenerationRequest> {
    let name = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
    Some(GenerationRequest {
        name: name.to_string(),
        platform: args.platform.clone(),
        architecture: args.architecture.clone(),
        package_name: args.package.clone(),
        output_dir: args.output.clone(),
    })
}
