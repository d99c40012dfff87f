//! mobwiz CLI — scaffolds mobile app modules from templates.
//!
//! Two commands:
//! - `create` renders a module for Flutter, Android or iOS
//! - `list` shows the platforms and architectures the active manifest provides
//!
//! Templates are read from `./templates` (or an ancestor, or the directory of
//! the executable) when present, otherwise from the copy built into the binary.

mod commands;
mod output;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::create::CreateArgs;

#[derive(Parser)]
#[command(
    name = "mobwiz",
    about = "Mobile module creator — Flutter, Android (Kotlin) and iOS (Swift)",
    long_about = "A CLI tool to generate mobile app modules with consistent architecture patterns.",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing templates.yaml, searched before ./templates
    #[arg(long, global = true, env = "MOBWIZ_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new module (interactive when --name is omitted)
    Create {
        /// Module name, e.g. "payment history"
        #[arg(short, long)]
        name: Option<String>,

        /// Platform (Flutter, Android, iOS)
        #[arg(short, long, default_value = "Flutter")]
        platform: String,

        /// Architecture pattern
        #[arg(short, long, default_value = "Clean Architecture + BLoC")]
        architecture: String,

        /// Package name (defaults to com.example)
        #[arg(short = 'k', long = "package")]
        package: Option<String>,

        /// Directory the module is generated into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// List available platforms and architectures
    List {
        /// Only show this platform
        #[arg(short, long)]
        platform: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let templates_dir = cli.templates_dir.as_deref();
    match cli.command {
        Commands::Create {
            name,
            platform,
            architecture,
            package,
            output,
        } => commands::create::run(
            templates_dir,
            CreateArgs {
                name,
                platform,
                architecture,
                package,
                output,
            },
        ),
        Commands::List { platform, json } => {
            commands::list::run(templates_dir, platform.as_deref(), json)
        }
    }
}
