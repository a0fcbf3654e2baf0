//! projmigrate CLI - legacy MSBuild project converter
//!
//! Usage: projmigrate <COMMAND>
//!
//! Commands:
//!   evaluate  Load projects and report what a conversion would see
//!   migrate   Load projects and run the transformation pipeline

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use projmigrate::{
    ConversionOptions, ProjectCache, ProjectReader, SharedProject, StaticMetadataProvider,
    TransformationPipeline,
};

/// projmigrate - legacy MSBuild project converter
#[derive(Parser, Debug)]
#[command(name = "projmigrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load projects and report what a conversion would see
    Evaluate {
        /// Project files to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Load project types in the unsupported table anyway
        #[arg(short, long)]
        force: bool,
    },

    /// Load projects and run the transformation pipeline
    Migrate {
        /// Project files to convert
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Convert project types in the unsupported table anyway
        #[arg(short, long)]
        force: bool,

        /// Run a transform even when it does not apply (repeatable)
        #[arg(long = "force-transform", value_name = "NAME")]
        force_transforms: Vec<String>,

        /// Skip a transform by name (repeatable)
        #[arg(long = "skip-transform", value_name = "NAME")]
        skip_transforms: Vec<String>,

        /// Replace target frameworks with this semicolon-separated list
        #[arg(long, value_name = "TFMS")]
        target_frameworks: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Evaluate { paths, force } => {
            let options = ConversionOptions {
                force,
                ..Default::default()
            };
            cmd_evaluate(&paths, options, cli.json)
        }
        Commands::Migrate {
            paths,
            force,
            force_transforms,
            skip_transforms,
            target_frameworks,
        } => {
            let options = ConversionOptions {
                force,
                force_transforms: force_transforms.into_iter().collect(),
                skip_transforms: skip_transforms.into_iter().collect(),
                target_frameworks: target_frameworks.map(|list| {
                    list.split(';')
                        .map(|tfm| tfm.trim().to_string())
                        .filter(|tfm| !tfm.is_empty())
                        .collect()
                }),
            };
            cmd_migrate(&paths, options, cli.json)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Serialize)]
struct ProjectSummary {
    path: String,
    schema: &'static str,
    web: bool,
    windows_forms: bool,
    wpf: bool,
    project_guid: Option<String>,
    target_frameworks: Vec<String>,
    configurations: Vec<String>,
    assembly_references: usize,
    project_references: usize,
    package_references: usize,
}

fn summarize(shared: &SharedProject) -> ProjectSummary {
    let project = shared.lock().expect("project lock poisoned");
    ProjectSummary {
        path: project.file_path.display().to_string(),
        schema: if project.is_modern { "modern" } else { "legacy" },
        web: project.is_web,
        windows_forms: project.is_windows_forms,
        wpf: project.is_wpf,
        project_guid: project.project_guid.map(|guid| guid.to_string()),
        target_frameworks: project.target_frameworks.clone(),
        configurations: project.configurations.clone(),
        assembly_references: project.assembly_references.len(),
        project_references: project.project_references.len(),
        package_references: project.package_references.len(),
    }
}

fn print_summary(summary: &ProjectSummary) {
    println!("┌─ {}", summary.path);
    println!("│  Schema: {}", summary.schema);
    if summary.web {
        println!("│  Web project");
    }
    if summary.windows_forms {
        println!("│  Windows Forms project");
    }
    if summary.wpf {
        println!("│  WPF project");
    }
    if let Some(guid) = &summary.project_guid {
        println!("│  Guid: {guid}");
    }
    println!("│  Frameworks: {}", summary.target_frameworks.join(";"));
    println!("│  Configurations: {}", summary.configurations.join(";"));
    println!(
        "│  References: {} assembly, {} project, {} package",
        summary.assembly_references, summary.project_references, summary.package_references
    );
    println!("└─");
}

/// Load every path, reporting per-file results; one bad file never stops the
/// batch
fn load_all(paths: &[PathBuf], options: ConversionOptions) -> Vec<(PathBuf, SharedProject)> {
    let cache = Arc::new(ProjectCache::new());
    let reader = ProjectReader::new(cache, options);

    let mut loaded = Vec::new();
    for path in paths {
        match reader.read(path) {
            Ok(Some(project)) => loaded.push((path.clone(), project)),
            Ok(None) => {}
            Err(error) => {
                tracing::error!(file = %path.display(), %error, "failed to load project");
            }
        }
    }
    loaded
}

fn cmd_evaluate(paths: &[PathBuf], options: ConversionOptions, json: bool) -> Result<()> {
    if !json {
        println!("🔍 Evaluating {} project file(s)", paths.len());
        println!();
    }

    let loaded = load_all(paths, options);

    if json {
        for (_, project) in &loaded {
            let summary = summarize(project);
            let output = serde_json::json!({
                "event": "evaluate",
                "project": summary,
            });
            println!("{}", serde_json::to_string(&output)?);
        }
    } else {
        for (_, project) in &loaded {
            print_summary(&summarize(project));
        }
        println!();
        println!(
            "Summary: {} loaded, {} skipped",
            loaded.len(),
            paths.len() - loaded.len()
        );
    }

    Ok(())
}

fn cmd_migrate(paths: &[PathBuf], options: ConversionOptions, json: bool) -> Result<()> {
    if !json {
        println!("📦 Migrating {} project file(s)", paths.len());
        println!();
    }

    // The network-backed metadata client is wired in by the hosting tool; the
    // standalone binary runs with the offline provider, so reduction only
    // applies its local rules
    let provider = Arc::new(StaticMetadataProvider::new());
    let pipeline = TransformationPipeline::standard(provider, options.clone());

    let loaded = load_all(paths, options);
    let mut converted = 0usize;
    let mut failed = 0usize;

    for (path, shared) in &loaded {
        let mut project = shared.lock().expect("project lock poisoned");
        match pipeline.run(&mut project) {
            Ok(()) => {
                converted += 1;
                drop(project);
                if json {
                    let summary = summarize(shared);
                    let output = serde_json::json!({
                        "event": "migrate",
                        "status": "converted",
                        "project": summary,
                    });
                    println!("{}", serde_json::to_string(&output)?);
                } else {
                    print_summary(&summarize(shared));
                }
            }
            Err(error) => {
                failed += 1;
                tracing::error!(file = %path.display(), %error, "pipeline failed");
                if json {
                    let output = serde_json::json!({
                        "event": "migrate",
                        "status": "failed",
                        "path": path.display().to_string(),
                        "error": error.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output)?);
                }
            }
        }
    }

    if !json {
        println!();
        println!(
            "Summary: {} converted, {} failed, {} skipped",
            converted,
            failed,
            paths.len() - loaded.len()
        );
    }

    Ok(())
}
