// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! voxcad CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use voxcad::cli::Reporter;
use voxcad::config::{ExportConfig, CONFIG_FILE};
use voxcad::io::{discover_structure_files, import_structure_file};
use voxcad::{ExportFormat, Exporter, Structure, WireframeFaces};

#[derive(Parser)]
#[command(name = "voxcad")]
#[command(about = "Export voxel structures to DXF, STL, OBJ/MTL and SVG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every structure in the input files
    Export {
        /// Structure JSON files or directories containing them
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Format to produce (repeatable; defaults to dxf, stl, obj, svg)
        #[arg(short, long = "format", value_name = "FORMAT")]
        formats: Vec<ExportFormat>,

        /// Configuration file (defaults to ./voxcad.toml when present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Faces written to DXF: bottom or all
        #[arg(long, value_name = "FACES")]
        wireframe_faces: Option<WireframeFaces>,

        /// Write binary STL instead of ASCII
        #[arg(long)]
        stl_binary: bool,

        /// Number of parallel export workers
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Show structure names, voxel counts and extents
    Inspect {
        /// Structure JSON files or directories containing them
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,
    },

    /// List supported output formats
    Formats,

    /// Write a configuration file with default settings
    InitConfig {
        /// Destination file
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            inputs,
            output,
            formats,
            config,
            wireframe_faces,
            stl_binary,
            jobs,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::from_file(&path)?.with_env_overrides()?,
                None => ExportConfig::load()?,
            };
            if let Some(output) = output {
                config.output_dir = output;
            }
            if !formats.is_empty() {
                config.formats = formats;
            }
            if let Some(faces) = wireframe_faces {
                config.wireframe_faces = faces;
            }
            if stl_binary {
                config.stl_binary = true;
            }
            if jobs.is_some() {
                config.parallelism = jobs;
            }
            config.verbose |= cli.verbose;

            export_command(&inputs, &config)?;
        }
        Commands::Inspect { inputs } => {
            inspect_command(&inputs)?;
        }
        Commands::Formats => {
            Reporter::report_formats();
        }
        Commands::InitConfig { path } => {
            init_config_command(&path)?;
        }
        Commands::Version => {
            println!("voxcad v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "voxcad=debug" } else { "voxcad=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load every input. A file that fails to load, or a structure entry that
/// fails to decode, is reported and skipped; the rest still load.
fn load_structures(inputs: &[PathBuf], verbose: bool) -> Result<(Vec<Structure>, usize)> {
    let files = discover_structure_files(inputs)?;
    if files.is_empty() {
        Reporter::report_error("No structure files found");
        std::process::exit(1);
    }

    let mut structures = Vec::new();
    let mut load_failures = 0;

    for file in &files {
        match import_structure_file(file) {
            Ok(parsed) => {
                if verbose {
                    Reporter::report_info(&format!(
                        "Loaded {} structures from {}",
                        parsed.set.len(),
                        file.display()
                    ));
                }
                for rejected in &parsed.rejected {
                    Reporter::report_error(&format!("{}: {}", file.display(), rejected.error));
                }
                load_failures += parsed.rejected.len();
                structures.extend(parsed.set.structures);
            }
            Err(e) => {
                Reporter::report_error(&format!("{}: {}", file.display(), e));
                load_failures += 1;
            }
        }
    }

    Ok((structures, load_failures))
}

fn export_command(inputs: &[PathBuf], config: &ExportConfig) -> Result<()> {
    let (structures, load_failures) = load_structures(inputs, config.verbose)?;

    let mut seen = HashSet::new();
    for structure in &structures {
        if !seen.insert(structure.name.as_str()) {
            Reporter::report_warning(&format!(
                "Structure name `{}` appears more than once; later exports overwrite earlier ones",
                structure.name
            ));
        }
    }

    let exporter = Exporter::from_config(config);
    let task_count = structures.len() * exporter.formats().len();

    let progress = ProgressBar::new(task_count as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let report = exporter
        .run_with_progress(&structures, |outcome| {
            progress.set_message(format!("{} [{}]", outcome.structure, outcome.format));
            progress.inc(1);
        })
        .with_context(|| format!("Failed to export into {}", config.output_dir.display()))?;
    progress.finish_and_clear();

    for outcome in &report.outcomes {
        if config.verbose || !outcome.is_success() {
            Reporter::report_outcome(outcome);
        }
    }
    Reporter::report_summary(&report, start.elapsed());

    if report.is_success() && load_failures == 0 {
        Reporter::success(&format!(
            "Exported {} structures to {}",
            structures.len(),
            config.output_dir.display()
        ));
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn inspect_command(inputs: &[PathBuf]) -> Result<()> {
    let (structures, load_failures) = load_structures(inputs, false)?;

    for structure in &structures {
        Reporter::report_structure(structure);
    }

    if load_failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_config_command(path: &Path) -> Result<()> {
    if path.exists() {
        Reporter::report_error(&format!("{} already exists", path.display()));
        std::process::exit(1);
    }

    ExportConfig::default().save(path)?;
    Reporter::success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
