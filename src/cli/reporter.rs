// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::exporter::{ExportReport, TaskOutcome};
use crate::io::ExportFormat;
use crate::model::Structure;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report one finished task
    pub fn report_outcome(outcome: &TaskOutcome) {
        match &outcome.result {
            Ok(files) => {
                for file in files {
                    println!(
                        "  {} {} {}",
                        "✅".green(),
                        file.path.display().to_string().cyan(),
                        format!("({})", Self::format_bytes(file.bytes)).bright_black()
                    );
                }
            }
            Err(err) => {
                eprintln!(
                    "  {} {} [{}]: {}",
                    "❌".red(),
                    outcome.structure.bold(),
                    outcome.format.to_string().yellow(),
                    err
                );
            }
        }
    }

    /// Print the end-of-run summary
    pub fn report_summary(report: &ExportReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{}", "Export Summary".bold());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Tasks:".bright_black(),
            report.outcomes.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Succeeded:".bright_black(),
            report.succeeded().to_string().green()
        );
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if report.failed() > 0 {
                report.failed().to_string().red()
            } else {
                report.failed().to_string().green()
            }
        );
        println!(
            "  {} {}",
            "Files:".bright_black(),
            report.written_files().count().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Describe a structure without exporting it
    pub fn report_structure(structure: &Structure) {
        let dims = &structure.dimensions;
        println!("\n{} {}", "Structure:".bold(), structure.name.cyan());
        if let Some(description) = &structure.description {
            println!("  {} {}", "Description:".bright_black(), description);
        }
        println!(
            "  {} {}",
            "Voxels:".bright_black(),
            structure.voxel_count().to_string().cyan()
        );
        println!(
            "  {} {} x {} x {}",
            "Dimensions:".bright_black(),
            dims.x,
            dims.y,
            dims.z
        );
        match structure.bounds() {
            Some(bounds) => {
                let extent = bounds.extent();
                let fits = if bounds.fits_within(dims) {
                    "within dimensions".green()
                } else {
                    "exceeds dimensions".yellow()
                };
                println!(
                    "  {} {} x {} x {} ({})",
                    "Extent:".bright_black(),
                    extent.x,
                    extent.y,
                    extent.z,
                    fits
                );
            }
            None => println!("  {} {}", "Extent:".bright_black(), "empty".bright_black()),
        }
    }

    /// List supported formats
    pub fn report_formats() {
        println!("{}", "Supported formats:".bold());
        for format in ExportFormat::ALL {
            let default = if ExportFormat::DEFAULT.contains(&format) {
                ""
            } else {
                " (opt-in)"
            };
            println!(
                "  {:<12} {}{}",
                format!(".{}", format.extension()).cyan(),
                format.description(),
                default.bright_black()
            );
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    fn format_bytes(bytes: usize) -> String {
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KiB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(Reporter::format_bytes(512), "512 B");
        assert_eq!(Reporter::format_bytes(2048), "2.0 KiB");
    }
}
