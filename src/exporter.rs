// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export orchestration - independent (structure, format) tasks

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::io::{write_atomic, ExportFormat, ExportOptions};
use crate::model::Structure;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// One unit of work: a structure rendered in one format
#[derive(Debug, Clone, Copy)]
pub struct ExportTask<'a> {
    pub structure: &'a Structure,
    pub format: ExportFormat,
}

/// A file that landed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Result of a single task
#[derive(Debug)]
pub struct TaskOutcome {
    pub structure: String,
    pub format: ExportFormat,
    pub result: Result<Vec<WrittenFile>>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ExportError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of every task, in task order
#[derive(Debug, Default)]
pub struct ExportReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl ExportReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn written_files(&self) -> impl Iterator<Item = &WrittenFile> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Writes every requested format of every structure into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    formats: Vec<ExportFormat>,
    options: ExportOptions,
    parallelism: Option<usize>,
}

impl Exporter {
    /// Exporter for the default four formats
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formats: ExportFormat::DEFAULT.to_vec(),
            options: ExportOptions::default(),
            parallelism: None,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            formats: config.formats.clone(),
            options: config.options(),
            parallelism: config.parallelism,
        }
    }

    pub fn with_formats(mut self, formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Worker count; `None` uses the global rayon pool
    pub fn with_parallelism(mut self, parallelism: Option<usize>) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    /// Every (structure, format) pair, structure-major
    pub fn tasks<'a>(&self, structures: &'a [Structure]) -> Vec<ExportTask<'a>> {
        structures
            .iter()
            .flat_map(|structure| {
                self.formats
                    .iter()
                    .map(move |&format| ExportTask { structure, format })
            })
            .collect()
    }

    /// Run all tasks.
    ///
    /// Only failing to create the output directory or the worker pool is an
    /// error here; per-task failures are recorded in the report and do not
    /// stop sibling tasks.
    pub fn run(&self, structures: &[Structure]) -> Result<ExportReport> {
        self.run_with_progress(structures, |_| {})
    }

    /// Like [`Exporter::run`], calling `on_done` as each task finishes
    pub fn run_with_progress<F>(&self, structures: &[Structure], on_done: F) -> Result<ExportReport>
    where
        F: Fn(&TaskOutcome) + Sync,
    {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ExportError::write(&self.output_dir, e))?;

        let tasks = self.tasks(structures);
        let execute = || -> Vec<TaskOutcome> {
            tasks
                .par_iter()
                .map(|task| {
                    let outcome = self.run_task(task);
                    on_done(&outcome);
                    outcome
                })
                .collect()
        };

        let outcomes = match self.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(execute),
            None => execute(),
        };

        Ok(ExportReport { outcomes })
    }

    /// Render one task fully in memory, then write its files
    pub fn run_task(&self, task: &ExportTask<'_>) -> TaskOutcome {
        let structure = task.structure;
        let result = structure
            .validate()
            .and_then(|_| task.format.render(structure, &structure.name, &self.options))
            .and_then(|artifacts| {
                artifacts
                    .into_iter()
                    .map(|artifact| -> Result<WrittenFile> {
                        let path = self.output_dir.join(&artifact.file_name);
                        write_atomic(&path, &artifact.bytes)?;
                        tracing::info!(
                            structure = %structure.name,
                            format = %task.format,
                            path = %path.display(),
                            "exported"
                        );
                        Ok(WrittenFile {
                            path,
                            bytes: artifact.bytes.len(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            });

        if let Err(ref err) = result {
            tracing::warn!(
                structure = %structure.name,
                format = %task.format,
                error = %err,
                "export failed"
            );
        }

        TaskOutcome {
            structure: structure.name.clone(),
            format: task.format,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimensions, Voxel};
    use tempfile::tempdir;

    fn structures() -> Vec<Structure> {
        vec![
            Structure::new("alpha", Dimensions::new(1, 1, 1))
                .with_voxel(Voxel::new([0, 0, 0], "minecraft:stone")),
            Structure::new("omega", Dimensions::new(2, 1, 1))
                .with_voxel(Voxel::new([1, 0, 0], "minecraft:lever")),
        ]
    }

    #[test]
    fn test_tasks_cover_every_pair() {
        let exporter = Exporter::new("unused");
        let structures = structures();
        let tasks = exporter.tasks(&structures);

        assert_eq!(tasks.len(), 8);
        assert_eq!(tasks[0].structure.name, "alpha");
        assert_eq!(tasks[4].structure.name, "omega");
        assert_eq!(tasks[1].format, ExportFormat::TriangulatedMesh);
    }

    #[test]
    fn test_run_writes_all_files() -> Result<()> {
        let dir = tempdir().unwrap();
        let report = Exporter::new(dir.path())
            .with_parallelism(Some(2))
            .run(&structures())?;

        assert!(report.is_success());
        assert_eq!(report.outcomes.len(), 8);
        // obj tasks write an extra .mtl each
        assert_eq!(report.written_files().count(), 10);
        for name in ["alpha.dxf", "alpha.stl", "alpha.obj", "alpha.mtl", "omega.svg"] {
            assert!(dir.path().join(name).exists(), "{}", name);
        }
        Ok(())
    }

    #[test]
    fn test_malformed_structure_does_not_stop_siblings() -> Result<()> {
        let dir = tempdir().unwrap();
        let mut structures = structures();
        structures.insert(1, Structure::new("", Dimensions::default()));

        let report = Exporter::new(dir.path())
            .with_formats([ExportFormat::TriangulatedMesh])
            .run(&structures)?;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        let failure = report.failures().next().unwrap();
        assert!(matches!(failure.error(), Some(ExportError::MalformedInput(_))));
        assert!(dir.path().join("omega.stl").exists());
        Ok(())
    }
}
