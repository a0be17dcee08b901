use crate::error::AppError;
use crate::metadata::{assemble, sidecar_path};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeResult {
    Success,
    Failure,
}

impl fmt::Display for OutcomeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeResult::Success => f.write_str("Success"),
            OutcomeResult::Failure => f.write_str("Failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub file: PathBuf,
    pub result: OutcomeResult,
    /// Empty unless `result` is `Failure`.
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total_inputs: usize,
    pub unique_inputs: usize,
    /// One entry per unique input, in first-seen order.
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result == OutcomeResult::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Receives batch lifecycle events from a [`BatchRunner`].
pub trait BatchReporter {
    fn batch_started(&self, total: usize, unique: usize);
    fn file_succeeded(&self, path: &Path, sidecar: &Path);
    fn file_failed(&self, path: &Path, error: &AppError);
    fn batch_finished(&self, succeeded: usize, unique: usize);
}

/// Forwards batch events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl BatchReporter for LogReporter {
    fn batch_started(&self, total: usize, unique: usize) {
        log::info!("Processing {} files. Found {} unique files.", total, unique);
    }

    fn file_succeeded(&self, path: &Path, sidecar: &Path) {
        log::debug!("Wrote metadata for {:?} to {:?}", path, sidecar);
    }

    fn file_failed(&self, path: &Path, error: &AppError) {
        log::error!("Error occurred processing {:?} ({:?}): {}", path, error.kind(), error);
    }

    fn batch_finished(&self, succeeded: usize, unique: usize) {
        log::info!(
            "{} out of {} unique files were successfully processed.",
            succeeded,
            unique
        );
    }
}

pub struct BatchRunner<'a> {
    reporter: &'a dyn BatchReporter,
    pretty_json: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(reporter: &'a dyn BatchReporter) -> Self {
        Self {
            reporter,
            pretty_json: false,
        }
    }

    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Writes a sidecar for every unique path, then the optional report.
    ///
    /// A failing file is recorded in its outcome and never stops the batch.
    /// Only a failure to write the report is returned as an error.
    pub fn run(
        &self,
        paths: &[PathBuf],
        report_path: Option<&Path>,
    ) -> Result<BatchSummary, AppError> {
        let unique = dedup_paths(paths);
        self.reporter.batch_started(paths.len(), unique.len());

        let outcomes: Vec<BatchOutcome> = unique
            .iter()
            .map(|path| match self.process_file(path) {
                Ok(sidecar) => {
                    self.reporter.file_succeeded(path, &sidecar);
                    BatchOutcome {
                        file: path.to_path_buf(),
                        result: OutcomeResult::Success,
                        error: String::new(),
                    }
                }
                Err(e) => {
                    self.reporter.file_failed(path, &e);
                    BatchOutcome {
                        file: path.to_path_buf(),
                        result: OutcomeResult::Failure,
                        error: e.to_string(),
                    }
                }
            })
            .collect();

        let summary = BatchSummary {
            total_inputs: paths.len(),
            unique_inputs: unique.len(),
            outcomes,
        };
        self.reporter
            .batch_finished(summary.succeeded(), summary.unique_inputs);

        if let Some(report_path) = report_path {
            let writer = BufWriter::new(File::create(report_path)?);
            write_report(&summary.outcomes, writer)?;
        }

        Ok(summary)
    }

    fn process_file(&self, path: &Path) -> Result<PathBuf, AppError> {
        if !path.exists() {
            return Err(AppError::NotFound(path.to_path_buf()));
        }

        let record = assemble(path)?;
        let sidecar = sidecar_path(path);
        fs::write(&sidecar, record.to_json(self.pretty_json)?)?;
        Ok(sidecar)
    }
}

/// Unique paths, keeping the position of each path's first occurrence.
fn dedup_paths(paths: &[PathBuf]) -> Vec<&Path> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| seen.insert(*path))
        .collect()
}

/// Writes the `File, Result, Error` report, one line per outcome.
pub fn write_report<W: Write>(outcomes: &[BatchOutcome], mut writer: W) -> std::io::Result<()> {
    write!(writer, "File, Result, Error {}", LINE_ENDING)?;

    for outcome in outcomes {
        write!(
            writer,
            "{}, {}, {} {}",
            outcome.file.display(),
            outcome.result,
            outcome.error,
            LINE_ENDING
        )?;
    }

    writer.flush()
}
