//! CLI logic for the reqmig migration tool.
//!
//! This module contains the batch driver: it enumerates legacy module
//! documents, migrates each one and writes the result to the output
//! directory. A document that fails is reported and skipped.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use log::{error, info};
use serde_json::Value;

use reqmig::{MigrationError, Migrator, model::Module};

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    processed: usize,
    work_items: usize,
    skipped: Vec<PathBuf>,
    elapsed: Duration,
}

impl BatchSummary {
    /// Number of documents migrated and written.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Total artifacts, including all descendants, across migrated documents.
    pub fn work_items(&self) -> usize {
        self.work_items
    }

    /// Documents that could not be read, decoded or written.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether every document was migrated.
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Run the reqmig CLI application
///
/// This function migrates every input document and writes each result,
/// under its input file name, into the output directory.
///
/// # Errors
///
/// Returns `MigrationError` for failures that abort the whole batch:
/// - Configuration loading errors
/// - An unreadable input directory
/// - An output directory that cannot be created
///
/// Failures of individual documents are logged and recorded in the
/// returned [`BatchSummary`] instead.
pub fn run(args: &Args) -> Result<BatchSummary, MigrationError> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Migrating modules"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let migrator = Migrator::new(app_config);

    let inputs = collect_inputs(Path::new(&args.input))?;
    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)?;

    let started = Instant::now();
    let mut summary = BatchSummary::default();

    for input in inputs {
        match migrate_file(&migrator, &input, output_dir) {
            Ok(work_items) => {
                summary.processed += 1;
                summary.work_items += work_items;
            }
            Err(err) => {
                error!(
                    path = input.display().to_string();
                    "Skipping document\n{}",
                    error_adapter::render(&err)
                );
                summary.skipped.push(input);
            }
        }
    }

    summary.elapsed = started.elapsed();
    info!(
        files = summary.processed,
        work_items = summary.work_items,
        seconds = summary.elapsed.as_secs_f64(),
        skipped = summary.skipped.len();
        "Migration finished"
    );

    Ok(summary)
}

/// Lists the documents to migrate.
///
/// A directory yields its `*.json` files, sorted by name, without
/// descending into subdirectories. Any other path is taken as one document.
fn collect_inputs(input: &Path) -> io::Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Migrates one document and returns its work item count.
fn migrate_file(
    migrator: &Migrator,
    input: &Path,
    output_dir: &Path,
) -> Result<usize, MigrationError> {
    let started = Instant::now();

    let file_name = input.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", input.display()),
        )
    })?;

    let source = fs::read_to_string(input)?;
    let module = migrator.transform_str(&source)?;
    let rendered = migrator.render(&module)?;
    fs::write(output_dir.join(file_name), rendered)?;

    let work_items = module.work_item_count();
    info!(
        title = module_title(&module),
        work_items,
        seconds = started.elapsed().as_secs_f64();
        "Module migrated"
    );

    Ok(work_items)
}

/// Display title of a module.
fn module_title(module: &Module) -> String {
    match &module.module_title {
        Some(Value::String(title)) => title.clone(),
        Some(Value::Null) | None => "Unknown Title".to_string(),
        Some(other) => other.to_string(),
    }
}
