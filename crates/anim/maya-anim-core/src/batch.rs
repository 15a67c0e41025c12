//! Batch driver: discover inputs, then parse, assemble and save each file.
//!
//! Files are independent. A format error or a failed save is recorded for
//! that file and the batch moves on; resource errors and (under
//! `abort_batch`) missing bones stop the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::assemble::Assembler;
use crate::channel::ChannelTable;
use crate::clip::ClipStore;
use crate::config::Config;
use crate::error::ImportError;
use crate::mapping::BonePathMapping;
use crate::parser::AnimParser;

/// One input file, read into memory before any parsing starts.
#[derive(Clone, Debug)]
pub struct BatchInput {
    /// File stem; used as document, clip and destination name.
    pub name: String,
    pub path: PathBuf,
    pub text: String,
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Names of the clips that were saved.
    pub converted: Vec<String>,
    /// Files that failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// Bones without a mapping entry, sorted.
    pub missing_bones: Vec<String>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.missing_bones.is_empty()
    }
}

/// Files directly inside `dir` with the given extension, sorted by path.
pub fn discover_inputs(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>, ImportError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ImportError::resource(dir, "not a directory"));
    }
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| ImportError::resource(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    log::debug!("found {} .{} file(s) in {}", out.len(), extension, dir.display());
    Ok(out)
}

/// Read every input up front; the first unreadable file fails the batch.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<BatchInput>, ImportError> {
    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|e| ImportError::resource(path, e))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(BatchInput {
                name,
                path: path.clone(),
                text,
            })
        })
        .collect()
}

/// Convert every input and hand the clips to `store`.
///
/// Returns `Err` only for batch-fatal errors; per-file failures are listed in
/// the report.
pub fn run_batch(
    inputs: &[BatchInput],
    table: &ChannelTable,
    mapping: &BonePathMapping,
    store: &mut dyn ClipStore,
    config: &Config,
) -> Result<BatchReport, ImportError> {
    let parser = AnimParser::new(table);
    let mut assembler = Assembler::new(mapping, config);
    let mut report = BatchReport::default();

    for input in inputs {
        let doc = match parser.parse(&input.name, &input.text) {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!("skipping {}: {err}", input.path.display());
                report.failed.push((input.name.clone(), err.to_string()));
                continue;
            }
        };

        let clip = assembler.assemble(doc)?;

        match store.save(&clip, &input.name) {
            Ok(()) => report.converted.push(input.name.clone()),
            Err(err) => {
                log::warn!("{err}");
                report.failed.push((input.name.clone(), err.to_string()));
            }
        }
    }

    report.missing_bones = assembler.missing_bones().map(str::to_string).collect();
    report.missing_bones.sort();
    log::info!(
        "converted {} of {} file(s)",
        report.converted.len(),
        inputs.len()
    );
    Ok(report)
}
