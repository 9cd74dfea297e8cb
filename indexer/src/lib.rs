use anyhow::{bail, Result};
use search_core::{DocId, IndexEngine, IngestError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Default, Serialize)]
pub struct IngestSummary {
    pub ingested: Vec<DocId>,
    /// Files that produced no index terms.
    pub rejected: Vec<PathBuf>,
}

/// Ingest every `.txt` file under `input` (a directory or a single file) in
/// sorted path order. Titles are file stems and filenames are file names.
pub fn ingest_dir(engine: &mut IndexEngine, input: &Path) -> Result<IngestSummary> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut summary = IngestSummary::default();
    for file in files {
        match ingest_file(engine, &file)? {
            Ok(doc_id) => summary.ingested.push(doc_id),
            Err(IngestError::EmptyContent) => {
                tracing::warn!(path = %file.display(), "skipping file without indexable text");
                summary.rejected.push(file);
            }
        }
    }
    tracing::info!(ingested = summary.ingested.len(), rejected = summary.rejected.len(), "ingested corpus");
    Ok(summary)
}

fn ingest_file(engine: &mut IndexEngine, file: &Path) -> Result<Result<DocId, IngestError>> {
    let bytes = fs::read(file)?;
    let content = String::from_utf8_lossy(&bytes);
    let title = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let filename = file.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    Ok(engine.ingest(title, &content, filename))
}
