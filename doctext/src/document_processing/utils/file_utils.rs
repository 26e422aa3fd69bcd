// File utilities for document processing

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::document_processing::DocumentFormat;

/// Find every file with a supported extension under `base_dir`, sorted by path
pub fn find_supported_files(base_dir: impl AsRef<Path>, recursive: bool) -> Vec<PathBuf> {
    walk_supported_files(base_dir.as_ref(), recursive, None)
}

fn walk_supported_files(base_dir: &Path, recursive: bool, skip_dir: Option<&Path>) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(base_dir)
        .follow_links(true)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry, skip_dir))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(dir = %base_dir.display(), "skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| DocumentFormat::is_supported(path))
        .collect();

    files.sort();
    files
}

fn is_skipped_dir(entry: &DirEntry, skip_dir: Option<&Path>) -> bool {
    match skip_dir {
        Some(skip_dir) if entry.file_type().is_dir() => fs::canonicalize(entry.path())
            .map_or(false, |path| path == skip_dir),
        _ => false,
    }
}

/// Expand directory inputs into the supported files beneath them.
///
/// Everything else, including paths that do not exist, is passed through
/// unchanged and in order, so it can fail on its own during conversion.
/// Files under `output_dir` are never picked up by expansion, so rerunning
/// over a tree that contains the output directory does not convert earlier
/// outputs again.
pub fn expand_inputs<P: AsRef<Path>>(
    inputs: &[P],
    recursive: bool,
    output_dir: impl AsRef<Path>,
) -> Vec<PathBuf> {
    // Not created yet means nothing to skip
    let skip_dir = fs::canonicalize(output_dir.as_ref()).ok();
    let mut expanded = Vec::with_capacity(inputs.len());

    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let found = walk_supported_files(input, recursive, skip_dir.as_deref());
            tracing::debug!(dir = %input.display(), files = found.len(), "expanded directory input");
            expanded.extend(found);
        } else {
            expanded.push(input.to_path_buf());
        }
    }

    expanded
}

/// Create directory if it doesn't exist
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Save JSON to file
pub fn save_json<T: serde::Serialize>(
    data: &T,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<()> {
    let output_path = output_path.as_ref();

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        ensure_dir_exists(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON file: {}", output_path.display()))?;

    Ok(())
}
