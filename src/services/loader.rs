use crate::domain::models::Document;
use crate::error::LintError;
use crate::services::config::ScanConfig;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Reads every document under `paths`. Explicit files are always included;
/// directories contribute files with a configured extension.
pub fn collect_documents(paths: &[PathBuf], scan: &ScanConfig) -> Result<Vec<Document>, LintError> {
    let mut files = Vec::new();
    for root in paths {
        if !root.exists() {
            return Err(LintError::PathNotFound(root.clone()));
        }
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_excluded(e, &scan.exclude))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), &scan.extensions) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();

    tracing::debug!(count = files.len(), "collected documents");
    Ok(files.iter().map(|p| read_document(p)).collect())
}

pub fn read_document(path: &Path) -> Document {
    match std::fs::read_to_string(path) {
        Ok(text) => Document::new(path, text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read document");
            Document::unreadable(path, e.to_string())
        }
    }
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| exclude.iter().any(|x| x == name))
            .unwrap_or(false)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
