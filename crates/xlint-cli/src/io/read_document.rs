use std::fs;
use std::path::{Path, PathBuf};

/// A document file and its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadDocumentError {
    #[error("path does not exist `{0}`")]
    NotFound(String),
    #[error("read_dir failed `{path}`: {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Expands the inputs into document files. Files named directly are kept whatever their
/// extension; directories contribute their `.json`, `.yaml` and `.yml` files, sorted.
pub fn collect_document_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ReadDocumentError> {
    let mut collected = Vec::new();
    for input in inputs {
        if input.is_file() {
            collected.push(input.clone());
        } else if input.is_dir() {
            let mut found = collect_directory(input.as_path())?;
            found.sort();
            collected.extend(found);
        } else {
            return Err(ReadDocumentError::NotFound(input.display().to_string()));
        }
    }
    Ok(collected)
}

pub fn read_documents(inputs: &[PathBuf]) -> Result<Vec<SourceDocument>, ReadDocumentError> {
    collect_document_paths(inputs)?
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path).map_err(|source| ReadDocumentError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            Ok(SourceDocument { path, text })
        })
        .collect()
}

fn collect_directory(root: &Path) -> Result<Vec<PathBuf>, ReadDocumentError> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| ReadDocumentError::ReadDir {
            path: current.display().to_string(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| ReadDocumentError::ReadDir {
                path: current.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_document_candidate(path.as_path()) {
                found.push(path);
            }
        }
    }
    Ok(found)
}

fn is_document_candidate(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("json") | Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
#[path = "read_document_test.rs"]
mod tests;
