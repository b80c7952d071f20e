use crate::error::{PdfDecryptError, Result};
use fast_glob::glob_match;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Shell glob matched against file names in the source directory
pub const PDF_PATTERN: &str = "*.pdf";

/// List the files to process.
///
/// An explicit file is returned as-is, without checking that it exists.
/// Otherwise every entry directly inside `source_dir` matching [`PDF_PATTERN`]
/// is returned, sorted by path.
pub fn discover(file: Option<&Path>, source_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    if let Some(file) = file {
        return Ok(vec![file.to_path_buf()]);
    }

    let source_dir = source_dir.as_ref();
    let entries = match fs::read_dir(source_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Source directory {} does not exist", source_dir.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PdfDecryptError::Discovery {
                path: source_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PdfDecryptError::Discovery {
            path: source_dir.to_path_buf(),
            source,
        })?;

        if is_pdf_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

fn is_pdf_name(name: &str) -> bool {
    glob_match(PDF_PATTERN, name)
}
