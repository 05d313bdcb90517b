//! Locating documents on disk and splitting them into lines.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Expands files and directories into the documents to outline.
///
/// Explicit file paths are kept as given. Directories are walked recursively and
/// contribute files whose extension appears in `extensions`. Entries are visited in
/// file name order so the file list is stable between runs.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_directory(&path, extensions, &mut documents)?;
        } else if path.is_file() {
            documents.push(path);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", path.display()),
            ));
        }
    }

    Ok(documents)
}

fn walk_directory(dir: &Path, extensions: &[String], documents: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            debug!(path = %entry.path().display(), "matched document");
            documents.push(entry.into_path());
        }
    }

    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

#[must_use]
/// Splits document text into lines without their terminators.
///
/// A trailing newline does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(ToString::to_string).collect()
}

/// Reads a document and splits it into lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    fs::read_to_string(path).map(|text| split_lines(&text))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
