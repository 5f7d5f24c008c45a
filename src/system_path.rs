//! Filesystem helpers for data and temporary files.

use crate::configuration::constants::common::{SOURCE_DIR_MARKERS, TEMP_DIR_PREFIX};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn append<L: AsRef<Path>, R: AsRef<Path>>(left: L, right: R) -> PathBuf {
    left.as_ref().join(right)
}

pub fn join<I, S>(elements: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    elements.into_iter().fold(PathBuf::new(), |acc, e| acc.join(e))
}

/// Splits a path into its components, keeping the root as first element.
pub fn split<P: AsRef<Path>>(path: P) -> Vec<PathBuf> {
    path.as_ref()
        .components()
        .map(|c| PathBuf::from(c.as_os_str()))
        .collect()
}

pub fn make_directories<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Names of the entries directly inside `dir`.
pub fn read_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Directory of the running executable.
pub fn find_self_directory() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))
}

fn is_top_level_source_dir(path: &Path) -> bool {
    match read_files(path) {
        Ok(files) => SOURCE_DIR_MARKERS
            .iter()
            .all(|marker| files.iter().any(|f| f == marker)),
        Err(_) => false,
    }
}

/// Walks up from `start` to the first directory holding every source-tree
/// marker file.
pub fn find_top_level_source_dir<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .find(|dir| is_top_level_source_dir(dir))
        .map(Path::to_path_buf)
}

/// Replaces characters that are not portable in a path fragment.
pub fn create_valid_path_fragment(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | ' ' => '_',
            other => other,
        })
        .collect()
}

/// A fresh, not yet created, directory name under the system temp dir.
pub fn make_temporary_directory_name() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    std::env::temp_dir().join(format!("{}.{}.{}", TEMP_DIR_PREFIX, stamp, std::process::id()))
}
