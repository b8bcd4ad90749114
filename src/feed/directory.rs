use crate::feed::filter::is_json_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Feed files under `dir`, sorted by path. Only the top level is listed
/// unless `recursive` is set.
pub fn find_json_files(dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a directory"));
    }

    let walker = WalkDir::new(dir).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    let mut json_files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if is_json_file(entry.path()) {
            json_files.push(entry.into_path());
        }
    }

    json_files.sort();
    Ok(json_files)
}
