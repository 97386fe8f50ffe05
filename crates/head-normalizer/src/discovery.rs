use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::NormalizeError;

/// Lazily enumerate every file under `root` whose name ends in `.{extension}`.
///
/// Recurses into subdirectories. Entries are visited in file-name order so
/// logs read the same between runs, but nothing downstream depends on it.
/// Each call starts a fresh walk. Unreadable entries surface as
/// [`NormalizeError::Walk`] items and do not end the walk.
pub fn discover(
    root: &Path,
    extension: &str,
) -> Result<impl Iterator<Item = Result<PathBuf, NormalizeError>>, NormalizeError> {
    if !root.is_dir() {
        return Err(NormalizeError::RootNotFound(root.to_path_buf()));
    }

    let suffix = format!(".{}", extension.trim_start_matches('.')).to_ascii_lowercase();
    let walk_root = root.to_path_buf();

    let files = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    return None;
                }
                let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
                name.ends_with(&suffix).then(|| Ok(entry.into_path()))
            }
            Err(source) => Some(Err(NormalizeError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| walk_root.clone()),
                source,
            })),
        });

    Ok(files)
}
