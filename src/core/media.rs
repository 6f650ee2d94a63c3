use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};
use crate::state::RawFile;

/// MIME type for a path, guessed from its extension.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Read a picked file into memory.
pub fn read_raw_file(path: &Path) -> MediaResult<RawFile> {
    let bytes = std::fs::read(path).map_err(|source| MediaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok(RawFile::new(name, guess_mime(path), bytes))
}

/// Read every picked path, keeping the pick order. Unreadable files are
/// logged and left out.
pub fn read_picked_files(paths: &[PathBuf]) -> Vec<RawFile> {
    paths
        .iter()
        .filter_map(|path| match read_raw_file(path) {
            Ok(file) => Some(file),
            Err(err) => {
                log::warn!("Failed to read picked file: {}", err);
                None
            }
        })
        .collect()
}

/// [`read_picked_files`] on the blocking pool.
pub async fn load_picked_files(paths: Vec<PathBuf>) -> Vec<RawFile> {
    match tokio::task::spawn_blocking(move || read_picked_files(&paths)).await {
        Ok(files) => files,
        Err(err) => {
            log::error!("File loading task failed: {}", err);
            Vec::new()
        }
    }
}
