//! Navigation operations implementation

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::FileManagerError;
use crate::navigate::results::CwdResult;
use crate::storage::results::{EntryInfo, ListResult};
use crate::storage::validation::resolve_within_root;

/// Resolves a new current directory for the session.
///
/// The target must exist, be a directory and stay inside the work root.
pub fn change_directory(
    root: &Path,
    cwd: &Path,
    target_path: &str,
) -> Result<CwdResult, FileManagerError> {
    let new_path = resolve_within_root(root, cwd, target_path)?;

    if !new_path.exists() {
        return Err(FileManagerError::NotFound(target_path.into()));
    }

    if !new_path.is_dir() {
        return Err(FileManagerError::NotADirectory(target_path.into()));
    }

    info!("Changed directory to {}", new_path.display());
    Ok(CwdResult { new_path })
}

/// Lists the immediate entries of `cwd`, sorted by name.
pub fn list_directory(cwd: &Path) -> Result<ListResult, FileManagerError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(cwd).map_err(|e| FileManagerError::from_io(e, &cwd.to_string_lossy()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        match entry.metadata() {
            Ok(metadata) => entries.push(EntryInfo {
                name,
                is_dir: metadata.is_dir(),
                size: if metadata.is_dir() { 0 } else { metadata.len() },
            }),
            Err(e) => {
                debug!("No metadata for {}: {}", name, e);
                entries.push(EntryInfo {
                    name,
                    is_dir: false,
                    size: 0,
                });
            }
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    info!("Listed directory {} - {} entries", cwd.display(), entries.len());
    Ok(ListResult {
        path: cwd.to_path_buf(),
        entries,
    })
}
