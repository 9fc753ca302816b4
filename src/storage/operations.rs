//! Storage operations
//!
//! Directory and file operations confined to the work root. Every function
//! takes the canonical work root, the session's current directory, and the
//! caller-supplied path strings.

use log::{debug, info};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FileManagerError;
use crate::storage::results::{
    DirectoryResult, FileResult, ReadResult, TransferResult, UserDirResult, WriteResult,
};
use crate::storage::validation::{resolve_path, resolve_within_root, validate_name};

/// Creates a single directory (parents are not created)
pub fn create_directory(
    root: &Path,
    cwd: &Path,
    dir_name: &str,
) -> Result<DirectoryResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, dir_name)?;

    fs::create_dir(&path).map_err(|e| FileManagerError::from_io(e, dir_name))?;

    info!("Created directory {} (real: {})", dir_name, path.display());
    Ok(DirectoryResult { path })
}

/// Removes an empty directory
pub fn delete_directory(
    root: &Path,
    cwd: &Path,
    dir_name: &str,
) -> Result<DirectoryResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, dir_name)?;

    if path == root {
        return Err(FileManagerError::InvalidInput(
            "the work root cannot be deleted".into(),
        ));
    }

    fs::remove_dir(&path).map_err(|e| FileManagerError::from_io(e, dir_name))?;

    info!("Deleted directory {} (real: {})", dir_name, path.display());
    Ok(DirectoryResult { path })
}

/// Creates a new empty file, failing if it already exists
pub fn create_file(
    root: &Path,
    cwd: &Path,
    file_name: &str,
) -> Result<FileResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, file_name)?;

    File::options()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| FileManagerError::from_io(e, file_name))?;

    info!("Created file {} (real: {})", file_name, path.display());
    Ok(FileResult { path })
}

/// Reads a whole file as UTF-8 text
pub fn read_file(
    root: &Path,
    cwd: &Path,
    file_name: &str,
) -> Result<ReadResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, file_name)?;

    if path.is_dir() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is a directory",
            file_name
        )));
    }

    let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => {
            FileManagerError::InvalidInput(format!("'{}' is not a text file", file_name))
        }
        _ => FileManagerError::from_io(e, file_name),
    })?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(ReadResult { path, content })
}

/// Replaces a file's content with `content`, creating the file when missing.
///
/// Fails with not-found only when the parent directory does not exist.
pub fn write_file(
    root: &Path,
    cwd: &Path,
    file_name: &str,
    content: &str,
) -> Result<WriteResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, file_name)?;

    if path.is_dir() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is a directory",
            file_name
        )));
    }

    let created = !path.exists();
    fs::write(&path, content).map_err(|e| FileManagerError::from_io(e, file_name))?;

    info!(
        "Wrote {} bytes to {} (real: {}, created: {})",
        content.len(),
        file_name,
        path.display(),
        created
    );
    Ok(WriteResult {
        path,
        bytes_written: content.len(),
        created,
    })
}

/// Removes a file
pub fn delete_file(
    root: &Path,
    cwd: &Path,
    file_name: &str,
) -> Result<FileResult, FileManagerError> {
    let path = resolve_within_root(root, cwd, file_name)?;

    if path.is_dir() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is a directory",
            file_name
        )));
    }

    fs::remove_file(&path).map_err(|e| FileManagerError::from_io(e, file_name))?;

    info!("Deleted file {} (real: {})", file_name, path.display());
    Ok(FileResult { path })
}

/// Copies a file with its permissions and timestamps.
///
/// When `dest` names an existing directory the file keeps its name inside it.
pub fn copy_file(
    root: &Path,
    cwd: &Path,
    src: &str,
    dest: &str,
) -> Result<TransferResult, FileManagerError> {
    let from = resolve_within_root(root, cwd, src)?;

    if !from.exists() {
        return Err(FileManagerError::NotFound(src.into()));
    }
    if !from.is_file() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is not a regular file",
            src
        )));
    }

    let to = destination_path(root, cwd, &from, dest)?;
    if to == from {
        return Err(FileManagerError::InvalidInput(
            "source and destination are the same file".into(),
        ));
    }

    copy_with_metadata(&from, &to).map_err(|e| FileManagerError::from_io(e, dest))?;

    info!("Copied {} -> {}", from.display(), to.display());
    Ok(TransferResult { from, to })
}

/// Moves a file or directory, falling back to copy+remove across filesystems.
///
/// When `dest` names an existing directory the entry keeps its name inside it.
pub fn move_file(
    root: &Path,
    cwd: &Path,
    src: &str,
    dest: &str,
) -> Result<TransferResult, FileManagerError> {
    let from = resolve_within_root(root, cwd, src)?;

    if fs::symlink_metadata(&from).is_err() {
        return Err(FileManagerError::NotFound(src.into()));
    }
    if from == root {
        return Err(FileManagerError::InvalidInput(
            "the work root cannot be moved".into(),
        ));
    }

    let to = destination_path(root, cwd, &from, dest)?;
    if to == from {
        return Err(FileManagerError::InvalidInput(
            "source and destination are the same".into(),
        ));
    }

    match fs::rename(&from, &to) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && from.is_file() => {
            debug!("Rename across filesystems, copying {}", from.display());
            copy_with_metadata(&from, &to).map_err(|e| FileManagerError::from_io(e, dest))?;
            fs::remove_file(&from).map_err(|e| FileManagerError::from_io(e, src))?;
        }
        Err(e) => return Err(FileManagerError::from_io(e, dest)),
    }

    info!("Moved {} -> {}", from.display(), to.display());
    Ok(TransferResult { from, to })
}

/// Renames an entry inside its own directory.
///
/// `new_name` must be a plain name; an existing target is never overwritten.
pub fn rename_file(
    root: &Path,
    cwd: &Path,
    old_name: &str,
    new_name: &str,
) -> Result<TransferResult, FileManagerError> {
    validate_name(new_name)?;
    let from = resolve_within_root(root, cwd, old_name)?;

    if fs::symlink_metadata(&from).is_err() {
        return Err(FileManagerError::NotFound(old_name.into()));
    }

    let parent = match from.parent() {
        Some(parent) if from != root => parent,
        _ => {
            return Err(FileManagerError::InvalidInput(
                "the work root cannot be renamed".into(),
            ));
        }
    };

    let to = parent.join(new_name);
    if fs::symlink_metadata(&to).is_ok() {
        return Err(FileManagerError::AlreadyExists(new_name.into()));
    }

    fs::rename(&from, &to).map_err(|e| FileManagerError::from_io(e, old_name))?;

    info!("Renamed {} -> {}", from.display(), to.display());
    Ok(TransferResult { from, to })
}

/// Makes sure `<root>/<username>` exists; idempotent.
pub fn ensure_user_directory(
    root: &Path,
    username: &str,
) -> Result<UserDirResult, FileManagerError> {
    validate_name(username)?;
    let path = root.join(username);

    if path.is_dir() {
        info!("Directory for user '{}' already exists", username);
        return Ok(UserDirResult {
            username: username.into(),
            path,
            created: false,
        });
    }
    if fs::symlink_metadata(&path).is_ok() {
        return Err(FileManagerError::NotADirectory(username.into()));
    }

    let created = match fs::create_dir(&path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => false,
        Err(e) => return Err(FileManagerError::from_io(e, username)),
    };

    info!(
        "Ensured directory for user '{}' (real: {}, created: {})",
        username,
        path.display(),
        created
    );
    Ok(UserDirResult {
        username: username.into(),
        path,
        created,
    })
}

/// Resolves a copy/move destination, descending into it when it is a directory.
fn destination_path(
    root: &Path,
    cwd: &Path,
    from: &Path,
    dest: &str,
) -> Result<PathBuf, FileManagerError> {
    let to = resolve_within_root(root, cwd, dest)?;
    if !to.is_dir() {
        return Ok(to);
    }

    let file_name = from
        .file_name()
        .ok_or_else(|| FileManagerError::InvalidInput("source has no file name".into()))?;
    let inside = resolve_path(&to, Path::new(file_name));
    if !inside.starts_with(root) {
        return Err(FileManagerError::OutsideRoot(dest.into()));
    }
    Ok(inside)
}

fn copy_with_metadata(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;

    let meta = fs::metadata(from)?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    File::options().write(true).open(to)?.set_times(times)
}
