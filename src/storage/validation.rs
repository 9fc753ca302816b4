//! Path validation
//!
//! Resolves caller-supplied paths against the session's current directory and
//! checks that the result stays inside the work root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::FileManagerError;

/// Symlink hops followed through dangling links before giving up.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve `candidate` relative to `base` into an absolute path.
///
/// `.` is dropped and `..` pops the previous segment. Every prefix that exists
/// on disk is canonicalized so symlinks are followed; once a segment does not
/// exist the remainder is appended lexically.
pub fn resolve_path(base: &Path, candidate: &Path) -> PathBuf {
    resolve_with_hops(base, candidate, 0)
}

fn resolve_with_hops(base: &Path, candidate: &Path, hops: usize) -> PathBuf {
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    };

    let mut resolved = PathBuf::new();
    let mut exists = true;

    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
                exists = fs::symlink_metadata(&resolved).is_ok();
            }
            Component::Normal(segment) => {
                resolved.push(segment);
                if !exists {
                    continue;
                }
                match resolved.canonicalize() {
                    Ok(canonical) => resolved = canonical,
                    Err(_) => {
                        // A dangling link still decides where a create would land.
                        if let Some(target) = dangling_link_target(&resolved) {
                            if hops < MAX_SYMLINK_HOPS {
                                let parent = resolved.parent().unwrap_or(Path::new("/"));
                                resolved = resolve_with_hops(parent, &target, hops + 1);
                            }
                        }
                        exists = false;
                    }
                }
            }
        }
    }

    resolved
}

fn dangling_link_target(path: &Path) -> Option<PathBuf> {
    let meta = fs::symlink_metadata(path).ok()?;
    if meta.file_type().is_symlink() {
        fs::read_link(path).ok()
    } else {
        None
    }
}

/// Containment check: does `candidate`, resolved against `base`, lie within `root`?
///
/// `root` must already be canonical. The comparison is segment-wise, so a
/// sibling such as `/data2` is never inside `/data`.
pub fn is_within_root(root: &Path, base: &Path, candidate: &Path) -> bool {
    resolve_path(base, candidate).starts_with(root)
}

/// Resolve `raw` and reject it unless it stays inside `root`.
pub fn resolve_within_root(
    root: &Path,
    base: &Path,
    raw: &str,
) -> Result<PathBuf, FileManagerError> {
    validate_input(raw)?;
    let resolved = resolve_path(base, Path::new(raw));
    if !resolved.starts_with(root) {
        return Err(FileManagerError::OutsideRoot(raw.into()));
    }
    Ok(resolved)
}

/// Validate that input is not empty and doesn't contain dangerous characters.
///
/// Length is bounded by the shell's configured `max_input_length`, not here.
pub fn validate_input(input: &str) -> Result<(), FileManagerError> {
    if input.trim().is_empty() {
        return Err(FileManagerError::InvalidInput("empty path".into()));
    }
    if input.contains('\0') || input.contains('\r') || input.contains('\n') {
        return Err(FileManagerError::InvalidInput(
            "control characters in path".into(),
        ));
    }
    Ok(())
}

/// Validate a bare name: one path segment, no separators, not `.` or `..`.
pub fn validate_name(name: &str) -> Result<(), FileManagerError> {
    validate_input(name)?;
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(FileManagerError::InvalidInput(format!(
            "'{}' is not a plain name",
            name
        ))),
    }
}
