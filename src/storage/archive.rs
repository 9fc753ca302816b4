//! Zip archives
//!
//! Packs a file or a directory tree into a zip file and unpacks a zip file
//! into a directory, both inside the work root.

use log::{debug, info, warn};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::FileManagerError;
use crate::storage::results::{ArchiveResult, ExtractResult};
use crate::storage::validation::{resolve_path, resolve_within_root};

const ARCHIVE_EXTENSION: &str = ".zip";

/// Packs `src` into a zip archive at `dest`.
///
/// `.zip` is appended to `dest` when it is missing. A directory source is
/// stored relative to itself; a file source becomes a single entry.
pub fn create_archive(
    root: &Path,
    cwd: &Path,
    src: &str,
    dest: &str,
) -> Result<ArchiveResult, FileManagerError> {
    let source = resolve_within_root(root, cwd, src)?;
    if !source.exists() {
        return Err(FileManagerError::NotFound(src.into()));
    }

    let dest = archive_name(dest);
    let archive = resolve_within_root(root, cwd, &dest)?;
    if archive.is_dir() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is a directory",
            dest
        )));
    }
    if archive == source {
        return Err(FileManagerError::InvalidInput(format!(
            "archive '{}' would overwrite its source",
            dest
        )));
    }

    let file = File::create(&archive).map_err(|e| FileManagerError::from_io(e, &dest))?;
    let mut writer = ZipWriter::new(file);

    let written = if source.is_dir() {
        pack_directory(&mut writer, &source, &archive)
    } else {
        pack_file(&mut writer, &source)
    };

    let entries = match written.and_then(|n| writer.finish().map(|_| n).map_err(Into::into)) {
        Ok(n) => n,
        Err(e) => {
            warn!("Removing partial archive {}: {}", archive.display(), e);
            let _ = fs::remove_file(&archive);
            return Err(e);
        }
    };

    info!(
        "Created archive {} from {} ({} entries)",
        archive.display(),
        source.display(),
        entries
    );
    Ok(ArchiveResult { archive, entries })
}

/// Unpacks the zip archive `src` into the directory `dest`, creating it if needed.
///
/// Every entry name is checked before anything is written; an entry that
/// would land outside `dest` makes the archive malformed.
pub fn extract_archive(
    root: &Path,
    cwd: &Path,
    src: &str,
    dest: &str,
) -> Result<ExtractResult, FileManagerError> {
    let archive_path = resolve_within_root(root, cwd, src)?;
    let destination = resolve_within_root(root, cwd, dest)?;

    if !archive_path.exists() {
        return Err(FileManagerError::NotFound(src.into()));
    }
    if archive_path.is_dir() {
        return Err(FileManagerError::InvalidInput(format!(
            "'{}' is a directory",
            src
        )));
    }

    let file = File::open(&archive_path).map_err(|e| FileManagerError::from_io(e, src))?;
    let mut archive = ZipArchive::new(file)?;

    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let relative = entry.enclosed_name().map(|p| p.to_path_buf()).ok_or_else(|| {
            FileManagerError::MalformedArchive(format!("unsafe entry name '{}'", entry.name()))
        })?;
        names.push(relative);
    }

    fs::create_dir_all(&destination).map_err(|e| FileManagerError::from_io(e, dest))?;
    let destination = destination.canonicalize()?;

    for (index, relative) in names.iter().enumerate() {
        let out = resolve_path(&destination, relative);
        if !out.starts_with(&destination) || !out.starts_with(root) {
            return Err(FileManagerError::OutsideRoot(relative.display().to_string()));
        }

        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut target = File::create(&out)?;
        io::copy(&mut entry, &mut target).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                FileManagerError::MalformedArchive(format!(
                    "corrupt entry '{}': {}",
                    relative.display(),
                    e
                ))
            }
            _ => FileManagerError::IoError(e),
        })?;
        debug!("Extracted {}", out.display());
    }

    info!(
        "Extracted {} entries from {} into {}",
        names.len(),
        archive_path.display(),
        destination.display()
    );
    Ok(ExtractResult {
        destination,
        entries: names.len(),
    })
}

/// Appends `.zip` unless the name already carries it.
pub fn archive_name(dest: &str) -> String {
    if dest.to_ascii_lowercase().ends_with(ARCHIVE_EXTENSION) {
        dest.to_string()
    } else {
        format!("{}{}", dest, ARCHIVE_EXTENSION)
    }
}

fn options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn pack_file(writer: &mut ZipWriter<File>, source: &Path) -> Result<usize, FileManagerError> {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| FileManagerError::InvalidInput("source has no file name".into()))?;

    writer.start_file(name, options())?;
    io::copy(&mut File::open(source)?, writer)?;
    Ok(1)
}

fn pack_directory(
    writer: &mut ZipWriter<File>,
    source: &Path,
    archive: &Path,
) -> Result<usize, FileManagerError> {
    let mut count = 0;

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io_err) => FileManagerError::IoError(io_err),
            None => FileManagerError::InvalidInput("filesystem loop while packing".into()),
        })?;
        let path = entry.path();
        if path == archive {
            continue;
        }

        let name = entry_name(path.strip_prefix(source).unwrap_or(path));
        let file_type = entry.file_type();

        if file_type.is_dir() {
            writer.add_directory(name, options())?;
        } else if file_type.is_file() {
            writer.start_file(name, options())?;
            io::copy(&mut File::open(path)?, writer)?;
        } else {
            debug!("Skipping non-regular entry {}", path.display());
            continue;
        }
        count += 1;
    }

    Ok(count)
}

/// Zip entry names always use `/` separators.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("work");
        fs::create_dir(&root).unwrap();
        let root = root.canonicalize().unwrap();
        (dir, root)
    }

    fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
        let mut files: Vec<(String, Vec<u8>)> = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = entry_name(e.path().strip_prefix(dir).unwrap());
                (rel, fs::read(e.path()).unwrap())
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_directory_round_trip() {
        let (_dir, root) = setup();
        let tree = root.join("project");
        fs::create_dir_all(tree.join("src/nested")).unwrap();
        fs::create_dir_all(tree.join("empty")).unwrap();
        fs::write(tree.join("README"), "read me").unwrap();
        fs::write(tree.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(tree.join("src/nested/data.bin"), [0u8, 1, 2, 255]).unwrap();

        let packed = create_archive(&root, &root, "project", "project_backup").unwrap();
        assert_eq!(packed.archive, root.join("project_backup.zip"));
        assert_eq!(packed.entries, 6);

        let unpacked = extract_archive(&root, &root, "project_backup.zip", "restored").unwrap();
        assert_eq!(unpacked.entries, 6);

        assert_eq!(snapshot(&tree), snapshot(&root.join("restored")));
        assert!(root.join("restored/empty").is_dir());
    }

    #[test]
    fn test_single_file_archive() {
        let (_dir, root) = setup();
        fs::write(root.join("note.txt"), "text").unwrap();

        let packed = create_archive(&root, &root, "note.txt", "note.zip").unwrap();
        assert_eq!(packed.entries, 1);

        extract_archive(&root, &root, "note.zip", "out").unwrap();
        assert_eq!(fs::read_to_string(root.join("out/note.txt")).unwrap(), "text");
    }

    #[test]
    fn test_archive_inside_source_is_not_packed_into_itself() {
        let (_dir, root) = setup();
        fs::write(root.join("a.txt"), "a").unwrap();

        let packed = create_archive(&root, &root, ".", "self").unwrap();
        assert_eq!(packed.entries, 1);
    }

    #[test]
    fn test_archive_onto_its_own_source_is_rejected() {
        let (_dir, root) = setup();
        fs::write(root.join("data.zip"), "original bytes").unwrap();

        for dest in ["data.zip", "./data.zip", "data"] {
            let err = create_archive(&root, &root, "data.zip", dest).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(
            fs::read_to_string(root.join("data.zip")).unwrap(),
            "original bytes"
        );
    }

    #[test]
    fn test_missing_source() {
        let (_dir, root) = setup();
        let err = create_archive(&root, &root, "nothing", "out").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!root.join("out.zip").exists());

        let err = extract_archive(&root, &root, "nothing.zip", "out").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_archive() {
        let (_dir, root) = setup();
        fs::write(root.join("broken.zip"), "definitely not a zip file").unwrap();

        let err = extract_archive(&root, &root, "broken.zip", "out").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedArchive);
    }

    #[test]
    fn test_zip_slip_entry_is_rejected() {
        let (dir, root) = setup();
        let file = File::create(root.join("evil.zip")).unwrap();
        let mut writer = ZipWriter::new(file);
        writer.start_file("../escaped.txt", options()).unwrap();
        writer.write_all(b"gotcha").unwrap();
        writer.finish().unwrap();

        let err = extract_archive(&root, &root, "evil.zip", "out").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedArchive);
        assert!(!root.join("escaped.txt").exists());
        assert!(!dir.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_extract_outside_root_is_rejected() {
        let (dir, root) = setup();
        fs::write(root.join("a.txt"), "a").unwrap();
        create_archive(&root, &root, "a.txt", "a").unwrap();

        let err = extract_archive(&root, &root, "a.zip", "../outside").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideRoot);
        assert!(!dir.path().join("outside").exists());
    }

    #[test]
    fn test_create_archive_outside_root_is_rejected() {
        let (dir, root) = setup();
        fs::write(root.join("a.txt"), "a").unwrap();

        let err = create_archive(&root, &root, "a.txt", "../leak").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutsideRoot);
        assert!(!dir.path().join("leak.zip").exists());
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(archive_name("backup"), "backup.zip");
        assert_eq!(archive_name("backup.zip"), "backup.zip");
        assert_eq!(archive_name("BACKUP.ZIP"), "BACKUP.ZIP");
    }
}
