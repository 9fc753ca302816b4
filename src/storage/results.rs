//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

/// Result of creating or deleting a directory
#[derive(Debug, Clone)]
pub struct DirectoryResult {
    pub path: PathBuf,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Result of a directory listing operation
#[derive(Debug, Clone)]
pub struct ListResult {
    pub path: PathBuf,
    pub entries: Vec<EntryInfo>,
}

impl ListResult {
    /// Entry names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Result of creating or deleting a file
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
}

/// Result of reading a file as text
#[derive(Debug, Clone)]
pub struct ReadResult {
    pub path: PathBuf,
    pub content: String,
}

/// Result of writing text to a file
#[derive(Debug, Clone)]
pub struct WriteResult {
    pub path: PathBuf,
    pub bytes_written: usize,
    pub created: bool,
}

/// Result of a copy, move or rename
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of ensuring a user directory exists
#[derive(Debug, Clone)]
pub struct UserDirResult {
    pub username: String,
    pub path: PathBuf,
    pub created: bool,
}

/// Result of packing an archive
#[derive(Debug, Clone)]
pub struct ArchiveResult {
    pub archive: PathBuf,
    pub entries: usize,
}

/// Result of unpacking an archive
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub destination: PathBuf,
    pub entries: usize,
}
