//! Error types
//!
//! Defines the error returned by every file manager operation and the coarse
//! error taxonomy the shell renders messages from.

use std::fmt;
use std::io;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    NotEmpty,
    NotADirectory,
    MalformedArchive,
    OutsideRoot,
    InvalidInput,
    Io,
}

/// File manager operation errors
#[derive(Debug)]
pub enum FileManagerError {
    NotFound(String),
    AlreadyExists(String),
    NotEmpty(String),
    NotADirectory(String),
    MalformedArchive(String),
    OutsideRoot(String),
    InvalidInput(String),
    IoError(io::Error),
}

impl FileManagerError {
    /// Returns the taxonomy entry for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileManagerError::NotFound(_) => ErrorKind::NotFound,
            FileManagerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FileManagerError::NotEmpty(_) => ErrorKind::NotEmpty,
            FileManagerError::NotADirectory(_) => ErrorKind::NotADirectory,
            FileManagerError::MalformedArchive(_) => ErrorKind::MalformedArchive,
            FileManagerError::OutsideRoot(_) => ErrorKind::OutsideRoot,
            FileManagerError::InvalidInput(_) => ErrorKind::InvalidInput,
            FileManagerError::IoError(_) => ErrorKind::Io,
        }
    }

    /// Maps an IO error raised while acting on `path` to the closest variant.
    pub fn from_io(error: io::Error, path: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileManagerError::NotFound(path.into()),
            io::ErrorKind::AlreadyExists => FileManagerError::AlreadyExists(path.into()),
            io::ErrorKind::DirectoryNotEmpty => FileManagerError::NotEmpty(path.into()),
            io::ErrorKind::NotADirectory => FileManagerError::NotADirectory(path.into()),
            _ => FileManagerError::IoError(error),
        }
    }
}

impl fmt::Display for FileManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileManagerError::NotFound(p) => write!(f, "Not found: {}", p),
            FileManagerError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            FileManagerError::NotEmpty(p) => write!(f, "Directory not empty: {}", p),
            FileManagerError::NotADirectory(p) => write!(f, "Not a directory: {}", p),
            FileManagerError::MalformedArchive(msg) => write!(f, "Malformed archive: {}", msg),
            FileManagerError::OutsideRoot(p) => write!(f, "Path outside work root: {}", p),
            FileManagerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FileManagerError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FileManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileManagerError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FileManagerError {
    fn from(error: io::Error) -> Self {
        FileManagerError::IoError(error)
    }
}

impl From<zip::result::ZipError> for FileManagerError {
    fn from(error: zip::result::ZipError) -> Self {
        match error {
            zip::result::ZipError::Io(e) => FileManagerError::IoError(e),
            other => FileManagerError::MalformedArchive(other.to_string()),
        }
    }
}
