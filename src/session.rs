//! Module `session`
//!
//! Holds the state of one interactive session: the canonical work root and
//! the current directory relative paths are resolved against.

use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// State of the operator's session.
///
/// The current directory is tracked here rather than in the process, so two
/// sessions never observe each other's navigation.
#[derive(Debug, Clone)]
pub struct Session {
    work_root: PathBuf,
    current_dir: PathBuf,
}

impl Session {
    /// Opens a session rooted at `work_root`, creating the directory if needed.
    ///
    /// The session starts in the work root itself.
    pub fn open(work_root: &Path) -> io::Result<Self> {
        if !work_root.exists() {
            warn!("Work root {} missing, creating it", work_root.display());
            fs::create_dir_all(work_root)?;
        }

        let work_root = work_root.canonicalize()?;
        if !work_root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("work root {} is not a directory", work_root.display()),
            ));
        }

        info!("Work root directory: {}", work_root.display());
        Ok(Self {
            current_dir: work_root.clone(),
            work_root,
        })
    }

    /// Returns the canonical work root.
    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    /// Returns the current directory.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Sets the current directory. Callers validate containment first.
    pub fn set_current_dir(&mut self, path: PathBuf) {
        self.current_dir = path;
    }
}
