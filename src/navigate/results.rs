//! Result types for navigate operations

use std::path::PathBuf;

/// Result of a change directory operation
#[derive(Debug, Clone)]
pub struct CwdResult {
    pub new_path: PathBuf,
}
