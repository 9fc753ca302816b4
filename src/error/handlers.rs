//! Error handlers
//!
//! Logs failed operations at a level matching how surprising they are.

use crate::error::types::{ErrorKind, FileManagerError};
use log::{error, warn};

/// Log a failed operation
pub fn handle_error(operation: &str, err: &FileManagerError) {
    match err.kind() {
        ErrorKind::Io => error!("{} failed: {}", operation, err),
        _ => warn!("{} rejected: {}", operation, err),
    }
}
