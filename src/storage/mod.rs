//! File system storage management
//!
//! Handles file and directory operations, archives, quotas, and path validation.

pub mod archive;
pub mod operations;
pub mod quota;
pub mod results;
pub mod validation;

// Re-export commonly used validation functions
pub use validation::{is_within_root, resolve_path, resolve_within_root};
