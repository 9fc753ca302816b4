//! Navigate module
//!
//! Handles moving the session's current directory and listing it.

mod operations;
pub mod results;

// Re-export public types and functions
pub use operations::{change_directory, list_directory};
pub use results::CwdResult;
