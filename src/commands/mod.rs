//! Console commands
//!
//! Menu parsing, dispatch to the file manager, and text rendering.

pub mod handlers;
pub mod parser;
pub mod responses;

pub use handlers::{CommandResult, CommandStatus, handle_command};
pub use parser::{Command, MenuChoice, parse_menu_choice};
