pub mod commands;
pub mod config;
pub mod error;
pub mod manager;
pub mod navigate;
pub mod session;
pub mod shell;
pub mod storage;

pub use manager::FileManager;
