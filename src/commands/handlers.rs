//! Command handlers
//!
//! Runs a parsed `Command` against the `FileManager` and renders the outcome.
//! Errors never escape: each one becomes a failure status plus a message.

use log::info;

use crate::commands::parser::Command;
use crate::commands::responses;
use crate::error::handlers::handle_error;
use crate::error::{ErrorKind, FileManagerError};
use crate::manager::FileManager;
use crate::storage::archive::archive_name;

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(ErrorKind),
    Exit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

impl CommandResult {
    fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message,
        }
    }
}

/// Dispatches a command to the matching `FileManager` operation.
pub fn handle_command(manager: &mut FileManager, command: &Command) -> CommandResult {
    info!("Executing {:?}", command);

    match run(manager, command) {
        Ok(result) => result,
        Err(err) => {
            handle_error(&format!("{:?}", command), &err);
            CommandResult {
                status: CommandStatus::Failure(err.kind()),
                message: responses::error(command, &err),
            }
        }
    }
}

fn run(manager: &mut FileManager, command: &Command) -> Result<CommandResult, FileManagerError> {
    let message = match command {
        Command::CreateDirectory(name) => {
            manager.create_directory(name)?;
            format!("Директория '{}' создана.", name)
        }
        Command::DeleteDirectory(name) => {
            manager.delete_directory(name)?;
            format!("Директория '{}' удалена.", name)
        }
        Command::ListDirectory => responses::listing(&manager.list_directory()?),
        Command::ChangeDirectory(name) => {
            manager.change_directory(name)?;
            format!("Перешли в директорию '{}'.", name)
        }
        Command::CreateFile(name) => {
            manager.create_file(name)?;
            format!("Файл '{}' создан.", name)
        }
        Command::ReadFile(name) => {
            let result = manager.read_file(name)?;
            format!("Содержимое файла '{}':\n{}", name, result.content)
        }
        Command::WriteFile { file, content } => {
            let result = manager.write_file(file, content)?;
            if result.created {
                format!("Файл '{}' создан, содержимое записано.", file)
            } else {
                format!("Содержимое записано в файл '{}'.", file)
            }
        }
        Command::DeleteFile(name) => {
            manager.delete_file(name)?;
            format!("Файл '{}' удален.", name)
        }
        Command::CopyFile { src, dest } => {
            manager.copy_file(src, dest)?;
            format!("Файл '{}' скопирован в '{}'.", src, dest)
        }
        Command::MoveFile { src, dest } => {
            manager.move_file(src, dest)?;
            format!("Файл '{}' перемещен в '{}'.", src, dest)
        }
        Command::RenameFile { old_name, new_name } => {
            manager.rename_file(old_name, new_name)?;
            format!("Файл '{}' переименован в '{}'.", old_name, new_name)
        }
        Command::EnsureUser(username) => {
            let result = manager.ensure_user_directory(username)?;
            if result.created {
                format!("Создана директория для пользователя '{}'.", username)
            } else {
                format!("Директория для пользователя '{}' уже существует.", username)
            }
        }
        Command::CreateArchive { src, dest } => {
            manager.create_archive(src, dest)?;
            format!("Архив создан: {}", archive_name(dest))
        }
        Command::ExtractArchive { src, dest } => {
            manager.extract_archive(src, dest)?;
            format!("Архив распакован в: {}", dest)
        }
        Command::DiskQuota(username) => responses::quota(&manager.disk_quota(username)?),
        Command::Exit => {
            return Ok(CommandResult {
                status: CommandStatus::Exit,
                message: responses::EXIT.into(),
            });
        }
    };

    Ok(CommandResult::success(message))
}
