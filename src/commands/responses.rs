//! Console responses
//!
//! Russian text for the menu and for every command outcome. This is the only
//! place results are turned into words.

use crate::commands::parser::Command;
use crate::error::{ErrorKind, FileManagerError};
use crate::storage::quota::QuotaReport;
use crate::storage::results::ListResult;

pub const MENU: &str = "\nСписок доступных команд:
1. Создать директорию
2. Удалить директорию
3. Просмотреть содержимое текущей директории
4. Перейти в другую директорию
5. Создать файл
6. Прочитать содержимое файла
7. Записать в файл
8. Удалить файл
9. Скопировать файл
10. Переместить файл
11. Переименовать файл
12. Зарегистрировать нового пользователя
13. Создать директорию для пользователя
14. Создать архив
15. Распаковать архив
16. Проверить квоту дискового пространства
17. Выйти
";

pub const PROMPT: &str = "Выберите действие: ";
pub const INVALID_CHOICE: &str = "Некорректный ввод. Пожалуйста, выберите действие снова.";
pub const EXIT: &str = "Выход.";
pub const INVALID_ENCODING: &str = "Ошибка: ввод не в кодировке UTF-8.";
pub const QUOTA_WARNING: &str =
    "Предупреждение: вы приближаетесь к лимиту дискового пространства.";

pub fn input_too_long(limit: usize) -> String {
    format!("Ошибка: ввод длиннее {} байт.", limit)
}

pub fn listing(result: &ListResult) -> String {
    let mut out = String::from("Содержимое текущей директории:");
    for entry in &result.entries {
        out.push('\n');
        out.push_str(&entry.name);
        if entry.is_dir {
            out.push('/');
        }
    }
    out
}

pub fn quota(report: &QuotaReport) -> String {
    let mut out = format!(
        "Всего дискового пространства: {} байт\n\
         Использовано дискового пространства: {} байт\n\
         Свободно дискового пространства: {} байт",
        report.usage.total, report.usage.used, report.usage.free
    );
    if report.is_near_limit() {
        out.push('\n');
        out.push_str(QUOTA_WARNING);
    }
    out
}

/// Renders a failed command the way the operator sees it.
pub fn error(command: &Command, err: &FileManagerError) -> String {
    match (command, err.kind()) {
        (Command::CreateDirectory(_), ErrorKind::OutsideRoot) => {
            "Ошибка: Вы пытаетесь создать директорию за пределами своей рабочей директории.".into()
        }
        (Command::CreateDirectory(name), ErrorKind::AlreadyExists) => {
            format!("Директория '{}' уже существует.", name)
        }
        (Command::DeleteDirectory(_), ErrorKind::OutsideRoot) => {
            "Ошибка: Вы пытаетесь удалить директорию за пределами своей рабочей директории.".into()
        }
        (Command::DeleteDirectory(name), ErrorKind::NotEmpty) => {
            format!("Невозможно удалить директорию '{}'. Директория не пуста.", name)
        }
        (Command::DeleteDirectory(name), ErrorKind::NotFound)
        | (Command::ChangeDirectory(name), ErrorKind::NotFound) => {
            format!("Директория '{}' не найдена.", name)
        }
        (Command::CreateFile(name), ErrorKind::AlreadyExists) => {
            format!("Файл '{}' уже существует.", name)
        }
        (Command::CreateFile(name), ErrorKind::NotFound)
        | (Command::ReadFile(name), ErrorKind::NotFound)
        | (Command::WriteFile { file: name, .. }, ErrorKind::NotFound)
        | (Command::DeleteFile(name), ErrorKind::NotFound)
        | (Command::CopyFile { src: name, .. }, ErrorKind::NotFound)
        | (Command::MoveFile { src: name, .. }, ErrorKind::NotFound)
        | (Command::RenameFile { old_name: name, .. }, ErrorKind::NotFound) => {
            format!("Файл '{}' не найден.", name)
        }
        (Command::RenameFile { new_name, .. }, ErrorKind::AlreadyExists) => {
            format!("Файл '{}' уже существует.", new_name)
        }
        (Command::DiskQuota(name), ErrorKind::NotFound) => {
            format!("Директория пользователя '{}' не найдена.", name)
        }
        (Command::CreateArchive { .. }, ErrorKind::NotFound) => {
            "Исходный файл/директория не найдены.".into()
        }
        (Command::ExtractArchive { .. }, ErrorKind::OutsideRoot) => {
            "Ошибка: Вы пытаетесь распаковать архив за пределами своей рабочей директории.".into()
        }
        (Command::ExtractArchive { .. }, ErrorKind::NotFound) => "Архив не найден.".into(),
        (_, ErrorKind::MalformedArchive) => "Неверный формат zip-архива.".into(),
        (_, ErrorKind::OutsideRoot) => {
            "Ошибка: путь находится за пределами рабочей директории.".into()
        }
        (_, ErrorKind::NotADirectory) => format!("Ошибка: не является директорией ({}).", err),
        (_, ErrorKind::InvalidInput) => format!("Ошибка: некорректный ввод ({}).", err),
        (_, ErrorKind::NotFound) => format!("Ошибка: объект не найден ({}).", err),
        (_, ErrorKind::AlreadyExists) => format!("Ошибка: объект уже существует ({}).", err),
        (_, ErrorKind::NotEmpty) => format!("Ошибка: директория не пуста ({}).", err),
        (_, ErrorKind::Io) => format!("Ошибка ввода-вывода: {}", err),
    }
}
