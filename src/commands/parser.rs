//! Menu parsing
//!
//! Turns the operator's numeric selection and the answers to its prompts
//! into a `Command`.

/// A command ready to run against the file manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDirectory(String),
    DeleteDirectory(String),
    ListDirectory,
    ChangeDirectory(String),
    CreateFile(String),
    ReadFile(String),
    WriteFile { file: String, content: String },
    DeleteFile(String),
    CopyFile { src: String, dest: String },
    MoveFile { src: String, dest: String },
    RenameFile { old_name: String, new_name: String },
    EnsureUser(String),
    CreateArchive { src: String, dest: String },
    ExtractArchive { src: String, dest: String },
    DiskQuota(String),
    Exit,
}

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateDirectory,
    DeleteDirectory,
    ListDirectory,
    ChangeDirectory,
    CreateFile,
    ReadFile,
    WriteFile,
    DeleteFile,
    CopyFile,
    MoveFile,
    RenameFile,
    RegisterUser,
    CreateUserDirectory,
    CreateArchive,
    ExtractArchive,
    DiskQuota,
    Exit,
}

impl MenuChoice {
    /// Prompts shown, in order, to collect this command's arguments.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            MenuChoice::CreateDirectory => &["Введите имя новой директории: "],
            MenuChoice::DeleteDirectory => &["Введите имя директории для удаления: "],
            MenuChoice::ListDirectory | MenuChoice::Exit => &[],
            MenuChoice::ChangeDirectory => &["Введите имя директории: "],
            MenuChoice::CreateFile => &["Введите имя нового файла: "],
            MenuChoice::ReadFile => &["Введите имя файла для чтения: "],
            MenuChoice::WriteFile => &[
                "Введите имя файла для записи: ",
                "Введите содержимое для записи: ",
            ],
            MenuChoice::DeleteFile => &["Введите имя файла для удаления: "],
            MenuChoice::CopyFile => &[
                "Введите имя исходного файла: ",
                "Введите имя файла для копирования: ",
            ],
            MenuChoice::MoveFile => &[
                "Введите имя исходного файла: ",
                "Введите имя файла для перемещения: ",
            ],
            MenuChoice::RenameFile => &[
                "Введите старое имя файла: ",
                "Введите новое имя файла: ",
            ],
            MenuChoice::RegisterUser | MenuChoice::DiskQuota => &["Введите имя пользователя: "],
            MenuChoice::CreateUserDirectory => {
                &["Введите имя пользователя для создания директории: "]
            }
            MenuChoice::CreateArchive => &[
                "Введите путь к файлу или директории: ",
                "Введите путь для сохранения архива: ",
            ],
            MenuChoice::ExtractArchive => &[
                "Введите путь к архиву: ",
                "Введите путь для распаковки: ",
            ],
        }
    }

    /// Builds the command from the prompt answers.
    ///
    /// Path arguments are trimmed; file content is kept verbatim. Missing
    /// answers become empty strings and are rejected by validation later.
    pub fn build(self, args: &[String]) -> Command {
        let path = |i: usize| args.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

        match self {
            MenuChoice::CreateDirectory => Command::CreateDirectory(path(0)),
            MenuChoice::DeleteDirectory => Command::DeleteDirectory(path(0)),
            MenuChoice::ListDirectory => Command::ListDirectory,
            MenuChoice::ChangeDirectory => Command::ChangeDirectory(path(0)),
            MenuChoice::CreateFile => Command::CreateFile(path(0)),
            MenuChoice::ReadFile => Command::ReadFile(path(0)),
            MenuChoice::WriteFile => Command::WriteFile {
                file: path(0),
                content: args.get(1).cloned().unwrap_or_default(),
            },
            MenuChoice::DeleteFile => Command::DeleteFile(path(0)),
            MenuChoice::CopyFile => Command::CopyFile {
                src: path(0),
                dest: path(1),
            },
            MenuChoice::MoveFile => Command::MoveFile {
                src: path(0),
                dest: path(1),
            },
            MenuChoice::RenameFile => Command::RenameFile {
                old_name: path(0),
                new_name: path(1),
            },
            MenuChoice::RegisterUser | MenuChoice::CreateUserDirectory => {
                Command::EnsureUser(path(0))
            }
            MenuChoice::CreateArchive => Command::CreateArchive {
                src: path(0),
                dest: path(1),
            },
            MenuChoice::ExtractArchive => Command::ExtractArchive {
                src: path(0),
                dest: path(1),
            },
            MenuChoice::DiskQuota => Command::DiskQuota(path(0)),
            MenuChoice::Exit => Command::Exit,
        }
    }
}

/// Parses the operator's menu selection ("1".."17").
pub fn parse_menu_choice(raw: &str) -> Option<MenuChoice> {
    match raw.trim() {
        "1" => Some(MenuChoice::CreateDirectory),
        "2" => Some(MenuChoice::DeleteDirectory),
        "3" => Some(MenuChoice::ListDirectory),
        "4" => Some(MenuChoice::ChangeDirectory),
        "5" => Some(MenuChoice::CreateFile),
        "6" => Some(MenuChoice::ReadFile),
        "7" => Some(MenuChoice::WriteFile),
        "8" => Some(MenuChoice::DeleteFile),
        "9" => Some(MenuChoice::CopyFile),
        "10" => Some(MenuChoice::MoveFile),
        "11" => Some(MenuChoice::RenameFile),
        "12" => Some(MenuChoice::RegisterUser),
        "13" => Some(MenuChoice::CreateUserDirectory),
        "14" => Some(MenuChoice::CreateArchive),
        "15" => Some(MenuChoice::ExtractArchive),
        "16" => Some(MenuChoice::DiskQuota),
        "17" => Some(MenuChoice::Exit),
        _ => None,
    }
}
