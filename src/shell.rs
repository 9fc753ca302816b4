//! Interactive shell
//!
//! Shows the menu, reads a selection and its arguments line by line, runs the
//! command and prints the response. One command completes before the next
//! prompt appears.

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{CommandStatus, handle_command, parse_menu_choice, responses};
use crate::manager::FileManager;

/// Runs the menu loop until the exit command or end of input.
///
/// Lines that are not valid UTF-8 or exceed `max_input_length` bytes are
/// answered with an error and the menu is shown again.
pub async fn run_shell<R, W>(
    manager: &mut FileManager,
    mut reader: R,
    writer: &mut W,
    max_input_length: usize,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    'menu: loop {
        writer.write_all(responses::MENU.as_bytes()).await?;
        prompt(writer, responses::PROMPT).await?;

        let Some(selection) = read_line(&mut reader).await? else {
            info!("Input closed, leaving shell");
            return Ok(());
        };

        let Some(choice) = String::from_utf8(selection)
            .ok()
            .and_then(|selection| parse_menu_choice(&selection))
        else {
            debug!("Invalid selection");
            respond(writer, responses::INVALID_CHOICE).await?;
            continue;
        };

        let mut args = Vec::with_capacity(choice.prompts().len());
        for text in choice.prompts() {
            prompt(writer, text).await?;
            let Some(raw) = read_line(&mut reader).await? else {
                info!("Input closed, leaving shell");
                return Ok(());
            };
            if raw.len() > max_input_length {
                respond(writer, &responses::input_too_long(max_input_length)).await?;
                continue 'menu;
            }
            match String::from_utf8(raw) {
                Ok(arg) => args.push(arg),
                Err(_) => {
                    warn!("Rejected argument that is not valid UTF-8");
                    respond(writer, responses::INVALID_ENCODING).await?;
                    continue 'menu;
                }
            }
        }

        let command = choice.build(&args);
        let result = handle_command(manager, &command);
        respond(writer, &result.message).await?;

        if result.status == CommandStatus::Exit {
            return Ok(());
        }
    }
}

/// Reads one line as raw bytes, without the trailing `\n` or `\r\n`.
/// Returns `None` at end of input.
async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line).await? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

async fn prompt<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await
}

async fn respond<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn run(manager: &mut FileManager, input: &str) -> String {
        run_bytes(manager, input.as_bytes(), 4096).await
    }

    async fn run_bytes(manager: &mut FileManager, input: &[u8], limit: usize) -> String {
        let mut output = Vec::new();
        run_shell(manager, input, &mut output, limit).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_exit_stops_the_loop() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();

        let output = run(&mut manager, "17\n1\nnever\n").await;
        assert!(output.ends_with("Выход.\n"));
        assert!(!manager.work_root().join("never").exists());
    }

    #[tokio::test]
    async fn test_invalid_selection_redisplays_menu() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();

        let output = run(&mut manager, "42\n17\n").await;
        assert!(output.contains(responses::INVALID_CHOICE));
        assert_eq!(output.matches("Список доступных команд:").count(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input_mid_command() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();

        let output = run(&mut manager, "7\nnotes.txt\n").await;
        assert!(output.ends_with("Введите содержимое для записи: "));
        assert!(!manager.work_root().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_overlong_argument_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();
        let mut output = Vec::new();
        let input = format!("1\n{}\n17\n", "a".repeat(20));

        run_shell(&mut manager, input.as_bytes(), &mut output, 10)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(&responses::input_too_long(10)));
    }

    #[tokio::test]
    async fn test_non_utf8_input_keeps_session_alive() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();

        let output = run_bytes(&mut manager, b"1\n\xff\xfe\n\xff\n1\nafter\n17\n", 4096).await;

        assert!(output.contains(responses::INVALID_ENCODING));
        assert!(output.contains(responses::INVALID_CHOICE));
        assert!(output.ends_with("Выход.\n"));
        assert!(manager.work_root().join("after").is_dir());
    }

    #[tokio::test]
    async fn test_crlf_line_endings_are_stripped() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();

        run(&mut manager, "1\r\nalpha\r\n17\r\n").await;
        assert!(manager.work_root().join("alpha").is_dir());
    }

    #[tokio::test]
    async fn test_configured_limit_above_default_is_honoured() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();
        let long_path = format!("{}deep", "./".repeat(2500));
        let input = format!("1\n{}\n17\n", long_path);

        let output = run_bytes(&mut manager, input.as_bytes(), 10_000).await;

        assert!(!output.contains(&responses::input_too_long(10_000)));
        assert!(output.contains("создана."));
        assert!(manager.work_root().join("deep").is_dir());
    }
}
