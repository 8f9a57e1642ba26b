//! Shell command runner with optional post-command capture.
//!
//! One-shot and non-streaming: runs the command under the system shell,
//! collects stdout/stderr, lets the display settle, and attaches a
//! screenshot so the agent can see the result.

use std::time::Duration;
use tokio::process::Command;
use tokio::time::sleep;

use crate::capture;
use crate::constants::SCREENSHOT_DELAY_MS;
use crate::error::Result;
use crate::tools::computer::ComputerTool;
use crate::tools::ToolResult;

/// Execute a shell command and return its output, optionally with a
/// screenshot taken after the display settles.
pub async fn execute_shell(
    computer: &ComputerTool,
    command: &str,
    take_screenshot: bool,
) -> Result<ToolResult> {
    let shell = if cfg!(target_os = "windows") {
        "cmd"
    } else {
        "sh"
    };
    let shell_arg = if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    };

    computer
        .session()
        .log_line(&format!("shell command={:?}", command));

    let output = Command::new(shell)
        .arg(shell_arg)
        .arg(command)
        .output()
        .await?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let base64_image = if take_screenshot {
        sleep(Duration::from_millis(SCREENSHOT_DELAY_MS)).await;
        Some(capture::capture_screen(computer.session()).await?.base64)
    } else {
        None
    };

    Ok(ToolResult {
        output: Some(stdout),
        error: (!stderr.is_empty()).then_some(stderr),
        base64_image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayConfig;
    use crate::session::Session;

    fn test_tool() -> ComputerTool {
        let base = std::env::temp_dir().join(format!(
            "deskpilot_test_{}",
            uuid::Uuid::new_v4().simple()
        ));
        let session = Session::create_in(&base).expect("session dir");
        ComputerTool::with_config(DisplayConfig::new(1920, 1080), session)
    }

    #[tokio::test]
    async fn test_shell_captures_output() {
        let tool = test_tool();
        let result = execute_shell(&tool, "echo hello", false).await.unwrap();

        assert!(result.output.unwrap().contains("hello"));
        assert_eq!(result.error, None);
        assert_eq!(result.base64_image, None);
    }

    #[tokio::test]
    async fn test_shell_reports_stderr() {
        let tool = test_tool();
        let result = execute_shell(&tool, "echo oops >&2", false).await.unwrap();

        assert!(result.error.unwrap().contains("oops"));
    }
}
