//! macOS capture via the system `screencapture` utility.

use std::path::Path;
use tokio::process::Command;

use crate::error::{ComputerError, Result};

/// Capture the main display to a PNG at `path`.
pub async fn write_capture(path: &Path) -> Result<()> {
    let status = Command::new("screencapture")
        .arg("-x") // no capture sound
        .arg("-C") // include the cursor
        .arg(path)
        .status()
        .await?;

    if !status.success() {
        return Err(ComputerError::Capture(format!(
            "screencapture exited with {status}"
        )));
    }

    Ok(())
}
