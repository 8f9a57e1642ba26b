//! Per-session logging and screenshot archival.
//!
//! Each tool instance owns a session directory created at construction:
//! an append-only `actions.log` plus a `screenshots/` archive holding a
//! copy of every successful capture.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Base directory sessions are created under.
pub fn base_session_dir() -> PathBuf {
    // Get the config directory for the user's platform
    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("deskpilot").join("sessions"),
        None => {
            // Fallback to a local directory if we can't get a config directory
            PathBuf::from(".deskpilot_sessions")
        }
    }
}

/// A per-process session: action log plus screenshot archive.
#[derive(Debug)]
pub struct Session {
    id: String,
    root: PathBuf,
    screenshot_dir: PathBuf,
    log_path: PathBuf,
}

impl Session {
    /// Create a fresh session under the default base directory.
    pub fn create() -> io::Result<Self> {
        Self::create_in(&base_session_dir())
    }

    /// Create a fresh session under an explicit base directory.
    pub fn create_in(base: &Path) -> io::Result<Self> {
        let id = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let root = base.join(&id);
        let screenshot_dir = root.join("screenshots");
        fs::create_dir_all(&screenshot_dir)?;

        Ok(Self {
            log_path: root.join("actions.log"),
            id,
            root,
            screenshot_dir,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append one timestamped line to the action log.
    ///
    /// Logging must never fail the action that produced it, so write errors
    /// are reported and dropped.
    pub fn log_line(&self, line: &str) {
        if let Err(e) = self.append(line) {
            tracing::warn!("failed to write action log: {}", e);
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "[{}] {}", Local::now().format("%H:%M:%S%.3f"), line)
    }

    /// Copy a captured screenshot into the session archive.
    pub fn archive_screenshot(&self, path: &Path) -> io::Result<PathBuf> {
        let name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "screenshot path has no file name",
            )
        })?;
        let dest = self.screenshot_dir.join(name);
        fs::copy(path, &dest)?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_base() -> PathBuf {
        std::env::temp_dir().join(format!("deskpilot_test_{}", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn test_log_lines_append() {
        let base = temp_base();
        let session = Session::create_in(&base).unwrap();

        session.log_line("first");
        session.log_line("second");

        let log = fs::read_to_string(session.root().join("actions.log")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_archive_screenshot_copies_file() {
        let base = temp_base();
        let session = Session::create_in(&base).unwrap();

        let source = base.join("capture.png");
        fs::write(&source, b"not a real png").unwrap();

        let archived = session.archive_screenshot(&source).unwrap();
        assert!(archived.exists());
        assert_eq!(fs::read(&archived).unwrap(), b"not a real png");
        // The original stays where the capture service put it
        assert!(source.exists());

        fs::remove_dir_all(&base).unwrap();
    }
}
