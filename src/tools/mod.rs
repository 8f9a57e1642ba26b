pub mod computer;
pub mod shell;

// Re-export the tool entry points
pub use computer::{Action, ComputerRequest, ComputerTool};
pub use shell::execute_shell;

use serde::Serialize;

/// Result of executing a tool
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolResult {
    /// Text output for the agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Error text when the tool failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Base64-encoded PNG of the screen after the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
}

impl ToolResult {
    /// Create a successful text-only result
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Default::default()
        }
    }

    /// Create a result carrying only a screenshot
    pub fn image(base64_image: String) -> Self {
        Self {
            base64_image: Some(base64_image),
            ..Default::default()
        }
    }

    /// Create a result with both text output and a screenshot
    pub fn with_image(output: impl Into<String>, base64_image: String) -> Self {
        Self {
            output: Some(output.into()),
            base64_image: Some(base64_image),
            ..Default::default()
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether this result carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
