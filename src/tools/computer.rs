//! Desktop control tool for AI agents.
//!
//! Translates the fixed set of computer-use actions into input-injection
//! and capture calls, converting agent coordinates between the advertised
//! API resolution and the device resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;

use crate::capture;
use crate::constants::SCREENSHOT_DELAY_MS;
use crate::display::{DisplayConfig, ScalingSource};
use crate::error::{ComputerError, Result};
use crate::input::{self, MouseButton};
use crate::session::Session;
use crate::tools::ToolResult;

/// The fixed set of actions the tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Key,
    Type,
    MouseMove,
    LeftClick,
    LeftClickDrag,
    RightClick,
    MiddleClick,
    DoubleClick,
    Screenshot,
    CursorPosition,
}

impl FromStr for Action {
    type Err = ComputerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Action::Key),
            "type" => Ok(Action::Type),
            "mouse_move" => Ok(Action::MouseMove),
            "left_click" => Ok(Action::LeftClick),
            "left_click_drag" => Ok(Action::LeftClickDrag),
            "right_click" => Ok(Action::RightClick),
            "middle_click" => Ok(Action::MiddleClick),
            "double_click" => Ok(Action::DoubleClick),
            "screenshot" => Ok(Action::Screenshot),
            "cursor_position" => Ok(Action::CursorPosition),
            other => Err(ComputerError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Key => "key",
            Action::Type => "type",
            Action::MouseMove => "mouse_move",
            Action::LeftClick => "left_click",
            Action::LeftClickDrag => "left_click_drag",
            Action::RightClick => "right_click",
            Action::MiddleClick => "middle_click",
            Action::DoubleClick => "double_click",
            Action::Screenshot => "screenshot",
            Action::CursorPosition => "cursor_position",
        };
        write!(f, "{}", name)
    }
}

/// One tool invocation as received from the agent loop.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerRequest {
    pub action: String,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub coordinate: Option<(i32, i32)>,
}

/// Display options advertised to the agent for this tool instance.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOptions {
    pub display_width_px: u32,
    pub display_height_px: u32,
    pub display_number: Option<u32>,
}

/// The computer-use tool: an immutable display configuration plus a
/// per-process session for logs and screenshot archival.
pub struct ComputerTool {
    display: DisplayConfig,
    session: Session,
}

impl ComputerTool {
    /// Create a tool bound to the live display and a fresh session.
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(
            DisplayConfig::detect()?,
            Session::create()?,
        ))
    }

    /// Create a tool from an explicit display configuration and session.
    pub fn with_config(display: DisplayConfig, session: Session) -> Self {
        Self { display, session }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Options describing the advertised (API-resolution) display.
    pub fn options(&self) -> ToolOptions {
        let api = self.display.api_resolution();
        ToolOptions {
            display_width_px: api.width,
            display_height_px: api.height,
            display_number: None,
        }
    }

    /// Execute one action and return its result envelope.
    pub async fn call(&self, request: &ComputerRequest) -> Result<ToolResult> {
        let action: Action = request.action.parse()?;
        self.session.log_line(&format!(
            "action={} text={:?} coordinate={:?}",
            action, request.text, request.coordinate
        ));

        match action {
            Action::MouseMove | Action::LeftClickDrag => {
                let (x, y) = require_coordinate(action, request)?;
                let (physical_x, physical_y) = self.scale_up(x, y)?;
                match action {
                    Action::MouseMove => input::move_mouse(physical_x, physical_y)?,
                    _ => input::drag_to(physical_x, physical_y)?,
                }
                self.screenshot_result().await
            }
            Action::Key | Action::Type => {
                let text = require_text(action, request)?;
                match action {
                    Action::Key => {
                        let chord = translate_modifier_alias(text);
                        let (key, modifiers) = parse_chord(&chord);
                        input::press_chord(&key, &modifiers)?;
                    }
                    _ => input::type_text(text)?,
                }
                self.screenshot_result().await
            }
            Action::LeftClick => self.click(MouseButton::Left, false).await,
            Action::RightClick => self.click(MouseButton::Right, false).await,
            Action::MiddleClick => self.click(MouseButton::Middle, false).await,
            Action::DoubleClick => self.click(MouseButton::Left, true).await,
            Action::Screenshot => {
                let shot = capture::capture_screen(&self.session).await?;
                Ok(ToolResult::image(shot.base64))
            }
            Action::CursorPosition => {
                let (physical_x, physical_y) = input::cursor_position()?;
                let (device_x, device_y) = self.display.from_physical(physical_x, physical_y);
                self.session.log_line(&format!(
                    "cursor physical ({},{}) -> device ({},{})",
                    physical_x, physical_y, device_x, device_y
                ));
                let (x, y) =
                    self.display
                        .scale_coordinates(ScalingSource::Device, device_x, device_y)?;
                Ok(ToolResult::text(format!("X={x},Y={y}")))
            }
        }
    }

    async fn click(&self, button: MouseButton, double: bool) -> Result<ToolResult> {
        input::click(button, double)?;
        self.screenshot_result().await
    }

    /// Convert agent coordinates to the physical injection space, logging
    /// both transformation steps.
    fn scale_up(&self, x: i32, y: i32) -> Result<(i32, i32)> {
        let (device_x, device_y) = self.display.scale_coordinates(ScalingSource::Api, x, y)?;
        self.session.log_line(&format!(
            "scaled api ({},{}) -> device ({},{})",
            x, y, device_x, device_y
        ));

        let (physical_x, physical_y) = self.display.to_physical(device_x, device_y);
        if self.display.scale_factor() != 1.0 {
            self.session.log_line(&format!(
                "scaled device ({},{}) -> physical ({},{})",
                device_x, device_y, physical_x, physical_y
            ));
        }

        Ok((physical_x, physical_y))
    }

    /// Let the display settle, then capture and wrap the screenshot.
    async fn screenshot_result(&self) -> Result<ToolResult> {
        sleep(Duration::from_millis(SCREENSHOT_DELAY_MS)).await;
        let shot = capture::capture_screen(&self.session).await?;
        Ok(ToolResult::image(shot.base64))
    }
}

fn require_coordinate(action: Action, request: &ComputerRequest) -> Result<(i32, i32)> {
    request
        .coordinate
        .ok_or_else(|| ComputerError::MissingArgument {
            field: "coordinate",
            action: action.to_string(),
        })
}

fn require_text(action: Action, request: &ComputerRequest) -> Result<&str> {
    request
        .text
        .as_deref()
        .ok_or_else(|| ComputerError::MissingArgument {
            field: "text",
            action: action.to_string(),
        })
}

/// The platform's primary shortcut modifier.
fn primary_modifier() -> &'static str {
    if cfg!(target_os = "macos") {
        "cmd"
    } else {
        "ctrl"
    }
}

/// Rewrite the generic "control"/"ctrl" modifier alias to the primary
/// modifier of the host platform. Only modifier positions are rewritten;
/// a bare key name is left alone.
pub fn translate_modifier_alias(chord: &str) -> String {
    let parts: Vec<&str> = chord.split('+').collect();
    if parts.len() < 2 {
        return chord.to_string();
    }

    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i < last
                && (part.eq_ignore_ascii_case("ctrl") || part.eq_ignore_ascii_case("control"))
            {
                primary_modifier()
            } else {
                *part
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Split a chord like "cmd+shift+a" into its final key and modifiers.
pub fn parse_chord(chord: &str) -> (String, Vec<String>) {
    let parts: Vec<&str> = chord.split('+').collect();
    let key = parts.last().map(|k| k.to_string()).unwrap_or_default();
    let modifiers = parts[..parts.len().saturating_sub(1)]
        .iter()
        .map(|m| m.to_string())
        .collect();
    (key, modifiers)
}
