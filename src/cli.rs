//! Command-line interface definition and argument parsing
//!
//! This module uses clap to define and parse command-line arguments.

use clap::{Parser, Subcommand};

/// Command-line arguments for deskpilot
#[derive(Parser, Debug)]
#[command(
    name = "deskpilot",
    about = "Desktop control tool for AI agents",
    version,
    author,
    long_about = "Deskpilot exposes mouse, keyboard and screenshot control as a tool an AI agent loop can call, over line-delimited JSON or one-shot commands."
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for deskpilot
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve tool requests as line-delimited JSON on stdin/stdout
    Serve,

    /// Execute a single action
    Action {
        /// Action name (e.g. left_click, mouse_move, key, type, screenshot)
        action: String,

        /// Text argument for the key and type actions
        #[arg(long)]
        text: Option<String>,

        /// Coordinate argument for pointer actions, as X,Y
        #[arg(long, value_parser = parse_coordinate)]
        coordinate: Option<(i32, i32)>,
    },

    /// Run a shell command and capture the screen afterwards
    Shell {
        /// Command line to run under the system shell
        command: String,

        /// Skip the post-command screenshot
        #[arg(long)]
        no_screenshot: bool,
    },

    /// Print the display options advertised to the agent
    Info,
}

/// Parse an "X,Y" coordinate pair
fn parse_coordinate(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", value))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad X coordinate: {}", e))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad Y coordinate: {}", e))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("100,200"), Ok((100, 200)));
        assert_eq!(parse_coordinate("100, 200"), Ok((100, 200)));
        assert!(parse_coordinate("100").is_err());
        assert!(parse_coordinate("a,b").is_err());
    }
}
