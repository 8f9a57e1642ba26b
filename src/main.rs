//! Deskpilot - desktop control for AI agent loops
//!
//! Binds the computer-use tool to a small CLI: a line-delimited JSON serve
//! loop for tool-calling agents, plus one-shot commands for manual use.

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncBufReadExt;

use deskpilot::cli::{Cli, Commands};
use deskpilot::tools::{execute_shell, ComputerRequest, ComputerTool, ToolResult};

/// Main entry point for the application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let tool = ComputerTool::new().context("failed to initialize computer tool")?;
    let device = tool.display().device();
    tracing::info!(
        "session {} on display {}x{} (scale factor {})",
        tool.session().id(),
        device.width,
        device.height,
        tool.display().scale_factor()
    );

    match cli.command {
        Commands::Serve => serve(&tool).await,
        Commands::Action {
            action,
            text,
            coordinate,
        } => {
            let request = ComputerRequest {
                action,
                text,
                coordinate,
            };
            print_result(&run_request(&tool, &request).await)
        }
        Commands::Shell {
            command,
            no_screenshot,
        } => {
            let result = match execute_shell(&tool, &command, !no_screenshot).await {
                Ok(result) => result,
                Err(e) => ToolResult::error(e.to_string()),
            };
            print_result(&result)
        }
        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&tool.options())?);
            Ok(())
        }
    }
}

/// Read one JSON request per stdin line, write one JSON result per line.
async fn serve(tool: &ComputerTool) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<ComputerRequest>(line) {
            Ok(request) => run_request(tool, &request).await,
            Err(e) => ToolResult::error(format!("invalid request: {}", e)),
        };
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

/// Map a dispatch error into the response envelope.
async fn run_request(tool: &ComputerTool, request: &ComputerRequest) -> ToolResult {
    match tool.call(request).await {
        Ok(result) => result,
        Err(e) => ToolResult::error(e.to_string()),
    }
}

fn print_result(result: &ToolResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(result)?);
    if result.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
