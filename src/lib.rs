//! Deskpilot: desktop control for AI agents
//!
//! This library exposes mouse, keyboard and screenshot control as a tool
//! consumable by a language-model tool-calling loop: a fixed set of named
//! actions dispatched against the OS input and capture facilities, with
//! results returned as text and base64-encoded images.

pub mod capture;
pub mod cli;
pub mod constants;
pub mod display;
pub mod error;
pub mod input;
pub mod session;
pub mod tools;
