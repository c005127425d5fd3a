//! CLI module for tomatick.
//!
//! This module provides the command-line interface:
//! - `commands`: Flag definitions using clap derive
//! - `display`: Text printed outside the countdown screen

pub mod commands;
pub mod display;

pub use commands::Cli;
pub use display::Display;
