//! Speedrun split timer CLI library.
//!
//! This crate provides the terminal front-end for the split timer core.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, Hotkeys};
