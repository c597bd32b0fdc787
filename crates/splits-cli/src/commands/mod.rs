//! CLI subcommand implementations.

pub mod list;
pub mod play;
pub mod show;
pub mod util;
