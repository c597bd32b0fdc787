//! Core logic for the speedrun split timer.
//!
//! This crate contains:
//! - Timer: a pause/resume elapsed-time accumulator
//! - Run ledger: splits with projected and actual times, and the cumulative
//!   arithmetic over them
//! - Run resources: the line-oriented text format runs are loaded from and
//!   saved to
//! - Commands: the five user commands, their dispatch table and key bindings

pub mod clock;
pub mod command;
pub mod discover;
pub mod display;
mod error;
pub mod run;
mod splitter;
pub mod time;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, Flow, Keymap, KeymapError, UnknownCommand};
pub use discover::{RUN_EXTENSION, discover_runs};
pub use display::{DeltaTone, Presenter, SplitRow, TimerTone, TimerView};
pub use error::SplitError;
pub use run::{Run, Split};
pub use splitter::Splitter;
pub use time::{TimeError, TimeStyle, format_time, parse_time};
pub use timer::Timer;
