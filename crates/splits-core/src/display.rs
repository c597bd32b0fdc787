//! Display state derived from the timer and split ledger.
//!
//! The core never renders anything itself. After each command it hands a
//! [`Presenter`] freshly derived views, and a front-end may also derive them
//! on its own refresh tick.

use chrono::TimeDelta;
use serde::Serialize;

use crate::run::Run;
use crate::time::{TimeStyle, format_time};

/// Colour state of the main timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerTone {
    /// Stopped at zero.
    Idle,
    Running,
    /// Stopped with time on the clock.
    Paused,
}

/// The main timer as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub text: String,
    pub tone: TimerTone,
}

impl TimerView {
    pub fn new(elapsed: TimeDelta, running: bool) -> Self {
        let tone = if running {
            TimerTone::Running
        } else if elapsed.is_zero() {
            TimerTone::Idle
        } else {
            TimerTone::Paused
        };
        Self {
            text: format_time(Some(elapsed), TimeStyle::Full),
            tone,
        }
    }
}

/// Colour state of a split's delta column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTone {
    Ahead,
    Behind,
}

/// One split as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitRow {
    pub name: String,
    /// Signed cumulative delta, empty while unknown.
    pub delta: String,
    pub delta_tone: DeltaTone,
    /// Cumulative projected-or-actual time, empty while unknown.
    pub time: String,
    /// Set on the current split while the timer runs.
    pub highlighted: bool,
}

/// Derives one row per split.
pub fn split_rows(run: &Run, running: bool) -> Vec<SplitRow> {
    let current = run.current_split_index();
    run.splits()
        .iter()
        .enumerate()
        .map(|(index, split)| {
            let delta = run.delta_split_time(index);
            let delta_tone = match delta {
                Some(delta) if delta < TimeDelta::zero() => DeltaTone::Ahead,
                _ => DeltaTone::Behind,
            };
            SplitRow {
                name: split.name().to_string(),
                delta: format_time(delta, TimeStyle::Difference),
                delta_tone,
                time: format_time(run.projected_split_time(Some(index)), TimeStyle::Full),
                highlighted: running && index == current,
            }
        })
        .collect()
}

/// Receives display refreshes from a [`Splitter`](crate::Splitter).
///
/// All methods default to doing nothing.
pub trait Presenter {
    /// A new run was loaded; per-split views should be rebuilt.
    fn on_load(&mut self, _run: &Run) {}

    fn refresh_timer(&mut self, _timer: &TimerView) {}

    fn refresh_splits(&mut self, _rows: &[SplitRow]) {}
}
