//! The run timer and split ledger state machine.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::clock::{Clock, SystemClock};
use crate::command::{Command, Flow};
use crate::display::{Presenter, SplitRow, TimerView, split_rows};
use crate::error::SplitError;
use crate::run::Run;
use crate::time::{TimeStyle, format_time};
use crate::timer::Timer;

/// Owns the loaded run, the timer and the clock driving it.
///
/// Commands run to completion before returning; after each one the
/// [`Presenter`], if any, receives refreshed display state.
pub struct Splitter<C = SystemClock> {
    clock: C,
    timer: Timer,
    run: Run,
    path: Option<PathBuf>,
    presenter: Option<Box<dyn Presenter>>,
}

impl Splitter<SystemClock> {
    /// Creates a splitter driven by the system clock.
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Splitter<C> {
    /// Creates a splitter with an empty run.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timer: Timer::default(),
            run: Run::default(),
            path: None,
            presenter: None,
        }
    }

    /// Attaches the collaborator that receives display refreshes.
    #[must_use]
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub const fn run(&self) -> &Run {
        &self.run
    }

    /// Where the current run was loaded from, if it came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Elapsed running time. The only time source for the ledger.
    pub fn current_timer(&self) -> TimeDelta {
        self.timer.current(self.clock.now())
    }

    pub fn current_split_index(&self) -> usize {
        self.run.current_split_index()
    }

    pub fn projected_split_time(&self, index: Option<usize>) -> Option<TimeDelta> {
        self.run.projected_split_time(index)
    }

    pub fn delta_split_time(&self, index: usize) -> Option<TimeDelta> {
        self.run.delta_split_time(index)
    }

    pub fn timer_view(&self) -> TimerView {
        TimerView::new(self.current_timer(), self.is_running())
    }

    pub fn split_rows(&self) -> Vec<SplitRow> {
        split_rows(&self.run, self.is_running())
    }

    /// Loads a run resource, replacing the current run, then resets.
    pub fn load_run(&mut self, path: &Path) -> Result<(), SplitError> {
        tracing::debug!(path = %path.display(), "load");
        let run = Run::from_path(path)?;
        self.replace_run(run, Some(path.to_path_buf()));
        Ok(())
    }

    /// Replaces the current run with one built in memory.
    ///
    /// `path` is where [`save`](Self::save) will write it.
    pub fn replace_run(&mut self, run: Run, path: Option<PathBuf>) {
        self.run = run;
        self.path = path;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.on_load(&self.run);
        }
        self.reset();
    }

    /// Writes the run with cumulative projected-or-actual times.
    pub fn save_run(&self, path: &Path) -> Result<(), SplitError> {
        self.run.write_to(path)
    }

    /// Stops and zeroes the timer and clears every actual time.
    pub fn reset(&mut self) {
        tracing::debug!("reset");
        self.timer.reset();
        for split in self.run.splits_mut() {
            split.clear_actual();
        }
        self.refresh_timer();
        self.refresh_splits();
    }

    /// Starts or stops the timer.
    pub fn toggle(&mut self) {
        tracing::debug!("{}", if self.is_running() { "stop" } else { "start" });
        let now = self.clock.now();
        self.timer.toggle(now);
        self.refresh_timer();
        self.refresh_splits();
    }

    /// Records the current split. Does nothing while stopped.
    ///
    /// The split's actual time is the elapsed time minus the cumulative
    /// projected-or-actual time through the previous split. Since every
    /// earlier split already has an actual time, that baseline is the
    /// elapsed time at which the previous split was reached. Reaching the
    /// last split stops the timer.
    pub fn split(&mut self) {
        if !self.is_running() {
            return;
        }

        let index = self.current_split_index();
        let count = self.run.splits().len();
        if index >= count {
            tracing::debug!("split ignored, run already complete");
            return;
        }

        let elapsed = self.current_timer();
        // Every earlier split is reached, so the baseline is always known.
        let previous = match index {
            0 => TimeDelta::zero(),
            _ => self
                .projected_split_time(Some(index - 1))
                .unwrap_or_else(TimeDelta::zero),
        };
        self.run.splits_mut()[index].record_actual(elapsed - previous);

        tracing::debug!(
            split = self.run.splits()[index].name(),
            time = %format_time(Some(elapsed), TimeStyle::Full),
            "split"
        );

        if index + 1 == count {
            self.toggle();
        }
        self.refresh_splits();
    }

    /// Promotes actual times to projections, writes the run back to where
    /// it was loaded from, then resets.
    pub fn save(&mut self) -> Result<(), SplitError> {
        let path = self.path.clone().ok_or(SplitError::NoRunLoaded)?;
        tracing::debug!(path = %path.display(), "save");

        // Promote on a copy so a failed write leaves the attempt intact.
        let mut updated = self.run.clone();
        for split in updated.splits_mut() {
            split.promote_actual();
        }
        updated.write_to(&path)?;
        self.run = updated;
        self.reset();
        Ok(())
    }

    /// Ends the session. Everything worth keeping was written by `save`.
    pub fn close(&mut self) -> Flow {
        tracing::debug!("close");
        Flow::Exit
    }

    /// Dispatches a command through its handler.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SplitError> {
        command.handler()(self)
    }

    fn refresh_timer(&mut self) {
        if self.presenter.is_none() {
            return;
        }
        let view = self.timer_view();
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.refresh_timer(&view);
        }
    }

    fn refresh_splits(&mut self) {
        if self.presenter.is_none() {
            return;
        }
        let rows = self.split_rows();
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.refresh_splits(&rows);
        }
    }
}
