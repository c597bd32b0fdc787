//! Run definitions and the split ledger.
//!
//! # Resource Format
//!
//! ```text
//! line 1: run name
//! line 2: subtitle
//! line 3: (blank)
//! line 4+: <split name>\t<cumulative timestamp>
//! ```
//!
//! The timestamp column is optional. A line whose name column is empty ends
//! the split list. In memory, projections are stored as incremental
//! durations: the time spent on that split alone.

use std::path::Path;

use chrono::TimeDelta;

use crate::error::SplitError;
use crate::time::{TimeStyle, format_time, parse_time};

/// Number of header lines preceding the split list.
const HEADER_LINES: usize = 3;

/// A named checkpoint within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    name: String,
    projected: Option<TimeDelta>,
    actual: Option<TimeDelta>,
}

impl Split {
    /// Creates a split with an optional incremental projection.
    pub fn new(name: impl Into<String>, projected: Option<TimeDelta>) -> Self {
        Self {
            name: name.into(),
            projected,
            actual: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target time for this split alone.
    pub const fn projected(&self) -> Option<TimeDelta> {
        self.projected
    }

    /// Time achieved on this split in the current attempt.
    pub const fn actual(&self) -> Option<TimeDelta> {
        self.actual
    }

    /// The actual time if reached, otherwise the projection.
    pub fn best_known(&self) -> Option<TimeDelta> {
        self.actual.or(self.projected)
    }

    pub(crate) fn record_actual(&mut self, actual: TimeDelta) {
        self.actual = Some(actual);
    }

    pub(crate) fn clear_actual(&mut self) {
        self.actual = None;
    }

    /// Makes the actual time, if any, the new projection.
    pub(crate) fn promote_actual(&mut self) {
        if let Some(actual) = self.actual {
            self.projected = Some(actual);
        }
    }
}

/// A named, ordered sequence of splits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    name: String,
    subtitle: String,
    splits: Vec<Split>,
}

impl Run {
    pub fn new(name: impl Into<String>, subtitle: impl Into<String>, splits: Vec<Split>) -> Self {
        Self {
            name: name.into(),
            subtitle: subtitle.into(),
            splits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub(crate) fn splits_mut(&mut self) -> &mut [Split] {
        &mut self.splits
    }

    /// Reads and parses a run resource.
    pub fn from_path(path: &Path) -> Result<Self, SplitError> {
        let source = std::fs::read_to_string(path).map_err(|source| SplitError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parses a run resource, converting cumulative timestamps into
    /// incremental projections.
    ///
    /// A timestamp is measured against the last timestamp seen, so a split
    /// without one does not shift the projections after it.
    pub fn parse(source: &str) -> Result<Self, SplitError> {
        let mut lines = source.lines();
        let name = lines.next().unwrap_or_default().to_string();
        let subtitle = lines.next().unwrap_or_default().to_string();
        lines.next();

        let mut splits = Vec::new();
        let mut cumulative = TimeDelta::zero();

        for (offset, line) in lines.enumerate() {
            let mut columns = line.split('\t');
            let split_name = columns.next().unwrap_or_default();
            if split_name.is_empty() {
                break;
            }

            let projected = match columns.next().map(str::trim) {
                Some(stamp) if !stamp.is_empty() => {
                    let total = parse_time(stamp).map_err(|source| SplitError::Timestamp {
                        split: split_name.to_string(),
                        line: HEADER_LINES + offset + 1,
                        source,
                    })?;
                    // Both sides are non-negative, so this cannot overflow.
                    let incremental = total - cumulative;
                    cumulative = total;
                    Some(incremental)
                }
                _ => None,
            };

            splits.push(Split::new(split_name, projected));
        }

        Ok(Self {
            name,
            subtitle,
            splits,
        })
    }

    /// Renders the run back to its resource format.
    ///
    /// Each split gets its cumulative projected-or-actual time, or no
    /// timestamp column when that cumulative value is unknown.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n\n", self.name, self.subtitle);
        for (index, split) in self.splits.iter().enumerate() {
            out.push_str(&split.name);
            if let Some(cumulative) = self.projected_split_time(Some(index)) {
                out.push('\t');
                out.push_str(&format_time(Some(cumulative), TimeStyle::Full));
            }
            out.push('\n');
        }
        out
    }

    /// Writes the rendered run to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), SplitError> {
        std::fs::write(path, self.render()).map_err(|source| SplitError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Index of the first split without an actual time, or the split count
    /// once the run is complete.
    pub fn current_split_index(&self) -> usize {
        self.splits
            .iter()
            .position(|split| split.actual.is_none())
            .unwrap_or(self.splits.len())
    }

    /// Cumulative projected-or-actual time through `index` inclusive, or
    /// through every split when `index` is `None`.
    ///
    /// Unknown if any included split has neither an actual nor a projection,
    /// or if the total does not fit in a duration.
    pub fn projected_split_time(&self, index: Option<usize>) -> Option<TimeDelta> {
        checked_total(self.through(index).iter().map(Split::best_known))
    }

    /// Cumulative `actual - projected` through `index` inclusive.
    ///
    /// Unknown if any included split lacks either value.
    pub fn delta_split_time(&self, index: usize) -> Option<TimeDelta> {
        checked_total(
            self.through(Some(index))
                .iter()
                .map(|split| split.actual?.checked_sub(&split.projected?)),
        )
    }

    fn through(&self, index: Option<usize>) -> &[Split] {
        let end = index.map_or(self.splits.len(), |i| (i + 1).min(self.splits.len()));
        &self.splits[..end]
    }
}

/// Sums optional durations; any unknown term or overflow makes the total unknown.
fn checked_total(terms: impl Iterator<Item = Option<TimeDelta>>) -> Option<TimeDelta> {
    terms.fold(Some(TimeDelta::zero()), |total, term| total?.checked_add(&term?))
}
