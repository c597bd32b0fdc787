//! Play command: an interactive timing session.
//!
//! Stdin is read on a helper thread and forwarded line by line over a
//! channel. The main loop owns the [`Splitter`]: it either dispatches a
//! bound key or, when no input arrives within one frame, redraws the
//! timer. Commands therefore never overlap with a redraw.
//!
//! Besides bound keys, two session lines switch runs without restarting:
//! `:runs` lists the runs directory and `:load <run>` loads one of them.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use splits_core::{
    Clock, Command, DeltaTone, Flow, Keymap, Presenter, Run, SplitRow, Splitter, TimerTone,
    TimerView,
};

use super::list;
use super::util::resolve_run;
use crate::Config;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

pub fn run(config: &Config, path: &Path) -> Result<()> {
    let keymap = config
        .hotkeys
        .keymap()
        .context("invalid hotkey configuration")?;
    let color = io::stdout().is_terminal();

    let mut splitter = Splitter::system().with_presenter(Box::new(TerminalPresenter { color }));
    splitter
        .load_run(path)
        .with_context(|| format!("failed to load run {}", path.display()))?;
    print_bindings(&keymap)?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    drive(
        &mut splitter,
        config,
        &keymap,
        &rx,
        &mut io::stdout(),
        |splitter| {
            if color {
                redraw_timer(&splitter.timer_view());
            }
        },
    )
}

/// A session line that is not a timer command.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    /// List the runs directory.
    Runs,
    /// Replace the current run.
    Load(&'a str),
}

impl<'a> Directive<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let rest = line.trim().strip_prefix(':')?;
        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
        match (name, arg) {
            ("runs", "") => Some(Self::Runs),
            ("load", run) if !run.is_empty() => Some(Self::Load(run)),
            _ => None,
        }
    }
}

/// Dispatches input lines until `close` or end of input.
///
/// Ticks every `1 / target_fps` seconds; `on_tick` runs whenever a frame
/// passes without input. A failing command or directive is reported and
/// the session carries on. Run listings are written to `out`.
pub fn drive<C, W, F>(
    splitter: &mut Splitter<C>,
    config: &Config,
    keymap: &Keymap,
    input: &Receiver<String>,
    out: &mut W,
    mut on_tick: F,
) -> Result<()>
where
    C: Clock,
    W: Write,
    F: FnMut(&Splitter<C>),
{
    let frame = Duration::from_secs(1) / config.target_fps.max(1);
    loop {
        match input.recv_timeout(frame) {
            Ok(line) => {
                if let Some(directive) = Directive::parse(&line) {
                    if let Err(err) = apply(splitter, config, &directive, out) {
                        tracing::error!(?directive, error = %format!("{err:#}"), "directive failed");
                    }
                    continue;
                }
                let Some(command) = keymap.lookup(&line) else {
                    tracing::warn!(key = line.trim(), "no command bound to key");
                    continue;
                };
                match splitter.execute(command) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => return Ok(()),
                    Err(err) => {
                        tracing::error!(%command, error = %err, "command failed");
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => on_tick(splitter),
            Err(RecvTimeoutError::Disconnected) => {
                splitter.close();
                return Ok(());
            }
        }
    }
}

fn apply<C: Clock, W: Write>(
    splitter: &mut Splitter<C>,
    config: &Config,
    directive: &Directive<'_>,
    out: &mut W,
) -> Result<()> {
    match directive {
        Directive::Runs => {
            list::run(out, &config.runs_dir, &config.extension)?;
            out.flush()?;
            Ok(())
        }
        Directive::Load(run) => {
            let path = resolve_run(config, Path::new(run));
            splitter
                .load_run(&path)
                .with_context(|| format!("failed to load run {}", path.display()))
        }
    }
}

fn print_bindings(keymap: &Keymap) -> Result<()> {
    let bindings: Vec<String> = Command::ALL
        .into_iter()
        .filter_map(|command| keymap.key_for(command).map(|key| format!("{key}={command}")))
        .collect();
    println!("keys: {}", bindings.join("  "));
    println!("runs: :runs to list, :load <run> to switch");
    io::stdout().flush()?;
    Ok(())
}

fn redraw_timer(view: &TimerView) {
    let mut stdout = io::stdout().lock();
    let drawn = write!(stdout, "\r{}", render_timer(view, true)).and_then(|()| stdout.flush());
    if let Err(err) = drawn {
        tracing::warn!(error = %err, "failed to draw timer");
    }
}

/// Writes display refreshes to stdout.
struct TerminalPresenter {
    color: bool,
}

impl TerminalPresenter {
    fn emit(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let prefix = if self.color { "\r" } else { "" };
        let written = writeln!(stdout, "{prefix}{text}").and_then(|()| stdout.flush());
        if let Err(err) = written {
            tracing::warn!(error = %err, "failed to write display");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn on_load(&mut self, run: &Run) {
        self.emit(&format!("{}\n{}", run.name(), run.subtitle()));
    }

    fn refresh_timer(&mut self, timer: &TimerView) {
        self.emit(&render_timer(timer, self.color));
    }

    fn refresh_splits(&mut self, rows: &[SplitRow]) {
        self.emit(&render_rows(rows, self.color));
    }
}

fn render_timer(view: &TimerView, color: bool) -> String {
    let label = match view.tone {
        TimerTone::Idle => "idle",
        TimerTone::Running => "running",
        TimerTone::Paused => "paused",
    };
    if !color {
        return format!("{} [{label}]", view.text);
    }
    match view.tone {
        TimerTone::Idle => format!("{} [{label}]", view.text),
        TimerTone::Running => format!("{GREEN}{}{RESET} [{label}]", view.text),
        TimerTone::Paused => format!("{YELLOW}{}{RESET} [{label}]", view.text),
    }
}

fn render_rows(rows: &[SplitRow], color: bool) -> String {
    let width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or_default();

    rows.iter()
        .map(|row| {
            let marker = if row.highlighted { ">" } else { " " };
            let delta = format!("{:>8}", row.delta);
            let delta = if color && !row.delta.is_empty() {
                let tone = match row.delta_tone {
                    DeltaTone::Ahead => GREEN,
                    DeltaTone::Behind => RED,
                };
                format!("{tone}{delta}{RESET}")
            } else {
                delta
            };
            let line = format!("{marker} {:<width$}  {delta}  {:>7}", row.name, row.time);
            let line = line.trim_end().to_string();
            if color && row.highlighted {
                format!("{REVERSE}{line}{RESET}")
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use insta::assert_snapshot;
    use splits_core::{ManualClock, Split};

    fn splitter() -> (Splitter<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let mut splitter = Splitter::new(clock.clone());
        splitter.replace_run(
            Run::new(
                "Any%",
                "",
                vec![
                    Split::new("Tutorial", Some(TimeDelta::seconds(10))),
                    Split::new("Boss", Some(TimeDelta::seconds(20))),
                ],
            ),
            None,
        );
        (splitter, clock)
    }

    fn feed(lines: &[&str]) -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        for line in lines {
            tx.send((*line).to_string()).unwrap();
        }
        rx
    }

    fn fast_config(runs_dir: &Path) -> Config {
        Config {
            runs_dir: runs_dir.to_path_buf(),
            target_fps: 1_000,
            ..Config::default()
        }
    }

    /// Drives a whole session from `lines`, returning what it wrote.
    fn session(splitter: &mut Splitter<ManualClock>, config: &Config, lines: &[&str]) -> String {
        let mut out = Vec::new();
        drive(
            splitter,
            config,
            &Keymap::default(),
            &feed(lines),
            &mut out,
            |_| {},
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn drive_dispatches_until_close() {
        let (mut splitter, _clock) = splitter();
        session(
            &mut splitter,
            &fast_config(Path::new(".")),
            &["t", "e", "unbound", "q", "r"],
        );

        assert!(splitter.is_running());
        assert_eq!(splitter.current_split_index(), 1);
    }

    #[test]
    fn drive_stops_at_end_of_input() {
        let (mut splitter, _clock) = splitter();
        session(&mut splitter, &fast_config(Path::new(".")), &["t"]);

        assert!(splitter.is_running());
    }

    #[test]
    fn drive_survives_failing_commands() {
        let (mut splitter, _clock) = splitter();
        session(&mut splitter, &fast_config(Path::new(".")), &["s", "t"]);

        assert!(splitter.is_running());
    }

    #[test]
    fn drive_ticks_while_idle() {
        let (mut splitter, _clock) = splitter();
        let (tx, rx) = mpsc::channel::<String>();
        let mut ticks = 0;

        drive(
            &mut splitter,
            &fast_config(Path::new(".")),
            &Keymap::default(),
            &rx,
            &mut io::sink(),
            |_| {
                ticks += 1;
                if ticks == 3 {
                    tx.send("q".to_string()).unwrap();
                }
            },
        )
        .unwrap();

        assert_eq!(ticks, 3);
    }

    #[test]
    fn directives_parse() {
        assert_eq!(Directive::parse(":runs"), Some(Directive::Runs));
        assert_eq!(Directive::parse(" :load  any% "), Some(Directive::Load("any%")));
        assert_eq!(Directive::parse(":load"), None);
        assert_eq!(Directive::parse(":runs extra"), None);
        assert_eq!(Directive::parse("runs"), None);
        assert_eq!(Directive::parse(":quit"), None);
    }

    #[test]
    fn session_lists_runs() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["glitchless.txt", "any.txt"] {
            std::fs::write(temp.path().join(name), "Run\n").unwrap();
        }
        let (mut splitter, _clock) = splitter();

        let output = session(&mut splitter, &fast_config(temp.path()), &[":runs", "q"]);

        assert_snapshot!(output, @r"
        any.txt
        glitchless.txt
        ");
    }

    #[test]
    fn session_switches_runs_and_resets() {
        let temp = tempfile::tempdir().unwrap();
        let other = temp.path().join("glitchless.txt");
        std::fs::write(&other, "Glitchless\nPB\n\nCave\t00:40.0\n").unwrap();
        let (mut splitter, clock) = splitter();
        splitter.toggle();
        clock.advance(TimeDelta::seconds(5));

        session(
            &mut splitter,
            &fast_config(temp.path()),
            &[":load glitchless", "t"],
        );

        assert_eq!(splitter.run().name(), "Glitchless");
        assert_eq!(splitter.path(), Some(other.as_path()));
        assert_eq!(splitter.projected_split_time(None), Some(TimeDelta::seconds(40)));
        assert!(splitter.is_running());
        assert_eq!(splitter.current_timer(), TimeDelta::zero());
    }

    #[test]
    fn session_keeps_current_run_when_load_fails() {
        let temp = tempfile::tempdir().unwrap();
        let (mut splitter, _clock) = splitter();

        session(
            &mut splitter,
            &fast_config(temp.path()),
            &[":load missing", "t"],
        );

        assert_eq!(splitter.run().name(), "Any%");
        assert!(splitter.is_running());
    }

    #[test]
    fn rows_render_plain() {
        let (mut splitter, clock) = splitter();
        splitter.toggle();
        clock.advance(TimeDelta::milliseconds(8_500));
        splitter.split();

        assert_snapshot!(render_rows(&splitter.split_rows(), false), @r"
          Tutorial      -1.5  00:08.5
        > Boss                00:28.5
        ");
    }

    #[test]
    fn timer_renders_plain() {
        let (mut splitter, clock) = splitter();
        assert_snapshot!(render_timer(&splitter.timer_view(), false), @"00:00.0 [idle]");

        splitter.toggle();
        clock.advance(TimeDelta::seconds(3));
        assert_snapshot!(render_timer(&splitter.timer_view(), false), @"00:03.0 [running]");

        splitter.toggle();
        assert_snapshot!(render_timer(&splitter.timer_view(), false), @"00:03.0 [paused]");
    }

    #[test]
    fn timer_renders_color_by_tone() {
        let view = TimerView {
            text: "00:03.0".to_string(),
            tone: TimerTone::Running,
        };
        assert!(render_timer(&view, true).starts_with(GREEN));
    }
}
