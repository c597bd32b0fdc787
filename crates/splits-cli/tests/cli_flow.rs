//! End-to-end tests driving the `splits` binary.
//!
//! Each test gets its own HOME so no user configuration leaks in.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use chrono::TimeDelta;
use tempfile::TempDir;

const RUN: &str = "Any%\nPB attempts\n\nTutorial\t00:10.0\nBoss\t00:30.0\n";

fn splits_binary() -> String {
    env!("CARGO_BIN_EXE_splits").to_string()
}

fn splits(home: &Path) -> Command {
    let mut command = Command::new(splits_binary());
    command
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");
    command
}

fn write_run(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, RUN).unwrap();
    path
}

fn play(home: &Path, run: &Path, input: &str, envs: &[(&str, &str)]) -> Output {
    let mut child = splits(home)
        .envs(envs.iter().copied())
        .arg("play")
        .arg(run)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn splits play");

    // The binary may exit before reading input, e.g. on a config error.
    let _ = child.stdin.take().unwrap().write_all(input.as_bytes());
    child.wait_with_output().unwrap()
}

/// Test listing finds run files in the given directory.
#[test]
fn test_list_runs() {
    let temp = TempDir::new().unwrap();
    write_run(temp.path(), "b.txt");
    write_run(temp.path(), "a.txt");
    std::fs::write(temp.path().join("readme.md"), "").unwrap();

    let output = splits(temp.path())
        .arg("list")
        .arg("--dir")
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a.txt\nb.txt\n");
}

/// Test a run can be shown by name from the configured runs directory.
#[test]
fn test_show_resolves_name_from_config() {
    let temp = TempDir::new().unwrap();
    let runs = temp.path().join("runs");
    std::fs::create_dir(&runs).unwrap();
    write_run(&runs, "any.txt");

    let config = temp.path().join("config.toml");
    std::fs::write(&config, format!("runs_dir = {:?}\n", runs.display().to_string())).unwrap();

    let output = splits(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("show")
        .arg("any")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "show should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Any%\nPB attempts\n\n"));
    assert!(stdout.contains("Boss      00:30.0"));
}

/// Test a missing run fails with a readable error.
#[test]
fn test_show_missing_run_fails() {
    let temp = TempDir::new().unwrap();

    let output = splits(temp.path())
        .arg("show")
        .arg(temp.path().join("missing.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load run"));
}

/// Test a full session: start, split twice, save, close.
#[test]
fn test_play_session_saves_new_projections() {
    let temp = TempDir::new().unwrap();
    let run = write_run(temp.path(), "any.txt");

    let output = play(temp.path(), &run, "t\ne\ne\ns\nq\n", &[]);
    assert!(
        output.status.success(),
        "play should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let saved = std::fs::read_to_string(&run).unwrap();
    let lines: Vec<_> = saved.lines().collect();
    assert_eq!(&lines[..3], &["Any%", "PB attempts", ""]);
    assert_eq!(lines.len(), 5);

    for (line, name) in lines[3..].iter().zip(["Tutorial", "Boss"]) {
        let (split, stamp) = line.split_once('\t').expect("split should have a time");
        assert_eq!(split, name);
        let time = splits_core::parse_time(stamp).unwrap();
        assert!(time < TimeDelta::seconds(10), "{name} saved as {stamp}");
    }
}

/// Test end of input closes the session without saving.
#[test]
fn test_play_end_of_input_leaves_run_untouched() {
    let temp = TempDir::new().unwrap();
    let run = write_run(temp.path(), "any.txt");

    let output = play(temp.path(), &run, "t\ne\n", &[]);

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&run).unwrap(), RUN);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Any%\nPB attempts\n"));
    assert!(stdout.contains("keys: r=reset  t=toggle  e=split  s=save  q=close"));
}

/// Test conflicting hotkeys are rejected before the session starts.
#[test]
fn test_play_rejects_conflicting_hotkeys() {
    let temp = TempDir::new().unwrap();
    let run = write_run(temp.path(), "any.txt");

    let output = play(temp.path(), &run, "q\n", &[("SPLITS_HOTKEYS__SAVE", "q")]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid hotkey configuration"));
}
