//! The five user commands and their key bindings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::clock::Clock;
use crate::error::SplitError;
use crate::splitter::Splitter;

/// A mutating command issued by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Reset,
    Toggle,
    Split,
    Save,
    Close,
}

/// What the front-end should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command implementation over a [`Splitter`].
pub type Handler<C> = fn(&mut Splitter<C>) -> Result<Flow, SplitError>;

impl Command {
    /// Every command, in display order.
    pub const ALL: [Self; 5] = [
        Self::Reset,
        Self::Toggle,
        Self::Split,
        Self::Save,
        Self::Close,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Toggle => "toggle",
            Self::Split => "split",
            Self::Save => "save",
            Self::Close => "close",
        }
    }

    /// Looks up the implementation of this command.
    pub fn handler<C: Clock>(self) -> Handler<C> {
        match self {
            Self::Reset => reset,
            Self::Toggle => toggle,
            Self::Split => split,
            Self::Save => save,
            Self::Close => close,
        }
    }
}

fn reset<C: Clock>(splitter: &mut Splitter<C>) -> Result<Flow, SplitError> {
    splitter.reset();
    Ok(Flow::Continue)
}

fn toggle<C: Clock>(splitter: &mut Splitter<C>) -> Result<Flow, SplitError> {
    splitter.toggle();
    Ok(Flow::Continue)
}

fn split<C: Clock>(splitter: &mut Splitter<C>) -> Result<Flow, SplitError> {
    splitter.split();
    Ok(Flow::Continue)
}

fn save<C: Clock>(splitter: &mut Splitter<C>) -> Result<Flow, SplitError> {
    splitter.save()?;
    Ok(Flow::Continue)
}

fn close<C: Clock>(splitter: &mut Splitter<C>) -> Result<Flow, SplitError> {
    Ok(splitter.close())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Error type for unknown command names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(String);

/// Errors found while building a [`Keymap`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("empty key bound to {command}")]
    EmptyKey { command: Command },

    #[error("key {key:?} bound to both {first} and {second}")]
    DuplicateKey {
        key: String,
        first: Command,
        second: Command,
    },

    #[error("no key bound to {command}")]
    Unbound { command: Command },
}

/// A validated key → command table.
///
/// Every command is bound to exactly one non-empty key, and no key is
/// shared between commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<String, Command>,
}

impl Keymap {
    pub const DEFAULT_BINDINGS: [(Command, &'static str); 5] = [
        (Command::Reset, "r"),
        (Command::Toggle, "t"),
        (Command::Split, "e"),
        (Command::Save, "s"),
        (Command::Close, "q"),
    ];

    /// Builds a keymap, rejecting empty, shared or missing bindings.
    pub fn new<I, K>(bindings: I) -> Result<Self, KeymapError>
    where
        I: IntoIterator<Item = (Command, K)>,
        K: Into<String>,
    {
        let mut table: HashMap<String, Command> = HashMap::new();

        for (command, key) in bindings {
            let key = key.into().trim().to_string();
            if key.is_empty() {
                return Err(KeymapError::EmptyKey { command });
            }
            if let Some(first) = table.get(&key) {
                return Err(KeymapError::DuplicateKey {
                    key,
                    first: *first,
                    second: command,
                });
            }
            table.insert(key, command);
        }

        for command in Command::ALL {
            if !table.values().any(|bound| *bound == command) {
                return Err(KeymapError::Unbound { command });
            }
        }

        Ok(Self { bindings: table })
    }

    /// Resolves a key press to its command.
    pub fn lookup(&self, key: &str) -> Option<Command> {
        self.bindings.get(key.trim()).copied()
    }

    /// The key bound to `command`.
    pub fn key_for(&self, command: Command) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == command)
            .map(|(key, _)| key.as_str())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = Self::DEFAULT_BINDINGS
            .iter()
            .map(|(command, key)| (key.to_string(), *command))
            .collect();
        Self { bindings }
    }
}
