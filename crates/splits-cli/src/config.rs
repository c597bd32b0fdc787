//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use splits_core::{Command, Keymap, KeymapError, RUN_EXTENSION};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched for run files.
    pub runs_dir: PathBuf,

    /// Extension identifying run files.
    pub extension: String,

    /// Display refresh rate while playing.
    pub target_fps: u32,

    pub hotkeys: Hotkeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runs_dir: PathBuf::from("."),
            extension: RUN_EXTENSION.to_string(),
            target_fps: 30,
            hotkeys: Hotkeys::default(),
        }
    }
}

/// Key bound to each command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub reset: String,
    pub toggle: String,
    pub split: String,
    pub save: String,
    pub close: String,
}

impl Default for Hotkeys {
    fn default() -> Self {
        let key = |command: Command| {
            Keymap::DEFAULT_BINDINGS
                .into_iter()
                .find_map(|(bound, key)| (bound == command).then(|| key.to_string()))
                .unwrap_or_default()
        };
        Self {
            reset: key(Command::Reset),
            toggle: key(Command::Toggle),
            split: key(Command::Split),
            save: key(Command::Save),
            close: key(Command::Close),
        }
    }
}

impl Hotkeys {
    /// Validates the bindings into a dispatch keymap.
    pub fn keymap(&self) -> Result<Keymap, KeymapError> {
        Keymap::new([
            (Command::Reset, self.reset.as_str()),
            (Command::Toggle, self.toggle.as_str()),
            (Command::Split, self.split.as_str()),
            (Command::Save, self.save.as_str()),
            (Command::Close, self.close.as_str()),
        ])
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SPLITS_*, SPLITS_HOTKEYS__SPLIT)
        figment = figment.merge(Env::prefixed("SPLITS_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for splits.
///
/// On Linux: `~/.config/splits`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("splits"))
}
