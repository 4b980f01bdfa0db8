//! Shared application settings (games root, layout, config file location).
//!
//! The settings file is always `~/.config/gameid/settings.toml`, and the
//! games-root resolution is the same for every command.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::scanner::Layout;

/// Canonical path to the settings file: `~/.config/gameid/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gameid").join("settings.toml")
}

/// The parts of `settings.toml` this crate understands. Unknown keys are
/// ignored on read and preserved on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the `DVD`/`CD`/`POPS` folders.
    pub games_root: Option<PathBuf>,
    pub layout: Option<Layout>,
}

impl Settings {
    /// Load from the canonical path. A missing or unparsable file yields the
    /// defaults.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Settings>(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Saved games root, ignoring an empty string.
    pub fn games_root(&self) -> Option<&Path> {
        self.library
            .games_root
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Resolve the games root using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `library.games_root` in `settings.toml`
/// 3. Current working directory
pub fn resolve_games_root(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = settings.games_root() {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve the folder layout: CLI override, then settings, then PS2.
pub fn resolve_layout(cli_override: Option<Layout>, settings: &Settings) -> Layout {
    cli_override
        .or(settings.library.layout)
        .unwrap_or_default()
}

/// Save (or clear) the games root in the canonical settings file.
pub fn save_games_root(path: Option<&Path>) -> io::Result<()> {
    save_games_root_to(&settings_path(), path)
}

/// Save (or clear) `library.games_root` in the settings file at `settings`.
///
/// Uses `toml::Value` for a surgical update so any other keys are preserved.
pub fn save_games_root_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    // Ensure [library] table exists
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let library = table
        .entry("library")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let lib_table = library
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[library] is not a table"))?;

    match path {
        Some(p) => {
            lib_table.insert(
                "games_root".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            lib_table.remove("games_root");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
