use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gameid_lib::settings::{load_settings_string, save_games_root};
use gameid_lib::{Settings, resolve_games_root, resolve_layout, settings_path};

use crate::error::CliError;

/// Show the settings file and the effective values.
pub(crate) fn run_config_show(root: Option<PathBuf>) {
    let path = settings_path();
    let settings = Settings::load();

    log::info!(
        "{}",
        "gameid Configuration".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(exists)".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(not found)".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }

    let source = if root.is_some() {
        "--root"
    } else if settings.games_root().is_some() {
        "settings"
    } else {
        "current directory"
    };
    log::info!(
        "  Games root:    {} {}",
        resolve_games_root(root, &settings)
            .display()
            .if_supports_color(Stderr, |t| t.cyan()),
        format!("({})", source).if_supports_color(Stderr, |t| t.dimmed()),
    );
    log::info!("  Layout:        {}", resolve_layout(None, &settings));

    if let Some(contents) = load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stderr, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path to stdout, for use in scripts.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Save or clear the default games root.
pub(crate) fn run_config_set_root(
    path: Option<PathBuf>,
    global_root: Option<PathBuf>,
    clear: bool,
) -> Result<(), CliError> {
    if clear {
        save_games_root(None)
            .map_err(|e| CliError::config(format!("could not update settings: {}", e)))?;
        log::info!(
            "{} saved games root cleared",
            "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        );
        return Ok(());
    }

    let target = path
        .or(global_root)
        .ok_or_else(|| CliError::usage("Give a path (or --root) to save, or --clear"))?;
    let target = target
        .canonicalize()
        .map_err(|e| CliError::config(format!("{}: {}", target.display(), e)))?;
    if !target.is_dir() {
        return Err(CliError::config(format!(
            "{} is not a directory",
            target.display()
        )));
    }

    save_games_root(Some(&target))
        .map_err(|e| CliError::config(format!("could not update settings: {}", e)))?;
    log::info!(
        "{} games root set to {}",
        "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        target.display().if_supports_color(Stderr, |t| t.cyan()),
    );
    Ok(())
}
