use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gameid_lib::{Layout, Settings, resolve_games_root, resolve_layout, scan_images};

use crate::commands::{print_summary, run_catalog};
use crate::error::CliError;

/// Extract IDs for every image under the games root.
pub(crate) fn run_scan(
    root: Option<PathBuf>,
    layout: Option<Layout>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let root = resolve_games_root(root, &settings);
    let layout = resolve_layout(layout, &settings);

    if !root.is_dir() {
        return Err(CliError::usage(format!(
            "Games root {} is not a directory",
            root.display()
        )));
    }

    if !json {
        log::info!(
            "Scanning {} ({} layout: {})",
            root.display().if_supports_color(Stderr, |t| t.cyan()),
            layout,
            layout.folders().join(", "),
        );
    }

    let images = scan_images(&root, layout);
    if images.is_empty() {
        log::info!(
            "{}",
            "No disc images found".if_supports_color(Stderr, |t| t.dimmed())
        );
        return Ok(());
    }

    let summary = run_catalog(&images, json, quiet)?;
    if !json {
        print_summary(&summary);
    }
    Ok(())
}
