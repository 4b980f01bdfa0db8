use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gameid_lib::ImageFile;

use crate::commands::{print_summary, run_catalog};
use crate::error::CliError;

/// Extract IDs for image files named on the command line.
pub(crate) fn run_extract(paths: Vec<PathBuf>, json: bool, quiet: bool) -> Result<(), CliError> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        match ImageFile::from_path(&path) {
            Some(image) => images.push(image),
            None => log::warn!(
                "Skipping {}: {}",
                path.display(),
                "unsupported extension".if_supports_color(Stderr, |t| t.dimmed()),
            ),
        }
    }

    if images.is_empty() {
        return Err(CliError::usage("No .iso, .zso or .vcd images given"));
    }

    let summary = run_catalog(&images, json, quiet)?;
    if images.len() > 1 && !json {
        print_summary(&summary);
    }
    Ok(())
}
