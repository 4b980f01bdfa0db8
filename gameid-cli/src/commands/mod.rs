pub(crate) mod config;
pub(crate) mod extract;
pub(crate) mod scan;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use gameid_lib::{BatchSummary, CatalogEntry, GameIdExtractor, ImageFile, run_batch};

use crate::error::CliError;

fn render(entry: &CatalogEntry, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string(entry)?)
    } else {
        Ok(entry.to_line())
    }
}

fn progress_bar(total: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Extract every image, printing one catalog line per image to stdout. The
/// per-image result line and the progress bar go to stderr.
pub(crate) fn run_catalog(
    images: &[ImageFile],
    json: bool,
    quiet: bool,
) -> Result<BatchSummary, CliError> {
    let pb = progress_bar(images.len(), quiet);
    let mut failure: Option<CliError> = None;

    let summary = run_batch(
        images,
        &GameIdExtractor::new(),
        |progress| {
            pb.set_position(progress.current as u64 - 1);
            pb.set_message(
                progress
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
        },
        |entry| match render(&entry, json) {
            Ok(line) => pb.suspend(|| {
                log::info!("{}", entry.describe());
                println!("{}", line);
            }),
            Err(e) => {
                failure.get_or_insert(e);
            }
        },
    );
    pb.finish_and_clear();

    match failure {
        Some(e) => Err(e),
        None => Ok(summary),
    }
}

/// Per-stage totals after a batch.
pub(crate) fn print_summary(summary: &BatchSummary) {
    log::info!("");
    log::info!(
        "{} {} image(s), {} read from disc content",
        "Done:".if_supports_color(Stderr, |t| t.bold()),
        summary.total,
        summary.from_image(),
    );
    for (stage, count) in summary.stages() {
        log::info!(
            "  {:<14} {}",
            format!("{}:", stage).if_supports_color(Stderr, |t| t.cyan()),
            count
        );
    }
}
