//! Runs the extractor over a list of images and hands each result to the
//! catalog builder.

use std::collections::BTreeMap;
use std::path::Path;

use gameid_core::{ExtractStage, GameId};
use gameid_sony::GameIdExtractor;
use serde::Serialize;

use crate::scanner::ImageFile;

/// Reported before each image is processed.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// 1-based position of this image in the batch.
    pub current: usize,
    pub total: usize,
    pub path: &'a Path,
}

/// One line of the game catalog: the ID and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub game_id: GameId,
    pub source_filename: String,
    pub folder: String,
    pub stage: ExtractStage,
}

impl CatalogEntry {
    /// `GAME_ID|folder|filename`
    pub fn to_line(&self) -> String {
        format!("{}|{}|{}", self.game_id, self.folder, self.source_filename)
    }

    /// Human-readable result naming the stage that matched:
    /// `Jak.iso: JAK0_000.00 (synthesized)`
    pub fn describe(&self) -> String {
        format!("{}: {} ({})", self.source_filename, self.game_id, self.stage)
    }
}

/// Per-stage counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    by_stage: BTreeMap<ExtractStage, usize>,
}

impl BatchSummary {
    fn record(&mut self, stage: ExtractStage) {
        self.total += 1;
        *self.by_stage.entry(stage).or_default() += 1;
    }

    pub fn count(&self, stage: ExtractStage) -> usize {
        self.by_stage.get(&stage).copied().unwrap_or(0)
    }

    /// Images whose ID was read from the image itself.
    pub fn from_image(&self) -> usize {
        self.by_stage
            .iter()
            .filter(|(stage, _)| stage.reads_image())
            .map(|(_, n)| n)
            .sum()
    }

    /// Stages with a non-zero count, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (ExtractStage, usize)> + '_ {
        self.by_stage.iter().map(|(&stage, &n)| (stage, n))
    }
}

/// Extract every image in order.
///
/// `on_progress` is called before each image, `sink` with its entry after.
pub fn run_batch(
    images: &[ImageFile],
    extractor: &GameIdExtractor,
    mut on_progress: impl FnMut(BatchProgress<'_>),
    mut sink: impl FnMut(CatalogEntry),
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let total = images.len();

    for (i, image) in images.iter().enumerate() {
        on_progress(BatchProgress {
            current: i + 1,
            total,
            path: &image.path,
        });

        let extraction = extractor.extract_with_kind(&image.path, Some(image.kind));
        log::debug!(
            "{}: {} ({})",
            image.path.display(),
            extraction.game_id,
            extraction.stage
        );
        summary.record(extraction.stage);

        sink(CatalogEntry {
            game_id: extraction.game_id,
            source_filename: image.file_name(),
            folder: image.folder.clone(),
            stage: extraction.stage,
        });
    }

    summary
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
