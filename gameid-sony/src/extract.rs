//! Per-file Game ID extraction.
//!
//! Stages run in order and the first one that produces an ID wins:
//!
//! 1. **Filename**: a stem already shaped like `SLUS_012.34` is trusted.
//! 2. **Structured**: SYSTEM.CNF from the ISO 9660 filesystem (ISO/ZSO), or
//!    the `cdrom:` boot line (VCD).
//! 3. **Byte scan**: directory-record pattern search over the image bytes.
//!    For ISO and VCD this also replaces a structured result whose length is
//!    not 11 or 12.
//! 4. **Synthesis**: an ID built from the filename. Always succeeds.
//!
//! Errors inside a stage are logged and end that stage only; extraction
//! itself cannot fail.

use std::path::Path;

use gameid_core::util::file_stem;
use gameid_core::{ContainerKind, DiscError, ExtractStage, GameId};

use crate::byte_scan;
use crate::image::DiscImage;
use crate::iso9660;
use crate::vcd;

/// A Game ID together with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub game_id: GameId,
    pub stage: ExtractStage,
}

impl Extraction {
    fn new(game_id: GameId, stage: ExtractStage) -> Self {
        Self { game_id, stage }
    }
}

/// Runs the extraction pipeline. Holds no state between files.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameIdExtractor;

impl GameIdExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the Game ID of the image at `path`, inferring the container
    /// from its extension. Unknown extensions only get the filename stages.
    pub fn extract(&self, path: &Path) -> Extraction {
        self.extract_with_kind(path, ContainerKind::from_path(path))
    }

    /// Extract with an explicit container kind.
    pub fn extract_with_kind(&self, path: &Path, kind: Option<ContainerKind>) -> Extraction {
        let stem = file_stem(path);

        if let Some(id) = GameId::from_filename(&stem) {
            return Extraction::new(id, ExtractStage::Filename);
        }

        let Some(kind) = kind else {
            log::debug!("{}: unknown container, using filename", path.display());
            return Extraction::new(GameId::synthesize(&stem), ExtractStage::Synthesized);
        };

        let mut found = match self.read_structured(path, kind) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("{}: {} lookup failed: {}", path.display(), kind.name(), e);
                None
            }
        };

        let needs_scan = match &found {
            None => true,
            Some(hit) => kind.rescans_on_bad_length() && !hit.game_id.has_accepted_length(),
        };
        if needs_scan {
            if let Some(hit) = found.take() {
                log::debug!(
                    "{}: discarding '{}' from {} (length {})",
                    path.display(),
                    hit.game_id,
                    hit.stage,
                    hit.game_id.len()
                );
            }
            found = match self.scan_image(path, kind) {
                Ok(id) => id.map(|id| Extraction::new(id, ExtractStage::ByteScan)),
                Err(e) => {
                    log::debug!("{}: byte scan failed: {}", path.display(), e);
                    None
                }
            };
        }

        found.unwrap_or_else(|| {
            log::debug!("{}: no Game ID in image, using filename", path.display());
            Extraction::new(GameId::synthesize(&stem), ExtractStage::Synthesized)
        })
    }

    /// Read the ID from SYSTEM.CNF (ISO/ZSO) or the boot line (VCD).
    fn read_structured(
        &self,
        path: &Path,
        kind: ContainerKind,
    ) -> Result<Option<Extraction>, DiscError> {
        let image = DiscImage::open(path, kind)?;
        match kind {
            ContainerKind::Iso | ContainerKind::Zso => {
                let mut source = image.into_sector_source()?;
                let id = iso9660::find_boot_id(&mut source)?;
                Ok(id.map(|id| Extraction::new(id, ExtractStage::SystemCnf)))
            }
            ContainerKind::Vcd => {
                let mut reader = image.into_raw_reader();
                let id = vcd::read_boot_id(&mut reader)?;
                Ok(id.map(|id| Extraction::new(id, ExtractStage::VcdBoot)))
            }
        }
    }

    /// Run the byte scanner over the whole image.
    fn scan_image(&self, path: &Path, kind: ContainerKind) -> Result<Option<GameId>, DiscError> {
        let mut stream = DiscImage::open(path, kind)?.into_content_stream()?;
        byte_scan::scan_reader(&mut stream)
    }
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
