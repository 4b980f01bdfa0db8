//! Game ID extraction for PlayStation-family disc images.
//!
//! Supports:
//! - ISO images (2048 byte/sector ISO 9660)
//! - ZSO compressed images (LZ4 blocks)
//! - VCD images (PS1 POPS)

pub mod byte_scan;
pub mod extract;
pub mod image;
pub mod iso9660;
pub mod sector;
pub mod vcd;
pub mod zso;

#[cfg(test)]
mod test_support;

pub use extract::{Extraction, GameIdExtractor};
pub use image::DiscImage;
pub use iso9660::DirectoryEntry;
pub use sector::{RawSectorSource, SectorSource, SectorStream};
pub use zso::{ZsoHeader, ZsoReader};
