//! Disc image container kinds, inferred from the file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Container format of a disc image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Uncompressed 2048 byte/sector ISO 9660 image.
    Iso,
    /// Block-indexed, LZ4-compressed ISO image.
    Zso,
    /// PS1 POPS disc image.
    Vcd,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [Self::Iso, Self::Zso, Self::Vcd];

    /// Match a file extension (without the dot, case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "iso" => Some(Self::Iso),
            "zso" => Some(Self::Zso),
            "vcd" => Some(Self::Vcd),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Zso => "zso",
            Self::Vcd => "vcd",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Iso => "ISO 9660",
            Self::Zso => "ZSO",
            Self::Vcd => "VCD",
        }
    }

    /// Whether an ID of unexpected length read from this container should be
    /// discarded in favor of a byte scan of the raw file.
    pub fn rescans_on_bad_length(&self) -> bool {
        matches!(self, Self::Iso | Self::Vcd)
    }
}

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod tests;
