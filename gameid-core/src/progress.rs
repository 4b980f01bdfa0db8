use std::fmt;

use serde::{Deserialize, Serialize};

/// The extraction pipeline stage that produced a Game ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStage {
    /// Taken from a filename that already follows the `AAAA_NNN.NN` convention
    Filename,
    /// Read from the `BOOT2` line of SYSTEM.CNF in the ISO 9660 filesystem
    SystemCnf,
    /// Read from the `cdrom:` boot line of a VCD image
    VcdBoot,
    /// Recovered by scanning the image bytes for a directory record name
    ByteScan,
    /// Generated from the filename because nothing else matched
    Synthesized,
}

impl ExtractStage {
    pub const ALL: [ExtractStage; 5] = [
        Self::Filename,
        Self::SystemCnf,
        Self::VcdBoot,
        Self::ByteScan,
        Self::Synthesized,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::SystemCnf => "SYSTEM.CNF",
            Self::VcdBoot => "VCD boot line",
            Self::ByteScan => "byte scan",
            Self::Synthesized => "synthesized",
        }
    }

    /// True for the stages that actually read the ID from the image.
    pub fn reads_image(&self) -> bool {
        matches!(self, Self::SystemCnf | Self::VcdBoot | Self::ByteScan)
    }
}

impl fmt::Display for ExtractStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
