//! The canonical per-title Game ID and the filename-based normalizations.
//!
//! A canonical ID looks like `SLUS_012.34`: four letters, an underscore, three
//! digits, a dot and two digits. IDs copied verbatim from disc content are
//! occasionally 12 characters long and are kept as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a canonical Game ID (`AAAA_NNN.NN`).
pub const CANONICAL_LEN: usize = 11;

/// Index of the underscore separator in a canonical Game ID.
pub const UNDERSCORE_POS: usize = 4;

/// Index of the dot separator in a canonical Game ID.
pub const DOT_POS: usize = 8;

/// Number of payload characters a synthesized ID is built from.
const SYNTH_PAYLOAD_LEN: usize = 9;

/// Minimum filename stem length for the trusted-naming fast path.
const FAST_PATH_MIN_LEN: usize = 9;

/// An upper-cased Game ID such as `SLUS_012.34`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Wrap a raw identifier, upper-casing it.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the ID is 11 or 12 characters long, the two lengths accepted
    /// without rescanning the image.
    pub fn has_accepted_length(&self) -> bool {
        matches!(self.len(), 11 | 12)
    }

    /// True if the ID has the `AAAA_NNN.NN` shape (separators in place,
    /// exactly 11 characters).
    pub fn is_canonical(&self) -> bool {
        self.len() == CANONICAL_LEN && has_separators_at_canonical_positions(&self.0)
    }

    /// Trusted-naming fast path: a stem of at least 9 characters with `_` at
    /// index 4 and `.` at index 8 already carries the ID in its first 11
    /// characters.
    ///
    /// `"slus_012.34.Crash Bandicoot"` → `Some("SLUS_012.34")`
    pub fn from_filename(stem: &str) -> Option<Self> {
        if stem.chars().count() < FAST_PATH_MIN_LEN {
            return None;
        }
        if !has_separators_at_canonical_positions(stem) {
            return None;
        }
        let head: String = stem.chars().take(CANONICAL_LEN).collect();
        Some(Self::new(head))
    }

    /// Build an ID from a filename stem when nothing could be read from the
    /// image. Always produces the canonical 11-character layout.
    ///
    /// `"abc"` → `"ABC0_000.00"`
    pub fn synthesize(stem: &str) -> Self {
        let mut payload: Vec<char> = stem
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .take(SYNTH_PAYLOAD_LEN)
            .collect();
        payload.resize(SYNTH_PAYLOAD_LEN, '0');

        Self(insert_separators(&payload))
    }

    /// Move `_` and `.` back to indexes 4 and 8 for an 11-character ID whose
    /// separators are misplaced. Anything else is returned unchanged.
    ///
    /// `"SLUS.012_34"` → `"SLUS_012.34"`
    pub fn repair_separators(raw: &str) -> Self {
        if raw.chars().count() != CANONICAL_LEN || has_separators_at_canonical_positions(raw) {
            return Self::new(raw);
        }
        let cleaned: Vec<char> = raw.chars().filter(|&c| c != '_' && c != '.').collect();
        Self::new(insert_separators(&cleaned))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for GameId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for GameId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

fn has_separators_at_canonical_positions(s: &str) -> bool {
    let mut chars = s.chars();
    chars.nth(UNDERSCORE_POS) == Some('_') && chars.nth(DOT_POS - UNDERSCORE_POS - 1) == Some('.')
}

/// Lay out `chars` as `[0..4] _ [4..7] . [7..]`, tolerating short input.
fn insert_separators(chars: &[char]) -> String {
    let split_a = chars.len().min(4);
    let split_b = chars.len().min(7);

    let mut out = String::with_capacity(chars.len() + 2);
    out.extend(&chars[..split_a]);
    out.push('_');
    out.extend(&chars[split_a..split_b]);
    out.push('.');
    out.extend(&chars[split_b..]);
    out
}

#[cfg(test)]
#[path = "tests/game_id_tests.rs"]
mod tests;
