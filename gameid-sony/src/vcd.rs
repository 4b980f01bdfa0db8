//! PS1 POPS (`.vcd`) images.
//!
//! The embedded SYSTEM.CNF text is found by scanning the image line by line
//! for `BOOT = cdrom:\SLUS_012.34;1`.

use std::io::BufRead;

use gameid_core::util::decode_lossy;
use gameid_core::{DiscError, GameId};

const CDROM_TAG: &[u8] = b"cdrom:";
const BOOT_TAG: &[u8] = b"boot";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Extract the boot ID from a line containing both `cdrom:` and `boot`
/// (case-insensitive). Returns `None` for any other line.
pub fn parse_boot_line(line: &[u8]) -> Option<GameId> {
    let line = line.trim_ascii();
    let lower = line.to_ascii_lowercase();
    if find(&lower, BOOT_TAG).is_none() {
        return None;
    }
    let start = find(&lower, CDROM_TAG)? + CDROM_TAG.len();

    let segment = line[start..].split(|&b| b == b';').next().unwrap_or_default();
    let component = segment.rsplit(|&b| b == b'\\').next().unwrap_or_default();

    Some(GameId::repair_separators(&decode_lossy(component).to_uppercase()))
}

/// Scan a VCD image for its boot line.
///
/// Only the first `cdrom:`/`boot` line counts; if it yields an empty name the
/// scan reports nothing rather than looking further.
pub fn read_boot_id(reader: &mut dyn BufRead) -> Result<Option<GameId>, DiscError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if let Some(id) = parse_boot_line(&line) {
            return Ok(if id.is_empty() { None } else { Some(id) });
        }
    }
}

#[cfg(test)]
#[path = "tests/vcd_tests.rs"]
mod tests;
