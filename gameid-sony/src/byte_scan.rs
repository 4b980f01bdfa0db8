//! Byte-level recovery of a Game ID from raw image bytes.
//!
//! On a PlayStation disc the boot executable's directory record ends with the
//! volume sequence byte `0x01` and a name length of `0x0D` (13), followed by a
//! name like `SLUS_012.34;1`. When the filesystem can't be walked, scanning
//! the raw bytes for that shape still finds the ID.
//!
//! The matcher is a small state machine fed one byte at a time:
//!
//! ```text
//! Idle --01--> MatchedPrefix --0D--> PayloadPrefix (4 bytes)
//!                   |                      |
//!                   +-any--> SkippedWildcard --0D--+
//!
//! PayloadPrefix -> Underscore ('_' or '-') -> MiddleDigits (3 bytes)
//!               -> Dot ('.') -> SuffixDigits (2 bytes) -> Terminator (";1")
//! ```
//!
//! Any mismatch returns to `Idle`, and the mismatching byte is looked at again
//! as a possible `0x01`.

use std::io::Read;

use gameid_core::{DiscError, GameId};

/// Volume sequence number byte preceding the name length.
const PREFIX_START: u8 = 0x01;

/// Name length byte for an `AAAA_NNN.NN;1` identifier.
const PREFIX_NAME_LEN: u8 = 0x0D;

/// Version suffix that ends the file identifier.
const TERMINATOR: [u8; 2] = [b';', b'1'];

/// Audio-track marker some discs carry; it has the right shape but is not an ID.
pub const CDDA_PLACEHOLDER: &str = "CDDA_END.DA";

const PAYLOAD_PREFIX_LEN: usize = 4;
const MIDDLE_END: usize = 8;
const CANDIDATE_LEN: usize = 11;

const SCAN_CHUNK_SIZE: usize = 64 * 1024;

/// Matcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Waiting for `0x01`
    Idle,
    /// Saw `0x01`, expecting `0x0D` or one wildcard byte
    MatchedPrefix,
    /// Saw `0x01` and one other byte, expecting `0x0D`
    SkippedWildcard,
    /// Capturing the 4-character prefix (e.g. `SLUS`)
    PayloadPrefix,
    /// Expecting `_` or `-`
    Underscore,
    /// Capturing the 3 characters before the dot
    MiddleDigits,
    /// Expecting `.`
    Dot,
    /// Capturing the 2 characters after the dot
    SuffixDigits,
    /// Expecting `;1`
    Terminator,
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Still matching (or idle)
    Pending,
    /// A complete identifier was matched
    Found(GameId),
    /// A complete `CDDA_END.DA` marker was matched and thrown away
    Discarded,
}

/// Streaming matcher for `0x01 [any] 0x0D AAAA_NNN.NN;1` sequences.
#[derive(Debug, Clone)]
pub struct BootNameScanner {
    state: ScanState,
    candidate: Vec<char>,
    terminator_pos: usize,
}

impl Default for BootNameScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BootNameScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            candidate: Vec::with_capacity(CANDIDATE_LEN),
            terminator_pos: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn reset(&mut self) {
        self.state = ScanState::Idle;
        self.candidate.clear();
        self.terminator_pos = 0;
    }

    /// Drop the partial match and restart on `byte`.
    fn mismatch(&mut self, byte: u8) -> ScanEvent {
        self.reset();
        if byte == PREFIX_START {
            self.state = ScanState::MatchedPrefix;
        }
        ScanEvent::Pending
    }

    /// Advance the matcher by one byte.
    pub fn feed(&mut self, byte: u8) -> ScanEvent {
        match self.state {
            ScanState::Idle => {
                if byte == PREFIX_START {
                    self.state = ScanState::MatchedPrefix;
                }
            }
            ScanState::MatchedPrefix => {
                self.state = match byte {
                    PREFIX_NAME_LEN => ScanState::PayloadPrefix,
                    PREFIX_START => ScanState::MatchedPrefix,
                    _ => ScanState::SkippedWildcard,
                };
            }
            ScanState::SkippedWildcard => {
                if byte != PREFIX_NAME_LEN {
                    return self.mismatch(byte);
                }
                self.state = ScanState::PayloadPrefix;
            }
            ScanState::PayloadPrefix => {
                self.candidate.push(byte as char);
                if self.candidate.len() == PAYLOAD_PREFIX_LEN {
                    self.state = ScanState::Underscore;
                }
            }
            ScanState::Underscore => {
                if byte != b'_' && byte != b'-' {
                    return self.mismatch(byte);
                }
                self.candidate.push('_');
                self.state = ScanState::MiddleDigits;
            }
            ScanState::MiddleDigits => {
                self.candidate.push(byte as char);
                if self.candidate.len() == MIDDLE_END {
                    self.state = ScanState::Dot;
                }
            }
            ScanState::Dot => {
                if byte != b'.' {
                    return self.mismatch(byte);
                }
                self.candidate.push('.');
                self.state = ScanState::SuffixDigits;
            }
            ScanState::SuffixDigits => {
                self.candidate.push(byte as char);
                if self.candidate.len() == CANDIDATE_LEN {
                    self.state = ScanState::Terminator;
                }
            }
            ScanState::Terminator => {
                if byte != TERMINATOR[self.terminator_pos] {
                    return self.mismatch(byte);
                }
                self.terminator_pos += 1;
                if self.terminator_pos == TERMINATOR.len() {
                    return self.complete();
                }
            }
        }
        ScanEvent::Pending
    }

    /// Full `;1` seen: emit the candidate unless it is the CDDA marker.
    fn complete(&mut self) -> ScanEvent {
        let candidate: String = self.candidate.iter().collect();
        let event = if candidate.eq_ignore_ascii_case(CDDA_PLACEHOLDER) {
            ScanEvent::Discarded
        } else {
            ScanEvent::Found(GameId::new(candidate))
        };
        self.reset();
        event
    }
}

/// Scan an in-memory buffer, returning the first real identifier.
pub fn scan_bytes(data: &[u8]) -> Option<GameId> {
    let mut scanner = BootNameScanner::new();
    data.iter().find_map(|&byte| match scanner.feed(byte) {
        ScanEvent::Found(id) => Some(id),
        ScanEvent::Pending | ScanEvent::Discarded => None,
    })
}

/// Scan a stream to the end (or the first match), reading in 64 KiB chunks.
pub fn scan_reader(reader: &mut dyn Read) -> Result<Option<GameId>, DiscError> {
    let mut scanner = BootNameScanner::new();
    let mut buf = vec![0u8; SCAN_CHUNK_SIZE];
    let mut discarded = 0usize;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..n] {
            match scanner.feed(byte) {
                ScanEvent::Found(id) => return Ok(Some(id)),
                ScanEvent::Discarded => discarded += 1,
                ScanEvent::Pending => {}
            }
        }
    }

    if discarded > 0 {
        log::debug!("Byte scan skipped {} {} marker(s)", discarded, CDDA_PLACEHOLDER);
    }
    Ok(None)
}

#[cfg(test)]
#[path = "tests/byte_scan_tests.rs"]
mod tests;
