//! Minimal ISO 9660 reader: enough to find a file in the root directory and
//! pull the boot executable name out of SYSTEM.CNF.

use gameid_core::util::{decode_lossy, le_u32};
use gameid_core::{DiscError, GameId, SECTOR_SIZE};

use crate::sector::SectorSource;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// ISO 9660 Primary Volume Descriptor is always at sector 16.
pub const PVD_SECTOR: u64 = 16;

/// Offset of the root directory record inside the PVD.
const ROOT_RECORD_OFFSET: usize = 156;

/// Length of the root directory record inside the PVD.
const ROOT_RECORD_LEN: usize = 34;

/// Fixed part of a directory record, up to and including the name length byte.
const RECORD_FIXED_LEN: usize = 33;

/// Largest extent we are willing to read in one go. Root directories and
/// SYSTEM.CNF are a few sectors at most; anything bigger is a bad record.
const MAX_EXTENT_BYTES: u32 = 16 * 1024 * 1024;

/// Name of the boot configuration file.
pub const SYSTEM_CNF: &str = "SYSTEM.CNF";

// ---------------------------------------------------------------------------
// Directory records
// ---------------------------------------------------------------------------

/// A file or directory listed in an ISO 9660 directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File identifier, including any `;1` version suffix.
    pub name: String,
    /// First sector of the extent.
    pub lba: u32,
    /// Size of the extent in bytes.
    pub size: u32,
}

impl DirectoryEntry {
    /// Number of sectors spanned by the extent.
    pub fn sector_count(&self) -> u64 {
        (self.size as u64).div_ceil(SECTOR_SIZE as u64)
    }

    /// Case-insensitive prefix match, so `SYSTEM.CNF` finds `SYSTEM.CNF;1`.
    pub fn matches(&self, filename: &str) -> bool {
        self.name
            .to_uppercase()
            .starts_with(&filename.to_uppercase())
    }
}

/// Decode the location of the root directory from a PVD sector.
pub fn root_directory(pvd: &[u8]) -> Result<DirectoryEntry, DiscError> {
    let record = pvd
        .get(ROOT_RECORD_OFFSET..ROOT_RECORD_OFFSET + ROOT_RECORD_LEN)
        .ok_or(DiscError::TooSmall {
            expected: (ROOT_RECORD_OFFSET + ROOT_RECORD_LEN) as u64,
            actual: pvd.len() as u64,
        })?;

    // Both lookups are in bounds of the 34-byte slice
    let lba = le_u32(record, 2).unwrap_or_default();
    let size = le_u32(record, 10).unwrap_or_default();

    Ok(DirectoryEntry {
        name: String::new(),
        lba,
        size,
    })
}

/// Parse every record in a directory extent.
///
/// A zero length byte pads out the rest of the current sector; records never
/// straddle a sector boundary. A record running past the end of `data` ends
/// the walk.
pub fn parse_directory_entries(data: &[u8]) -> Vec<DirectoryEntry> {
    let mut entries = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let record_len = data[offset] as usize;
        if record_len == 0 {
            offset = (offset / SECTOR_SIZE + 1) * SECTOR_SIZE;
            continue;
        }

        let Some(record) = data.get(offset..offset + record_len) else {
            break;
        };
        if let Some(entry) = parse_directory_record(record) {
            entries.push(entry);
        }
        offset += record_len;
    }

    entries
}

/// Parse a single directory record.
fn parse_directory_record(data: &[u8]) -> Option<DirectoryEntry> {
    if data.len() < RECORD_FIXED_LEN {
        return None;
    }

    let lba = le_u32(data, 2)?;
    let size = le_u32(data, 10)?;
    let name_len = data[32] as usize;
    let name_bytes = data.get(RECORD_FIXED_LEN..RECORD_FIXED_LEN + name_len)?;

    let name = match name_bytes {
        [0x00] => ".".to_string(),
        [0x01] => "..".to_string(),
        _ => decode_lossy(name_bytes),
    };

    Some(DirectoryEntry { name, lba, size })
}

// ---------------------------------------------------------------------------
// File lookup
// ---------------------------------------------------------------------------

/// Read the extent described by `entry`, trimmed to its byte size.
pub fn read_file(
    source: &mut dyn SectorSource,
    entry: &DirectoryEntry,
) -> Result<Vec<u8>, DiscError> {
    if entry.size > MAX_EXTENT_BYTES {
        return Err(DiscError::corrupt_image(format!(
            "Extent '{}' claims {} bytes",
            entry.name, entry.size
        )));
    }
    let mut data = source.read_sectors(entry.lba as u64, entry.sector_count())?;
    data.truncate(entry.size as usize);
    Ok(data)
}

/// Find `filename` in the root directory.
///
/// Returns `Ok(None)` if the root directory was readable but holds no
/// matching entry.
pub fn locate(
    source: &mut dyn SectorSource,
    filename: &str,
) -> Result<Option<DirectoryEntry>, DiscError> {
    let pvd = source.read_sectors(PVD_SECTOR, 1)?;
    let root = root_directory(&pvd)?;
    let dir_data = read_file(source, &root)?;

    Ok(parse_directory_entries(&dir_data)
        .into_iter()
        .find(|entry| entry.matches(filename)))
}

// ---------------------------------------------------------------------------
// SYSTEM.CNF
// ---------------------------------------------------------------------------

/// Read SYSTEM.CNF and return the Game ID named on its `BOOT2` line.
pub fn read_system_cnf(
    source: &mut dyn SectorSource,
    entry: &DirectoryEntry,
) -> Result<Option<GameId>, DiscError> {
    let content = read_file(source, entry)?;
    Ok(parse_boot2(&decode_lossy(&content)))
}

/// Extract the boot executable name from SYSTEM.CNF text.
///
/// `BOOT2 = cdrom0:\SLUS_203.12;1` → `SLUS_203.12`
pub fn parse_boot2(content: &str) -> Option<GameId> {
    let line = content
        .lines()
        .find(|line| line.trim().to_uppercase().starts_with("BOOT2"))?;

    // Last path component; some discs omit the backslash ("cdrom0:SLUS_203.12;1")
    let filename = line.rsplit(['\\', '/', ':']).next()?;
    let filename = filename.split(';').next().unwrap_or(filename).trim();
    if filename.is_empty() {
        return None;
    }
    Some(GameId::new(filename))
}

/// Locate SYSTEM.CNF in the root directory and read its boot ID.
pub fn find_boot_id(source: &mut dyn SectorSource) -> Result<Option<GameId>, DiscError> {
    match locate(source, SYSTEM_CNF)? {
        Some(entry) => read_system_cnf(source, &entry),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "tests/iso9660_tests.rs"]
mod tests;
