//! ZSO compressed disc images.
//!
//! A ZSO file is a 24-byte header, a table of `block_count + 1` u32 offsets,
//! and the blocks themselves. Each block is either stored plain or compressed
//! with raw LZ4, and decompresses to exactly `block_size` bytes.
//!
//! Index entries hold the block's file offset in units of `1 << align`; the
//! top bit marks a block stored plain. The compressed length of block `i` is
//! the distance to entry `i + 1`.

use std::io::{Read, SeekFrom};

use gameid_core::{DiscError, ReadSeek};

use crate::sector::{SectorSource, sector_offset};

/// `"ZISO"` read as a little-endian u32.
pub const ZISO_MAGIC: u32 = 0x4F53_495A;

/// Size of the fixed ZSO header; the index table follows immediately.
pub const ZSO_HEADER_SIZE: usize = 24;

/// Index entry flag for a block stored without compression.
const PLAIN_FLAG: u32 = 0x8000_0000;

/// Index entry bits holding the aligned block offset.
const OFFSET_MASK: u32 = 0x7FFF_FFFF;

/// Largest alignment shift that keeps a 31-bit offset inside a u64.
const MAX_ALIGN: u8 = 32;

/// Parsed ZSO file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZsoHeader {
    pub magic: u32,
    pub header_size: u32,
    /// Size of the decompressed image in bytes.
    pub total_bytes: u64,
    /// Decompressed size of each block (power of two).
    pub block_size: u32,
    pub version: u8,
    /// Index offsets are shifted left by this many bits.
    pub align: u8,
}

impl ZsoHeader {
    /// Parse the 24-byte header.
    pub fn parse(bytes: &[u8; ZSO_HEADER_SIZE]) -> Result<Self, DiscError> {
        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != ZISO_MAGIC {
            return Err(DiscError::invalid_format(format!(
                "Expected ZISO magic 0x{:08X}, got 0x{:08X}",
                ZISO_MAGIC, magic
            )));
        }

        let header_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let total_bytes = u64::from_le_bytes([
            bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
        ]);
        let block_size = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let version = bytes[20];
        let align = bytes[21];
        // bytes 22-23 reserved

        if block_size == 0 || !block_size.is_power_of_two() {
            return Err(DiscError::invalid_format(format!(
                "ZSO block size {} is not a power of two",
                block_size
            )));
        }
        if align > MAX_ALIGN {
            return Err(DiscError::invalid_format(format!(
                "ZSO alignment shift {} exceeds {}",
                align, MAX_ALIGN
            )));
        }

        Ok(Self {
            magic,
            header_size,
            total_bytes,
            block_size,
            version,
            align,
        })
    }

    /// Read and parse the header from the start of `reader`.
    pub fn read(reader: &mut dyn ReadSeek) -> Result<Self, DiscError> {
        reader.seek(SeekFrom::Start(0))?;
        let mut buf = [0u8; ZSO_HEADER_SIZE];
        reader.read_exact(&mut buf)?;
        Self::parse(&buf)
    }

    /// Number of complete blocks addressed by the index table.
    pub fn block_count(&self) -> u64 {
        self.total_bytes / self.block_size as u64
    }
}

/// Where a block's bytes live in the ZSO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation {
    pub offset: u64,
    pub len: u64,
    pub plain: bool,
}

/// The block offset table.
#[derive(Debug, Clone)]
pub struct BlockIndex {
    entries: Vec<u32>,
    align: u8,
}

impl BlockIndex {
    /// Build an index from raw entries (`block_count + 1` of them).
    pub fn new(entries: Vec<u32>, align: u8) -> Result<Self, DiscError> {
        if entries.is_empty() {
            return Err(DiscError::corrupt_image("ZSO index table is empty"));
        }
        if align > MAX_ALIGN {
            return Err(DiscError::corrupt_image(format!(
                "ZSO alignment shift {} exceeds {}",
                align, MAX_ALIGN
            )));
        }
        Ok(Self { entries, align })
    }

    /// Read the table that follows the header.
    pub fn read(reader: &mut dyn ReadSeek, header: &ZsoHeader) -> Result<Self, DiscError> {
        let entry_count = header.block_count() + 1;
        let table_bytes = entry_count.saturating_mul(4);

        let file_len = reader.seek(SeekFrom::End(0))?;
        if (ZSO_HEADER_SIZE as u64).saturating_add(table_bytes) > file_len {
            return Err(DiscError::corrupt_image(format!(
                "ZSO index of {} entries runs past end of file ({} bytes)",
                entry_count, file_len
            )));
        }

        reader.seek(SeekFrom::Start(ZSO_HEADER_SIZE as u64))?;
        let mut raw = vec![0u8; table_bytes as usize];
        reader.read_exact(&mut raw)?;

        let entries = raw
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::new(entries, header.align)
    }

    pub fn block_count(&self) -> u64 {
        (self.entries.len() - 1) as u64
    }

    /// File location of `block`.
    pub fn locate(&self, block: u64) -> Result<BlockLocation, DiscError> {
        let i = usize::try_from(block)
            .ok()
            .filter(|&i| i + 1 < self.entries.len())
            .ok_or_else(|| {
                DiscError::corrupt_image(format!(
                    "Block {} is outside the index ({} blocks)",
                    block,
                    self.block_count()
                ))
            })?;

        let entry = self.entries[i];
        let offset = self.aligned(entry);
        let next = self.aligned(self.entries[i + 1]);
        if next < offset {
            return Err(DiscError::corrupt_image(format!(
                "ZSO index offsets decrease at block {} (0x{:X} -> 0x{:X})",
                block, offset, next
            )));
        }

        Ok(BlockLocation {
            offset,
            len: next - offset,
            plain: entry & PLAIN_FLAG != 0,
        })
    }

    fn aligned(&self, entry: u32) -> u64 {
        ((entry & OFFSET_MASK) as u64) << self.align
    }
}

/// Decode one LZ4 block, tolerating trailing padding after the compressed
/// stream.
///
/// Some encoders pad blocks, which makes the stream fail to decode or decode
/// to the wrong size. Each failure drops one trailing byte and retries; the
/// number of attempts is bounded by the input length.
pub fn decompress_block(compressed: &[u8], block_size: usize) -> Result<Vec<u8>, DiscError> {
    let mut end = compressed.len();
    while end > 0 {
        match lz4_flex::block::decompress(&compressed[..end], block_size) {
            Ok(out) if out.len() == block_size => {
                if end < compressed.len() {
                    log::debug!(
                        "LZ4 block decoded after trimming {} trailing bytes",
                        compressed.len() - end
                    );
                }
                return Ok(out);
            }
            Ok(_) | Err(_) => end -= 1,
        }
    }

    Err(DiscError::decode(format!(
        "LZ4 block of {} bytes never decoded to {} bytes",
        compressed.len(),
        block_size
    )))
}

/// Sector reader over a ZSO image, decompressing blocks on demand.
#[derive(Debug)]
pub struct ZsoReader<R> {
    reader: R,
    header: ZsoHeader,
    index: BlockIndex,
    file_len: u64,
}

impl<R: ReadSeek> ZsoReader<R> {
    /// Parse the header and index table.
    pub fn open(mut reader: R) -> Result<Self, DiscError> {
        let header = ZsoHeader::read(&mut reader)?;
        Self::with_header(reader, header)
    }

    /// Build a reader from an already-parsed header; reads the index table.
    pub fn with_header(mut reader: R, header: ZsoHeader) -> Result<Self, DiscError> {
        let index = BlockIndex::read(&mut reader, &header)?;
        let file_len = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            header,
            index,
            file_len,
        })
    }

    pub fn header(&self) -> &ZsoHeader {
        &self.header
    }

    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    /// Decompress `count` sectors starting at `sector`.
    ///
    /// Blocks past the end of the index table are skipped, so a range running
    /// off the end of the image returns the bytes that exist.
    pub fn decompress_range(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        let start = sector_offset(sector)?;
        let end = sector
            .checked_add(count)
            .map(sector_offset)
            .transpose()?
            .ok_or_else(|| DiscError::corrupt_image("Sector range overflows"))?;

        let block_size = self.header.block_size as u64;
        let first_block = start / block_size;
        let last_block = end.div_ceil(block_size).min(self.index.block_count());

        let mut out = Vec::with_capacity((end - start).min(64 * 1024 * 1024) as usize);
        for block in first_block..last_block {
            let data = self.read_block(block)?;
            let block_start = block * block_size;

            let from = start.saturating_sub(block_start) as usize;
            let to = ((end - block_start) as usize).min(data.len());
            if from < to {
                out.extend_from_slice(&data[from..to]);
            }
        }
        Ok(out)
    }

    /// Read and, if needed, decompress one block.
    fn read_block(&mut self, block: u64) -> Result<Vec<u8>, DiscError> {
        let loc = self.index.locate(block)?;
        if loc.offset.saturating_add(loc.len) > self.file_len {
            return Err(DiscError::corrupt_image(format!(
                "Block {} ({} bytes at 0x{:X}) runs past end of file",
                block, loc.len, loc.offset
            )));
        }

        self.reader.seek(SeekFrom::Start(loc.offset))?;
        let mut data = vec![0u8; loc.len as usize];
        self.reader.read_exact(&mut data)?;

        if loc.plain {
            data.truncate(self.header.block_size as usize);
            Ok(data)
        } else {
            decompress_block(&data, self.header.block_size as usize)
        }
    }
}

impl<R: ReadSeek> SectorSource for ZsoReader<R> {
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        self.decompress_range(sector, count)
    }
}

#[cfg(test)]
#[path = "tests/zso_tests.rs"]
mod tests;
