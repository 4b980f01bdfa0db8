//! Sector-addressed access to disc images.
//!
//! Every container exposes the same 2048-byte logical sectors, whether the
//! bytes come straight from an ISO file or out of a compressed block.

use std::io::{self, Read, SeekFrom};

use gameid_core::{DiscError, ReadSeek, SECTOR_SIZE};

/// Number of sectors pulled per refill when streaming a sector source.
const STREAM_CHUNK_SECTORS: u64 = 32;

/// Random access to 2048-byte logical sectors.
pub trait SectorSource {
    /// Read `count` consecutive sectors starting at `sector`.
    ///
    /// Sources backed by a fixed-length image may return fewer bytes when the
    /// range runs past the end of the image.
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError>;
}

impl<S: SectorSource + ?Sized> SectorSource for &mut S {
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        (**self).read_sectors(sector, count)
    }
}

impl<S: SectorSource + ?Sized> SectorSource for Box<S> {
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        (**self).read_sectors(sector, count)
    }
}

/// Byte offset of `sector`, or an error if it overflows.
pub(crate) fn sector_offset(sector: u64) -> Result<u64, DiscError> {
    sector
        .checked_mul(SECTOR_SIZE as u64)
        .ok_or_else(|| DiscError::corrupt_image(format!("Sector {} is out of range", sector)))
}

/// Sectors read directly from an uncompressed ISO image.
pub struct RawSectorSource<R> {
    reader: R,
}

impl<R: ReadSeek> RawSectorSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: ReadSeek> SectorSource for RawSectorSource<R> {
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        let offset = sector_offset(sector)?;
        let len = usize::try_from(count)
            .ok()
            .and_then(|c| c.checked_mul(SECTOR_SIZE))
            .ok_or_else(|| DiscError::corrupt_image(format!("{} sectors is too many", count)))?;

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; len];
        self.reader.read_exact(&mut data).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                DiscError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("Sectors {}..{} are beyond end of image", sector, sector + count),
                ))
            } else {
                DiscError::Io(e)
            }
        })?;
        Ok(data)
    }
}

/// Sequential `Read` over a sector source, from sector 0 until the source
/// stops returning full chunks.
pub struct SectorStream<S> {
    source: S,
    next_sector: u64,
    buf: Vec<u8>,
    pos: usize,
    exhausted: bool,
}

impl<S: SectorSource> SectorStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            next_sector: 0,
            buf: Vec::new(),
            pos: 0,
            exhausted: false,
        }
    }

    fn refill(&mut self) -> io::Result<()> {
        self.buf = self
            .source
            .read_sectors(self.next_sector, STREAM_CHUNK_SECTORS)
            .map_err(io::Error::other)?;
        self.pos = 0;
        self.next_sector += STREAM_CHUNK_SECTORS;
        if self.buf.len() < STREAM_CHUNK_SECTORS as usize * SECTOR_SIZE {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl<S: SectorSource> Read for SectorStream<S> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.buf.len() {
            if self.exhausted {
                return Ok(0);
            }
            self.refill()?;
        }
        let n = out.len().min(self.buf.len() - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[cfg(test)]
#[path = "tests/sector_tests.rs"]
mod tests;
