//! An opened disc image file and the readers built on top of it.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use gameid_core::{ContainerKind, DiscError};

use crate::sector::{RawSectorSource, SectorSource, SectorStream};
use crate::zso::{ZsoHeader, ZsoReader};

/// A disc image opened for a single extraction. The file handle is closed
/// when this value (or the reader made from it) is dropped.
#[derive(Debug)]
pub struct DiscImage {
    path: PathBuf,
    kind: ContainerKind,
    file: File,
}

impl DiscImage {
    pub fn open(path: &Path, kind: ContainerKind) -> Result<Self, DiscError> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Sector access for the filesystem reader.
    pub fn into_sector_source(self) -> Result<Box<dyn SectorSource>, DiscError> {
        match self.kind {
            ContainerKind::Iso => Ok(Box::new(RawSectorSource::new(self.file))),
            ContainerKind::Zso => Ok(Box::new(ZsoReader::open(self.file)?)),
            ContainerKind::Vcd => Err(DiscError::invalid_format(
                "VCD images are not addressable as 2048-byte sectors",
            )),
        }
    }

    /// A buffered reader over the raw file bytes.
    pub fn into_raw_reader(self) -> BufReader<File> {
        BufReader::new(self.file)
    }

    /// The image content as one byte stream, for the byte scanner.
    ///
    /// ZSO images are decompressed on the fly; a file whose ZSO header does
    /// not parse is scanned as raw bytes instead.
    pub fn into_content_stream(mut self) -> Result<Box<dyn Read>, DiscError> {
        if self.kind == ContainerKind::Zso {
            match ZsoHeader::read(&mut self.file) {
                Ok(header) => {
                    let reader = ZsoReader::with_header(self.file, header)?;
                    return Ok(Box::new(SectorStream::new(reader)));
                }
                Err(e) => {
                    log::debug!(
                        "{}: not a valid ZSO ({}), scanning raw bytes",
                        self.path.display(),
                        e
                    );
                    self.file.seek(SeekFrom::Start(0))?;
                }
            }
        }
        Ok(Box::new(self.into_raw_reader()))
    }
}
