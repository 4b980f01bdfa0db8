//! Disc image fixtures shared by the unit tests.

use gameid_core::SECTOR_SIZE;

use crate::zso::{ZISO_MAGIC, ZSO_HEADER_SIZE};

/// Build a PVD sector whose root directory lives at `root_lba`.
pub fn make_pvd_sector(root_lba: u32, root_size: u32) -> Vec<u8> {
    let mut sector = vec![0u8; SECTOR_SIZE];
    sector[0] = 0x01; // PVD type
    sector[1..6].copy_from_slice(b"CD001");
    sector[6] = 0x01;

    let system = b"PLAYSTATION";
    sector[8..8 + system.len()].copy_from_slice(system);

    // Root directory record at offset 156 (34 bytes)
    sector[156] = 34;
    sector[158..162].copy_from_slice(&root_lba.to_le_bytes());
    sector[166..170].copy_from_slice(&root_size.to_le_bytes());
    sector[188] = 1; // name length
    sector
}

/// Build one directory record, with the volume sequence number set to 1 the
/// way mastering tools write it.
pub fn make_dir_record(name: &[u8], extent_lba: u32, data_length: u32) -> Vec<u8> {
    let id_len = name.len();
    let record_len = 33 + id_len + (id_len % 2 == 0) as usize; // pad to even
    let mut record = vec![0u8; record_len];
    record[0] = record_len as u8;
    record[2..6].copy_from_slice(&extent_lba.to_le_bytes());
    record[6..10].copy_from_slice(&extent_lba.to_be_bytes());
    record[10..14].copy_from_slice(&data_length.to_le_bytes());
    record[14..18].copy_from_slice(&data_length.to_be_bytes());
    record[28] = 0x01; // volume sequence (LE)
    record[31] = 0x01; // volume sequence (BE)
    record[32] = id_len as u8;
    record[33..33 + id_len].copy_from_slice(name);
    record
}

/// Build an ISO with `files` in its root directory.
///
/// Layout: sectors 0-15 empty, 16 PVD, 17 terminator, 18 root directory,
/// then one sector per file starting at 19.
pub fn make_iso(files: &[(&str, &[u8])]) -> Vec<u8> {
    let root_lba = 18u32;
    let mut data = vec![0u8; 16 * SECTOR_SIZE];
    data.extend(make_pvd_sector(root_lba, SECTOR_SIZE as u32));

    let mut terminator = vec![0u8; SECTOR_SIZE];
    terminator[0] = 0xFF;
    terminator[1..6].copy_from_slice(b"CD001");
    data.extend(terminator);

    let mut root = Vec::new();
    root.extend(make_dir_record(&[0x00], root_lba, SECTOR_SIZE as u32));
    root.extend(make_dir_record(&[0x01], root_lba, SECTOR_SIZE as u32));
    for (i, (name, content)) in files.iter().enumerate() {
        root.extend(make_dir_record(
            name.as_bytes(),
            root_lba + 1 + i as u32,
            content.len() as u32,
        ));
    }
    root.resize(SECTOR_SIZE, 0);
    data.extend(root);

    for (_, content) in files {
        let mut sector = content.to_vec();
        sector.resize(sector.len().div_ceil(SECTOR_SIZE).max(1) * SECTOR_SIZE, 0);
        data.extend(sector);
    }
    data
}

/// Build an ISO whose SYSTEM.CNF boots `serial`.
pub fn make_iso_with_system_cnf(serial: &str) -> Vec<u8> {
    let cnf = format!("BOOT2 = cdrom0:\\{};1\r\nVER = 1.00\r\nVMODE = NTSC\r\n", serial);
    make_iso(&[("SYSTEM.CNF;1", cnf.as_bytes())])
}

/// How to store each block when building a ZSO image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStorage {
    Plain,
    Lz4,
    /// LZ4 followed by this many zero bytes of padding
    PaddedLz4(usize),
}

/// Compress `image` into a ZSO file with `align = 0`.
///
/// `storage` picks the encoding for each block in turn and repeats its last
/// element. A trailing partial block is not indexed.
pub fn make_zso(image: &[u8], block_size: u32, storage: &[BlockStorage]) -> Vec<u8> {
    let block_count = image.len() / block_size as usize;
    let index_bytes = (block_count + 1) * 4;

    let mut header = Vec::with_capacity(ZSO_HEADER_SIZE);
    header.extend_from_slice(&ZISO_MAGIC.to_le_bytes());
    header.extend_from_slice(&(ZSO_HEADER_SIZE as u32).to_le_bytes());
    header.extend_from_slice(&(image.len() as u64).to_le_bytes());
    header.extend_from_slice(&block_size.to_le_bytes());
    header.push(1); // version
    header.push(0); // align
    header.extend_from_slice(&[0, 0]);

    let mut index = Vec::with_capacity(block_count + 1);
    let mut blocks = Vec::new();
    let base = (ZSO_HEADER_SIZE + index_bytes) as u32;

    for (i, chunk) in image.chunks_exact(block_size as usize).enumerate() {
        let mode = storage
            .get(i)
            .or(storage.last())
            .copied()
            .unwrap_or(BlockStorage::Plain);
        let offset = base + blocks.len() as u32;
        match mode {
            BlockStorage::Plain => {
                index.push(offset | 0x8000_0000);
                blocks.extend_from_slice(chunk);
            }
            BlockStorage::Lz4 => {
                index.push(offset);
                blocks.extend(lz4_flex::block::compress(chunk));
            }
            BlockStorage::PaddedLz4(pad) => {
                index.push(offset);
                blocks.extend(lz4_flex::block::compress(chunk));
                blocks.extend(std::iter::repeat_n(0u8, pad));
            }
        }
    }
    index.push(base + blocks.len() as u32);

    let mut out = header;
    for entry in index {
        out.extend_from_slice(&entry.to_le_bytes());
    }
    out.extend(blocks);
    out
}
