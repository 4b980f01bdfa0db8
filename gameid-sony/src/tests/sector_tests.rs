use super::*;
use std::io::Cursor;

fn numbered_sectors(count: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(count * SECTOR_SIZE);
    for i in 0..count {
        data.extend(std::iter::repeat_n(i as u8, SECTOR_SIZE));
    }
    data
}

#[test]
fn test_raw_reads_requested_sectors() {
    let mut source = RawSectorSource::new(Cursor::new(numbered_sectors(4)));
    let data = source.read_sectors(1, 2).unwrap();
    assert_eq!(data.len(), 2 * SECTOR_SIZE);
    assert!(data[..SECTOR_SIZE].iter().all(|&b| b == 1));
    assert!(data[SECTOR_SIZE..].iter().all(|&b| b == 2));
}

#[test]
fn test_raw_past_end_is_io_error() {
    let mut source = RawSectorSource::new(Cursor::new(numbered_sectors(2)));
    match source.read_sectors(1, 2) {
        Err(DiscError::Io(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
            assert!(e.to_string().contains("beyond end of image"));
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_sector_offset_overflow() {
    assert!(matches!(
        sector_offset(u64::MAX),
        Err(DiscError::CorruptImage(_))
    ));
    assert_eq!(sector_offset(16).unwrap(), 16 * 2048);
}

/// Serves whatever prefix of its data the request covers.
struct ShortSource(Vec<u8>);

impl SectorSource for ShortSource {
    fn read_sectors(&mut self, sector: u64, count: u64) -> Result<Vec<u8>, DiscError> {
        let start = (sector as usize * SECTOR_SIZE).min(self.0.len());
        let end = ((sector + count) as usize * SECTOR_SIZE).min(self.0.len());
        Ok(self.0[start..end].to_vec())
    }
}

#[test]
fn test_stream_reads_everything() {
    // 40 sectors plus a partial tail spans two refills
    let mut data = numbered_sectors(40);
    data.extend_from_slice(b"tail");
    let mut stream = SectorStream::new(ShortSource(data.clone()));

    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_stream_exact_multiple_of_chunk() {
    let data = numbered_sectors(STREAM_CHUNK_SECTORS as usize);
    let mut stream = SectorStream::new(ShortSource(data.clone()));

    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    assert_eq!(out.len(), data.len());
}

#[test]
fn test_stream_through_mut_ref() {
    let mut source = ShortSource(numbered_sectors(3));
    let mut out = Vec::new();
    SectorStream::new(&mut source).read_to_end(&mut out).unwrap();
    assert_eq!(out.len(), 3 * SECTOR_SIZE);
}
