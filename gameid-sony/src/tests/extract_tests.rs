use super::*;
use crate::test_support::{
    BlockStorage, make_dir_record, make_iso, make_iso_with_system_cnf, make_zso,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

fn extract(path: &Path) -> Extraction {
    GameIdExtractor::new().extract(path)
}

#[test]
fn test_filename_fast_path_ignores_content() {
    let dir = TempDir::new().unwrap();
    let iso = make_iso_with_system_cnf("SLUS_999.99");
    let path = write(&dir, "SCES_123.45.Some Game.iso", &iso);

    let result = extract(&path);
    assert_eq!(result.game_id, "SCES_123.45");
    assert_eq!(result.stage, ExtractStage::Filename);
}

#[test]
fn test_filename_fast_path_without_file() {
    let dir = TempDir::new().unwrap();
    let result = extract(&dir.path().join("slus_203.12.zso"));
    assert_eq!(result.game_id, "SLUS_203.12");
    assert_eq!(result.stage, ExtractStage::Filename);
}

#[test]
fn test_iso_system_cnf() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Ratchet.iso", &make_iso_with_system_cnf("SCUS_972.68"));

    let result = extract(&path);
    assert_eq!(result.game_id, "SCUS_972.68");
    assert_eq!(result.stage, ExtractStage::SystemCnf);
}

#[test]
fn test_zso_system_cnf() {
    let dir = TempDir::new().unwrap();
    let iso = make_iso_with_system_cnf("SLES_535.39");
    let zso = make_zso(&iso, 2048, &[BlockStorage::Lz4, BlockStorage::Plain]);
    let path = write(&dir, "Shadow.zso", &zso);

    let result = extract(&path);
    assert_eq!(result.game_id, "SLES_535.39");
    assert_eq!(result.stage, ExtractStage::SystemCnf);
}

#[test]
fn test_zso_padded_blocks() {
    let dir = TempDir::new().unwrap();
    let iso = make_iso_with_system_cnf("SLPM_660.10");
    let zso = make_zso(&iso, 8192, &[BlockStorage::PaddedLz4(3)]);
    let path = write(&dir, "Padded.zso", &zso);

    assert_eq!(extract(&path).game_id, "SLPM_660.10");
}

#[test]
fn test_iso_without_system_cnf_falls_back_to_byte_scan() {
    let dir = TempDir::new().unwrap();
    let mut iso = make_iso(&[("README.TXT;1", b"hello".as_slice())]);
    iso.extend(make_dir_record(b"SLUS_200.02;1", 40, 4096));
    let path = write(&dir, "Unknown.iso", &iso);

    let result = extract(&path);
    assert_eq!(result.game_id, "SLUS_200.02");
    assert_eq!(result.stage, ExtractStage::ByteScan);
}

#[test]
fn test_iso_bad_length_is_rescanned() {
    let dir = TempDir::new().unwrap();
    let mut iso = make_iso(&[("SYSTEM.CNF;1", b"BOOT2 = cdrom0:\\MAIN.ELF;1\r\n".as_slice())]);
    iso.extend(make_dir_record(b"SLUS_210.50;1", 40, 4096));
    let path = write(&dir, "Odd.iso", &iso);

    let result = extract(&path);
    assert_eq!(result.game_id, "SLUS_210.50");
    assert_eq!(result.stage, ExtractStage::ByteScan);
}

#[test]
fn test_iso_bad_length_without_scan_hit_is_synthesized() {
    let dir = TempDir::new().unwrap();
    let iso = make_iso(&[("SYSTEM.CNF;1", b"BOOT2 = cdrom0:\\MAIN.ELF;1\r\n".as_slice())]);
    let path = write(&dir, "Odd.iso", &iso);

    let result = extract(&path);
    assert_eq!(result.game_id, "ODD0_000.00");
    assert_eq!(result.stage, ExtractStage::Synthesized);
}

#[test]
fn test_twelve_char_id_is_kept() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Long.iso", &make_iso_with_system_cnf("SLUS_2031.23"));

    let result = extract(&path);
    assert_eq!(result.game_id, "SLUS_2031.23");
    assert_eq!(result.stage, ExtractStage::SystemCnf);
}

#[test]
fn test_zso_keeps_bad_length() {
    let dir = TempDir::new().unwrap();
    let iso = make_iso(&[("SYSTEM.CNF;1", b"BOOT2 = cdrom0:\\MAIN.ELF;1\r\n".as_slice())]);
    let zso = make_zso(&iso, 2048, &[BlockStorage::Lz4]);
    let path = write(&dir, "Odd.zso", &zso);

    let result = extract(&path);
    assert_eq!(result.game_id, "MAIN.ELF");
    assert_eq!(result.stage, ExtractStage::SystemCnf);
}

#[test]
fn test_zso_byte_scan_runs_on_decompressed_data() {
    let dir = TempDir::new().unwrap();
    let mut iso = make_iso(&[("README.TXT;1", b"hello".as_slice())]);
    let mut tail = make_dir_record(b"SCES_500.51;1", 40, 4096);
    tail.resize(2048, 0);
    iso.extend(tail);
    let zso = make_zso(&iso, 2048, &[BlockStorage::Lz4]);
    let path = write(&dir, "Packed.zso", &zso);

    let result = extract(&path);
    assert_eq!(result.game_id, "SCES_500.51");
    assert_eq!(result.stage, ExtractStage::ByteScan);
}

#[test]
fn test_garbage_is_synthesized() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Final Fantasy VII.iso", &[0x5Au8; 3000]);

    let result = extract(&path);
    assert_eq!(result.game_id, "FINA_LFA.NT");
    assert_eq!(result.stage, ExtractStage::Synthesized);
}

#[test]
fn test_invalid_zso_scans_raw_bytes() {
    let dir = TempDir::new().unwrap();
    let mut data = vec![0u8; 100];
    data.extend(make_dir_record(b"SLUS_777.77;1", 40, 4096));
    let path = write(&dir, "NotReally.zso", &data);

    let result = extract(&path);
    assert_eq!(result.game_id, "SLUS_777.77");
    assert_eq!(result.stage, ExtractStage::ByteScan);
}

#[test]
fn test_zso_bad_alignment_is_synthesized() {
    let dir = TempDir::new().unwrap();
    let mut zso = make_zso(
        &make_iso_with_system_cnf("SLUS_203.12"),
        2048,
        &[BlockStorage::Plain],
    );
    zso[21] = 64;
    let path = write(&dir, "Broken.zso", &zso);

    let result = extract(&path);
    assert_eq!(result.game_id, "BROK_EN0.00");
    assert_eq!(result.stage, ExtractStage::Synthesized);
}

#[test]
fn test_missing_file_is_synthesized() {
    let dir = TempDir::new().unwrap();
    let result = extract(&dir.path().join("ab.iso"));
    assert_eq!(result.game_id, "AB00_000.00");
    assert_eq!(result.stage, ExtractStage::Synthesized);
}

#[test]
fn test_unknown_extension_skips_image() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Game.bin", &make_iso_with_system_cnf("SLUS_203.12"));

    let result = extract(&path);
    assert_eq!(result.game_id, "GAME_000.00");
    assert_eq!(result.stage, ExtractStage::Synthesized);
}

#[test]
fn test_explicit_kind_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Game.bin", &make_iso_with_system_cnf("SLUS_203.12"));

    let result = GameIdExtractor::new().extract_with_kind(&path, Some(ContainerKind::Iso));
    assert_eq!(result.game_id, "SLUS_203.12");
}

#[test]
fn test_vcd_boot_line() {
    let dir = TempDir::new().unwrap();
    let mut data = vec![0u8; 512];
    data.extend_from_slice(b"\nBOOT = cdrom:\\SCUS_944.26;1\r\nTCB = 4\r\n");
    let path = write(&dir, "Spyro.vcd", &data);

    let result = extract(&path);
    assert_eq!(result.game_id, "SCUS_944.26");
    assert_eq!(result.stage, ExtractStage::VcdBoot);
}

#[test]
fn test_vcd_falls_back_to_byte_scan() {
    let dir = TempDir::new().unwrap();
    let mut data = vec![0u8; 512];
    data.extend(make_dir_record(b"SLUS_000.67;1", 24, 2048));
    let path = write(&dir, "Crash.vcd", &data);

    let result = extract(&path);
    assert_eq!(result.game_id, "SLUS_000.67");
    assert_eq!(result.stage, ExtractStage::ByteScan);
}

#[test]
fn test_extraction_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Again.iso", &make_iso_with_system_cnf("SLUS_203.12"));

    let extractor = GameIdExtractor::new();
    assert_eq!(extractor.extract(&path), extractor.extract(&path));
}
