use super::*;
use std::fs;
use tempfile::TempDir;

fn touch(dir: &Path, rel: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn names(images: &[ImageFile]) -> Vec<String> {
    images
        .iter()
        .map(|i| format!("{}/{}", i.folder, i.file_name()))
        .collect()
}

#[test]
fn test_ps2_layout() {
    let root = TempDir::new().unwrap();
    touch(root.path(), "DVD/b.iso");
    touch(root.path(), "DVD/a.ZSO");
    touch(root.path(), "DVD/notes.txt");
    touch(root.path(), "DVD/.hidden.iso");
    touch(root.path(), "DVD/sub/deep.iso");
    touch(root.path(), "CD/c.iso");
    touch(root.path(), "POPS/d.vcd");

    let images = scan_images(root.path(), Layout::Ps2);
    assert_eq!(names(&images), ["DVD/a.ZSO", "DVD/b.iso", "CD/c.iso"]);
    assert_eq!(images[0].kind, ContainerKind::Zso);
}

#[test]
fn test_ps1_layout() {
    let root = TempDir::new().unwrap();
    touch(root.path(), "POPS/Crash.VCD");
    touch(root.path(), "POPS/game.iso");
    touch(root.path(), "DVD/x.iso");

    let images = scan_images(root.path(), Layout::Ps1);
    assert_eq!(names(&images), ["POPS/Crash.VCD"]);
    assert_eq!(images[0].kind, ContainerKind::Vcd);
}

#[test]
fn test_missing_folders_are_skipped() {
    let root = TempDir::new().unwrap();
    touch(root.path(), "CD/only.iso");
    assert_eq!(names(&scan_images(root.path(), Layout::Ps2)), ["CD/only.iso"]);
    assert!(scan_images(&root.path().join("nope"), Layout::Ps1).is_empty());
}

#[test]
fn test_layout_from_str() {
    assert_eq!("ps2".parse::<Layout>().unwrap(), Layout::Ps2);
    assert_eq!("PS1".parse::<Layout>().unwrap(), Layout::Ps1);
    assert!("psp".parse::<Layout>().is_err());
    assert_eq!(Layout::default(), Layout::Ps2);
    assert_eq!(Layout::Ps1.to_string(), "ps1");
}

#[test]
fn test_image_from_path() {
    let image = ImageFile::from_path("/games/DVD/Game.iso").unwrap();
    assert_eq!(image.folder, "DVD");
    assert_eq!(image.kind, ContainerKind::Iso);
    assert_eq!(image.file_name(), "Game.iso");
    assert!(ImageFile::from_path("/games/DVD/Game.cue").is_none());
}
