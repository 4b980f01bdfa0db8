//! Finds the disc images under a games root.
//!
//! Images sit directly inside fixed folders named after the disc type, the
//! way OPL-style loaders expect them:
//!
//! - PS2: `<root>/DVD` and `<root>/CD`, holding `.iso` and `.zso` files
//! - PS1: `<root>/POPS`, holding `.vcd` files

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gameid_core::ContainerKind;
use serde::{Deserialize, Serialize};

/// Folder layout of a games root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Ps2,
    Ps1,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Self::Ps2, Self::Ps1];

    /// Sub-folders of the games root that hold images, in scan order.
    pub fn folders(&self) -> &'static [&'static str] {
        match self {
            Self::Ps2 => &["DVD", "CD"],
            Self::Ps1 => &["POPS"],
        }
    }

    /// Container kinds collected from those folders.
    pub fn kinds(&self) -> &'static [ContainerKind] {
        match self {
            Self::Ps2 => &[ContainerKind::Iso, ContainerKind::Zso],
            Self::Ps1 => &[ContainerKind::Vcd],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ps2 => "ps2",
            Self::Ps1 => "ps1",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown layout '{}' (expected ps2 or ps1)", s))
    }
}

/// A disc image found under the games root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    /// Layout folder the image was found in (e.g. `DVD`).
    pub folder: String,
    pub kind: ContainerKind,
}

impl ImageFile {
    /// Build an entry for a path given directly, outside any layout folder.
    /// Returns `None` for an unsupported extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = ContainerKind::from_path(&path)?;
        let folder = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Self { path, folder, kind })
    }

    /// File name including extension, as handed to the catalog.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Collect every image for `layout` under `root`.
///
/// Folders are scanned in layout order, files within a folder sorted by path.
/// A missing or unreadable folder is logged and skipped.
pub fn scan_images(root: &Path, layout: Layout) -> Vec<ImageFile> {
    let mut images = Vec::new();
    for folder in layout.folders() {
        let dir = root.join(folder);
        if !dir.is_dir() {
            log::warn!("No {} folder in {}", folder, root.display());
            continue;
        }
        match scan_folder(&dir, folder, layout.kinds()) {
            Ok(found) => images.extend(found),
            Err(e) => log::warn!("Could not read {}: {}", dir.display(), e),
        }
    }
    images
}

/// Non-recursive listing of matching images in one folder.
fn scan_folder(
    dir: &Path,
    folder: &str,
    kinds: &[ContainerKind],
) -> std::io::Result<Vec<ImageFile>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && !is_hidden(p))
        .collect();
    paths.sort();

    Ok(paths
        .into_iter()
        .filter_map(|path| {
            let kind = ContainerKind::from_path(&path).filter(|k| kinds.contains(k))?;
            Some(ImageFile {
                path,
                folder: folder.to_string(),
                kind,
            })
        })
        .collect())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
