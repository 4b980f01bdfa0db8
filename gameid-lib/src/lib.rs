//! Library-level plumbing shared by the `gameid` frontends: where images live
//! on disk, how a batch of them is processed, and the saved settings.

pub mod batch;
pub mod scanner;
pub mod settings;

pub use batch::{BatchProgress, BatchSummary, CatalogEntry, run_batch};
pub use scanner::{ImageFile, Layout, scan_images};
pub use settings::{Settings, resolve_games_root, resolve_layout, settings_path};

pub use gameid_core::{ContainerKind, ExtractStage, GameId};
pub use gameid_sony::{Extraction, GameIdExtractor};
