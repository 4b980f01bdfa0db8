//! Shared types for Game ID extraction: the error taxonomy, the `GameId`
//! value type, container kinds and pipeline stages.

use std::io::{Read, Seek};

pub mod container;
pub mod error;
pub mod game_id;
pub mod progress;
pub mod util;

pub use container::ContainerKind;
pub use error::DiscError;
pub use game_id::GameId;
pub use progress::ExtractStage;

/// Logical sector size for every container format handled here.
pub const SECTOR_SIZE: usize = 2048;

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}
