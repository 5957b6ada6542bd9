//! Media module for item representation and parsing.

pub mod item;
pub mod parser;

pub use item::{ItemMeta, MediaItem, MediaKind, Photo, Video};
pub use parser::{best_source, extension_for, parse_listing};
