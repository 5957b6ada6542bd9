//! Target paths of downloaded items.

use std::path::PathBuf;

use crate::config::Config;
use crate::fs::naming::{render_filename, render_path};
use crate::media::{extension_for, MediaItem, MediaKind};

/// Where items land on disk.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub path_template: String,
    pub name_template: String,
}

impl Layout {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root_dir(),
            path_template: config.options.path_template.clone(),
            name_template: config.options.name_template.clone(),
        }
    }

    /// Directory holding a profile's items of one kind.
    pub fn directory(&self, profile: &str, kind: MediaKind) -> PathBuf {
        render_path(&self.path_template, &self.root, profile, kind)
    }

    /// Full path of an item whose download URL is `url`.
    pub fn item_path(&self, profile: &str, item: &MediaItem, url: &str) -> PathBuf {
        let extension = extension_for(url, item.kind());
        let filename = render_filename(&self.name_template, item.meta(), &extension);
        self.directory(profile, item.kind()).join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ListingEntry;

    fn layout() -> Layout {
        Layout {
            root: PathBuf::from("/downloads"),
            path_template: "%d/%p/%t".to_string(),
            name_template: "%t_%h.%e".to_string(),
        }
    }

    #[test]
    fn test_item_path() {
        let entry: ListingEntry = serde_json::from_str(
            r#"{"nick": "alice", "title": "Beach", "data": "d", "lData": "f00d"}"#,
        )
        .unwrap();
        let item = MediaItem::from_entry(MediaKind::Photo, &entry).unwrap();

        let path = layout().item_path("alice", &item, "https://cdn.example.com/p/f00d_800.png");
        assert_eq!(path, PathBuf::from("/downloads/alice/photo/Beach_f00d.png"));
    }

    #[test]
    fn test_layout_from_config() {
        let mut config = Config::default();
        config.options.root_dir = Some(PathBuf::from("/data"));
        config.options.path_template = "%d/%t/%p".to_string();

        let layout = Layout::from_config(&config);
        assert_eq!(
            layout.directory("bob", MediaKind::Video),
            PathBuf::from("/data/video/bob")
        );
    }
}
