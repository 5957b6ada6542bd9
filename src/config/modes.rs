//! Download mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::media::MediaKind;

/// Which collections of a profile get downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadMode {
    /// Photos and videos (default).
    #[default]
    Both,
    /// Only the photo collection; the video listing is never requested.
    PhotosOnly,
    /// Only the video collection; the photo listing is never requested.
    VideosOnly,
}

impl DownloadMode {
    /// Whether items of `kind` are part of this mode.
    pub fn includes(self, kind: MediaKind) -> bool {
        match self {
            DownloadMode::Both => true,
            DownloadMode::PhotosOnly => kind == MediaKind::Photo,
            DownloadMode::VideosOnly => kind == MediaKind::Video,
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Both => write!(f, "both"),
            DownloadMode::PhotosOnly => write!(f, "photos-only"),
            DownloadMode::VideosOnly => write!(f, "videos-only"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(DownloadMode::Both),
            "photos-only" | "photos" => Ok(DownloadMode::PhotosOnly),
            "videos-only" | "videos" => Ok(DownloadMode::VideosOnly),
            _ => Err(format!("Unknown download mode: {}", s)),
        }
    }
}
