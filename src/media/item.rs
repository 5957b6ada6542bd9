//! Media item representation.

use std::fmt;

use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use crate::api::types::{ItemDetail, ListingEntry};
use crate::api::Session;
use crate::error::{Error, Result};
use crate::media::parser::best_source;

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Name used in URLs and for `%t` in the path template.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// Extension used when the URL does not reveal one.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    /// Top-level MIME type of this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Photo => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by photos and videos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMeta {
    /// Owner's profile handle.
    pub owner: String,
    pub title: String,
    pub description: String,
    /// Stable content hash (`lData`), the primary file name key.
    pub uid: String,
    /// Opaque `data` identifier needed for detail requests.
    pub data: String,
}

impl ItemMeta {
    /// Take the identifying fields out of a listing entry.
    pub fn from_entry(entry: &ListingEntry) -> Result<Self> {
        Ok(Self {
            owner: required(&entry.nick, "nick")?,
            title: entry.title.clone().unwrap_or_default(),
            description: entry.description.clone().unwrap_or_default(),
            uid: required(&entry.l_data, "lData")?,
            data: required(&entry.data, "data")?,
        })
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_field("listing entry", field))
}

/// A photo. Its URL comes straight from the listing's `src*` fields.
#[derive(Debug, Clone)]
pub struct Photo {
    pub meta: ItemMeta,
    sources: Map<String, Value>,
}

impl Photo {
    pub fn from_entry(entry: &ListingEntry) -> Result<Self> {
        Ok(Self {
            meta: ItemMeta::from_entry(entry)?,
            sources: entry.extra.clone(),
        })
    }

    /// Highest quality source URL.
    pub fn url(&self) -> Result<&str> {
        best_source(&self.sources).ok_or_else(|| {
            Error::Resolution(format!("photo {} has no src* field", self.meta.uid))
        })
    }
}

/// A video. Its URL is only known after one `getItemInfo` call.
#[derive(Debug)]
pub struct Video {
    pub meta: ItemMeta,
    detail: OnceCell<ItemDetail>,
}

impl Video {
    pub fn from_entry(entry: &ListingEntry) -> Result<Self> {
        Ok(Self {
            meta: ItemMeta::from_entry(entry)?,
            detail: OnceCell::new(),
        })
    }

    /// Download URL, `None` until the detail payload has been fetched.
    pub fn url(&self) -> Option<&str> {
        self.detail.get().and_then(detail_url)
    }

    /// Fetch the detail payload (at most once) and return the download URL.
    pub async fn resolve(&self, session: &Session) -> Result<&str> {
        let detail = self
            .detail
            .get_or_try_init(|| {
                session.item_info(MediaKind::Video, &self.meta.data, &self.meta.uid)
            })
            .await?;

        detail_url(detail).ok_or_else(|| Error::missing_field("video detail", "mp4"))
    }
}

/// `mp4480` when present, else `mp4`.
fn detail_url(detail: &ItemDetail) -> Option<&str> {
    detail
        .mp4480
        .as_deref()
        .filter(|u| !u.is_empty())
        .or_else(|| detail.mp4.as_deref().filter(|u| !u.is_empty()))
}

/// A downloadable media item.
#[derive(Debug)]
pub enum MediaItem {
    Photo(Photo),
    Video(Video),
}

impl MediaItem {
    /// Build an item of `kind` from a listing entry.
    pub fn from_entry(kind: MediaKind, entry: &ListingEntry) -> Result<Self> {
        match kind {
            MediaKind::Photo => Ok(MediaItem::Photo(Photo::from_entry(entry)?)),
            MediaKind::Video => Ok(MediaItem::Video(Video::from_entry(entry)?)),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Photo(_) => MediaKind::Photo,
            MediaItem::Video(_) => MediaKind::Video,
        }
    }

    pub fn meta(&self) -> &ItemMeta {
        match self {
            MediaItem::Photo(photo) => &photo.meta,
            MediaItem::Video(video) => &video.meta,
        }
    }

    /// Download URL, fetching video details first if needed.
    pub async fn resolve_url(&self, session: &Session) -> Result<String> {
        match self {
            MediaItem::Photo(photo) => photo.url().map(str::to_string),
            MediaItem::Video(video) => video.resolve(session).await.map(str::to_string),
        }
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> String {
        let meta = self.meta();
        if meta.title.is_empty() {
            format!("{} {}", self.kind(), meta.uid)
        } else {
            format!("{} {} ({})", self.kind(), meta.uid, meta.title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Balancer, Client};
    use crate::config::NetworkConfig;
    use crate::test_support::{FakeResponse, FakeServer};
    use std::sync::Arc;

    fn entry(json: &str) -> ListingEntry {
        serde_json::from_str(json).unwrap()
    }

    fn session_for(server: &FakeServer) -> Session {
        let client = Client::new(&NetworkConfig::default(), 4, 4).unwrap();
        let balancer = Balancer::new(vec![server.url("/ajax/")], 5).unwrap();
        Session::new(Arc::new(client), Arc::new(balancer), "tok", "me")
    }

    #[test]
    fn test_photo_picks_largest_source() {
        let photo = Photo::from_entry(&entry(
            r#"{"access": true, "nick": "alice", "data": "d", "lData": "h",
                "src100": "https://x/100.jpg", "src800": "https://x/800.jpg",
                "src400": "https://x/400.jpg"}"#,
        ))
        .unwrap();
        assert_eq!(photo.url().unwrap(), "https://x/800.jpg");
    }

    #[test]
    fn test_photo_without_sources_fails_alone() {
        let photo = Photo::from_entry(&entry(
            r#"{"access": true, "nick": "alice", "data": "d", "lData": "h"}"#,
        ))
        .unwrap();
        assert!(matches!(photo.url(), Err(Error::Resolution(_))));
    }

    #[test]
    fn test_missing_identifier_is_named() {
        let err = Photo::from_entry(&entry(r#"{"access": true, "nick": "alice", "data": "d"}"#))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                field: "lData",
                ..
            }
        ));
    }

    #[test]
    fn test_meta_defaults_optional_text() {
        let meta = ItemMeta::from_entry(&entry(
            r#"{"nick": "alice", "data": "d", "lData": "h", "title": null}"#,
        ))
        .unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.uid, "h");
    }

    #[tokio::test]
    async fn test_video_resolves_once() {
        let server = FakeServer::start(|_| {
            FakeResponse::ok(r#"{"item": {"mp4": "https://x/low.mp4", "mp4480": "https://x/480.mp4"}}"#)
        })
        .await;
        let session = session_for(&server);
        let video = Video::from_entry(&entry(
            r#"{"access": true, "nick": "alice", "data": "d1", "lData": "h1"}"#,
        ))
        .unwrap();

        assert_eq!(video.url(), None);
        assert_eq!(video.resolve(&session).await.unwrap(), "https://x/480.mp4");
        assert_eq!(video.resolve(&session).await.unwrap(), "https://x/480.mp4");
        assert_eq!(video.url(), Some("https://x/480.mp4"));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].param("command"), "getItemInfo");
        assert_eq!(requests[0].param("data"), "d1");
        assert_eq!(requests[0].param("actPath"), "/video/h1");
        assert_eq!(requests[0].param("token"), "tok");
    }

    #[tokio::test]
    async fn test_video_falls_back_to_mp4() {
        let server =
            FakeServer::start(|_| FakeResponse::ok(r#"{"item": {"mp4": "https://x/low.mp4"}}"#))
                .await;
        let session = session_for(&server);
        let video = Video::from_entry(&entry(r#"{"nick": "a", "data": "d", "lData": "h"}"#)).unwrap();

        assert_eq!(video.resolve(&session).await.unwrap(), "https://x/low.mp4");
    }

    #[tokio::test]
    async fn test_video_detail_failure_leaves_url_unset() {
        let server = FakeServer::start(|_| FakeResponse::status(500, "oops")).await;
        let session = session_for(&server);
        let video = Video::from_entry(&entry(r#"{"nick": "a", "data": "d", "lData": "h"}"#)).unwrap();

        assert!(matches!(
            video.resolve(&session).await,
            Err(Error::Http { .. })
        ));
        assert_eq!(video.url(), None);
    }

    #[test]
    fn test_label() {
        let item = MediaItem::from_entry(
            MediaKind::Photo,
            &entry(r#"{"nick": "a", "data": "d", "lData": "h", "title": "Sea"}"#),
        )
        .unwrap();
        assert_eq!(item.label(), "photo h (Sea)");
        assert_eq!(item.kind(), MediaKind::Photo);
    }
}
