//! Authenticated session.

use std::path::Path;
use std::sync::Arc;

use crate::api::balancer::Balancer;
use crate::api::client::Client;
use crate::api::command::Command;
use crate::api::types::{ItemDetail, ItemInfoResponse, ListingResponse};
use crate::error::Result;
use crate::media::MediaKind;

/// A logged-in account: the session token plus the shared client and mirrors.
#[derive(Debug, Clone)]
pub struct Session {
    client: Arc<Client>,
    balancer: Arc<Balancer>,
    token: String,
    nick: String,
}

impl Session {
    pub fn new(
        client: Arc<Client>,
        balancer: Arc<Balancer>,
        token: impl Into<String>,
        nick: impl Into<String>,
    ) -> Self {
        Self {
            client,
            balancer,
            token: token.into(),
            nick: nick.into(),
        }
    }

    /// Session token attached to every command.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Handle of the logged-in account.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Photo listing of a profile.
    pub async fn profile_photos(&self, nick: &str) -> Result<ListingResponse> {
        let url = Command::ProfilePhotos {
            nick,
            token: &self.token,
        }
        .to_url(self.balancer.next());
        self.client.get(&url).await
    }

    /// Video listing of a profile.
    pub async fn profile_videos(&self, nick: &str) -> Result<ListingResponse> {
        let url = Command::ProfileVideos {
            nick,
            token: &self.token,
        }
        .to_url(self.balancer.next());
        self.client.get(&url).await
    }

    /// Listing of one kind.
    pub async fn listing(&self, kind: MediaKind, nick: &str) -> Result<ListingResponse> {
        match kind {
            MediaKind::Photo => self.profile_photos(nick).await,
            MediaKind::Video => self.profile_videos(nick).await,
        }
    }

    /// Detail payload of one item.
    pub async fn item_info(&self, kind: MediaKind, data: &str, ldata: &str) -> Result<ItemDetail> {
        let url = Command::ItemInfo {
            kind,
            data,
            ldata,
            token: &self.token,
        }
        .to_url(self.balancer.next());
        let response: ItemInfoResponse = self.client.get(&url).await?;
        Ok(response.item)
    }

    /// Stream a media file to disk; `tag` keeps the partial file unique per item.
    pub async fn download(&self, url: &str, path: &Path, tag: &str) -> Result<u64> {
        self.client.download(url, path, tag).await
    }
}
