//! Per-profile download orchestration.

use futures::future::join_all;
use indicatif::ProgressBar;

use crate::api::types::ListingResponse;
use crate::api::Session;
use crate::config::{Config, DownloadMode};
use crate::download::media::download_item;
use crate::download::state::{ItemOutcome, ProfileReport, TargetClaims};
use crate::error::Result;
use crate::fs::Layout;
use crate::media::{parse_listing, MediaItem, MediaKind};

/// Settings shared by every profile of a run.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub layout: Layout,
    pub mode: DownloadMode,
    pub show_skipped: bool,
}

impl DownloadOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: Layout::from_config(config),
            mode: config.options.mode,
            show_skipped: config.options.show_skipped,
        }
    }
}

/// A profile and its (lazily fetched) photo and video collections.
#[derive(Debug)]
pub struct Profile {
    nick: String,
    photos: Vec<MediaItem>,
    videos: Vec<MediaItem>,
}

impl Profile {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            photos: Vec::new(),
            videos: Vec::new(),
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn photos(&self) -> &[MediaItem] {
        &self.photos
    }

    pub fn videos(&self) -> &[MediaItem] {
        &self.videos
    }

    /// Fetch the listings `mode` asks for, both at once.
    ///
    /// Failed listings and unusable entries are recorded in `report`; a
    /// failure of one listing does not affect the other.
    pub async fn fetch(&mut self, session: &Session, mode: DownloadMode, report: &mut ProfileReport) {
        let nick = self.nick.as_str();
        let listing = |kind: MediaKind| async move {
            if mode.includes(kind) {
                Some(session.listing(kind, nick).await)
            } else {
                None
            }
        };

        let (photos, videos) = futures::join!(listing(MediaKind::Photo), listing(MediaKind::Video));

        self.photos = collect(MediaKind::Photo, photos, &self.nick, report);
        self.videos = collect(MediaKind::Video, videos, &self.nick, report);

        tracing::debug!(
            "Profile {}: {} photos, {} videos accessible",
            self.nick,
            self.photos.len(),
            self.videos.len()
        );
    }

    /// Fetch listings, then download every item concurrently.
    ///
    /// `claims` is shared by every profile of the run so no two items write
    /// the same file.
    pub async fn download(
        &mut self,
        session: &Session,
        options: &DownloadOptions,
        claims: &TargetClaims,
        progress: &ProgressBar,
    ) -> ProfileReport {
        let mut report = ProfileReport::new(self.nick.clone());

        self.fetch(session, options.mode, &mut report).await;

        let items: Vec<&MediaItem> = self.photos.iter().chain(self.videos.iter()).collect();
        progress.inc_length(items.len() as u64);

        let nick = self.nick.as_str();
        let results = join_all(items.into_iter().map(|item| async move {
            let result = download_item(session, &options.layout, claims, nick, item).await;
            progress.inc(1);
            (item, result)
        }))
        .await;

        for (item, result) in results {
            record_result(&mut report, item, result, options.show_skipped);
        }

        report
    }
}

/// Items of a fetched listing; listing errors and rejected entries go to `report`.
fn collect(
    kind: MediaKind,
    listing: Option<Result<ListingResponse>>,
    nick: &str,
    report: &mut ProfileReport,
) -> Vec<MediaItem> {
    match listing {
        None => Vec::new(),
        Some(Err(e)) => {
            tracing::warn!("Failed to fetch {} listing of {}: {}", kind, nick, e);
            report.record_failure(format!("{} listing", kind), &e);
            Vec::new()
        }
        Some(Ok(listing)) => {
            let (items, rejected) = parse_listing(kind, &listing);
            for (label, e) in rejected {
                tracing::warn!("Skipping {} of {}: {}", label, nick, e);
                report.record_failure(label, &e);
            }
            items
        }
    }
}

fn record_result(
    report: &mut ProfileReport,
    item: &MediaItem,
    result: Result<ItemOutcome>,
    show_skipped: bool,
) {
    match result {
        Ok(outcome) => {
            match &outcome {
                ItemOutcome::Downloaded { path, .. } => {
                    tracing::info!("Downloaded {}: {}", item.kind(), path.display());
                }
                ItemOutcome::AlreadyExists(path) if show_skipped => {
                    tracing::info!("File {} exists. Skipping.", path.display());
                }
                ItemOutcome::AlreadyExists(_) => {}
            }
            report.record(item.kind(), outcome);
        }
        Err(e) => {
            tracing::warn!("Failed to download {}: {}", item.label(), e);
            report.record_failure(item.label(), &e);
        }
    }
}
