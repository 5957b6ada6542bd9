//! Download outcome tracking.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::Error;
use crate::media::MediaKind;

/// Result of a successful item download call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Bytes were transferred to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
    /// The target file existed; nothing was transferred.
    AlreadyExists(PathBuf),
}

/// Target paths taken by items of the current run.
///
/// Two items rendering to the same path would otherwise transfer into the
/// same file at once; only the first claimant downloads it.
#[derive(Debug, Default)]
pub struct TargetClaims {
    paths: Mutex<HashSet<PathBuf>>,
}

impl TargetClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `path`. Returns `false` when another item already holds it.
    pub fn claim(&self, path: &Path) -> bool {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf())
    }
}

/// An item (or a whole listing) that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub label: String,
    pub reason: String,
}

/// Per-profile results.
#[derive(Debug, Default)]
pub struct ProfileReport {
    pub nick: String,

    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedItem>,

    // Statistics
    pub photo_count: u64,
    pub video_count: u64,
    pub bytes_downloaded: u64,
}

impl ProfileReport {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            ..Default::default()
        }
    }

    /// Record the outcome of one item.
    pub fn record(&mut self, kind: MediaKind, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Downloaded { path, bytes } => {
                match kind {
                    MediaKind::Photo => self.photo_count += 1,
                    MediaKind::Video => self.video_count += 1,
                }
                self.bytes_downloaded += bytes;
                self.downloaded.push(path);
            }
            ItemOutcome::AlreadyExists(path) => self.skipped.push(path),
        }
    }

    /// Record a failed item or listing.
    pub fn record_failure(&mut self, label: impl Into<String>, error: &Error) {
        self.failed.push(FailedItem {
            label: label.into(),
            reason: error.to_string(),
        });
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.photo_count + self.video_count
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Results across all profiles.
#[derive(Debug, Default)]
pub struct RunReport {
    pub profiles: Vec<ProfileReport>,
}

impl RunReport {
    pub fn photo_count(&self) -> u64 {
        self.profiles.iter().map(|p| p.photo_count).sum()
    }

    pub fn video_count(&self) -> u64 {
        self.profiles.iter().map(|p| p.video_count).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.profiles.iter().map(|p| p.skipped.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.profiles.iter().map(|p| p.failed.len()).sum()
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.profiles.iter().map(|p| p.bytes_downloaded).sum()
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.photo_count() + self.video_count()
    }

    /// Whether any item or listing failed.
    pub fn has_failures(&self) -> bool {
        self.profiles.iter().any(ProfileReport::has_failures)
    }
}
