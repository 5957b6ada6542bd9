//! Listing parsing utilities.

use serde_json::{Map, Value};
use url::Url;

use crate::api::types::ListingResponse;
use crate::error::Error;
use crate::media::item::{MediaItem, MediaKind};

/// Listing entries that passed the access filter but could not become items.
pub type Rejected = Vec<(String, Error)>;

/// Turn a listing into items, dropping every entry without `access`.
pub fn parse_listing(kind: MediaKind, listing: &ListingResponse) -> (Vec<MediaItem>, Rejected) {
    let mut items = Vec::new();
    let mut rejected = Vec::new();

    for (index, entry) in listing.items.iter().filter(|e| e.access).enumerate() {
        match MediaItem::from_entry(kind, entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                let label = entry
                    .l_data
                    .clone()
                    .or_else(|| entry.title.clone())
                    .unwrap_or_else(|| format!("#{}", index));
                rejected.push((format!("{} {}", kind, label), e));
            }
        }
    }

    (items, rejected)
}

/// Value of the `src*` field with the largest trailing number.
///
/// `src800` beats `src400`; a bare `src` counts as zero.
pub fn best_source(fields: &Map<String, Value>) -> Option<&str> {
    fields
        .iter()
        .filter(|(key, _)| key.starts_with("src"))
        .filter_map(|(key, value)| {
            let url = value.as_str().filter(|u| !u.is_empty())?;
            Some((source_quality(key), url))
        })
        .max_by_key(|(quality, _)| *quality)
        .map(|(_, url)| url)
}

/// Trailing digit run of a `src*` key.
fn source_quality(key: &str) -> u64 {
    let digits_start = key
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(key.len());

    key[digits_start..].parse().unwrap_or(0)
}

/// File extension for a resolved URL.
///
/// Uses the last path segment when it names a known type of the right kind,
/// otherwise the kind's default.
pub fn extension_for(url: &str, kind: MediaKind) -> String {
    extract_extension_from_url(url)
        .filter(|ext| {
            mime_guess::from_ext(ext)
                .iter()
                .any(|mime| mime.type_().as_str() == kind.mime_type())
        })
        .unwrap_or_else(|| kind.default_extension().to_string())
}

/// Extract extension from URL path.
fn extract_extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let filename = parsed.path_segments()?.next_back()?;
    let (_, ext) = filename.rsplit_once('.')?;

    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}
