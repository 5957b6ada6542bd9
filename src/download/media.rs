//! Media file downloading.

use crate::api::Session;
use crate::download::state::{ItemOutcome, TargetClaims};
use crate::error::Result;
use crate::fs::{sanitize_component, Layout};
use crate::media::MediaItem;

/// Resolve an item's URL and download it unless the target file exists.
///
/// Videos fetch their detail payload first (once per item); photos resolve
/// from listing data alone. A target already claimed by another item of the
/// run counts as existing, so one path is never written by two transfers.
pub async fn download_item(
    session: &Session,
    layout: &Layout,
    claims: &TargetClaims,
    profile: &str,
    item: &MediaItem,
) -> Result<ItemOutcome> {
    let url = item.resolve_url(session).await?;
    let output_path = layout.item_path(profile, item, &url);

    if !claims.claim(&output_path) {
        tracing::warn!(
            "{} renders to {}, already taken by another item",
            item.label(),
            output_path.display()
        );
        return Ok(ItemOutcome::AlreadyExists(output_path));
    }

    // Check if file already exists
    if output_path.exists() {
        return Ok(ItemOutcome::AlreadyExists(output_path));
    }

    let tag = sanitize_component(&item.meta().uid);
    let bytes = session.download(&url, &output_path, &tag).await?;

    Ok(ItemOutcome::Downloaded {
        path: output_path,
        bytes,
    })
}
