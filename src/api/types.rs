//! API response type definitions.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Response to the `login` command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub logged_user: Option<LoggedUser>,
}

/// Account that logged in.
#[derive(Debug, Deserialize)]
pub struct LoggedUser {
    pub nick: Option<String>,
}

/// Response to `getProfilePhotos` / `getProfileVideos`.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub items: Vec<ListingEntry>,
}

/// One entry of a photo or video listing.
///
/// Only `access` is required to decide whether the entry matters; the
/// identifying fields are checked when an item is built from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    #[serde(default, deserialize_with = "truthy")]
    pub access: bool,
    pub nick: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data: Option<String>,
    pub l_data: Option<String>,
    /// Remaining fields, including the `src*` photo sources.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read a flag the way the site means it: `null`, `0`, `""`, `[]` and `{}` are false.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Response to `getItemInfo`.
#[derive(Debug, Deserialize)]
pub struct ItemInfoResponse {
    pub item: ItemDetail,
}

/// Detail payload returned by `getItemInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDetail {
    pub mp4480: Option<String>,
    pub mp4: Option<String>,
}
