use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::content::ContentType;

/// An active watchlist membership as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistRecord {
    pub item_id: String,
    pub content_id: String,
    pub content_type: ContentType,
    pub created_at: DateTime<Utc>,
}

/// Membership answer for one content key; `item_id` is only meaningful while
/// `in_list` is true
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchlistStatus {
    pub in_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

impl WatchlistStatus {
    pub fn member(item_id: impl Into<String>) -> Self {
        Self {
            in_list: true,
            item_id: Some(item_id.into()),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}
