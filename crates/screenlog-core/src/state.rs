use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use screenlog_models::{ContentKey, LogRecord, WatchStatus, WatchlistStatus};
use serde::Serialize;

/// One item's mirror of backend state plus its transient error slot.
///
/// Owned by exactly one controller and written only by refresh and the two
/// toggle paths. Watch status is never stored here; snapshots derive it
/// from `logs` on every read.
#[derive(Debug, Default)]
pub(crate) struct ItemState {
    pub logs: Vec<LogRecord>,
    pub membership: WatchlistStatus,
    pub last_error: Option<TransientError>,
    /// Bumped on every new error. The delayed clear task only clears its
    /// own generation, so a newer error is never wiped early.
    pub error_seq: u64,
}

pub(crate) fn lock_state(state: &Mutex<ItemState>) -> MutexGuard<'_, ItemState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A failed toggle, shown briefly on the item and cleared automatically.
#[derive(Debug, Clone, Serialize)]
pub struct TransientError {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// Read-only view of one item for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSnapshot {
    pub key: ContentKey,
    pub status: WatchStatus,
    pub in_watchlist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchlist_item_id: Option<String>,
    pub is_toggling_log: bool,
    pub is_toggling_watchlist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative: Option<LogRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TransientError>,
}
