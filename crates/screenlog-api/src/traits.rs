use async_trait::async_trait;
use chrono::NaiveDate;
use screenlog_models::{ContentKey, LogRecord, WatchlistRecord, WatchlistStatus};

use crate::error::ApiResult;

/// Read/write access to a user's viewing logs. The backend scopes every call
/// to the authenticated user.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// All logs for one content key. Callers treat a failure as "unknown,
    /// assume empty" rather than a hard error.
    async fn fetch(&self, key: &ContentKey) -> ApiResult<Vec<LogRecord>>;

    /// Create a general (whole-title) log watched on the given date.
    async fn create(&self, key: &ContentKey, watched_date: NaiveDate) -> ApiResult<LogRecord>;

    /// Delete one log. Deleting a log that is already gone succeeds.
    async fn remove(&self, log_id: &str) -> ApiResult<()>;
}

/// Read/write access to a user's watchlist membership for single items.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    async fn fetch_status(&self, key: &ContentKey) -> ApiResult<WatchlistStatus>;

    async fn create(&self, key: &ContentKey) -> ApiResult<WatchlistRecord>;

    /// Delete one membership. Deleting one that is already gone succeeds.
    async fn remove(&self, item_id: &str) -> ApiResult<()>;
}
