use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use screenlog_api::{ApiError, ApiResult, LogStore, WatchlistStore};
use screenlog_models::{ContentKey, WatchlistStatus};

use crate::locks::{ToggleKind, ToggleLocks};
use crate::resolver;
use crate::state::{lock_state, ItemSnapshot, ItemState, TransientError};

/// How long a failed toggle stays visible on an item before clearing itself.
pub const ERROR_TTL: Duration = Duration::from_secs(3);

/// What became of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The toggle ran; the snapshot reflects the settled state.
    Completed,
    /// Another toggle was in flight for this key and the request was
    /// discarded, not queued.
    Dropped,
}

/// Owns one content item's mirrored backend state and runs its toggles.
///
/// Watched toggles are pessimistic: mutate, then refetch the full log set so
/// the displayed status always derives from server-confirmed logs. Watchlist
/// toggles are optimistic: flip membership first, roll back if the backend
/// refuses.
pub struct ToggleController {
    key: ContentKey,
    log_store: Arc<dyn LogStore>,
    watchlist_store: Arc<dyn WatchlistStore>,
    locks: Arc<ToggleLocks>,
    state: Arc<Mutex<ItemState>>,
    error_ttl: Duration,
}

impl ToggleController {
    pub fn new(
        key: ContentKey,
        log_store: Arc<dyn LogStore>,
        watchlist_store: Arc<dyn WatchlistStore>,
        locks: Arc<ToggleLocks>,
    ) -> Self {
        Self {
            key,
            log_store,
            watchlist_store,
            locks,
            state: Arc::new(Mutex::new(ItemState::default())),
            error_ttl: ERROR_TTL,
        }
    }

    /// Shorten (or stretch) the transient error lifetime.
    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    pub fn key(&self) -> &ContentKey {
        &self.key
    }

    /// Current observable state of the item. The in-flight flags come
    /// straight from the lock table so they can never disagree with what is
    /// actually running.
    pub fn snapshot(&self) -> ItemSnapshot {
        let state = lock_state(&self.state);
        ItemSnapshot {
            key: self.key.clone(),
            status: resolver::resolve(self.key.content_type, &state.logs),
            in_watchlist: state.membership.in_list,
            watchlist_item_id: state.membership.item_id.clone(),
            is_toggling_log: self.locks.is_busy(&self.key, ToggleKind::Log),
            is_toggling_watchlist: self.locks.is_busy(&self.key, ToggleKind::Watchlist),
            representative: resolver::representative_log(self.key.content_type, &state.logs)
                .cloned(),
            error: state.last_error.clone(),
        }
    }

    /// Fetch logs and watchlist membership for this item.
    ///
    /// A non-auth failure degrades that half of the mirror to empty (status
    /// unwatched, not in list) instead of failing the whole view. An auth
    /// rejection also degrades, but is returned so the session layer can
    /// react to the expired token.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn refresh(&self) -> ApiResult<()> {
        let (logs, membership) = futures::join!(
            self.log_store.fetch(&self.key),
            self.watchlist_store.fetch_status(&self.key)
        );

        let mut auth_error = None;
        {
            let mut state = lock_state(&self.state);
            match logs {
                Ok(logs) => state.logs = logs,
                Err(err) => {
                    if err.is_auth() {
                        auth_error = Some(err);
                    } else {
                        warn!(error = %err, "log fetch failed; treating as empty");
                    }
                    state.logs.clear();
                }
            }
            match membership {
                Ok(membership) => state.membership = membership,
                Err(err) => {
                    if err.is_auth() {
                        auth_error = Some(err);
                    } else {
                        warn!(error = %err, "watchlist status fetch failed; treating as absent");
                    }
                    state.membership = WatchlistStatus::absent();
                }
            }
        }

        match auth_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Flip the watched state through the backend.
    ///
    /// Removes the general log when one exists, creates one dated today
    /// otherwise, then reconciles against a fresh fetch. On failure the
    /// previously fetched logs stay untouched and a transient error is set
    /// on the item.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn toggle_watched(&self) -> ApiResult<ToggleOutcome> {
        let Some(_guard) = self.locks.acquire(&self.key, ToggleKind::Log) else {
            debug!("watched toggle dropped; another toggle holds this key");
            return Ok(ToggleOutcome::Dropped);
        };

        match self.run_watched_toggle().await {
            Ok(()) => Ok(ToggleOutcome::Completed),
            Err(err) => {
                self.set_transient_error(&err);
                Err(err)
            }
        }
    }

    async fn run_watched_toggle(&self) -> ApiResult<()> {
        let general = {
            let state = lock_state(&self.state);
            resolver::general_log(&state.logs).map(|log| log.log_id.clone())
        };

        match general {
            Some(log_id) => {
                info!(operation = "toggle_watched", log_id = %log_id, "removing general log");
                self.log_store.remove(&log_id).await?;
            }
            None => {
                let today = Utc::now().date_naive();
                info!(operation = "toggle_watched", watched_date = %today, "creating general log");
                self.log_store.create(&self.key, today).await?;
            }
        }

        self.reconcile_logs().await
    }

    /// Replace the mirrored log set with the server's current truth. Status
    /// after a mutation always derives from this fetch, never from a local
    /// guess: removing a general tv log can reveal watching from season logs
    /// that are still there.
    async fn reconcile_logs(&self) -> ApiResult<()> {
        let logs = self.log_store.fetch(&self.key).await?;
        lock_state(&self.state).logs = logs;
        Ok(())
    }

    /// Flip watchlist membership through the backend, optimistically.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn toggle_watchlist(&self) -> ApiResult<ToggleOutcome> {
        let Some(_guard) = self.locks.acquire(&self.key, ToggleKind::Watchlist) else {
            debug!("watchlist toggle dropped; another toggle holds this key");
            return Ok(ToggleOutcome::Dropped);
        };

        match self.run_watchlist_toggle().await {
            Ok(()) => Ok(ToggleOutcome::Completed),
            Err(err) => {
                self.set_transient_error(&err);
                Err(err)
            }
        }
    }

    async fn run_watchlist_toggle(&self) -> ApiResult<()> {
        let prior = lock_state(&self.state).membership.clone();

        if prior.in_list {
            let item_id = match prior.item_id.clone() {
                Some(id) => id,
                // membership without an id means the mirror never saw a
                // server answer; ask before deleting anything
                None => {
                    let status = self.watchlist_store.fetch_status(&self.key).await?;
                    if !status.in_list {
                        lock_state(&self.state).membership = WatchlistStatus::absent();
                        return Ok(());
                    }
                    status.item_id.ok_or_else(|| {
                        ApiError::Validation(
                            "watchlist status reports membership without an item id".to_string(),
                        )
                    })?
                }
            };

            lock_state(&self.state).membership = WatchlistStatus::absent(); // optimistic
            info!(operation = "toggle_watchlist", item_id = %item_id, "leaving watchlist");
            if let Err(err) = self.watchlist_store.remove(&item_id).await {
                lock_state(&self.state).membership = prior; // rollback
                return Err(err);
            }
        } else {
            lock_state(&self.state).membership = WatchlistStatus {
                in_list: true,
                item_id: None, // placeholder until the server answers
            };
            info!(operation = "toggle_watchlist", "joining watchlist");
            match self.watchlist_store.create(&self.key).await {
                Ok(record) => {
                    lock_state(&self.state).membership = WatchlistStatus::member(record.item_id);
                }
                Err(err) => {
                    lock_state(&self.state).membership = prior; // rollback
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Record a failed toggle on the item and schedule its removal. A newer
    /// error supersedes the pending clear of an older one.
    fn set_transient_error(&self, err: &ApiError) {
        let seq = {
            let mut state = lock_state(&self.state);
            state.error_seq += 1;
            state.last_error = Some(TransientError {
                message: err.to_string(),
                raised_at: Utc::now(),
            });
            state.error_seq
        };

        let state = Arc::clone(&self.state);
        let ttl = self.error_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut state = lock_state(&state);
            if state.error_seq == seq {
                state.last_error = None;
            }
        });
    }
}

/// Session-scoped factory for controllers.
///
/// Hands out at most one controller per content key so no two callers hold
/// separate mirrors of the same item, and owns the lock table they all
/// share.
pub struct ControllerRegistry {
    log_store: Arc<dyn LogStore>,
    watchlist_store: Arc<dyn WatchlistStore>,
    locks: Arc<ToggleLocks>,
    controllers: Mutex<HashMap<ContentKey, Arc<ToggleController>>>,
    error_ttl: Duration,
}

impl ControllerRegistry {
    pub fn new(log_store: Arc<dyn LogStore>, watchlist_store: Arc<dyn WatchlistStore>) -> Self {
        Self {
            log_store,
            watchlist_store,
            locks: Arc::new(ToggleLocks::new()),
            controllers: Mutex::new(HashMap::new()),
            error_ttl: ERROR_TTL,
        }
    }

    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    /// Get or create the controller for a content key.
    pub fn controller(&self, key: &ContentKey) -> Arc<ToggleController> {
        let mut controllers = self
            .controllers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        controllers
            .entry(key.clone())
            .or_insert_with(|| {
                Arc::new(
                    ToggleController::new(
                        key.clone(),
                        Arc::clone(&self.log_store),
                        Arc::clone(&self.watchlist_store),
                        Arc::clone(&self.locks),
                    )
                    .with_error_ttl(self.error_ttl),
                )
            })
            .clone()
    }
}
