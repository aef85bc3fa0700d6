use serde::{Deserialize, Serialize};

/// Derived display status for one content item, always recomputed from the
/// current log set and never stored independently
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    /// No logs at all
    Unwatched,
    /// Season logs only (tv): partway through the show
    Watching,
    /// A general, whole-title log exists
    Watched,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Unwatched => "unwatched",
            WatchStatus::Watching => "watching",
            WatchStatus::Watched => "watched",
        }
    }
}
