use screenlog_models::{ContentType, LogRecord, WatchStatus};

/// Derive the display status for a content item from its full log set.
///
/// Movies: any log at all means watched. Tv: a general (whole-show) log
/// means watched even when season logs are also present; season logs alone
/// mean watching.
pub fn resolve(content_type: ContentType, logs: &[LogRecord]) -> WatchStatus {
    match content_type {
        ContentType::Movie => {
            if logs.is_empty() {
                WatchStatus::Unwatched
            } else {
                WatchStatus::Watched
            }
        }
        ContentType::Tv => {
            let has_general = logs.iter().any(LogRecord::is_general);
            let has_season = logs.iter().any(|log| !log.is_general());
            if has_general {
                WatchStatus::Watched
            } else if has_season {
                WatchStatus::Watching
            } else {
                WatchStatus::Unwatched
            }
        }
    }
}

/// The single log worth showing for an item (its watched date and rating).
///
/// Movies: the most recently created log. Tv: the general log when one
/// exists, otherwise the most recently created season log.
pub fn representative_log(content_type: ContentType, logs: &[LogRecord]) -> Option<&LogRecord> {
    match content_type {
        ContentType::Movie => most_recent(logs.iter()),
        ContentType::Tv => {
            general_log(logs).or_else(|| most_recent(logs.iter().filter(|log| !log.is_general())))
        }
    }
}

/// The general log for an item, when one exists. Ties on creation time do
/// not arise in practice (at most one general log per item) but the most
/// recent wins if the backend ever hands us duplicates.
pub fn general_log(logs: &[LogRecord]) -> Option<&LogRecord> {
    most_recent(logs.iter().filter(|log| log.is_general()))
}

fn most_recent<'a>(logs: impl Iterator<Item = &'a LogRecord>) -> Option<&'a LogRecord> {
    logs.max_by_key(|log| log.created_at)
}
