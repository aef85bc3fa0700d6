use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::content::ContentType;

/// One viewing log as stored by the backend.
///
/// A log without a season number covers the whole title ("general" log);
/// a log with one covers a single tv season. Movies never carry a season
/// number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub log_id: String,
    pub content_id: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    pub watched_date: NaiveDate,
    pub created_at: DateTime<Utc>, // used for ordering when picking a representative log
}

impl LogRecord {
    pub fn is_general(&self) -> bool {
        self.season_number.is_none()
    }
}
