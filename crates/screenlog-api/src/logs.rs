use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use screenlog_models::{normalize_rating, ContentKey, ContentType, LogRecord};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogRecordDto {
    log_id: String,
    content_id: String,
    content_type: ContentType,
    #[serde(default)]
    season_number: Option<u32>,
    #[serde(default)]
    rating: Option<f32>,
    watched_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl LogRecordDto {
    fn into_record(self) -> LogRecord {
        LogRecord {
            log_id: self.log_id,
            content_id: self.content_id,
            content_type: self.content_type,
            season_number: self.season_number,
            rating: normalize_rating(self.rating),
            watched_date: self.watched_date,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLogBody<'a> {
    content_id: &'a str,
    content_type: ContentType,
    watched_date: NaiveDate,
}

pub async fn fetch_logs(
    client: &Client,
    base_url: &str,
    access_token: &str,
    key: &ContentKey,
) -> ApiResult<Vec<LogRecord>> {
    let url = format!("{}/logs", base_url);
    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .query(&[
            ("contentId", key.content_id.as_str()),
            ("contentType", key.content_type.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body));
    }

    let records: Vec<LogRecordDto> = response.json().await?;
    Ok(records.into_iter().map(LogRecordDto::into_record).collect())
}

pub async fn create_log(
    client: &Client,
    base_url: &str,
    access_token: &str,
    key: &ContentKey,
    watched_date: NaiveDate,
) -> ApiResult<LogRecord> {
    let url = format!("{}/logs", base_url);
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&CreateLogBody {
            content_id: &key.content_id,
            content_type: key.content_type,
            watched_date,
        })
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body));
    }

    let record: LogRecordDto = response.json().await?;
    Ok(record.into_record())
}

pub async fn remove_log(
    client: &Client,
    base_url: &str,
    access_token: &str,
    log_id: &str,
) -> ApiResult<()> {
    let url = format!("{}/logs/{}", base_url, urlencoding::encode(log_id));
    let response = client
        .delete(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        // Already gone; deletion is idempotent from the caller's view
        debug!(log_id, "log already removed");
        return Ok(());
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_dto_parses_backend_payload() {
        let json = r#"{
            "logId": "l1",
            "contentId": "42",
            "contentType": "movie",
            "rating": 8.5,
            "watchedDate": "2026-08-20",
            "createdAt": "2026-08-20T19:04:00Z"
        }"#;
        let record = serde_json::from_str::<LogRecordDto>(json)
            .unwrap()
            .into_record();
        assert_eq!(record.log_id, "l1");
        assert_eq!(record.content_type, ContentType::Movie);
        assert_eq!(record.season_number, None);
        assert!(record.is_general());
        assert_eq!(record.rating, Some(8.5));
        assert_eq!(record.watched_date.to_string(), "2026-08-20");
    }

    #[test]
    fn test_log_record_dto_parses_season_log() {
        let json = r#"{
            "logId": "s1",
            "contentId": "7",
            "contentType": "tv",
            "seasonNumber": 1,
            "watchedDate": "2026-07-02",
            "createdAt": "2026-07-02T08:00:00Z"
        }"#;
        let record = serde_json::from_str::<LogRecordDto>(json)
            .unwrap()
            .into_record();
        assert_eq!(record.season_number, Some(1));
        assert!(!record.is_general());
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_log_record_dto_drops_out_of_contract_rating() {
        let json = r#"{
            "logId": "l1",
            "contentId": "42",
            "contentType": "movie",
            "rating": 12.0,
            "watchedDate": "2026-08-20",
            "createdAt": "2026-08-20T19:04:00Z"
        }"#;
        let record = serde_json::from_str::<LogRecordDto>(json)
            .unwrap()
            .into_record();
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_create_log_body_uses_backend_field_names() {
        let body = CreateLogBody {
            content_id: "42",
            content_type: ContentType::Movie,
            watched_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contentId"], "42");
        assert_eq!(json["contentType"], "movie");
        assert_eq!(json["watchedDate"], "2026-08-20");
    }
}
