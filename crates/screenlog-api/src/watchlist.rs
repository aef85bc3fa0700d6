use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use screenlog_models::{ContentKey, ContentType, WatchlistRecord, WatchlistStatus};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistStatusDto {
    is_in_watchlist: bool,
    #[serde(default)]
    item_id: Option<String>,
}

impl WatchlistStatusDto {
    fn into_status(self) -> WatchlistStatus {
        let in_list = self.is_in_watchlist;
        WatchlistStatus {
            in_list,
            // an id without membership is meaningless; drop it
            item_id: self.item_id.filter(|_| in_list),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateWatchlistBody<'a> {
    content_id: &'a str,
    content_type: ContentType,
}

/// The backend has shipped two shapes for the create response:
/// `{"item": {"itemId": ...}}` and a flat `{"itemId": ...}`. Accept both.
fn extract_item_id(body: &Value) -> Option<&str> {
    body.get("item")
        .and_then(|item| item.get("itemId"))
        .or_else(|| body.get("itemId"))
        .and_then(Value::as_str)
}

pub async fn fetch_watchlist_status(
    client: &Client,
    base_url: &str,
    access_token: &str,
    key: &ContentKey,
) -> ApiResult<WatchlistStatus> {
    let url = format!(
        "{}/watchlist/status/{}/{}",
        base_url,
        key.content_type.as_str(),
        urlencoding::encode(&key.content_id)
    );
    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body));
    }

    let dto: WatchlistStatusDto = response.json().await?;
    Ok(dto.into_status())
}

pub async fn create_watchlist_item(
    client: &Client,
    base_url: &str,
    access_token: &str,
    key: &ContentKey,
) -> ApiResult<WatchlistRecord> {
    let url = format!("{}/watchlist", base_url);
    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&CreateWatchlistBody {
            content_id: &key.content_id,
            content_type: key.content_type,
        })
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body));
    }

    let body: Value = response.json().await?;
    let Some(item_id) = extract_item_id(&body) else {
        return Err(ApiError::Validation(format!(
            "watchlist create response missing itemId: {}",
            body
        )));
    };
    Ok(WatchlistRecord {
        item_id: item_id.to_string(),
        content_id: key.content_id.clone(),
        content_type: key.content_type,
        created_at: Utc::now(), // the response carries only the id
    })
}

pub async fn remove_watchlist_item(
    client: &Client,
    base_url: &str,
    access_token: &str,
    item_id: &str,
) -> ApiResult<()> {
    let url = format!("{}/watchlist/{}", base_url, urlencoding::encode(item_id));
    let response = client
        .delete(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!(item_id, "watchlist item already removed");
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
    use serde_json::json;

    #[test]
    fn test_extract_item_id_nested_shape() {
        let body = json!({"item": {"itemId": "w1"}});
        assert_eq!(extract_item_id(&body), Some("w1"));
    }

    #[test]
    fn test_extract_item_id_flat_shape() {
        let body = json!({"itemId": "w2"});
        assert_eq!(extract_item_id(&body), Some("w2"));
    }

    #[test]
    fn test_extract_item_id_missing() {
        assert_eq!(extract_item_id(&json!({})), None);
        assert_eq!(extract_item_id(&json!({"item": {}})), None);
        assert_eq!(extract_item_id(&json!({"itemId": 7})), None);
    }

    #[test]
    fn test_status_dto_member() {
        let dto: WatchlistStatusDto =
            serde_json::from_value(json!({"isInWatchlist": true, "itemId": "w1"})).unwrap();
        assert_eq!(dto.into_status(), WatchlistStatus::member("w1"));
    }

    #[test]
    fn test_status_dto_absent_with_null_id() {
        let dto: WatchlistStatusDto =
            serde_json::from_value(json!({"isInWatchlist": false, "itemId": null})).unwrap();
        assert_eq!(dto.into_status(), WatchlistStatus::absent());
    }

    #[test]
    fn test_status_dto_drops_id_when_not_member() {
        let dto: WatchlistStatusDto =
            serde_json::from_value(json!({"isInWatchlist": false, "itemId": "stale"})).unwrap();
        assert_eq!(dto.into_status().item_id, None);
    }

    #[test]
    fn test_create_body_uses_backend_field_names() {
        let body = CreateWatchlistBody {
            content_id: "42",
            content_type: ContentType::Tv,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contentId"], "42");
        assert_eq!(json["contentType"], "tv");
    }
}
