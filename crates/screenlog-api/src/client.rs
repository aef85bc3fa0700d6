use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use screenlog_models::{ContentKey, LogRecord, WatchlistRecord, WatchlistStatus};

use crate::error::{ApiError, ApiResult};
use crate::traits::{LogStore, WatchlistStore};
use crate::{logs, watchlist};

const USER_AGENT: &str = concat!("screenlog/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Screenlog backend, implementing both store traits.
///
/// The bearer token is supplied by the session layer; this client never
/// refreshes or clears it. A 401 from any call surfaces as `ApiError::Auth`.
#[derive(Clone)]
pub struct BackendClient {
    client: Arc<Client>,
    base_url: String,
    access_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn access_token(&self) -> ApiResult<&str> {
        self.access_token.as_deref().ok_or(ApiError::Auth)
    }
}

#[async_trait]
impl LogStore for BackendClient {
    async fn fetch(&self, key: &ContentKey) -> ApiResult<Vec<LogRecord>> {
        logs::fetch_logs(&self.client, &self.base_url, self.access_token()?, key).await
    }

    async fn create(&self, key: &ContentKey, watched_date: NaiveDate) -> ApiResult<LogRecord> {
        logs::create_log(
            &self.client,
            &self.base_url,
            self.access_token()?,
            key,
            watched_date,
        )
        .await
    }

    async fn remove(&self, log_id: &str) -> ApiResult<()> {
        logs::remove_log(&self.client, &self.base_url, self.access_token()?, log_id).await
    }
}

#[async_trait]
impl WatchlistStore for BackendClient {
    async fn fetch_status(&self, key: &ContentKey) -> ApiResult<WatchlistStatus> {
        watchlist::fetch_watchlist_status(&self.client, &self.base_url, self.access_token()?, key)
            .await
    }

    async fn create(&self, key: &ContentKey) -> ApiResult<WatchlistRecord> {
        watchlist::create_watchlist_item(&self.client, &self.base_url, self.access_token()?, key)
            .await
    }

    async fn remove(&self, item_id: &str) -> ApiResult<()> {
        watchlist::remove_watchlist_item(
            &self.client,
            &self.base_url,
            self.access_token()?,
            item_id,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            BackendClient::new("https://api.example.test/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "https://api.example.test/v1");
    }

    #[test]
    fn test_unauthenticated_client_reports_auth_error() {
        let client =
            BackendClient::new("https://api.example.test/v1", Duration::from_secs(5)).unwrap();
        assert!(!client.is_authenticated());
        assert!(matches!(client.access_token(), Err(ApiError::Auth)));

        let client = client.with_access_token("token-1");
        assert!(client.is_authenticated());
        assert_eq!(client.access_token().unwrap(), "token-1");
    }
}
