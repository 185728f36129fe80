use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::{Card, Entry, Rating, ReviewOutcome, StatsSummary, TagSet};

use super::error::ApiError;
use super::{CardPage, CardQuery, EntryPage, StudyService};

/// HTTP client for the study service. Cloning shares the underlying
/// connection pool.
#[derive(Clone, Debug)]
pub struct HttpStudyService {
    client: Client,
    base_url: String,
}

/// Error payload the service attaches to non-success responses
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl HttpStudyService {
    /// Create a client for the service at `base_url` (e.g.
    /// "http://localhost:8000/api").
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Normalize URL - ensure no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::Validation(
                "server URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build full URL for a path
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Convert a non-success response into the error taxonomy, using the
    /// service's `detail` field when the body carries one.
    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("request failed with status {}", status));

        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(detail)
            }
            status if status.is_server_error() => ApiError::Transient(detail),
            _ => ApiError::Unknown(detail),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl StudyService for HttpStudyService {
    async fn list_due_cards(&self, limit: usize) -> Result<Vec<Card>, ApiError> {
        let page: CardPage = self
            .get_json("cards/due", &[("limit", limit.to_string())])
            .await?;
        Ok(page.cards)
    }

    async fn list_cards(&self, query: &CardQuery) -> Result<CardPage, ApiError> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if let Some(card_type) = query.card_type {
            params.push(("card_type", card_type.as_str().to_string()));
        }
        for tag in query.tags.iter() {
            params.push(("tags", tag.to_string()));
        }
        self.get_json("cards", &params).await
    }

    async fn list_entries(
        &self,
        limit: usize,
        offset: usize,
        tags: &TagSet,
    ) -> Result<EntryPage, ApiError> {
        let mut params = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        for tag in tags.iter() {
            params.push(("tags", tag.to_string()));
        }
        self.get_json("entries", &params).await
    }

    async fn get_entry(&self, id: i64) -> Result<Entry, ApiError> {
        self.get_json(&format!("entries/{}", id), &[]).await
    }

    async fn create_entry(&self, content: &str, tags: &TagSet) -> Result<Entry, ApiError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::Validation(
                "entry content must not be empty".to_string(),
            ));
        }

        self.post_json("entries", &json!({ "content": content, "tags": tags }))
            .await
    }

    async fn submit_review(
        &self,
        card_id: i64,
        rating: Rating,
    ) -> Result<ReviewOutcome, ApiError> {
        self.post_json(
            &format!("cards/{}/review", card_id),
            &json!({ "rating": rating }),
        )
        .await
    }

    async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
        self.get_json("stats", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalization() {
        let service = HttpStudyService::new("http://localhost:8000/api/").unwrap();
        assert_eq!(service.url("cards/due"), "http://localhost:8000/api/cards/due");
        assert_eq!(service.url("/stats"), "http://localhost:8000/api/stats");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = HttpStudyService::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_entry_rejects_blank_content() {
        let service = HttpStudyService::new("http://localhost:8000/api").unwrap();

        for content in ["", "   ", "\n\t"] {
            let err = service
                .create_entry(content, &TagSet::new())
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "content: {:?}", content);
        }
    }
}
