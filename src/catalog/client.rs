//! AniList GraphQL client.
//!
//! Every call is a single POST with no retries. Failures of any kind collapse
//! into `None`, which callers treat as "catalog unavailable".

use chrono::Local;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{GraphQlResponse, Media, MediaData, PageData};
use super::query::{self, Chart, SeasonFilter};

/// Why a catalog call produced no data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("payload has no data")]
    MissingData,
}

/// Client for the anime catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    endpoint: String,
    season_override: Option<SeasonFilter>,
}

impl CatalogClient {
    /// Create a client for the given GraphQL endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            season_override: None,
        }
    }

    /// Pin the weekly-top chart to a fixed season instead of the current one.
    #[must_use]
    pub fn with_season(mut self, season: Option<SeasonFilter>) -> Self {
        self.season_override = season;
        self
    }

    /// Highest rated anime.
    pub async fn top_anime(&self) -> Option<Vec<Media>> {
        self.chart(Chart::Top).await
    }

    /// Currently trending anime.
    pub async fn trending_anime(&self) -> Option<Vec<Media>> {
        self.chart(Chart::Trending).await
    }

    /// Most popular anime of the configured (or current) season.
    pub async fn weekly_top_anime(&self) -> Option<Vec<Media>> {
        self.chart(Chart::WeeklyTop(self.weekly_season())).await
    }

    /// Season used by [`Self::weekly_top_anime`].
    pub fn weekly_season(&self) -> SeasonFilter {
        self.season_override
            .unwrap_or_else(|| SeasonFilter::for_date(Local::now().date_naive()))
    }

    /// Run a chart query.
    ///
    /// `Some(vec![])` is a successful empty result; `None` means the call failed.
    pub async fn chart(&self, chart: Chart) -> Option<Vec<Media>> {
        let result = match self.post(&chart.to_graphql()).await {
            Ok(body) => parse_page(&body),
            Err(e) => Err(e),
        };

        match result {
            Ok(media) => {
                debug!("Catalog returned {} entries for {:?}", media.len(), chart);
                Some(media)
            }
            Err(e) => {
                warn!("Catalog query {:?} failed: {}", chart, e);
                None
            }
        }
    }

    /// Look up a single anime.
    pub async fn media_by_id(&self, id: i64) -> Option<Media> {
        let result = match self.post(&query::media_by_id(id)).await {
            Ok(body) => parse_media(&body),
            Err(e) => Err(e),
        };

        result
            .inspect_err(|e| warn!("Catalog lookup of media {} failed: {}", id, e))
            .ok()
    }

    /// POST `{"query": ...}` and return the raw body of a 200 response.
    async fn post(&self, query: &str) -> Result<String, CatalogError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// Extract `data.Page.media` from a response body.
pub(crate) fn parse_page(body: &str) -> Result<Vec<Media>, CatalogError> {
    let response: GraphQlResponse<PageData> = serde_json::from_str(body)?;

    response
        .data
        .and_then(|d| d.page)
        .and_then(|p| p.media)
        .ok_or(CatalogError::MissingData)
}

/// Extract `data.Media` from a response body.
pub(crate) fn parse_media(body: &str) -> Result<Media, CatalogError> {
    let response: GraphQlResponse<MediaData> = serde_json::from_str(body)?;

    response
        .data
        .and_then(|d| d.media)
        .ok_or(CatalogError::MissingData)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::MediaSeason;

    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use axum::Router;

    pub(crate) const PAGE_BODY: &str = r#"{
        "data": { "Page": { "media": [
            { "title": { "romaji": "Sousou no Frieren", "english": "Frieren: Beyond Journey's End" }, "id": 154587 },
            { "title": { "romaji": "Gintama." }, "id": 34096 },
            { "title": { "romaji": "Steins;Gate", "english": null }, "id": 9253 }
        ] } }
    }"#;

    /// Serve a fixed response on a random local port.
    pub(crate) async fn serve(status: u16, body: &'static str) -> String {
        let status = AxumStatus::from_u16(status).unwrap();
        let app = Router::new().route(
            "/",
            post(move |headers: HeaderMap, request: String| async move {
                let is_json = headers
                    .get("content-type")
                    .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
                let has_query = serde_json::from_str::<serde_json::Value>(&request)
                    .ok()
                    .and_then(|v| v.get("query").cloned())
                    .is_some_and(|q| q.is_string());

                if is_json && has_query {
                    (status, body)
                } else {
                    (AxumStatus::BAD_REQUEST, "bad request")
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/")
    }

    #[test]
    fn test_parse_page() {
        let media = parse_page(PAGE_BODY).unwrap();
        assert_eq!(media.len(), 3);
        assert_eq!(media[0].english_title(), Some("Frieren: Beyond Journey's End"));
        assert_eq!(media[1].title.english, None);
        assert_eq!(media[1].display_title(), "Gintama.");
        assert_eq!(media[2].id, 9253);
    }

    #[test]
    fn test_parse_page_errors() {
        assert!(matches!(parse_page("not json"), Err(CatalogError::Payload(_))));
        assert!(matches!(parse_page(r#"{"data": {}}"#), Err(CatalogError::MissingData)));
        assert!(matches!(
            parse_page(r#"{"data": null, "errors": [{"message": "boom"}]}"#),
            Err(CatalogError::MissingData)
        ));
        assert!(parse_page(r#"{"data": {"Page": {"media": []}}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_media() {
        let body = r#"{"data": {"Media": {"title": {"romaji": "Shingeki no Kyojin", "english": "Attack on Titan"}, "id": 16498}}}"#;
        let media = parse_media(body).unwrap();
        assert_eq!(media.id, 16498);
        assert_eq!(media.display_title(), "Attack on Titan");

        assert!(parse_media(r#"{"data": {"Media": null}}"#).is_err());
    }

    #[tokio::test]
    async fn test_chart_success() {
        let url = serve(200, PAGE_BODY).await;
        let client = CatalogClient::new(url);

        let media = client.top_anime().await.unwrap();
        assert_eq!(media.len(), 3);
        assert_eq!(media[0].title.romaji, "Sousou no Frieren");
    }

    #[tokio::test]
    async fn test_server_error_is_sentinel() {
        let url = serve(500, "internal error").await;
        let client = CatalogClient::new(url);

        assert_eq!(client.top_anime().await, None);
        assert_eq!(client.trending_anime().await, None);
        assert_eq!(client.media_by_id(1).await, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_sentinel() {
        let url = serve(200, "<html>maintenance</html>").await;
        let client = CatalogClient::new(url);

        assert_eq!(client.weekly_top_anime().await, None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_sentinel() {
        // Nothing listens on port 9 locally.
        let client = CatalogClient::new("http://127.0.0.1:9/");
        assert_eq!(client.trending_anime().await, None);
    }

    #[test]
    fn test_season_override() {
        let fixed = SeasonFilter { season: MediaSeason::Winter, year: 2024 };
        let client = CatalogClient::new("http://localhost/").with_season(Some(fixed));
        assert_eq!(client.weekly_season(), fixed);
    }
}
