// reqwest-backed `LeagueApi` with a single retry and a response cache.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{ApiError, LeagueApi, ResponseCache};
use crate::config::Config;
use crate::model::{
    DraftDetail, DraftListData, H2HMatrixResponse, LeagueHistoryResponse, OwnerDetail,
    OwnersResponse, PlayerRecordQuery, PlayerRecordsResponse, RecordCategory, RookieRecordQuery,
    SeasonHistory,
    SeasonsResponse, StandingsResponse, SummaryResponse, SyncResponse, TaxiSquadsResponse,
    TransactionType, TransactionsResponse,
};

type Query = Vec<(&'static str, String)>;

// ---------------------------------------------------------------------------
// HttpLeagueApi
// ---------------------------------------------------------------------------

pub struct HttpLeagueApi {
    http: reqwest::Client,
    /// Server root with the `/api` prefix, no trailing slash.
    api_base: String,
    retries: u32,
    cache: ResponseCache,
}

impl HttpLeagueApi {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        retries: u32,
        stale_time: Duration,
    ) -> Result<Self, ApiError> {
        let api_base = api_base(base_url);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: api_base.clone(),
                source,
            })?;
        Ok(Self {
            http,
            api_base,
            retries,
            cache: ResponseCache::new(stale_time),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.api.base_url,
            config.api.timeout(),
            config.api.retries,
            config.cache.stale_time(),
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Cached GET: a fresh cache entry short-circuits the network.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<T, ApiError> {
        let key = request_key(path, &query);
        let url = format!("{}{}", self.api_base, path);

        if let Some(body) = self.cache.get(&key) {
            debug!(key = %key, "cache hit");
            return serde_json::from_value(body).map_err(|source| ApiError::Decode { url, source });
        }

        let body = self.fetch(Method::GET, &url, &query).await?;
        // Cache only after a successful decode.
        let data = T::deserialize(&body).map_err(|source| ApiError::Decode {
            url: url.clone(),
            source,
        })?;
        self.cache.insert(key, body);
        Ok(data)
    }

    /// Issue the request, retrying retryable failures up to `self.retries` times.
    async fn fetch(&self, method: Method, url: &str, query: &Query) -> Result<Value, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(method.clone(), url, query).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retries && e.is_retryable() => {
                    attempt += 1;
                    warn!("{method} {url} failed ({e}); retry {attempt}/{}", self.retries);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, method: Method, url: &str, query: &Query) -> Result<Value, ApiError> {
        let started = Instant::now();
        let transport = |source| ApiError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .request(method.clone(), url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "{method} {url}"
        );

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl LeagueApi for HttpLeagueApi {
    async fn standings(&self, season: Option<i32>) -> Result<StandingsResponse, ApiError> {
        let path = match season {
            Some(season) => format!("/standings/{season}"),
            None => "/standings".to_string(),
        };
        self.get(&path, vec![]).await
    }

    async fn drafts(&self) -> Result<DraftListData, ApiError> {
        self.get("/drafts", vec![]).await
    }

    async fn draft(&self, year: i32) -> Result<DraftDetail, ApiError> {
        self.get(&format!("/drafts/{year}"), vec![]).await
    }

    async fn head_to_head_matrix(
        &self,
        category: RecordCategory,
    ) -> Result<H2HMatrixResponse, ApiError> {
        self.get(
            "/matchups/head-to-head-matrix",
            vec![("match_type", category.match_type().to_string())],
        )
        .await
    }

    async fn owners(&self) -> Result<OwnersResponse, ApiError> {
        self.get("/owners", vec![]).await
    }

    async fn owner_detail(&self, user_id: &str) -> Result<OwnerDetail, ApiError> {
        let user_id = path_segment(user_id)?;
        self.get(&format!("/owners/{user_id}"), vec![]).await
    }

    async fn player_records(
        &self,
        query: &PlayerRecordQuery,
    ) -> Result<PlayerRecordsResponse, ApiError> {
        if !query.is_valid_limit() {
            return Err(ApiError::InvalidQuery(format!(
                "limit must be between 1 and {}, got {}",
                PlayerRecordQuery::MAX_LIMIT,
                query.limit
            )));
        }
        self.get("/player-records", query.params()).await
    }

    async fn rookie_records(
        &self,
        query: &RookieRecordQuery,
    ) -> Result<PlayerRecordsResponse, ApiError> {
        if let Some(reason) = query.rejection() {
            return Err(ApiError::InvalidQuery(reason));
        }
        self.get("/rookie-records", query.params()).await
    }

    async fn taxi_squads(&self) -> Result<TaxiSquadsResponse, ApiError> {
        self.get("/taxi-squads", vec![]).await
    }

    async fn recent_transactions(&self, limit: u32) -> Result<TransactionsResponse, ApiError> {
        if limit == 0 {
            return Err(ApiError::InvalidQuery("limit must be at least 1".into()));
        }
        self.get("/transactions/recent", vec![("limit", limit.to_string())])
            .await
    }

    async fn transaction_summary(&self) -> Result<SummaryResponse, ApiError> {
        self.get("/transactions/summary", vec![]).await
    }

    async fn transactions_by_owner(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
    ) -> Result<TransactionsResponse, ApiError> {
        self.get("/transactions/by-owner", by_owner_query(user_id, kind)?)
            .await
    }

    async fn league_history(&self) -> Result<LeagueHistoryResponse, ApiError> {
        self.get("/league-history", vec![]).await
    }

    async fn season_history(&self, season: i32) -> Result<SeasonHistory, ApiError> {
        self.get(&format!("/league-history/{season}"), vec![]).await
    }

    async fn seasons(&self) -> Result<SeasonsResponse, ApiError> {
        self.get("/seasons", vec![]).await
    }

    async fn sync_league(&self) -> Result<SyncResponse, ApiError> {
        let url = format!("{}/sync/league", self.api_base);
        let body = self.fetch(Method::POST, &url, &Query::new()).await?;
        // Everything cached predates the sync.
        self.cache.clear();
        info!("League sync requested");
        serde_json::from_value(body).map_err(|source| ApiError::Decode { url, source })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `{base_url}/api` with any trailing slash on `base_url` removed.
pub fn api_base(base_url: &str) -> String {
    format!("{}/api", base_url.trim_end_matches('/'))
}

/// Cache key for a request: the path plus its query in parameter order.
pub fn request_key(path: &str, query: &[(&'static str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", pairs.join("&"))
}

fn by_owner_query(user_id: &str, kind: Option<TransactionType>) -> Result<Query, ApiError> {
    if user_id.trim().is_empty() {
        return Err(ApiError::InvalidQuery("user_id must not be empty".into()));
    }
    let mut query = vec![("user_id", user_id.to_string())];
    if let Some(kind) = kind {
        query.push(("type", kind.query_value().to_string()));
    }
    Ok(query)
}

/// Owner IDs are opaque numeric strings; anything that would change the
/// path shape is rejected rather than escaped.
fn path_segment(value: &str) -> Result<&str, ApiError> {
    if value.is_empty() || value.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidQuery(format!("invalid owner id `{value}`")));
    }
    Ok(value)
}

/// Human-readable detail from an error body: the JSON `detail` field when
/// present, otherwise the first line of the body.
fn error_detail(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(detail)) = map.get("detail") {
            return detail.clone();
        }
    }
    let line = body.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        "empty response body".to_string()
    } else {
        line.chars().take(200).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchType, Position, RecordView, RosterType};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve the canned `(status, body)` responses, one connection each, and
    /// record the request line of every request received.
    async fn mock_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_task = Arc::clone(&seen);

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap();
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let line = request.lines().next().unwrap_or_default().to_string();
                seen_task.lock().unwrap().push(line);

                let response = format!(
                    "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.flush().await.unwrap();
            }
        });

        (format!("http://{addr}"), seen)
    }

    fn client(base_url: &str, retries: u32) -> HttpLeagueApi {
        HttpLeagueApi::new(
            base_url,
            Duration::from_secs(5),
            retries,
            Duration::from_secs(300),
        )
        .unwrap()
    }

    #[test]
    fn api_base_appends_prefix() {
        assert_eq!(api_base("http://localhost:8000"), "http://localhost:8000/api");
        assert_eq!(api_base("https://stats.example.com/"), "https://stats.example.com/api");
    }

    #[test]
    fn request_key_keeps_parameter_order() {
        assert_eq!(request_key("/owners", &[]), "/owners");
        let query = PlayerRecordQuery::default().params();
        assert_eq!(
            request_key("/player-records", &query),
            "/player-records?view=game&match_type=regular&roster_type=all&limit=10"
        );
    }

    #[test]
    fn by_owner_query_adds_type_filter() {
        let query = by_owner_query("123", Some(TransactionType::FreeAgent)).unwrap();
        assert_eq!(
            query,
            vec![("user_id", "123".to_string()), ("type", "free_agent".to_string())]
        );
        assert!(by_owner_query(" ", None).is_err());
    }

    #[test]
    fn path_segment_rejects_separators() {
        assert_eq!(path_segment("7381").unwrap(), "7381");
        assert!(path_segment("../owners").is_err());
        assert!(path_segment("").is_err());
    }

    #[test]
    fn error_detail_prefers_json_detail() {
        assert_eq!(error_detail(r#"{"detail": "Draft not found"}"#), "Draft not found");
        assert_eq!(error_detail("Internal Server Error\ntrace"), "Internal Server Error");
        assert_eq!(error_detail(""), "empty response body");
    }

    #[tokio::test]
    async fn retries_once_after_server_error() {
        let (base, seen) = mock_server(vec![
            (500, r#"{"detail": "boom"}"#),
            (200, r#"{"seasons": [2024, 2023]}"#),
        ])
        .await;

        let api = client(&base, 1);
        let seasons = api.seasons().await.unwrap();
        assert_eq!(seasons.seasons, vec![2024, 2023]);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn gives_up_after_retry_budget() {
        let (base, seen) = mock_server(vec![
            (502, r#"{"detail": "bad gateway"}"#),
            (503, r#"{"detail": "unavailable"}"#),
        ])
        .await;

        let api = client(&base, 1);
        let err = api.owners().await.unwrap_err();
        match err {
            ApiError::Status { status, detail, .. } => {
                assert_eq!(status, 503);
                assert_eq!(detail, "unavailable");
            }
            other => panic!("expected Status, got: {other}"),
        }
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let (base, seen) = mock_server(vec![(404, r#"{"detail": "Draft not found"}"#)]).await;

        let api = client(&base, 1);
        let err = api.draft(1999).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(seen.lock().unwrap()[0], "GET /api/drafts/1999 HTTP/1.1");
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let (base, seen) = mock_server(vec![(200, r#"{"seasons": [2024]}"#)]).await;

        let api = client(&base, 0);
        api.seasons().await.unwrap();
        let again = api.seasons().await.unwrap();
        assert_eq!(again.seasons, vec![2024]);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_parameters_reach_the_server() {
        let (base, seen) =
            mock_server(vec![(200, r#"{"owners": [], "matrix": {}, "median_records": {}}"#)]).await;

        let api = client(&base, 0);
        api.head_to_head_matrix(RecordCategory::Playoff).await.unwrap();
        assert_eq!(
            seen.lock().unwrap()[0],
            "GET /api/matchups/head-to-head-matrix?match_type=playoff HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn sync_posts_and_clears_cache() {
        let (base, seen) = mock_server(vec![
            (200, r#"{"seasons": [2024]}"#),
            (200, r#"{"message": "Sync started"}"#),
            (200, r#"{"seasons": [2025, 2024]}"#),
        ])
        .await;

        let api = client(&base, 0);
        api.seasons().await.unwrap();
        let sync = api.sync_league().await.unwrap();
        assert_eq!(sync.message.as_deref(), Some("Sync started"));

        let seasons = api.seasons().await.unwrap();
        assert_eq!(seasons.seasons, vec![2025, 2024]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[1], "POST /api/sync/league HTTP/1.1");
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn invalid_player_query_is_rejected_locally() {
        let api = client("http://127.0.0.1:9", 0);
        let query = PlayerRecordQuery {
            limit: 0,
            ..Default::default()
        };
        let err = api.player_records(&query).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn rookie_records_send_the_record_filters() {
        let (base, seen) = mock_server(vec![(
            200,
            r#"{"view": "season", "match_type": "playoff", "roster_type": "starter", "records": [
                {"rank": 1, "player_name": "Rookie QB", "position": "QB", "total_points": 65.0,
                 "games_played": 2, "avg_points": 32.5, "season": 2024, "owner_name": "Owner One"}
            ]}"#,
        )])
        .await;

        let api = client(&base, 0);
        let query = RookieRecordQuery(PlayerRecordQuery {
            view: RecordView::Season,
            match_type: MatchType::Playoff,
            roster_type: RosterType::Starter,
            position: Some(Position::QB),
            limit: 5,
        });
        let response = api.rookie_records(&query).await.unwrap();
        assert_eq!(response.view, RecordView::Season);
        assert_eq!(response.records.len(), 1);
        assert_eq!(
            seen.lock().unwrap()[0],
            "GET /api/rookie-records?view=season&match_type=playoff&roster_type=starter&position=QB&limit=5 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn rookie_career_view_is_rejected_locally() {
        let api = client("http://127.0.0.1:9", 0);
        let query = RookieRecordQuery(PlayerRecordQuery {
            view: RecordView::Career,
            ..Default::default()
        });
        let err = api.rookie_records(&query).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery(ref reason) if reason.contains("career")));
    }

    #[tokio::test]
    async fn undecodable_body_is_not_cached() {
        let (base, seen) = mock_server(vec![
            (200, r#"{"seasons": "soon"}"#),
            (200, r#"{"seasons": [2024]}"#),
        ])
        .await;

        let api = client(&base, 0);
        let err = api.seasons().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));

        let seasons = api.seasons().await.unwrap();
        assert_eq!(seasons.seasons, vec![2024]);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
