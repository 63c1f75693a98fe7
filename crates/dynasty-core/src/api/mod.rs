// League stats API: the fetch capability every view receives its data from.
//
// Views never talk HTTP directly. They are handed a `LeagueApi`, which the
// binary backs with `HttpLeagueApi` and tests back with an in-memory fake.

pub mod cache;
pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    DraftDetail, DraftListData, H2HMatrixResponse, LeagueHistoryResponse, OwnerDetail,
    OwnersResponse, PlayerRecordQuery, PlayerRecordsResponse, RecordCategory, RookieRecordQuery,
    SeasonHistory,
    SeasonsResponse, StandingsResponse, SummaryResponse, SyncResponse, TaxiSquadsResponse,
    TransactionType, TransactionsResponse,
};

pub use cache::ResponseCache;
pub use client::HttpLeagueApi;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {detail}")]
    Status {
        url: String,
        status: u16,
        detail: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Transport failures and server errors are worth one more attempt;
    /// client errors and bad payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode { .. } | ApiError::InvalidQuery(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// LeagueApi trait
// ---------------------------------------------------------------------------

/// Read access to the league stats API, plus the sync trigger.
#[async_trait]
pub trait LeagueApi: Send + Sync {
    /// Current standings, or a past season's when `season` is set.
    async fn standings(&self, season: Option<i32>) -> Result<StandingsResponse, ApiError>;

    async fn drafts(&self) -> Result<DraftListData, ApiError>;

    async fn draft(&self, year: i32) -> Result<DraftDetail, ApiError>;

    /// The matrix is computed upstream per category; nothing is derived
    /// client-side.
    async fn head_to_head_matrix(
        &self,
        category: RecordCategory,
    ) -> Result<H2HMatrixResponse, ApiError>;

    async fn owners(&self) -> Result<OwnersResponse, ApiError>;

    async fn owner_detail(&self, user_id: &str) -> Result<OwnerDetail, ApiError>;

    async fn player_records(
        &self,
        query: &PlayerRecordQuery,
    ) -> Result<PlayerRecordsResponse, ApiError>;

    /// Records set by players in their rookie season. Rows share the
    /// player-records shapes for the game and season views.
    async fn rookie_records(
        &self,
        query: &RookieRecordQuery,
    ) -> Result<PlayerRecordsResponse, ApiError>;

    async fn taxi_squads(&self) -> Result<TaxiSquadsResponse, ApiError>;

    async fn recent_transactions(&self, limit: u32) -> Result<TransactionsResponse, ApiError>;

    async fn transaction_summary(&self) -> Result<SummaryResponse, ApiError>;

    async fn transactions_by_owner(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
    ) -> Result<TransactionsResponse, ApiError>;

    async fn league_history(&self) -> Result<LeagueHistoryResponse, ApiError>;

    async fn season_history(&self, season: i32) -> Result<SeasonHistory, ApiError>;

    async fn seasons(&self) -> Result<SeasonsResponse, ApiError>;

    /// Ask the backend to pull fresh data from the upstream league source.
    async fn sync_league(&self) -> Result<SyncResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        let server = ApiError::Status {
            url: "http://x/api/owners".into(),
            status: 503,
            detail: "unavailable".into(),
        };
        let missing = ApiError::Status {
            url: "http://x/api/drafts/1999".into(),
            status: 404,
            detail: "Draft not found".into(),
        };
        assert!(server.is_retryable());
        assert!(!missing.is_retryable());
        assert!(!ApiError::InvalidQuery("limit".into()).is_retryable());
    }

    #[test]
    fn status_error_message_includes_detail() {
        let err = ApiError::Status {
            url: "http://x/api/drafts/1999".into(),
            status: 404,
            detail: "Draft not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "http://x/api/drafts/1999 returned HTTP 404: Draft not found"
        );
    }
}
