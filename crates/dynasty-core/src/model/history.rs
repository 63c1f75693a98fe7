// League history, season list and sync payloads.

use serde::{Deserialize, Serialize};

use super::{null_as_default, EmptyResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardWinner {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl AwardWinner {
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionWinner {
    #[serde(default)]
    pub division: Option<String>,
    #[serde(flatten)]
    pub winner: AwardWinner,
}

/// Award winners for a single season (`GET /league-history/{season}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonHistory {
    pub year: i32,
    #[serde(default)]
    pub champion: Option<AwardWinner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub division_winners: Vec<DivisionWinner>,
    #[serde(default)]
    pub consolation_winner: Option<AwardWinner>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueHistoryResponse {
    #[serde(default)]
    pub total_seasons: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasons: Vec<SeasonHistory>,
}

impl EmptyResult for LeagueHistoryResponse {
    fn is_empty_result(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Response of `GET /seasons`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasons: Vec<i32>,
}

impl EmptyResult for SeasonsResponse {
    fn is_empty_result(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Response of `POST /sync/league`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
