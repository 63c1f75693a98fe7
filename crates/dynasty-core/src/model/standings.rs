// Standings payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, EmptyResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub roster_id: u32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub division: Option<u32>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
    #[serde(default)]
    pub win_percentage: f64,
}

impl Standing {
    pub fn owner_label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Response of `GET /standings` and `GET /standings/{season}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub season: i32,
    #[serde(default)]
    pub num_divisions: u32,
    /// Division number (string key) to display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub division_names: HashMap<String, String>,
    #[serde(default)]
    pub total_teams: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub standings: Vec<Standing>,
}

impl EmptyResult for StandingsResponse {
    fn is_empty_result(&self) -> bool {
        self.standings.is_empty()
    }
}
