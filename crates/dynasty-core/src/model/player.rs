// Player record and taxi squad payloads, plus the typed player-records query.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{null_as_default, EmptyResult};

/// Aggregation level for player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordView {
    #[default]
    Game,
    Season,
    Career,
}

impl RecordView {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordView::Game => "game",
            RecordView::Season => "season",
            RecordView::Career => "career",
        }
    }
}

impl FromStr for RecordView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "game" => Ok(RecordView::Game),
            "season" => Ok(RecordView::Season),
            "career" => Ok(RecordView::Career),
            other => Err(format!("unknown view `{other}` (expected game, season or career)")),
        }
    }
}

/// Matchup type filter, spelled the way matchup endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Regular,
    Playoff,
    Consolation,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Regular => "regular",
            MatchType::Playoff => "playoff",
            MatchType::Consolation => "consolation",
        }
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" | "regular_season" => Ok(MatchType::Regular),
            "playoff" | "playoffs" => Ok(MatchType::Playoff),
            "consolation" => Ok(MatchType::Consolation),
            other => Err(format!(
                "unknown match type `{other}` (expected regular, playoff or consolation)"
            )),
        }
    }
}

/// Starter/bench filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterType {
    #[default]
    All,
    Starter,
    Bench,
}

impl RosterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterType::All => "all",
            RosterType::Starter => "starter",
            RosterType::Bench => "bench",
        }
    }
}

impl FromStr for RosterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RosterType::All),
            "starter" | "starters" => Ok(RosterType::Starter),
            "bench" => Ok(RosterType::Bench),
            other => Err(format!("unknown roster type `{other}` (expected all, starter or bench)")),
        }
    }
}

/// Football positions used by record filters and taxi ordering.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        }
    }

    /// Lenient parse of the position strings found in player payloads.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DEF" | "DST" => Some(Position::DEF),
            _ => None,
        }
    }

    /// Roster display order: QB, RB, WR, TE, K, DEF.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::QB => 0,
            Position::RB => 1,
            Position::WR => 2,
            Position::TE => 3,
            Position::K => 4,
            Position::DEF => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_str_pos(s)
            .ok_or_else(|| format!("unknown position `{s}` (expected QB, RB, WR, TE, K or DEF)"))
    }
}

/// Query for `GET /player-records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecordQuery {
    pub view: RecordView,
    pub match_type: MatchType,
    pub roster_type: RosterType,
    pub position: Option<Position>,
    /// Accepted range is `1..=100`.
    pub limit: u32,
}

impl Default for PlayerRecordQuery {
    fn default() -> Self {
        Self {
            view: RecordView::Game,
            match_type: MatchType::Regular,
            roster_type: RosterType::All,
            position: None,
            limit: 10,
        }
    }
}

impl PlayerRecordQuery {
    pub const MAX_LIMIT: u32 = 100;

    /// Query-string pairs in a stable order. `position` is omitted when unset.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("view", self.view.as_str().to_string()),
            ("match_type", self.match_type.as_str().to_string()),
            ("roster_type", self.roster_type.as_str().to_string()),
        ];
        if let Some(position) = self.position {
            params.push(("position", position.as_str().to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }

    pub fn is_valid_limit(&self) -> bool {
        (1..=Self::MAX_LIMIT).contains(&self.limit)
    }
}

/// Query for `GET /rookie-records`. Same filters as player records, but only
/// first-year performances are ranked and there is no career view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RookieRecordQuery(pub PlayerRecordQuery);

impl RookieRecordQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        self.0.params()
    }

    /// Reason the query would be refused upstream, if any.
    pub fn rejection(&self) -> Option<String> {
        if self.0.view == RecordView::Career {
            return Some("rookie records have no career view (expected game or season)".into());
        }
        if !self.0.is_valid_limit() {
            return Some(format!(
                "limit must be between 1 and {}, got {}",
                PlayerRecordQuery::MAX_LIMIT,
                self.0.limit
            ));
        }
        None
    }
}

/// Response of `GET /player-records` and `GET /rookie-records`.
///
/// The row shape depends on `view`, so rows stay as raw JSON here and are
/// decoded by the records view into typed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecordsResponse {
    #[serde(default)]
    pub view: RecordView,
    #[serde(default)]
    pub match_type: MatchType,
    #[serde(default)]
    pub roster_type: RosterType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<Value>,
}

impl EmptyResult for PlayerRecordsResponse {
    fn is_empty_result(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiPlayer {
    pub player_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiTeam {
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<TaxiPlayer>,
}

/// Response of `GET /taxi-squads` for the latest season.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiSquadsResponse {
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<TaxiTeam>,
}

impl EmptyResult for TaxiSquadsResponse {
    fn is_empty_result(&self) -> bool {
        self.teams.is_empty()
    }
}
