// Transaction feed, per-owner drill-down and summary payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{null_as_default, string_or_number, EmptyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Waiver,
    FreeAgent,
    Trade,
    /// Commissioner moves and any type this client does not know about.
    #[serde(other)]
    Other,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Waiver => "Waiver",
            TransactionType::FreeAgent => "Free Agent",
            TransactionType::Trade => "Trade",
            TransactionType::Other => "Other",
        }
    }

    /// Value of the `type` query parameter for `/transactions/by-owner`.
    pub fn query_value(&self) -> &'static str {
        match self {
            TransactionType::Waiver => "waiver",
            TransactionType::FreeAgent => "free_agent",
            TransactionType::Trade => "trade",
            TransactionType::Other => "other",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "waiver" => Ok(TransactionType::Waiver),
            "free_agent" => Ok(TransactionType::FreeAgent),
            "trade" => Ok(TransactionType::Trade),
            other => Err(format!(
                "unknown transaction type `{other}` (expected waiver, free_agent or trade)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Complete,
    Failed,
    #[serde(other)]
    Other,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Complete => "complete",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Other => "other",
        }
    }
}

/// A roster that took part in a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOwner {
    #[serde(default)]
    pub roster_id: Option<u32>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl TransactionOwner {
    /// Team name when set, otherwise the username.
    pub fn label(&self) -> String {
        self.team_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.username.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| match self.roster_id {
                Some(rid) => format!("Roster {rid}"),
                None => "Unknown".to_string(),
            })
    }
}

/// A player added to or dropped from a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovement {
    pub player_id: String,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub roster_id: u32,
}

impl PlayerMovement {
    pub fn label(&self) -> String {
        self.player_name
            .clone()
            .unwrap_or_else(|| format!("Player {}", self.player_id))
    }
}

/// A future draft pick changing hands.
///
/// `previous_owner_id` held the pick before the transaction and `owner_id`
/// holds it after. Equal values mean the entry moved nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickMovement {
    #[serde(default, deserialize_with = "string_or_number")]
    pub season: Option<String>,
    #[serde(default)]
    pub round: Option<u32>,
    /// Roster whose original pick this is.
    #[serde(default)]
    pub roster_id: Option<u32>,
    #[serde(default)]
    pub previous_owner_id: Option<u32>,
    #[serde(default)]
    pub owner_id: Option<u32>,
    #[serde(default)]
    pub owner_name: Option<String>,
}

impl PickMovement {
    /// True when the pick changed hands in this transaction.
    pub fn is_movement(&self) -> bool {
        self.previous_owner_id != self.owner_id
    }

    pub fn label(&self) -> String {
        match (&self.season, self.round) {
            (Some(season), Some(round)) => format!("{season} Round {round} pick"),
            (None, Some(round)) => format!("Round {round} pick"),
            (Some(season), None) => format!("{season} pick"),
            (None, None) => "Draft pick".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub season: Option<i32>,
    #[serde(default)]
    pub waiver_bid: Option<u32>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub status_updated: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<TransactionOwner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adds: Vec<PlayerMovement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drops: Vec<PlayerMovement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft_picks: Vec<PickMovement>,
    #[serde(default)]
    pub metadata_notes: Option<String>,
}

impl Transaction {
    pub fn is_trade(&self) -> bool {
        self.kind == TransactionType::Trade
    }

    pub fn status_updated_at(&self) -> Option<DateTime<Utc>> {
        self.status_updated
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Response of `/transactions/recent` and `/transactions/by-owner`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
}

impl EmptyResult for TransactionsResponse {
    fn is_empty_result(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Per-owner transaction counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub waiver_adds: u32,
    #[serde(default)]
    pub free_agent_adds: u32,
    #[serde(default)]
    pub trades: u32,
    #[serde(default)]
    pub total: u32,
}

impl SummaryEntry {
    pub fn label(&self) -> &str {
        self.team_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Vec<SummaryEntry>,
}

impl EmptyResult for SummaryResponse {
    fn is_empty_result(&self) -> bool {
        self.summary.is_empty()
    }
}
