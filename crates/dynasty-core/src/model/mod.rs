// API payload types, one submodule per endpoint family.
//
// Optional fields in the JSON become `Option<T>` or `#[serde(default)]`
// collections so that partial records deserialize instead of failing.

pub mod category;
pub mod draft;
pub mod h2h;
pub mod history;
pub mod owner;
pub mod player;
pub mod standings;
pub mod transaction;

pub use category::RecordCategory;
pub use draft::{DraftDetail, DraftListData, DraftPick, DraftSummary, SlotOwner};
pub use h2h::{H2HMatrixResponse, H2HOwner, H2HRecord};
pub use history::{AwardWinner, DivisionWinner, LeagueHistoryResponse, SeasonHistory, SeasonsResponse, SyncResponse};
pub use owner::{CategoryRecord, OwnerDetail, OwnerRecord, OwnersResponse, SeasonRecord, Trophies};
pub use player::{
    MatchType, PlayerRecordQuery, PlayerRecordsResponse, Position, RecordView, RookieRecordQuery,
    RosterType, TaxiPlayer, TaxiSquadsResponse, TaxiTeam,
};
pub use standings::{Standing, StandingsResponse};
pub use transaction::{
    PickMovement, PlayerMovement, SummaryEntry, SummaryResponse, Transaction, TransactionOwner,
    TransactionStatus, TransactionType, TransactionsResponse,
};

/// Deserialize `null` as the type's default. The API sends `null` for empty
/// maps and lists on legacy records, which `#[serde(default)]` alone rejects.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a JSON string or number and keep it as text. Pick seasons arrive
/// as `"2025"` from some league sources and as `2025` from others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Whether a fetched payload carries no data worth rendering.
///
/// Empty results are a normal outcome (a league with no drafts yet, an owner
/// with no trades) and are displayed as an explicit "no data" state rather
/// than an error.
pub trait EmptyResult {
    fn is_empty_result(&self) -> bool;
}
