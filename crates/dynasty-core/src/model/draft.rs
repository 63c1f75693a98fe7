// Draft list and draft detail payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, EmptyResult};

/// A single pick on the draft board.
///
/// `roster_id` is the roster that actually made the pick (after any trades);
/// the roster that originally held the slot comes from
/// [`DraftDetail::draft_order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Overall pick number (1-indexed).
    pub pick_no: u32,
    pub round: u32,
    /// Slot within the round (1-indexed).
    pub pick_in_round: u32,
    pub roster_id: u32,
    /// Null for picks that were never made.
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub owner_user_id: Option<String>,
    #[serde(default)]
    pub owner_display_name: Option<String>,
}

impl DraftPick {
    /// Player label for a board cell, falling back to the raw player ID.
    pub fn player_label(&self) -> Option<&str> {
        self.player_name.as_deref().or(self.player_id.as_deref())
    }
}

/// Display identity of the roster that originally held a draft slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOwner {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Full draft results for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftDetail {
    pub year: i32,
    #[serde(default)]
    pub draft_id: Option<String>,
    #[serde(default, rename = "type")]
    pub draft_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rounds: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_picks: u32,
    /// Slot number (string key) to the roster that held it before trades.
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft_order: HashMap<String, u32>,
    /// Slot number (string key) to the original slot holder's identity.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slot_owners: HashMap<String, SlotOwner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub picks: Vec<DraftPick>,
}

impl EmptyResult for DraftDetail {
    fn is_empty_result(&self) -> bool {
        self.picks.is_empty()
    }
}

/// One entry in the draft list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSummary {
    pub year: i32,
    #[serde(default)]
    pub draft_id: Option<String>,
    #[serde(default, rename = "type")]
    pub draft_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub total_picks: Option<u32>,
}

/// Response of `GET /drafts`, newest season first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftListData {
    #[serde(default)]
    pub total_drafts: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drafts: Vec<DraftSummary>,
}

impl DraftListData {
    /// Most recent draft year, used as the default selection.
    pub fn latest_year(&self) -> Option<i32> {
        self.drafts.iter().map(|d| d.year).max()
    }
}

impl EmptyResult for DraftListData {
    fn is_empty_result(&self) -> bool {
        self.drafts.is_empty()
    }
}
