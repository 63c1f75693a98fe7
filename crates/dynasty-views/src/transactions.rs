// Transaction attribution and the per-owner summary table.
//
// A transaction arrives as flat `adds`, `drops` and `draft_picks` lists, each
// entry tagged with a roster. For trades those lists are partitioned per
// participating roster into what it received and what it gave up.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use dynasty_core::model::{
    PickMovement, PlayerMovement, SummaryEntry, Transaction, TransactionOwner, TransactionStatus,
};
use tracing::warn;

use crate::sort::{locale_cmp, SortState};

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

/// Players and picks on one side of a trade for one roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assets<'a> {
    pub players: Vec<&'a PlayerMovement>,
    pub picks: Vec<&'a PickMovement>,
}

impl Assets<'_> {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.picks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.picks.len()
    }
}

/// One roster's share of a trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeParty<'a> {
    pub owner: &'a TransactionOwner,
    pub label: String,
    pub received: Assets<'a>,
    pub gave_up: Assets<'a>,
}

/// What `roster_id` received: players added to it and picks that arrived.
pub fn received_assets(txn: &Transaction, roster_id: u32) -> Assets<'_> {
    Assets {
        players: txn.adds.iter().filter(|a| a.roster_id == roster_id).collect(),
        picks: txn
            .draft_picks
            .iter()
            .filter(|p| p.owner_id == Some(roster_id) && p.previous_owner_id != Some(roster_id))
            .collect(),
    }
}

/// What `roster_id` gave up: players dropped from it and picks that left.
pub fn given_assets(txn: &Transaction, roster_id: u32) -> Assets<'_> {
    Assets {
        players: txn.drops.iter().filter(|d| d.roster_id == roster_id).collect(),
        picks: txn
            .draft_picks
            .iter()
            .filter(|p| p.previous_owner_id == Some(roster_id) && p.owner_id != Some(roster_id))
            .collect(),
    }
}

/// Per-roster blocks for a trade, in `owners` order. Rosters with nothing
/// received and nothing given are left out.
pub fn attribute_trade(txn: &Transaction) -> Vec<TradeParty<'_>> {
    txn.owners
        .iter()
        .filter_map(|owner| {
            let roster_id = owner.roster_id?;
            let received = received_assets(txn, roster_id);
            let gave_up = given_assets(txn, roster_id);
            if received.is_empty() && gave_up.is_empty() {
                return None;
            }
            Some(TradeParty {
                owner,
                label: owner.label(),
                received,
                gave_up,
            })
        })
        .collect()
}

/// Movements that name a roster not listed in `owners`. These cannot be
/// shown in any block.
pub fn unattributed_movements(txn: &Transaction) -> usize {
    let listed = |rid: u32| txn.owners.iter().any(|o| o.roster_id == Some(rid));
    let players = txn
        .adds
        .iter()
        .chain(txn.drops.iter())
        .filter(|m| !listed(m.roster_id))
        .count();
    let picks = txn
        .draft_picks
        .iter()
        .filter(|p| p.is_movement())
        .filter(|p| {
            !p.owner_id.is_some_and(listed) && !p.previous_owner_id.is_some_and(listed)
        })
        .count();
    players + picks
}

// ---------------------------------------------------------------------------
// Transaction view
// ---------------------------------------------------------------------------

/// Fields shown above every transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHeader {
    pub kind_label: &'static str,
    pub season: Option<i32>,
    pub week: Option<u32>,
    pub date: Option<NaiveDate>,
    pub waiver_bid: Option<u32>,
    pub failed: bool,
}

impl TransactionHeader {
    pub fn date_label(&self, format: &str) -> String {
        self.date
            .map(|d| d.format(format).to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionBody<'a> {
    Trade {
        parties: Vec<TradeParty<'a>>,
        unattributed: usize,
    },
    /// Waiver, free agent and any other single-roster move.
    Move {
        owners: &'a [TransactionOwner],
        adds: &'a [PlayerMovement],
        drops: &'a [PlayerMovement],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView<'a> {
    pub id: &'a str,
    pub header: TransactionHeader,
    /// Set for failed transactions that carry a note.
    pub failure_reason: Option<&'a str>,
    pub body: TransactionBody<'a>,
}

pub fn header(txn: &Transaction) -> TransactionHeader {
    TransactionHeader {
        kind_label: txn.kind.label(),
        season: txn.season,
        week: txn.week,
        date: txn.status_updated_at().map(|ts| ts.date_naive()),
        waiver_bid: txn.waiver_bid,
        failed: txn.status == TransactionStatus::Failed,
    }
}

/// The note explaining a failed transaction, if there is one.
pub fn failure_reason(txn: &Transaction) -> Option<&str> {
    if txn.status != TransactionStatus::Failed {
        return None;
    }
    txn.metadata_notes
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
}

pub fn build_transaction_view(txn: &Transaction) -> TransactionView<'_> {
    let body = if txn.is_trade() {
        let unattributed = unattributed_movements(txn);
        if unattributed > 0 {
            warn!(
                "Transaction {}: {} movement(s) reference rosters not listed as owners",
                txn.id, unattributed
            );
        }
        TransactionBody::Trade {
            parties: attribute_trade(txn),
            unattributed,
        }
    } else {
        TransactionBody::Move {
            owners: &txn.owners,
            adds: &txn.adds,
            drops: &txn.drops,
        }
    };

    TransactionView {
        id: &txn.id,
        header: header(txn),
        failure_reason: failure_reason(txn),
        body,
    }
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SummarySortField {
    Team,
    WaiverAdds,
    FreeAgentAdds,
    Trades,
    #[default]
    Total,
}

impl SummarySortField {
    pub const ALL: [SummarySortField; 5] = [
        SummarySortField::Team,
        SummarySortField::WaiverAdds,
        SummarySortField::FreeAgentAdds,
        SummarySortField::Trades,
        SummarySortField::Total,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SummarySortField::Team => "Team",
            SummarySortField::WaiverAdds => "Waivers",
            SummarySortField::FreeAgentAdds => "Free Agents",
            SummarySortField::Trades => "Trades",
            SummarySortField::Total => "Total",
        }
    }

    fn count(&self, entry: &SummaryEntry) -> u32 {
        match self {
            SummarySortField::Team => 0,
            SummarySortField::WaiverAdds => entry.waiver_adds,
            SummarySortField::FreeAgentAdds => entry.free_agent_adds,
            SummarySortField::Trades => entry.trades,
            SummarySortField::Total => entry.total,
        }
    }
}

impl FromStr for SummarySortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "team" => Ok(SummarySortField::Team),
            "waiver_adds" | "waivers" => Ok(SummarySortField::WaiverAdds),
            "free_agent_adds" | "free_agents" => Ok(SummarySortField::FreeAgentAdds),
            "trades" => Ok(SummarySortField::Trades),
            "total" => Ok(SummarySortField::Total),
            other => Err(format!(
                "unknown summary column `{other}` \
                 (expected team, waiver_adds, free_agent_adds, trades or total)"
            )),
        }
    }
}

pub fn compare_summary(a: &SummaryEntry, b: &SummaryEntry, field: SummarySortField) -> Ordering {
    match field {
        SummarySortField::Team => locale_cmp(a.label(), b.label()),
        numeric => numeric.count(a).cmp(&numeric.count(b)),
    }
}

/// Summary rows reordered by `sort`. Ties keep input order.
pub fn sort_summary<'a>(
    entries: &'a [SummaryEntry],
    sort: &SortState<SummarySortField>,
) -> Vec<&'a SummaryEntry> {
    let mut rows: Vec<&SummaryEntry> = entries.iter().collect();
    rows.sort_by(|a, b| sort.direction.apply(compare_summary(a, b, sort.field)));
    rows
}
