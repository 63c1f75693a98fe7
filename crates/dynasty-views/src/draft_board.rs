// Draft board: a flat pick list arranged as a round x slot grid.

use std::collections::HashMap;

use dynasty_core::model::{DraftDetail, DraftPick, SlotOwner};
use tracing::warn;

/// One cell of the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCell<'a> {
    /// No pick recorded for this round and slot.
    Empty { slot: u32 },
    Pick {
        pick: &'a DraftPick,
        /// The roster that made the pick is not the slot's original holder.
        traded: bool,
    },
}

impl<'a> BoardCell<'a> {
    pub fn pick(&self) -> Option<&'a DraftPick> {
        match self {
            BoardCell::Pick { pick, .. } => Some(pick),
            BoardCell::Empty { .. } => None,
        }
    }

    pub fn is_traded(&self) -> bool {
        matches!(self, BoardCell::Pick { traded: true, .. })
    }
}

/// One row of the board. Always has one cell per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRound<'a> {
    pub round: u32,
    pub cells: Vec<BoardCell<'a>>,
}

/// Column header: the slot and whoever originally held it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotHeader<'a> {
    pub slot: u32,
    pub owner: Option<&'a SlotOwner>,
}

impl SlotHeader<'_> {
    pub fn label(&self) -> String {
        self.owner
            .and_then(|o| o.display_name.clone())
            .unwrap_or_else(|| format!("Slot {}", self.slot))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftBoard<'a> {
    pub year: i32,
    pub slots: Vec<SlotHeader<'a>>,
    pub rounds: Vec<BoardRound<'a>>,
    /// Picks that fell outside the board's rounds or slots.
    pub dropped_picks: usize,
}

impl<'a> DraftBoard<'a> {
    pub fn slot_numbers(&self) -> Vec<u32> {
        self.slots.iter().map(|s| s.slot).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn traded_picks(&self) -> impl Iterator<Item = &'a DraftPick> + '_ {
        self.rounds
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_traded())
            .filter_map(BoardCell::pick)
    }
}

/// Board slot numbers in numeric order.
///
/// Taken from `draft_order` keys. When that map is empty (older drafts),
/// slots are the distinct `pick_in_round` values over all picks.
pub fn slot_keys(detail: &DraftDetail) -> Vec<u32> {
    let mut slots: Vec<u32> = detail
        .draft_order
        .keys()
        .filter_map(|key| match key.trim().parse::<u32>() {
            Ok(slot) => Some(slot),
            Err(_) => {
                warn!("Draft {}: ignoring non-numeric slot key {:?}", detail.year, key);
                None
            }
        })
        .collect();

    if slots.is_empty() {
        slots = detail.picks.iter().map(|p| p.pick_in_round).collect();
    }

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// A pick is traded when `draft_order` names a different original roster
/// for its slot. A slot missing from `draft_order` is never traded.
pub fn is_traded(pick: &DraftPick, draft_order: &HashMap<String, u32>) -> bool {
    draft_order
        .get(&pick.pick_in_round.to_string())
        .is_some_and(|&original| original != pick.roster_id)
}

/// Build the board for one draft. Each call starts from scratch.
pub fn build_draft_board(detail: &DraftDetail) -> DraftBoard<'_> {
    let slot_numbers = slot_keys(detail);
    let slots = slot_numbers
        .iter()
        .map(|&slot| SlotHeader {
            slot,
            owner: detail.slot_owners.get(&slot.to_string()),
        })
        .collect();

    if detail.rounds == 0 || detail.picks.is_empty() {
        return DraftBoard {
            year: detail.year,
            slots,
            rounds: Vec::new(),
            dropped_picks: detail.picks.len(),
        };
    }

    let mut grid: HashMap<(u32, u32), &DraftPick> = HashMap::new();
    let mut dropped_picks = 0;
    for pick in &detail.picks {
        let in_range = (1..=detail.rounds).contains(&pick.round)
            && slot_numbers.binary_search(&pick.pick_in_round).is_ok();
        if !in_range {
            warn!(
                "Draft {}: pick {} (round {}, slot {}) is outside the board",
                detail.year, pick.pick_no, pick.round, pick.pick_in_round
            );
            dropped_picks += 1;
            continue;
        }
        if let Some(existing) = grid.get(&(pick.round, pick.pick_in_round)) {
            warn!(
                "Draft {}: round {} slot {} has picks {} and {}; keeping the first",
                detail.year, pick.round, pick.pick_in_round, existing.pick_no, pick.pick_no
            );
            dropped_picks += 1;
            continue;
        }
        grid.insert((pick.round, pick.pick_in_round), pick);
    }

    let rounds = (1..=detail.rounds)
        .map(|round| BoardRound {
            round,
            cells: slot_numbers
                .iter()
                .map(|&slot| match grid.get(&(round, slot)) {
                    Some(&pick) => BoardCell::Pick {
                        pick,
                        traded: is_traded(pick, &detail.draft_order),
                    },
                    None => BoardCell::Empty { slot },
                })
                .collect(),
        })
        .collect();

    DraftBoard {
        year: detail.year,
        slots,
        rounds,
        dropped_picks,
    }
}
