// Head-to-head grid and the record-vs-median ranking.

use dynasty_core::model::{H2HMatrixResponse, H2HOwner, H2HRecord};

use crate::sort::cmp_f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H2HCell {
    /// Diagonal: an owner never plays itself.
    NotApplicable,
    Record(H2HRecord),
}

/// Square grid over `owners x owners`; `rows[i][j]` is owner `i` against `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct H2HGrid<'a> {
    pub owners: &'a [H2HOwner],
    pub rows: Vec<Vec<H2HCell>>,
}

impl H2HGrid<'_> {
    /// Sum of a row's off-diagonal records.
    pub fn row_total(&self, row: usize) -> H2HRecord {
        self.rows
            .get(row)
            .into_iter()
            .flatten()
            .fold(H2HRecord::default(), |acc, cell| match cell {
                H2HCell::Record(r) => H2HRecord::new(
                    acc.wins + r.wins,
                    acc.losses + r.losses,
                    acc.ties + r.ties,
                ),
                H2HCell::NotApplicable => acc,
            })
    }
}

/// Record of `row` against `col` exactly as the API supplied it, or 0-0-0
/// when the pair has never met. The reverse cell is never consulted.
pub fn lookup(response: &H2HMatrixResponse, row: &str, col: &str) -> H2HRecord {
    response
        .matrix
        .get(row)
        .and_then(|cols| cols.get(col))
        .copied()
        .unwrap_or_default()
}

pub fn build_h2h_grid(response: &H2HMatrixResponse) -> H2HGrid<'_> {
    let rows = response
        .owners
        .iter()
        .map(|row| {
            response
                .owners
                .iter()
                .map(|col| {
                    if row.user_id == col.user_id {
                        H2HCell::NotApplicable
                    } else {
                        H2HCell::Record(lookup(response, &row.user_id, &col.user_id))
                    }
                })
                .collect()
        })
        .collect();

    H2HGrid {
        owners: &response.owners,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MedianRow<'a> {
    pub owner: &'a H2HOwner,
    pub record: H2HRecord,
    pub win_pct: f64,
}

/// Owners ranked by win percentage against the weekly median, best first.
/// Equal percentages keep `owners` order; a missing record counts as 0-0-0.
pub fn rank_vs_median(response: &H2HMatrixResponse) -> Vec<MedianRow<'_>> {
    let mut rows: Vec<MedianRow> = response
        .owners
        .iter()
        .map(|owner| {
            let record = response
                .median_records
                .get(&owner.user_id)
                .copied()
                .unwrap_or_default();
            MedianRow {
                owner,
                record,
                win_pct: record.win_pct(),
            }
        })
        .collect();

    rows.sort_by(|a, b| cmp_f64(b.win_pct, a.win_pct));
    rows
}
