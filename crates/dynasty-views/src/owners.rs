// Owner career table ranking and the per-season breakdown.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dynasty_core::model::{
    CategoryRecord, H2HRecord, OwnerDetail, OwnerRecord, RecordCategory, SeasonRecord,
};

use crate::sort::{cmp_f64, locale_cmp, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OwnerSortField {
    Name,
    Seasons,
    #[default]
    Wins,
    Losses,
    Ties,
    WinPct,
    PointsFor,
    PointsAgainst,
}

impl OwnerSortField {
    pub const ALL: [OwnerSortField; 8] = [
        OwnerSortField::Name,
        OwnerSortField::Seasons,
        OwnerSortField::Wins,
        OwnerSortField::Losses,
        OwnerSortField::Ties,
        OwnerSortField::WinPct,
        OwnerSortField::PointsFor,
        OwnerSortField::PointsAgainst,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            OwnerSortField::Name => "name",
            OwnerSortField::Seasons => "seasons",
            OwnerSortField::Wins => "wins",
            OwnerSortField::Losses => "losses",
            OwnerSortField::Ties => "ties",
            OwnerSortField::WinPct => "win_pct",
            OwnerSortField::PointsFor => "pf",
            OwnerSortField::PointsAgainst => "pa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnerSortField::Name => "Owner",
            OwnerSortField::Seasons => "Seasons",
            OwnerSortField::Wins => "W",
            OwnerSortField::Losses => "L",
            OwnerSortField::Ties => "T",
            OwnerSortField::WinPct => "Win%",
            OwnerSortField::PointsFor => "PF",
            OwnerSortField::PointsAgainst => "PA",
        }
    }
}

impl fmt::Display for OwnerSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OwnerSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        OwnerSortField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .or(match s.as_str() {
                "points_for" => Some(OwnerSortField::PointsFor),
                "points_against" => Some(OwnerSortField::PointsAgainst),
                _ => None,
            })
            .ok_or_else(|| {
                format!("unknown owner column `{s}` (expected name, seasons, wins, losses, ties, win_pct, pf or pa)")
            })
    }
}

/// Ascending comparison of two owners on `field`, reading numeric fields
/// from the `category` bucket.
pub fn compare_owners(
    a: &OwnerRecord,
    b: &OwnerRecord,
    category: RecordCategory,
    field: OwnerSortField,
) -> Ordering {
    let (ra, rb) = (a.record(category), b.record(category));
    match field {
        OwnerSortField::Name => locale_cmp(a.name(), b.name()),
        OwnerSortField::Seasons => a.seasons_played.cmp(&b.seasons_played),
        OwnerSortField::Wins => ra.wins.cmp(&rb.wins),
        OwnerSortField::Losses => ra.losses.cmp(&rb.losses),
        OwnerSortField::Ties => ra.ties.cmp(&rb.ties),
        OwnerSortField::WinPct => cmp_f64(ra.win_percentage, rb.win_percentage),
        OwnerSortField::PointsFor => cmp_f64(ra.points_for, rb.points_for),
        OwnerSortField::PointsAgainst => cmp_f64(ra.points_against, rb.points_against),
    }
}

/// Owners in table order. The records themselves are untouched; only the
/// order of references changes, and equal keys keep input order.
pub fn rank_owners<'a>(
    owners: &'a [OwnerRecord],
    category: RecordCategory,
    sort: &SortState<OwnerSortField>,
) -> Vec<&'a OwnerRecord> {
    let mut ranked: Vec<&OwnerRecord> = owners.iter().collect();
    ranked.sort_by(|a, b| sort.direction.apply(compare_owners(a, b, category, sort.field)));
    ranked
}

// ---------------------------------------------------------------------------
// Season breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow<'a> {
    pub year: i32,
    pub team_name: Option<&'a str>,
    pub division: String,
    pub record: &'a CategoryRecord,
    /// Only populated for the regular season.
    pub vs_median: Option<H2HRecord>,
}

fn division_label(season: &SeasonRecord) -> String {
    match (&season.division_name, season.division) {
        (Some(name), _) if !name.is_empty() => name.clone(),
        (_, Some(n)) => format!("Division {n}"),
        _ => String::new(),
    }
}

/// Whether the breakdown shows a vs-median column for `category`.
pub fn shows_vs_median(category: RecordCategory) -> bool {
    category == RecordCategory::RegularSeason
}

/// One owner's seasons in API order, scoped to `category`.
pub fn season_breakdown(detail: &OwnerDetail, category: RecordCategory) -> Vec<SeasonRow<'_>> {
    detail
        .seasons
        .iter()
        .map(|season| SeasonRow {
            year: season.year,
            team_name: season.team_name.as_deref(),
            division: division_label(season),
            record: season.record(category),
            vs_median: shows_vs_median(category).then(|| season.median_record()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    fn owner(id: &str, name: Option<&str>, wins: u32, pf: f64) -> OwnerRecord {
        OwnerRecord {
            user_id: id.to_string(),
            username: id.to_string(),
            display_name: name.map(str::to_string),
            avatar: None,
            seasons_played: 3,
            trophies: Default::default(),
            regular_season: CategoryRecord {
                wins,
                points_for: pf,
                ..Default::default()
            },
            playoff: CategoryRecord {
                wins: 10 - wins.min(10),
                ..Default::default()
            },
            consolation: CategoryRecord::default(),
        }
    }

    fn ids(ranked: &[&OwnerRecord]) -> Vec<String> {
        ranked.iter().map(|o| o.user_id.clone()).collect()
    }

    #[test]
    fn default_sort_is_wins_desc() {
        let owners = vec![owner("a", None, 5, 0.0), owner("b", None, 9, 0.0), owner("c", None, 7, 0.0)];
        let sort = SortState::new(OwnerSortField::default());
        assert_eq!(ids(&rank_owners(&owners, RecordCategory::RegularSeason, &sort)), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let owners = vec![
            owner("x", None, 8, 0.0),
            owner("tie1", None, 6, 0.0),
            owner("tie2", None, 6, 0.0),
            owner("y", None, 2, 0.0),
        ];
        let mut sort = SortState::new(OwnerSortField::Wins);
        let desc = ids(&rank_owners(&owners, RecordCategory::RegularSeason, &sort));
        assert_eq!(desc, vec!["x", "tie1", "tie2", "y"]);

        sort.select(OwnerSortField::Wins);
        assert_eq!(sort.direction, SortDirection::Asc);
        let asc = ids(&rank_owners(&owners, RecordCategory::RegularSeason, &sort));
        assert_eq!(asc, vec!["y", "tie1", "tie2", "x"]);
    }

    #[test]
    fn category_selects_bucket() {
        let owners = vec![owner("a", None, 9, 0.0), owner("b", None, 3, 0.0)];
        let sort = SortState::new(OwnerSortField::Wins);
        // Playoff wins are 1 and 7.
        assert_eq!(ids(&rank_owners(&owners, RecordCategory::Playoff, &sort)), vec!["b", "a"]);
    }

    #[test]
    fn name_sort_uses_display_name_then_username() {
        let owners = vec![
            owner("zeta", Some("Alpha"), 0, 0.0),
            owner("beta", None, 0, 0.0),
            owner("gamma", Some("charlie"), 0, 0.0),
        ];
        let sort = SortState::with_direction(OwnerSortField::Name, SortDirection::Asc);
        assert_eq!(
            ids(&rank_owners(&owners, RecordCategory::RegularSeason, &sort)),
            vec!["zeta", "beta", "gamma"]
        );
    }

    #[test]
    fn points_sort_is_numeric() {
        let owners = vec![owner("a", None, 0, 1500.25), owner("b", None, 0, 999.5), owner("c", None, 0, 1500.5)];
        let sort = SortState::new(OwnerSortField::PointsFor);
        assert_eq!(ids(&rank_owners(&owners, RecordCategory::RegularSeason, &sort)), vec!["c", "a", "b"]);
    }

    #[test]
    fn ranking_does_not_touch_input() {
        let owners = vec![owner("a", None, 1, 0.0), owner("b", None, 2, 0.0)];
        let before = owners.clone();
        let _ = rank_owners(&owners, RecordCategory::RegularSeason, &SortState::new(OwnerSortField::Wins));
        assert_eq!(owners, before);
    }

    #[test]
    fn parse_field_keys() {
        assert_eq!("win_pct".parse::<OwnerSortField>(), Ok(OwnerSortField::WinPct));
        assert_eq!("PF".parse::<OwnerSortField>(), Ok(OwnerSortField::PointsFor));
        assert_eq!("points_against".parse::<OwnerSortField>(), Ok(OwnerSortField::PointsAgainst));
        assert!("streak".parse::<OwnerSortField>().is_err());
    }

    fn detail() -> OwnerDetail {
        serde_json::from_str(
            r#"{
                "user_id": "u1",
                "username": "alice",
                "seasons": [
                    {"year": 2024, "team_name": "Gridiron", "division": 1, "division_name": "East",
                     "regular_season": {"wins": 9, "losses": 5}, "playoff": {"wins": 2, "losses": 1},
                     "median_wins": 8, "median_losses": 6, "median_ties": 0},
                    {"year": 2023, "division": 2,
                     "regular_season": {"wins": 6, "losses": 8},
                     "median_wins": 5, "median_losses": 9, "median_ties": 0}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn breakdown_shows_median_for_regular_season_only() {
        let d = detail();
        let regular = season_breakdown(&d, RecordCategory::RegularSeason);
        assert_eq!(regular.len(), 2);
        assert_eq!(regular[0].vs_median, Some(H2HRecord::new(8, 6, 0)));
        assert_eq!(regular[0].record.wins, 9);

        let playoff = season_breakdown(&d, RecordCategory::Playoff);
        assert!(playoff.iter().all(|row| row.vs_median.is_none()));
        assert_eq!(playoff[0].record.wins, 2);
        assert_eq!(playoff[1].record.wins, 0);
        assert!(!shows_vs_median(RecordCategory::Consolation));
    }

    #[test]
    fn breakdown_division_label_falls_back_to_number() {
        let d = detail();
        let rows = season_breakdown(&d, RecordCategory::RegularSeason);
        assert_eq!(rows[0].division, "East");
        assert_eq!(rows[1].division, "Division 2");
        assert_eq!(rows[1].team_name, None);
    }
}
