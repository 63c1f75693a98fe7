// League history: award winners per season and career trophy shelves.

use dynasty_core::model::{LeagueHistoryResponse, OwnerRecord, SeasonHistory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub year: i32,
    pub champion: String,
    /// `"Division: Winner"` entries in API order.
    pub division_winners: Vec<String>,
    pub consolation: String,
}

const NONE_LABEL: &str = "-";

pub fn history_row(season: &SeasonHistory) -> HistoryRow {
    HistoryRow {
        year: season.year,
        champion: season
            .champion
            .as_ref()
            .map(|w| w.label().to_string())
            .unwrap_or_else(|| NONE_LABEL.to_string()),
        division_winners: season
            .division_winners
            .iter()
            .enumerate()
            .map(|(i, dw)| {
                let division = dw
                    .division
                    .clone()
                    .unwrap_or_else(|| format!("Division {}", i + 1));
                format!("{division}: {}", dw.winner.label())
            })
            .collect(),
        consolation: season
            .consolation_winner
            .as_ref()
            .map(|w| w.label().to_string())
            .unwrap_or_else(|| NONE_LABEL.to_string()),
    }
}

/// Seasons newest first.
pub fn history_rows(response: &LeagueHistoryResponse) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = response.seasons.iter().map(history_row).collect();
    rows.sort_by(|a, b| b.year.cmp(&a.year));
    rows
}

/// Owners holding at least one trophy, with their non-zero counts.
pub fn trophy_shelf(owners: &[OwnerRecord]) -> Vec<(&OwnerRecord, Vec<(&'static str, u32)>)> {
    owners
        .iter()
        .map(|owner| (owner, owner.trophies.earned()))
        .filter(|(_, earned)| !earned.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynasty_core::model::OwnersResponse;

    #[test]
    fn rows_are_newest_first_with_placeholders() {
        let response: LeagueHistoryResponse = serde_json::from_str(
            r#"{
                "total_seasons": 2,
                "seasons": [
                    {"year": 2022, "champion": {"username": "bob"}, "division_winners": [],
                     "consolation_winner": null},
                    {"year": 2023, "champion": null,
                     "division_winners": [{"division": "East", "display_name": "Alice"},
                                          {"username": "carol"}]}
                ]
            }"#,
        )
        .unwrap();
        let rows = history_rows(&response);
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].champion, "-");
        assert_eq!(rows[0].division_winners, vec!["East: Alice", "Division 2: carol"]);
        assert_eq!(rows[1].champion, "bob");
        assert_eq!(rows[1].consolation, "-");
    }

    #[test]
    fn trophy_shelf_skips_empty() {
        let owners: OwnersResponse = serde_json::from_str(
            r#"{"owners": [
                {"user_id": "1", "username": "a", "trophies": {"champion": 1, "most_points": 2}},
                {"user_id": "2", "username": "b"}
            ]}"#,
        )
        .unwrap();
        let shelf = trophy_shelf(&owners.owners);
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf[0].1, vec![("League Champion", 1), ("Most Points", 2)]);
    }
}
