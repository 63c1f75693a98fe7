// Standings grouped by division.

use dynasty_core::model::{Standing, StandingsResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionGroup<'a> {
    /// `None` for teams without a division.
    pub division: Option<u32>,
    pub label: String,
    pub teams: Vec<&'a Standing>,
}

/// Display name for a division number.
pub fn division_label(response: &StandingsResponse, division: u32) -> String {
    response
        .division_names
        .get(&division.to_string())
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Division {division}"))
}

/// Groups in ascending division order, teams in API order within each.
/// A league without divisions yields a single "League" group.
pub fn group_by_division(response: &StandingsResponse) -> Vec<DivisionGroup<'_>> {
    let mut divisions: Vec<Option<u32>> = response.standings.iter().map(|s| s.division).collect();
    // Teams lacking a division go last.
    divisions.sort_by_key(|d| (d.is_none(), *d));
    divisions.dedup();

    if divisions.iter().all(Option::is_none) {
        if response.standings.is_empty() {
            return Vec::new();
        }
        return vec![DivisionGroup {
            division: None,
            label: "League".to_string(),
            teams: response.standings.iter().collect(),
        }];
    }

    divisions
        .into_iter()
        .map(|division| DivisionGroup {
            division,
            label: match division {
                Some(n) => division_label(response, n),
                None => "No Division".to_string(),
            },
            teams: response
                .standings
                .iter()
                .filter(|s| s.division == division)
                .collect(),
        })
        .collect()
}
