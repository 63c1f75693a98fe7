// Owner career and per-season records.

use serde::{Deserialize, Serialize};

use super::{null_as_default, EmptyResult, H2HRecord, RecordCategory};

/// Aggregate record for one category of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
    /// Fraction in `0.0..=1.0`, computed upstream.
    #[serde(default)]
    pub win_percentage: f64,
}

/// Trophy counts across all seasons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophies {
    #[serde(default)]
    pub champion: u32,
    #[serde(default)]
    pub division_winner: u32,
    #[serde(default)]
    pub most_points: u32,
    #[serde(default)]
    pub consolation: u32,
}

impl Trophies {
    /// Non-zero trophy counts in display order.
    pub fn earned(&self) -> Vec<(&'static str, u32)> {
        [
            ("League Champion", self.champion),
            ("Division Winner", self.division_winner),
            ("Most Points", self.most_points),
            ("Consolation Winner", self.consolation),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// One owner's career record as listed by `GET /owners`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub seasons_played: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trophies: Trophies,
    #[serde(default)]
    pub regular_season: CategoryRecord,
    #[serde(default)]
    pub playoff: CategoryRecord,
    #[serde(default)]
    pub consolation: CategoryRecord,
}

impl OwnerRecord {
    /// Display name when set, otherwise the username.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    pub fn record(&self, category: RecordCategory) -> &CategoryRecord {
        match category {
            RecordCategory::RegularSeason => &self.regular_season,
            RecordCategory::Playoff => &self.playoff,
            RecordCategory::Consolation => &self.consolation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnersResponse {
    #[serde(default)]
    pub total_owners: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<OwnerRecord>,
}

impl EmptyResult for OwnersResponse {
    fn is_empty_result(&self) -> bool {
        self.owners.is_empty()
    }
}

/// One season of an owner's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub year: i32,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub division: Option<u32>,
    #[serde(default)]
    pub division_name: Option<String>,
    #[serde(default)]
    pub regular_season: CategoryRecord,
    #[serde(default)]
    pub playoff: CategoryRecord,
    #[serde(default)]
    pub consolation: CategoryRecord,
    #[serde(default)]
    pub median_wins: u32,
    #[serde(default)]
    pub median_losses: u32,
    #[serde(default)]
    pub median_ties: u32,
}

impl SeasonRecord {
    pub fn record(&self, category: RecordCategory) -> &CategoryRecord {
        match category {
            RecordCategory::RegularSeason => &self.regular_season,
            RecordCategory::Playoff => &self.playoff,
            RecordCategory::Consolation => &self.consolation,
        }
    }

    /// Record against the weekly league median.
    pub fn median_record(&self) -> H2HRecord {
        H2HRecord::new(self.median_wins, self.median_losses, self.median_ties)
    }
}

/// Response of `GET /owners/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerDetail {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasons: Vec<SeasonRecord>,
}

impl OwnerDetail {
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

impl EmptyResult for OwnerDetail {
    fn is_empty_result(&self) -> bool {
        self.seasons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_without_category_buckets_defaults_to_zero() {
        let owner: OwnerRecord =
            serde_json::from_str(r#"{"user_id": "u1", "username": "alice", "trophies": null}"#)
                .unwrap();
        assert_eq!(owner.seasons_played, 0);
        assert_eq!(owner.record(RecordCategory::Playoff).wins, 0);
        assert_eq!(owner.trophies, Trophies::default());
        assert_eq!(owner.name(), "alice");
    }

    #[test]
    fn earned_trophies_skip_zero_counts() {
        let trophies = Trophies {
            champion: 2,
            division_winner: 0,
            most_points: 1,
            consolation: 0,
        };
        assert_eq!(
            trophies.earned(),
            vec![("League Champion", 2), ("Most Points", 1)]
        );
    }

    #[test]
    fn season_record_selects_category() {
        let json = r#"{
            "year": 2024,
            "team_name": null,
            "division": 2,
            "division_name": "West",
            "regular_season": {"wins": 9, "losses": 5, "ties": 0, "points_for": 1500.5, "points_against": 1400.0, "win_percentage": 0.643},
            "playoff": {"wins": 1, "losses": 1, "ties": 0, "points_for": 250.0, "points_against": 240.0, "win_percentage": 0.5},
            "median_wins": 8, "median_losses": 6, "median_ties": 0
        }"#;
        let season: SeasonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(season.record(RecordCategory::RegularSeason).wins, 9);
        assert_eq!(season.record(RecordCategory::Playoff).losses, 1);
        assert_eq!(season.record(RecordCategory::Consolation).wins, 0);
        assert_eq!(season.median_record(), H2HRecord::new(8, 6, 0));
    }
}
