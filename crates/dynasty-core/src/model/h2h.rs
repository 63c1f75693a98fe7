// Head-to-head matrix payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, EmptyResult};

/// Win/loss/tie tally for one directional pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
}

impl H2HRecord {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// `wins / games`, or 0.0 when no games were played.
    pub fn win_pct(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => f64::from(self.wins) / f64::from(games),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games() == 0
    }
}

impl std::fmt::Display for H2HRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Owner identity listed in the matrix response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HOwner {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl H2HOwner {
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.user_id)
    }
}

/// Response of `GET /matchups/head-to-head-matrix`.
///
/// `matrix[row][col]` is the row owner's record against the column owner.
/// Cells are stored independently in each direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct H2HMatrixResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<H2HOwner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matrix: HashMap<String, HashMap<String, H2HRecord>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub median_records: HashMap<String, H2HRecord>,
}

impl EmptyResult for H2HMatrixResponse {
    fn is_empty_result(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_pct_zero_without_games() {
        assert_eq!(H2HRecord::default().win_pct(), 0.0);
        assert_eq!(H2HRecord::new(7, 6, 1).win_pct(), 0.5);
    }

    #[test]
    fn display_is_dash_separated() {
        assert_eq!(H2HRecord::new(2, 1, 0).to_string(), "2-1-0");
    }

    #[test]
    fn deserializes_matrix_response() {
        let json = r#"{
            "owners": [{"user_id": "u1", "display_name": "Alice"}, {"user_id": "u2", "username": "bob"}],
            "matrix": {"u1": {"u2": {"wins": 2, "losses": 0, "ties": 0}}},
            "median_records": {"u1": {"wins": 1, "losses": 0, "ties": 0}}
        }"#;
        let resp: H2HMatrixResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.owners[1].label(), "bob");
        assert_eq!(resp.matrix["u1"]["u2"].wins, 2);
        assert!(!resp.matrix.contains_key("u2"));
    }
}
