// Typed player-record rows.
//
// `/player-records` returns a different row shape per view (single game,
// season total, career total). Rows are decoded here once the view is known.

use dynasty_core::model::{PlayerRecordsResponse, RecordView};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameRecord {
    pub rank: u32,
    pub player_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub points: f64,
    pub season: i32,
    pub week: u32,
    #[serde(default)]
    pub is_starter: bool,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonTotal {
    pub rank: u32,
    pub player_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub total_points: f64,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub avg_points: f64,
    pub season: i32,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CareerTotal {
    pub rank: u32,
    pub player_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub total_points: f64,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub avg_points: f64,
    #[serde(default)]
    pub seasons_played: u32,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerRecordRows {
    Game(Vec<GameRecord>),
    Season(Vec<SeasonTotal>),
    Career(Vec<CareerTotal>),
}

impl PlayerRecordRows {
    pub fn len(&self) -> usize {
        match self {
            PlayerRecordRows::Game(rows) => rows.len(),
            PlayerRecordRows::Season(rows) => rows.len(),
            PlayerRecordRows::Career(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rows that do not match the view's shape are skipped with a warning.
fn decode_rows<T: for<'de> Deserialize<'de>>(view: RecordView, records: &[Value]) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| match T::deserialize(raw) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Skipping {} record {}: {}", view.as_str(), i, e);
                None
            }
        })
        .collect()
}

pub fn decode_player_records(response: &PlayerRecordsResponse) -> PlayerRecordRows {
    let records = &response.records;
    match response.view {
        RecordView::Game => PlayerRecordRows::Game(decode_rows(response.view, records)),
        RecordView::Season => PlayerRecordRows::Season(decode_rows(response.view, records)),
        RecordView::Career => PlayerRecordRows::Career(decode_rows(response.view, records)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_rows_decode() {
        let response = PlayerRecordsResponse {
            view: RecordView::Game,
            records: vec![json!({
                "rank": 1, "player_name": "Big Game", "position": "WR", "team": "MIA",
                "points": 52.3, "season": 2023, "week": 7, "match_type": "regular",
                "is_starter": true, "owner_name": "alice", "team_name": null
            })],
            ..Default::default()
        };
        match decode_player_records(&response) {
            PlayerRecordRows::Game(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].week, 7);
                assert!(rows[0].is_starter);
            }
            other => panic!("expected game rows, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_rows_are_skipped() {
        let response = PlayerRecordsResponse {
            view: RecordView::Career,
            records: vec![
                json!({"rank": 1, "player_name": "Iron Man", "total_points": 2100.0,
                       "games_played": 120, "avg_points": 17.5, "seasons_played": 8}),
                // A game-shaped row has no total_points.
                json!({"rank": 2, "player_name": "Wrong Shape", "points": 40.0, "season": 2024, "week": 1}),
            ],
            ..Default::default()
        };
        let rows = decode_player_records(&response);
        assert_eq!(rows.len(), 1);
        match rows {
            PlayerRecordRows::Career(rows) => assert_eq!(rows[0].seasons_played, 8),
            other => panic!("expected career rows, got {other:?}"),
        }
    }

    #[test]
    fn empty_response_yields_empty_rows() {
        let rows = decode_player_records(&PlayerRecordsResponse {
            view: RecordView::Season,
            ..Default::default()
        });
        assert!(rows.is_empty());
        assert!(matches!(rows, PlayerRecordRows::Season(_)));
    }
}
