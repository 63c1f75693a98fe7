// Taxi squad listing.

use std::cmp::Ordering;

use dynasty_core::model::{Position, TaxiPlayer, TaxiSquadsResponse, TaxiTeam};

use crate::sort::locale_cmp;

const AVATAR_THUMB_BASE: &str = "https://sleepercdn.com/avatars/thumbs";

/// Thumbnail URL for an avatar ID, if the owner has one.
pub fn avatar_url(avatar: Option<&str>) -> Option<String> {
    avatar
        .filter(|id| !id.is_empty())
        .map(|id| format!("{AVATAR_THUMB_BASE}/{id}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxiSquad<'a> {
    pub team: &'a TaxiTeam,
    pub avatar_url: Option<String>,
    /// Ordered QB, RB, WR, TE, K, DEF, then unknown positions, then by name.
    pub players: Vec<&'a TaxiPlayer>,
}

impl TaxiSquad<'_> {
    pub fn label(&self) -> &str {
        self.team
            .team_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.team.owner_name)
    }
}

fn position_rank(player: &TaxiPlayer) -> u8 {
    player
        .position
        .as_deref()
        .and_then(Position::from_str_pos)
        .map(|p| p.sort_order())
        .unwrap_or(u8::MAX)
}

pub fn compare_players(a: &TaxiPlayer, b: &TaxiPlayer) -> Ordering {
    position_rank(a)
        .cmp(&position_rank(b))
        .then_with(|| locale_cmp(&a.full_name, &b.full_name))
}

/// Squads in API order. Teams with an empty taxi squad are kept so every
/// owner appears.
pub fn build_taxi_squads(response: &TaxiSquadsResponse) -> Vec<TaxiSquad<'_>> {
    response
        .teams
        .iter()
        .map(|team| {
            let mut players: Vec<&TaxiPlayer> = team.players.iter().collect();
            players.sort_by(|a, b| compare_players(a, b));
            TaxiSquad {
                team,
                avatar_url: avatar_url(team.avatar.as_deref()),
                players,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, position: Option<&str>) -> TaxiPlayer {
        TaxiPlayer {
            player_id: name.to_lowercase(),
            full_name: name.to_string(),
            position: position.map(str::to_string),
            team: None,
        }
    }

    #[test]
    fn players_order_by_position_then_name() {
        let response = TaxiSquadsResponse {
            season: Some(2024),
            teams: vec![TaxiTeam {
                owner_name: "alice".into(),
                team_name: None,
                avatar: Some("abc123".into()),
                players: vec![
                    player("Zed Receiver", Some("WR")),
                    player("Mystery Man", None),
                    player("Kicker Kid", Some("K")),
                    player("Adam Receiver", Some("WR")),
                    player("Quinn Back", Some("QB")),
                    player("Linebacker", Some("LB")),
                ],
            }],
        };
        let squads = build_taxi_squads(&response);
        let names: Vec<&str> = squads[0].players.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Quinn Back", "Adam Receiver", "Zed Receiver", "Kicker Kid", "Linebacker", "Mystery Man"]
        );
        assert_eq!(squads[0].label(), "alice");
        assert_eq!(
            squads[0].avatar_url.as_deref(),
            Some("https://sleepercdn.com/avatars/thumbs/abc123")
        );
    }

    #[test]
    fn missing_avatar_has_no_url() {
        assert_eq!(avatar_url(None), None);
        assert_eq!(avatar_url(Some("")), None);
    }
}
