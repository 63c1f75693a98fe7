// Game category used to scope owner records and the head-to-head matrix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which bucket of games a record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    #[default]
    RegularSeason,
    Playoff,
    Consolation,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 3] = [
        RecordCategory::RegularSeason,
        RecordCategory::Playoff,
        RecordCategory::Consolation,
    ];

    /// Value of the `match_type` query parameter used by matchup endpoints.
    pub fn match_type(&self) -> &'static str {
        match self {
            RecordCategory::RegularSeason => "regular",
            RecordCategory::Playoff => "playoff",
            RecordCategory::Consolation => "consolation",
        }
    }

    /// Key used in owner payloads (`regular_season`, `playoff`, `consolation`).
    pub fn key(&self) -> &'static str {
        match self {
            RecordCategory::RegularSeason => "regular_season",
            RecordCategory::Playoff => "playoff",
            RecordCategory::Consolation => "consolation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordCategory::RegularSeason => "Regular Season",
            RecordCategory::Playoff => "Playoff",
            RecordCategory::Consolation => "Consolation",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordCategory {
    type Err = String;

    /// Accepts both the payload key and the `match_type` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular_season" | "regular" => Ok(RecordCategory::RegularSeason),
            "playoff" | "playoffs" => Ok(RecordCategory::Playoff),
            "consolation" => Ok(RecordCategory::Consolation),
            other => Err(format!(
                "unknown category `{other}` (expected regular_season, playoff or consolation)"
            )),
        }
    }
}
