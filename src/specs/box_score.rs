// src/specs/box_score.rs
//! Spec for `boxscoreadvancedv3` (advanced team stats for one game).
//!
//! Only the team-level `statistics` block of each side is read:
//! ```text
//! { "boxScoreAdvanced": {
//!     "homeTeam": { "teamTricode": "BOS", "statistics": { "offensiveRating": 118.2, ... } },
//!     "awayTeam": { ... } } }
//! ```

use serde::Deserialize;

use crate::config::consts::BOX_SCORE_ENDPOINT;
use crate::core::net::StatsHttp;
use crate::error::ProviderError;
use crate::model::{ BoxScore, SideStats };

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    box_score_advanced: Advanced,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Advanced {
    home_team: TeamBlock,
    away_team: TeamBlock,
}

#[derive(Deserialize)]
struct TeamBlock {
    statistics: Statistics,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    offensive_rating: f64,
    defensive_rating: f64,
    possessions: f64,
}

impl From<Statistics> for SideStats {
    fn from(s: Statistics) -> Self {
        SideStats {
            offensive_rating: s.offensive_rating,
            defensive_rating: s.defensive_rating,
            possessions: s.possessions,
        }
    }
}

pub fn fetch(http: &StatsHttp, game_id: &str) -> Result<BoxScore, ProviderError> {
    let query = [
        ("GameID", s!(game_id)),
        ("StartPeriod", s!("0")),
        ("EndPeriod", s!("0")),
        ("StartRange", s!("0")),
        ("EndRange", s!("0")),
        ("RangeType", s!("0")),
    ];
    let body = http.get(BOX_SCORE_ENDPOINT, &query)?;
    parse_doc(&body).map_err(|e| match e {
        ProviderError::Payload { endpoint, detail } => {
            ProviderError::Payload { endpoint, detail: format!("game {game_id}: {detail}") }
        }
        other => other,
    })
}

/// Split out for unit tests.
pub fn parse_doc(body: &str) -> Result<BoxScore, ProviderError> {
    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| ProviderError::payload(BOX_SCORE_ENDPOINT, e.to_string()))?;
    let adv = env.box_score_advanced;
    Ok(BoxScore {
        home: adv.home_team.statistics.into(),
        away: adv.away_team.statistics.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sides() {
        let doc = r#"{
            "meta": {"version": 1},
            "boxScoreAdvanced": {
                "gameId": "0022300061",
                "homeTeamId": 1610612752,
                "awayTeamId": 1610612738,
                "homeTeam": {
                    "teamId": 1610612752, "teamTricode": "NYK",
                    "players": [],
                    "statistics": {"minutes": "240:00", "offensiveRating": 104.4, "defensiveRating": 108.1,
                                   "netRating": -3.7, "possessions": 99, "pace": 98.5}
                },
                "awayTeam": {
                    "teamId": 1610612738, "teamTricode": "BOS",
                    "players": [],
                    "statistics": {"offensiveRating": 108.1, "defensiveRating": 104.4, "possessions": 100}
                }
            }
        }"#;
        let bs = parse_doc(doc).unwrap();
        assert_eq!(bs.home.offensive_rating, 104.4);
        assert_eq!(bs.home.possessions, 99.0);
        assert_eq!(bs.away.offensive_rating, 108.1);
        assert_eq!(bs.away.defensive_rating, 104.4);
    }

    #[test]
    fn missing_statistics_is_an_error() {
        let doc = r#"{"boxScoreAdvanced":{"homeTeam":{"statistics":{}},"awayTeam":{"statistics":{}}}}"#;
        let err = parse_doc(doc).unwrap_err();
        assert!(matches!(err, ProviderError::Payload { endpoint: BOX_SCORE_ENDPOINT, .. }));
    }
}
