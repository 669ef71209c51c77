// src/specs/game_log.rs
//! Spec for `leaguegamefinder` (one team's game log).
//!
//! Payload shape:
//! ```text
//! { "resultSets": [ { "name": "LeagueGameFinderResults",
//!                     "headers": ["SEASON_ID", "TEAM_ID", ...],
//!                     "rowSet": [[ "22023", 1610612738, ... ], ...] } ] }
//! ```
//! Rows come most-recent first and may include preseason and other seasons;
//! filtering is the caller's business.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::config::consts::{ GAME_FINDER_ENDPOINT, LEAGUE_ID };
use crate::config::options::SeasonWindow;
use crate::core::net::StatsHttp;
use crate::error::ProviderError;
use crate::model::{ Game, GameResult };

const RESULT_SET: &str = "LeagueGameFinderResults";

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

pub fn fetch(http: &StatsHttp, team_id: u32, season: &SeasonWindow) -> Result<Vec<Game>, ProviderError> {
    let mut query = vec![
        ("PlayerOrTeam", s!("T")),
        ("TeamID", team_id.to_string()),
        ("LeagueID", s!(LEAGUE_ID)),
    ];
    if let Some(label) = season.label() {
        query.push(("Season", label));
    }
    let body = http.get(GAME_FINDER_ENDPOINT, &query)?;
    parse_doc(&body)
}

/// Split out for unit tests.
pub fn parse_doc(body: &str) -> Result<Vec<Game>, ProviderError> {
    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| ProviderError::payload(GAME_FINDER_ENDPOINT, e.to_string()))?;

    let set = env.result_sets.iter()
        .find(|s| s.name == RESULT_SET)
        .or_else(|| env.result_sets.first())
        .ok_or_else(|| ProviderError::payload(GAME_FINDER_ENDPOINT, "no result sets"))?;

    let col = |name: &str| -> Result<usize, ProviderError> {
        set.headers.iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProviderError::payload(GAME_FINDER_ENDPOINT, format!("missing column {name}")))
    };
    let c_season = col("SEASON_ID")?;
    let c_abbr = col("TEAM_ABBREVIATION")?;
    let c_name = col("TEAM_NAME")?;
    let c_game = col("GAME_ID")?;
    let c_date = col("GAME_DATE")?;
    let c_matchup = col("MATCHUP")?;
    let c_wl = col("WL")?;

    let mut games = Vec::with_capacity(set.row_set.len());
    for row in &set.row_set {
        let cell = |ix: usize| row.get(ix).map(cell_text).unwrap_or_default();

        let date_txt = cell(c_date);
        let game_date = parse_game_date(&date_txt).ok_or_else(|| {
            ProviderError::payload(GAME_FINDER_ENDPOINT, format!("bad GAME_DATE {date_txt:?}"))
        })?;
        let game_id = cell(c_game);
        if game_id.is_empty() {
            return Err(ProviderError::payload(GAME_FINDER_ENDPOINT, "row without GAME_ID"));
        }

        games.push(Game {
            game_id,
            game_date,
            result: GameResult::parse(&cell(c_wl)),
            matchup: cell(c_matchup),
            season_id: cell(c_season),
            team_abbreviation: cell(c_abbr),
            team_name: cell(c_name),
        });
    }
    Ok(games)
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Null => s!(),
        other => other.to_string(),
    }
}

/// "2023-10-25", tolerating a trailing time part ("2023-10-25T00:00:00").
fn parse_game_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "resource": "leaguegamefinderparameters",
        "resultSets": [{
            "name": "LeagueGameFinderResults",
            "headers": ["SEASON_ID","TEAM_ID","TEAM_ABBREVIATION","TEAM_NAME","GAME_ID","GAME_DATE","MATCHUP","WL","MIN","PTS"],
            "rowSet": [
                ["22023",1610612738,"BOS","Boston Celtics","0022300075","2023-10-27","BOS vs. MIA","W",240,119],
                ["22023",1610612738,"BOS","Boston Celtics","0022300061","2023-10-25","BOS @ NYK","L",240,104],
                ["12023",1610612738,"BOS","Boston Celtics","0012300070","2023-10-17","BOS vs. CHA",null,240,111]
            ]
        }]
    }"#;

    #[test]
    fn parses_rows_by_header_name() {
        let games = parse_doc(SAMPLE).unwrap();
        assert_eq!(games.len(), 3);

        let g = &games[1];
        assert_eq!(g.game_id, "0022300061");
        assert_eq!(g.game_date, NaiveDate::from_ymd_opt(2023, 10, 25).unwrap());
        assert_eq!(g.result, Some(GameResult::Loss));
        assert_eq!(g.matchup, "BOS @ NYK");
        assert_eq!(g.season_id, "22023");
        assert_eq!(g.team_abbreviation, "BOS");
        assert_eq!(g.team_name, "Boston Celtics");

        assert_eq!(games[2].result, None); // null WL
    }

    #[test]
    fn column_order_does_not_matter() {
        let doc = r#"{"resultSets":[{"headers":["WL","MATCHUP","GAME_DATE","GAME_ID","TEAM_NAME","TEAM_ABBREVIATION","SEASON_ID"],
            "rowSet":[["W","LAL @ DEN","2023-10-24T00:00:00","0022300061","Los Angeles Lakers","LAL","22023"]]}]}"#;
        let games = parse_doc(doc).unwrap();
        assert_eq!(games[0].team_abbreviation, "LAL");
        assert_eq!(games[0].result, Some(GameResult::Win));
        assert_eq!(games[0].game_date, NaiveDate::from_ymd_opt(2023, 10, 24).unwrap());
    }

    #[test]
    fn missing_column_is_an_error() {
        let doc = r#"{"resultSets":[{"headers":["SEASON_ID","GAME_ID"],"rowSet":[]}]}"#;
        let err = parse_doc(doc).unwrap_err();
        assert!(err.to_string().contains("TEAM_ABBREVIATION"), "{err}");
    }

    #[test]
    fn bad_date_is_an_error() {
        let doc = r#"{"resultSets":[{"headers":["SEASON_ID","TEAM_ABBREVIATION","TEAM_NAME","GAME_ID","GAME_DATE","MATCHUP","WL"],
            "rowSet":[["22023","BOS","Boston Celtics","0022300061","OCT 25","BOS @ NYK","L"]]}]}"#;
        assert!(parse_doc(doc).is_err());
    }

    #[test]
    fn not_json_is_an_error() {
        assert!(matches!(parse_doc("<html>"), Err(ProviderError::Payload { .. })));
    }
}
