// src/codec.rs
//
// TeamSeasonRecord <-> one flat, date-stamped CSV row.
//
// Scalars are plain text. List columns hold a JSON-style sequence
// ("[110.0,108.5]", "[\"2023-10-25\"]") so the per-game series come back as
// typed values. A list cell that doesn't parse decodes to an empty list; the
// cache's consistency check decides what that means for the artifact.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{ de::DeserializeOwned, Serialize };

use crate::model::TeamSeasonRecord;

pub const COLUMNS: [&str; 12] = [
    "snapshot_date",
    "team_abbreviation",
    "team_name",
    "game_dates",
    "wins",
    "losses",
    "games_played",
    "win_pct",
    "win_pct_rank",
    "offensive_rating",
    "defensive_rating",
    "possessions",
];

const ROW_DATE_FMT: &str = "%Y-%m-%d";

pub fn headers() -> Vec<String> {
    COLUMNS.iter().map(|c| s!(*c)).collect()
}

/// Header name → position in a stored row. Reading goes by name so a
/// reordered artifact still decodes.
pub struct Columns {
    ix: HashMap<&'static str, usize>,
}

impl Columns {
    pub fn from_headers(headers: &[String]) -> Result<Self, String> {
        let mut ix = HashMap::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let pos = headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| format!("missing column {name}"))?;
            ix.insert(name, pos);
        }
        Ok(Self { ix })
    }

    fn get<'r>(&self, row: &'r [String], name: &'static str) -> Result<&'r str, String> {
        let pos = self.ix.get(name).copied().ok_or_else(|| format!("unknown column {name}"))?;
        row.get(pos)
            .map(|s| s.as_str())
            .ok_or_else(|| format!("row too short for {name}"))
    }
}

pub fn encode(date: NaiveDate, rec: &TeamSeasonRecord) -> Vec<String> {
    vec![
        date.format(ROW_DATE_FMT).to_string(),
        rec.team_abbreviation.clone(),
        rec.team_name.clone(),
        encode_list(&rec.game_dates),
        rec.wins.to_string(),
        rec.losses.to_string(),
        rec.games_played().to_string(),
        rec.win_pct.to_string(),
        rec.win_pct_rank.to_string(),
        encode_list(&rec.offensive_rating_series),
        encode_list(&rec.defensive_rating_series),
        encode_list(&rec.possessions_series),
    ]
}

/// Decode one row into its stamp date and record. Scalar trouble fails the
/// row; list trouble only empties that list.
pub fn decode(cols: &Columns, row: &[String]) -> Result<(NaiveDate, TeamSeasonRecord), String> {
    let date_txt = cols.get(row, "snapshot_date")?;
    let date = NaiveDate::parse_from_str(date_txt.trim(), ROW_DATE_FMT)
        .map_err(|e| format!("snapshot_date {date_txt:?}: {e}"))?;

    let abbr = cols.get(row, "team_abbreviation")?.trim();
    if abbr.is_empty() {
        return Err(s!("empty team_abbreviation"));
    }

    let rec = TeamSeasonRecord {
        team_abbreviation: s!(abbr),
        team_name: s!(cols.get(row, "team_name")?),
        game_dates: decode_list(cols.get(row, "game_dates")?, "game_dates"),
        wins: parse_scalar(cols.get(row, "wins")?, "wins")?,
        losses: parse_scalar(cols.get(row, "losses")?, "losses")?,
        offensive_rating_series: decode_list(cols.get(row, "offensive_rating")?, "offensive_rating"),
        defensive_rating_series: decode_list(cols.get(row, "defensive_rating")?, "defensive_rating"),
        possessions_series: decode_list(cols.get(row, "possessions")?, "possessions"),
        win_pct: parse_scalar(cols.get(row, "win_pct")?, "win_pct")?,
        win_pct_rank: parse_scalar(cols.get(row, "win_pct_rank")?, "win_pct_rank")?,
    };

    let gp: u32 = parse_scalar(cols.get(row, "games_played")?, "games_played")?;
    if gp != rec.games_played() {
        return Err(format!("{abbr}: games_played {gp} != {} + {}", rec.wins, rec.losses));
    }
    Ok((date, rec))
}

fn parse_scalar<T: std::str::FromStr>(s: &str, name: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    s.trim().parse::<T>().map_err(|e| format!("{name} {s:?}: {e}"))
}

fn encode_list<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| s!("[]"))
}

fn decode_list<T: DeserializeOwned>(cell: &str, name: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(cell) {
        Ok(v) => v,
        Err(e) => {
            logd!("Codec: {} not a sequence ({}), decoding as empty", name, e);
            Vec::new()
        }
    }
}
