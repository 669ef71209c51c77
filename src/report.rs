// src/report.rs
//
// Display rows derived from a snapshot: mean ratings rounded to one decimal,
// net rating, "rank-ABR" label, team color. Sorted by win% rank.

use crate::config::colors::{ team_color, TeamColor };
use crate::model::{ Snapshot, TeamSeasonRecord };

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub team_abbreviation: String,
    pub team_name: String,
    pub rank: u32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub net_rating: f64,
    pub color: TeamColor,
}

pub const TABLE_HEADERS: [&str; 8] = ["Team", "rank", "GP", "W", "L", "off_r", "def_r", "net_r"];

pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() { 0.0 } else { xs.iter().sum::<f64>() / xs.len() as f64 }
}

impl ReportRow {
    pub fn from_record(rec: &TeamSeasonRecord) -> Self {
        let offensive_rating = round1(mean(&rec.offensive_rating_series));
        let defensive_rating = round1(mean(&rec.defensive_rating_series));
        Self {
            label: format!("{}-{}", rec.win_pct_rank, rec.team_abbreviation),
            team_abbreviation: rec.team_abbreviation.clone(),
            team_name: rec.team_name.clone(),
            rank: rec.win_pct_rank,
            games_played: rec.games_played(),
            wins: rec.wins,
            losses: rec.losses,
            win_pct: rec.win_pct,
            offensive_rating,
            defensive_rating,
            net_rating: round1(offensive_rating - defensive_rating),
            color: team_color(&rec.team_abbreviation),
        }
    }

    /// Cells in `TABLE_HEADERS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.team_abbreviation.clone(),
            self.rank.to_string(),
            self.games_played.to_string(),
            self.wins.to_string(),
            self.losses.to_string(),
            format!("{:.1}", self.offensive_rating),
            format!("{:.1}", self.defensive_rating),
            format!("{:.1}", self.net_rating),
        ]
    }
}

/// One row per team, best record first. Equal ranks keep snapshot order.
pub fn rows(snapshot: &Snapshot) -> Vec<ReportRow> {
    let mut out: Vec<ReportRow> = snapshot.records.iter().map(ReportRow::from_record).collect();
    out.sort_by_key(|r| r.rank);
    out
}
