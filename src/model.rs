// src/model.rs
//
// Canonical data shapes shared by the sources, the aggregator, the cache and
// the report.

use chrono::NaiveDate;

/// One franchise as enumerated by the team directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub id: u32,
    pub abbreviation: String,
    pub name: String,
}

impl Team {
    pub fn new(id: u32, abbreviation: &str, name: &str) -> Self {
        Self { id, abbreviation: s!(abbreviation), name: s!(name) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    /// "W" / "L"; anything else (blank for an unfinished game) is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "W" | "w" => Some(GameResult::Win),
            "L" | "l" => Some(GameResult::Loss),
            _ => None,
        }
    }
}

/// One row of a team's game log.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub result: Option<GameResult>,
    /// "BOS vs. MIA" at home, "BOS @ MIA" away.
    pub matchup: String,
    pub season_id: String,
    pub team_abbreviation: String,
    pub team_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Advanced team statistics for one side of one game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideStats {
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub possessions: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxScore {
    pub home: SideStats,
    pub away: SideStats,
}

impl BoxScore {
    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Season-to-date aggregate for one team. The four per-game sequences are
/// index-aligned and chronological.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamSeasonRecord {
    pub team_abbreviation: String,
    pub team_name: String,
    pub game_dates: Vec<NaiveDate>,
    pub wins: u32,
    pub losses: u32,
    pub offensive_rating_series: Vec<f64>,
    pub defensive_rating_series: Vec<f64>,
    pub possessions_series: Vec<f64>,
    pub win_pct: f64,
    pub win_pct_rank: u32,
}

impl TeamSeasonRecord {
    pub fn empty(abbreviation: &str, name: &str) -> Self {
        Self {
            team_abbreviation: s!(abbreviation),
            team_name: s!(name),
            game_dates: Vec::new(),
            wins: 0,
            losses: 0,
            offensive_rating_series: Vec::new(),
            defensive_rating_series: Vec::new(),
            possessions_series: Vec::new(),
            win_pct: 0.0,
            win_pct_rank: 0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Structural check used before trusting a decoded record.
    pub fn check_consistency(&self) -> Result<(), String> {
        let n = self.game_dates.len();
        let lens = [
            ("offensive_rating", self.offensive_rating_series.len()),
            ("defensive_rating", self.defensive_rating_series.len()),
            ("possessions", self.possessions_series.len()),
        ];
        for (name, len) in lens {
            if len != n {
                return Err(format!("{name} has {len} entries, game_dates has {n}"));
            }
        }
        if self.games_played() as usize != n {
            return Err(format!("{}-{} record over {} games", self.wins, self.losses, n));
        }
        if self.win_pct_rank == 0 {
            return Err(s!("missing win_pct_rank"));
        }
        Ok(())
    }
}

/// `wins / games_played * 100`; zero when no games have been played.
pub fn win_pct(wins: u32, losses: u32) -> f64 {
    let gp = wins + losses;
    if gp == 0 { 0.0 } else { wins as f64 / gp as f64 * 100.0 }
}

/// Every team's record for one calendar date.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub records: Vec<TeamSeasonRecord>,
}

impl Snapshot {
    pub fn get(&self, abbreviation: &str) -> Option<&TeamSeasonRecord> {
        self.records.iter().find(|r| r.team_abbreviation == abbreviation)
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
