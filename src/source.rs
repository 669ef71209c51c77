// src/source.rs
//
// Seams between the pipeline and the data provider. The builder only ever
// sees these traits; `NbaStats` is the live implementation, tests plug in
// in-memory fakes.

use chrono::NaiveDate;

use crate::config::options::{ SeasonWindow, SnapshotOptions };
use crate::core::net::StatsHttp;
use crate::error::ProviderError;
use crate::model::{ BoxScore, Game };
use crate::specs;

/// A team's games for the season in question. May include games outside the
/// window (other seasons, preseason, unfinished); the aggregator filters.
pub trait GameLogSource {
    fn fetch_games(&self, team_id: u32) -> Result<Vec<Game>, ProviderError>;
}

/// Advanced box score for one game, both sides.
pub trait BoxScoreSource {
    fn fetch_box_score(&self, game_id: &str) -> Result<BoxScore, ProviderError>;
}

/// stats.nba.com, both endpoints over one HTTP client.
pub struct NbaStats {
    http: StatsHttp,
    season: SeasonWindow,
}

impl NbaStats {
    pub fn new(options: &SnapshotOptions, date: NaiveDate) -> Result<Self, ProviderError> {
        Ok(Self {
            http: StatsHttp::new(options.timeout)?,
            season: options.season_for(date),
        })
    }
}

impl GameLogSource for NbaStats {
    fn fetch_games(&self, team_id: u32) -> Result<Vec<Game>, ProviderError> {
        specs::game_log::fetch(&self.http, team_id, &self.season)
    }
}

impl BoxScoreSource for NbaStats {
    fn fetch_box_score(&self, game_id: &str) -> Result<BoxScore, ProviderError> {
        specs::box_score::fetch(&self.http, game_id)
    }
}
