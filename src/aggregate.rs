// src/aggregate.rs
//
// One team's game log + per-game box scores → one season record.

use crate::config::options::SeasonWindow;
use crate::error::ProviderError;
use crate::model::{ Game, GameResult, Side, Team, TeamSeasonRecord };
use crate::source::BoxScoreSource;

/// Which side of the box score belongs to the team whose log this matchup
/// comes from. An `@` directly before the opponent code means away
/// ("BOS @ MIA"); "BOS vs. MIA" or no marker at all means home.
pub fn side_for(matchup: &str) -> Side {
    for (i, ch) in matchup.char_indices() {
        if ch != '@' { continue; }
        let rest = matchup[i + 1..].trim_start();
        if rest.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return Side::Away;
        }
    }
    Side::Home
}

/// Keep finished games inside the season window, oldest first.
/// The provider lists the most recent game first.
pub fn season_games(games: Vec<Game>, window: &SeasonWindow) -> Vec<Game> {
    let mut kept: Vec<Game> = games
        .into_iter()
        .filter(|g| window.contains(&g.season_id, g.game_date))
        .filter(|g| g.result.is_some())
        .collect();
    kept.sort_by(|a, b| a.game_date.cmp(&b.game_date).then_with(|| a.game_id.cmp(&b.game_id)));
    kept
}

pub struct TeamSeasonAggregator<'a, B: BoxScoreSource + ?Sized> {
    box_scores: &'a B,
}

impl<'a, B: BoxScoreSource + ?Sized> TeamSeasonAggregator<'a, B> {
    pub fn new(box_scores: &'a B) -> Self {
        Self { box_scores }
    }

    /// `games` must already be season-filtered and chronological
    /// (see `season_games`). Any box-score failure aborts the whole team:
    /// a half-filled record would skew the means and the ranking.
    /// `win_pct` / `win_pct_rank` are left for the builder.
    pub fn aggregate(&self, team: &Team, games: &[Game]) -> Result<TeamSeasonRecord, ProviderError> {
        let name = games
            .iter()
            .map(|g| g.team_name.as_str())
            .find(|n| !n.is_empty())
            .unwrap_or(team.name.as_str());
        let mut rec = TeamSeasonRecord::empty(&team.abbreviation, name);

        for game in games {
            match game.result {
                Some(GameResult::Win) => rec.wins += 1,
                Some(GameResult::Loss) => rec.losses += 1,
                None => {
                    logd!("Aggregate: {} skipping unfinished game {}", team.abbreviation, game.game_id);
                    continue;
                }
            }

            let bs = self.box_scores.fetch_box_score(&game.game_id)?;
            let side = side_for(&game.matchup);
            let stats = bs.side(side);

            rec.game_dates.push(game.game_date);
            rec.offensive_rating_series.push(stats.offensive_rating);
            rec.defensive_rating_series.push(stats.defensive_rating);
            rec.possessions_series.push(stats.possessions);
        }

        logd!(
            "Aggregate: {} {}-{} over {} games",
            rec.team_abbreviation, rec.wins, rec.losses, rec.game_dates.len()
        );
        Ok(rec)
    }
}
