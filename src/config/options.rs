// src/config/options.rs
use std::path::{ Path, PathBuf };
use std::time::Duration;

use chrono::{ Datelike, NaiveDate };

use super::consts::*;

/// Which games count toward the season: matching `season_id` and played on or
/// after `start_date`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeasonWindow {
    pub season_id: String,
    pub start_date: NaiveDate,
}

impl SeasonWindow {
    /// Regular season in progress on `date`. The season is named after the
    /// year it opens in, so January–September belong to the previous year's.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = if date.month() >= SEASON_START_MONTH { date.year() } else { date.year() - 1 };
        let start_date = NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, SEASON_START_DAY)
            .unwrap_or(date);
        Self {
            season_id: format!("{}{}", REGULAR_SEASON_PREFIX, year),
            start_date,
        }
    }

    /// Start year encoded in the season id ("22023" → 2023).
    pub fn start_year(&self) -> Option<i32> {
        self.season_id
            .strip_prefix(REGULAR_SEASON_PREFIX)
            .and_then(|y| y.parse().ok())
    }

    /// Provider-side season label, e.g. "2023-24".
    pub fn label(&self) -> Option<String> {
        let y = self.start_year()?;
        Some(format!("{}-{:02}", y, (y + 1) % 100))
    }

    pub fn contains(&self, season_id: &str, game_date: NaiveDate) -> bool {
        season_id == self.season_id && game_date >= self.start_date
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Directory holding the dated artifacts and the debug log.
    pub store_dir: PathBuf,
    /// Fixed season window; `None` derives it from the snapshot date.
    pub season: Option<SeasonWindow>,
    pub workers: usize,
    /// Pause after each team, per worker.
    pub request_pause: Duration,
    pub timeout: Duration,
    /// Skip the cache lookup and rebuild today's artifact.
    pub rebuild: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(STORE_DIR),
            season: None,
            workers: WORKERS,
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            rebuild: false,
        }
    }
}

impl SnapshotOptions {
    pub fn with_store_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.store_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn season_for(&self, date: NaiveDate) -> SeasonWindow {
        self.season.clone().unwrap_or_else(|| SeasonWindow::for_date(date))
    }
}
