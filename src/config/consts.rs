// src/config/consts.rs

// Provider
pub const STATS_BASE: &str = "https://stats.nba.com/stats/";
pub const GAME_FINDER_ENDPOINT: &str = "leaguegamefinder";
pub const BOX_SCORE_ENDPOINT: &str = "boxscoreadvancedv3";
pub const LEAGUE_ID: &str = "00";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
pub const REFERER: &str = "https://www.nba.com/";
pub const ORIGIN: &str = "https://www.nba.com";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Season: regular-season ids are "2" + start year; the season opens in October
pub const REGULAR_SEASON_PREFIX: &str = "2";
pub const SEASON_START_MONTH: u32 = 10;
pub const SEASON_START_DAY: u32 = 1;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const ARTIFACT_PREFIX: &str = "nba_adv_stats_";
pub const ARTIFACT_EXT: &str = ".csv";
pub const ARTIFACT_DATE_FMT: &str = "%d-%m-%y";
pub const LOG_FILE: &str = "debug.log";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 600; // stats.nba.com throttles hard
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
