// tests/build_pipeline.rs
//
// End-to-end builds against in-memory sources: aggregation, ranking,
// persistence, cache hits and the all-or-nothing rule.

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::time::{ Duration, Instant };

use chrono::NaiveDate;
use tempfile::TempDir;

use nba_snapshot::builder::SnapshotBuilder;
use nba_snapshot::config::options::{ SeasonWindow, SnapshotOptions };
use nba_snapshot::error::{ BuildError, ProviderError };
use nba_snapshot::model::{ BoxScore, Game, GameResult, SideStats, Team };
use nba_snapshot::progress::Progress;
use nba_snapshot::report;
use nba_snapshot::source::{ BoxScoreSource, GameLogSource };
use nba_snapshot::store::{ Lookup, SnapshotCache };

const W: Option<GameResult> = Some(GameResult::Win);
const L: Option<GameResult> = Some(GameResult::Loss);

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate {
    d(2024, 1, 5)
}

#[derive(Default)]
struct FakeLeague {
    logs: HashMap<u32, Vec<Game>>,
    scores: HashMap<String, BoxScore>,
    failing_game: Option<String>,
    failing_log: Option<u32>,
    log_calls: AtomicUsize,
    score_calls: AtomicUsize,
}

impl FakeLeague {
    fn calls(&self) -> usize {
        self.log_calls.load(Ordering::SeqCst) + self.score_calls.load(Ordering::SeqCst)
    }

    /// One finished game. `ours` lands on the side the matchup says is ours,
    /// the other side gets numbers that would be obviously wrong.
    fn add(&mut self, team_id: u32, abbr: &str, id: &str, day: u32, wl: Option<GameResult>, away: bool, ours: (f64, f64, f64)) {
        let matchup = if away { format!("{abbr} @ OPP") } else { format!("{abbr} vs. OPP") };
        self.logs.entry(team_id).or_default().push(Game {
            game_id: id.to_string(),
            game_date: d(2023, if day > 31 { 11 } else { 10 }, if day > 31 { day - 31 } else { day }),
            result: wl,
            matchup,
            season_id: "22023".to_string(),
            team_abbreviation: abbr.to_string(),
            team_name: format!("Team {abbr}"),
        });
        let mine = SideStats { offensive_rating: ours.0, defensive_rating: ours.1, possessions: ours.2 };
        let theirs = SideStats { offensive_rating: -1.0, defensive_rating: -1.0, possessions: -1.0 };
        let bs = if away { BoxScore { home: theirs, away: mine } } else { BoxScore { home: mine, away: theirs } };
        self.scores.insert(id.to_string(), bs);
    }
}

impl GameLogSource for FakeLeague {
    fn fetch_games(&self, team_id: u32) -> Result<Vec<Game>, ProviderError> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_log == Some(team_id) {
            return Err(ProviderError::Unavailable(format!("game log for {team_id}: HTTP 503")));
        }
        // provider order: newest first
        let mut games = self.logs.get(&team_id).cloned().unwrap_or_default();
        games.reverse();
        Ok(games)
    }
}

impl BoxScoreSource for FakeLeague {
    fn fetch_box_score(&self, game_id: &str) -> Result<BoxScore, ProviderError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_game.as_deref() == Some(game_id) {
            return Err(ProviderError::Unavailable(format!("box score {game_id} timed out")));
        }
        self.scores
            .get(game_id)
            .copied()
            .ok_or_else(|| ProviderError::Unavailable(format!("unknown game {game_id}")))
    }
}

/// A: 3-1, off [110,108,112,110], def [100,102,99,100.2]. B: 2-2.
fn league() -> FakeLeague {
    let mut lg = FakeLeague::default();
    lg.add(1, "AAA", "a1", 24, W, false, (110.0, 100.0, 98.0));
    lg.add(1, "AAA", "a2", 26, W, true, (108.0, 102.0, 97.0));
    lg.add(1, "AAA", "a3", 28, L, false, (112.0, 99.0, 101.0));
    lg.add(1, "AAA", "a4", 30, W, true, (110.0, 100.2, 99.0));

    lg.add(2, "BBB", "b1", 25, L, true, (104.0, 108.0, 96.0));
    lg.add(2, "BBB", "b2", 27, W, false, (111.0, 103.0, 100.0));
    lg.add(2, "BBB", "b3", 29, W, true, (107.0, 105.0, 99.5));
    lg.add(2, "BBB", "b4", 33, L, false, (101.0, 109.0, 98.5));

    // preseason and a game that hasn't finished: neither may reach the box-score source
    lg.logs.entry(1).or_default().push(Game {
        game_id: "pre1".into(),
        game_date: d(2023, 10, 10),
        result: W,
        matchup: "AAA vs. OPP".into(),
        season_id: "12023".into(),
        team_abbreviation: "AAA".into(),
        team_name: "Team AAA".into(),
    });
    lg.logs.entry(1).or_default().push(Game {
        game_id: "live1".into(),
        game_date: d(2024, 1, 5),
        result: None,
        matchup: "AAA @ OPP".into(),
        season_id: "22023".into(),
        team_abbreviation: "AAA".into(),
        team_name: "Team AAA".into(),
    });
    lg
}

fn teams() -> Vec<Team> {
    vec![Team::new(1, "AAA", "Team AAA"), Team::new(2, "BBB", "Team BBB")]
}

fn options(dir: &TempDir) -> SnapshotOptions {
    SnapshotOptions {
        season: Some(SeasonWindow { season_id: "22023".into(), start_date: d(2023, 10, 24) }),
        workers: 2,
        request_pause: Duration::ZERO,
        ..SnapshotOptions::default()
    }
    .with_store_dir(dir.path())
}

#[test]
fn builds_ranks_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());
    let lg = league();

    let snap = SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap();

    let a = snap.get("AAA").unwrap();
    assert_eq!((a.wins, a.losses, a.win_pct, a.win_pct_rank), (3, 1, 75.0, 1));
    assert_eq!(a.offensive_rating_series, vec![110.0, 108.0, 112.0, 110.0]);
    assert_eq!(a.defensive_rating_series, vec![100.0, 102.0, 99.0, 100.2]);
    assert_eq!(a.game_dates, vec![d(2023, 10, 24), d(2023, 10, 26), d(2023, 10, 28), d(2023, 10, 30)]);

    let b = snap.get("BBB").unwrap();
    assert_eq!((b.wins, b.losses, b.win_pct, b.win_pct_rank), (2, 2, 50.0, 2));
    assert_eq!(b.possessions_series, vec![96.0, 100.0, 99.5, 98.5]);

    let rows = report::rows(&snap);
    assert_eq!(rows[0].label, "1-AAA");
    assert_eq!(rows[0].offensive_rating, 110.0);
    assert_eq!(rows[0].defensive_rating, 100.3);
    assert_eq!(rows[0].net_rating, 9.7);

    // preseason and unfinished games never hit the box-score source
    assert_eq!(lg.score_calls.load(Ordering::SeqCst), 8);
    assert!(cache.artifact_path(today()).exists());
}

#[test]
fn second_call_is_served_from_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());

    let first = league();
    let built = SnapshotBuilder::new(&first, &first, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap();
    assert!(first.calls() > 0);

    let second = league();
    let loaded = SnapshotBuilder::new(&second, &second, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap();
    assert_eq!(second.calls(), 0);
    assert_eq!(loaded, built);
}

#[test]
fn rebuild_flag_skips_the_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());

    let lg = league();
    SnapshotBuilder::new(&lg, &lg, &cache, &opts).load_or_build(today(), &teams(), None).unwrap();

    opts.rebuild = true;
    let again = league();
    SnapshotBuilder::new(&again, &again, &cache, &opts).load_or_build(today(), &teams(), None).unwrap();
    assert_eq!(again.log_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_box_score_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());

    let mut lg = league();
    lg.failing_game = Some("b3".into());
    let err = SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap_err();

    match err {
        BuildError::Team { team, .. } => assert_eq!(team, "BBB"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!cache.artifact_path(today()).exists());
    assert!(matches!(cache.load(today()), Lookup::Miss(_)));
}

#[test]
fn failed_rebuild_leaves_earlier_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());

    let lg = league();
    SnapshotBuilder::new(&lg, &lg, &cache, &opts).load_or_build(today(), &teams(), None).unwrap();
    let path = cache.artifact_path(today());
    let before = fs::read(&path).unwrap();

    opts.rebuild = true;
    let mut broken = league();
    broken.failing_game = Some("a2".into());
    assert!(SnapshotBuilder::new(&broken, &broken, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn team_without_games_ranks_last_with_zero_pct() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());
    let lg = league();

    let mut all = teams();
    all.push(Team::new(3, "CCC", "Team CCC"));
    let snap = SnapshotBuilder::new(&lg, &lg, &cache, &opts).load_or_build(today(), &all, None).unwrap();

    let c = snap.get("CCC").unwrap();
    assert_eq!((c.games_played(), c.win_pct, c.win_pct_rank), (0, 0.0, 3));
    assert_eq!(c.team_name, "Team CCC");

    // and it survives the artifact
    match cache.load(today()) {
        Lookup::Hit(back) => assert_eq!(back, snap),
        Lookup::Miss(reason) => panic!("expected hit, got {reason}"),
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, abbreviation: &str) { self.done.push(abbreviation.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn progress_sees_every_team() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());
    let lg = league();

    let mut rec = Recorder::default();
    SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams(), Some(&mut rec))
        .unwrap();

    rec.done.sort();
    assert_eq!(rec.total, 2);
    assert_eq!(rec.done, vec!["AAA", "BBB"]);
    assert!(rec.finished);
}

#[test]
fn failing_game_log_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(&dir);
    let cache = SnapshotCache::new(dir.path());

    let mut lg = league();
    lg.failing_log = Some(1);
    let err = SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap_err();

    match err {
        BuildError::Team { team, .. } => assert_eq!(team, "AAA"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!cache.artifact_path(today()).exists());
}

#[test]
fn unwritable_store_still_returns_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    // store dir is a regular file: lookup misses, save fails
    let blocked = dir.path().join("store");
    fs::write(&blocked, "not a directory").unwrap();
    let opts = options(&dir).with_store_dir(&blocked);
    let cache = SnapshotCache::new(&blocked);
    let lg = league();

    let snap = SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams(), None)
        .unwrap();

    assert_eq!(snap.get("AAA").unwrap().win_pct_rank, 1);
    assert_eq!(snap.len(), 2);
    assert!(!cache.artifact_path(today()).exists());
}

#[test]
fn no_pause_after_the_last_team() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(&dir);
    opts.workers = 1;
    opts.request_pause = Duration::from_secs(3);
    let cache = SnapshotCache::new(dir.path());
    let lg = league();

    let t = Instant::now();
    SnapshotBuilder::new(&lg, &lg, &cache, &opts)
        .load_or_build(today(), &teams()[..1], None)
        .unwrap();
    assert!(t.elapsed() < Duration::from_secs(2), "build took {:?}", t.elapsed());
}
