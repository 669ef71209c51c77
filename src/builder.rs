// src/builder.rs
//
// Snapshot orchestration: cache lookup, parallel per-team aggregation,
// ranking, persistence. The only place that decides hit vs. recompute.

use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicBool, AtomicUsize, Ordering } },
};

use chrono::NaiveDate;

use crate::{
    aggregate::{ season_games, TeamSeasonAggregator },
    config::{ consts::JITTER_MS, options::{ SeasonWindow, SnapshotOptions } },
    error::{ BuildError, ProviderError },
    model::{ Snapshot, Team, TeamSeasonRecord },
    progress::Progress,
    rank,
    source::{ BoxScoreSource, GameLogSource },
    store::{ Lookup, SnapshotCache },
};

pub struct SnapshotBuilder<'a, G: ?Sized, B: ?Sized> {
    games: &'a G,
    box_scores: &'a B,
    cache: &'a SnapshotCache,
    options: &'a SnapshotOptions,
}

impl<'a, G, B> SnapshotBuilder<'a, G, B>
where
    G: GameLogSource + Sync + ?Sized,
    B: BoxScoreSource + Sync + ?Sized,
{
    pub fn new(games: &'a G, box_scores: &'a B, cache: &'a SnapshotCache, options: &'a SnapshotOptions) -> Self {
        Self { games, box_scores, cache, options }
    }

    /// Today's snapshot from cache if there is a valid one, else a fresh build.
    /// Only a `Miss` leads to a build; `options.rebuild` skips the lookup.
    pub fn load_or_build(
        &self,
        date: NaiveDate,
        teams: &[Team],
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Snapshot, BuildError> {
        if !self.options.rebuild {
            match self.cache.load(date) {
                Lookup::Hit(snapshot) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("Loaded snapshot for {date}"));
                        p.finish();
                    }
                    return Ok(snapshot);
                }
                Lookup::Miss(reason) => {
                    logf!("Build: No usable snapshot for {} ({}), rebuilding", date, reason);
                }
            }
        } else {
            logf!("Build: Rebuild requested for {}", date);
        }
        self.build(date, teams, progress)
    }

    /// Aggregate every team, rank, persist. All-or-nothing: if any team fails
    /// nothing is written and the error is returned.
    pub fn build(
        &self,
        date: NaiveDate,
        teams: &[Team],
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Snapshot, BuildError> {
        let window = self.options.season_for(date);
        logf!(
            "Build: Begin date={} season={} from={} teams={}",
            date, window.season_id, window.start_date, teams.len()
        );

        if let Some(p) = progress.as_deref_mut() {
            p.begin(teams.len());
        }
        let collected = self.aggregate_all(
            &window,
            teams,
            progress.as_mut().map(|p| &mut **p as &mut dyn Progress),
        );
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }

        let mut records = collected?;
        rank::assign(&mut records);
        let snapshot = Snapshot { date, records };

        // A built snapshot is still good even if the disk isn't; the next
        // start just rebuilds.
        if let Err(e) = self.cache.store(&snapshot) {
            loge!("Cache: Save failed for {}: {}", date, e);
        }
        Ok(snapshot)
    }

    fn aggregate_one(&self, team: &Team, window: &SeasonWindow) -> Result<TeamSeasonRecord, ProviderError> {
        let log = self.games.fetch_games(team.id)?;
        let games = season_games(log, window);
        TeamSeasonAggregator::new(self.box_scores).aggregate(team, &games)
    }

    /// Bounded worker pool over teams. Workers claim the next team index,
    /// aggregate it and report back; the first failure stops new claims.
    /// Records come back in `teams` order.
    fn aggregate_all(
        &self,
        window: &SeasonWindow,
        teams: &[Team],
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Vec<TeamSeasonRecord>, BuildError> {
        let total = teams.len();
        let workers = self.options.workers.min(total).max(1);
        let next = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let (res_tx, res_rx) = mpsc::channel::<(usize, Result<TeamSeasonRecord, ProviderError>)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = res_tx.clone();
                let (next, abort) = (&next, &abort);
                scope.spawn(move || {
                    loop {
                        if abort.load(Ordering::Relaxed) {
                            break;
                        }
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= total {
                            break;
                        }
                        let team = &teams[i];
                        let result = self.aggregate_one(team, window);
                        let failed = result.is_err();
                        if tx.send((i, result)).is_err() || failed {
                            break;
                        }
                        if next.load(Ordering::Relaxed) < total {
                            self.pause(team.id); // be polite
                        }
                    }
                });
            }
            drop(res_tx); // this thread is sole receiver now

            let mut slots: Vec<Option<TeamSeasonRecord>> = (0..total).map(|_| None).collect();
            let mut first_err: Option<BuildError> = None;

            for (i, result) in res_rx.iter() {
                let abbr = teams[i].abbreviation.as_str();
                match result {
                    Ok(rec) => {
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_done(abbr);
                        }
                        slots[i] = Some(rec);
                    }
                    Err(e) => {
                        loge!("Build: Team {}: {}", abbr, e);
                        abort.store(true, Ordering::Relaxed);
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_failed(abbr);
                        }
                        if first_err.is_none() {
                            first_err = Some(BuildError::Team { team: s!(abbr), source: e });
                        }
                    }
                }
            }

            if let Some(e) = first_err {
                return Err(e);
            }
            let received = slots.iter().filter(|s| s.is_some()).count();
            if received != total {
                return Err(BuildError::Incomplete { received, expected: total });
            }
            Ok(slots.into_iter().flatten().collect())
        })
    }

    fn pause(&self, team_id: u32) {
        let base = self.options.request_pause;
        if base.is_zero() {
            return;
        }
        let jitter = (team_id as u64) % JITTER_MS;
        thread::sleep(base + Duration::from_millis(jitter));
    }
}
