// src/runner.rs
use std::error::Error;

use chrono::NaiveDate;

use crate::{
    builder::SnapshotBuilder,
    config::options::SnapshotOptions,
    model::Snapshot,
    progress::Progress,
    source::NbaStats,
    store::SnapshotCache,
    teams,
};

/// Top-level runner used by both front ends: snapshot for `date` from the
/// cache under `options.store_dir`, building it from stats.nba.com on a miss.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    date: NaiveDate,
    options: &SnapshotOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Snapshot, Box<dyn Error + Send + Sync>> {
    let cache = SnapshotCache::new(&options.store_dir);
    let stats = NbaStats::new(options, date)?;
    let teams = teams::all();

    let snapshot = SnapshotBuilder::new(&stats, &stats, &cache, options)
        .load_or_build(date, &teams, progress)?;
    Ok(snapshot)
}
