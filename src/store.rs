// src/store.rs
//
// Date-keyed snapshot cache: one CSV artifact per local calendar day under
// the store dir. Nothing is ever evicted.

use std::{ collections::HashSet, fs, io, path::{ Path, PathBuf } };

use chrono::NaiveDate;

use crate::codec::{ self, Columns };
use crate::config::consts::{ ARTIFACT_DATE_FMT, ARTIFACT_EXT, ARTIFACT_PREFIX };
use crate::error::{ MissReason, StoreError };
use crate::model::Snapshot;

/// Outcome of a cache lookup. A miss is not an error; it means "recompute".
#[derive(Debug)]
pub enum Lookup {
    Hit(Snapshot),
    Miss(MissReason),
}

pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// `<dir>/nba_adv_stats_DD-MM-YY.csv`
    pub fn artifact_path(&self, date: NaiveDate) -> PathBuf {
        let stamp = date.format(ARTIFACT_DATE_FMT).to_string();
        self.dir.join(join!(ARTIFACT_PREFIX, &stamp, ARTIFACT_EXT))
    }

    /// Hit only if the artifact exists, decodes, and is structurally sound.
    pub fn load(&self, date: NaiveDate) -> Lookup {
        let path = self.artifact_path(date);
        let lookup = match fs::read(&path) {
            Ok(bytes) => Self::decode_artifact(&bytes, date),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Lookup::Miss(MissReason::NotFound),
            Err(e) => Lookup::Miss(MissReason::Unreadable(e.to_string())),
        };
        match &lookup {
            Lookup::Hit(snap) => logf!("Cache: Loaded {} (teams={})", path.display(), snap.len()),
            Lookup::Miss(reason) => logd!("Cache: Miss {} ({})", path.display(), reason),
        }
        lookup
    }

    fn decode_artifact(bytes: &[u8], date: NaiveDate) -> Lookup {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);

        let headers: Vec<String> = match rdr.headers() {
            Ok(h) => h.iter().map(String::from).collect(),
            Err(e) => return Lookup::Miss(MissReason::Unreadable(e.to_string())),
        };
        let cols = match Columns::from_headers(&headers) {
            Ok(c) => c,
            Err(e) => return Lookup::Miss(MissReason::Malformed(e)),
        };

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        for (line, row) in rdr.records().enumerate() {
            let row: Vec<String> = match row {
                Ok(r) => r.iter().map(String::from).collect(),
                Err(e) => return Lookup::Miss(MissReason::Unreadable(e.to_string())),
            };
            let (stamp, rec) = match codec::decode(&cols, &row) {
                Ok(v) => v,
                Err(e) => return Lookup::Miss(MissReason::Malformed(format!("row {}: {e}", line + 1))),
            };
            if stamp != date {
                return Lookup::Miss(MissReason::Malformed(format!("row {} stamped {stamp}", line + 1)));
            }
            if let Err(detail) = rec.check_consistency() {
                return Lookup::Miss(MissReason::Inconsistent { team: rec.team_abbreviation, detail });
            }
            if !seen.insert(rec.team_abbreviation.clone()) {
                return Lookup::Miss(MissReason::Inconsistent {
                    team: rec.team_abbreviation,
                    detail: s!("duplicate row"),
                });
            }
            records.push(rec);
        }

        if records.is_empty() {
            return Lookup::Miss(MissReason::Malformed(s!("no rows")));
        }
        Lookup::Hit(Snapshot { date, records })
    }

    /// Write (or overwrite) the artifact for `snapshot.date`. Goes through a
    /// temp file + rename so a half-written file never sits under the date's name.
    pub fn store(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.artifact_path(snapshot.date);
        let tmp = path.with_extension("csv.tmp");

        let written = Self::write_artifact(&tmp, snapshot).and_then(|()| fs::rename(&tmp, &path).map_err(StoreError::from));
        if let Err(e) = written {
            // don't leave a stray .tmp next to the day's artifact
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        logf!("Cache: Saved {} (teams={})", path.display(), snapshot.len());
        Ok(path)
    }

    fn write_artifact(tmp: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut wtr = csv::Writer::from_path(tmp)?;
        wtr.write_record(codec::headers())?;
        for rec in &snapshot.records {
            wtr.write_record(codec::encode(snapshot.date, rec))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
