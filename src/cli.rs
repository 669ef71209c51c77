// src/cli.rs
use std::{ error::Error, io, path::PathBuf };

use chrono::{ Local, NaiveDate };
use clap::Parser;
use tabled::{ builder::Builder, settings::Style };

use crate::{
    config::{
        colors::team_color,
        consts::{ REQUEST_PAUSE_MS, REQUEST_TIMEOUT_SECS, STORE_DIR, WORKERS },
        options::SnapshotOptions,
    },
    log,
    progress::Progress,
    report::{ self, ReportRow, TABLE_HEADERS },
    runner, teams,
};

/// Daily NBA offensive/defensive efficiency snapshot.
#[derive(Parser, Debug)]
#[command(name = "cli", version, about)]
pub struct Args {
    /// Snapshot date (YYYY-MM-DD). Defaults to today's local date.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Where dated artifacts and debug.log live.
    #[arg(long, env = "NBA_SNAPSHOT_STORE_DIR", default_value = STORE_DIR)]
    pub store_dir: PathBuf,

    /// Season id to keep, e.g. 22023. Derived from the date when omitted.
    #[arg(long)]
    pub season_id: Option<String>,

    /// First game date to keep (YYYY-MM-DD), e.g. opening night.
    #[arg(long)]
    pub season_start: Option<NaiveDate>,

    #[arg(long, env = "NBA_SNAPSHOT_WORKERS", default_value_t = WORKERS)]
    pub workers: usize,

    /// Pause per team per worker, in milliseconds.
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub pause_ms: u64,

    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Ignore today's cached artifact and fetch everything again.
    #[arg(long)]
    pub rebuild: bool,

    /// Print the standings as CSV instead of a table.
    #[arg(long)]
    pub csv: bool,

    /// List teams (id, abbreviation, name, color) and exit.
    #[arg(long)]
    pub list_teams: bool,
}

impl Args {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn options(&self) -> SnapshotOptions {
        let date = self.date();
        let season = if self.season_id.is_some() || self.season_start.is_some() {
            let mut w = crate::config::options::SeasonWindow::for_date(date);
            if let Some(id) = &self.season_id { w.season_id = id.trim().to_string(); }
            if let Some(start) = self.season_start { w.start_date = start; }
            Some(w)
        } else {
            None
        };

        SnapshotOptions {
            store_dir: self.store_dir.clone(),
            season,
            workers: self.workers.max(1),
            request_pause: std::time::Duration::from_millis(self.pause_ms),
            timeout: std::time::Duration::from_secs(self.timeout_secs),
            rebuild: self.rebuild,
        }
    }
}

/// stderr progress lines; stdout stays clean for the table / CSV.
#[derive(Default)]
pub struct CliProgress {
    done: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {total} teams…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, abbreviation: &str) {
        self.done += 1;
        eprintln!("Fetched {} ({}/{})", abbreviation, self.done, self.total);
    }
    fn item_failed(&mut self, abbreviation: &str) {
        eprintln!("Failed {abbreviation}");
    }
}

pub fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    if args.list_teams {
        for t in teams::all() {
            println!("{},{},{},{}", t.id, t.abbreviation, t.name, team_color(&t.abbreviation).to_hex());
        }
        return Ok(());
    }

    let options = args.options();
    let _log_guard = log::init(&options.store_dir);
    let date = args.date();
    logf!("CLI: date={} options={:?}", date, options);

    let mut progress = CliProgress::default();
    let snapshot = runner::run(date, &options, Some(&mut progress))?;
    let rows = report::rows(&snapshot);

    if args.csv {
        write_csv(io::stdout().lock(), &rows)?;
    } else {
        println!("{}", render_table(&rows));
        println!("Snapshot {} ({} teams)", snapshot.date, snapshot.len());
    }
    Ok(())
}

pub fn render_table(rows: &[ReportRow]) -> String {
    let mut b = Builder::default();
    b.push_record(TABLE_HEADERS);
    for r in rows {
        b.push_record(r.cells());
    }
    let mut table = b.build();
    table.with(Style::rounded());
    table.to_string()
}

pub fn write_csv<W: io::Write>(w: W, rows: &[ReportRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(TABLE_HEADERS)?;
    for r in rows {
        wtr.write_record(r.cells())?;
    }
    wtr.flush()?;
    Ok(())
}
