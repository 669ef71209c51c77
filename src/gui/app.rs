// src/gui/app.rs
use std::{
    error::Error,
    sync::{ Arc, Mutex },
    thread::{ self, JoinHandle },
};

use chrono::{ Local, NaiveDate };
use eframe::egui::{ self, widgets::Spinner };

use crate::{
    config::options::SnapshotOptions,
    log,
    model::Snapshot,
    report::{ self, ReportRow },
    runner,
};

use super::{ components::{ scatter, standings }, progress::GuiProgress };

type Outcome = Result<Snapshot, String>;

pub fn run(native: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let options = SnapshotOptions::default();
    let guard = log::init(&options.store_dir);

    eframe::run_native(
        "NBA Efficiency Snapshot",
        native,
        Box::new(move |_cc| Ok(Box::new(App::new(options, guard)))),
    )?;
    Ok(())
}

pub struct App {
    pub date: NaiveDate,
    pub options: SnapshotOptions,

    // rows for the current snapshot, best record first
    pub rows: Vec<ReportRow>,

    // status/progress (worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    outcome: Arc<Mutex<Option<Outcome>>>,
    worker: Option<JoinHandle<()>>,

    _log_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl App {
    pub fn new(options: SnapshotOptions, log_guard: Option<tracing_appender::non_blocking::WorkerGuard>) -> Self {
        let date = Local::now().date_naive();
        logf!("Init: date={} store={}", date, options.store_dir.display());

        let mut app = Self {
            date,
            options,
            rows: Vec::new(),
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            outcome: Arc::new(Mutex::new(None)),
            worker: None,
            _log_guard: log_guard,
        };
        app.start(false);
        app
    }

    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Load (or rebuild) the snapshot off the UI thread. Network builds take a
    /// while; the window keeps repainting from the status line meanwhile.
    pub fn start(&mut self, rebuild: bool) {
        if self.running {
            return;
        }
        self.running = true;
        self.date = Local::now().date_naive();
        self.status(if rebuild { "Rebuilding…" } else { "Loading…" });
        logf!("UI: {} snapshot for {}", if rebuild { "Rebuild" } else { "Load" }, self.date);

        let date = self.date;
        let mut options = self.options.clone();
        options.rebuild = rebuild;
        let status = self.status.clone();
        let outcome = self.outcome.clone();

        self.worker = Some(thread::spawn(move || {
            let mut prog = GuiProgress::new(status);
            let res = runner::run(date, &options, Some(&mut prog)).map_err(|e| e.to_string());
            if let Ok(mut slot) = outcome.lock() {
                *slot = Some(res);
            }
        }));
    }

    /// Pick up a finished load, if any.
    fn poll(&mut self) {
        let finished = self.worker.as_ref().is_some_and(|h| h.is_finished());
        let Some(res) = take_outcome(&self.outcome, finished) else { return };
        self.running = false;
        self.worker = None;

        match res {
            Ok(snapshot) => {
                logf!("UI: Snapshot {} ready (teams={})", snapshot.date, snapshot.len());
                self.rows = report::rows(&snapshot);
                self.status(format!("Snapshot {} ({} teams)", snapshot.date, snapshot.len()));
            }
            Err(e) => {
                loge!("UI: Snapshot failed: {}", e);
                self.status(format!("Error: {e}"));
            }
        }
    }
}

/// Finished result, if any. A worker that ended without leaving one (it
/// panicked) yields an error; a poisoned slot is recovered and cleared.
fn take_outcome(slot: &Mutex<Option<Outcome>>, worker_finished: bool) -> Option<Outcome> {
    let taken = match slot.lock() {
        Ok(mut g) => g.take(),
        Err(poisoned) => {
            let v = poisoned.into_inner().take();
            slot.clear_poison();
            v
        }
    };
    match taken {
        Some(res) => Some(res),
        None if worker_finished => Some(Err(s!("snapshot worker stopped without a result"))),
        None => None,
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();
        if self.running {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Team efficiency · {}", self.date));
                ui.separator();
                if ui.add_enabled(!self.running, egui::Button::new("Reload")).clicked() {
                    self.start(false);
                }
                if ui
                    .add_enabled(!self.running, egui::Button::new("Rebuild"))
                    .on_hover_text("Ignore today's saved snapshot and fetch again")
                    .clicked()
                {
                    self.start(true);
                }
                if self.running {
                    ui.add(Spinner::new());
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::SidePanel::right("standings")
            .resizable(true)
            .default_width(430.0)
            .show(ctx, |ui| {
                standings::draw(ui, &self.rows);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            scatter::draw(ui, &self.rows);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_running_yields_nothing() {
        let slot = Mutex::new(None);
        assert!(take_outcome(&slot, false).is_none());
    }

    #[test]
    fn worker_gone_without_result_is_an_error() {
        let slot = Mutex::new(None);
        assert!(matches!(take_outcome(&slot, true), Some(Err(_))));
    }

    #[test]
    fn poisoned_slot_is_recovered_once() {
        let slot = Arc::new(Mutex::new(None::<Outcome>));
        let s2 = slot.clone();
        let _ = thread::spawn(move || {
            let _g = s2.lock().unwrap();
            panic!("worker blew up");
        })
        .join();
        assert!(slot.is_poisoned());

        assert!(matches!(take_outcome(&slot, true), Some(Err(_))));
        assert!(!slot.is_poisoned());
        assert!(take_outcome(&slot, false).is_none());
    }
}
