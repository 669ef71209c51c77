// src/log.rs
//
// File logging for both front ends. Call sites use `logf!` / `logd!` / `loge!`;
// the macros forward to `tracing`, and `init` routes events into
// `<store_dir>/debug.log` through a non-blocking appender.

use std::{path::Path, sync::OnceLock};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_FILE;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Returns the appender guard, which must be
/// kept alive for the lifetime of the program so buffered lines get flushed.
/// Subsequent calls are no-ops and return `None`.
pub fn init(store_dir: &Path) -> Option<WorkerGuard> {
    if INSTALLED.get().is_some() {
        return None;
    }
    // Unusable store dir: run without a log file rather than fail startup.
    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(store_dir)
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Log: cannot open {} in {}: {}", LOG_FILE, store_dir.display(), e);
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok();

    if !installed {
        return None;
    }
    let _ = INSTALLED.set(());
    Some(guard)
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
