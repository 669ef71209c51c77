// src/error.rs
use std::{ fmt, io };

use thiserror::Error;

/// Any failure talking to the stats provider. Aborts the team it happened in,
/// and with it the whole build.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: unexpected response: {detail}")]
    Payload { endpoint: &'static str, detail: String },

    #[error("{0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn payload(endpoint: &'static str, detail: impl Into<String>) -> Self {
        ProviderError::Payload { endpoint, detail: detail.into() }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("team {team}: {source}")]
    Team {
        team: String,
        #[source]
        source: ProviderError,
    },

    #[error("worker pool stopped after {received} of {expected} teams")]
    Incomplete { received: usize, expected: usize },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O: {0}")]
    Io(#[from] io::Error),

    #[error("store CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a date has no usable artifact. Never surfaced as an error: any of these
/// just means "recompute".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MissReason {
    NotFound,
    Unreadable(String),
    Malformed(String),
    Inconsistent { team: String, detail: String },
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::NotFound => write!(f, "no artifact"),
            MissReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            MissReason::Malformed(e) => write!(f, "malformed: {e}"),
            MissReason::Inconsistent { team, detail } => write!(f, "inconsistent {team}: {detail}"),
        }
    }
}
