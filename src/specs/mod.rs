// src/specs/mod.rs
//! # Provider “specs” module
//!
//! Each spec covers one stats.nba.com endpoint and encodes *where the ground
//! truth lives in its JSON* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure payload parsing** (`parse_*`), testable offline against captured
//!   fixtures.
//! - A thin `fetch` per endpoint: builds the query, calls `core::net`, parses.
//!
//! ## What does **not** live here
//! - **Season filtering, side selection, aggregation** – `aggregate`.
//! - **Caching/persistence** – `store` and `codec`.
//!
//! ## Conventions
//! - Tabular payloads (`resultSets`) are read **by header name**, never by
//!   position; a missing column is a payload error, not a silent default.
//! - Nested payloads use serde structs that ignore unknown fields.
pub mod box_score;
pub mod game_log;
