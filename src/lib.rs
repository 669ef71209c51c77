// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod specs;

pub mod aggregate;
pub mod builder;
pub mod codec;
pub mod error;
pub mod model;
pub mod progress;
pub mod rank;
pub mod report;
pub mod runner;
pub mod source;
pub mod store;
pub mod teams;

pub mod gui;
pub mod cli;
