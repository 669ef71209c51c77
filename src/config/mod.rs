// src/config/mod.rs
pub mod colors;
pub mod consts;
pub mod options;
