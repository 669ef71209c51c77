// src/gui/components/mod.rs
pub mod scatter;
pub mod standings;
