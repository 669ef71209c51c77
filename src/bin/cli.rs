// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::{ eyre, Result };
use nba_snapshot::cli::{ self, Args };

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    cli::run(args).map_err(|e| eyre!(e))
}
