// src/bin/score_distribution.rs
//
// Prints a violin plot of one score column from a CSV written by the `dedupe`
// binary, to help pick match thresholds by eye.

use anyhow::{Context, Result};
use clap::Parser;
use dedupe_lib::utils::data_io::read_score_column;
use dedupe_lib::utils::env::load_env;
use dedupe_lib::visualization::distribution::{render_violin, ViolinPlotConfig};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct DistributionArgs {
    /// Score CSV produced by `dedupe`
    scores: PathBuf,

    /// Column to plot
    #[arg(long, default_value = "name_score")]
    column: String,

    /// Canvas width in characters
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Canvas height in characters
    #[arg(long, default_value_t = 21)]
    height: usize,
}

fn main() -> Result<()> {
    load_env();
    env_logger::init();
    let args = DistributionArgs::parse();

    let file = File::open(&args.scores)
        .with_context(|| format!("Failed to open {}", args.scores.display()))?;
    let values = read_score_column(BufReader::new(file), &args.column)
        .with_context(|| format!("Failed to read column '{}'", args.column))?;
    info!("Plotting {} values of {}", values.len(), args.column);

    let config = ViolinPlotConfig {
        width: args.width,
        height: args.height,
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_violin(&values, &config, &mut handle).context("Failed to draw plot")?;
    Ok(())
}
