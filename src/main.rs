use anyhow::{Context, Result};
use clap::Parser;
use dedupe_lib::matching::manager::run_place_matching_pipeline;
use dedupe_lib::preprocessing::transliteration::{KakasiTransliterator, Transliterator};
use dedupe_lib::utils::config::PipelineConfig;
use dedupe_lib::utils::data_io::{read_places_from_path, write_score_tables, write_stats};
use dedupe_lib::utils::env::load_env;
use dedupe_lib::utils::get_memory_usage;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Score candidate duplicate pairs in a table of places", long_about = None)]
struct Args {
    /// CSV of places with name, address, city, state, country, categories, latitude, longitude
    #[arg(long)]
    input: PathBuf,

    /// Where to write the concatenated score CSV
    #[arg(long)]
    output: PathBuf,

    /// Optional JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Latitude blocking window (odd); overrides BLOCKING_LAT_WINDOW
    #[arg(long)]
    lat_win: Option<usize>,

    /// Name/location blocking window (odd); overrides BLOCKING_NAME_WINDOW
    #[arg(long)]
    name_win: Option<usize>,

    /// Overrides SCORING_CHUNK_THRESHOLD
    #[arg(long)]
    chunk_threshold: Option<usize>,

    /// Overrides SCORING_CHUNK_COUNT
    #[arg(long)]
    chunk_count: Option<usize>,

    /// Skip romanization of Japanese records
    #[arg(long)]
    no_transliterate: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting place deduplication scoring pipeline");
    load_env();
    let args = Args::parse();

    let mut config = PipelineConfig::from_env().context("Failed to read pipeline configuration")?;
    if let Some(lat_win) = args.lat_win {
        config.blocking.lat_win = lat_win;
    }
    if let Some(name_win) = args.name_win {
        config.blocking.name_win = name_win;
    }
    if let Some(threshold) = args.chunk_threshold {
        config.scoring.chunk_threshold = threshold;
    }
    if let Some(count) = args.chunk_count {
        config.scoring.chunk_count = count;
    }
    if args.no_transliterate {
        config.transliteration_enabled = false;
    }
    config.validate().context("Invalid pipeline configuration")?;
    config.log_config();

    // fail before reading any data if the backend does not work
    let backend = if config.transliteration_enabled {
        Some(KakasiTransliterator::new().context("Transliteration backend failed its startup check")?)
    } else {
        None
    };

    let places = read_places_from_path(&args.input)
        .with_context(|| format!("Failed to read places from {}", args.input.display()))?;

    let multi_progress = config.progress.create_multi_progress();
    let output = run_place_matching_pipeline(
        &places,
        &config,
        backend.as_ref().map(|b| b as &dyn Transliterator),
        multi_progress,
    )
    .context("Place matching pipeline failed")?;

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let rows = write_score_tables(BufWriter::new(file), &output.score_tables)
        .context("Failed to write score tables")?;
    info!("Wrote {} scored pairs to {}", rows, args.output.display());

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_stats(BufWriter::new(file), &output.stats).context("Failed to write run summary")?;
        info!("Wrote run summary to {}", path.display());
    }

    if config.progress.should_show_memory() {
        info!("Memory in use at exit: {} MB", get_memory_usage());
    }
    info!(
        "Run {} finished in {:.2}s",
        output.stats.run_id, output.stats.total_processing_time
    );
    Ok(())
}
