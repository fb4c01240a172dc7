// src/main.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

use repd_ecr_lib::dataset::csv_io::{export_path, read_table, summary_path, write_table};
use repd_ecr_lib::matching::manager::run_matching;
use repd_ecr_lib::models::core::IdRange;
use repd_ecr_lib::models::stats_models::RunSummary;
use repd_ecr_lib::utils::env::load_env;
use repd_ecr_lib::utils::get_memory_usage;
use repd_ecr_lib::utils::match_config::MatchConfig;
use repd_ecr_lib::utils::progress_bars::logging::MatchingLogger;
use repd_ecr_lib::utils::progress_bars::progress_config::ProgressConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct MatchArgs {
    /// REPD (planning register) CSV file
    #[arg(long)]
    repd: PathBuf,

    /// ECR (embedded capacity register) CSV file
    #[arg(long)]
    ecr: PathBuf,

    /// First REPD_ID to match (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    start_id: String,

    /// Last REPD_ID to match (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    end_id: String,

    /// Directory the export is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Search radius around each REPD site, in km
    #[arg(long)]
    radius_km: Option<f64>,

    /// Capacity tolerance as a fraction of the REPD capacity
    #[arg(long)]
    capacity_tolerance: Option<f64>,

    /// Text similarity threshold (0-100)
    #[arg(long)]
    text_threshold: Option<f64>,

    /// Also write a JSON run summary next to the export
    #[arg(long)]
    summary: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = MatchArgs::parse();

    // Initialize logging and environment
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    load_env();

    let range = IdRange::parse(&args.start_id, &args.end_id)?;

    let mut config = MatchConfig::from_env();
    if let Some(radius_km) = args.radius_km {
        config.buffer_distance_km = radius_km;
    }
    if let Some(tolerance) = args.capacity_tolerance {
        config.capacity_tolerance = tolerance;
    }
    if let Some(threshold) = args.text_threshold {
        config.text_similarity_threshold = threshold;
    }
    config.validate().context("Invalid matching parameters")?;
    config.log_config();

    let progress_config = ProgressConfig::from_env();
    info!(
        "Progress tracking: enabled={}, show_memory={}",
        progress_config.enabled, progress_config.show_memory
    );

    let run_id = Uuid::new_v4().to_string();
    let run_timestamp = Utc::now().naive_utc();
    let start_time = Instant::now();
    let logger = MatchingLogger::new();
    logger.log_start(&run_id, &range);

    let repd = read_table(&args.repd).context("Failed to load REPD table")?;
    let ecr = read_table(&args.ecr).context("Failed to load ECR table")?;

    let run = run_matching(&repd, &ecr, range, &config, &progress_config)?;

    let output_file = export_path(&args.output_dir, range.start_id, range.end_id);
    write_table(&output_file, &run.output)
        .with_context(|| format!("Failed to export matches to {}", output_file.display()))?;

    let processing_time = start_time.elapsed();
    if args.summary {
        let summary = RunSummary {
            run_id: run_id.clone(),
            run_timestamp,
            id_range: range,
            parameters: config.parameters(),
            output_file: output_file.display().to_string(),
            processing_time_secs: processing_time.as_secs_f64(),
            stats: run.stats.clone(),
        };
        let path = summary_path(&args.output_dir, range.start_id, range.end_id);
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize run summary")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write run summary to {}", path.display()))?;
        info!("📝 Run summary written to {}", path.display());
    }

    info!("🎉 ===== REPD-ECR MATCHING COMPLETED =====");
    info!("📅 Run ID: {}", run_id);
    info!("⏱️  Total Duration: {:.2?}", processing_time);
    info!(
        "🎯 Matched {}/{} REPD records ({:.1}%)",
        run.stats.projects_matched,
        run.stats.projects_in_range,
        run.stats.match_rate()
    );
    info!(
        "🚫 Not found: {} ({} without candidates, {} with invalid coordinates)",
        run.stats.projects_unmatched(),
        run.stats.projects_without_candidates,
        run.stats.projects_invalid_coordinates
    );
    info!("💾 Output: {}", output_file.display());
    if progress_config.should_show_memory() {
        info!("🧠 Memory usage: {} MB", get_memory_usage());
    }
    info!("==========================================");

    Ok(())
}
