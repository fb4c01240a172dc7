// src/utils/progress_bars/logging.rs - Logging helpers for a REPD/ECR matching run
use log::{debug, info, warn};
use std::time::Instant;

use crate::models::core::IdRange;
use crate::models::stats_models::MatchStats;

const RUN_NAME: &str = "REPD-ECR";
const RUN_EMOJI: &str = "☀️";

#[derive(Clone)]
pub struct MatchingLogger {
    start_time: Instant,
}

impl Default for MatchingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingLogger {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, run_id: &str, range: &IdRange) {
        info!(
            "[{}] {} 🚀 Starting matching (run ID: {}) for REPD_ID {} to {}",
            RUN_NAME, RUN_EMOJI, run_id, range.start_id, range.end_id
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        let msg = if let Some(details) = details {
            format!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                RUN_NAME,
                RUN_EMOJI,
                phase,
                details,
                elapsed.as_secs_f32()
            )
        } else {
            format!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                RUN_NAME,
                RUN_EMOJI,
                phase,
                elapsed.as_secs_f32()
            )
        };
        info!("{}", msg);
    }

    pub fn log_data_loaded(&self, count: usize, data_type: &str) {
        info!(
            "[{}] {} 📊 Loaded {} {} records",
            RUN_NAME, RUN_EMOJI, count, data_type
        );
    }

    /// Reports the connection eligibility filter applied before any search.
    pub fn log_filtering_results(&self, total: usize, non_solar: usize, eligible: usize) {
        let percent_kept = if total > 0 {
            (eligible as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        info!(
            "[{}] {} 🎯 ECR filtering: {} total → {} solar candidates ({:.1}% kept)",
            RUN_NAME, RUN_EMOJI, total, eligible, percent_kept
        );
        if non_solar > 0 {
            info!(
                "[{}] {} 🚫 Filtered out: {} non-solar connection records",
                RUN_NAME, RUN_EMOJI, non_solar
            );
        }
    }

    pub fn log_data_quality_issue(&self, issue_type: &str, count: usize) {
        if count > 0 {
            warn!(
                "[{}] {} ⚠️  Data quality: {} instances of {}",
                RUN_NAME, RUN_EMOJI, count, issue_type
            );
        }
    }

    pub fn log_progress_update(&self, current: usize, total: usize, additional_info: Option<&str>) {
        // Every 5000 records, plus every 10% on larger runs
        let should_log = current % 5000 == 0
            || current == total
            || (total >= 100 && current % (total / 10) == 0);

        if should_log && current > 0 {
            let percent = (current as f64 / total as f64) * 100.0;
            let msg = if let Some(info) = additional_info {
                format!("Progress: {}/{} ({:.1}%) - {}", current, total, percent, info)
            } else {
                format!("Progress: {}/{} ({:.1}%)", current, total, percent)
            };
            info!("[{}] {} 📊 {}", RUN_NAME, RUN_EMOJI, msg);
        }
    }

    pub fn log_completion(&self, stats: &MatchStats) {
        let duration = self.start_time.elapsed();
        info!(
            "[{}] {} 🎉 COMPLETED: {}/{} REPD records matched in {:.2?}",
            RUN_NAME, RUN_EMOJI, stats.projects_matched, stats.projects_in_range, duration
        );
        info!(
            "[{}] {} 📊 Results: {} spatial queries, {} candidates scored, {} without candidates, {} with invalid coordinates",
            RUN_NAME,
            RUN_EMOJI,
            stats.spatial_queries,
            stats.candidates_scored,
            stats.projects_without_candidates,
            stats.projects_invalid_coordinates
        );
        if !stats.signal_counts.is_empty() {
            let breakdown = stats
                .signal_counts
                .iter()
                .map(|(signal, count)| format!("{}={}", signal, count))
                .collect::<Vec<_>>()
                .join(", ");
            info!(
                "[{}] {} 🧩 Signals on winning matches: {}",
                RUN_NAME, RUN_EMOJI, breakdown
            );
        }
    }

    pub fn log_warning(&self, message: &str) {
        warn!("[{}] {} ⚠️  {}", RUN_NAME, RUN_EMOJI, message);
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", RUN_NAME, RUN_EMOJI, message);
    }
}
