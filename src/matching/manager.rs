// src/matching/manager.rs - Drives a full REPD → ECR matching run
use anyhow::{Context, Result};

use crate::dataset::Table;
use crate::matching::geospatial::{find_candidates, PointIndex};
use crate::matching::report::build_output_table;
use crate::matching::scoring::score_candidate;
use crate::matching::selector::select_best;
use crate::models::core::{ConnectionRecord, IdRange, ProjectRecord};
use crate::models::matching::{MatchOutcome, MatchResult, ProjectMatch};
use crate::models::stats_models::MatchStats;
use crate::utils::match_config::MatchConfig;
use crate::utils::progress_bars::logging::MatchingLogger;
use crate::utils::progress_bars::progress_config::ProgressConfig;

/// Everything a run produces. `output` is the annotated REPD table, one row
/// per entry of `matches`.
#[derive(Debug, Clone)]
pub struct MatchRun {
    pub output: Table,
    pub matches: Vec<ProjectMatch>,
    pub stats: MatchStats,
}

/// Matches every REPD record whose numeric id lies in `range` against the
/// solar ECR records. Inputs are not modified.
pub fn run_matching(
    repd: &Table,
    ecr: &Table,
    range: IdRange,
    config: &MatchConfig,
    progress: &ProgressConfig,
) -> Result<MatchRun> {
    let logger = MatchingLogger::new();
    let mut stats = MatchStats::default();

    logger.log_phase("Loading records", None);
    let projects = ProjectRecord::from_table(repd, &config.repd_columns)
        .context("Failed to load REPD records")?;
    let connections = ConnectionRecord::from_table(ecr, &config.ecr_columns)
        .context("Failed to load ECR records")?;
    stats.projects_total = projects.len();
    stats.connections_total = connections.len();
    logger.log_data_loaded(projects.len(), "REPD");
    logger.log_data_loaded(connections.len(), "ECR");

    if range.is_empty() {
        logger.log_warning(&format!(
            "Start id {} is greater than end id {}; no REPD records selected",
            range.start_id, range.end_id
        ));
    }
    let non_numeric_ids = projects.iter().filter(|p| p.id.is_none()).count();
    logger.log_data_quality_issue("non-numeric REPD_ID (never in range)", non_numeric_ids);

    let selected: Vec<&ProjectRecord> = projects
        .iter()
        .filter(|p| p.id.map_or(false, |id| range.contains(id)))
        .collect();
    stats.projects_in_range = selected.len();
    logger.log_phase(
        "Filtering",
        Some(&format!(
            "{} of {} REPD records in id range {}..={}",
            selected.len(),
            projects.len(),
            range.start_id,
            range.end_id
        )),
    );

    let eligible: Vec<&ConnectionRecord> = connections.iter().filter(|c| c.is_solar()).collect();
    stats.connections_eligible = eligible.len();
    stats.connections_non_solar = connections.len() - eligible.len();
    logger.log_filtering_results(connections.len(), stats.connections_non_solar, eligible.len());

    logger.log_phase("Building spatial index", None);
    let index = PointIndex::new(eligible.iter().map(|c| c.point()));
    stats.connections_invalid_coordinates = index.excluded();
    logger.log_debug(&format!("Point index holds {} solar ECR records", index.len()));
    logger.log_data_quality_issue(
        "solar ECR records without usable coordinates",
        index.excluded(),
    );

    logger.log_phase("Matching", None);
    let pb = progress.create_progress_bar(selected.len(), "Matching REPD records...");
    let mut matches = Vec::with_capacity(selected.len());
    for (i, project) in selected.iter().enumerate() {
        let outcome = match_project(project, &eligible, &index, config, &mut stats);
        stats.record_outcome(&outcome);
        matches.push(ProjectMatch {
            project_row: project.row,
            outcome,
        });

        if let Some(pb) = &pb {
            pb.inc(1);
        }
        logger.log_progress_update(
            i + 1,
            selected.len(),
            Some(&format!("{} matched", stats.projects_matched)),
        );
    }
    if let Some(pb) = pb {
        pb.finish_with_message(format!("{} matched", stats.projects_matched));
    }
    logger.log_data_quality_issue(
        "REPD records in range without usable coordinates",
        stats.projects_invalid_coordinates,
    );

    logger.log_phase("Building output table", None);
    let output = build_output_table(repd, &matches)?;
    logger.log_completion(&stats);

    Ok(MatchRun {
        output,
        matches,
        stats,
    })
}

fn match_project(
    project: &ProjectRecord,
    connections: &[&ConnectionRecord],
    index: &PointIndex,
    config: &MatchConfig,
    stats: &mut MatchStats,
) -> MatchOutcome {
    let origin = match project.point() {
        Some(point) => point,
        None => return MatchOutcome::InvalidCoordinates,
    };

    stats.spatial_queries += 1;
    let candidates = find_candidates(origin, index, config.buffer_distance_km);
    stats.candidates_scored += candidates.len();

    let best = select_best(
        candidates
            .into_iter()
            .map(|pos| score_candidate(project, connections[pos], pos, config)),
    );
    match best {
        Some(score) => {
            let connection = connections[score.candidate];
            MatchOutcome::Matched(MatchResult::from_score(&connection.id, score))
        }
        None => MatchOutcome::NoCandidates,
    }
}
