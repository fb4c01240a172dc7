// src/matching/scoring.rs - Signal evaluation for one REPD/ECR candidate pair
use log::debug;

use crate::matching::{capacity, postcode, text};
use crate::models::core::{ConnectionRecord, ProjectRecord};
use crate::models::matching::{CandidateScore, SignalType};
use crate::utils::match_config::MatchConfig;

/// Evaluates every signal for a candidate that already passed the spatial
/// gate. Signals are cumulative; `spatial` is always first.
pub fn score_candidate(
    project: &ProjectRecord,
    connection: &ConnectionRecord,
    candidate: usize,
    config: &MatchConfig,
) -> CandidateScore {
    let mut score = CandidateScore::spatial_only(candidate);

    if let Some(evidence) =
        capacity::evaluate(project.capacity, connection.capacity, config.capacity_tolerance)
    {
        score.push(evidence);
    }

    let project_text_a = text::join_fields(&project.operator, &project.site_name);
    let connection_text_a = text::join_fields(&connection.customer_name, &connection.customer_site);
    if let Some(evidence) = text::evaluate_group(
        SignalType::TextGroupA,
        &project_text_a,
        &connection_text_a,
        config.text_similarity_threshold,
    ) {
        score.push(evidence);
    }

    let project_text_b = text::join_fields(&project.site_name, &project.address);
    let connection_text_b = text::join_fields(&connection.customer_site, &connection.address_line);
    if let Some(evidence) = text::evaluate_group(
        SignalType::TextGroupB,
        &project_text_b,
        &connection_text_b,
        config.text_similarity_threshold,
    ) {
        score.push(evidence);
    }

    if let Some(evidence) = postcode::evaluate(&project.postcode, &connection.postcode) {
        score.push(evidence);
    }

    let distance_m = project
        .point()
        .zip(connection.point())
        .map(|(p, c)| p.distance(&c))
        .unwrap_or(f64::NAN);
    debug!(
        "Scored ECR {} (row {}, {:.0} m) for REPD row {}: {} [{}]",
        connection.id,
        connection.row,
        distance_m,
        project.row,
        score.score(),
        score
            .signals
            .iter()
            .map(SignalType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectRecord {
        ProjectRecord {
            row: 0,
            id: Some(1.0),
            x: Some(0.0),
            y: Some(0.0),
            capacity: Some(10.0),
            operator: "Lightsource BP".to_string(),
            site_name: "Manor Farm Solar Park".to_string(),
            address: "Manor Lane, Little Snoring".to_string(),
            postcode: "NR21 0AA".to_string(),
        }
    }

    fn connection() -> ConnectionRecord {
        ConnectionRecord {
            row: 4,
            id: "ECR-1".to_string(),
            energy_source: "Solar".to_string(),
            x: Some(100.0),
            y: Some(0.0),
            capacity: Some(9.5),
            customer_name: "Lightsource BP Renewable Energy".to_string(),
            customer_site: "Manor Farm Solar".to_string(),
            address_line: "Manor Lane Little Snoring".to_string(),
            postcode: "nr210aa".to_string(),
        }
    }

    #[test]
    fn test_all_signals_in_fixed_order() {
        let score = score_candidate(&project(), &connection(), 2, &MatchConfig::default());
        assert_eq!(score.candidate, 2);
        assert_eq!(
            score.signals,
            vec![
                SignalType::Spatial,
                SignalType::Capacity,
                SignalType::TextGroupA,
                SignalType::TextGroupB,
                SignalType::Postcode,
            ]
        );
        assert_eq!(score.score(), 5);
        assert_eq!(score.evidence.len(), 4);
        assert_eq!(
            score.evidence[1].project_detail,
            "textA: Lightsource BP Manor Farm Solar Park"
        );
        assert_eq!(
            score.evidence[2].connection_detail,
            "textB: Manor Farm Solar Manor Lane Little Snoring"
        );
    }

    #[test]
    fn test_spatial_only_when_nothing_else_agrees() {
        let other = ConnectionRecord {
            capacity: None,
            customer_name: "Octopus Energy".to_string(),
            customer_site: "Hill Top".to_string(),
            address_line: "Ridge Road".to_string(),
            postcode: String::new(),
            ..connection()
        };
        let score = score_candidate(&project(), &other, 0, &MatchConfig::default());
        assert_eq!(score.signals, vec![SignalType::Spatial]);
        assert_eq!(score.score(), 1);
        assert!(score.evidence.is_empty());
    }

    #[test]
    fn test_threshold_comes_from_config() {
        let config = MatchConfig {
            text_similarity_threshold: 100.0,
            ..MatchConfig::default()
        };
        let score = score_candidate(&project(), &connection(), 0, &config);
        assert!(!score.signals.contains(&SignalType::TextGroupA));
        assert!(score.signals.contains(&SignalType::Postcode));
    }
}
