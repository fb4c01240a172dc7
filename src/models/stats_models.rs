// src/models/stats_models.rs
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::core::IdRange;
use crate::models::matching::{MatchOutcome, SignalType};

/// Counters collected over one matching run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub projects_total: usize,
    pub projects_in_range: usize,
    pub projects_invalid_coordinates: usize,
    pub connections_total: usize,
    pub connections_non_solar: usize,
    pub connections_eligible: usize,
    pub connections_invalid_coordinates: usize,
    /// Buffer queries issued against the connection index. Records with
    /// invalid coordinates never issue one.
    pub spatial_queries: usize,
    pub candidates_scored: usize,
    pub projects_matched: usize,
    pub projects_without_candidates: usize,
    /// How often each signal appears in a winning match, keyed by tag.
    pub signal_counts: BTreeMap<String, usize>,
}

impl MatchStats {
    pub fn record_outcome(&mut self, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Matched(result) => {
                self.projects_matched += 1;
                for signal in &result.signals {
                    *self
                        .signal_counts
                        .entry(signal.as_str().to_string())
                        .or_insert(0) += 1;
                }
            }
            MatchOutcome::NoCandidates => self.projects_without_candidates += 1,
            MatchOutcome::InvalidCoordinates => self.projects_invalid_coordinates += 1,
        }
    }

    pub fn signal_count(&self, signal: SignalType) -> usize {
        self.signal_counts
            .get(signal.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn projects_unmatched(&self) -> usize {
        self.projects_in_range - self.projects_matched
    }

    pub fn match_rate(&self) -> f64 {
        if self.projects_in_range == 0 {
            0.0
        } else {
            self.projects_matched as f64 / self.projects_in_range as f64 * 100.0
        }
    }
}

/// Parameters a run was executed with, as recorded in the summary file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunParameters {
    pub buffer_distance_km: f64,
    pub capacity_tolerance: f64,
    pub text_similarity_threshold: f64,
}

/// Sidecar document written next to the exported table.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub id_range: IdRange,
    pub parameters: RunParameters,
    pub output_file: String,
    pub processing_time_secs: f64,
    pub stats: MatchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matching::{CandidateScore, MatchResult, SignalEvidence};

    #[test]
    fn test_record_outcome_counts() {
        let mut stats = MatchStats {
            projects_in_range: 3,
            ..Default::default()
        };

        let mut score = CandidateScore::spatial_only(0);
        score.push(SignalEvidence::new(SignalType::Postcode, "a", "a"));
        stats.record_outcome(&MatchOutcome::Matched(MatchResult::from_score("E1", score)));
        stats.record_outcome(&MatchOutcome::NoCandidates);
        stats.record_outcome(&MatchOutcome::InvalidCoordinates);

        assert_eq!(stats.projects_matched, 1);
        assert_eq!(stats.projects_without_candidates, 1);
        assert_eq!(stats.projects_invalid_coordinates, 1);
        assert_eq!(stats.projects_unmatched(), 2);
        assert_eq!(stats.signal_count(SignalType::Spatial), 1);
        assert_eq!(stats.signal_count(SignalType::Postcode), 1);
        assert_eq!(stats.signal_count(SignalType::Capacity), 0);
        assert!((stats.match_rate() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_serialize_with_sorted_signal_keys() {
        let mut stats = MatchStats::default();
        stats.signal_counts.insert("spatial".to_string(), 2);
        stats.signal_counts.insert("capacity".to_string(), 1);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"signal_counts\":{\"capacity\":1,\"spatial\":2}"));
        assert!(json.contains("\"spatial_queries\":0"));
    }
}
