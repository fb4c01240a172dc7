// src/models/matching.rs - Signal, candidate score and match result types
use serde::Serialize;
use std::fmt;

use crate::utils::constants::NOT_FOUND;

/// One independent match criterion. Declaration order is the order in which
/// signals appear in a reason list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SignalType {
    Spatial,
    Capacity,
    TextGroupA,
    TextGroupB,
    Postcode,
}

impl SignalType {
    pub const ALL: [SignalType; 5] = [
        SignalType::Spatial,
        SignalType::Capacity,
        SignalType::TextGroupA,
        SignalType::TextGroupB,
        SignalType::Postcode,
    ];

    /// Tag written to the reason column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Spatial => "spatial",
            SignalType::Capacity => "capacity",
            SignalType::TextGroupA => "text(GrpA)",
            SignalType::TextGroupB => "text(GrpB)",
            SignalType::Postcode => "postcode",
        }
    }

    /// Prefix of the evidence strings written to the details columns.
    pub fn evidence_label(&self) -> &'static str {
        match self {
            SignalType::Spatial => "spatial",
            SignalType::Capacity => "capacity",
            SignalType::TextGroupA => "textA",
            SignalType::TextGroupB => "textB",
            SignalType::Postcode => "postcode",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triggered non-spatial signal with the values that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEvidence {
    pub signal: SignalType,
    pub project_detail: String,
    pub connection_detail: String,
}

impl SignalEvidence {
    pub fn new(signal: SignalType, project_value: &str, connection_value: &str) -> Self {
        let label = signal.evidence_label();
        Self {
            signal,
            project_detail: format!("{}: {}", label, project_value),
            connection_detail: format!("{}: {}", label, connection_value),
        }
    }
}

/// Signals triggered between one REPD record and one candidate ECR record.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// Position of the candidate within the eligible connection list.
    pub candidate: usize,
    pub signals: Vec<SignalType>,
    pub evidence: Vec<SignalEvidence>,
}

impl CandidateScore {
    /// A candidate that only has spatial proximity going for it.
    pub fn spatial_only(candidate: usize) -> Self {
        Self {
            candidate,
            signals: vec![SignalType::Spatial],
            evidence: Vec::new(),
        }
    }

    pub fn push(&mut self, evidence: SignalEvidence) {
        self.signals.push(evidence.signal);
        self.evidence.push(evidence);
    }

    /// Count of triggered signals; every signal weighs 1.
    pub fn score(&self) -> usize {
        self.signals.len()
    }
}

/// The winning candidate for one REPD record.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub connection_id: String,
    pub signals: Vec<SignalType>,
    pub project_details: Vec<String>,
    pub connection_details: Vec<String>,
}

impl MatchResult {
    pub fn from_score(connection_id: &str, score: CandidateScore) -> Self {
        let (project_details, connection_details) = score
            .evidence
            .into_iter()
            .map(|e| (e.project_detail, e.connection_detail))
            .unzip();
        Self {
            connection_id: connection_id.to_string(),
            signals: score.signals,
            project_details,
            connection_details,
        }
    }

    pub fn reason_text(&self) -> String {
        self.signals
            .iter()
            .map(SignalType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn project_details_text(&self) -> String {
        self.project_details.join("; ")
    }

    pub fn connection_details_text(&self) -> String {
        self.connection_details.join("; ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    /// The buffer around the REPD site held no eligible ECR record.
    NoCandidates,
    /// The REPD record had no usable coordinates; no search was attempted.
    InvalidCoordinates,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    /// Matched id, reason, REPD details, ECR details; "NF" throughout when
    /// there is no match.
    pub fn result_fields(&self) -> [String; 4] {
        match self {
            MatchOutcome::Matched(result) => [
                result.connection_id.clone(),
                result.reason_text(),
                result.project_details_text(),
                result.connection_details_text(),
            ],
            MatchOutcome::NoCandidates | MatchOutcome::InvalidCoordinates => [
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
            ],
        }
    }
}

/// Match outcome for one REPD row of the requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMatch {
    pub project_row: usize,
    pub outcome: MatchOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_tags() {
        let tags: Vec<&str> = SignalType::ALL.iter().map(SignalType::as_str).collect();
        assert_eq!(
            tags,
            vec!["spatial", "capacity", "text(GrpA)", "text(GrpB)", "postcode"]
        );
        assert_eq!(SignalType::TextGroupB.to_string(), "text(GrpB)");
    }

    #[test]
    fn test_match_result_fields() {
        let mut score = CandidateScore::spatial_only(3);
        score.push(SignalEvidence::new(SignalType::Capacity, "100", "105"));
        score.push(SignalEvidence::new(SignalType::Postcode, "sw1a1aa", "sw1a1aa"));
        assert_eq!(score.score(), 3);

        let outcome = MatchOutcome::Matched(MatchResult::from_score("ECR-9", score));
        assert_eq!(
            outcome.result_fields(),
            [
                "ECR-9".to_string(),
                "spatial, capacity, postcode".to_string(),
                "capacity: 100; postcode: sw1a1aa".to_string(),
                "capacity: 105; postcode: sw1a1aa".to_string(),
            ]
        );
    }

    #[test]
    fn test_spatial_only_match_has_empty_details() {
        let result = MatchResult::from_score("E1", CandidateScore::spatial_only(0));
        assert_eq!(result.reason_text(), "spatial");
        assert_eq!(result.project_details_text(), "");
        assert_eq!(result.connection_details_text(), "");
    }

    #[test]
    fn test_unmatched_fields_are_not_found() {
        for outcome in [MatchOutcome::NoCandidates, MatchOutcome::InvalidCoordinates] {
            assert!(!outcome.is_match());
            assert!(outcome.result_fields().iter().all(|f| f == "NF"));
        }
    }
}
