// src/matching/selector.rs
use crate::models::matching::CandidateScore;

/// Picks the highest-scoring candidate. Candidates are expected in
/// connection-table order; on a tie the earliest one is kept.
pub fn select_best<I>(candidates: I) -> Option<CandidateScore>
where
    I: IntoIterator<Item = CandidateScore>,
{
    let mut best: Option<CandidateScore> = None;
    for candidate in candidates {
        let replace = match &best {
            Some(current) => candidate.score() > current.score(),
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matching::{SignalEvidence, SignalType};

    fn scored(candidate: usize, extra: &[SignalType]) -> CandidateScore {
        let mut score = CandidateScore::spatial_only(candidate);
        for signal in extra {
            score.push(SignalEvidence::new(*signal, "a", "b"));
        }
        score
    }

    #[test]
    fn test_empty_input() {
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_highest_score_wins() {
        let best = select_best(vec![
            scored(0, &[]),
            scored(1, &[SignalType::Capacity, SignalType::Postcode]),
            scored(2, &[SignalType::Capacity]),
        ])
        .unwrap();
        assert_eq!(best.candidate, 1);
        assert_eq!(best.score(), 3);
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let best = select_best(vec![
            scored(3, &[SignalType::TextGroupA, SignalType::TextGroupB]),
            scored(5, &[SignalType::Capacity, SignalType::Postcode]),
        ])
        .unwrap();
        assert_eq!(best.candidate, 3);
    }

    #[test]
    fn test_spatial_only_candidate_is_still_a_match() {
        let best = select_best(vec![scored(9, &[])]).unwrap();
        assert_eq!(best.signals, vec![SignalType::Spatial]);
    }
}
