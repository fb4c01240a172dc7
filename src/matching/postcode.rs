// src/matching/postcode.rs
use crate::dataset::normalize::normalize_identifier;
use crate::models::matching::{SignalEvidence, SignalType};

/// Exact match on whitespace-stripped, lower-cased postcodes. An empty
/// normalized postcode never matches, not even another empty one.
pub fn evaluate(project_postcode: &str, connection_postcode: &str) -> Option<SignalEvidence> {
    let project = normalize_identifier(project_postcode);
    let connection = normalize_identifier(connection_postcode);
    if project.is_empty() || project != connection {
        return None;
    }
    Some(SignalEvidence::new(SignalType::Postcode, &project, &connection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_and_case_are_ignored() {
        let evidence = evaluate("SW1A 1AA", "sw1a1aa").unwrap();
        assert_eq!(evidence.signal, SignalType::Postcode);
        assert_eq!(evidence.project_detail, "postcode: sw1a1aa");
        assert_eq!(evidence.connection_detail, "postcode: sw1a1aa");
    }

    #[test]
    fn test_empty_postcodes_never_match() {
        assert!(evaluate("SW1A 1AA", "").is_none());
        assert!(evaluate("", "").is_none());
        assert!(evaluate("  ", " ").is_none());
    }

    #[test]
    fn test_different_postcodes() {
        assert!(evaluate("SW1A 1AA", "SW1A 1AB").is_none());
    }
}
