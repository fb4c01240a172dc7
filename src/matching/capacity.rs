// src/matching/capacity.rs
use crate::models::matching::{SignalEvidence, SignalType};

/// Capacities agree when they differ by at most `tolerance` times the REPD
/// capacity. The tolerance is scaled by the REPD side only, so the test is
/// not symmetric in its arguments. Missing values never agree.
pub fn capacities_match(project: Option<f64>, connection: Option<f64>, tolerance: f64) -> bool {
    match (project, connection) {
        (Some(p), Some(c)) => (p - c).abs() <= tolerance * p,
        _ => false,
    }
}

pub fn evaluate(
    project: Option<f64>,
    connection: Option<f64>,
    tolerance: f64,
) -> Option<SignalEvidence> {
    if !capacities_match(project, connection, tolerance) {
        return None;
    }
    let (p, c) = (project?, connection?);
    Some(SignalEvidence::new(
        SignalType::Capacity,
        &format_capacity(p),
        &format_capacity(c),
    ))
}

/// Float form with a decimal point kept on whole numbers (`100.0`, `9.5`).
fn format_capacity(value: f64) -> String {
    format!("{:?}", value)
}
