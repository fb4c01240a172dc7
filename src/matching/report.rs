// src/matching/report.rs - Assembles the annotated REPD export table
use anyhow::{bail, Context, Result};

use crate::dataset::Table;
use crate::models::matching::ProjectMatch;

/// Result columns, placed before every original REPD column. Each one is
/// pushed to the front in turn, so the last result field leads the row.
pub const OUTPUT_COLUMNS: [&str; 4] = [
    "Matched Details ECR",
    "Matched Details REPD",
    "Matching Reason",
    "Matched_ECR_ID",
];

/// Builds one output row per match outcome, in the order given, with the
/// four result fields (in `OUTPUT_COLUMNS` order) followed by the untouched
/// REPD row.
pub fn build_output_table(repd: &Table, matches: &[ProjectMatch]) -> Result<Table> {
    for header in repd.headers() {
        if OUTPUT_COLUMNS.contains(&header.as_str()) {
            bail!(
                "REPD table already has a column named {:?}; it would clash with the match results",
                header
            );
        }
    }

    let mut headers: Vec<String> = OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect();
    headers.extend(repd.headers().iter().cloned());

    let mut rows = Vec::with_capacity(matches.len());
    for project_match in matches {
        let source = repd.row(project_match.project_row).with_context(|| {
            format!(
                "Match refers to REPD row {} but the table has {} rows",
                project_match.project_row,
                repd.len()
            )
        })?;
        let [connection_id, reason, project_details, connection_details] =
            project_match.outcome.result_fields();
        let mut row = vec![connection_details, project_details, reason, connection_id];
        row.extend(source.iter().cloned());
        rows.push(row);
    }

    Table::new(headers, rows)
}
