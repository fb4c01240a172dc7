// src/dataset/csv_io.rs - CSV collaborator for loading input tables and exporting results
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::dataset::table::Table;
use crate::utils::constants::EXPORT_FILE_PREFIX;

pub fn read_table(path: &Path) -> Result<Table> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open input table {}", path.display()))?;
    let table = read_table_from_reader(file)
        .with_context(|| format!("Failed to parse input table {}", path.display()))?;
    info!(
        "📄 Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

pub fn read_table_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read data row {}", i + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!("Parsed {} data rows with headers {:?}", rows.len(), headers);

    Table::new(headers, rows)
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    info!("💾 Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// `REPD_ECR_match_projectID_{start}_to_{end}`, without extension.
pub fn export_stem(start_id: i64, end_id: i64) -> String {
    format!("{}_{}_to_{}", EXPORT_FILE_PREFIX, start_id, end_id)
}

pub fn export_path(output_dir: &Path, start_id: i64, end_id: i64) -> PathBuf {
    output_dir.join(format!("{}.csv", export_stem(start_id, end_id)))
}

pub fn summary_path(output_dir: &Path, start_id: i64, end_id: i64) -> PathBuf {
    output_dir.join(format!("{}.summary.json", export_stem(start_id, end_id)))
}
