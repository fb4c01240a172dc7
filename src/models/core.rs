// src/models/core.rs - REPD and ECR record types and their table bindings
use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::dataset::normalize::{coerce_numeric_column, coerce_text_column};
use crate::dataset::Table;
use crate::matching::geospatial::Point;
use crate::utils::constants::SOLAR_ENERGY_SOURCE;

/// Column names of the REPD (planning register) table.
#[derive(Debug, Clone, PartialEq)]
pub struct RepdColumns {
    pub id: String,
    pub x: String,
    pub y: String,
    pub capacity: String,
    pub operator: String,
    pub site_name: String,
    pub address: String,
    pub postcode: String,
}

impl Default for RepdColumns {
    fn default() -> Self {
        Self {
            id: "REPD_ID".to_string(),
            x: "X-coordinate".to_string(),
            y: "Y-coordinate".to_string(),
            capacity: "Installed Capacity (MWelec)".to_string(),
            operator: "Operator (or Applicant)".to_string(),
            site_name: "Site Name".to_string(),
            address: "Address".to_string(),
            postcode: "Post Code".to_string(),
        }
    }
}

/// Column names of the ECR (embedded capacity register) table.
#[derive(Debug, Clone, PartialEq)]
pub struct EcrColumns {
    pub id: String,
    pub energy_source: String,
    pub x: String,
    pub y: String,
    pub capacity: String,
    pub customer_name: String,
    pub customer_site: String,
    pub address_line: String,
    pub postcode: String,
}

impl Default for EcrColumns {
    fn default() -> Self {
        Self {
            id: "ECR_ID".to_string(),
            energy_source: "Energy_Source_1".to_string(),
            x: "Location__X_coordinate___Eastin".to_string(),
            y: "Location__y_coordinate___Northi".to_string(),
            capacity: "Accepted_to_Connect_Registered_".to_string(),
            customer_name: "Customer_Name".to_string(),
            customer_site: "Customer_Site".to_string(),
            address_line: "Address_Line_1".to_string(),
            postcode: "Postcode".to_string(),
        }
    }
}

fn require_columns(table: &Table, dataset: &str, columns: &[&str]) -> Result<()> {
    let missing: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| !table.has_column(c))
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} table is missing required column(s) {:?}; available columns: {:?}",
            dataset,
            missing,
            table.headers()
        );
    }
    Ok(())
}

/// One REPD planning entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    /// Row position in the source REPD table.
    pub row: usize,
    pub id: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub capacity: Option<f64>,
    pub operator: String,
    pub site_name: String,
    pub address: String,
    pub postcode: String,
}

impl ProjectRecord {
    /// Builds one record per table row. Fails only when the id or coordinate
    /// columns are absent altogether; bad values become missing.
    pub fn from_table(table: &Table, columns: &RepdColumns) -> Result<Vec<Self>> {
        require_columns(
            table,
            "REPD",
            &[columns.id.as_str(), columns.x.as_str(), columns.y.as_str()],
        )
        .context("Cannot build REPD point geometries")?;

        let ids = coerce_numeric_column(table, &columns.id);
        let xs = coerce_numeric_column(table, &columns.x);
        let ys = coerce_numeric_column(table, &columns.y);
        let capacities = coerce_numeric_column(table, &columns.capacity);
        let operators = coerce_text_column(table, &columns.operator);
        let site_names = coerce_text_column(table, &columns.site_name);
        let addresses = coerce_text_column(table, &columns.address);
        let postcodes = coerce_text_column(table, &columns.postcode);

        Ok((0..table.len())
            .map(|row| ProjectRecord {
                row,
                id: ids[row],
                x: xs[row],
                y: ys[row],
                capacity: capacities[row],
                operator: operators[row].clone(),
                site_name: site_names[row].clone(),
                address: addresses[row].clone(),
                postcode: postcodes[row].clone(),
            })
            .collect())
    }

    pub fn point(&self) -> Option<Point> {
        Point::from_coords(self.x, self.y)
    }
}

/// One ECR grid-connection application.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRecord {
    /// Row position in the source ECR table.
    pub row: usize,
    /// Raw identifier cell, reported verbatim in the output.
    pub id: String,
    pub energy_source: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub capacity: Option<f64>,
    pub customer_name: String,
    pub customer_site: String,
    pub address_line: String,
    pub postcode: String,
}

impl ConnectionRecord {
    pub fn from_table(table: &Table, columns: &EcrColumns) -> Result<Vec<Self>> {
        require_columns(
            table,
            "ECR",
            &[
                columns.id.as_str(),
                columns.energy_source.as_str(),
                columns.x.as_str(),
                columns.y.as_str(),
            ],
        )
        .context("Cannot build ECR point geometries")?;

        let ids = coerce_text_column(table, &columns.id);
        let sources = coerce_text_column(table, &columns.energy_source);
        let xs = coerce_numeric_column(table, &columns.x);
        let ys = coerce_numeric_column(table, &columns.y);
        let capacities = coerce_numeric_column(table, &columns.capacity);
        let names = coerce_text_column(table, &columns.customer_name);
        let sites = coerce_text_column(table, &columns.customer_site);
        let address_lines = coerce_text_column(table, &columns.address_line);
        let postcodes = coerce_text_column(table, &columns.postcode);

        Ok((0..table.len())
            .map(|row| ConnectionRecord {
                row,
                id: ids[row].clone(),
                energy_source: sources[row].clone(),
                x: xs[row],
                y: ys[row],
                capacity: capacities[row],
                customer_name: names[row].clone(),
                customer_site: sites[row].clone(),
                address_line: address_lines[row].clone(),
                postcode: postcodes[row].clone(),
            })
            .collect())
    }

    /// Case-insensitive equality with "solar"; surrounding text is not trimmed.
    pub fn is_solar(&self) -> bool {
        self.energy_source.to_lowercase() == SOLAR_ENERGY_SOURCE
    }

    pub fn point(&self) -> Option<Point> {
        Point::from_coords(self.x, self.y)
    }
}

/// Inclusive REPD id range requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdRange {
    pub start_id: i64,
    pub end_id: i64,
}

impl IdRange {
    pub fn new(start_id: i64, end_id: i64) -> Self {
        Self { start_id, end_id }
    }

    /// Parses user-supplied bounds. Either bound failing to parse as an
    /// integer aborts the run.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_id = start
            .trim()
            .parse::<i64>()
            .with_context(|| format!("REPD_ID range must be numeric: start id {:?}", start))?;
        let end_id = end
            .trim()
            .parse::<i64>()
            .with_context(|| format!("REPD_ID range must be numeric: end id {:?}", end))?;
        Ok(Self { start_id, end_id })
    }

    pub fn contains(&self, id: f64) -> bool {
        id >= self.start_id as f64 && id <= self.end_id as f64
    }

    pub fn is_empty(&self) -> bool {
        self.start_id > self.end_id
    }
}
