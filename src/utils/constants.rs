// src/utils/constants.rs

/// Radius of the search buffer drawn around each REPD site.
pub const BUFFER_DISTANCE_KM: f64 = 2.0;

/// Allowed capacity difference as a fraction of the REPD capacity.
pub const CAPACITY_TOLERANCE: f64 = 0.1; // 10%

/// Minimum token-sort similarity (0-100) for a text group to count.
pub const TEXT_SIMILARITY_THRESHOLD: f64 = 70.0;

pub const METERS_PER_KM: f64 = 1000.0;

/// Only ECR records with this energy source are eligible candidates.
pub const SOLAR_ENERGY_SOURCE: &str = "solar";

/// Written to every result column of an unmatched REPD record.
pub const NOT_FOUND: &str = "NF";

pub const EXPORT_FILE_PREFIX: &str = "REPD_ECR_match_projectID";
