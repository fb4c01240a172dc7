// src/utils/match_config.rs - Tunable matching parameters
use anyhow::{bail, Result};
use log::{info, warn};
use std::env;

use crate::models::core::{EcrColumns, RepdColumns};
use crate::models::stats_models::RunParameters;
use crate::utils::constants::{BUFFER_DISTANCE_KM, CAPACITY_TOLERANCE, TEXT_SIMILARITY_THRESHOLD};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Search radius around each REPD site, in kilometres.
    pub buffer_distance_km: f64,
    /// Capacity tolerance as a fraction of the REPD capacity.
    pub capacity_tolerance: f64,
    /// Inclusive token-sort similarity threshold on a 0-100 scale.
    pub text_similarity_threshold: f64,
    pub repd_columns: RepdColumns,
    pub ecr_columns: EcrColumns,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            buffer_distance_km: BUFFER_DISTANCE_KM,
            capacity_tolerance: CAPACITY_TOLERANCE,
            text_similarity_threshold: TEXT_SIMILARITY_THRESHOLD,
            repd_columns: RepdColumns::default(),
            ecr_columns: EcrColumns::default(),
        }
    }
}

impl MatchConfig {
    /// Create configuration from environment variables. Unset variables keep
    /// their defaults; unusable values are reported and ignored.
    pub fn from_env() -> Self {
        Self {
            buffer_distance_km: env_f64("MATCH_BUFFER_DISTANCE_KM", BUFFER_DISTANCE_KM),
            capacity_tolerance: env_f64("MATCH_CAPACITY_TOLERANCE", CAPACITY_TOLERANCE),
            text_similarity_threshold: env_f64(
                "MATCH_TEXT_SIMILARITY_THRESHOLD",
                TEXT_SIMILARITY_THRESHOLD,
            ),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("buffer distance (km)", self.buffer_distance_km),
            ("capacity tolerance", self.capacity_tolerance),
            ("text similarity threshold", self.text_similarity_threshold),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                bail!("Invalid {}: {} (must be a non-negative number)", name, value);
            }
        }
        if self.text_similarity_threshold > 100.0 {
            bail!(
                "Invalid text similarity threshold: {} (scale is 0-100)",
                self.text_similarity_threshold
            );
        }
        Ok(())
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("⚙️  Matching configuration:");
        info!("   • Search buffer: {} km", self.buffer_distance_km);
        info!(
            "   • Capacity tolerance: {:.1}% of REPD capacity",
            self.capacity_tolerance * 100.0
        );
        info!(
            "   • Text similarity threshold: {}",
            self.text_similarity_threshold
        );
    }

    pub fn parameters(&self) -> RunParameters {
        RunParameters {
            buffer_distance_km: self.buffer_distance_km,
            capacity_tolerance: self.capacity_tolerance,
            text_similarity_threshold: self.text_similarity_threshold,
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                warn!(
                    "Ignoring {}={:?}: not a non-negative number, using default {}",
                    name, raw, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.buffer_distance_km, 2.0);
        assert_eq!(config.capacity_tolerance, 0.1);
        assert_eq!(config.text_similarity_threshold, 70.0);
        assert_eq!(config.repd_columns.id, "REPD_ID");
        assert_eq!(config.ecr_columns.id, "ECR_ID");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_config() {
        env::set_var("MATCH_BUFFER_DISTANCE_KM", "3.5");
        env::set_var("MATCH_CAPACITY_TOLERANCE", "not-a-number");
        env::set_var("MATCH_TEXT_SIMILARITY_THRESHOLD", "-5");

        let config = MatchConfig::from_env();
        assert_eq!(config.buffer_distance_km, 3.5);
        assert_eq!(config.capacity_tolerance, CAPACITY_TOLERANCE);
        assert_eq!(config.text_similarity_threshold, TEXT_SIMILARITY_THRESHOLD);

        env::remove_var("MATCH_BUFFER_DISTANCE_KM");
        env::remove_var("MATCH_CAPACITY_TOLERANCE");
        env::remove_var("MATCH_TEXT_SIMILARITY_THRESHOLD");
    }

    #[test]
    fn test_validate_rejects_bad_overrides() {
        let config = MatchConfig {
            buffer_distance_km: -1.0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            text_similarity_threshold: 101.0,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            capacity_tolerance: f64::NAN,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parameters_mirror_config() {
        let config = MatchConfig {
            buffer_distance_km: 5.0,
            ..MatchConfig::default()
        };
        let params = config.parameters();
        assert_eq!(params.buffer_distance_km, 5.0);
        assert_eq!(params.capacity_tolerance, 0.1);
        assert_eq!(params.text_similarity_threshold, 70.0);
    }
}
