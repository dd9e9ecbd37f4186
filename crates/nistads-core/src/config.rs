//! Configuration for a collection run

use serde::{Deserialize, Serialize};
use std::path::Path;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Sampling fractions and request limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Fraction of the guest index to fetch details for (0-1)
    #[serde(rename = "GUEST_FRACTION")]
    pub guest_fraction: f64,

    /// Fraction of the host index to fetch details for (0-1)
    #[serde(rename = "HOST_FRACTION")]
    pub host_fraction: f64,

    /// Fraction of the isotherm index to fetch experiments for (0-1)
    #[serde(rename = "EXPERIMENT_FRACTION")]
    pub experiment_fraction: f64,

    /// Max requests in flight at once
    #[serde(rename = "PARALLEL_TASKS")]
    pub parallel_tasks: usize,

    /// Per-request timeout
    #[serde(rename = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self {
            guest_fraction: 1.0,
            host_fraction: 1.0,
            experiment_fraction: 0.05,
            parallel_tasks: 20,
            request_timeout_secs: 30,
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Remote API locations. Detail URLs carry an `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub status_url: String,
    pub guest_index_url: String,
    pub host_index_url: String,
    pub experiment_index_url: String,
    pub guest_detail_url: String,
    pub host_detail_url: String,
    pub experiment_detail_url: String,
    /// PubChem PUG-REST compound-by-name base
    pub property_url: String,
}

impl Endpoints {
    pub fn new() -> Self {
        Self {
            status_url: "https://adsorption.nist.gov/isodb/api/gases.json".to_string(),
            guest_index_url: "https://adsorption.nist.gov/isodb/api/gases.json".to_string(),
            host_index_url: "https://adsorption.nist.gov/matdb/api/materials.json".to_string(),
            experiment_index_url: "https://adsorption.nist.gov/isodb/api/isotherms.json"
                .to_string(),
            guest_detail_url: "https://adsorption.nist.gov/isodb/api/gas/{id}.json".to_string(),
            host_detail_url: "https://adsorption.nist.gov/isodb/api/material/{id}.json"
                .to_string(),
            experiment_detail_url: "https://adsorption.nist.gov/isodb/api/isotherm/{id}.json"
                .to_string(),
            property_url: "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name".to_string(),
        }
    }

    /// Point every NIST endpoint at another host (mock servers, mirrors)
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            status_url: format!("{base}/isodb/api/gases.json"),
            guest_index_url: format!("{base}/isodb/api/gases.json"),
            host_index_url: format!("{base}/matdb/api/materials.json"),
            experiment_index_url: format!("{base}/isodb/api/isotherms.json"),
            guest_detail_url: format!("{base}/isodb/api/gas/{{id}}.json"),
            host_detail_url: format!("{base}/isodb/api/material/{{id}}.json"),
            experiment_detail_url: format!("{base}/isodb/api/isotherm/{{id}}.json"),
            property_url: format!("{base}/rest/pug/compound/name"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do when a binary-mixture point lists fewer than two species
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MissingSpeciesPolicy {
    /// Substitute fixed values for the missing species
    Placeholder { composition: f64, adsorption: f64 },
    /// Leave the missing species absent so the row is dropped
    DropPoint,
}

impl Default for MissingSpeciesPolicy {
    fn default() -> Self {
        MissingSpeciesPolicy::Placeholder {
            composition: 1.0,
            adsorption: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    pub missing_species: MissingSpeciesPolicy,
}

/// Run configuration, passed explicitly to every component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collection: CollectionConfig,
    pub endpoints: Endpoints,
    pub normalization: NormalizationConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("GUEST_FRACTION", self.collection.guest_fraction),
            ("HOST_FRACTION", self.collection.host_fraction),
            ("EXPERIMENT_FRACTION", self.collection.experiment_fraction),
        ];
        for (key, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.collection.parallel_tasks == 0 {
            return Err(ConfigError::Invalid(
                "PARALLEL_TASKS must be a positive integer".to_string(),
            ));
        }

        if self.collection.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "REQUEST_TIMEOUT_SECS must be a positive integer".to_string(),
            ));
        }

        let templates = [
            ("guest_detail_url", &self.endpoints.guest_detail_url),
            ("host_detail_url", &self.endpoints.host_detail_url),
            ("experiment_detail_url", &self.endpoints.experiment_detail_url),
        ];
        for (key, template) in templates {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must contain the {ID_PLACEHOLDER} placeholder"
                )));
            }
        }

        Ok(())
    }
}
