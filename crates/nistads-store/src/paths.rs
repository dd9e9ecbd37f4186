//! Path resolution for the data directory

use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "NISTADS_DATA_DIR";

/// Resolves standard paths for persisted datasets
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve the data directory from `NISTADS_DATA_DIR`, else the platform data dir
    pub fn new() -> std::io::Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(Self::with_root(PathBuf::from(dir)));
        }

        let base = dirs::data_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found")
        })?;

        Ok(Self::with_root(base.join("nistads")))
    }

    pub fn with_root(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn single_component_file(&self) -> PathBuf {
        self.data_dir.join("single_component_adsorption.csv")
    }

    pub fn binary_mixture_file(&self) -> PathBuf {
        self.data_dir.join("binary_mixture_adsorption.csv")
    }

    pub fn guests_file(&self) -> PathBuf {
        self.data_dir.join("guests_dataset.csv")
    }

    pub fn hosts_file(&self) -> PathBuf {
        self.data_dir.join("hosts_dataset.csv")
    }

    /// Get runs.jsonl path
    pub fn runs_file(&self) -> PathBuf {
        self.data_dir.join("runs.jsonl")
    }
}
