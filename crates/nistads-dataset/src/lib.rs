//! Reshaping of raw experiments and species records into training datasets

mod assemble;
mod error;
mod normalize;
mod species;

pub use assemble::{
    assemble_guest_dataset, assemble_host_dataset, dedup_species_names, merge_guest_properties,
};
pub use error::NormalizeError;
pub use normalize::{ExperimentNormalizer, NormalizationReport, NormalizedDatasets};
pub use species::extract_species_names;
