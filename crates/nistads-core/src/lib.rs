//! Core data model and configuration for NIST adsorption data collection

mod config;
mod experiment;
mod types;

pub use config::{
    CollectionConfig, Config, ConfigError, Endpoints, MissingSpeciesPolicy, NormalizationConfig,
};
pub use experiment::{
    AdsorbateRef, AdsorbentRef, BinaryMixtureExperiment, Experiment, IsothermPoint,
    RawExperiment, SingleComponentExperiment, SpeciesPoint,
};
pub use types::{
    detail_url, BinaryMixtureRow, ExperimentEntry, GuestDetail, GuestEntry, GuestProperties,
    GuestRow, HostDetail, HostEntry, HostRow, Identified, SingleComponentRow, SpeciesQuery,
};
