//! Index entries, detail records and output rows

use serde::{Deserialize, Serialize};

/// An index entry with a stable identifier used to build its detail URL
pub trait Identified {
    fn identifier(&self) -> &str;
}

/// Substitute an identifier into a detail URL template
pub fn detail_url(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

/// One row of the guest (adsorbate) index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestEntry {
    #[serde(rename = "InChIKey")]
    pub inchikey: String,
    #[serde(default)]
    pub name: String,
}

impl Identified for GuestEntry {
    fn identifier(&self) -> &str {
        &self.inchikey
    }
}

/// One row of the host (adsorbent) index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEntry {
    pub hashkey: String,
    #[serde(default)]
    pub name: String,
}

impl Identified for HostEntry {
    fn identifier(&self) -> &str {
        &self.hashkey
    }
}

/// One row of the isotherm index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentEntry {
    pub filename: String,
}

impl Identified for ExperimentEntry {
    fn identifier(&self) -> &str {
        &self.filename
    }
}

/// Full guest payload fetched by InChIKey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestDetail {
    #[serde(rename = "InChIKey")]
    pub inchikey: String,
    pub name: String,
    #[serde(rename = "InChICode", default)]
    pub inchicode: Option<String>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Full host payload fetched by hashkey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostDetail {
    pub hashkey: String,
    pub name: String,
    #[serde(default)]
    pub formula: Option<String>,
}

/// A species to resolve physical/chemical properties for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesQuery {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// Per-species properties, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestProperties {
    pub name: String,
    pub molecular_weight: Option<f64>,
    pub molecular_formula: Option<String>,
    pub canonical_smiles: Option<String>,
}

/// Row of `guests_dataset.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRow {
    pub name: String,
    /// Synonyms joined with `|`; absent for species only known from experiments
    pub synonyms: Option<String>,
    pub molecular_weight: Option<f64>,
    pub molecular_formula: Option<String>,
    pub canonical_smiles: Option<String>,
}

/// Row of `hosts_dataset.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRow {
    pub name: String,
}

/// Row of `single_component_adsorption.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleComponentRow {
    pub filename: String,
    pub temperature: f32,
    #[serde(rename = "adsorptionUnits")]
    pub adsorption_units: String,
    #[serde(rename = "pressureUnits")]
    pub pressure_units: String,
    pub adsorbent_name: String,
    pub adsorbate_name: String,
    pub pressure: f32,
    pub adsorbed_amount: f32,
    pub composition: f32,
}

/// Row of `binary_mixture_adsorption.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryMixtureRow {
    pub filename: String,
    pub temperature: f32,
    #[serde(rename = "adsorptionUnits")]
    pub adsorption_units: String,
    #[serde(rename = "pressureUnits")]
    pub pressure_units: String,
    pub adsorbent_name: String,
    pub compound_1: String,
    pub compound_2: String,
    pub compound_1_composition: f32,
    pub compound_2_composition: f32,
    pub compound_1_pressure: f32,
    pub compound_2_pressure: f32,
    pub compound_1_adsorption: f32,
    pub compound_2_adsorption: f32,
}
