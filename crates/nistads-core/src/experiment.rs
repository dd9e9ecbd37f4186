//! Adsorption isotherm experiments as served by the API, and their
//! classification by mixture complexity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsorbentRef {
    pub hashkey: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsorbateRef {
    #[serde(rename = "InChIKey")]
    pub inchikey: String,
    pub name: String,
}

/// Per-species measurement inside a mixture isotherm point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesPoint {
    #[serde(rename = "InChIKey", default)]
    pub inchikey: Option<String>,
    #[serde(default)]
    pub composition: Option<f64>,
    #[serde(default)]
    pub adsorption: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsothermPoint {
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub total_adsorption: Option<f64>,
    #[serde(default)]
    pub species_data: Vec<SpeciesPoint>,
}

/// One raw experiment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExperiment {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(rename = "adsorptionUnits", default)]
    pub adsorption_units: Option<String>,
    #[serde(rename = "pressureUnits", default)]
    pub pressure_units: Option<String>,
    pub adsorbent: AdsorbentRef,
    #[serde(default)]
    pub adsorbates: Vec<AdsorbateRef>,
    #[serde(default)]
    pub isotherm_data: Vec<IsothermPoint>,
}

impl RawExperiment {
    /// Number of adsorbate species in the experiment
    pub fn mixture_complexity(&self) -> usize {
        self.adsorbates.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleComponentExperiment {
    pub filename: String,
    pub temperature: Option<f64>,
    pub adsorption_units: Option<String>,
    pub pressure_units: Option<String>,
    pub adsorbent: AdsorbentRef,
    pub adsorbate: AdsorbateRef,
    pub isotherm_data: Vec<IsothermPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMixtureExperiment {
    pub filename: String,
    pub temperature: Option<f64>,
    pub adsorption_units: Option<String>,
    pub pressure_units: Option<String>,
    pub adsorbent: AdsorbentRef,
    pub adsorbates: [AdsorbateRef; 2],
    pub isotherm_data: Vec<IsothermPoint>,
}

/// Experiment shape, decided once from the adsorbate count
#[derive(Debug, Clone, PartialEq)]
pub enum Experiment {
    SingleComponent(SingleComponentExperiment),
    BinaryMixture(BinaryMixtureExperiment),
}

impl Experiment {
    /// Returns `None` for any complexity other than 1 or 2
    pub fn classify(raw: RawExperiment) -> Option<Self> {
        let RawExperiment {
            filename,
            temperature,
            adsorption_units,
            pressure_units,
            adsorbent,
            adsorbates,
            isotherm_data,
        } = raw;

        let mut adsorbates = adsorbates.into_iter();
        match (adsorbates.next(), adsorbates.next(), adsorbates.next()) {
            (Some(adsorbate), None, None) => {
                Some(Experiment::SingleComponent(SingleComponentExperiment {
                    filename,
                    temperature,
                    adsorption_units,
                    pressure_units,
                    adsorbent,
                    adsorbate,
                    isotherm_data,
                }))
            }
            (Some(first), Some(second), None) => {
                Some(Experiment::BinaryMixture(BinaryMixtureExperiment {
                    filename,
                    temperature,
                    adsorption_units,
                    pressure_units,
                    adsorbent,
                    adsorbates: [first, second],
                    isotherm_data,
                }))
            }
            _ => None,
        }
    }
}
