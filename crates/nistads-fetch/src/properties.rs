//! Guest species property lookup

use crate::{fetch_all, Transport};
use async_trait::async_trait;
use nistads_core::{GuestProperties, SpeciesQuery};
use serde::Deserialize;
use serde_json::Value;

const PROPERTY_LIST: &str = "MolecularWeight,MolecularFormula,CanonicalSMILES";

/// Resolves physical/chemical properties for a set of species. Species
/// that cannot be resolved are simply missing from the output.
#[async_trait]
pub trait PropertyLookup: Send + Sync {
    async fn lookup(&self, queries: &[SpeciesQuery]) -> Vec<GuestProperties>;
}

#[derive(Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    table: PropertyTable,
}

#[derive(Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<CompoundProperties>,
}

#[derive(Deserialize)]
struct CompoundProperties {
    #[serde(rename = "MolecularWeight", default)]
    molecular_weight: Option<Value>,
    #[serde(rename = "MolecularFormula", default)]
    molecular_formula: Option<String>,
    #[serde(rename = "CanonicalSMILES", default)]
    canonical_smiles: Option<String>,
    // Newer PUG-REST responses report canonical SMILES under this key
    #[serde(rename = "ConnectivitySMILES", default)]
    connectivity_smiles: Option<String>,
}

/// PubChem PUG-REST lookup by compound name, falling back to the first
/// synonym for names PubChem does not know.
pub struct PubChemLookup<'a, T: Transport + ?Sized> {
    transport: &'a T,
    base_url: String,
    concurrency: usize,
}

impl<'a, T: Transport + ?Sized> PubChemLookup<'a, T> {
    pub fn new(transport: &'a T, base_url: &str, concurrency: usize) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
            concurrency,
        }
    }

    fn property_url(&self, name: &str) -> Option<String> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(name)
            .extend(["property", PROPERTY_LIST, "JSON"]);
        Some(url.to_string())
    }

    /// One slot per name; names without a usable URL are never requested
    async fn resolve(&self, names: &[&str]) -> Vec<Option<CompoundProperties>> {
        let mut slots = Vec::new();
        let mut urls = Vec::new();
        for (idx, name) in names.iter().enumerate() {
            match self.property_url(name) {
                Some(url) => {
                    slots.push(idx);
                    urls.push(url);
                }
                None => tracing::warn!(
                    "Cannot build property URL for {name} from base {}",
                    self.base_url
                ),
            }
        }

        let mut resolved: Vec<Option<CompoundProperties>> =
            std::iter::repeat_with(|| None).take(names.len()).collect();
        let payloads = fetch_all(self.transport, &urls, self.concurrency).await;
        for (idx, payload) in slots.into_iter().zip(payloads) {
            resolved[idx] = payload.and_then(|value| {
                let response: PropertyResponse = serde_json::from_value(value).ok()?;
                response.table.properties.into_iter().next()
            });
        }
        resolved
    }
}

fn parse_weight(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl<T: Transport + ?Sized> PropertyLookup for PubChemLookup<'_, T> {
    async fn lookup(&self, queries: &[SpeciesQuery]) -> Vec<GuestProperties> {
        let names: Vec<&str> = queries.iter().map(|q| q.name.as_str()).collect();
        let mut resolved = self.resolve(&names).await;

        let retry: Vec<(usize, &str)> = resolved
            .iter()
            .enumerate()
            .filter(|(_, props)| props.is_none())
            .filter_map(|(idx, _)| queries[idx].synonyms.first().map(|s| (idx, s.as_str())))
            .collect();

        if !retry.is_empty() {
            tracing::debug!("Retrying {} species by synonym", retry.len());
            let synonyms: Vec<&str> = retry.iter().map(|(_, s)| *s).collect();
            let second = self.resolve(&synonyms).await;
            for ((idx, _), props) in retry.iter().zip(second) {
                resolved[*idx] = props;
            }
        }

        let properties: Vec<GuestProperties> = queries
            .iter()
            .zip(resolved)
            .filter_map(|(query, props)| {
                let props = props?;
                Some(GuestProperties {
                    name: query.name.clone(),
                    molecular_weight: parse_weight(props.molecular_weight),
                    molecular_formula: props.molecular_formula,
                    canonical_smiles: props.canonical_smiles.or(props.connectivity_smiles),
                })
            })
            .collect();

        tracing::info!(
            "Resolved properties for {} of {} species",
            properties.len(),
            queries.len()
        );
        properties
    }
}
