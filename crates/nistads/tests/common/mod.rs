use async_trait::async_trait;
use nistads_core::{Endpoints, GuestProperties, SpeciesQuery};
use nistads_fetch::{FetchError, PropertyLookup, Transport, TransportResponse};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

pub const BASE: &str = "https://isodb.test";

/// Serves canned JSON bodies by URL; anything else is a 404
#[derive(Default)]
pub struct MapTransport {
    bodies: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MapTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MapTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(match self.bodies.get(url) {
            Some(body) => TransportResponse {
                status: 200,
                body: body.clone(),
            },
            None => TransportResponse {
                status: 404,
                body: String::new(),
            },
        })
    }
}

/// Property lookup backed by a fixed name -> molecular weight table
pub struct WeightTable(pub Vec<(&'static str, f64)>);

#[async_trait]
impl PropertyLookup for WeightTable {
    async fn lookup(&self, queries: &[SpeciesQuery]) -> Vec<GuestProperties> {
        queries
            .iter()
            .filter_map(|q| {
                let (_, weight) = self
                    .0
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&q.name))?;
                Some(GuestProperties {
                    name: q.name.clone(),
                    molecular_weight: Some(*weight),
                    molecular_formula: None,
                    canonical_smiles: None,
                })
            })
            .collect()
    }
}

pub fn endpoints() -> Endpoints {
    Endpoints::with_base(BASE)
}

pub fn single_component(filename: &str, gas: &str, points: &[(f64, f64)]) -> Value {
    let data: Vec<Value> = points
        .iter()
        .map(|(p, q)| json!({"pressure": p, "total_adsorption": q}))
        .collect();
    json!({
        "filename": filename,
        "temperature": 298.15,
        "adsorptionUnits": "mmol/g",
        "pressureUnits": "bar",
        "adsorbent": {"hashkey": "H1", "name": "ZIF-8"},
        "adsorbates": [{"InChIKey": format!("{gas}-KEY"), "name": gas}],
        "isotherm_data": data
    })
}

pub fn binary_mixture(filename: &str, gases: [&str; 2], points: &[(f64, f64, f64)]) -> Value {
    let data: Vec<Value> = points
        .iter()
        .map(|(p, x1, q1)| {
            json!({
                "pressure": p,
                "total_adsorption": q1 * 2.0,
                "species_data": [
                    {"InChIKey": format!("{}-KEY", gases[0]), "composition": x1, "adsorption": q1},
                    {"InChIKey": format!("{}-KEY", gases[1]), "composition": 1.0 - x1, "adsorption": q1}
                ]
            })
        })
        .collect();
    json!({
        "filename": filename,
        "temperature": 308.0,
        "adsorptionUnits": "mmol/g",
        "pressureUnits": "bar",
        "adsorbent": {"hashkey": "H1", "name": "ZIF-8"},
        "adsorbates": [
            {"InChIKey": format!("{}-KEY", gases[0]), "name": gases[0]},
            {"InChIKey": format!("{}-KEY", gases[1]), "name": gases[1]}
        ],
        "isotherm_data": data
    })
}
