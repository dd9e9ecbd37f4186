//! Guest and host dataset assembly

use nistads_core::{GuestDetail, GuestProperties, GuestRow, HostDetail, HostRow, SpeciesQuery};
use nistads_fetch::PropertyLookup;
use std::collections::{HashMap, HashSet};

const SYNONYM_SEPARATOR: &str = "|";

/// Identity of a species name for de-duplication and joins
fn species_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Union of guest names and extra species names, de-duplicated
/// case-insensitively. First occurrence wins and keeps its synonyms.
pub fn dedup_species_names(
    guests: &[GuestDetail],
    extra_species: &[String],
) -> Vec<SpeciesQuery> {
    let mut seen = HashSet::new();
    let mut queries = Vec::new();

    let known = guests.iter().map(|g| (g.name.as_str(), g.synonyms.clone()));
    let extra = extra_species.iter().map(|name| (name.as_str(), Vec::new()));

    for (name, synonyms) in known.chain(extra) {
        let name = name.trim();
        if name.is_empty() || !seen.insert(species_key(name)) {
            continue;
        }
        queries.push(SpeciesQuery {
            name: name.to_string(),
            synonyms,
        });
    }

    queries
}

/// Outer join of property rows onto guest records by lower-cased name.
///
/// Every guest is kept, with absent properties when unmatched; property
/// rows that match no guest are appended with absent guest fields.
pub fn merge_guest_properties(
    guests: &[GuestDetail],
    properties: Vec<GuestProperties>,
) -> Vec<GuestRow> {
    let mut by_name: HashMap<String, GuestProperties> = HashMap::new();
    let mut order = Vec::new();
    for props in properties {
        let key = species_key(&props.name);
        if !by_name.contains_key(&key) {
            order.push(key.clone());
            by_name.insert(key, props);
        }
    }

    let mut matched = HashSet::new();
    let mut rows: Vec<GuestRow> = guests
        .iter()
        .map(|guest| {
            let name = species_key(&guest.name);
            let props = by_name.get(&name);
            if props.is_some() {
                matched.insert(name.clone());
            }
            GuestRow {
                synonyms: (!guest.synonyms.is_empty())
                    .then(|| guest.synonyms.join(SYNONYM_SEPARATOR)),
                molecular_weight: props.and_then(|p| p.molecular_weight),
                molecular_formula: props.and_then(|p| p.molecular_formula.clone()),
                canonical_smiles: props.and_then(|p| p.canonical_smiles.clone()),
                name,
            }
        })
        .collect();

    for key in order {
        if matched.contains(&key) {
            continue;
        }
        if let Some(props) = by_name.remove(&key) {
            rows.push(GuestRow {
                name: key,
                synonyms: None,
                molecular_weight: props.molecular_weight,
                molecular_formula: props.molecular_formula,
                canonical_smiles: props.canonical_smiles,
            });
        }
    }

    rows
}

/// De-duplicate species, look up their properties and outer-join them
/// onto the guest records
pub async fn assemble_guest_dataset(
    guests: &[GuestDetail],
    extra_species: &[String],
    lookup: &dyn PropertyLookup,
) -> Vec<GuestRow> {
    let queries = dedup_species_names(guests, extra_species);
    tracing::info!(
        "Looking up properties for {} unique species ({} from experiments)",
        queries.len(),
        extra_species.len()
    );

    let properties = lookup.lookup(&queries).await;
    merge_guest_properties(guests, properties)
}

/// Host records reduced to lower-cased names. Property enrichment for hosts
/// would hook in here.
pub fn assemble_host_dataset(hosts: &[HostDetail]) -> Vec<HostRow> {
    hosts
        .iter()
        .map(|host| HostRow {
            name: host.name.to_lowercase(),
        })
        .collect()
}
