//! Species names seen in previously persisted adsorption datasets

use nistads_store::{read_column_values, Paths};
use std::collections::BTreeSet;

const SINGLE_COMPONENT_COLUMNS: &[&str] = &["adsorbate_name"];
const BINARY_MIXTURE_COLUMNS: &[&str] = &["compound_1", "compound_2"];

/// Sorted, unique species names from the single-component and
/// binary-mixture datasets. Missing files contribute nothing.
pub fn extract_species_names(paths: &Paths) -> std::io::Result<Vec<String>> {
    let single_component = paths.single_component_file();
    let binary_mixture = paths.binary_mixture_file();

    if !single_component.exists() && !binary_mixture.exists() {
        tracing::info!(
            "Adsorption experiments dataset has not been found. Species names will not be retrieved"
        );
        return Ok(Vec::new());
    }

    let mut names = BTreeSet::new();
    names.extend(read_column_values(&single_component, SINGLE_COMPONENT_COLUMNS)?);
    names.extend(read_column_values(&binary_mixture, BINARY_MIXTURE_COLUMNS)?);

    Ok(names.into_iter().collect())
}
