//! Flattening of nested isotherm records into row-per-observation tables.
//!
//! Each record is classified once by mixture complexity, its nested
//! isotherm data is extracted into parallel columns, and the columns are
//! exploded into rows. All exploded columns of a record must have the same
//! length; a record that violates this is dropped from its group.

use crate::NormalizeError;
use nistads_core::{
    BinaryMixtureExperiment, BinaryMixtureRow, Experiment, MissingSpeciesPolicy,
    NormalizationConfig, RawExperiment, SingleComponentExperiment, SingleComponentRow,
    SpeciesPoint,
};

/// Counts gathered while normalizing one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    pub single_component_records: usize,
    pub binary_mixture_records: usize,
    /// Records whose complexity is neither 1 nor 2
    pub excluded_records: usize,
    /// Records dropped for misaligned columns
    pub malformed_records: usize,
    /// Rows dropped for a missing value
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedDatasets {
    pub single_component: Vec<SingleComponentRow>,
    pub binary_mixture: Vec<BinaryMixtureRow>,
    pub report: NormalizationReport,
}

/// Per-record fields repeated on every exploded row
struct RecordMeta {
    filename: String,
    temperature: Option<f32>,
    adsorption_units: Option<String>,
    pressure_units: Option<String>,
    adsorbent_name: String,
}

impl RecordMeta {
    fn new(
        filename: &str,
        temperature: Option<f64>,
        adsorption_units: &Option<String>,
        pressure_units: &Option<String>,
        adsorbent_name: &str,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            temperature: temperature.map(|t| t as f32),
            adsorption_units: adsorption_units.clone(),
            pressure_units: pressure_units.clone(),
            adsorbent_name: adsorbent_name.to_lowercase(),
        }
    }
}

struct SingleComponentColumns {
    pressure: Vec<Option<f64>>,
    adsorbed_amount: Vec<Option<f64>>,
}

struct BinaryMixtureColumns {
    compound_1_composition: Vec<Option<f64>>,
    compound_2_composition: Vec<Option<f64>>,
    compound_1_pressure: Vec<Option<f64>>,
    compound_2_pressure: Vec<Option<f64>>,
    compound_1_adsorption: Vec<Option<f64>>,
    compound_2_adsorption: Vec<Option<f64>>,
}

/// Stateless transform from raw experiments to normalized rows
#[derive(Debug, Clone, Default)]
pub struct ExperimentNormalizer {
    policy: MissingSpeciesPolicy,
}

impl ExperimentNormalizer {
    pub fn new(config: &NormalizationConfig) -> Self {
        Self::with_policy(config.missing_species)
    }

    pub fn with_policy(policy: MissingSpeciesPolicy) -> Self {
        Self { policy }
    }

    pub fn classify_and_flatten(&self, experiments: Vec<RawExperiment>) -> NormalizedDatasets {
        let mut out = NormalizedDatasets::default();

        for raw in experiments {
            match Experiment::classify(raw) {
                Some(Experiment::SingleComponent(exp)) => {
                    out.report.single_component_records += 1;
                    match explode_single(&exp, flatten_single(&exp)) {
                        Ok((rows, dropped)) => {
                            out.report.dropped_rows += dropped;
                            out.single_component.extend(rows);
                        }
                        Err(e) => {
                            tracing::warn!("{e}");
                            out.report.malformed_records += 1;
                        }
                    }
                }
                Some(Experiment::BinaryMixture(exp)) => {
                    out.report.binary_mixture_records += 1;
                    match explode_binary(&exp, self.flatten_binary(&exp)) {
                        Ok((rows, dropped)) => {
                            out.report.dropped_rows += dropped;
                            out.binary_mixture.extend(rows);
                        }
                        Err(e) => {
                            tracing::warn!("{e}");
                            out.report.malformed_records += 1;
                        }
                    }
                }
                None => out.report.excluded_records += 1,
            }
        }

        tracing::info!(
            "Normalized {} single-component rows and {} binary-mixture rows",
            out.single_component.len(),
            out.binary_mixture.len()
        );
        tracing::debug!("{:?}", out.report);

        out
    }

    fn missing_species(&self) -> SpeciesPoint {
        match self.policy {
            MissingSpeciesPolicy::Placeholder {
                composition,
                adsorption,
            } => SpeciesPoint {
                inchikey: None,
                composition: Some(composition),
                adsorption: Some(adsorption),
            },
            MissingSpeciesPolicy::DropPoint => SpeciesPoint::default(),
        }
    }

    fn flatten_binary(&self, exp: &BinaryMixtureExperiment) -> BinaryMixtureColumns {
        let points = &exp.isotherm_data;
        let total_pressure: Vec<Option<f64>> = points.iter().map(|p| p.pressure).collect();

        // Points without any species data contribute nothing to compound 1,
        // which leaves its columns short and marks the record malformed.
        let compound_1: Vec<SpeciesPoint> = points
            .iter()
            .filter_map(|p| p.species_data.first().cloned())
            .collect();
        let compound_2: Vec<SpeciesPoint> = points
            .iter()
            .map(|p| {
                p.species_data
                    .get(1)
                    .cloned()
                    .unwrap_or_else(|| self.missing_species())
            })
            .collect();

        let compound_1_composition: Vec<Option<f64>> =
            compound_1.iter().map(|s| s.composition).collect();
        let compound_2_composition: Vec<Option<f64>> =
            compound_2.iter().map(|s| s.composition).collect();

        BinaryMixtureColumns {
            compound_1_pressure: partial_pressures(&compound_1_composition, &total_pressure),
            compound_2_pressure: partial_pressures(&compound_2_composition, &total_pressure),
            compound_1_adsorption: compound_1.iter().map(|s| s.adsorption).collect(),
            compound_2_adsorption: compound_2.iter().map(|s| s.adsorption).collect(),
            compound_1_composition,
            compound_2_composition,
        }
    }
}

/// composition × total pressure, point by point
fn partial_pressures(composition: &[Option<f64>], total: &[Option<f64>]) -> Vec<Option<f64>> {
    composition
        .iter()
        .zip(total)
        .map(|(c, p)| Some((*c)? * (*p)?))
        .collect()
}

fn flatten_single(exp: &SingleComponentExperiment) -> SingleComponentColumns {
    SingleComponentColumns {
        pressure: exp.isotherm_data.iter().map(|p| p.pressure).collect(),
        adsorbed_amount: exp
            .isotherm_data
            .iter()
            .map(|p| p.total_adsorption)
            .collect(),
    }
}

/// Common length of all exploded columns, or `MalformedRecord`
fn aligned_length(filename: &str, columns: &[(&str, usize)]) -> Result<usize, NormalizeError> {
    let Some(&(_, expected)) = columns.first() else {
        return Ok(0);
    };

    for &(name, len) in columns {
        if len != expected {
            return Err(NormalizeError::MalformedRecord {
                filename: filename.to_string(),
                reason: format!("column {name} has {len} values, expected {expected}"),
            });
        }
    }
    Ok(expected)
}

fn cast(value: Option<f64>) -> Option<f32> {
    value.map(|v| v as f32).filter(|v| !v.is_nan())
}

fn explode_single(
    exp: &SingleComponentExperiment,
    columns: SingleComponentColumns,
) -> Result<(Vec<SingleComponentRow>, usize), NormalizeError> {
    let len = aligned_length(
        &exp.filename,
        &[
            ("pressure", columns.pressure.len()),
            ("adsorbed_amount", columns.adsorbed_amount.len()),
        ],
    )?;

    let meta = RecordMeta::new(
        &exp.filename,
        exp.temperature,
        &exp.adsorption_units,
        &exp.pressure_units,
        &exp.adsorbent.name,
    );
    let adsorbate_name = exp.adsorbate.name.to_lowercase();

    let rows: Vec<SingleComponentRow> = (0..len)
        .filter_map(|i| {
            Some(SingleComponentRow {
                filename: meta.filename.clone(),
                temperature: meta.temperature?,
                adsorption_units: meta.adsorption_units.clone()?,
                pressure_units: meta.pressure_units.clone()?,
                adsorbent_name: meta.adsorbent_name.clone(),
                adsorbate_name: adsorbate_name.clone(),
                pressure: cast(columns.pressure[i])?,
                adsorbed_amount: cast(columns.adsorbed_amount[i])?,
                composition: 1.0,
            })
        })
        .collect();

    let dropped = len - rows.len();
    Ok((rows, dropped))
}

fn explode_binary(
    exp: &BinaryMixtureExperiment,
    columns: BinaryMixtureColumns,
) -> Result<(Vec<BinaryMixtureRow>, usize), NormalizeError> {
    let len = aligned_length(
        &exp.filename,
        &[
            ("compound_1_pressure", columns.compound_1_pressure.len()),
            ("compound_2_pressure", columns.compound_2_pressure.len()),
            ("compound_1_adsorption", columns.compound_1_adsorption.len()),
            ("compound_2_adsorption", columns.compound_2_adsorption.len()),
            ("compound_1_composition", columns.compound_1_composition.len()),
            ("compound_2_composition", columns.compound_2_composition.len()),
        ],
    )?;

    let meta = RecordMeta::new(
        &exp.filename,
        exp.temperature,
        &exp.adsorption_units,
        &exp.pressure_units,
        &exp.adsorbent.name,
    );
    let compound_1 = exp.adsorbates[0].name.to_lowercase();
    let compound_2 = exp.adsorbates[1].name.to_lowercase();

    let rows: Vec<BinaryMixtureRow> = (0..len)
        .filter_map(|i| {
            Some(BinaryMixtureRow {
                filename: meta.filename.clone(),
                temperature: meta.temperature?,
                adsorption_units: meta.adsorption_units.clone()?,
                pressure_units: meta.pressure_units.clone()?,
                adsorbent_name: meta.adsorbent_name.clone(),
                compound_1: compound_1.clone(),
                compound_2: compound_2.clone(),
                compound_1_composition: cast(columns.compound_1_composition[i])?,
                compound_2_composition: cast(columns.compound_2_composition[i])?,
                compound_1_pressure: cast(columns.compound_1_pressure[i])?,
                compound_2_pressure: cast(columns.compound_2_pressure[i])?,
                compound_1_adsorption: cast(columns.compound_1_adsorption[i])?,
                compound_2_adsorption: cast(columns.compound_2_adsorption[i])?,
            })
        })
        .collect();

    let dropped = len - rows.len();
    Ok((rows, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nistads_core::{AdsorbateRef, AdsorbentRef, IsothermPoint};

    fn adsorbate(name: &str) -> AdsorbateRef {
        AdsorbateRef {
            inchikey: format!("{name}-KEY"),
            name: name.to_string(),
        }
    }

    fn experiment(
        filename: &str,
        adsorbates: &[&str],
        points: Vec<IsothermPoint>,
    ) -> RawExperiment {
        RawExperiment {
            filename: filename.to_string(),
            temperature: Some(298.15),
            adsorption_units: Some("mmol/g".to_string()),
            pressure_units: Some("bar".to_string()),
            adsorbent: AdsorbentRef {
                hashkey: "NIST-MATDB-1".to_string(),
                name: "ZIF-8".to_string(),
            },
            adsorbates: adsorbates.iter().copied().map(adsorbate).collect(),
            isotherm_data: points,
        }
    }

    fn single_point(pressure: f64, uptake: f64) -> IsothermPoint {
        IsothermPoint {
            pressure: Some(pressure),
            total_adsorption: Some(uptake),
            species_data: vec![],
        }
    }

    fn species(composition: f64, adsorption: f64) -> SpeciesPoint {
        SpeciesPoint {
            inchikey: None,
            composition: Some(composition),
            adsorption: Some(adsorption),
        }
    }

    fn mixture_point(pressure: f64, species_data: Vec<SpeciesPoint>) -> IsothermPoint {
        IsothermPoint {
            pressure: Some(pressure),
            total_adsorption: None,
            species_data,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_single_component_explodes_aligned_pairs() {
        let raw = experiment(
            "iso-1",
            &["Methane"],
            vec![
                single_point(1.0, 0.1),
                single_point(2.0, 0.2),
                single_point(3.0, 0.3),
            ],
        );

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert_eq!(out.single_component.len(), 3);
        assert!(out.binary_mixture.is_empty());
        for (row, (p, q)) in out
            .single_component
            .iter()
            .zip([(1.0, 0.1), (2.0, 0.2), (3.0, 0.3)])
        {
            assert_eq!(row.composition, 1.0);
            assert!(approx(row.pressure, p));
            assert!(approx(row.adsorbed_amount, q));
            assert_eq!(row.adsorbate_name, "methane");
            assert_eq!(row.adsorbent_name, "zif-8");
        }
    }

    #[test]
    fn test_binary_mixture_partial_pressures() {
        let raw = experiment(
            "iso-2",
            &["Methane", "Carbon Dioxide"],
            vec![mixture_point(
                10.0,
                vec![species(0.3, 0.5), species(0.7, 1.2)],
            )],
        );

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert_eq!(out.binary_mixture.len(), 1);
        let row = &out.binary_mixture[0];
        assert!(approx(row.compound_1_pressure, 3.0));
        assert!(approx(row.compound_2_pressure, 7.0));
        assert!(approx(row.compound_1_adsorption, 0.5));
        assert!(approx(row.compound_2_adsorption, 1.2));
        assert_eq!(row.compound_1, "methane");
        assert_eq!(row.compound_2, "carbon dioxide");
    }

    #[test]
    fn test_three_adsorbates_excluded_from_both_groups() {
        let raw = experiment(
            "iso-3",
            &["Methane", "Ethane", "Propane"],
            vec![mixture_point(
                1.0,
                vec![species(0.2, 0.1), species(0.3, 0.1), species(0.5, 0.1)],
            )],
        );

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert!(out.single_component.is_empty());
        assert!(out.binary_mixture.is_empty());
        assert_eq!(out.report.excluded_records, 1);
        assert_eq!(out.report.malformed_records, 0);
    }

    #[test]
    fn test_placeholder_for_missing_second_species() {
        let raw = experiment(
            "iso-4",
            &["Methane", "Ethane"],
            vec![mixture_point(4.0, vec![species(0.25, 0.8)])],
        );

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert_eq!(out.binary_mixture.len(), 1);
        let row = &out.binary_mixture[0];
        assert_eq!(row.compound_2_composition, 1.0);
        assert_eq!(row.compound_2_adsorption, 1.0);
        assert!(approx(row.compound_2_pressure, 4.0));
        assert!(approx(row.compound_1_pressure, 1.0));
    }

    #[test]
    fn test_drop_point_policy_removes_incomplete_point() {
        let raw = experiment(
            "iso-5",
            &["Methane", "Ethane"],
            vec![
                mixture_point(4.0, vec![species(0.25, 0.8)]),
                mixture_point(8.0, vec![species(0.5, 1.0), species(0.5, 0.9)]),
            ],
        );

        let normalizer = ExperimentNormalizer::with_policy(MissingSpeciesPolicy::DropPoint);
        let out = normalizer.classify_and_flatten(vec![raw]);

        assert_eq!(out.binary_mixture.len(), 1);
        assert!(approx(out.binary_mixture[0].compound_2_pressure, 4.0));
        assert_eq!(out.report.dropped_rows, 1);
    }

    #[test]
    fn test_misaligned_record_dropped_without_failing_batch() {
        let broken = experiment(
            "broken",
            &["Methane", "Ethane"],
            vec![
                mixture_point(1.0, vec![species(0.5, 0.1), species(0.5, 0.2)]),
                mixture_point(2.0, vec![]),
            ],
        );
        let good = experiment(
            "good",
            &["Methane", "Ethane"],
            vec![mixture_point(2.0, vec![species(0.5, 0.1), species(0.5, 0.2)])],
        );

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![broken, good]);

        assert_eq!(out.report.malformed_records, 1);
        assert_eq!(out.binary_mixture.len(), 1);
        assert_eq!(out.binary_mixture[0].filename, "good");
    }

    #[test]
    fn test_rows_with_missing_values_dropped() {
        let mut raw = experiment(
            "iso-6",
            &["Argon"],
            vec![single_point(1.0, 0.1), single_point(2.0, 0.2)],
        );
        raw.isotherm_data[1].total_adsorption = None;

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert_eq!(out.single_component.len(), 1);
        assert_eq!(out.report.dropped_rows, 1);
    }

    #[test]
    fn test_missing_temperature_drops_all_rows_of_record() {
        let mut raw = experiment("iso-7", &["Argon"], vec![single_point(1.0, 0.1)]);
        raw.temperature = None;

        let out = ExperimentNormalizer::default().classify_and_flatten(vec![raw]);

        assert!(out.single_component.is_empty());
        assert_eq!(out.report.single_component_records, 1);
    }

    #[test]
    fn test_aligned_length_reports_column() {
        let err = aligned_length("x", &[("a", 2), ("b", 3)]).unwrap_err();
        assert!(err.to_string().contains("column b has 3 values"));
        assert_eq!(aligned_length("x", &[]).unwrap(), 0);
    }
}
