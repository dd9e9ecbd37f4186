use chrono::Utc;
use nistads_core::{Config, GuestDetail, HostDetail, RawExperiment};
use nistads_dataset::{
    assemble_guest_dataset, assemble_host_dataset, extract_species_names, ExperimentNormalizer,
};
use nistads_fetch::{
    check_status, fetch_details, HttpTransport, IndexRetriever, PubChemLookup, Transport,
};
use nistads_store::{append_jsonl, write_table, Paths, RunRecord};
use std::path::Path;

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct CollectOverrides {
    pub guest_fraction: Option<f64>,
    pub host_fraction: Option<f64>,
    pub experiment_fraction: Option<f64>,
    pub parallel_tasks: Option<usize>,
}

impl CollectOverrides {
    fn apply(&self, config: &mut Config) {
        let collection = &mut config.collection;
        if let Some(fraction) = self.guest_fraction {
            collection.guest_fraction = fraction;
        }
        if let Some(fraction) = self.host_fraction {
            collection.host_fraction = fraction;
        }
        if let Some(fraction) = self.experiment_fraction {
            collection.experiment_fraction = fraction;
        }
        if let Some(tasks) = self.parallel_tasks {
            collection.parallel_tasks = tasks;
        }
    }
}

pub fn run(paths: &Paths, config_path: &Path, overrides: &CollectOverrides) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(config_path)?;
    overrides.apply(&mut config);
    config.validate()?;

    let transport = HttpTransport::new(config.collection.request_timeout_secs)?;
    let runtime = super::runtime()?;
    let record = runtime.block_on(collect(&transport, &config, paths))?;

    append_jsonl(&paths.runs_file(), &record)?;

    println!("Collection finished in {:.1}s", record.duration_secs());
    println!("  Guests fetched:        {}", record.guests_fetched);
    println!("  Hosts fetched:         {}", record.hosts_fetched);
    println!("  Experiments fetched:   {}", record.experiments_fetched);
    println!("  Single-component rows: {}", record.single_component_rows);
    println!("  Binary-mixture rows:   {}", record.binary_mixture_rows);
    println!("  Guest dataset rows:    {}", record.guest_rows);
    println!("Datasets written to {}", paths.root().display());
    Ok(())
}

/// Run every collection stage against `transport`, writing datasets under
/// `paths`. Only an unreachable server aborts the run; any other stage that
/// yields nothing leaves its dataset untouched.
pub async fn collect<T: Transport + ?Sized>(
    transport: &T,
    config: &Config,
    paths: &Paths,
) -> anyhow::Result<RunRecord> {
    let started_at = Utc::now();
    let endpoints = &config.endpoints;
    let collection = &config.collection;
    let parallel = collection.parallel_tasks;

    check_status(transport, &endpoints.status_url).await?;
    tracing::info!("Adsorption database is reachable");

    let retriever = IndexRetriever::new(transport, endpoints);
    let (guest_index, host_index) = retriever.get_index().await;
    let experiment_index = retriever.get_experiment_index().await;

    let guests: Option<Vec<GuestDetail>> = fetch_details(
        transport,
        guest_index.as_deref(),
        collection.guest_fraction,
        parallel,
        &endpoints.guest_detail_url,
    )
    .await;
    let hosts: Option<Vec<HostDetail>> = fetch_details(
        transport,
        host_index.as_deref(),
        collection.host_fraction,
        parallel,
        &endpoints.host_detail_url,
    )
    .await;
    let experiments: Option<Vec<RawExperiment>> = fetch_details(
        transport,
        experiment_index.as_deref(),
        collection.experiment_fraction,
        parallel,
        &endpoints.experiment_detail_url,
    )
    .await;

    let mut record = RunRecord {
        started_at,
        finished_at: started_at,
        guests_fetched: guests.as_ref().map_or(0, Vec::len),
        hosts_fetched: hosts.as_ref().map_or(0, Vec::len),
        experiments_fetched: experiments.as_ref().map_or(0, Vec::len),
        single_component_rows: 0,
        binary_mixture_rows: 0,
        excluded_experiments: 0,
        malformed_experiments: 0,
        guest_rows: 0,
    };

    match experiments {
        Some(experiments) => {
            let normalizer = ExperimentNormalizer::new(&config.normalization);
            let datasets = normalizer.classify_and_flatten(experiments);
            write_table(&paths.single_component_file(), &datasets.single_component)?;
            write_table(&paths.binary_mixture_file(), &datasets.binary_mixture)?;

            record.single_component_rows = datasets.single_component.len();
            record.binary_mixture_rows = datasets.binary_mixture.len();
            record.excluded_experiments = datasets.report.excluded_records;
            record.malformed_experiments = datasets.report.malformed_records;
        }
        None => tracing::warn!("No experiment data collected, adsorption datasets not updated"),
    }

    match hosts {
        Some(hosts) => write_table(&paths.hosts_file(), &assemble_host_dataset(&hosts))?,
        None => tracing::warn!("No host data collected, host dataset not updated"),
    }

    // Not fatal: guests from the index are still assembled
    let species = extract_species_names(paths).unwrap_or_else(|e| {
        tracing::warn!("Could not read species from existing datasets: {e}");
        Vec::new()
    });
    match guests {
        Some(guests) => {
            let lookup = PubChemLookup::new(transport, &endpoints.property_url, parallel);
            let rows = assemble_guest_dataset(&guests, &species, &lookup).await;
            write_table(&paths.guests_file(), &rows)?;
            record.guest_rows = rows.len();
        }
        None => tracing::warn!("No guest data collected, guest dataset not updated"),
    }

    record.finished_at = Utc::now();
    Ok(record)
}
