//! Detail payloads for a sampled prefix of an index table

use crate::{fetch_all, Transport};
use nistads_core::{detail_url, Identified};
use serde::de::DeserializeOwned;

/// Rows to sample: `ceil(fraction * row_count)`. Not clamped beyond the
/// saturating float-to-int cast.
pub fn sample_size(fraction: f64, row_count: usize) -> usize {
    (fraction * row_count as f64).ceil() as usize
}

/// Fetch detail payloads for the first `ceil(fraction * len)` index rows.
///
/// Returns `None` without fetching when the index is absent. Positions whose
/// fetch failed, or whose payload does not match `D`, are dropped; survivors
/// keep their relative index order.
pub async fn fetch_details<E, D, T>(
    transport: &T,
    index: Option<&[E]>,
    fraction: f64,
    concurrency: usize,
    url_template: &str,
) -> Option<Vec<D>>
where
    E: Identified,
    D: DeserializeOwned,
    T: Transport + ?Sized,
{
    let Some(index) = index else {
        tracing::error!("No index available for {url_template}, skipping detail fetch");
        return None;
    };

    let samples = sample_size(fraction, index.len()).min(index.len());
    let urls: Vec<String> = index[..samples]
        .iter()
        .map(|entry| detail_url(url_template, entry.identifier()))
        .collect();

    let payloads = fetch_all(transport, &urls, concurrency).await;

    let details: Vec<D> = payloads
        .into_iter()
        .zip(&urls)
        .filter_map(|(payload, url)| {
            let value = payload?;
            match serde_json::from_value(value) {
                Ok(detail) => Some(detail),
                Err(e) => {
                    tracing::warn!("Discarding malformed payload from {url}: {e}");
                    None
                }
            }
        })
        .collect();

    tracing::info!(
        "Fetched {} of {} sampled details ({} index rows)",
        details.len(),
        samples,
        index.len()
    );

    Some(details)
}
