//! Bounded-parallelism GET over a list of URLs

use crate::{FetchError, Transport};
use futures::stream::{self, StreamExt};
use serde_json::Value;

/// GET one URL and parse the body as JSON
pub async fn fetch_json<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
) -> Result<Value, FetchError> {
    let response = transport.get(url).await?;

    if !response.is_success() {
        return Err(FetchError::request_failed(
            url,
            format!("status code {}", response.status),
        ));
    }

    serde_json::from_str(&response.body)
        .map_err(|e| FetchError::request_failed(url, format!("malformed body: {e}")))
}

/// Fetch every URL with at most `concurrency` requests in flight.
///
/// The output has one slot per input URL, in input order; a slot is `None`
/// when that URL failed. Failures never affect sibling requests.
pub async fn fetch_all<T: Transport + ?Sized>(
    transport: &T,
    urls: &[String],
    concurrency: usize,
) -> Vec<Option<Value>> {
    let mut results: Vec<Option<Value>> = vec![None; urls.len()];

    let mut completions = stream::iter(urls.iter().cloned().enumerate())
        .map(move |(idx, url)| async move { (idx, fetch_json(transport, &url).await) })
        .buffer_unordered(concurrency.max(1));

    while let Some((idx, outcome)) = completions.next().await {
        match outcome {
            Ok(value) => results[idx] = Some(value),
            Err(e) => tracing::warn!("{e}"),
        }
    }

    let failed = results.iter().filter(|r| r.is_none()).count();
    tracing::debug!("fetched {} URLs, {} failed", urls.len(), failed);

    results
}
