//! Top-level guest, host and isotherm index documents

use crate::{fetch_json, Transport};
use nistads_core::{Endpoints, ExperimentEntry, GuestEntry, HostEntry};
use serde::de::DeserializeOwned;

/// Retrieves index tables. A table that cannot be fetched or parsed is
/// returned as `None` and logged; retrieval itself never fails.
pub struct IndexRetriever<'a, T: Transport + ?Sized> {
    transport: &'a T,
    endpoints: &'a Endpoints,
}

impl<'a, T: Transport + ?Sized> IndexRetriever<'a, T> {
    pub fn new(transport: &'a T, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Fetch the guest and host indexes independently
    pub async fn get_index(&self) -> (Option<Vec<GuestEntry>>, Option<Vec<HostEntry>>) {
        let guests = self
            .get_table(&self.endpoints.guest_index_url, "adsorbates")
            .await;
        let hosts = self
            .get_table(&self.endpoints.host_index_url, "adsorbents")
            .await;
        (guests, hosts)
    }

    pub async fn get_experiment_index(&self) -> Option<Vec<ExperimentEntry>> {
        self.get_table(&self.endpoints.experiment_index_url, "isotherms")
            .await
    }

    async fn get_table<E: DeserializeOwned>(&self, url: &str, label: &str) -> Option<Vec<E>> {
        let value = match fetch_json(self.transport, url).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to retrieve {label} index: {e}");
                return None;
            }
        };

        match serde_json::from_value::<Vec<E>>(value) {
            Ok(table) => {
                tracing::info!("Total number of {label}: {}", table.len());
                Some(table)
            }
            Err(e) => {
                tracing::error!("Failed to parse {label} index from {url}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn endpoints() -> Endpoints {
        Endpoints::with_base("https://api")
    }

    #[tokio::test]
    async fn test_both_indexes() {
        let endpoints = endpoints();
        let transport = FakeTransport::new()
            .json(
                &endpoints.guest_index_url,
                json!([{"InChIKey": "K1", "name": "Methane"}, {"InChIKey": "K2", "name": "Argon"}]),
            )
            .json(
                &endpoints.host_index_url,
                json!([{"hashkey": "H1", "name": "ZIF-8"}]),
            );

        let (guests, hosts) = IndexRetriever::new(&transport, &endpoints).get_index().await;

        assert_eq!(guests.unwrap().len(), 2);
        assert_eq!(hosts.unwrap()[0].hashkey, "H1");
    }

    #[tokio::test]
    async fn test_partial_results_on_failure() {
        let endpoints = endpoints();
        let transport = FakeTransport::new()
            .respond(&endpoints.guest_index_url, 500, "", 0)
            .json(
                &endpoints.host_index_url,
                json!([{"hashkey": "H1", "name": "ZIF-8"}]),
            );

        let (guests, hosts) = IndexRetriever::new(&transport, &endpoints).get_index().await;

        assert!(guests.is_none());
        assert!(hosts.is_some());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_absent() {
        let endpoints = endpoints();
        let transport = FakeTransport::new()
            .json(&endpoints.guest_index_url, json!({"error": "maintenance"}))
            .network_error(&endpoints.host_index_url);

        let (guests, hosts) = IndexRetriever::new(&transport, &endpoints).get_index().await;

        assert!(guests.is_none());
        assert!(hosts.is_none());
    }

    #[tokio::test]
    async fn test_experiment_index() {
        let endpoints = endpoints();
        let transport = FakeTransport::new().json(
            &endpoints.experiment_index_url,
            json!([{"filename": "iso-1"}, {"filename": "iso-2"}]),
        );

        let experiments = IndexRetriever::new(&transport, &endpoints)
            .get_experiment_index()
            .await
            .unwrap();

        assert_eq!(experiments[1].filename, "iso-2");
    }
}
