//! Reachability probe run before any collection work

use crate::{FetchError, Transport};

/// Fail fast with [`FetchError::ServerUnavailable`] unless `url` answers 2xx.
/// No retry.
pub async fn check_status<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
) -> Result<(), FetchError> {
    match transport.get(url).await {
        Ok(response) if response.is_success() => {
            tracing::info!("server is reachable ({} returned {})", url, response.status);
            Ok(())
        }
        Ok(response) => Err(FetchError::ServerUnavailable {
            url: url.to_string(),
            reason: format!("status code {}", response.status),
        }),
        Err(e) => Err(FetchError::ServerUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        }),
    }
}
