//! Rate-limited acquisition of guest, host and isotherm records from the NIST API

mod details;
mod error;
mod fetcher;
mod index;
mod properties;
mod status;
mod transport;

#[cfg(test)]
mod testing;

pub use details::{fetch_details, sample_size};
pub use error::FetchError;
pub use fetcher::{fetch_all, fetch_json};
pub use index::IndexRetriever;
pub use properties::{PropertyLookup, PubChemLookup};
pub use status::check_status;
pub use transport::{HttpTransport, Transport, TransportResponse};
