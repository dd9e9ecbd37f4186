//! In-memory transport with in-flight instrumentation

use crate::{FetchError, Transport, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
enum Route {
    Respond {
        status: u16,
        body: String,
        delay_ms: u64,
    },
    NetworkError,
}

#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, Route>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, url: &str, body: serde_json::Value) -> Self {
        self.respond(url, 200, &body.to_string(), 0)
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str, delay_ms: u64) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond {
                status,
                body: body.to_string(),
                delay_ms,
            },
        );
        self
    }

    pub fn network_error(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::NetworkError);
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let route = self.routes.get(url).cloned();
        let delay_ms = match &route {
            Some(Route::Respond { delay_ms, .. }) => *delay_ms,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match route {
            Some(Route::Respond { status, body, .. }) => Ok(TransportResponse { status, body }),
            Some(Route::NetworkError) => Err(FetchError::request_failed(url, "connection reset")),
            None => Ok(TransportResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
