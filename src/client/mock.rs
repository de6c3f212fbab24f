//! Scripted transport for unit testing.
//!
//! Responses are served in the order they were queued, without touching the network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

use super::transport::{RawResponse, Transport};

/// Mock transport for testing.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Queued outcomes, served front to back.
    script: Arc<Mutex<VecDeque<Result<RawResponse, FetchError>>>>,
    /// URLs requested so far.
    requests: Arc<Mutex<Vec<String>>>,
    /// Simulated latency in milliseconds.
    latency_ms: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a new mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that sleeps before answering each request.
    pub fn with_latency(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            ..Self::default()
        }
    }

    /// Queue a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        lock(&self.script).push_back(Ok(RawResponse {
            status,
            body: body.into(),
        }));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: FetchError) {
        lock(&self.script).push_back(Err(error));
    }

    /// URLs requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    /// Drop queued outcomes and recorded requests.
    pub fn clear(&self) {
        lock(&self.script).clear();
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        lock(&self.requests).push(url.to_string());

        // Take the outcome before sleeping so overlapping calls keep queue order.
        let outcome = lock(&self.script).pop_front();

        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        outcome.unwrap_or_else(|| {
            Err(FetchError::Transport(
                "mock transport: no scripted response".to_string(),
            ))
        })
    }
}
