//! Status client: fetches `/api/health` and tracks the result as a [`FetchState`].
//!
//! The client owns a single state value. Each [`StatusClient::fetch_status`] call
//! moves it to [`FetchState::Loading`], issues exactly one request through the
//! [`Transport`], then settles on [`FetchState::Loaded`] or [`FetchState::Failed`].
//! Nothing is retried automatically; [`StatusClient::retry`] repeats the last fetch.
//! Observers follow transitions through [`StatusClient::subscribe`].

pub mod mock;
pub mod render;
pub mod report;
pub mod state;
pub mod transport;

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::metrics;

pub use mock::MockTransport;
pub use render::render;
pub use report::StatusReport;
pub use state::{reduce, FetchEvent, FetchState};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Path of the health endpoint relative to the API base URL.
pub const HEALTH_PATH: &str = "/api/health";

/// Fetches server status and holds the resulting [`FetchState`].
#[derive(Debug)]
pub struct StatusClient<T> {
    transport: T,
    config: ClientConfig,
    state: watch::Sender<FetchState>,
    last_base_url: Mutex<Option<String>>,
}

impl StatusClient<HttpTransport> {
    /// Client backed by a reqwest transport built from `config`.
    pub fn http(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> StatusClient<T> {
    /// Create a client in the initial `Loading` state.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            transport,
            config,
            state,
            last_base_url: Mutex::new(None),
        }
    }

    /// Current state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// The transport, mainly for inspecting mocks.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Base URL used by the most recent fetch, if any.
    pub fn last_base_url(&self) -> Option<String> {
        self.last_base_url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch status from `api_base_url`, updating the state.
    ///
    /// Failures end in [`FetchState::Failed`]; this never returns an error.
    #[instrument(skip(self))]
    pub async fn fetch_status(&self, api_base_url: &str) {
        *self
            .last_base_url
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(api_base_url.to_string());

        self.apply(FetchEvent::Started);
        let start = Instant::now();

        let event = match self.request(api_base_url).await {
            Ok(snapshot) => {
                debug!(environment = %snapshot.environment, "Status fetched");
                FetchEvent::Succeeded(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "Status fetch failed");
                FetchEvent::Failed(e.to_string())
            }
        };

        let outcome = match &event {
            FetchEvent::Succeeded(_) => "loaded",
            _ => "failed",
        };
        metrics::record_client_fetch(start, outcome);

        self.apply(event);
    }

    /// Fetch from the configured API URL.
    pub async fn fetch_default(&self) {
        let url = self.config.api_url.clone();
        self.fetch_status(&url).await;
    }

    /// Repeat the last fetch; falls back to the configured URL before any fetch.
    pub async fn retry(&self) {
        let url = self
            .last_base_url()
            .unwrap_or_else(|| self.config.api_url.clone());
        self.fetch_status(&url).await;
    }

    fn apply(&self, event: FetchEvent) {
        self.state.send_modify(|state| *state = reduce(state, event));
    }

    async fn request(&self, api_base_url: &str) -> Result<StatusReport, FetchError> {
        let url = health_url(api_base_url);
        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Health endpoint URL for `api_base_url`, tolerating a trailing slash.
pub fn health_url(api_base_url: &str) -> String {
    format!("{}{}", api_base_url.trim_end_matches('/'), HEALTH_PATH)
}
