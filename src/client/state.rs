//! Client fetch state and its reducer.

use strum::IntoStaticStr;

use super::report::StatusReport;

/// What the client currently knows about the backend status.
#[derive(Debug, Clone, PartialEq, Eq, Default, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FetchState {
    /// A fetch is in flight (also the state before the first fetch completes).
    #[default]
    Loading,
    /// Last fetch succeeded.
    Loaded(StatusReport),
    /// Last fetch failed with a human-readable message.
    Failed(String),
}

impl FetchState {
    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The loaded snapshot, if any.
    pub fn snapshot(&self) -> Option<&StatusReport> {
        match self {
            FetchState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Variant name, used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Inputs that move [`FetchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A request was issued.
    Started,
    /// The response parsed as a snapshot.
    Succeeded(StatusReport),
    /// Transport, status or parse failure.
    Failed(String),
}

/// Pure transition function.
///
/// Every event is accepted from every state; the newest event wins.
pub fn reduce(_state: &FetchState, event: FetchEvent) -> FetchState {
    match event {
        FetchEvent::Started => FetchState::Loading,
        FetchEvent::Succeeded(snapshot) => FetchState::Loaded(snapshot),
        FetchEvent::Failed(message) => FetchState::Failed(message),
    }
}
