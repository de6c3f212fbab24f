//! Text rendering of the client state.

use time::macros::format_description;

use super::report::StatusReport;
use super::state::FetchState;

/// Render the status page for `state`.
///
/// Always produces exactly one of the loading, error or loaded sections.
pub fn render(state: &FetchState, api_url: &str) -> String {
    let mut lines = vec![
        "Sample Application".to_string(),
        "Terminal client + Rust Web API".to_string(),
        String::new(),
        "Frontend Info".to_string(),
        format!("  Client:  status-demo {}", env!("CARGO_PKG_VERSION")),
        format!("  API URL: {api_url}"),
        String::new(),
        "Backend API Status".to_string(),
    ];

    match state {
        FetchState::Loading => lines.push("  Loading...".to_string()),
        FetchState::Failed(message) => lines.push(format!("  Error: {message}")),
        FetchState::Loaded(snapshot) => lines.extend(snapshot_lines(snapshot)),
    }

    lines.push(String::new());
    lines.push("[r] Refresh  [q] Quit".to_string());
    lines.join("\n")
}

fn snapshot_lines(snapshot: &StatusReport) -> Vec<String> {
    vec![
        format!("  {}", snapshot.message),
        format!("  Environment: {}", snapshot.environment),
        format!("  Version:     {}", snapshot.version),
        format!("  Timestamp:   {}", display_timestamp(snapshot)),
    ]
}

/// UTC wall time when the timestamp is readable, the raw text otherwise.
fn display_timestamp(snapshot: &StatusReport) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    snapshot
        .timestamp_utc()
        .and_then(|t| t.format(&format).ok())
        .unwrap_or_else(|| snapshot.timestamp.clone())
}
