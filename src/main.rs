//! Status demo entry point: run the API or the terminal client.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use status_demo::api;
use status_demo::client::{render, FetchState, HttpTransport, StatusClient};
use status_demo::config::{validate_api_url, Config};
use status_demo::metrics;

/// Health/status API and terminal client.
#[derive(Parser, Debug)]
#[command(name = "status-demo")]
#[command(about = "Serve the status API or fetch and display it")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch the status once and print it.
    Status {
        /// API base URL (overrides API_URL).
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show the status page; Enter or `r` refreshes, `q` quits.
    Watch {
        /// API base URL (overrides API_URL).
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; config errors are reported later by the command itself
    let log_settings = Config::load().unwrap_or_default();
    let filter = EnvFilter::try_new(log_settings.log_directive(args.verbose))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::Status { api_url }) => cmd_status(api_url).await,
        Some(Command::Watch { api_url }) => cmd_watch(api_url).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(None).await,
    }
}

/// Load and validate configuration, logging failures.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Build a client, honouring a CLI URL override.
fn build_client(api_url: Option<String>) -> anyhow::Result<StatusClient<HttpTransport>> {
    let mut config = load_config()?;
    if let Some(url) = api_url {
        validate_api_url(&url).map_err(|e| anyhow::anyhow!(e))?;
        config.api_url = url;
    }
    Ok(StatusClient::http(config.client_config())?)
}

/// Run the HTTP API.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Environment: {}", config.app_environment);
    info!("CORS origins: {}", config.cors_allowed_origins.join(", "));

    let handle = metrics::install_prometheus()?;
    api::serve(&config, Some(handle)).await?;

    Ok(())
}

/// Fetch once, print the page, fail the process if the fetch failed.
async fn cmd_status(api_url: Option<String>) -> anyhow::Result<()> {
    let client = build_client(api_url)?;

    client.fetch_default().await;
    let state = client.state();
    println!("{}", render(&state, client.api_url()));

    match state {
        FetchState::Failed(message) => Err(anyhow::anyhow!("Status fetch failed: {}", message)),
        _ => Ok(()),
    }
}

/// Interactive status page.
async fn cmd_watch(api_url: Option<String>) -> anyhow::Result<()> {
    let client = build_client(api_url)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&client.state(), client.api_url()));
    client.fetch_default().await;

    loop {
        println!("\n{}", render(&client.state(), client.api_url()));

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "q" | "quit" => break,
            "" | "r" | "refresh" => {
                println!("\n{}", render(&FetchState::Loading, client.api_url()));
                client.retry().await;
            }
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("STATUS DEMO - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.app_environment);
    println!("  Port: {}", config.port);
    println!("  Swagger UI: {}", if config.is_development() { "Enabled" } else { "Disabled" });
    println!("  CORS Origins: {}", config.cors_allowed_origins.join(", "));
    println!("  API URL: {}", config.api_url);
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Log Level: {}{}", config.rust_log, if config.verbose { " (verbose)" } else { "" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
