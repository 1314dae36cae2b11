//! Lead Campaign Server
//!
//! Serves a browser dashboard for running outreach campaigns over a CSV of
//! sales leads. Provides REST API endpoints for:
//!
//! - CSV upload (multipart) returning parsed leads
//! - Batch email sending, returning each lead annotated with its status
//!
//! ## Architecture
//!
//! The server keeps no lead data between requests: the dashboard holds the
//! current batch and posts it back when sending. Delivery is simulated by
//! campaign-core's `SimulatedMailer`; no mail leaves the process.

use std::net::SocketAddr;
use std::sync::Arc;

use campaign_core::{CampaignConfig, SimulatedMailer, DEFAULT_SEND_DELAY_MS, DEFAULT_SUCCESS_RATE};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod app;
mod error;
#[cfg(test)]
mod tests;

use app::{build_router, with_rate_limit, AppState, DEFAULT_MAX_UPLOAD_BYTES};

/// Command-line arguments for the campaign server
#[derive(Parser, Debug)]
#[command(name = "campaign-api")]
#[command(about = "Lead campaign dashboard with simulated batch email sending")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Pause after each successful send, in milliseconds
    #[arg(long, env = "SEND_DELAY_MS", default_value_t = DEFAULT_SEND_DELAY_MS)]
    send_delay_ms: u64,

    /// Probability that a simulated delivery succeeds (0.0 - 1.0)
    #[arg(long, env = "SUCCESS_RATE", default_value_t = DEFAULT_SUCCESS_RATE)]
    success_rate: f64,

    /// Seed for the delivery simulation (random if unset)
    #[arg(long, env = "CAMPAIGN_SEED")]
    seed: Option<u64>,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting campaign server on {}:{}", args.host, args.port);

    let mailer = match args.seed {
        Some(seed) => SimulatedMailer::with_seed(args.success_rate, seed)?,
        None => SimulatedMailer::new(args.success_rate)?,
    };
    info!(
        "Simulated delivery: {:.0}% success, {}ms between sends",
        mailer.success_rate() * 100.0,
        args.send_delay_ms
    );

    let state = AppState::new(
        Arc::new(mailer),
        CampaignConfig::with_delay_ms(args.send_delay_ms),
    );
    let app = with_rate_limit(build_router(state, args.max_upload_bytes), args.rate_limit)?;

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    // Per-IP rate limiting needs the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
