//! Router and shared state

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use campaign_core::{CampaignConfig, Mailer};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{handle_dashboard, handle_health, handle_send_emails, handle_upload};
use crate::error::governor_error;

/// Upload cap when none is configured (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
///
/// Holds configuration only. Leads live in the browser and travel with
/// each request.
#[derive(Clone)]
pub struct AppState {
    /// Delivery backend for batch sends
    pub mailer: Arc<dyn Mailer>,
    /// Per-send pacing
    pub campaign: CampaignConfig,
}

impl AppState {
    pub fn new(mailer: Arc<dyn Mailer>, campaign: CampaignConfig) -> Self {
        Self { mailer, campaign }
    }
}

/// Build the application router without rate limiting
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page
        .route("/", get(handle_dashboard))
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/upload", post(handle_upload))
        .route("/api/send-emails", post(handle_send_emails))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

/// Wrap a router in per-IP rate limiting
///
/// Allows `per_second` requests per second with bursts of twice that.
/// Needs peer addresses, so serve with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn with_rate_limit(router: Router, per_second: u32) -> anyhow::Result<Router> {
    let config = GovernorConfigBuilder::default()
        .per_second(per_second.into())
        .burst_size(per_second.saturating_mul(2))
        .error_handler(governor_error)
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate limit: {}", per_second))?;

    Ok(router.layer(GovernorLayer {
        config: Arc::new(config),
    }))
}
