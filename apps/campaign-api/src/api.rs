//! API handlers for the campaign server
//!
//! Provides:
//! - The dashboard page
//! - CSV upload and parsing
//! - Simulated batch email sending

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    response::Html,
    Json,
};
use campaign_core::{CampaignRunner, DeliveryRecord, EmailCredentials};
use lead_types::{parse_leads, CampaignStats, Lead};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::AppState;
use crate::error::ApiError;

/// Multipart field carrying the CSV
const FILE_FIELD: &str = "file";

const DASHBOARD_HTML: &str = include_str!("../static/index.html");

/// Handler: GET /
pub async fn handle_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "campaign-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub leads: Vec<Lead>,
    pub stats: CampaignStats,
}

/// Handler: POST /api/upload
///
/// Reads the `file` field of a multipart form and parses it as CSV. Other
/// fields are ignored.
pub async fn handle_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.is_empty() && !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::NotCsv(file_name));
        }

        let bytes = field.bytes().await?;
        let text = String::from_utf8_lossy(&bytes);
        let leads = parse_leads(&text);

        info!(
            "Parsed upload {:?}: {} bytes, {} leads",
            file_name,
            bytes.len(),
            leads.len()
        );

        return Ok(Json(UploadResponse {
            success: true,
            stats: CampaignStats::uploaded(leads.len()),
            leads,
        }));
    }

    Err(ApiError::MissingFile)
}

/// Send request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsRequest {
    #[serde(default)]
    pub leads: Option<Vec<Lead>>,

    #[serde(default)]
    pub email_credentials: Option<EmailCredentials>,

    /// Replaces the personalized subject line when non-blank
    #[serde(default)]
    pub email_subject: Option<String>,
}

/// Send response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailsResponse {
    pub success: bool,
    pub updated_leads: Vec<Lead>,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub stats: CampaignStats,
    pub message: String,
    pub results: Vec<DeliveryRecord>,
}

/// Handler: POST /api/send-emails
///
/// Runs the whole batch before responding; with the default pacing that is
/// half a second per delivered lead.
pub async fn handle_send_emails(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailsRequest>, JsonRejection>,
) -> Result<Json<SendEmailsResponse>, ApiError> {
    let Json(req) = payload?;

    let leads = req.leads.ok_or(ApiError::MissingData)?;
    let credentials = req
        .email_credentials
        .filter(EmailCredentials::is_complete)
        .ok_or(ApiError::MissingData)?;

    info!(
        "Send request: {} leads from {}",
        leads.len(),
        credentials.email
    );
    debug!("Subject override: {:?}", req.email_subject);

    let runner = CampaignRunner::new(state.mailer.as_ref(), state.campaign.clone());
    let outcome = runner
        .run(leads, &credentials, req.email_subject.as_deref())
        .await;

    Ok(Json(SendEmailsResponse {
        success: true,
        emails_sent: outcome.emails_sent,
        emails_failed: outcome.emails_failed,
        stats: outcome.stats(),
        message: outcome.summary(),
        updated_leads: outcome.leads,
        results: outcome.results,
    }))
}
