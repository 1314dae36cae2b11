//! Sequential batch sender

use chrono::{DateTime, Utc};
use lead_types::{CampaignStats, EmailStatus, Lead};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::compose::OutgoingEmail;
use crate::config::CampaignConfig;
use crate::credentials::EmailCredentials;
use crate::mailer::{DeliveryError, DeliveryReceipt, Mailer};
use crate::validate::is_valid_email;

/// Why one lead was not sent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SendFailure {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Log line for one attempted lead
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub lead_id: String,
    pub email: String,
    pub status: EmailStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a whole batch
#[derive(Debug, Clone)]
pub struct CampaignOutcome {
    /// Input leads, same order, each with `email_status` set
    pub leads: Vec<Lead>,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub results: Vec<DeliveryRecord>,
}

impl CampaignOutcome {
    pub fn stats(&self) -> CampaignStats {
        CampaignStats {
            total_leads: self.leads.len(),
            emails_sent: self.emails_sent,
            emails_failed: self.emails_failed,
        }
    }

    /// Human-readable summary for the dashboard
    pub fn summary(&self) -> String {
        format!(
            "Email campaign completed! {} successful, {} failed",
            self.emails_sent, self.emails_failed
        )
    }
}

/// Runs batches against a [`Mailer`]
pub struct CampaignRunner<'a, M: Mailer + ?Sized> {
    mailer: &'a M,
    config: CampaignConfig,
}

impl<'a, M: Mailer + ?Sized> CampaignRunner<'a, M> {
    pub fn new(mailer: &'a M, config: CampaignConfig) -> Self {
        Self { mailer, config }
    }

    /// Attempt every lead in order and label it
    ///
    /// Never fails as a whole: each lead ends up `Sent` or `Failed`, and
    /// `emails_sent + emails_failed == leads.len()`.
    #[instrument(skip_all, fields(leads = leads.len(), sender = %credentials.email))]
    pub async fn run(
        &self,
        mut leads: Vec<Lead>,
        credentials: &EmailCredentials,
        subject: Option<&str>,
    ) -> CampaignOutcome {
        let mut emails_sent = 0;
        let mut emails_failed = 0;
        let mut results = Vec::with_capacity(leads.len());

        for lead in leads.iter_mut() {
            let record = match self.send_one(lead, credentials, subject) {
                Ok(receipt) => {
                    lead.email_status = Some(EmailStatus::Sent);
                    emails_sent += 1;
                    record_for(lead, receipt.accepted_at, Some(receipt.id), None)
                }
                Err(failure) => {
                    warn!(email = %lead.email, error = %failure, "Failed to send email");
                    lead.email_status = Some(EmailStatus::failed(failure.to_string()));
                    emails_failed += 1;
                    record_for(lead, Utc::now(), None, Some(failure.to_string()))
                }
            };
            let sent = record.status.is_sent();
            results.push(record);

            if sent && !self.config.send_delay.is_zero() {
                tokio::time::sleep(self.config.send_delay).await;
            }
        }

        info!(emails_sent, emails_failed, "Campaign finished");

        CampaignOutcome {
            leads,
            emails_sent,
            emails_failed,
            results,
        }
    }

    fn send_one(
        &self,
        lead: &Lead,
        credentials: &EmailCredentials,
        subject: Option<&str>,
    ) -> Result<DeliveryReceipt, SendFailure> {
        if !is_valid_email(&lead.email) {
            return Err(SendFailure::InvalidEmail);
        }
        let email = OutgoingEmail::for_lead(lead, credentials, subject);
        Ok(self.mailer.deliver(&email)?)
    }
}

fn record_for(
    lead: &Lead,
    timestamp: DateTime<Utc>,
    message_id: Option<String>,
    error: Option<String>,
) -> DeliveryRecord {
    DeliveryRecord {
        lead_id: lead.lead_id.clone(),
        email: lead.email.clone(),
        status: lead.status(),
        timestamp,
        message_id,
        error,
    }
}
