//! Campaign engine for lead outreach
//!
//! Takes a batch of [`Lead`](lead_types::Lead)s and a sender credential pair,
//! and walks the batch in order:
//!
//! 1. Validate the recipient address ([`validate::is_valid_email`])
//! 2. Compose subject and body ([`compose`])
//! 3. Hand the message to a [`Mailer`]
//! 4. Label the lead `Sent` or `Failed: <reason>`
//!
//! Delivery is simulated by [`SimulatedMailer`], a weighted coin flip. The
//! loop is sequential with a fixed pause after each successful send; one
//! lead failing never stops the batch.

pub mod campaign;
pub mod compose;
pub mod config;
pub mod credentials;
pub mod mailer;
pub mod validate;

pub use campaign::{CampaignOutcome, CampaignRunner, DeliveryRecord, SendFailure};
pub use compose::{compose_body, compose_subject, OutgoingEmail};
pub use config::{CampaignConfig, ConfigError, DEFAULT_SEND_DELAY_MS, DEFAULT_SUCCESS_RATE};
pub use credentials::EmailCredentials;
pub use mailer::{DeliveryError, DeliveryReceipt, Mailer, SimulatedMailer};
pub use validate::is_valid_email;
