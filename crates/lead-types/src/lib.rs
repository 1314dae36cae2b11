//! Lead types shared by the campaign engine and the API server
//!
//! A [`Lead`] is one row of prospective-customer data. Leads come in through
//! a CSV upload ([`parse_leads`]), travel to the browser as JSON, and come
//! back to be annotated with an [`EmailStatus`] by the batch sender.
//!
//! JSON field names match the CSV header names exactly (`"First Name"`,
//! `"Lead Score"`, ...), so a lead parsed from a file serializes with the
//! same keys the file used.

pub mod error;
pub mod lead;
pub mod parse;
pub mod status;

pub use error::LeadError;
pub use lead::{CampaignStats, Lead};
pub use parse::parse_leads;
pub use status::EmailStatus;
