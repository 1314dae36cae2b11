//! Per-lead email status
//!
//! On the wire the status is a plain string: `"Pending"`, `"Sent"` or
//! `"Failed: <reason>"`. The dashboard keys its badges off the `Failed`
//! prefix, so the label format is part of the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reason used when a failure label carries no text
pub const UNKNOWN_ERROR: &str = "Unknown error";

const FAILED_PREFIX: &str = "Failed";

/// Outcome of the send step for one lead
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailStatus {
    /// Not attempted yet
    #[default]
    Pending,
    /// Accepted by the mailer
    Sent,
    /// Rejected before or during delivery
    Failed(String),
}

impl EmailStatus {
    /// Build a failure status, falling back to [`UNKNOWN_ERROR`] for empty reasons
    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            EmailStatus::Failed(UNKNOWN_ERROR.to_string())
        } else {
            EmailStatus::Failed(reason)
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, EmailStatus::Sent)
    }

    /// Failure reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            EmailStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailStatus::Pending => write!(f, "Pending"),
            EmailStatus::Sent => write!(f, "Sent"),
            EmailStatus::Failed(reason) => write!(f, "{}: {}", FAILED_PREFIX, reason),
        }
    }
}

impl FromStr for EmailStatus {
    type Err = std::convert::Infallible;

    /// Lenient: anything that is neither `Sent` nor a `Failed` label is `Pending`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "Sent" {
            return Ok(EmailStatus::Sent);
        }
        if s == FAILED_PREFIX {
            return Ok(EmailStatus::failed(""));
        }
        match s
            .strip_prefix(FAILED_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            Some(reason) => Ok(EmailStatus::failed(reason.trim())),
            None => Ok(EmailStatus::Pending),
        }
    }
}

impl Serialize for EmailStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EmailStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        // Infallible
        Ok(label.parse().unwrap_or_default())
    }
}
