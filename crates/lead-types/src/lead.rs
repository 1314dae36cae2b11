//! Lead record and campaign counters

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::EmailStatus;

/// CSV header names with a dedicated field on [`Lead`]
pub mod columns {
    pub const LEAD_ID: &str = "LeadID";
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const EMAIL: &str = "Email";
    pub const PHONE: &str = "Phone";
    pub const INTEREST_CATEGORY: &str = "Interest Category";
    pub const LEAD_SCORE: &str = "Lead Score";
    pub const BUYER_PERSONA: &str = "Buyer Persona";
    pub const GENERATED_EMAIL: &str = "Generated Email";
    pub const EMAIL_STATUS: &str = "Email Status";
}

/// One prospective customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "LeadID", default)]
    pub lead_id: String,

    #[serde(rename = "First Name", default)]
    pub first_name: String,

    #[serde(rename = "Last Name", default)]
    pub last_name: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Interest Category", default)]
    pub interest_category: String,

    /// Numeric score; absent when the cell was empty or not a number
    #[serde(rename = "Lead Score", default, with = "score")]
    pub lead_score: Option<f64>,

    #[serde(rename = "Buyer Persona", default)]
    pub buyer_persona: String,

    /// Pre-written message body, used instead of the stock template
    #[serde(
        rename = "Generated Email",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_email: Option<String>,

    #[serde(
        rename = "Email Status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email_status: Option<EmailStatus>,

    /// Columns without a dedicated field, keyed by header
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Lead {
    /// "First Last", without stray whitespace when either part is empty
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Status for display; leads never attempted count as pending
    pub fn status(&self) -> EmailStatus {
        self.email_status.clone().unwrap_or_default()
    }

    /// Assign a CSV cell to the field named by `header`
    pub fn set_column(&mut self, header: &str, value: &str) {
        match header {
            columns::LEAD_ID => self.lead_id = value.to_string(),
            columns::FIRST_NAME => self.first_name = value.to_string(),
            columns::LAST_NAME => self.last_name = value.to_string(),
            columns::EMAIL => self.email = value.to_string(),
            columns::PHONE => self.phone = value.to_string(),
            columns::INTEREST_CATEGORY => self.interest_category = value.to_string(),
            columns::LEAD_SCORE => {
                self.lead_score = value.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            columns::BUYER_PERSONA => self.buyer_persona = value.to_string(),
            columns::GENERATED_EMAIL => self.generated_email = Some(value.to_string()),
            columns::EMAIL_STATUS => {
                self.email_status = if value.is_empty() {
                    None
                } else {
                    value.parse().ok()
                }
            }
            other => {
                self.extra.insert(
                    other.to_string(),
                    serde_json::Value::String(value.to_string()),
                );
            }
        }
    }
}

/// Aggregate counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    pub total_leads: usize,
    pub emails_sent: usize,
    pub emails_failed: usize,
}

impl CampaignStats {
    /// Counters for a freshly uploaded batch: nothing sent yet
    pub fn uploaded(total_leads: usize) -> Self {
        Self {
            total_leads,
            emails_sent: 0,
            emails_failed: 0,
        }
    }
}

/// Lenient (de)serialization for `Lead Score`
///
/// Accepts finite numbers, numeric strings, empty strings and null. Anything
/// else, including `NaN` and `inf` spelled as strings, is rejected with
/// [`LeadError::InvalidScore`](crate::LeadError).
mod score {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use crate::error::LeadError;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        deserializer.deserialize_any(ScoreVisitor)
    }

    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() {
                Ok(Some(v))
            } else {
                Err(E::custom(LeadError::InvalidScore(v.to_string())))
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<f64>()
                .ok()
                .filter(|score| score.is_finite())
                .map(Some)
                .ok_or_else(|| E::custom(LeadError::InvalidScore(v.to_string())))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }
    }
}
