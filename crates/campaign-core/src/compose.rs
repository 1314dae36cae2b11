//! Message composition
//!
//! A lead's own `Generated Email` wins over the stock body. The subject can
//! be overridden per campaign.

use lead_types::Lead;

use crate::credentials::EmailCredentials;

/// A fully addressed message ready for a [`Mailer`](crate::Mailer)
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn for_lead(lead: &Lead, credentials: &EmailCredentials, subject: Option<&str>) -> Self {
        Self {
            from: credentials.email.clone(),
            to: lead.email.clone(),
            subject: compose_subject(lead, subject),
            body: compose_body(lead),
        }
    }
}

/// Subject line; a non-blank override replaces the personalized default
pub fn compose_subject(lead: &Lead, subject_override: Option<&str>) -> String {
    match subject_override.map(str::trim) {
        Some(subject) if !subject.is_empty() => subject.to_string(),
        _ => format!("Hello {}, We have an offer for you!", lead.first_name),
    }
}

/// Message body for `lead`
pub fn compose_body(lead: &Lead) -> String {
    match lead.generated_email.as_deref() {
        Some(body) if !body.is_empty() => body.to_string(),
        _ => default_body(lead),
    }
}

fn default_body(lead: &Lead) -> String {
    format!(
        "Dear {first} {last},

We hope this email finds you well. We have exciting opportunities in {interest} that might interest you.

Based on your profile as a {persona}, we believe our solutions could be a great fit for your needs.

We'd love to discuss how we can help you achieve your goals.

Best regards,
Sales Team",
        first = lead.first_name,
        last = lead.last_name,
        interest = lead.interest_category,
        persona = lead.buyer_persona,
    )
}
