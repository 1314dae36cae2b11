//! Delivery backends
//!
//! [`Mailer`] is the seam between the campaign loop and whatever moves
//! messages. The only backend is [`SimulatedMailer`], which never opens a
//! connection and decides each outcome with a weighted coin flip.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use uuid::Uuid;

use crate::compose::OutgoingEmail;
use crate::config::{check_success_rate, ConfigError, DEFAULT_SUCCESS_RATE};

/// Proof that a message was accepted
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub id: String,
    pub accepted_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    fn now() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            accepted_at: Utc::now(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("Temporary server error")]
    Temporary,

    #[error("{0}")]
    Rejected(String),
}

/// Something that can deliver one message at a time
pub trait Mailer: Send + Sync {
    fn deliver(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Delivery stand-in: succeeds with probability `success_rate`
pub struct SimulatedMailer {
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedMailer {
    /// Entropy-seeded mailer
    pub fn new(success_rate: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            success_rate: check_success_rate(success_rate)?,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Reproducible outcomes for a given seed
    pub fn with_seed(success_rate: f64, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            success_rate: check_success_rate(success_rate)?,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn flip(&self) -> bool {
        // A poisoned lock only means another caller panicked mid-draw
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(self.success_rate)
    }
}

impl Default for SimulatedMailer {
    fn default() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Mailer for SimulatedMailer {
    fn deliver(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError> {
        if self.flip() {
            tracing::debug!(to = %email.to, subject = %email.subject, "Simulated delivery accepted");
            Ok(DeliveryReceipt::now())
        } else {
            Err(DeliveryError::Temporary)
        }
    }
}
