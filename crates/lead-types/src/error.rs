use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeadError {
    #[error("Invalid lead score: {0}")]
    InvalidScore(String),
}
