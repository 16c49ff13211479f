//! Boundary errors for the metrics core.
//!
//! The transforms are total; these errors only surface while decoding
//! wire payloads and enum strings handed over by the data-access layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Visit {visit_id} has neither age_months nor a usable birth_date")]
    MissingAge { visit_id: String },

    #[error("Year out of range: {0}")]
    InvalidYear(i32),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type VizResult<T> = Result<T, VizError>;
