//! Error types for the weather provider and the location lookup.

use thiserror::Error;

/// Banner text shown for every failed weather fetch.
pub const NETWORK_PROBLEM: &str = "Network problem. Check your connection and try again.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed weather response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Message for the error banner. The cause only goes to the log.
    pub fn user_message(&self) -> String {
        NETWORK_PROBLEM.to_string()
    }
}

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Geolocation denied: {0}")]
    Denied(String),

    #[error("Location request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Location service returned status {0}")]
    Status(u16),
}
