//! Estimator API client
//!
//! Talks to the housing price backend over HTTP+JSON.
//!
//! Every failure collapses into [`ApiError`], whose `Display` output is the
//! message shown to the user. A non-success status displays the response body
//! verbatim, or the endpoint's fallback message when the body is empty.

pub mod client;
pub mod endpoint;

pub use client::{ApiClient, EstimatorBackend};
pub use endpoint::Endpoint;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Respuesta no válida del servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Respuesta no válida del servidor: {0}")]
    Malformed(#[from] estimator_core::CoreError),

    #[error("URL no válida: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Config(#[from] estimator_config::ConfigError),
}

impl ApiError {
    /// HTTP status, when the backend answered with a non-success code
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
