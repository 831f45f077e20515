//! Error types for the Nopaper SDK.
//!
//! Every operation returns [`NopaperError`]. Failures the provider reports
//! with a known error code surface as a stable [`ProviderError`]; everything
//! else keeps the raw status and body for diagnostics.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for Nopaper operations.
pub type Result<T> = std::result::Result<T, NopaperError>;

/// Domain errors the provider reports through its `code` field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderError {
    /// No profile is registered for the given phone.
    #[error("profile by phone not found")]
    ProfileNotFound,

    /// The provider could not map the request body onto its model.
    #[error("request body was not converted to model")]
    RequestBodyInvalid,

    /// The profile lacks data the provider needs for the operation.
    #[error("profile is incomplete")]
    IncompleteProfile,
}

/// Errors that can occur when using the Nopaper SDK.
#[derive(Error, Debug)]
pub enum NopaperError {
    /// Recognized provider error code.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Failure status with an unknown or missing error code.
    #[error("unexpected response from Nopaper ({status_code}): {body}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Provider error code, if the body carried one.
        code: Option<String>,
        /// Raw response body.
        body: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request rejected locally before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client could not be constructed from the given configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl NopaperError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NopaperError::InvalidRequest(message.into())
    }

    /// Returns the mapped provider error, if any.
    pub fn provider_error(&self) -> Option<ProviderError> {
        match self {
            NopaperError::Provider(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if repeating the call could succeed.
    ///
    /// The SDK itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            NopaperError::Http(_) => true,
            NopaperError::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NopaperError::Api { status_code, .. } => Some(*status_code),
            NopaperError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Provider error codes and the domain errors they map to.
///
/// The `.10402` entries for [`ProviderError::IncompleteProfile`] are
/// unconfirmed: they follow the numbering of the `.10401` profile codes but
/// no provider documentation names them. Correct them through
/// `ClientConfig::error_codes` if the provider uses them differently.
#[derive(Debug, Clone)]
pub struct ErrorCodeTable {
    codes: HashMap<String, ProviderError>,
}

impl Default for ErrorCodeTable {
    fn default() -> Self {
        let codes = [
            ("NOPAPERPARTNER.10401", ProviderError::ProfileNotFound),
            ("NOPAPERPARTNERLIB.10401", ProviderError::ProfileNotFound),
            (
                "NOPAPERPARTNERAPI.CORE.41116",
                ProviderError::RequestBodyInvalid,
            ),
            // Unconfirmed, see the type docs.
            ("NOPAPERPARTNER.10402", ProviderError::IncompleteProfile),
            ("NOPAPERPARTNERLIB.10402", ProviderError::IncompleteProfile),
        ]
        .into_iter()
        .map(|(code, kind)| (code.to_string(), kind))
        .collect();

        Self { codes }
    }
}

impl ErrorCodeTable {
    /// Built-in codes with `overrides` merged on top.
    pub fn with_overrides(overrides: &HashMap<String, ProviderError>) -> Self {
        let mut table = Self::default();
        table
            .codes
            .extend(overrides.iter().map(|(code, kind)| (code.clone(), *kind)));
        table
    }

    /// Exact-match lookup of a provider code.
    pub fn lookup(&self, code: &str) -> Option<ProviderError> {
        self.codes.get(code).copied()
    }
}
