//! Error types for gateway operations

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to the `clientes` resource
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No base URL was configured
    #[error("clientes base URL is not configured (set {0})")]
    MissingBaseUrl(&'static str),

    /// Base URL is not an http(s) URL that can take path segments
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status the operation does not map
    #[error("server error {status}: {message}")]
    Remote { status: u16, message: String },

    /// Cliente does not exist on the remote side
    #[error("cliente {0} not found")]
    ClienteNotFound(i64),

    /// No link between this cliente and veiculo
    #[error("association between cliente {cliente_id} and veiculo {veiculo_id} not found")]
    AssociationNotFound { cliente_id: i64, veiculo_id: i64 },

    /// Structured validation error reported by the server
    #[error("{0}")]
    Validation(String),

    /// Success body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl GatewayError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote { status, message: message.into() }
    }

    /// HTTP status behind the error, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::ClienteNotFound(_) | Self::AssociationNotFound { .. } => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
