use thiserror::Error;

/// Top-level error type for the `airlift-api` crate.
///
/// Covers every failure mode of the dashboard client: authentication,
/// transport, structured API rejections, and payload decoding.
/// `airlift-core` maps these into section-level pipeline errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the dashboard (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// API key lacks permission for the requested resource (HTTP 403).
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Dashboard API ───────────────────────────────────────────────
    /// Requested resource does not exist (HTTP 404).
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Structured error from the dashboard (parsed from the `errors` array).
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Dashboard { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the API key itself is the problem.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::InvalidApiKey | Self::AccessDenied { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            Self::Dashboard { status: 404, .. } => true,
            _ => false,
        }
    }
}
