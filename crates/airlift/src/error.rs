//! CLI error types with miette diagnostics.
//!
//! Maps config and transport failures into user-facing errors with
//! actionable help text, plus the run-outcome errors that drive
//! non-zero exits for all-rejected runs.

use miette::Diagnostic;
use thiserror::Error;

use airlift_config::ConfigError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONNECTION: i32 = 6;
    /// Every section in the run was rejected or failed; nothing was applied.
    pub const NOTHING_APPLIED: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Document ─────────────────────────────────────────────────────

    #[error("Cannot read configuration document '{path}'")]
    #[diagnostic(
        code(airlift::document_read),
        help("Check that the file exists and is readable.")
    )]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration document '{path}' is not valid YAML")]
    #[diagnostic(
        code(airlift::document_parse),
        help("The document must be a mapping of device-class keys to field mappings.")
    )]
    DocumentParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No dashboard configured")]
    #[diagnostic(
        code(airlift::no_config),
        help(
            "Pass --base-url, set AIRLIFT_BASE_URL, or create a profile at {path}."
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(airlift::profile_not_found),
        help("Check the [profiles] table in your config file.")
    )]
    ProfileNotFound { name: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(airlift::no_credentials),
        help("Set AIRLIFT_API_KEY, or add api_key_env / api_key to the profile.")
    )]
    NoCredentials { profile: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airlift::validation))]
    Validation { field: String, reason: String },

    // ── Transport ────────────────────────────────────────────────────

    #[error("Dashboard rejected the API key")]
    #[diagnostic(
        code(airlift::auth_failed),
        help("Verify the key is active and has write access to the organization.")
    )]
    AuthFailed,

    #[error("Cannot reach the dashboard: {message}")]
    #[diagnostic(code(airlift::connection))]
    Connection { message: String },

    // ── Run outcome ──────────────────────────────────────────────────

    #[error("No sections were applied: {rejected} rejected, {failed} failed")]
    #[diagnostic(
        code(airlift::nothing_applied),
        help("Per-section reasons are in the report above.")
    )]
    NothingApplied { rejected: usize, failed: usize },

    #[error("{count} section(s) failed verification")]
    #[diagnostic(
        code(airlift::verification_failed),
        help("Per-section reasons are in the report above.")
    )]
    VerificationFailed { count: usize },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DocumentRead { .. } => exit_code::NOT_FOUND,
            Self::DocumentParse { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } | Self::AuthFailed => exit_code::AUTH,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::NothingApplied { .. } => exit_code::NOTHING_APPLIED,
            Self::VerificationFailed { .. } => exit_code::VALIDATION,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { profile } => Self::ProfileNotFound { name: profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Validation {
                field: "config".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<airlift_api::Error> for CliError {
    fn from(err: airlift_api::Error) -> Self {
        match err {
            airlift_api::Error::InvalidApiKey => Self::AuthFailed,
            airlift_api::Error::InvalidUrl(e) => Self::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            },
            airlift_api::Error::Tls(message) => Self::Connection { message },
            other => Self::Connection {
                message: other.to_string(),
            },
        }
    }
}
