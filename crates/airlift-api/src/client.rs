// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with dashboard-specific URL construction,
// bearer-key auth, and error-body decoding. Endpoint modules
// (organizations, networks, devices, ssids) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// HTTP client for the wireless dashboard management API.
///
/// The API key rides as a default `Authorization: Bearer` header on every
/// request. All methods return decoded payloads; error bodies are parsed
/// into [`Error::Dashboard`] before the caller sees them. The client never
/// retries -- the dashboard documents no idempotency guarantees for
/// mutating calls.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    /// Create a new client from a base URL, API key, and transport config.
    ///
    /// `base_url` should be the API root, e.g. `https://dashboard.example.com/api/v1`.
    pub fn new(base_url: Url, api_key: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| Error::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client(headers)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests that point at a mock server and don't need auth.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The dashboard base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.decode(resp).await
    }

    /// Send a PUT request with a JSON body and decode the response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.decode(resp).await
    }

    /// Map the response status, then decode the body.
    ///
    /// 401 and 403 become auth errors; 404 becomes [`Error::NotFound`];
    /// other non-success statuses are parsed as the dashboard's
    /// `{ "errors": [...] }` body.
    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidApiKey);
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::AccessDenied {
                message: error_message(&body, &path),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { path });
        }
        if !status.is_success() {
            return Err(Error::Dashboard {
                status: status.as_u16(),
                message: error_message(&body, &path),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull a human-readable message out of an error body, falling back to
/// the request path when the body isn't the documented shape.
fn error_message(body: &str, path: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| {
            if e.errors.is_empty() {
                None
            } else {
                Some(e.errors.join("; "))
            }
        })
        .unwrap_or_else(|| format!("request to {path} failed"))
}
