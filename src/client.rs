//! Nopaper API client.
//!
//! The main entry point for interacting with the Nopaper partner API. Every
//! endpoint group goes through the same dispatcher here: it adds the
//! `X-API-KEY` header, sends the request and turns the response into either a
//! decoded payload or a [`NopaperError`].

use crate::documents::DocumentsClient;
use crate::error::{ErrorCodeTable, NopaperError, ProviderError, Result};
use crate::hub::HubClient;
use crate::profiles::ProfilesClient;
use crate::signatures::SignaturesClient;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Demo stand of the provider.
pub const DEFAULT_BASE_URL: &str = "https://np-demo.abanking.ru";

/// Path suffix of the external partner API.
pub const API_PATH: &str = "/partner-api/api/v2/external";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Nopaper API client.
///
/// Cheap to clone; clones share the connection pool and the error-code table.
///
/// # Example
///
/// ```rust,no_run
/// use nopaper::{Client, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::with_config(ClientConfig {
///         url: "https://np-demo.abanking.ru/".to_string(),
///         token: "partner-api-key".to_string(),
///         ..Default::default()
///     })?;
///
///     let user_id = client.profiles().user_id_by_phone("71234567890").await?;
///     println!("User: {}", user_id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) error_codes: Arc<ErrorCodeTable>,
}

/// Configuration options for the client.
///
/// Deserializable so it can live inside a host application's config file.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Provider URL without the `/partner-api/api/v2/external` suffix
    /// (default: the demo stand).
    pub url: String,
    /// API key sent in the `X-API-KEY` header.
    pub token: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Transport timeout (default: none).
    #[serde(skip)]
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Extra provider error codes, merged over the built-in table.
    pub error_codes: HashMap<String, ProviderError>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            accept_invalid_certs: false,
            timeout: None,
            user_agent: None,
            error_codes: HashMap::new(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("error_codes", &self.error_codes)
            .finish()
    }
}

impl Client {
    /// Create a client for the demo stand with the given API key.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            token: token.into(),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(ClientConfig {
    ///     url: "https://nopaper.example.com".to_string(),
    ///     token: "partner-api-key".to_string(),
    ///     accept_invalid_certs: true,
    ///     timeout: Some(Duration::from_secs(60)),
    ///     ..Default::default()
    /// })
    /// .unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("nopaper-rust/{}", env!("CARGO_PKG_VERSION")));

        let mut builder = HttpClient::builder().user_agent(user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the Nopaper client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| NopaperError::Config(format!("failed to create HTTP client: {}", e)))?;

        Self::with_http_client(config, http)
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// Only `url`, `token` and `error_codes` are taken from `config`; timeout,
    /// TLS and User-Agent settings belong to `http`.
    pub fn with_http_client(config: ClientConfig, http: HttpClient) -> Result<Self> {
        if config.token.is_empty() {
            return Err(NopaperError::Config("token can not be empty".to_string()));
        }

        Ok(Self {
            http,
            base_url: api_url(&config.url)?,
            api_key: config.token,
            error_codes: Arc::new(ErrorCodeTable::with_overrides(&config.error_codes)),
        })
    }

    /// Full API URL, including the `/partner-api/api/v2/external` suffix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the documents client for draft, file and signing operations.
    pub fn documents(&self) -> DocumentsClient {
        DocumentsClient::new(self.clone())
    }

    /// Get the profiles client for user registration and employment.
    pub fn profiles(&self) -> ProfilesClient {
        ProfilesClient::new(self.clone())
    }

    /// Get the signatures client for certificate management.
    pub fn signatures(&self) -> SignaturesClient {
        SignaturesClient::new(self.clone())
    }

    /// Get the hub client for partner-level settings.
    pub fn hub(&self) -> HubClient {
        HubClient::new(self.clone())
    }

    /// Start an authenticated request to `path` under the API URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Send a request and decode the JSON success payload.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            NopaperError::Decode(format!("can not decode success response: {}", e))
        })
    }

    /// Send a request whose success payload carries nothing of interest.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        self.execute(request).await.map(drop)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending Nopaper request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%method, %url, %status, "received Nopaper response");

        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(response),
            _ => Err(self.parse_error(response).await),
        }
    }

    async fn parse_error(&self, response: Response) -> NopaperError {
        let status_code = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return e.into(),
        };

        let code = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(|e| e.code);

        if let Some(kind) = code.as_deref().and_then(|c| self.error_codes.lookup(c)) {
            warn!(status_code, code = ?code, error = %kind, "Nopaper rejected request");
            return kind.into();
        }

        warn!(status_code, code = ?code, "unexpected response from Nopaper");
        NopaperError::Api {
            status_code,
            code,
            body,
        }
    }
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<String>,
}

/// Normalize a configured provider URL into the API URL.
fn api_url(raw: &str) -> Result<String> {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    let trimmed = compact.trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .map_err(|e| NopaperError::Config(format!("invalid url {:?}: {}", trimmed, e)))?;
    if parsed.cannot_be_a_base() {
        return Err(NopaperError::Config(format!(
            "url {:?} can not be used as a base",
            trimmed
        )));
    }

    Ok(format!("{}{}", trimmed, API_PATH))
}
