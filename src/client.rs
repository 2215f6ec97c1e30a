//! GitHub API client.
//!
//! Low-level plumbing shared by every endpoint: URL construction with token
//! injection, JSON body encoding, status checks and response decoding.
//! Endpoint methods live next to their entity types under `models/`.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{redirect, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{GitHubError, Result};
use crate::rate_limit::{RateLimit, RateLimitSnapshot};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default directory for downloaded repository archives.
pub const DEFAULT_ARCHIVE_DIR: &str = "github/zip";

const USER_AGENT: &str = concat!("githubv3/", env!("CARGO_PKG_VERSION"));
const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings for a [`GitHubClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// OAuth access token, sent as the `access_token` query parameter.
    pub token: String,
    /// Login of the acting user. Used when a repository owner is omitted.
    pub login: String,
    pub base_url: String,
    pub archive_dir: PathBuf,
    /// Transport timeout per request. `None` disables it.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("login", &self.login)
            .field("base_url", &self.base_url)
            .field("archive_dir", &self.archive_dir)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            login: String::new(),
            base_url: DEFAULT_API_URL.to_string(),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Read configuration from the environment.
    ///
    /// `GITHUB_TOKEN` is required. `GITHUB_LOGIN`, `GITHUB_API_URL` and
    /// `GITHUB_ARCHIVE_DIR` are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN").map_err(|_| {
            GitHubError::ConfigMissing("GITHUB_TOKEN environment variable not set".to_string())
        })?;

        let mut config = Self::new(token);
        if let Ok(login) = env::var("GITHUB_LOGIN") {
            config.login = login;
        }
        if let Ok(base_url) = env::var("GITHUB_API_URL") {
            config.base_url = base_url;
        }
        if let Ok(dir) = env::var("GITHUB_ARCHIVE_DIR") {
            config.archive_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Payload attached to a request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    /// Pre-encoded JSON, see [`encode_body`].
    Json(Vec<u8>),
    /// Plain text, sent as `text/plain`.
    Text(String),
}

impl RequestBody {
    /// Encode `payload` as a JSON body.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Self::Json(encode_body(payload)?))
    }
}

/// Serialize a request payload to JSON bytes.
pub fn encode_body<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(payload)?)
}

/// GitHub v3 API client.
///
/// One client represents one authenticated session. It is cheaply cloneable;
/// clones share the connection pool and the rate-limit counters.
///
/// # Example
///
/// ```no_run
/// use githubv3::{ClientConfig, GitHubClient};
///
/// # async fn example() -> githubv3::Result<()> {
/// // Create from environment variables
/// let client = GitHubClient::from_env()?;
///
/// // Or configure manually
/// let client = GitHubClient::with_config(
///     ClientConfig::new("your-token").with_login("octocat"),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    login: String,
    archive_dir: Arc<PathBuf>,
    rate_limit: Arc<RateLimit>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url.as_str())
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client from environment variables. See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client with the provided token and API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(token).with_base_url(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .brotli(true)
            .gzip(true)
            .deflate(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GitHubError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: config.token,
            login: config.login.trim().to_string(),
            archive_dir: Arc::new(config.archive_dir),
            rate_limit: Arc::new(RateLimit::default()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Login of the acting user; blank when unknown.
    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Counters from the most recent accepted response.
    pub fn rate_limit(&self) -> RateLimitSnapshot {
        self.rate_limit.snapshot()
    }

    pub fn calls_limit(&self) -> u32 {
        self.rate_limit.limit()
    }

    pub fn calls_remaining(&self) -> u32 {
        self.rate_limit.remaining()
    }

    /// Build the absolute URL for `path` with the access token appended.
    ///
    /// `path` is relative to the API root and may already carry a query
    /// string.
    pub fn create_url(&self, path: &str) -> String {
        let root = self.base_url.as_str().trim_end_matches('/');
        let slash = if path.starts_with('/') { "" } else { "/" };
        let separator = if path.contains('?') { '&' } else { '?' };
        format!(
            "{root}{slash}{path}{separator}access_token={}",
            urlencoding::encode(&self.token)
        )
    }

    /// Send a request and return the raw response, whatever its status.
    #[tracing::instrument(skip(self, body))]
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Response> {
        let needs_length = matches!(method, Method::POST | Method::PUT | Method::PATCH);
        let request = self.http.request(method, self.create_url(path));
        let request = match body {
            RequestBody::Empty if needs_length => request.header(CONTENT_LENGTH, 0),
            RequestBody::Empty => request,
            RequestBody::Json(bytes) => request
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            RequestBody::Text(text) => request.header(CONTENT_TYPE, "text/plain").body(text),
        };

        let response = request.send().await.map_err(hide_url)?;
        tracing::debug!(status = %response.status(), "received response");
        Ok(response)
    }

    /// GET an absolute URL, as handed out in a `Location` header.
    #[tracing::instrument(skip_all)]
    pub(crate) async fn send_to(&self, url: Url) -> Result<Response> {
        let response = self.http.get(url).send().await.map_err(hide_url)?;
        tracing::debug!(status = %response.status(), "received redirected response");
        Ok(response)
    }

    /// Resolve the `Location` header of a redirect against the API root.
    pub(crate) fn redirect_target(&self, response: &Response) -> Result<Url> {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| GitHubError::Api {
                message: "redirect without a Location header".to_string(),
                status_code: Some(response.status().as_u16()),
            })?;
        Ok(self.base_url.join(location)?)
    }

    /// Read the whole body, decode it as JSON and record the rate limit.
    pub async fn read_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(hide_url)?;
        let value = serde_json::from_slice(&bytes)?;
        self.rate_limit.record(&headers);
        Ok(value)
    }

    /// Read the whole body as text and record the rate limit.
    pub async fn read_text(&self, response: Response) -> Result<String> {
        let headers = response.headers().clone();
        let text = response.text().await.map_err(hide_url)?;
        self.rate_limit.record(&headers);
        Ok(text)
    }

    /// Record the rate limit of a response whose body is not needed.
    pub(crate) fn record_headers(&self, response: &Response) {
        self.rate_limit.record(response.headers());
    }

    /// Send a request and decode the body if the status is one of `expected`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        expected: &[StatusCode],
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        if expected.contains(&response.status()) {
            self.read_response(response).await
        } else {
            Err(unexpected_status(response, expected).await)
        }
    }

    /// GET `path`, expecting `200 OK`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(Method::GET, path, RequestBody::Empty, &[StatusCode::OK])
            .await
    }

    /// POST a JSON payload, expecting `expected`.
    pub async fn post<B, T>(&self, path: &str, payload: &B, expected: StatusCode) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(Method::POST, path, RequestBody::json(payload)?, &[expected])
            .await
    }

    /// PATCH a JSON payload, expecting `200 OK`.
    pub async fn patch<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(
            Method::PATCH,
            path,
            RequestBody::json(payload)?,
            &[StatusCode::OK],
        )
        .await
    }

    /// PUT a JSON payload, expecting `expected`.
    pub async fn put<B, T>(&self, path: &str, payload: &B, expected: StatusCode) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(Method::PUT, path, RequestBody::json(payload)?, &[expected])
            .await
    }

    /// Send a request whose only result is its status.
    ///
    /// Returns `true` on `expected`; any other status is an error.
    pub async fn expect_status(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        expected: StatusCode,
    ) -> Result<bool> {
        let response = self.send(method, path, body).await?;
        if response.status() == expected {
            self.record_headers(&response);
            Ok(true)
        } else {
            Err(unexpected_status(response, &[expected]).await)
        }
    }

    /// Map a two-outcome status to a flag: `yes` gives `true`, `no` gives
    /// `false`, anything else is an error.
    pub async fn status_flag(
        &self,
        method: Method,
        path: &str,
        yes: StatusCode,
        no: StatusCode,
    ) -> Result<bool> {
        let response = self.send(method, path, RequestBody::Empty).await?;
        let status = response.status();
        if status == yes || status == no {
            self.record_headers(&response);
            Ok(status == yes)
        } else {
            Err(unexpected_status(response, &[yes, no]).await)
        }
    }

    /// Existence check: `204` means yes, `404` means no.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        self.status_flag(
            Method::GET,
            path,
            StatusCode::NO_CONTENT,
            StatusCode::NOT_FOUND,
        )
        .await
    }

    /// DELETE `path`, expecting `204 No Content`.
    pub async fn delete(&self, path: &str) -> Result<bool> {
        self.expect_status(
            Method::DELETE,
            path,
            RequestBody::Empty,
            StatusCode::NO_CONTENT,
        )
        .await
    }
}

/// Build an [`GitHubError::UnexpectedStatus`] from a rejected response.
pub(crate) async fn unexpected_status(response: Response, expected: &[StatusCode]) -> GitHubError {
    let status = response.status();
    let message = extract_error_message(response).await;
    GitHubError::UnexpectedStatus {
        expected: expected
            .iter()
            .map(|code| code.as_u16().to_string())
            .collect::<Vec<_>>()
            .join(" or "),
        status: status.as_u16(),
        status_line: status.to_string(),
        message,
    }
}

/// Pull the `message` field out of an error body.
pub(crate) async fn extract_error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let json: serde_json::Value = serde_json::from_str(&body).ok()?;
    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

// Transport errors echo the request URL, which carries the token.
pub(crate) fn hide_url(error: reqwest::Error) -> GitHubError {
    GitHubError::HttpError(error.without_url())
}
