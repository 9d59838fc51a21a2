//! Async HTTP client for the mail API.

use crate::extensions::{ensure_ends_with, ensure_starts_with, to_duration_string};
use crate::json::JsonValueExt;
use crate::resources::{ApiKeys, Bounces, Mail, User};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Async client for the mail REST API.
///
/// Cloning is cheap: clones share the underlying connection pool, so one
/// client can serve many concurrent requests.
///
/// Use [`Client::new`] with an API key for defaults or [`Client::builder`]
/// for custom settings like the base URL, a proxy, or a request timeout.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgrid_client::Client;
    /// # fn main() -> Result<(), mailgrid_client::Error> {
    /// let client = Client::new("SG.my-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// User profile and account endpoints.
    pub fn user(&self) -> User<'_> {
        User::new(self)
    }

    /// API key management endpoints.
    pub fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys::new(self)
    }

    /// Mail send endpoint.
    pub fn mail(&self) -> Mail<'_> {
        Mail::new(self)
    }

    /// Bounce suppression list endpoints.
    pub fn bounces(&self) -> Bounces<'_> {
        Bounces::new(self)
    }

    /// Send a request and return the parsed JSON response body.
    ///
    /// `path` is relative to the base URL. It is split on `/` and every piece
    /// is percent-encoded as its own segment, so `?` and `#` never start a
    /// query or fragment; leading, trailing and repeated `/` are ignored. An
    /// empty response body is returned as [`Value::Null`]. Non-2xx responses
    /// become [`Error::RequestFailed`]. If `cancel` fires before the response
    /// has been read, the request is abandoned and [`Error::Cancelled`] is
    /// returned.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgrid_client::{CancellationToken, Client, Method};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailgrid_client::Error> {
    /// let client = Client::new("SG.my-api-key")?;
    /// let scopes = client
    ///     .send(Method::GET, "scopes", None, &CancellationToken::new())
    ///     .await?;
    /// println!("{scopes}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.request(method, &segments, &[], body, cancel).await
    }

    /// URL of the endpoint at `segments` below the base URL.
    ///
    /// Each segment is percent-encoded, including `/`. Empty, `.` and `..`
    /// segments are rejected because they would address another resource.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidPathSegment(bad.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&Value>,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let mut request = self.http.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let (status, text) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(%method, %path, "request cancelled");
                return Err(Error::Cancelled);
            }
            response = Self::execute(request) => response?,
        };

        debug!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed = %to_duration_string(started.elapsed()),
            "request completed"
        );

        if !status.is_success() {
            let message = error_message(&text);
            warn!(%method, %path, status = status.as_u16(), error = %message, "request failed");
            return Err(Error::RequestFailed { status, message });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn execute(request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }

    pub(crate) async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<Value> {
        self.request(Method::GET, segments, query, None, cancel).await
    }

    pub(crate) async fn post(
        &self,
        segments: &[&str],
        body: &Value,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        self.request(Method::POST, segments, &[], Some(body), cancel)
            .await
    }

    pub(crate) async fn patch(
        &self,
        segments: &[&str],
        body: &Value,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        self.request(Method::PATCH, segments, &[], Some(body), cancel)
            .await
    }

    pub(crate) async fn delete(&self, segments: &[&str], cancel: &CancellationToken) -> Result<()> {
        self.request(Method::DELETE, segments, &[], None, cancel)
            .await?;
        Ok(())
    }
}

/// Best human-readable message from an error response body.
///
/// Understands `{"errors":[{"message":..}]}` and `{"error":..}` /
/// `{"message":..}` shapes, falling back to the raw body.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    json.property("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.property_value::<String>("message").ok())
        .or_else(|| json.first_property_value::<String>(&["error", "message"]).ok())
        .unwrap_or_else(|| body.to_string())
}

const BASE_URL: &str = "https://api.sendgrid.com/v3/";
const USER_AGENT_VALUE: &str = concat!("mailgrid-client/", env!("CARGO_PKG_VERSION"));
const API_KEY_ENV: &str = "MAILGRID_API_KEY";
const BASE_URL_ENV: &str = "MAILGRID_BASE_URL";

/// Builder for configuring a mail API client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    user_agent: String,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// The key is sent as `Authorization: Bearer <api_key>`. A key that
    /// already starts with `Bearer ` is sent unchanged rather than prefixed
    /// twice.
    ///
    /// Defaults:
    /// - Public API base URL (`https://api.sendgrid.com/v3/`)
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - No request timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT_VALUE.to_string(),
            proxy: None,
            danger_accept_invalid_certs: false,
            timeout: None,
        }
    }

    /// Builder seeded from `MAILGRID_API_KEY` and, when set,
    /// `MAILGRID_BASE_URL`.
    ///
    /// Returns `None` if the API key variable is missing.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok()?;
        let builder = Self::new(api_key);
        Some(match std::env::var(BASE_URL_ENV) {
            Ok(base_url) => builder.base_url(base_url),
            Err(_) => builder,
        })
    }

    /// Override the API base URL.
    ///
    /// Useful for testing or for regional endpoints. A trailing `/` is added
    /// when missing so relative paths keep the full base path.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Total timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Fails if the base URL, the proxy URL or the API key cannot be used.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgrid_client::Client;
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), mailgrid_client::Error> {
    /// let client = Client::builder("SG.my-api-key")
    ///     .user_agent("my-app/1.0")
    ///     .timeout(Duration::from_secs(30))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&ensure_ends_with(&self.base_url, "/"))?;

        let mut auth = HeaderValue::from_str(&ensure_starts_with(&self.api_key, "Bearer "))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent)
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Client {
            http: builder.build()?,
            base_url,
            proxy: self.proxy,
        })
    }
}
