use std::time::Duration;

use reqwest::Url;
use reqwest::header::ACCEPT;
use tracing::trace;

use crate::config::Config;
use crate::error::{Error, Result};

/// Header carrying the Dependency-Track API key
const API_KEY_HEADER: &str = "X-Api-Key";

/// Issues authenticated GET requests against the Dependency-Track API
pub trait ApiRequest {
    /// Send a GET to `path` with `query` and return the body of a successful response
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String>;
}

impl<T: ApiRequest + ?Sized> ApiRequest for &T {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        (**self).get(path, query).await
    }
}

/// `reqwest`-backed transport that injects the API key into every request
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_key, None)
    }

    /// Create a transport whose requests fail after `timeout`
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a transport from the `[server]` and `[http]` config tables
    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        Self::with_timeout(
            &config.server.base_url,
            api_key,
            config.http.timeout_secs.map(Duration::from_secs),
        )
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::config(format!("Invalid request URL for '{}': {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

impl ApiRequest for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self.url(path, query)?;

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        trace!("Response {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(Error::Status { status, body });
        }
        Ok(body)
    }
}
