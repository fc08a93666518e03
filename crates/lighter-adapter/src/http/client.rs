/*
[INPUT]:  Endpoint and ordered client options
[OUTPUT]: Immutable LighterClient wrapping configuration and pooled reqwest client
[POS]:    HTTP layer - client construction and handle
[UPDATE]: When adding builder methods or changing build ordering
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use tracing::info;

use crate::http::config::ClientConfiguration;
use crate::http::options::{self, ClientOption};
use crate::http::transport::{Dialer, TlsPolicy, Transport, TransportSettings};
use crate::http::Result;

/// Main HTTP client handle for the Lighter API.
///
/// Cheap to clone and safe to share across tasks. Configuration is frozen;
/// build a new client to change it.
#[derive(Debug, Clone)]
pub struct LighterClient {
    http_client: Client,
    config: Arc<ClientConfiguration>,
}

impl LighterClient {
    /// Create a client with default transport settings
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::builder(endpoint).build()
    }

    /// Create a client, applying `options` in order
    pub fn with_options(
        endpoint: impl Into<String>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self> {
        Self::builder(endpoint).options(options).build()
    }

    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    pub fn fat_finger_protection(&self) -> bool {
        self.config.fat_finger_protection()
    }

    pub fn channel_name(&self) -> &str {
        self.config.channel_name()
    }

    /// Effective transport settings, `None` for a caller-supplied client
    pub fn transport_settings(&self) -> Option<&TransportSettings> {
        self.config.transport_settings()
    }

    /// Underlying pooled reqwest client
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Build full URL for an API path.
    ///
    /// `path` is resolved below the endpoint, so a path prefix in the
    /// endpoint (`https://host/prefix`) is kept whether or not `path`
    /// starts with `/`.
    pub fn url(&self, path: &str) -> Result<Url> {
        let mut base = Url::parse(self.config.endpoint())?;
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// Request builder for an API path carrying the default headers
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self
            .http_client
            .request(method, url)
            .headers(self.config.default_headers().clone()))
    }
}

/// Collects options for a [`LighterClient`].
///
/// Nothing is validated until [`ClientBuilder::build`]: the endpoint is
/// checked first, then options run in the order they were added and the
/// first failure is returned. A builder is single-use and not shared
/// between threads.
#[derive(Debug)]
#[must_use]
pub struct ClientBuilder {
    endpoint: String,
    options: Vec<ClientOption>,
}

impl ClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: ClientOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn proxy(self, proxy_url: impl Into<String>) -> Self {
        self.option(options::with_proxy(proxy_url))
    }

    pub fn no_proxy(self) -> Self {
        self.option(options::without_proxy())
    }

    pub fn local_addr(self, local_ip: impl Into<String>) -> Self {
        self.option(options::with_local_addr(local_ip))
    }

    pub fn dialer(self, dialer: Dialer) -> Self {
        self.option(options::with_dialer(dialer))
    }

    pub fn custom_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.option(options::with_custom_headers(headers))
    }

    pub fn fat_finger_protection(self, enabled: bool) -> Self {
        self.option(options::set_fat_finger_protection(enabled))
    }

    pub fn channel_name(self, name: impl Into<String>) -> Self {
        self.option(options::with_channel_name(name))
    }

    pub fn tls_policy(self, policy: TlsPolicy) -> Self {
        self.option(options::with_tls_policy(policy))
    }

    pub fn pool_limits(
        self,
        max_conns_per_host: usize,
        max_idle_per_host: usize,
        idle_timeout: Duration,
    ) -> Self {
        self.option(options::with_pool_limits(
            max_conns_per_host,
            max_idle_per_host,
            idle_timeout,
        ))
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(options::with_timeout(timeout))
    }

    pub fn http_client(self, client: Client) -> Self {
        self.option(options::with_http_client(client))
    }

    pub fn build(self) -> Result<LighterClient> {
        let mut config = ClientConfiguration::new(self.endpoint)?;

        for option in self.options {
            option.apply(&mut config)?;
        }

        let http_client = match config
            .transport
            .get_or_insert_with(|| Transport::Settings(TransportSettings::default()))
        {
            Transport::Prebuilt(client) => client.clone(),
            Transport::Settings(settings) => {
                settings.fill_defaults();
                settings.build_client()?
            }
        };

        info!(
            endpoint = config.endpoint(),
            headers = config.default_headers().len(),
            proxy = ?config.transport_settings().and_then(|s| s.proxy.as_ref()),
            local_addr = ?config.transport_settings().and_then(|s| s.local_addr()),
            prebuilt = config.transport_settings().is_none(),
            "lighter client built"
        );

        Ok(LighterClient {
            http_client,
            config: Arc::new(config),
        })
    }
}
