/*
[INPUT]:  Proxy rule, dial strategy, TLS policy, pool limits and timeouts
[OUTPUT]: Transport settings and the reqwest client materialized from them
[POS]:    HTTP layer - transport description and construction
[UPDATE]: When adding transport knobs or changing default values
*/

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::{debug, warn};
use url::Url;

use crate::http::Result;

pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_CONNS_PER_HOST: usize = 1000;
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 100;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where outbound connections are routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRule {
    /// Connect directly, ignoring proxy environment variables
    None,
    /// Route every destination through this proxy
    Fixed(Url),
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` / `ALL_PROXY` / `NO_PROXY`
    Environment,
}

/// Server certificate trust policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    #[default]
    Verify,
    /// Accept any certificate. Development only.
    SkipVerify,
}

/// Strategy used to open new connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialer {
    pub timeout: Duration,
    pub keep_alive: Duration,
    pub local_addr: Option<IpAddr>,
}

impl Default for Dialer {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DIAL_TIMEOUT,
            keep_alive: DEFAULT_KEEP_ALIVE,
            local_addr: None,
        }
    }
}

impl Dialer {
    /// Default dialer bound to a local source IP
    pub fn bound_to(ip: IpAddr) -> Self {
        Self {
            local_addr: Some(ip),
            ..Self::default()
        }
    }

    /// Bind address with an ephemeral port
    pub fn local_socket_addr(&self) -> Option<SocketAddr> {
        self.local_addr.map(|ip| SocketAddr::new(ip, 0))
    }
}

/// Transport description accumulated while options are applied.
///
/// `None` means "not configured yet"; [`TransportSettings::fill_defaults`]
/// replaces every unset field with its documented default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    pub proxy: Option<ProxyRule>,
    /// Active dial strategy. Replaced wholesale, never merged.
    pub dialer: Option<Dialer>,
    pub tls: Option<TlsPolicy>,
    pub max_conns_per_host: Option<usize>,
    pub max_idle_per_host: Option<usize>,
    pub idle_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl TransportSettings {
    /// Settings with every field at its default
    pub fn with_defaults() -> Self {
        let mut settings = Self::default();
        settings.fill_defaults();
        settings
    }

    pub fn fill_defaults(&mut self) {
        self.proxy.get_or_insert(ProxyRule::Environment);
        self.dialer.get_or_insert_with(Dialer::default);
        self.tls.get_or_insert(TlsPolicy::Verify);
        self.max_conns_per_host.get_or_insert(DEFAULT_MAX_CONNS_PER_HOST);
        self.max_idle_per_host.get_or_insert(DEFAULT_MAX_IDLE_PER_HOST);
        self.idle_timeout.get_or_insert(DEFAULT_IDLE_TIMEOUT);
        self.request_timeout.get_or_insert(DEFAULT_REQUEST_TIMEOUT);
    }

    /// Local source IP of the active dialer, if bound
    pub fn local_addr(&self) -> Option<IpAddr> {
        self.dialer.and_then(|dialer| dialer.local_addr)
    }

    /// Proxy URL when a fixed proxy is configured
    pub fn proxy_url(&self) -> Option<&Url> {
        match &self.proxy {
            Some(ProxyRule::Fixed(url)) => Some(url),
            _ => None,
        }
    }

    /// Build the pooled reqwest client. Unset fields use defaults.
    pub(crate) fn build_client(&self) -> Result<Client> {
        let dialer = self.dialer.unwrap_or_default();
        let tls = self.tls.unwrap_or_default();

        let mut builder = Client::builder()
            .connect_timeout(dialer.timeout)
            .tcp_keepalive(dialer.keep_alive)
            .local_address(dialer.local_addr)
            .pool_max_idle_per_host(self.max_idle_per_host.unwrap_or(DEFAULT_MAX_IDLE_PER_HOST))
            .pool_idle_timeout(self.idle_timeout.unwrap_or(DEFAULT_IDLE_TIMEOUT))
            .timeout(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT));

        builder = match self.proxy.as_ref().unwrap_or(&ProxyRule::Environment) {
            ProxyRule::None => builder.no_proxy(),
            ProxyRule::Fixed(url) => builder.proxy(Proxy::all(url.as_str())?),
            ProxyRule::Environment => builder,
        };

        if tls == TlsPolicy::SkipVerify {
            warn!("tls certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        // reqwest's pool has no cap on active connections per host.
        debug!(
            max_conns_per_host = self.max_conns_per_host.unwrap_or(DEFAULT_MAX_CONNS_PER_HOST),
            "per-host connection cap recorded"
        );

        Ok(builder.build()?)
    }
}

/// Transport slot owned by a client configuration
#[derive(Debug, Clone)]
pub enum Transport {
    /// Described by settings, materialized by the builder
    Settings(TransportSettings),
    /// Supplied ready-made by the caller, never modified
    Prebuilt(Client),
}
