/*
[INPUT]:  Caller-supplied option values (proxy, local IP, headers, flags, pool limits)
[OUTPUT]: Validated mutations of a ClientConfiguration
[POS]:    HTTP layer - composable client construction steps
[UPDATE]: When adding a new client option
*/

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::http::config::ClientConfiguration;
use crate::http::transport::{Dialer, ProxyRule, TlsPolicy};
use crate::http::{LighterError, Result};

const PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks5", "socks5h"];

/// A named configuration step applied while building a client.
///
/// Options run in the order given. Options touching the dial strategy
/// replace it, so the last one wins.
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// Route every request through a fixed proxy
    Proxy(String),
    /// Ignore environment proxies and connect directly
    NoProxy,
    /// Bind outgoing connections to a local IP
    LocalAddr(String),
    /// Install a custom dial strategy
    Dialer(Dialer),
    /// Merge into the default headers
    CustomHeaders(Vec<(String, String)>),
    FatFingerProtection(bool),
    ChannelName(String),
    Tls(TlsPolicy),
    /// Per-host caps and idle eviction. `max_conns_per_host` and
    /// `idle_timeout` must be non-zero; `max_idle_per_host == 0` keeps no
    /// idle connections.
    PoolLimits {
        max_conns_per_host: usize,
        max_idle_per_host: usize,
        idle_timeout: Duration,
    },
    Timeout(Duration),
    /// Use a ready-made reqwest client as the transport
    HttpClient(reqwest::Client),
}

pub fn with_proxy(proxy_url: impl Into<String>) -> ClientOption {
    ClientOption::Proxy(proxy_url.into())
}

pub fn without_proxy() -> ClientOption {
    ClientOption::NoProxy
}

pub fn with_local_addr(local_ip: impl Into<String>) -> ClientOption {
    ClientOption::LocalAddr(local_ip.into())
}

pub fn with_dialer(dialer: Dialer) -> ClientOption {
    ClientOption::Dialer(dialer)
}

pub fn with_custom_headers<I, K, V>(headers: I) -> ClientOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ClientOption::CustomHeaders(
        headers
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect(),
    )
}

pub fn set_fat_finger_protection(enabled: bool) -> ClientOption {
    ClientOption::FatFingerProtection(enabled)
}

pub fn with_channel_name(name: impl Into<String>) -> ClientOption {
    ClientOption::ChannelName(name.into())
}

pub fn with_tls_policy(policy: TlsPolicy) -> ClientOption {
    ClientOption::Tls(policy)
}

pub fn with_pool_limits(
    max_conns_per_host: usize,
    max_idle_per_host: usize,
    idle_timeout: Duration,
) -> ClientOption {
    ClientOption::PoolLimits {
        max_conns_per_host,
        max_idle_per_host,
        idle_timeout,
    }
}

pub fn with_timeout(timeout: Duration) -> ClientOption {
    ClientOption::Timeout(timeout)
}

pub fn with_http_client(client: reqwest::Client) -> ClientOption {
    ClientOption::HttpClient(client)
}

impl From<HashMap<String, String>> for ClientOption {
    fn from(headers: HashMap<String, String>) -> Self {
        with_custom_headers(headers)
    }
}

impl ClientOption {
    /// Apply this option to an in-progress configuration
    pub(crate) fn apply(self, config: &mut ClientConfiguration) -> Result<()> {
        match self {
            ClientOption::Proxy(raw) => {
                if raw.is_empty() {
                    return Ok(());
                }
                let url = parse_proxy_url(&raw)?;
                debug!(proxy = %url, "proxy configured");
                config.ensure_transport()?.proxy = Some(ProxyRule::Fixed(url));
            }
            ClientOption::NoProxy => {
                debug!("proxy disabled");
                config.ensure_transport()?.proxy = Some(ProxyRule::None);
            }
            ClientOption::LocalAddr(raw) => {
                if raw.is_empty() {
                    return Ok(());
                }
                let ip: IpAddr = raw.trim().parse().map_err(|source| {
                    LighterError::InvalidLocalAddress {
                        addr: raw.clone(),
                        source,
                    }
                })?;
                debug!(local_addr = %ip, "dialer bound to local address");
                config.ensure_transport()?.dialer = Some(Dialer::bound_to(ip));
            }
            ClientOption::Dialer(dialer) => {
                debug!(
                    timeout_ms = dialer.timeout.as_millis() as u64,
                    keep_alive_ms = dialer.keep_alive.as_millis() as u64,
                    "dialer replaced"
                );
                config.ensure_transport()?.dialer = Some(dialer);
            }
            ClientOption::CustomHeaders(headers) => {
                for (key, value) in headers {
                    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                        LighterError::InvalidHeader {
                            name: key.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                    let value =
                        HeaderValue::from_str(&value).map_err(|err| LighterError::InvalidHeader {
                            name: key.clone(),
                            reason: err.to_string(),
                        })?;
                    config.default_headers.insert(name, value);
                }
                debug!(count = config.default_headers.len(), "default headers merged");
            }
            ClientOption::FatFingerProtection(enabled) => {
                config.fat_finger_protection = enabled;
            }
            ClientOption::ChannelName(name) => {
                config.channel_name = name;
            }
            ClientOption::Tls(policy) => {
                config.ensure_transport()?.tls = Some(policy);
            }
            ClientOption::PoolLimits {
                max_conns_per_host,
                max_idle_per_host,
                idle_timeout,
            } => {
                if max_conns_per_host == 0 {
                    return Err(LighterError::Config(
                        "max_conns_per_host must be at least 1".to_string(),
                    ));
                }
                if idle_timeout.is_zero() {
                    return Err(LighterError::Config(
                        "idle_timeout must be greater than zero".to_string(),
                    ));
                }
                let settings = config.ensure_transport()?;
                settings.max_conns_per_host = Some(max_conns_per_host);
                settings.max_idle_per_host = Some(max_idle_per_host);
                settings.idle_timeout = Some(idle_timeout);
            }
            ClientOption::Timeout(timeout) => {
                config.ensure_transport()?.request_timeout = Some(timeout);
            }
            ClientOption::HttpClient(client) => {
                debug!("caller-supplied http client installed");
                config.install_transport(client)?;
            }
        }
        Ok(())
    }
}

fn parse_proxy_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|source| LighterError::InvalidProxyUrl {
        url: raw.to_string(),
        source,
    })?;

    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(LighterError::UnusableProxyUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    if !url.has_host() {
        return Err(LighterError::UnusableProxyUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}
