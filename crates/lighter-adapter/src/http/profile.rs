/*
[INPUT]:  Deserialized client settings (YAML/JSON sections of caller config files)
[OUTPUT]: ClientBuilder with the equivalent options applied
[POS]:    Configuration layer - serde front end for client options
[UPDATE]: When adding client options that should be file-configurable
*/

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::client::ClientBuilder;
use crate::http::transport::{
    DEFAULT_DIAL_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_KEEP_ALIVE, DEFAULT_MAX_CONNS_PER_HOST,
    DEFAULT_MAX_IDLE_PER_HOST, DEFAULT_REQUEST_TIMEOUT, Dialer, TlsPolicy,
};
use crate::http::{LighterError, Result};

/// File-friendly client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the API
    pub endpoint: String,
    /// Fixed proxy (http, https, socks5); empty means environment proxies
    #[serde(default)]
    pub proxy: Option<String>,
    /// Connect directly, ignoring proxy environment variables
    #[serde(default)]
    pub no_proxy: bool,
    /// Local source IP for outgoing connections
    #[serde(default)]
    pub local_addr: Option<String>,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_fat_finger_protection")]
    pub fat_finger_protection: bool,
    #[serde(default)]
    pub channel_name: String,
    /// Skip TLS certificate verification. Development only.
    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default = "default_dial_timeout_secs")]
    pub dial_timeout_secs: u64,
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
    #[serde(default = "default_max_conns_per_host")]
    pub max_conns_per_host: usize,
    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            proxy: None,
            no_proxy: false,
            local_addr: None,
            headers: BTreeMap::new(),
            fat_finger_protection: default_fat_finger_protection(),
            channel_name: String::new(),
            insecure_skip_verify: false,
            dial_timeout_secs: default_dial_timeout_secs(),
            keep_alive_secs: default_keep_alive_secs(),
            max_conns_per_host: default_max_conns_per_host(),
            max_idle_per_host: default_max_idle_per_host(),
            idle_timeout_secs: default_idle_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Translate into builder options.
    ///
    /// `local_addr` is folded into the configured dialer, so the file's
    /// dial timeout and keep-alive apply to bound connections too. A
    /// non-empty `proxy` takes precedence over `no_proxy`.
    pub fn into_builder(self) -> Result<ClientBuilder> {
        let local_addr = match self.local_addr.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<IpAddr>().map_err(|source| {
                LighterError::InvalidLocalAddress {
                    addr: raw.to_string(),
                    source,
                }
            })?),
        };
        let tls = if self.insecure_skip_verify {
            TlsPolicy::SkipVerify
        } else {
            TlsPolicy::Verify
        };

        let mut builder = ClientBuilder::new(self.endpoint)
            .dialer(Dialer {
                timeout: Duration::from_secs(self.dial_timeout_secs),
                keep_alive: Duration::from_secs(self.keep_alive_secs),
                local_addr,
            })
            .tls_policy(tls)
            .pool_limits(
                self.max_conns_per_host,
                self.max_idle_per_host,
                Duration::from_secs(self.idle_timeout_secs),
            )
            .timeout(Duration::from_secs(self.timeout_secs))
            .custom_headers(self.headers)
            .fat_finger_protection(self.fat_finger_protection)
            .channel_name(self.channel_name);

        if self.no_proxy {
            builder = builder.no_proxy();
        }
        if let Some(proxy) = self.proxy {
            builder = builder.proxy(proxy);
        }
        Ok(builder)
    }
}

fn default_fat_finger_protection() -> bool {
    true
}

fn default_dial_timeout_secs() -> u64 {
    DEFAULT_DIAL_TIMEOUT.as_secs()
}

fn default_keep_alive_secs() -> u64 {
    DEFAULT_KEEP_ALIVE.as_secs()
}

fn default_max_conns_per_host() -> usize {
    DEFAULT_MAX_CONNS_PER_HOST
}

fn default_max_idle_per_host() -> usize {
    DEFAULT_MAX_IDLE_PER_HOST
}

fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT.as_secs()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}
